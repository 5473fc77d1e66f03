use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GeoError::expression("x")
            .to_string()
            .contains("expression error:")
    );
    assert!(GeoError::command("x").to_string().contains("command error:"));
    assert!(GeoError::change("x").to_string().contains("change error:"));
    assert!(GeoError::render("x").to_string().contains("render error:"));
    assert!(GeoError::config("x").to_string().contains("config error:"));
    assert!(
        GeoError::syntax(2, 7, "unexpected token")
            .to_string()
            .starts_with("syntax error at 2:7")
    );
}

#[test]
fn unknown_names_are_user_facing() {
    assert_eq!(
        GeoError::unknown_function("bogus").to_string(),
        "no such command: 'bogus'"
    );
    assert!(
        GeoError::unknown_variable("A")
            .to_string()
            .starts_with("Variable 'A' not defined.")
    );
}

#[test]
fn statement_attribution_is_applied_once() {
    let err = GeoError::command("missing shape")
        .at_statement(StatementId(3))
        .at_statement(StatementId(9));
    assert_eq!(err.statement(), Some(StatementId(3)));
    assert!(matches!(err.root(), GeoError::Command(_)));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GeoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
