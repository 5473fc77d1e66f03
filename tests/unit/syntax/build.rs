use super::*;

#[test]
fn assignment_wraps_identifier_and_value() {
    let node = assign("A", call("point", [num(3.0), num(4.0)]));
    assert_eq!(node.name(), "assignment");
    let SyntaxNode::Call { args, .. } = &node else {
        panic!("expected call node");
    };
    assert_eq!(args[0], ident("A"));
    assert_eq!(args[1].name(), "point");
}

#[test]
fn negation_multiplies_by_minus_one() {
    assert_eq!(neg(ident("v")), call("*", [ident("v"), num(-1.0)]));
}

#[test]
fn program_serializes_one_tree_per_line() {
    let lines = ProgramBuilder::new()
        .statement(assign("A", num(5.0)))
        .blank()
        .statement(ident("A"))
        .build()
        .unwrap();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("\"assignment\""));
    assert!(lines[1].is_empty());
    assert_eq!(lines[2], r#"{"name":"string","value":"A"}"#);
}
