use super::*;
use crate::syntax::build::{assign, call, ident, num, text};

#[test]
fn parses_single_node_and_arrays() {
    let src = JsonSource;
    let node = assign("A", call("point", [num(0.0), num(0.0)]));
    let line = serde_json::to_string(&node).unwrap();
    assert_eq!(src.parse(&line).unwrap(), vec![node.clone()]);

    let many = serde_json::to_string(&vec![node.clone(), ident("A")]).unwrap();
    assert_eq!(src.parse(&many).unwrap(), vec![node, ident("A")]);
}

#[test]
fn literals_keep_their_kind() {
    let src = JsonSource;
    let nodes = src
        .parse(r#"{"name":"label","args":[{"name":"quotedstring","value":"hi"},{"name":"numeric","value":2}]}"#)
        .unwrap();
    assert_eq!(nodes, vec![call("label", [text("hi"), num(2.0)])]);
}

#[test]
fn blank_text_has_no_statements() {
    assert!(JsonSource.parse("   ").unwrap().is_empty());
}

#[test]
fn malformed_text_reports_location() {
    let err = JsonSource.parse("{\"name\": \"point\",\n \"args\": [").unwrap_err();
    match err {
        GeoError::Syntax { line, column, .. } => {
            assert_eq!(line, 2);
            assert!(column > 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}
