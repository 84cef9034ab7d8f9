//! Unit tests for values, expressions, and template substitution.
use karakuri::error::EvalError;
use karakuri::prelude::*;

#[test]
fn test_value_display() {
    assert_eq!(format!("{}", Value::Number(42.0)), "42");
    assert_eq!(format!("{}", Value::Number(2.5)), "2.5");
    assert_eq!(format!("{}", Value::Str("hi".to_string())), "hi");
    assert_eq!(format!("{}", Value::Bool(true)), "true");
}

#[test]
fn test_evaluate_arithmetic() {
    let vars = VariableContext::default();
    assert_eq!(evaluate("1 + 2 * 3", &vars).unwrap(), Value::Number(7.0));
    assert_eq!(evaluate("(1 + 2) * 3", &vars).unwrap(), Value::Number(9.0));
    assert_eq!(evaluate("10 / 4", &vars).unwrap(), Value::Number(2.5));
    assert_eq!(evaluate("-3 + 5", &vars).unwrap(), Value::Number(2.0));
}

#[test]
fn test_evaluate_with_variables() {
    let mut vars = VariableContext::default();
    vars.insert("x".to_string(), Value::Number(5.0));
    vars.insert("y".to_string(), Value::Number(3.0));
    assert_eq!(evaluate("x + y", &vars).unwrap(), Value::Number(8.0));
}

#[test]
fn test_evaluate_comparisons() {
    let mut vars = VariableContext::default();
    vars.insert("i".to_string(), Value::Number(2.0));
    assert_eq!(evaluate("i < 3", &vars).unwrap(), Value::Bool(true));
    assert_eq!(evaluate("i >= 3", &vars).unwrap(), Value::Bool(false));
    assert_eq!(evaluate("i != 2", &vars).unwrap(), Value::Bool(false));
}

#[test]
fn test_evaluate_string_equality() {
    let mut vars = VariableContext::default();
    vars.insert("word".to_string(), Value::Str("yes".to_string()));
    assert_eq!(evaluate("word == \"yes\"", &vars).unwrap(), Value::Bool(true));
    assert_eq!(evaluate("word != 'no'", &vars).unwrap(), Value::Bool(true));
}

#[test]
fn test_evaluate_undefined_variable() {
    let vars = VariableContext::default();
    let error = evaluate("missing + 1", &vars).unwrap_err();
    assert_eq!(error, EvalError::UndefinedVariable("missing".to_string()));
}

#[test]
fn test_evaluate_malformed_syntax() {
    let vars = VariableContext::default();
    assert!(matches!(
        evaluate("1 +", &vars),
        Err(EvalError::Syntax { .. })
    ));
    assert!(matches!(
        evaluate("2 = 2", &vars),
        Err(EvalError::Syntax { .. })
    ));
}

#[test]
fn test_substitute_template() {
    let mut vars = VariableContext::default();
    vars.insert("sum".to_string(), Value::Number(8.0));
    assert_eq!(substitute_template("Sum is {sum}", &vars), "Sum is 8");
}

#[test]
fn test_substitute_template_leaves_unknown_names() {
    let vars = VariableContext::default();
    assert_eq!(substitute_template("Sum is {sum}", &vars), "Sum is {sum}");
}

#[test]
fn test_substitute_template_unmatched_brace() {
    let vars = VariableContext::default();
    assert_eq!(substitute_template("open { brace", &vars), "open { brace");
}

#[test]
fn test_auto_quote() {
    let mut vars = VariableContext::default();
    vars.insert("x".to_string(), Value::Number(10.0));
    // Known variable names and numbers pass through.
    assert_eq!(auto_quote("x", &vars), "x");
    assert_eq!(auto_quote("5", &vars), "5");
    assert_eq!(auto_quote("2.5", &vars), "2.5");
    // Anything else is wrapped so string comparisons are well-formed.
    assert_eq!(auto_quote("hello", &vars), "\"hello\"");
    // Already-quoted text stays as-is.
    assert_eq!(auto_quote("\"hello\"", &vars), "\"hello\"");
}

#[test]
fn test_block_kind_parse() {
    assert_eq!(BlockKind::parse("createVar"), BlockKind::CreateVar);
    assert_eq!(BlockKind::parse("while"), BlockKind::While);
    assert_eq!(BlockKind::parse("somethingNew"), BlockKind::Unknown);
}

#[test]
fn test_branch_tag_parse() {
    assert_eq!(BranchTag::parse("yes"), Some(BranchTag::Yes));
    assert_eq!(BranchTag::parse("exit"), Some(BranchTag::Exit));
    assert_eq!(BranchTag::parse("output-0"), None);
}

#[test]
fn test_ui_graph_conversion() {
    let json = r#"{
        "blocks": [
            { "id": "a", "type": "start" },
            { "id": "b", "type": "createVar", "fields": { "varName": "i", "varValue": 0 } },
            { "id": "c", "type": "mystery" }
        ],
        "edges": [
            { "id": "e1", "source": "a", "target": "b" },
            { "id": "e2", "source": "b", "target": "c", "sourceHandle": "yes" }
        ]
    }"#;
    let ui_graph: UiGraph = serde_json::from_str(json).unwrap();
    let graph = ui_graph.into_graph().unwrap();

    assert_eq!(graph.blocks[0].kind, BlockKind::Start);
    assert_eq!(graph.blocks[1].kind, BlockKind::CreateVar);
    assert_eq!(graph.blocks[1].field_text("varValue").as_deref(), Some("0"));
    assert_eq!(graph.blocks[2].kind, BlockKind::Unknown);
    assert_eq!(graph.edges[0].branch, None);
    assert_eq!(graph.edges[1].branch, Some(BranchTag::Yes));
}
