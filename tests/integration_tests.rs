use sift_lang::{
    Expression, JsonParser, QueryParser, TextParser,
    cli::{CheckOptions, CheckResult, CliError, Grammar, execute_check},
    metadata::Metadata,
    output::{to_json, to_json_pretty, to_json_string},
};
use serde_json::json;

const SCHEMA: &str = r#"{
  "fields": [
    {"name": "status", "label": "Status", "type": "Boolean",
     "operators": ["Equal", "NotEqual"],
     "values": [{"name": "Enabled", "value": true}, {"name": "Disabled", "value": false}]},
    {"name": "age", "label": "Age", "type": "Number",
     "operators": ["Equal", "GreaterThan", "LessThan", "In"]},
    {"name": "email", "label": "Email", "type": "String",
     "operators": ["EndWith", "Contain", "Blank", "NotBlank"]},
    {"name": "born", "label": "Birthday", "type": "Date", "operators": ["LessThan"]},
    {"name": "seen", "label": "Last Seen", "type": "DateTime", "operators": ["GreaterThan"]},
    {"name": "uptime", "type": "Time", "operators": ["GreaterThan"]},
    {"name": "roles", "label": "Roles", "type": "StringArray", "operators": ["In", "NotIn"]}
  ]
}"#;

fn metadata() -> Metadata {
    Metadata::from_json(SCHEMA).unwrap()
}

fn check(query: &str, grammar: Grammar, syntax_only: bool) -> Result<CheckResult, CliError> {
    execute_check(&CheckOptions {
        query: query.to_string(),
        schema: SCHEMA.to_string(),
        grammar,
        syntax_only,
    })
}

fn parse_text(query: &str) -> Expression {
    let metadata = metadata();
    let parser = TextParser::new(&metadata).unwrap();
    parser.parse(query).unwrap().unwrap()
}

#[test]
fn test_check_compiles_text_query() {
    let result = check("Age > 18 and Status = Enabled", Grammar::Text, false).unwrap();
    assert_eq!(
        result,
        CheckResult::Expression(json!([
            "And",
            [["age", "GreaterThan", 18.0], ["status", "Equal", true]]
        ]))
    );
}

#[test]
fn test_check_compiles_json_query() {
    let result = check(
        r#"["Or", [["age", "<", 18], ["email", "EndWith", "@example.com"]]]"#,
        Grammar::Json,
        false,
    )
    .unwrap();
    assert_eq!(
        result,
        CheckResult::Expression(json!([
            "Or",
            [["age", "LessThan", 18.0], ["email", "EndWith", "@example.com"]]
        ]))
    );
}

#[test]
fn test_check_syntax_only() {
    assert_eq!(
        check("email blank", Grammar::Text, true).unwrap(),
        CheckResult::Valid
    );
    assert!(matches!(
        check("age > eighteen", Grammar::Text, true),
        Err(CliError::Validation(_))
    ));
    assert!(matches!(
        check(r#"["age", ">"]"#, Grammar::Json, true),
        Err(CliError::Validation(_))
    ));
}

#[test]
fn test_check_empty_query() {
    assert_eq!(check("  ", Grammar::Text, false).unwrap(), CheckResult::Empty);
    assert_eq!(check("[]", Grammar::Json, false).unwrap(), CheckResult::Empty);
}

#[test]
fn test_check_errors() {
    assert!(matches!(
        check("age >", Grammar::Text, false),
        Err(CliError::Parse(_))
    ));

    let result = execute_check(&CheckOptions {
        query: "age > 1".to_string(),
        schema: r#"{"fields": [{"name": "age"}]}"#.to_string(),
        grammar: Grammar::Text,
        syntax_only: false,
    });
    assert!(matches!(result, Err(CliError::Schema(_))));
}

#[test]
fn test_json_output_shapes() {
    let expr = parse_text("Roles in admin, \"power user\" and Birthday < 2000-01-31");
    assert_eq!(
        to_json(&expr),
        json!([
            "And",
            [
                ["roles", "In", ["admin", "power user"]],
                ["born", "LessThan", "2000-01-31"]
            ]
        ])
    );

    let expr = parse_text("uptime > 1h 30m");
    assert_eq!(to_json_string(&expr), r#"["uptime","GreaterThan","01:30:00"]"#);

    let pretty = to_json_pretty(&parse_text("email blank"));
    assert!(pretty.contains('\n'));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&pretty).unwrap(),
        json!(["email", "Blank", ""])
    );
}

#[test]
fn test_json_output_compiles_back() {
    let metadata = metadata();
    let parser = JsonParser::new(&metadata).unwrap();

    for query in [
        "Age > 18",
        "Status != Disabled",
        "email ~ \"a b, c\"",
        "email ~ \"and\"",
        "email ~ '('",
        "email ~ \"it'\"",
        "Roles in \"in\", \"not blank\", \"x\"",
        "email not blank",
        "Birthday < 1999-12-31",
        "Last Seen > 2024-05-06 07:08:09",
        "uptime > 90s",
        "age in 1, 2.5, 3",
        "Roles not in a / b",
        "age = 1 and (age = 2 or Status = Enabled) and email blank",
    ] {
        let expr = parse_text(query);
        let compiled = parser.parse(&to_json_string(&expr)).unwrap();
        assert_eq!(compiled, Some(expr), "Failed for input: {}", query);
    }
}

#[test]
fn test_display_compiles_back() {
    for query in [
        "Age > 18",
        "Status = Enabled",
        "email ~ \"a b, c\"",
        "email blank",
        "Last Seen > 2024-05-06 07:08",
        "uptime > 90s",
        "Roles in admin, \"power user\"",
        "age = 1 and age = 2 and age = 3",
        "(age = 1 or age = 2) and email not blank",
    ] {
        let expr = parse_text(query);
        assert_eq!(parse_text(&expr.to_string()), expr, "Failed for input: {}", query);
    }
}

#[test]
fn test_field_names() {
    let expr = parse_text("age = 1 and (email blank or age = 2)");
    assert_eq!(expr.field_names(), vec!["age", "email", "age"]);
}
