//! Documentation content for sift CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Json,
    Types,
    Schema,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "text" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "json" => Some(Self::Json),
            "types" | "type" => Some(Self::Types),
            "schema" | "metadata" => Some(Self::Schema),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SIFT DOCUMENTATION

Sift compiles filter queries into a backend-agnostic expression tree. Every
query is checked against a schema of fields: their names and labels, types,
allowed operators and named values.

DOCUMENTATION CATEGORIES

  syntax            Text grammar: conditions, logic, grouping, lists
  operators         Every operator with keyword and symbol forms
  json              JSON grammar: nested arrays
  types             Field types and the literal forms they accept
  schema            Schema file format

QUICK REFERENCE

  age > 18                        Condition
  status = Enabled                Named value
  role in admin, owner            List
  email blank                     Operand-less operator
  a = 1 and (b = 2 or c = 3)      Logic and grouping

Run 'sift doc <category>' for detailed documentation.
Run 'sift onboard' for a tutorial.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Json) => Ok(JSON_DOC),
        Some(DocCategory::Types) => Ok(TYPES_DOC),
        Some(DocCategory::Schema) => Ok(SCHEMA_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"TEXT GRAMMAR

CONDITIONS
  <field> <operator> <value>
  <field> <operator> <value>, <value> / <value>     (in, not in)
  <field> <operator>                                (blank, not blank)

  A field is written by name or label, case-insensitively.

LOGIC
  a = 1 and b = 2           also: &&
  a = 1 or b = 2            also: ||

  Logic has no precedence: a chain nests to the right.
    a = 1 and b = 2 or c = 3    is    a = 1 and (b = 2 or c = 3)

GROUPING
  (a = 1 or b = 2) and c = 3

VALUES
  Quote values containing spaces or punctuation: "two words", 'x/y'
  One quote character is stripped from each end.

LIMITATIONS
  Keywords are matched before field names, so a field named like a keyword
  (for example "and") cannot be used in text queries.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

  KEYWORD                   SYMBOL   JSON NAME
  equal                     =        Equal
  not equal                 !=       NotEqual
  greater than              >        GreaterThan
  greater than or equal     >=       GreaterThanOrEqual
  less than                 <        LessThan
  less than or equal        <=       LessThanOrEqual
  blank                     []       Blank
  not blank                 ![]      NotBlank
  contain                   ~        Contain
  not contain               !~       NotContain
  start with                ~*       StartWith
  not start with            !~*      NotStartWith
  end with                  *~       EndWith
  not end with              !*~      NotEndWith
  in                                 In
  not in                             NotIn

  blank and not blank take no value.
  in and not in take a list separated by "," or "/".
  A field only accepts the operators its schema lists.
"#;

const JSON_DOC: &str = r#"JSON GRAMMAR

LEAF
  ["<field>", "<operator>", <value>]
  ["<field>", "<operator>", [<value>, ...]]
  ["<field>", "Blank", ""]

LOGIC
  ["And", [<expression>, <expression>, ...]]
  ["Or",  [<expression>, <expression>, ...]]

  A logic node keeps all of its children in one list.

VALUES
  Strings, numbers, booleans and null (the empty value).
  A string that is not a single literal is taken whole for string fields:
    ["title", "Contain", "two words"]

EMPTY QUERY
  []
"#;

const TYPES_DOC: &str = r#"FIELD TYPES

  TYPE        LITERALS                            COMPILED TO
  String      any text, quotes stripped           string
  Number      12, -3.5                            64-bit float
  Boolean     true, false (any case)              boolean
  Date        2024-01-31                          date
  DateTime    2024-01-31 09:30, 2024-01-31 09:30:15
                                                  date and time
  Time        09:30, 09:30:15, 1h 15m, 90s        seconds

  Each type has an array form (StringArray, NumberArray, ...). Values for
  array fields are single elements of the element type.
"#;

const SCHEMA_DOC: &str = r#"SCHEMA FILE

  {
    "fields": [
      {
        "name": "status",                 canonical name, used in output
        "label": "Status",                optional display name
        "type": "Boolean",                see 'sift doc types'
        "operators": ["Equal"],           see 'sift doc operators'
        "values": [                       optional named values
          {"name": "Enabled", "value": true}
        ]
      }
    ]
  }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(DocCategory::from_name("OPS"), Some(DocCategory::Operators));
        assert_eq!(DocCategory::from_name("metadata"), Some(DocCategory::Schema));
        assert!(get_doc_category("json").unwrap().contains("JSON GRAMMAR"));
        assert!(matches!(get_doc_category("nope"), Err(CliError::UnknownCategory(_))));
    }
}
