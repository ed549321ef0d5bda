//! Onboarding tutorial content for sift CLI

/// Get the onboarding tutorial content
pub fn get_onboarding_content() -> &'static str {
    r#"WELCOME TO SIFT

Sift compiles filter queries against a field schema into an expression tree.

STEP 1: WRITE A SCHEMA
----------------------
Describe the fields a query may use, their types and allowed operators.

  cat > schema.json <<'EOF'
  {"fields": [
    {"name": "status", "label": "Status", "type": "Boolean",
     "operators": ["Equal", "NotEqual"],
     "values": [{"name": "Enabled", "value": true}, {"name": "Disabled", "value": false}]},
    {"name": "age", "label": "Age", "type": "Number",
     "operators": ["Equal", "GreaterThan", "LessThan", "In"]},
    {"name": "email", "label": "Email", "type": "String",
     "operators": ["EndWith", "Blank", "NotBlank"]}
  ]}
  EOF

STEP 2: A SINGLE CONDITION
--------------------------
Field, operator, value. Labels and names are case-insensitive.

  sift check 'age > 18' --schema schema.json
  => ["age","GreaterThan",18.0]

STEP 3: LOOKUPS
---------------
Named values are replaced before type checking.

  sift check 'Status = Enabled' --schema schema.json
  => ["status","Equal",true]

STEP 4: LISTS AND OPERAND-LESS OPERATORS
----------------------------------------
  sift check 'age in 18, 21, 30' --schema schema.json
  => ["age","In",[18.0,21.0,30.0]]

  sift check 'email blank' --schema schema.json
  => ["email","Blank",""]

STEP 5: COMBINING
-----------------
  sift check '(age < 18 or age > 65) and status = Enabled' --schema schema.json

STEP 6: JSON QUERIES
--------------------
  sift check --json '["Or", [["age", "<", 18], ["email", "EndWith", "@example.com"]]]' \
    --schema schema.json

STEP 7: VALIDATION ONLY
-----------------------
  sift check --syntax-only 'age > eighteen' --schema schema.json
  => Invalid query: invalid token 'eighteen'

NEXT STEPS
----------
  sift docs              List all documentation categories
  sift doc operators     All operators
  sift doc types         Field types and literal forms
"#
}
