//! Condition evaluation: fixed-operator checks against the run context.
//!
//! `condition` steps compute a boolean `pass` from `{field, operator,
//! value}`. The field is looked up directly in the context -- no
//! interpolation. An unknown operator is a fatal configuration error.

use serde_json::{Map, Value};

use vigil_types::error::WorkflowError;
use vigil_types::workflow::{Condition, ConditionOperator};

use super::interpolate::value_to_string;

/// Evaluate a condition against the context.
pub fn evaluate(cond: &Condition, context: &Map<String, Value>) -> Result<bool, WorkflowError> {
    let op: ConditionOperator = cond.operator.parse()?;
    let field_value = context.get(&cond.field);

    let pass = match op {
        ConditionOperator::Equals => field_value == Some(&cond.value),
        ConditionOperator::NotEquals => field_value != Some(&cond.value),
        ConditionOperator::GreaterThan => compare_numeric(field_value, &cond.value, |a, b| a > b),
        ConditionOperator::LessThan => compare_numeric(field_value, &cond.value, |a, b| a < b),
        ConditionOperator::Contains => {
            let haystack = field_value.map(|v| value_to_string(v)).unwrap_or_default();
            haystack.contains(&value_to_string(&cond.value))
        }
        ConditionOperator::Exists => field_value.is_some_and(|v| !v.is_null()),
    };

    Ok(pass)
}

/// Numeric comparison; non-numeric operands evaluate false.
fn compare_numeric(
    field_value: Option<&Value>,
    expected: &Value,
    cmp: impl Fn(f64, f64) -> bool,
) -> bool {
    match (field_value.and_then(Value::as_f64), expected.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> Map<String, Value> {
        json!({ "n": 5, "name": "observer-hub", "flag": true, "gone": null })
            .as_object()
            .cloned()
            .unwrap()
    }

    fn cond(field: &str, operator: &str, value: Value) -> Condition {
        Condition {
            field: field.to_string(),
            operator: operator.to_string(),
            value,
        }
    }

    #[test]
    fn equals_and_not_equals() {
        assert!(evaluate(&cond("n", "equals", json!(5)), &ctx()).unwrap());
        assert!(!evaluate(&cond("n", "equals", json!(6)), &ctx()).unwrap());
        assert!(evaluate(&cond("n", "notEquals", json!(6)), &ctx()).unwrap());
        // Missing field: equals false, notEquals true
        assert!(!evaluate(&cond("missing", "equals", json!(5)), &ctx()).unwrap());
        assert!(evaluate(&cond("missing", "notEquals", json!(5)), &ctx()).unwrap());
    }

    #[test]
    fn greater_and_less_than() {
        assert!(evaluate(&cond("n", "greaterThan", json!(3)), &ctx()).unwrap());
        assert!(!evaluate(&cond("n", "lessThan", json!(3)), &ctx()).unwrap());
        assert!(evaluate(&cond("n", "lessThan", json!(10)), &ctx()).unwrap());
        // Non-numeric operands evaluate false
        assert!(!evaluate(&cond("name", "greaterThan", json!(3)), &ctx()).unwrap());
        assert!(!evaluate(&cond("n", "greaterThan", json!("3x")), &ctx()).unwrap());
    }

    #[test]
    fn contains_uses_string_coercion() {
        assert!(evaluate(&cond("name", "contains", json!("hub")), &ctx()).unwrap());
        assert!(!evaluate(&cond("name", "contains", json!("dash")), &ctx()).unwrap());
        // Numeric field coerced to its string form
        assert!(evaluate(&cond("n", "contains", json!(5)), &ctx()).unwrap());
        // Missing field coerces to empty string
        assert!(!evaluate(&cond("missing", "contains", json!("x")), &ctx()).unwrap());
    }

    #[test]
    fn exists_requires_present_and_non_null() {
        assert!(evaluate(&cond("flag", "exists", Value::Null), &ctx()).unwrap());
        assert!(!evaluate(&cond("gone", "exists", Value::Null), &ctx()).unwrap());
        assert!(!evaluate(&cond("missing", "exists", Value::Null), &ctx()).unwrap());
    }

    #[test]
    fn unknown_operator_is_fatal() {
        let err = evaluate(&cond("n", "like", json!(5)), &ctx()).unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownOperator(_)));
        assert!(err.to_string().contains("like"));
    }
}
