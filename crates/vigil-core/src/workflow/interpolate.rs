//! Context interpolation: `{{var}}` substitution over a parameter tree.
//!
//! Pure function over `serde_json::Value`: string leaves get each
//! `{{name}}` token replaced with the context's value for `name`; nested
//! objects are walked recursively; arrays and non-string scalars pass
//! through unchanged. A token whose name is not in the context is left as
//! literal text -- a miss is silent, never an error.

use serde_json::{Map, Value};

/// Interpolate `params` against `context`, returning a structurally
/// identical tree with string placeholders resolved.
pub fn interpolate(params: &Value, context: &Map<String, Value>) -> Value {
    match params {
        Value::String(s) => Value::String(interpolate_str(s, context)),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), interpolate(v, context)))
                .collect(),
        ),
        // Arrays are treated as opaque scalars: no element interpolation.
        other => other.clone(),
    }
}

/// Resolve every `{{name}}` token in one string, left to right.
fn interpolate_str(input: &str, context: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        let Some(end) = rest[start + 2..].find("}}") else {
            break;
        };
        let name = &rest[start + 2..start + 2 + end];
        out.push_str(&rest[..start]);
        match context.get(name) {
            Some(value) => out.push_str(&value_to_string(value)),
            None => {
                // Unknown key: keep the literal token
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
        rest = &rest[start + 2 + end + 2..];
    }

    out.push_str(rest);
    out
}

/// Convert a JSON value to its substitution string.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Objects/arrays substitute as compact JSON
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn substitution_in_string_leaf() {
        let params = json!({ "url": "{{base}}/path" });
        let out = interpolate(&params, &ctx(json!({ "base": "http://x" })));
        assert_eq!(out, json!({ "url": "http://x/path" }));
    }

    #[test]
    fn no_placeholders_is_identity() {
        let params = json!({
            "provider": "anthropic",
            "maxEvents": 50,
            "filters": { "success": false },
            "tags": ["a", "b"],
        });
        let out = interpolate(&params, &ctx(json!({ "unused": 1 })));
        assert_eq!(out, params);
    }

    #[test]
    fn missing_key_left_literal() {
        let params = json!({ "a": "{{missing}}" });
        let out = interpolate(&params, &Map::new());
        assert_eq!(out, json!({ "a": "{{missing}}" }));
    }

    #[test]
    fn multiple_tokens_resolved_independently() {
        let params = json!({ "msg": "{{a}} and {{b}} and {{c}}" });
        let out = interpolate(&params, &ctx(json!({ "a": "one", "c": 3 })));
        assert_eq!(out, json!({ "msg": "one and {{b}} and 3" }));
    }

    #[test]
    fn nested_objects_interpolated_recursively() {
        let params = json!({
            "outer": { "inner": { "id": "{{patientId}}" } },
        });
        let out = interpolate(&params, &ctx(json!({ "patientId": "p-42" })));
        assert_eq!(out["outer"]["inner"]["id"], json!("p-42"));
    }

    #[test]
    fn arrays_pass_through_opaque() {
        let params = json!({ "list": ["{{x}}", "plain"] });
        let out = interpolate(&params, &ctx(json!({ "x": "resolved" })));
        // Array elements are deliberately not interpolated
        assert_eq!(out["list"][0], json!("{{x}}"));
    }

    #[test]
    fn non_string_scalars_unchanged() {
        let params = json!({ "n": 5, "b": true, "z": null });
        let out = interpolate(&params, &ctx(json!({ "n": 99 })));
        assert_eq!(out, params);
    }

    #[test]
    fn value_stringification() {
        assert_eq!(value_to_string(&json!("s")), "s");
        assert_eq!(value_to_string(&json!(5)), "5");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(null)), "null");
        assert_eq!(value_to_string(&json!({"k": 1})), "{\"k\":1}");
    }

    #[test]
    fn unterminated_token_left_as_is() {
        let params = json!({ "s": "before {{open" });
        let out = interpolate(&params, &ctx(json!({ "open": "x" })));
        assert_eq!(out, json!({ "s": "before {{open" }));
    }
}
