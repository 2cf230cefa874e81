//! Coercion of loosely typed tool arguments.
//!
//! Tool hosts deliver most arguments as text regardless of their declared
//! type, so boolean handling lives here instead of at each call site.

use serde_json::Value;

use crate::constants::TRUTHY_TOKENS;

/// Read a boolean argument.
///
/// - native booleans are taken as-is
/// - text is `true` only for one of [`TRUTHY_TOKENS`] (case-insensitive), any other text is `false`
/// - numbers are `true` when nonzero
/// - anything else (absent, null, arrays, objects) yields `default`
pub fn to_boolean_flag(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let token = s.trim().to_lowercase();
            TRUTHY_TOKENS.contains(&token.as_str())
        }
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_tokens() {
        for token in ["true", "TRUE", " yes ", "Y", "on", "1"] {
            assert!(to_boolean_flag(Some(&json!(token)), false), "{token}");
        }
    }

    #[test]
    fn test_other_text_is_false() {
        for token in ["false", "no", "0", "", "maybe"] {
            assert!(!to_boolean_flag(Some(&json!(token)), true), "{token}");
        }
    }

    #[test]
    fn test_native_and_numeric_values() {
        assert!(to_boolean_flag(Some(&json!(true)), false));
        assert!(!to_boolean_flag(Some(&json!(false)), true));
        assert!(to_boolean_flag(Some(&json!(2)), false));
        assert!(to_boolean_flag(Some(&json!(0.5)), false));
        assert!(!to_boolean_flag(Some(&json!(0)), true));
    }

    #[test]
    fn test_unsupported_values_fall_back_to_default() {
        assert!(to_boolean_flag(None, true));
        assert!(!to_boolean_flag(None, false));
        assert!(to_boolean_flag(Some(&Value::Null), true));
        assert!(to_boolean_flag(Some(&json!(["true"])), true));
        assert!(!to_boolean_flag(Some(&json!({"on": true})), false));
    }
}
