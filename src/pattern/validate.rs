// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Structural validation for raw pattern data.
//!
//! These predicates gate raw JSON values before full deserialization.
//! They check shape only: required fields present with the right
//! primitive kind, and every step array exactly 16 entries long.
//! Range checking is the import engine's job. A `false` result is a
//! signal to skip-and-report, never an error.

use serde_json::Value;

use super::bar::STEP_COUNT;
use super::PATTERN_TYPE;

/// The sixteen per-step array fields every bar must carry.
pub const STEP_ARRAY_FIELDS: [&str; 16] = [
    "note",
    "velocity",
    "length",
    "delay",
    "aux_a",
    "aux_b",
    "aux_c",
    "aux_d",
    "aux_a_flag",
    "aux_b_flag",
    "aux_c_flag",
    "aux_d_flag",
    "gate",
    "tie",
    "skip",
    "xpose_defeat",
];

/// Check whether a raw value is structurally a valid bar.
pub fn bar_is_valid(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    let scalars_ok = obj.get("direction").is_some_and(Value::is_string)
        && obj.get("timebase").is_some_and(Value::is_string)
        && obj.get("last_step").is_some_and(Value::is_number)
        && obj.get("transpose").is_some_and(Value::is_number)
        && obj.get("repeats").is_some_and(Value::is_number)
        && obj.get("global_bar_sync").is_some_and(Value::is_boolean);
    if !scalars_ok {
        return false;
    }

    STEP_ARRAY_FIELDS.iter().all(|field| {
        obj.get(*field)
            .and_then(Value::as_array)
            .is_some_and(|array| array.len() == STEP_COUNT)
    })
}

/// Check whether a raw value is structurally a valid pattern.
///
/// Verifies the `"P3"` type marker, the scalar metadata fields, and
/// that `bars` is an array. Individual bars are gated separately with
/// [`bar_is_valid`].
pub fn pattern_is_valid(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    obj.get("type").and_then(Value::as_str) == Some(PATTERN_TYPE)
        && obj.get("creator_track").is_some_and(Value::is_number)
        && obj.get("saved").is_some_and(Value::is_boolean)
        && obj.get("bar_count").is_some_and(Value::is_number)
        && obj.get("bars").is_some_and(Value::is_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Bar, CksPattern};

    fn valid_bar_value() -> Value {
        serde_json::to_value(Bar::new()).unwrap()
    }

    #[test]
    fn test_valid_bar_passes() {
        assert!(bar_is_valid(&valid_bar_value()));
    }

    #[test]
    fn test_non_object_fails() {
        assert!(!bar_is_valid(&Value::Null));
        assert!(!bar_is_valid(&serde_json::json!([1, 2, 3])));
        assert!(!pattern_is_valid(&Value::Null));
    }

    #[test]
    fn test_short_step_array_fails() {
        for field in STEP_ARRAY_FIELDS {
            let mut value = valid_bar_value();
            let array = value[field].as_array().unwrap();
            let shortened = Value::Array(array[..STEP_COUNT - 1].to_vec());
            value[field] = shortened;
            assert!(!bar_is_valid(&value), "{} of length 15 should fail", field);
        }
    }

    #[test]
    fn test_long_step_array_fails() {
        let mut value = valid_bar_value();
        let mut array = value["gate"].as_array().unwrap().clone();
        array.push(Value::Bool(false));
        value["gate"] = Value::Array(array);
        assert!(!bar_is_valid(&value));
    }

    #[test]
    fn test_missing_scalar_fails() {
        for field in ["direction", "timebase", "last_step", "repeats", "global_bar_sync"] {
            let mut value = valid_bar_value();
            value.as_object_mut().unwrap().remove(field);
            assert!(!bar_is_valid(&value), "missing {} should fail", field);
        }
    }

    #[test]
    fn test_wrong_scalar_kind_fails() {
        let mut value = valid_bar_value();
        value["last_step"] = Value::String("sixteen".to_string());
        assert!(!bar_is_valid(&value));
    }

    #[test]
    fn test_valid_pattern_passes() {
        let pattern = CksPattern::new(0);
        let value = serde_json::to_value(&pattern).unwrap();
        assert!(pattern_is_valid(&value));
    }

    #[test]
    fn test_wrong_type_marker_fails() {
        let mut value = serde_json::to_value(CksPattern::new(0)).unwrap();
        value["type"] = Value::String("P2".to_string());
        assert!(!pattern_is_valid(&value));
    }

    #[test]
    fn test_bars_not_array_fails() {
        let mut value = serde_json::to_value(CksPattern::new(0)).unwrap();
        value["bars"] = serde_json::json!({});
        assert!(!pattern_is_valid(&value));
    }
}
