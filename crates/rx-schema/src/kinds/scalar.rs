//! `//int`, `//num`, and `//str`: scalars with an optional exact value
//! and an optional range.

use serde_json::{Number, Value};

use rx_core::{json_type_name, number, RangeCheck, RxResult};

use super::Params;

/// Read the `value` parameter of a numeric kind.
fn number_literal(params: &Params<'_>) -> RxResult<Option<Number>> {
    match params.get("value") {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(other) => Err(params.invalid(
            "value",
            format!("expected a number, got {}", json_type_name(other)),
        )),
    }
}

/// `//int`: a number with no fractional part.
///
/// `5.0` counts as integral. Booleans are never numbers.
#[derive(Debug, Clone)]
pub struct IntType {
    value: Option<Number>,
    range: Option<RangeCheck>,
}

impl IntType {
    pub(crate) fn build(params: &Params<'_>) -> RxResult<Self> {
        let value = number_literal(params)?;
        if let Some(n) = &value {
            if !number::is_integral(n) {
                return Err(params.invalid("value", format!("{n} is not an integer")));
            }
        }
        Ok(Self {
            value,
            range: params.range("range")?,
        })
    }

    /// The exact value required, if any.
    pub fn value(&self) -> Option<&Number> {
        self.value.as_ref()
    }

    /// The range the value must fall in, if any.
    pub fn range(&self) -> Option<&RangeCheck> {
        self.range.as_ref()
    }

    pub(crate) fn check(&self, value: &Value) -> bool {
        let Value::Number(n) = value else {
            return false;
        };
        if !number::is_integral(n) {
            return false;
        }
        check_number(n, self.range.as_ref(), self.value.as_ref())
    }
}

/// `//num`: any number.
#[derive(Debug, Clone)]
pub struct NumType {
    value: Option<Number>,
    range: Option<RangeCheck>,
}

impl NumType {
    pub(crate) fn build(params: &Params<'_>) -> RxResult<Self> {
        Ok(Self {
            value: number_literal(params)?,
            range: params.range("range")?,
        })
    }

    /// The exact value required, if any.
    pub fn value(&self) -> Option<&Number> {
        self.value.as_ref()
    }

    /// The range the value must fall in, if any.
    pub fn range(&self) -> Option<&RangeCheck> {
        self.range.as_ref()
    }

    pub(crate) fn check(&self, value: &Value) -> bool {
        let Value::Number(n) = value else {
            return false;
        };
        check_number(n, self.range.as_ref(), self.value.as_ref())
    }
}

fn check_number(n: &Number, range: Option<&RangeCheck>, expected: Option<&Number>) -> bool {
    if range.is_some_and(|r| !r.check(n)) {
        return false;
    }
    expected.map_or(true, |e| number::equals(n, e))
}

/// `//str`: a string, optionally an exact one, optionally with a
/// character-count range.
#[derive(Debug, Clone)]
pub struct StrType {
    value: Option<String>,
    length: Option<RangeCheck>,
}

impl StrType {
    pub(crate) fn build(params: &Params<'_>) -> RxResult<Self> {
        let value = match params.get("value") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(params.invalid(
                    "value",
                    format!("expected a string, got {}", json_type_name(other)),
                ))
            }
        };
        Ok(Self {
            value,
            length: params.range("length")?,
        })
    }

    /// The exact string required, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Bound on the character count, if any.
    pub fn length(&self) -> Option<&RangeCheck> {
        self.length.as_ref()
    }

    pub(crate) fn check(&self, value: &Value) -> bool {
        let Value::String(s) = value else {
            return false;
        };
        if self.value.as_ref().is_some_and(|expected| expected != s) {
            return false;
        }
        self.length
            .as_ref()
            .map_or(true, |length| length.check_len(s.chars().count()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Rx, RxError, Schema};
    use serde_json::{json, Value};

    fn compile(def: Value) -> Schema {
        Rx::with_core_types().make_schema(&def).unwrap()
    }

    fn compile_err(def: Value) -> RxError {
        Rx::with_core_types().make_schema(&def).unwrap_err()
    }

    #[test]
    fn test_int_value() {
        let schema = compile(json!({"type": "//int", "value": 5}));
        assert!(schema.check(&json!(5)));
        assert!(schema.check(&json!(5.0)));
        assert!(!schema.check(&json!(6)));
        assert!(!schema.check(&json!(5.5)));
        assert!(!schema.check(&json!("5")));
        assert!(!schema.check(&json!(true)));
    }

    #[test]
    fn test_int_rejects_fractions_and_non_numbers() {
        let schema = compile(json!("//int"));
        assert!(schema.check(&json!(-7)));
        assert!(schema.check(&json!(u64::MAX)));
        assert!(!schema.check(&json!(0.1)));
        assert!(!schema.check(&json!(false)));
        assert!(!schema.check(&json!(null)));
        assert!(!schema.check(&json!([1])));
    }

    #[test]
    fn test_int_range() {
        let schema = compile(json!({"type": "//int", "range": {"min": 1, "max-ex": 5}}));
        for ok in 1..=4 {
            assert!(schema.check(&json!(ok)));
        }
        for bad in [0, 5, 6] {
            assert!(!schema.check(&json!(bad)));
        }
        assert!(!schema.check(&json!(2.5)));
    }

    #[test]
    fn test_int_value_must_be_integral_number() {
        assert!(matches!(
            compile_err(json!({"type": "//int", "value": 5.5})),
            RxError::InvalidParameter { .. }
        ));
        assert!(matches!(
            compile_err(json!({"type": "//int", "value": "5"})),
            RxError::InvalidParameter { .. }
        ));
        assert!(matches!(
            compile_err(json!({"type": "//int", "value": true})),
            RxError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn test_num_value_and_range() {
        let schema = compile(json!({"type": "//num", "value": 2.5}));
        assert!(schema.check(&json!(2.5)));
        assert!(!schema.check(&json!(2)));

        let schema = compile(json!({"type": "//num", "range": {"min": 1, "max-ex": 5}}));
        assert!(schema.check(&json!(1)));
        assert!(schema.check(&json!(4.99)));
        assert!(!schema.check(&json!(0)));
        assert!(!schema.check(&json!(5)));
        assert!(!schema.check(&json!(6)));
        assert!(!schema.check(&json!(true)));
    }

    #[test]
    fn test_num_value_rejects_bool() {
        assert!(compile_err(json!({"type": "//num", "value": false}))
            .to_string()
            .contains("invalid value parameter for //num"));
    }

    #[test]
    fn test_str_value() {
        let schema = compile(json!({"type": "//str", "value": "z"}));
        assert!(schema.check(&json!("z")));
        assert!(!schema.check(&json!("y")));
        assert!(!schema.check(&json!(1)));
    }

    #[test]
    fn test_str_length_counts_characters() {
        let schema = compile(json!({"type": "//str", "length": {"min": 1, "max-ex": 5}}));
        assert!(schema.check(&json!("a")));
        assert!(schema.check(&json!("abcd")));
        assert!(schema.check(&json!("\u{e9}\u{e8}\u{ea}\u{eb}")));
        assert!(!schema.check(&json!("")));
        assert!(!schema.check(&json!("abcde")));
    }

    #[test]
    fn test_str_value_must_be_string() {
        assert!(matches!(
            compile_err(json!({"type": "//str", "value": 1})),
            RxError::InvalidParameter { .. }
        ));
    }
}
