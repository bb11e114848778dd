//! # Range Predicate
//!
//! `RangeCheck` is the bound predicate shared by `//arr` and `//str`
//! (`length`) and by `//int` and `//num` (`range`).
//!
//! A range definition is a mapping with any subset of four keys:
//!
//! | Key      | Rejects `n` when |
//! |----------|------------------|
//! | `min`    | `n < min`        |
//! | `min-ex` | `n <= min-ex`    |
//! | `max-ex` | `n >= max-ex`    |
//! | `max`    | `n > max`        |
//!
//! Absent bounds impose nothing, so `{}` accepts every number. Any other
//! key, or a non-numeric bound, is a compile error.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{RxError, RxResult};
use crate::number::compare;
use crate::value::json_type_name;

/// Compiled `min` / `max` / `min-ex` / `max-ex` predicate.
///
/// Immutable once built. `null` for a bound is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RangeCheck {
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    /// Exclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ex: Option<Number>,
    /// Exclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ex: Option<Number>,
}

impl RangeCheck {
    /// Build a range from its definition mapping.
    ///
    /// # Errors
    ///
    /// Returns [`RxError::InvalidRange`] if the definition is not a mapping,
    /// has a key other than the four bounds, or has a non-numeric bound.
    pub fn from_definition(definition: &Value) -> RxResult<Self> {
        // A derived struct visitor also fills fields from a sequence by
        // position, so the mapping shape is enforced here.
        if !definition.is_object() {
            return Err(RxError::InvalidRange(format!(
                "expected a mapping, got {}",
                json_type_name(definition)
            )));
        }
        Self::deserialize(definition).map_err(|e| RxError::InvalidRange(e.to_string()))
    }

    /// Returns true if `n` satisfies every bound that is set.
    pub fn check(&self, n: &Number) -> bool {
        let violates = |bound: &Option<Number>, reject: fn(Ordering) -> bool| {
            bound
                .as_ref()
                .is_some_and(|b| compare(n, b).map_or(true, reject))
        };

        if violates(&self.min, |o| o == Ordering::Less) {
            return false;
        }
        if violates(&self.min_ex, |o| o != Ordering::Greater) {
            return false;
        }
        if violates(&self.max_ex, |o| o != Ordering::Less) {
            return false;
        }
        if violates(&self.max, |o| o == Ordering::Greater) {
            return false;
        }
        true
    }

    /// Check a length or count.
    pub fn check_len(&self, len: usize) -> bool {
        self.check(&Number::from(len))
    }

    /// Returns true if no bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.min_ex.is_none() && self.max_ex.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn range(def: Value) -> RangeCheck {
        RangeCheck::from_definition(&def).unwrap()
    }

    fn n(v: i64) -> Number {
        Number::from(v)
    }

    #[test]
    fn test_half_open_range() {
        let r = range(json!({"min": 1, "max-ex": 5}));
        for ok in 1..=4 {
            assert!(r.check(&n(ok)), "{ok} should be in [1, 5)");
        }
        for bad in [0, 5, 6] {
            assert!(!r.check(&n(bad)), "{bad} should be outside [1, 5)");
        }
    }

    #[test]
    fn test_exclusive_min_and_inclusive_max() {
        let r = range(json!({"min-ex": 0, "max": 3}));
        assert!(!r.check(&n(0)));
        assert!(r.check(&n(1)));
        assert!(r.check(&n(3)));
        assert!(!r.check(&n(4)));
    }

    #[test]
    fn test_float_bounds() {
        let r = range(json!({"min": 0.5, "max-ex": 1.5}));
        assert!(r.check(&Number::from_f64(0.5).unwrap()));
        assert!(r.check(&n(1)));
        assert!(!r.check(&Number::from_f64(1.5).unwrap()));
        assert!(!r.check(&n(0)));
    }

    #[test]
    fn test_empty_range_accepts_everything() {
        let r = range(json!({}));
        assert!(r.is_unbounded());
        assert!(r.check(&n(i64::MIN)));
        assert!(r.check_len(usize::MAX));
    }

    #[test]
    fn test_null_bound_is_absent() {
        let r = range(json!({"min": null, "max": 2}));
        assert!(r.check(&n(-100)));
        assert!(!r.check(&n(3)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RangeCheck::from_definition(&json!({"min": 1, "above": 2})).unwrap_err();
        assert!(matches!(err, RxError::InvalidRange(_)));
    }

    #[test]
    fn test_non_numeric_bound_rejected() {
        assert!(RangeCheck::from_definition(&json!({"min": "1"})).is_err());
    }

    #[test]
    fn test_non_mapping_rejected() {
        for def in [json!([1, 5]), json!([]), json!(3), json!("1..5")] {
            let err = RangeCheck::from_definition(&def).unwrap_err();
            assert!(
                matches!(&err, RxError::InvalidRange(msg) if msg.starts_with("expected a mapping")),
                "{def}: {err}"
            );
        }
    }

    #[test]
    fn test_check_len() {
        let r = range(json!({"max": 2}));
        assert!(r.check_len(0));
        assert!(r.check_len(2));
        assert!(!r.check_len(3));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// An inclusive range accepts exactly the integers between its bounds.
        #[test]
        fn inclusive_range_matches_interval(lo in -1000i64..1000, span in 0i64..1000, x in -3000i64..3000) {
            let hi = lo + span;
            let r = RangeCheck {
                min: Some(Number::from(lo)),
                max: Some(Number::from(hi)),
                ..RangeCheck::default()
            };
            prop_assert_eq!(r.check(&Number::from(x)), lo <= x && x <= hi);
        }

        /// Exclusive bounds accept exactly the open interval.
        #[test]
        fn exclusive_range_matches_open_interval(lo in -1000i64..1000, span in 0i64..1000, x in -3000i64..3000) {
            let hi = lo + span;
            let r = RangeCheck {
                min_ex: Some(Number::from(lo)),
                max_ex: Some(Number::from(hi)),
                ..RangeCheck::default()
            };
            prop_assert_eq!(r.check(&Number::from(x)), lo < x && x < hi);
        }
    }
}
