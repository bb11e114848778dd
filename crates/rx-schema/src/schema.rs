//! # Compiled Schemas
//!
//! A [`Schema`] is an immutable validator tree. Each node is one of the
//! fourteen core kinds, or a [`Schema::Custom`] node built by an
//! application-registered [`TypeConstructor`](crate::TypeConstructor).
//!
//! Checking never fails: wrong container kinds, missing fields, and wrong
//! scalar types all produce `false`.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::kinds::{
    AllType, AnyType, ArrType, CoreType, IntType, MapType, NumType, RecType, SeqType, StrType,
};
use crate::trace::{NoTrace, Trace, TraceRecorder, Tracer};

/// Compiled node of an application-defined type.
pub trait Check: Send + Sync + fmt::Debug {
    /// URI of the type this node was built from.
    fn uri(&self) -> &str;

    /// Returns true if `value` conforms. Must not panic.
    fn check(&self, value: &Value) -> bool;
}

/// A compiled validator tree.
#[derive(Debug, Clone)]
pub enum Schema {
    /// `//all`: every alternative must match.
    All(AllType),
    /// `//any`: at least one alternative must match, or anything at all.
    Any(AnyType),
    /// `//arr`: homogeneous sequence.
    Arr(ArrType),
    /// `//bool`: `true` or `false`.
    Bool,
    /// `//def`: anything but `null`.
    Def,
    /// `//fail`: nothing.
    Fail,
    /// `//int`: integral number.
    Int(IntType),
    /// `//map`: mapping with uniform values.
    Map(MapType),
    /// `//nil`: `null`.
    Nil,
    /// `//num`: any number.
    Num(NumType),
    /// `//one`: any scalar (number, string, boolean).
    One,
    /// `//rec`: mapping with named fields.
    Rec(RecType),
    /// `//seq`: positional sequence with optional tail.
    Seq(SeqType),
    /// `//str`: string.
    Str(StrType),
    /// Node of a custom registered type.
    Custom(Arc<dyn Check>),
}

impl Schema {
    /// The core kind of this node, or `None` for a custom node.
    pub fn kind(&self) -> Option<CoreType> {
        let kind = match self {
            Schema::All(_) => CoreType::All,
            Schema::Any(_) => CoreType::Any,
            Schema::Arr(_) => CoreType::Arr,
            Schema::Bool => CoreType::Bool,
            Schema::Def => CoreType::Def,
            Schema::Fail => CoreType::Fail,
            Schema::Int(_) => CoreType::Int,
            Schema::Map(_) => CoreType::Map,
            Schema::Nil => CoreType::Nil,
            Schema::Num(_) => CoreType::Num,
            Schema::One => CoreType::One,
            Schema::Rec(_) => CoreType::Rec,
            Schema::Seq(_) => CoreType::Seq,
            Schema::Str(_) => CoreType::Str,
            Schema::Custom(_) => return None,
        };
        Some(kind)
    }

    /// URI of this node's type.
    pub fn uri(&self) -> Cow<'_, str> {
        match self {
            Schema::Custom(custom) => Cow::Borrowed(custom.uri()),
            core => match core.kind() {
                Some(kind) => Cow::Owned(kind.uri()),
                None => Cow::Borrowed(""),
            },
        }
    }

    /// Returns true if `value` conforms to this schema.
    pub fn check(&self, value: &Value) -> bool {
        self.evaluate(value, &mut NoTrace)
    }

    /// Check `value` and also return the verdict of every evaluated node.
    ///
    /// The boolean is always equal to [`Schema::check`] for the same value.
    pub fn check_with_trace(&self, value: &Value) -> (bool, Trace) {
        let mut recorder = TraceRecorder::default();
        let verdict = self.evaluate(value, &mut recorder);
        (verdict, recorder.finish())
    }

    pub(crate) fn evaluate<T: Tracer>(&self, value: &Value, tracer: &mut T) -> bool {
        let verdict = match self {
            Schema::All(all) => all.evaluate(value, tracer),
            Schema::Any(any) => any.evaluate(value, tracer),
            Schema::Arr(arr) => arr.evaluate(value, tracer),
            Schema::Bool => value.is_boolean(),
            Schema::Def => !value.is_null(),
            Schema::Fail => false,
            Schema::Int(int) => int.check(value),
            Schema::Map(map) => map.evaluate(value, tracer),
            Schema::Nil => value.is_null(),
            Schema::Num(num) => num.check(value),
            Schema::One => matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_)),
            Schema::Rec(rec) => rec.evaluate(value, tracer),
            Schema::Seq(seq) => seq.evaluate(value, tracer),
            Schema::Str(s) => s.check(value),
            Schema::Custom(custom) => custom.check(value),
        };
        tracer.record(self, value, verdict);
        verdict
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::Rx;
    use proptest::prelude::*;
    use serde_json::json;

    /// Strategy for arbitrary JSON-like values, floats included.
    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
            "[a-zA-Z0-9_ ]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..6).prop_map(|m| {
                    let map: serde_json::Map<String, Value> = m.into_iter().collect();
                    Value::Object(map)
                }),
            ]
        })
    }

    fn sample_schemas() -> Vec<Schema> {
        let rx = Rx::with_core_types();
        [
            json!("//any"),
            json!({"type": "//rec", "optional": {"a": "//int"}, "rest": {"type": "//map", "values": "//one"}}),
            json!({"type": "//arr", "contents": {"type": "//any", "of": ["//num", "//str", "//nil"]}}),
            json!({"type": "//seq", "contents": ["//def"], "tail": {"type": "//arr", "contents": "//bool"}}),
            json!({"type": "//all", "of": ["//num", {"type": "//int", "range": {"min-ex": 0}}]}),
        ]
        .iter()
        .map(|def| rx.make_schema(def).unwrap())
        .collect()
    }

    proptest! {
        /// `//any` without alternatives accepts every value.
        #[test]
        fn any_accepts_everything(value in json_value()) {
            let any = Rx::with_core_types().make_schema(&json!("//any")).unwrap();
            prop_assert!(any.check(&value));
        }

        /// `//fail` rejects every value.
        #[test]
        fn fail_rejects_everything(value in json_value()) {
            prop_assert!(!Schema::Fail.check(&value));
        }

        /// Exactly one of `//def` and `//nil` accepts any given value.
        #[test]
        fn def_and_nil_partition_values(value in json_value()) {
            prop_assert_ne!(Schema::Def.check(&value), Schema::Nil.check(&value));
        }

        /// The traced walk reaches the same verdict as `check`.
        #[test]
        fn trace_verdict_matches_check(value in json_value()) {
            for schema in sample_schemas() {
                let (verdict, trace) = schema.check_with_trace(&value);
                prop_assert_eq!(verdict, schema.check(&value));
                let root = trace.entries().last().unwrap();
                prop_assert_eq!(root.verdict, verdict);
                prop_assert!(root.schema_path.is_empty());
            }
        }

        /// Checking is deterministic.
        #[test]
        fn check_is_deterministic(value in json_value()) {
            for schema in sample_schemas() {
                prop_assert_eq!(schema.check(&value), schema.check(&value));
            }
        }
    }
}
