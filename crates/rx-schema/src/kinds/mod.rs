//! # Core Types
//!
//! The fourteen builtin Rx kinds. [`CoreType`] is the closed set of kinds
//! and their constructor; the per-kind compiled nodes live in the
//! submodules:
//!
//! - `composite`: `//all`, `//any`
//! - `collection`: `//arr`, `//map`, `//seq`
//! - `record`: `//rec`
//! - `scalar`: `//int`, `//num`, `//str`
//!
//! `//bool`, `//def`, `//fail`, `//nil`, and `//one` take no parameters and
//! are unit variants of [`Schema`].
//!
//! ## Parameters
//!
//! Each kind whitelists its parameter keys; anything else is a compile
//! error. A parameter whose value is `null` counts as absent.

mod collection;
mod composite;
mod record;
mod scalar;

pub use collection::{ArrType, MapType, SeqType};
pub use composite::{AllType, AnyType};
pub use record::RecType;
pub use scalar::{IntType, NumType, StrType};

use serde_json::{Map, Value};

use rx_core::{json_type_name, RangeCheck, RxError, RxResult, CORE_BASE};

use crate::factory::Rx;
use crate::registry::TypeConstructor;
use crate::schema::Schema;

/// One of the fourteen builtin kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreType {
    All,
    Any,
    Arr,
    Bool,
    Def,
    Fail,
    Int,
    Map,
    Nil,
    Num,
    One,
    Rec,
    Seq,
    Str,
}

impl CoreType {
    /// Every core kind, in registration order.
    pub const ALL: [CoreType; 14] = [
        CoreType::All,
        CoreType::Any,
        CoreType::Arr,
        CoreType::Bool,
        CoreType::Def,
        CoreType::Fail,
        CoreType::Int,
        CoreType::Map,
        CoreType::Nil,
        CoreType::Num,
        CoreType::One,
        CoreType::Rec,
        CoreType::Seq,
        CoreType::Str,
    ];

    /// The local part of the kind's URI, e.g. `"rec"`.
    pub fn subname(self) -> &'static str {
        match self {
            CoreType::All => "all",
            CoreType::Any => "any",
            CoreType::Arr => "arr",
            CoreType::Bool => "bool",
            CoreType::Def => "def",
            CoreType::Fail => "fail",
            CoreType::Int => "int",
            CoreType::Map => "map",
            CoreType::Nil => "nil",
            CoreType::Num => "num",
            CoreType::One => "one",
            CoreType::Rec => "rec",
            CoreType::Seq => "seq",
            CoreType::Str => "str",
        }
    }

    /// Canonical URI, e.g. `tag:codesimply.com,2008:rx/core/rec`.
    pub fn uri(self) -> String {
        format!("{CORE_BASE}{}", self.subname())
    }

    /// Short type name, e.g. `//rec`.
    pub fn type_name(self) -> String {
        format!("//{}", self.subname())
    }

    /// Accepted parameter keys, besides `type`.
    pub fn parameters(self) -> &'static [&'static str] {
        match self {
            CoreType::All | CoreType::Any => &["of"],
            CoreType::Arr => &["contents", "length"],
            CoreType::Int | CoreType::Num => &["range", "value"],
            CoreType::Map => &["values"],
            CoreType::Rec => &["required", "optional", "rest"],
            CoreType::Seq => &["contents", "tail"],
            CoreType::Str => &["value", "length"],
            CoreType::Bool | CoreType::Def | CoreType::Fail | CoreType::Nil | CoreType::One => &[],
        }
    }
}

impl TypeConstructor for CoreType {
    fn uri(&self) -> String {
        CoreType::uri(*self)
    }

    fn build(&self, definition: &Map<String, Value>, rx: &Rx) -> RxResult<Schema> {
        let params = Params::new(*self, definition)?;
        let schema = match self {
            CoreType::All => Schema::All(AllType::build(&params, rx)?),
            CoreType::Any => Schema::Any(AnyType::build(&params, rx)?),
            CoreType::Arr => Schema::Arr(ArrType::build(&params, rx)?),
            CoreType::Bool => Schema::Bool,
            CoreType::Def => Schema::Def,
            CoreType::Fail => Schema::Fail,
            CoreType::Int => Schema::Int(IntType::build(&params)?),
            CoreType::Map => Schema::Map(MapType::build(&params, rx)?),
            CoreType::Nil => Schema::Nil,
            CoreType::Num => Schema::Num(NumType::build(&params)?),
            CoreType::One => Schema::One,
            CoreType::Rec => Schema::Rec(RecType::build(&params, rx)?),
            CoreType::Seq => Schema::Seq(SeqType::build(&params, rx)?),
            CoreType::Str => Schema::Str(StrType::build(&params)?),
        };
        Ok(schema)
    }
}

/// A definition whose keys have been checked against its kind's whitelist.
pub(crate) struct Params<'a> {
    kind: CoreType,
    definition: &'a Map<String, Value>,
}

impl<'a> Params<'a> {
    pub(crate) fn new(kind: CoreType, definition: &'a Map<String, Value>) -> RxResult<Self> {
        let allowed = kind.parameters();
        if let Some(key) = definition
            .keys()
            .find(|k| k.as_str() != "type" && !allowed.contains(&k.as_str()))
        {
            return Err(RxError::unknown_parameter(kind.type_name(), key.as_str()));
        }
        Ok(Self { kind, definition })
    }

    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.definition.get(key).filter(|v| !v.is_null())
    }

    pub(crate) fn require(&self, key: &str) -> RxResult<&'a Value> {
        self.get(key)
            .ok_or_else(|| RxError::missing_parameter(self.kind.type_name(), key))
    }

    pub(crate) fn invalid(&self, key: &str, reason: impl Into<String>) -> RxError {
        RxError::invalid_parameter(self.kind.type_name(), key, reason)
    }

    pub(crate) fn mapping(&self, key: &str) -> RxResult<Option<&'a Map<String, Value>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(self.invalid(
                key,
                format!("expected a mapping, got {}", json_type_name(other)),
            )),
        }
    }

    /// Compile an optional nested schema.
    pub(crate) fn schema(&self, key: &str, rx: &Rx) -> RxResult<Option<Schema>> {
        self.get(key).map(|def| rx.make_schema(def)).transpose()
    }

    /// Compile a required, non-empty list of nested schemas. `empty` is the
    /// reason reported for an empty list.
    pub(crate) fn schema_list(&self, key: &str, rx: &Rx, empty: &str) -> RxResult<Vec<Schema>> {
        let items = match self.require(key)? {
            Value::Array(items) => items,
            other => {
                return Err(self.invalid(
                    key,
                    format!("expected a list, got {}", json_type_name(other)),
                ))
            }
        };
        if items.is_empty() {
            return Err(self.invalid(key, empty));
        }
        items.iter().map(|def| rx.make_schema(def)).collect()
    }

    /// Like [`Params::schema_list`], but `key` may be absent.
    pub(crate) fn alternatives(&self, key: &str, rx: &Rx) -> RxResult<Option<Vec<Schema>>> {
        if self.get(key).is_none() {
            return Ok(None);
        }
        self.schema_list(key, rx, "no alternatives given").map(Some)
    }

    /// Parse a range parameter. A range with no bounds is dropped.
    pub(crate) fn range(&self, key: &str) -> RxResult<Option<RangeCheck>> {
        let Some(def) = self.get(key) else {
            return Ok(None);
        };
        let range = RangeCheck::from_definition(def).map_err(|e| self.invalid(key, e.to_string()))?;
        Ok((!range.is_unbounded()).then_some(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_every_kind_has_distinct_core_uri() {
        let uris: std::collections::HashSet<String> =
            CoreType::ALL.iter().map(|kind| kind.uri()).collect();
        assert_eq!(uris.len(), CoreType::ALL.len());
        for kind in CoreType::ALL {
            assert_eq!(kind.uri(), format!("{CORE_BASE}{}", kind.subname()));
        }
    }

    #[test]
    fn test_type_name() {
        assert_eq!(CoreType::Seq.type_name(), "//seq");
    }

    #[test]
    fn test_params_whitelist() {
        let def = object(json!({"type": "//arr", "contents": "//str", "size": 3}));
        let err = Params::new(CoreType::Arr, &def).err().unwrap();
        assert_eq!(err, RxError::unknown_parameter("//arr", "size"));
    }

    #[test]
    fn test_params_null_is_absent() {
        let def = object(json!({"type": "//any", "of": null}));
        let params = Params::new(CoreType::Any, &def).unwrap();
        assert!(params.get("of").is_none());
    }

    #[test]
    fn test_params_shape_errors() {
        let def = object(json!({"type": "//rec", "required": ["a"]}));
        let params = Params::new(CoreType::Rec, &def).unwrap();
        assert!(matches!(
            params.mapping("required"),
            Err(RxError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_leaf_kinds_take_no_parameters() {
        let rx = Rx::with_core_types();
        for kind in [CoreType::Bool, CoreType::Def, CoreType::Fail, CoreType::Nil, CoreType::One] {
            let def = json!({"type": kind.type_name(), "value": 1});
            let err = rx.make_schema(&def).unwrap_err();
            assert!(
                matches!(err, RxError::UnknownParameter { .. }),
                "{} accepted a parameter",
                kind.type_name()
            );
        }
    }
}
