//! # Schema Compiler
//!
//! [`Rx`] is a validation context: a [`PrefixRegistry`] and a
//! [`TypeRegistry`], plus the compiler that turns definitions into
//! [`Schema`] trees.
//!
//! ## Compilation
//!
//! 1. A bare string is shorthand for `{"type": <string>}`.
//! 2. The definition must be a mapping with a string `type`.
//! 3. `type` is expanded to a URI through the prefix registry.
//! 4. The URI is looked up in the type registry.
//! 5. A learned alias takes no parameters; its stored definition is
//!    compiled in place, without a wrapper node.
//! 6. A builtin constructor validates its parameters and compiles its
//!    children through this same context.
//!
//! Any failure aborts the whole compilation.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use rx_core::{json_type_name, PrefixRegistry, RxError, RxResult};

use crate::registry::{TypeConstructor, TypeEntry, TypeRegistry};
use crate::schema::Schema;

/// Construction options for [`Rx`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RxOptions {
    /// Seed the type registry with the fourteen core types.
    #[serde(default)]
    pub register_core_types: bool,
}

/// A validation context: registries plus the schema compiler.
///
/// Setup (`add_prefix`, `register_type`, `learn_type`) needs `&mut self`;
/// compilation only needs `&self`, so a fully set-up context can be
/// shared freely.
#[derive(Debug, Clone, Default)]
pub struct Rx {
    prefixes: PrefixRegistry,
    types: TypeRegistry,
}

impl Rx {
    /// Create a context. The type registry is empty unless
    /// `options.register_core_types` is set.
    pub fn new(options: RxOptions) -> Self {
        let types = if options.register_core_types {
            TypeRegistry::with_core_types()
        } else {
            TypeRegistry::new()
        };
        Self {
            prefixes: PrefixRegistry::new(),
            types,
        }
    }

    /// Create a context with the core types registered.
    pub fn with_core_types() -> Self {
        Self::new(RxOptions {
            register_core_types: true,
        })
    }

    /// The prefix registry.
    pub fn prefixes(&self) -> &PrefixRegistry {
        &self.prefixes
    }

    /// The type registry.
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Expand a type name into a canonical URI.
    pub fn expand_uri(&self, type_name: &str) -> RxResult<String> {
        self.prefixes.expand_uri(type_name)
    }

    /// Register a prefix for short type names.
    ///
    /// # Errors
    ///
    /// Returns [`RxError::DuplicatePrefix`] if `name` is taken.
    pub fn add_prefix(&mut self, name: &str, base: &str) -> RxResult<()> {
        self.prefixes.add_prefix(name, base)
    }

    /// Register a builtin type under the URI it reports.
    ///
    /// # Errors
    ///
    /// Returns [`RxError::DuplicateType`] if that URI is already registered.
    pub fn register_type(&mut self, constructor: impl TypeConstructor + 'static) -> RxResult<()> {
        let uri = constructor.uri();
        tracing::debug!(uri = %uri, "registering builtin type");
        self.types
            .register(uri, TypeEntry::Builtin(Arc::new(constructor)))
    }

    /// Register `definition` as a new type reachable at `uri`.
    ///
    /// The definition is compiled once to make sure it is valid, then
    /// stored uncompiled; each later use compiles it again.
    ///
    /// # Errors
    ///
    /// Returns [`RxError::DuplicateType`] if `uri` is already registered,
    /// or whatever error compiling `definition` produces.
    pub fn learn_type(&mut self, uri: &str, definition: &Value) -> RxResult<()> {
        if self.types.contains(uri) {
            return Err(RxError::DuplicateType(uri.to_string()));
        }
        self.make_schema(definition)?;
        tracing::debug!(uri, "learned type");
        self.types
            .register(uri.to_string(), TypeEntry::Alias(definition.clone()))
    }

    /// Compile a definition into a schema.
    ///
    /// # Errors
    ///
    /// Returns an [`RxError`] describing the first problem found. No
    /// partially built schema is ever returned.
    pub fn make_schema(&self, definition: &Value) -> RxResult<Schema> {
        let definition = normalize(definition)?;
        let type_name = match definition.get("type") {
            Some(Value::String(name)) => name.as_str(),
            Some(other) => {
                return Err(RxError::InvalidSchema(format!(
                    "'type' must be a string, got {}",
                    json_type_name(other)
                )))
            }
            None => {
                return Err(RxError::InvalidSchema(
                    "definition has no 'type'".to_string(),
                ))
            }
        };

        let uri = self.expand_uri(type_name)?;
        let entry = self
            .types
            .get(&uri)
            .ok_or_else(|| RxError::UnknownType(uri.clone()))?;
        tracing::trace!(type_name, uri = %uri, "resolved schema type");

        match entry {
            TypeEntry::Alias(aliased) => {
                if definition.keys().any(|k| k != "type") {
                    return Err(RxError::AliasParameters(uri));
                }
                self.make_schema(aliased)
            }
            TypeEntry::Builtin(constructor) => constructor.build(&definition, self),
        }
    }
}

/// Expand the bare-string shorthand and reject anything that is not a
/// mapping.
fn normalize(definition: &Value) -> RxResult<Cow<'_, Map<String, Value>>> {
    match definition {
        Value::Object(map) => Ok(Cow::Borrowed(map)),
        Value::String(name) => {
            let mut map = Map::new();
            map.insert("type".to_string(), Value::String(name.clone()));
            Ok(Cow::Owned(map))
        }
        other => Err(RxError::InvalidSchema(format!(
            "expected a type name or a mapping, got {}",
            json_type_name(other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_context_knows_no_types() {
        let rx = Rx::new(RxOptions::default());
        assert!(rx.types().is_empty());
        let err = rx.make_schema(&json!("//str")).unwrap_err();
        assert_eq!(
            err,
            RxError::UnknownType("tag:codesimply.com,2008:rx/core/str".to_string())
        );
    }

    #[test]
    fn test_string_shorthand() {
        let rx = Rx::with_core_types();
        let schema = rx.make_schema(&json!("//str")).unwrap();
        assert!(schema.check(&json!("x")));
        assert!(!schema.check(&json!(1)));
    }

    #[test]
    fn test_absolute_type_uri() {
        let rx = Rx::with_core_types();
        let schema = rx
            .make_schema(&json!({"type": "tag:codesimply.com,2008:rx/core/nil"}))
            .unwrap();
        assert!(schema.check(&json!(null)));
    }

    #[test]
    fn test_invalid_definitions() {
        let rx = Rx::with_core_types();
        for def in [json!(1), json!(null), json!(["//str"]), json!({}), json!({"type": 3})] {
            assert!(
                matches!(rx.make_schema(&def), Err(RxError::InvalidSchema(_))),
                "{def} should be an invalid schema"
            );
        }
    }

    #[test]
    fn test_name_errors_surface() {
        let rx = Rx::with_core_types();
        assert!(matches!(
            rx.make_schema(&json!("str")),
            Err(RxError::MalformedTypeName(_))
        ));
        assert!(matches!(
            rx.make_schema(&json!("/app/str")),
            Err(RxError::UnknownPrefix { .. })
        ));
        assert!(matches!(
            rx.make_schema(&json!("//string")),
            Err(RxError::UnknownType(_))
        ));
    }

    #[test]
    fn test_learn_type_and_use() {
        let mut rx = Rx::with_core_types();
        rx.add_prefix("app", "tag:example.com,2024:app/").unwrap();
        rx.learn_type(
            "tag:example.com,2024:app/name",
            &json!({"type": "//str", "length": {"min": 1}}),
        )
        .unwrap();

        let schema = rx
            .make_schema(&json!({"type": "//arr", "contents": "/app/name"}))
            .unwrap();
        assert!(schema.check(&json!(["Ada", "Grace"])));
        assert!(!schema.check(&json!(["Ada", ""])));
        // No wrapper node: the alias compiles straight to its target kind.
        assert!(matches!(
            rx.make_schema(&json!("/app/name")).unwrap(),
            Schema::Str(_)
        ));
    }

    #[test]
    fn test_alias_takes_no_parameters() {
        let mut rx = Rx::with_core_types();
        rx.learn_type("tag:x:/y", &json!("//str")).unwrap();
        assert!(rx.make_schema(&json!({"type": "tag:x:/y"})).is_ok());
        let err = rx
            .make_schema(&json!({"type": "tag:x:/y", "value": "z"}))
            .unwrap_err();
        assert_eq!(err, RxError::AliasParameters("tag:x:/y".to_string()));
    }

    #[test]
    fn test_learn_type_validates_definition() {
        let mut rx = Rx::with_core_types();
        let err = rx
            .learn_type("tag:x:/bad", &json!({"type": "//arr"}))
            .unwrap_err();
        assert!(matches!(err, RxError::MissingParameter { .. }));
        assert!(!rx.types().contains("tag:x:/bad"));
    }

    #[test]
    fn test_learn_type_rejects_registered_uri() {
        let mut rx = Rx::with_core_types();
        let err = rx
            .learn_type("tag:codesimply.com,2008:rx/core/str", &json!("//int"))
            .unwrap_err();
        assert!(matches!(err, RxError::DuplicateType(_)));

        rx.learn_type("tag:x:/y", &json!("//int")).unwrap();
        assert!(rx.learn_type("tag:x:/y", &json!("//str")).is_err());
    }

    #[test]
    fn test_self_reference_cannot_be_learned() {
        let mut rx = Rx::with_core_types();
        let err = rx
            .learn_type(
                "tag:x:/list",
                &json!({"type": "//arr", "contents": "tag:x:/list"}),
            )
            .unwrap_err();
        assert_eq!(err, RxError::UnknownType("tag:x:/list".to_string()));
    }

    #[test]
    fn test_register_core_type_twice() {
        let mut rx = Rx::with_core_types();
        let err = rx.register_type(crate::CoreType::Str).unwrap_err();
        assert!(matches!(err, RxError::DuplicateType(_)));

        let mut empty = Rx::default();
        empty.register_type(crate::CoreType::Str).unwrap();
        assert!(empty.make_schema(&json!("//str")).is_ok());
        assert!(empty.make_schema(&json!("//int")).is_err());
    }

    #[test]
    fn test_duplicate_prefix() {
        let mut rx = Rx::default();
        rx.add_prefix("p", "base1").unwrap();
        assert_eq!(
            rx.add_prefix("p", "base2").unwrap_err(),
            RxError::DuplicatePrefix("p".to_string())
        );
    }
}
