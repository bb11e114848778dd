//! # Declarative Setup
//!
//! An [`RxConfig`] describes a validation context as data, so the same
//! prefixes and learned types can be loaded from a JSON or YAML file:
//!
//! ```yaml
//! register_core_types: true
//! prefixes:
//!   - name: app
//!     base: "tag:example.com,2024:app/"
//! types:
//!   - uri: "tag:example.com,2024:app/name"
//!     schema: { type: "//str", length: { min: 1 } }
//! ```
//!
//! Prefixes are applied first, then types are learned in list order, so a
//! type may refer to any type listed before it.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rx_core::{json_type_name, RxResult};

use crate::factory::{Rx, RxOptions};

/// One prefix registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrefixEntry {
    /// Short prefix name, as written between the first two slashes.
    pub name: String,
    /// URI base the prefix expands to.
    pub base: String,
}

/// One learned type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LearnedType {
    /// URI to register the type under.
    pub uri: String,
    /// The type's definition.
    pub schema: Value,
}

/// Setup description for an [`Rx`] context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RxConfig {
    /// Seed the fourteen core types.
    #[serde(default)]
    pub register_core_types: bool,
    /// Prefixes to add, in order.
    #[serde(default)]
    pub prefixes: Vec<PrefixEntry>,
    /// Types to learn, in order.
    #[serde(default)]
    pub types: Vec<LearnedType>,
}

impl RxConfig {
    /// Deserialize a config from a loaded value.
    ///
    /// The config and each of its `prefixes` and `types` entries must be
    /// mappings; derived struct deserialization would otherwise also read
    /// them positionally from sequences.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        expect_mapping(&value, "config")?;
        for list in ["prefixes", "types"] {
            if let Some(Value::Array(entries)) = value.get(list) {
                for (i, entry) in entries.iter().enumerate() {
                    expect_mapping(entry, &format!("{list}[{i}]"))?;
                }
            }
        }
        serde_json::from_value(value)
    }

    /// The construction options this config implies.
    pub fn options(&self) -> RxOptions {
        RxOptions {
            register_core_types: self.register_core_types,
        }
    }
}

fn expect_mapping(value: &Value, what: &str) -> Result<(), serde_json::Error> {
    if value.is_object() {
        Ok(())
    } else {
        Err(serde_json::Error::custom(format!(
            "{what} must be a mapping, got {}",
            json_type_name(value)
        )))
    }
}

impl Rx {
    /// Build a context from a config.
    ///
    /// # Errors
    ///
    /// Returns the first error from adding a prefix or learning a type.
    pub fn from_config(config: &RxConfig) -> RxResult<Self> {
        let mut rx = Rx::new(config.options());
        for prefix in &config.prefixes {
            rx.add_prefix(&prefix.name, &prefix.base)?;
        }
        for learned in &config.types {
            rx.learn_type(&learned.uri, &learned.schema)?;
        }
        tracing::debug!(
            prefixes = config.prefixes.len(),
            types = config.types.len(),
            "built validation context from config"
        );
        Ok(rx)
    }
}
