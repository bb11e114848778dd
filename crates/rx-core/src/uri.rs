//! # Type Names and Prefixes
//!
//! Every Rx type is identified by a canonical URI. Schema authors rarely
//! write those out; instead they use short type names of the form
//! `/<prefix>/<local>`, where the prefix is looked up in a
//! [`PrefixRegistry`] and its base is prepended to `<local>`.
//!
//! The empty prefix maps to the core namespace, which is why the builtins
//! are spelled `//str`, `//rec`, and so on.
//!
//! ## Grammar
//!
//! - Absolute URI: one or more `[A-Za-z0-9_]` followed by `:`. Returned
//!   unchanged.
//! - Short name: `/` prefix `/` local, where prefix is `[-._a-z0-9]*`
//!   (possibly empty) and local is `[-._a-z0-9]+`.

use std::collections::HashMap;

use crate::error::{RxError, RxResult};

/// URI base of the fourteen core types (prefix `''`).
pub const CORE_BASE: &str = "tag:codesimply.com,2008:rx/core/";

/// URI base reserved for meta-schema types (prefix `'.meta'`).
pub const META_BASE: &str = "tag:codesimply.com,2008:rx/meta/";

/// Maps short prefix names to URI bases.
///
/// Constructed with the two builtin prefixes (`''` and `'.meta'`). Entries
/// are never replaced: adding a name twice is an error.
#[derive(Debug, Clone)]
pub struct PrefixRegistry {
    prefixes: HashMap<String, String>,
}

impl Default for PrefixRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixRegistry {
    /// Create a registry holding only the builtin prefixes.
    pub fn new() -> Self {
        let mut prefixes = HashMap::new();
        prefixes.insert(String::new(), CORE_BASE.to_string());
        prefixes.insert(".meta".to_string(), META_BASE.to_string());
        Self { prefixes }
    }

    /// Register a new prefix.
    ///
    /// # Errors
    ///
    /// Returns [`RxError::DuplicatePrefix`] if `name` is already registered,
    /// including the builtin `''` and `'.meta'`.
    pub fn add_prefix(&mut self, name: &str, base: &str) -> RxResult<()> {
        if self.prefixes.contains_key(name) {
            return Err(RxError::DuplicatePrefix(name.to_string()));
        }
        tracing::debug!(prefix = name, base, "registered type prefix");
        self.prefixes.insert(name.to_string(), base.to_string());
        Ok(())
    }

    /// Look up the URI base for a prefix.
    pub fn base(&self, name: &str) -> Option<&str> {
        self.prefixes.get(name).map(String::as_str)
    }

    /// Returns the number of registered prefixes, builtins included.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Always false: the builtin prefixes are present from construction.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Returns all prefix names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.prefixes.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Expand a type name into a canonical URI.
    ///
    /// # Errors
    ///
    /// Returns [`RxError::MalformedTypeName`] if `type_name` is neither an
    /// absolute URI nor `/<prefix>/<local>`, and [`RxError::UnknownPrefix`]
    /// if the prefix is not registered.
    pub fn expand_uri(&self, type_name: &str) -> RxResult<String> {
        if is_absolute_uri(type_name) {
            return Ok(type_name.to_string());
        }

        let (prefix, local) = split_short_name(type_name)
            .ok_or_else(|| RxError::MalformedTypeName(type_name.to_string()))?;

        let base = self.base(prefix).ok_or_else(|| RxError::UnknownPrefix {
            prefix: prefix.to_string(),
            type_name: type_name.to_string(),
        })?;

        Ok(format!("{base}{local}"))
    }
}

/// Matches `^\w+:` with ASCII word characters.
fn is_absolute_uri(name: &str) -> bool {
    match name.split_once(':') {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        None => false,
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'.' | b'_')
}

/// Split `/<prefix>/<local>` into its parts, or `None` if the shape is wrong.
fn split_short_name(name: &str) -> Option<(&str, &str)> {
    let rest = name.strip_prefix('/')?;
    let (prefix, local) = rest.split_once('/')?;
    if local.is_empty() {
        return None;
    }
    if !prefix.bytes().all(is_name_byte) || !local.bytes().all(is_name_byte) {
        return None;
    }
    Some((prefix, local))
}
