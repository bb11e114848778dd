//! # File Loading
//!
//! Reads schema definitions, documents, and context configs from disk.
//! Files ending in `.yaml` or `.yml` are parsed as YAML and converted to the
//! JSON value model; everything else is parsed as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use rx_schema::{Rx, RxConfig};
use serde_json::Value;
use thiserror::Error;

/// Failure to turn a file into a value.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid YAML.
    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The YAML parsed but has no JSON equivalent.
    #[error("cannot represent YAML from {} as JSON: {reason}", path.display())]
    Conversion { path: PathBuf, reason: String },

    /// The file parsed but is not a valid context config.
    #[error("invalid config in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk format, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.yaml` and `.yml` (any case) are YAML; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

/// Parse `text` in the given format.
pub fn parse_value(text: &str, format: Format, path: &Path) -> Result<Value, LoadError> {
    match format {
        Format::Json => serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Format::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|source| LoadError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?;
            yaml_to_json_value(&yaml).map_err(|reason| LoadError::Conversion {
                path: path.to_path_buf(),
                reason,
            })
        }
    }
}

/// Read and parse a JSON or YAML file.
pub fn load_value(path: &Path) -> Result<Value, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded file");
    parse_value(&text, Format::from_path(path), path)
}

/// Read a context config file.
pub fn load_config(path: &Path) -> Result<RxConfig, LoadError> {
    let value = load_value(path)?;
    RxConfig::from_value(value).map_err(|source| LoadError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the validation context for a run: from `config` when given,
/// otherwise a context with the core types registered.
pub fn build_context(config: Option<&Path>) -> anyhow::Result<Rx> {
    use anyhow::Context;

    match config {
        Some(path) => {
            let config = load_config(path)?;
            Rx::from_config(&config)
                .with_context(|| format!("failed to set up context from {}", path.display()))
        }
        None => Ok(Rx::with_core_types()),
    }
}

/// Convert a YAML value into the JSON value model that schemas and
/// documents are checked in.
///
/// Rx mapping keys are always strings, so string, number, and boolean YAML
/// keys are stringified and any other key is an error. Integers stay
/// integers so `//int` and exact `value` matches see the same number a JSON
/// file would give. Tags carry no Rx meaning; the tagged value is kept.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
