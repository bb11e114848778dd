//! `//rec`: mappings with named fields.
//!
//! A record names its fields in two disjoint sets, `required` and
//! `optional`. Any other field in a checked mapping is *unknown*. Unknown
//! fields are rejected unless a `rest` schema is given, in which case they
//! are gathered into one sub-mapping and checked against `rest` together.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use rx_core::{RxError, RxResult};

use super::Params;
use crate::factory::Rx;
use crate::schema::Schema;
use crate::trace::{descend, Segment, Tracer};

/// `//rec`: compiled record.
#[derive(Debug, Clone)]
pub struct RecType {
    required: BTreeMap<String, Schema>,
    optional: BTreeMap<String, Schema>,
    rest: Option<Box<Schema>>,
}

impl RecType {
    pub(crate) fn build(params: &Params<'_>, rx: &Rx) -> RxResult<Self> {
        let rest = params.schema("rest", rx)?.map(Box::new);

        let mut required = BTreeMap::new();
        if let Some(fields) = params.mapping("required")? {
            for (name, def) in fields {
                required.insert(name.clone(), rx.make_schema(def)?);
            }
        }

        let mut optional = BTreeMap::new();
        if let Some(fields) = params.mapping("optional")? {
            for (name, def) in fields {
                if required.contains_key(name) {
                    return Err(RxError::OverlappingField(name.clone()));
                }
                optional.insert(name.clone(), rx.make_schema(def)?);
            }
        }

        Ok(Self {
            required,
            optional,
            rest,
        })
    }

    /// Fields that must be present, with their schemas.
    pub fn required(&self) -> &BTreeMap<String, Schema> {
        &self.required
    }

    /// Fields that may be present, with their schemas.
    pub fn optional(&self) -> &BTreeMap<String, Schema> {
        &self.optional
    }

    /// Schema for the mapping of unknown fields, if unknown fields are allowed.
    pub fn rest(&self) -> Option<&Schema> {
        self.rest.as_deref()
    }

    fn is_known(&self, field: &str) -> bool {
        self.required.contains_key(field) || self.optional.contains_key(field)
    }

    pub(crate) fn evaluate<T: Tracer>(&self, value: &Value, tracer: &mut T) -> bool {
        let Value::Object(fields) = value else {
            return false;
        };

        let unknown: Vec<(&String, &Value)> = fields
            .iter()
            .filter(|(name, _)| !self.is_known(name))
            .collect();
        if !unknown.is_empty() && self.rest.is_none() {
            return false;
        }

        for (name, schema) in &self.required {
            let Some(field) = fields.get(name) else {
                return false;
            };
            let at = [Segment::Name("required"), Segment::Name(name)];
            if !descend(tracer, &at, &[Segment::Name(name)], schema, field) {
                return false;
            }
        }

        for (name, schema) in &self.optional {
            let Some(field) = fields.get(name) else {
                continue;
            };
            let at = [Segment::Name("optional"), Segment::Name(name)];
            if !descend(tracer, &at, &[Segment::Name(name)], schema, field) {
                return false;
            }
        }

        match &self.rest {
            Some(rest) if !unknown.is_empty() => {
                let leftovers: Map<String, Value> = unknown
                    .into_iter()
                    .map(|(name, field)| (name.clone(), field.clone()))
                    .collect();
                descend(
                    tracer,
                    &[Segment::Name("rest")],
                    &[],
                    rest,
                    &Value::Object(leftovers),
                )
            }
            _ => true,
        }
    }
}
