//! `//arr`, `//map`, and `//seq`: container kinds.

use serde_json::Value;

use rx_core::{RangeCheck, RxResult};

use super::Params;
use crate::factory::Rx;
use crate::schema::Schema;
use crate::trace::{descend, Segment, Tracer};

/// `//arr`: a sequence whose every element matches `contents`, with an
/// optional `length` range on the element count.
#[derive(Debug, Clone)]
pub struct ArrType {
    contents: Box<Schema>,
    length: Option<RangeCheck>,
}

impl ArrType {
    pub(crate) fn build(params: &Params<'_>, rx: &Rx) -> RxResult<Self> {
        let contents = rx.make_schema(params.require("contents")?)?;
        Ok(Self {
            contents: Box::new(contents),
            length: params.range("length")?,
        })
    }

    /// Schema every element must match.
    pub fn contents(&self) -> &Schema {
        &self.contents
    }

    /// Bound on the element count, if any.
    pub fn length(&self) -> Option<&RangeCheck> {
        self.length.as_ref()
    }

    pub(crate) fn evaluate<T: Tracer>(&self, value: &Value, tracer: &mut T) -> bool {
        let Value::Array(items) = value else {
            return false;
        };
        if let Some(length) = &self.length {
            if !length.check_len(items.len()) {
                return false;
            }
        }
        items.iter().enumerate().all(|(i, item)| {
            descend(
                tracer,
                &[Segment::Name("contents")],
                &[Segment::Index(i)],
                &self.contents,
                item,
            )
        })
    }
}

/// `//map`: a mapping with arbitrary keys whose every value matches
/// `values`.
#[derive(Debug, Clone)]
pub struct MapType {
    values: Box<Schema>,
}

impl MapType {
    pub(crate) fn build(params: &Params<'_>, rx: &Rx) -> RxResult<Self> {
        let values = rx.make_schema(params.require("values")?)?;
        Ok(Self {
            values: Box::new(values),
        })
    }

    /// Schema every stored value must match.
    pub fn values(&self) -> &Schema {
        &self.values
    }

    pub(crate) fn evaluate<T: Tracer>(&self, value: &Value, tracer: &mut T) -> bool {
        let Value::Object(entries) = value else {
            return false;
        };
        entries.iter().all(|(key, entry)| {
            descend(
                tracer,
                &[Segment::Name("values")],
                &[Segment::Name(key)],
                &self.values,
                entry,
            )
        })
    }
}

/// `//seq`: a sequence matched positionally against `contents`, with any
/// further elements matched, as one sequence, against `tail`.
#[derive(Debug, Clone)]
pub struct SeqType {
    contents: Vec<Schema>,
    tail: Option<Box<Schema>>,
}

impl SeqType {
    pub(crate) fn build(params: &Params<'_>, rx: &Rx) -> RxResult<Self> {
        Ok(Self {
            contents: params.schema_list("contents", rx, "no contents provided")?,
            tail: params.schema("tail", rx)?.map(Box::new),
        })
    }

    /// Positional schemas.
    pub fn contents(&self) -> &[Schema] {
        &self.contents
    }

    /// Schema for the elements after the positional ones, if allowed.
    pub fn tail(&self) -> Option<&Schema> {
        self.tail.as_deref()
    }

    pub(crate) fn evaluate<T: Tracer>(&self, value: &Value, tracer: &mut T) -> bool {
        let Value::Array(items) = value else {
            return false;
        };
        let fixed = self.contents.len();
        if items.len() < fixed {
            return false;
        }

        let head_ok = self
            .contents
            .iter()
            .zip(items)
            .enumerate()
            .all(|(i, (schema, item))| {
                descend(
                    tracer,
                    &[Segment::Name("contents"), Segment::Index(i)],
                    &[Segment::Index(i)],
                    schema,
                    item,
                )
            });
        if !head_ok {
            return false;
        }

        if items.len() == fixed {
            return true;
        }
        match &self.tail {
            Some(tail) => {
                let rest = Value::Array(items[fixed..].to_vec());
                descend(tracer, &[Segment::Name("tail")], &[], tail, &rest)
            }
            None => false,
        }
    }
}
