//! `//all` and `//any`: intersection and union of alternatives.

use serde_json::Value;

use rx_core::RxResult;

use super::Params;
use crate::factory::Rx;
use crate::schema::Schema;
use crate::trace::{descend, Segment, Tracer};

/// `//all`: the value must satisfy every alternative in `of`.
#[derive(Debug, Clone)]
pub struct AllType {
    alts: Vec<Schema>,
}

impl AllType {
    pub(crate) fn build(params: &Params<'_>, rx: &Rx) -> RxResult<Self> {
        Ok(Self {
            alts: params.schema_list("of", rx, "no alternatives given")?,
        })
    }

    /// The compiled alternatives.
    pub fn alternatives(&self) -> &[Schema] {
        &self.alts
    }

    pub(crate) fn evaluate<T: Tracer>(&self, value: &Value, tracer: &mut T) -> bool {
        self.alts.iter().enumerate().all(|(i, alt)| {
            descend(
                tracer,
                &[Segment::Name("of"), Segment::Index(i)],
                &[],
                alt,
                value,
            )
        })
    }
}

/// `//any`: without `of`, accepts everything; otherwise at least one
/// alternative must match.
#[derive(Debug, Clone)]
pub struct AnyType {
    alts: Option<Vec<Schema>>,
}

impl AnyType {
    pub(crate) fn build(params: &Params<'_>, rx: &Rx) -> RxResult<Self> {
        Ok(Self {
            alts: params.alternatives("of", rx)?,
        })
    }

    /// The compiled alternatives, or `None` if any value is accepted.
    pub fn alternatives(&self) -> Option<&[Schema]> {
        self.alts.as_deref()
    }

    pub(crate) fn evaluate<T: Tracer>(&self, value: &Value, tracer: &mut T) -> bool {
        let Some(alts) = &self.alts else {
            return true;
        };
        alts.iter().enumerate().any(|(i, alt)| {
            descend(
                tracer,
                &[Segment::Name("of"), Segment::Index(i)],
                &[],
                alt,
                value,
            )
        })
    }
}
