//! # rx-schema: Schema Compilation & Validation
//!
//! Compiles Rx schema definitions (JSON-like values) into immutable
//! validator trees and checks arbitrary values against them.
//!
//! ```
//! use rx_schema::Rx;
//! use serde_json::json;
//!
//! let rx = Rx::with_core_types();
//! let schema = rx
//!     .make_schema(&json!({
//!         "type": "//rec",
//!         "required": { "name": "//str" },
//!         "optional": { "age": { "type": "//int", "range": { "min": 0 } } }
//!     }))
//!     .unwrap();
//!
//! assert!(schema.check(&json!({ "name": "Ada", "age": 36 })));
//! assert!(!schema.check(&json!({ "name": "Ada", "age": -1 })));
//! ```
//!
//! ## Compilation (`factory`)
//!
//! [`Rx`] owns a [`PrefixRegistry`] and a [`TypeRegistry`]. Its
//! [`Rx::make_schema`] resolves the definition's type name to a URI, looks
//! the URI up, and either expands a learned alias or hands the definition
//! to a builtin constructor, which compiles its own children recursively.
//!
//! ## Checking (`schema`, `kinds`)
//!
//! A [`Schema`] is one of the fourteen core kinds (or a registered custom
//! kind). [`Schema::check`] is total: every mismatch is `false`, never an
//! error. [`Schema::check_with_trace`] runs the same walk and also returns
//! the verdict of every node it evaluated.
//!
//! ## Crate Policy
//!
//! - Depends only on `rx-core` internally.
//! - Compiled trees are never mutated and are `Send + Sync`.
//! - Registries change only through `&mut Rx`, so setup cannot race
//!   with compilation.

pub mod config;
pub mod factory;
pub mod kinds;
pub mod registry;
pub mod schema;
pub mod trace;

pub use config::{LearnedType, PrefixEntry, RxConfig};
pub use factory::{Rx, RxOptions};
pub use kinds::{AllType, AnyType, ArrType, CoreType, IntType, MapType, NumType, RecType, SeqType, StrType};
pub use registry::{TypeConstructor, TypeEntry, TypeRegistry};
pub use schema::{Check, Schema};
pub use trace::{Trace, TraceEntry};

pub use rx_core::{PrefixRegistry, RangeCheck, RxError, RxResult};
