//! # rx-core: Foundational Types for the Rx Schema System
//!
//! The leaf of the workspace DAG. Everything here is independent of the
//! validator tree itself and is shared by the compiler in `rx-schema`.
//!
//! ## Contents
//!
//! 1. **`RxError`**: the single compile-time error type. Checking a value
//!    never produces an error; only building a schema does.
//!
//! 2. **`PrefixRegistry`**: short namespace aliases and the expansion of
//!    type names like `//str` or `/app/name` into canonical type URIs.
//!
//! 3. **`RangeCheck`**: the `min` / `max` / `min-ex` / `max-ex` bound
//!    predicate used by `//arr`, `//str`, `//int`, and `//num`.
//!
//! 4. **`number`**: exact comparison and integrality tests over
//!    `serde_json::Number`, so integer bounds never lose precision to `f64`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rx-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod number;
pub mod range;
pub mod uri;
pub mod value;

pub use error::{RxError, RxResult};
pub use range::RangeCheck;
pub use uri::{PrefixRegistry, CORE_BASE, META_BASE};
pub use value::json_type_name;
