//! # rx-cli: Rx Command-Line Interface
//!
//! Thin clap front end over `rx-schema`. Each subcommand module holds its
//! argument struct and a handler that writes to any `io::Write`, so the
//! handlers are testable without spawning the binary.
//!
//! ## Subcommands
//!
//! - `check`: check documents against a schema
//! - `compile`: compile schema files and report errors
//! - `types`: list registered prefixes and types
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers only see parsed args.
//! - Validation semantics belong to `rx-schema`; nothing here interprets
//!   schema definitions.
//! - Handlers return `Ok(false)` for a rejected document or schema and
//!   `Err` only for operational failures, which map to distinct exit codes.

pub mod check;
pub mod compile;
pub mod load;
pub mod types;
