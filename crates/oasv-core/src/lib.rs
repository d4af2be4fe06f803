//! # oasv-core: Foundational Types for Schema Validation
//!
//! Defines the values that flow between the validation policy
//! (`oasv-policy`) and the schema traversal that consumes it. The traversal
//! itself lives outside this workspace; these types are the contract.
//!
//! ## Contents
//!
//! - [`Schema`]: an opaque, JSON-backed schema object. This crate never
//!   parses schema documents; it only carries already-built schema values.
//! - [`SchemaRef`]: a schema-or-reference pointer holding an embedded
//!   schema, a reference string (`#/components/schemas/Pet`), or both.
//! - [`SchemaError`]: a single violation with its instance path and a
//!   default human-readable rendering.
//! - [`SchemaErrors`]: the composite produced in collect-all mode.
//! - [`OasvError`]: the workspace-level error type.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `oasv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod schema;

pub use error::{OasvError, SchemaError, SchemaErrors};
pub use schema::{Schema, SchemaRef};
