//! core
//!
//! Domain types, the document schema, and the rules that guard it.
//!
//! # Modules
//!
//! - [`types`] - Strong id types and entity kinds
//! - [`schema`] - The JSON document: subjects, sections, topics
//! - [`validate`] - Field and sibling-uniqueness rules
//! - [`paths`] - Data, lock and temp file locations
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod paths;
pub mod schema;
pub mod types;
pub mod validate;
