//! coursetree - A JSON-backed catalogue of subjects, sections and topics
//!
//! The whole catalogue lives in one human-readable JSON document. Every
//! change is a load-modify-store cycle that replaces the file atomically,
//! so readers never observe a half-written document.
//!
//! # Architecture
//!
//! - [`core`] - Data model, ids, validation rules, paths and configuration
//! - [`store`] - Locked, atomic persistence of the JSON document
//! - [`repo`] - Catalogue operations with a read cache
//! - [`auth`] - Admin credential checks for mutating commands
//! - [`cli`] - Command-line interface
//! - [`ui`] - Output formatting and prompts
//!
//! # Correctness Invariants
//!
//! 1. The data file is only ever replaced by rename, never rewritten in place
//! 2. A failed validation or conflict leaves the file byte-for-byte unchanged
//! 3. Sibling names are unique case-insensitively
//! 4. Parents with children cannot be deleted

pub mod auth;
pub mod cli;
pub mod core;
pub mod repo;
pub mod store;
pub mod ui;
