//! widecopy-core
//!
//! Finds functions that pass wide structs by value instead of by pointer.
//!
//! This crate defines the resolved type graph (model), the struct size model
//! and copy-site scanner (analysis), diagnostic rendering (report), run
//! configuration, and the provider/checker services that tie them together.
//!
//! Parsing and name binding are left to a `GraphProvider`; everything here
//! works on the already-resolved graph so it is fully testable and reusable
//! from multiple frontends.

pub mod analysis;
pub mod config;
pub mod model;
pub mod report;
pub mod services;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
