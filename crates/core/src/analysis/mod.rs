//! Size model, wide-type classification, and copy-site scanning.
//!
//! The pipeline over one resolved graph is:
//! - `resolve`: bind names to indices and reject broken graphs
//! - `layout`: compute each composite's size and alignment
//! - `classify`: collect the types wider than the configured maximum
//! - `scan`: find signatures that copy those types by value

pub mod classify;
pub mod layout;
pub mod resolve;
pub mod scan;

pub use classify::{classify, is_wide, WideSet};
pub use layout::{struct_layout, Footprint, Layout, SizeModel};
pub use resolve::{ResolutionError, ResolvedGraph, Slot, TypeIndex};
pub use scan::{scan, CopySite};
