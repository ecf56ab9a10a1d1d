//! symdex - documentation symbol search
//!
//! Loads the search index a documentation generator emits next to its HTML
//! pages and answers symbol lookups from the terminal.

pub mod docs;

// Re-export commonly used types
pub use docs::{Anchor, Index, SearchDataError, Snapshot, SymbolRecord, get_sample_index};
