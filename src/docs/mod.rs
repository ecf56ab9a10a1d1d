//! Documentation symbol index
//!
//! This module reads the search-data fragments a documentation generator
//! writes next to its HTML output, validates them into a record store, and
//! builds an immutable index that answers case-insensitive substring queries.
//!
//! # Usage
//!
//! ```rust
//! use symdex::docs::{Index, parse_search_data};
//!
//! let data = "var searchData=[['uartgetc',['UARTgetc',\
//!     ['../group__uartstdio__api.html#ga0577',1,'UARTgetc(void):&#160;uartstdio.c']]]];";
//!
//! let index = Index::from_entries(parse_search_data(data)?)?;
//!
//! for record in index.query("uartg") {
//!     for anchor in record.distinct_anchors() {
//!         println!("{} -> {}", record.name, anchor.url);
//!     }
//! }
//! # Ok::<(), symdex::docs::SearchDataError>(())
//! ```

mod embedded;
mod error;
mod index;
mod query;
mod searchdata;
mod snapshot;
mod store;
mod types;

pub use embedded::{SAMPLE_SEARCH_DATA, get_sample_index};
pub use error::{Result, SearchDataError};
pub use index::Index;
pub use query::{Match, MatchKind, query};
pub use searchdata::{parse_json_records, parse_search_data};
pub use snapshot::Snapshot;
pub use store::{Store, StoredRecord};
pub use types::{Anchor, RawAnchor, RawEntry, SymbolRecord, decode_char_refs, group_key};
