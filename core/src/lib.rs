//! Shared building blocks of the search pipeline: the crawled [`Document`],
//! the tokenizer, the inverted [`Index`] with its builder, and the flat
//! snapshot files that connect the crawler, indexer and query service.

pub mod index;
pub mod persist;
pub mod tokenizer;

pub use index::{Document, Index, IndexBuilder};
