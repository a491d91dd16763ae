//! Word-level Markov text generation library.
//!
//! This crate provides:
//! - A weighted prefix tree storing word continuations up to a bounded depth
//! - A chain training that tree from lines of words and generating new lines
//! - A configurable tokenizer turning raw text into lines of words
//! - Corpus file helpers
//!
//! Randomness is always injected by the caller, so seeded generators give
//! reproducible output.

/// Chain, trie node and their configuration.
pub mod model;

/// Delimiter-table tokenizer.
pub mod tokenizer;

/// Error type of the crate.
pub mod error;

/// Corpus file helpers (reading, listing, naming).
pub mod io;

pub use error::{DelimiterKind, Result, WordGenError};
pub use model::chain::{Chain, END_OF_LINE};
pub use model::config::{ChainConfig, GenerationConfig};
pub use model::trie_node::TrieNode;
pub use tokenizer::Tokenizer;
