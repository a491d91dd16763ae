//! Top-level module of the word chain.
//!
//! This module provides:
//! - The weighted prefix tree node (`TrieNode`)
//! - The chain that trains and samples two such trees (`Chain`)
//! - Construction and generation parameters (`ChainConfig`, `GenerationConfig`)

/// Word-level Markov chain.
///
/// Cuts trained lines into bounded windows, stores them in the context
/// tree and generates new lines by weighted random walk.
pub mod chain;

/// Chain construction parameters and per-call generation parameters.
pub mod config;

/// Node of the weighted prefix tree.
///
/// Tracks outgoing edges with their accumulated weights and supports
/// weighted random sampling.
pub mod trie_node;
