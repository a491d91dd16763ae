use serde::{Deserialize, Serialize};

use crate::error::{Result, WordGenError};

/// Default number of words in one training window.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Default cap on the length of a generated line.
pub const DEFAULT_MAX_WORDS: usize = 64;

/// Construction-time parameters of a [`Chain`](super::chain::Chain).
///
/// Both values are fixed once the chain exists.
///
/// # Fields
/// - `max_depth`: number of words in one training window, the last word
///   being the continuation of the ones before it. Values below 1 are
///   clamped to 1 by the chain.
/// - `ignore_case`: fold words to lowercase for storage and lookup.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ChainConfig {
	pub max_depth: usize,
	pub ignore_case: bool,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self { max_depth: DEFAULT_MAX_DEPTH, ignore_case: false }
	}
}

impl ChainConfig {
	pub fn new(max_depth: usize, ignore_case: bool) -> Self {
		Self { max_depth, ignore_case }
	}
}

/// Per-call generation parameters.
///
/// # Invariants
/// - `max_words` is always >= 1
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "RawGenerationConfig")]
pub struct GenerationConfig {
	/// Hard limit on the number of words of one generated line.
	max_words: usize,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self { max_words: DEFAULT_MAX_WORDS }
	}
}

impl GenerationConfig {
	/// Creates a configuration capping output at `max_words` words.
	///
	/// # Errors
	/// Returns an error if `max_words` is 0.
	pub fn new(max_words: usize) -> Result<Self> {
		let mut config = Self::default();
		config.set_max_words(max_words)?;
		Ok(config)
	}

	/// Returns the current output length cap.
	pub fn max_words(&self) -> usize {
		self.max_words
	}

	/// Sets the output length cap.
	///
	/// # Errors
	/// Returns an error if `max_words` is 0.
	pub fn set_max_words(&mut self, max_words: usize) -> Result<()> {
		if max_words == 0 {
			return Err(WordGenError::InvalidParameter {
				parameter: "max_words",
				value: max_words.to_string(),
				reason: "must be at least 1".to_owned(),
			});
		}
		self.max_words = max_words;
		Ok(())
	}
}

/// Unvalidated shape used when deserializing a `GenerationConfig`.
#[derive(Deserialize)]
struct RawGenerationConfig {
	#[serde(default = "default_max_words")]
	max_words: usize,
}

fn default_max_words() -> usize {
	DEFAULT_MAX_WORDS
}

impl TryFrom<RawGenerationConfig> for GenerationConfig {
	type Error = WordGenError;

	fn try_from(raw: RawGenerationConfig) -> Result<Self> {
		Self::new(raw.max_words)
	}
}
