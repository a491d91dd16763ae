use std::io::Read;

use log::{debug, trace, warn};
use rand::Rng;

use super::config::{ChainConfig, GenerationConfig};
use super::trie_node::TrieNode;
use crate::error::{Result, WordGenError};
use crate::tokenizer::Tokenizer;

/// Key appended after the last word of every trained line.
///
/// Sampling it ends generation. Empty words are never trained, so no real
/// word can collide with it.
pub const END_OF_LINE: &str = "";

/// Word-level Markov chain backed by two weighted prefix trees.
///
/// The chain stores, for every training window of up to `max_depth` words,
/// how often the last word of the window followed the words before it.
/// Generation walks these statistics one word at a time.
///
/// # Responsibilities
/// - Cut trained lines into bounded windows and insert them as trie paths
/// - Track which words open a line
/// - Generate new lines by weighted random walk
///
/// # Invariants
/// - `max_depth` is always >= 1
/// - No path below `word_tree_root` is longer than `max_depth` edges
/// - `sentence_start_tree_root` is never deeper than one edge
#[derive(Clone, Debug)]
pub struct Chain {
	/// Number of words in one training window (context + continuation)
	max_depth: usize,

	/// Fold words to lowercase for storage and lookup
	ignore_case: bool,

	/// Root of the context tree
	word_tree_root: TrieNode,

	/// Single level node holding the opening word of every trained line
	sentence_start_tree_root: TrieNode,

	/// Number of non-empty lines trained so far
	lines_trained: u64,
}

impl Default for Chain {
	fn default() -> Self {
		Self::new(ChainConfig::default())
	}
}

impl Chain {
	/// Creates an empty, untrained chain.
	///
	/// A `max_depth` of 0 is silently raised to 1.
	pub fn new(config: ChainConfig) -> Self {
		let max_depth = if config.max_depth < 1 {
			debug!("Requested depth {} clamped to 1", config.max_depth);
			1
		} else {
			config.max_depth
		};

		Self {
			max_depth,
			ignore_case: config.ignore_case,
			word_tree_root: TrieNode::new(),
			sentence_start_tree_root: TrieNode::new(),
			lines_trained: 0,
		}
	}

	/// Shorthand for `Chain::new(ChainConfig::new(max_depth, ignore_case))`.
	pub fn with_depth(max_depth: usize, ignore_case: bool) -> Self {
		Self::new(ChainConfig::new(max_depth, ignore_case))
	}

	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	pub fn ignore_case(&self) -> bool {
		self.ignore_case
	}

	/// Root of the context tree.
	pub fn word_tree_root(&self) -> &TrieNode {
		&self.word_tree_root
	}

	/// Root whose children are the observed opening words.
	pub fn sentence_start_tree_root(&self) -> &TrieNode {
		&self.sentence_start_tree_root
	}

	pub fn lines_trained(&self) -> u64 {
		self.lines_trained
	}

	/// Returns `true` once at least one non-empty line was trained.
	pub fn is_trained(&self) -> bool {
		!self.sentence_start_tree_root.is_empty()
	}

	/// Trains every line in order. Lines never share context.
	pub fn train<S: AsRef<str>>(&mut self, lines: &[Vec<S>]) {
		for line in lines {
			self.train_line(line);
		}
		debug!("Trained {} lines ({} in total)", lines.len(), self.lines_trained);
	}

	/// Trains one line of words with weight 1.
	///
	/// A line that would overflow the accumulated weights is skipped.
	pub fn train_line<S: AsRef<str>>(&mut self, line: &[S]) {
		if let Err(e) = self.train_line_weighted(line, 1) {
			warn!("Line skipped: {e}");
		}
	}

	/// Trains one line of words, every observation counting `weight` times.
	///
	/// # Behavior
	/// - Empty words are dropped; an empty line (or a weight of 0) is a no-op.
	/// - The first word is recorded as an opening word and as a root child
	///   of the context tree.
	/// - Position `i < max_depth`: the whole prefix `line[0..=i]` is inserted.
	/// - Position `i >= max_depth`: the window `line[i - max_depth + 1..=i]`
	///   is inserted.
	/// - `END_OF_LINE` is windowed like a last extra word, so the tree
	///   learns where lines stop.
	///
	/// # Errors
	/// Returns `WordGenError::InvalidParameter` if `weight` would overflow the
	/// accumulated weights. Nothing is trained in that case.
	pub fn train_line_weighted<S: AsRef<str>>(&mut self, line: &[S], weight: u64) -> Result<()> {
		if weight == 0 {
			return Ok(());
		}

		let mut words: Vec<&str> = line
			.iter()
			.map(AsRef::as_ref)
			.filter(|word| !word.is_empty())
			.collect();
		if words.is_empty() {
			return Ok(());
		}
		words.push(END_OF_LINE);

		// Every window starts at the word root, so no node gains more than it does
		let added = u64::try_from(words.len()).ok().and_then(|windows| weight.checked_mul(windows));
		if added.and_then(|added| self.word_tree_root.weight_sum().checked_add(added)).is_none() {
			return Err(WordGenError::InvalidParameter {
				parameter: "weight",
				value: weight.to_string(),
				reason: format!("overflows the accumulated weights of a {} word line", words.len() - 1),
			});
		}

		let weights = vec![weight; words.len()];
		for i in 0..words.len() {
			if i == 0 {
				self.sentence_start_tree_root.add_weighted_child(words[0], weight, self.ignore_case);
				self.word_tree_root.add_weighted_child(words[0], weight, self.ignore_case);
			} else {
				let start = (i + 1).saturating_sub(self.max_depth);
				self.word_tree_root.add_weighted_children(
					&words[start..=i],
					&weights[start..=i],
					0,
					self.ignore_case,
				);
			}
		}

		self.lines_trained += 1;
		Ok(())
	}

	/// Tokenizes `text` and trains every resulting line.
	///
	/// Returns the number of lines trained.
	pub fn train_text(&mut self, text: &str, tokenizer: &Tokenizer) -> usize {
		let lines = tokenizer.tokenize(text);
		self.train(&lines);
		lines.len()
	}

	/// Reads `reader` to the end, tokenizes it and trains every line.
	///
	/// Returns the number of lines trained.
	///
	/// # Errors
	/// Returns an error if reading fails; the chain is left untouched then.
	pub fn train_reader<R: Read>(&mut self, reader: R, tokenizer: &Tokenizer) -> Result<usize> {
		let lines = tokenizer.tokenize_reader(reader)?;
		self.train(&lines);
		Ok(lines.len())
	}

	/// Generates one line of words.
	///
	/// # Behavior
	/// - Draws the opening word from the sentence-start tree; an untrained
	///   chain yields an empty line.
	/// - Then repeatedly looks up the last `max_depth - 1` words (fewer at
	///   the beginning) in the context tree and draws the next word.
	/// - Stops on an unknown context, on `END_OF_LINE`, or once
	///   `config.max_words()` words were produced.
	pub fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Vec<String> {
		let mut words = Vec::new();

		let Some(opening) = self.sentence_start_tree_root.next_word(rng) else {
			trace!("Nothing trained, empty output");
			return words;
		};
		words.push(opening.to_owned());

		let context_len = self.max_depth - 1;
		while words.len() < config.max_words() {
			let start = words.len().saturating_sub(context_len);
			let Some(node) = self.word_tree_root.seek(&words, start, self.ignore_case) else {
				trace!("Unknown context {:?}", &words[start..]);
				return words;
			};

			match node.next_word(rng) {
				None | Some(END_OF_LINE) => return words,
				Some(word) => words.push(word.to_owned()),
			}
		}

		trace!("Output capped at {} words", config.max_words());
		words
	}

	/// Same as [`Chain::generate`].
	pub fn next_sentence<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Vec<String> {
		self.generate(config, rng)
	}

	/// Generates one line and joins its words with single spaces.
	pub fn generate_line<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> String {
		self.generate(config, rng).join(" ")
	}

	/// Generates one line with the default configuration and the thread RNG.
	pub fn generate_default(&self) -> Vec<String> {
		self.generate(&GenerationConfig::default(), &mut rand::rng())
	}
}
