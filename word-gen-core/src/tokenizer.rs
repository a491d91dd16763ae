use std::collections::HashMap;
use std::io::{BufReader, Read};

use crate::error::{DelimiterKind, Result, WordGenError};

/// Splits raw text into lines of words.
///
/// Every character belongs to one of four categories:
/// - line delimiter: closes the current word and the current line
/// - token delimiter: closes the current word
/// - ignored: dropped
/// - anything else: appended to the current word
///
/// Empty words and empty lines are never produced, so consecutive
/// delimiters collapse.
#[derive(Clone, Debug)]
pub struct Tokenizer {
	classes: HashMap<char, DelimiterKind>,
}

impl Default for Tokenizer {
	/// Newline separated lines, space or tab separated words, `\r` ignored.
	fn default() -> Self {
		let classes = HashMap::from([
			('\n', DelimiterKind::Line),
			(' ', DelimiterKind::Token),
			('\t', DelimiterKind::Token),
			('\r', DelimiterKind::Ignored),
		]);
		Self { classes }
	}
}

impl Tokenizer {
	/// Builds a tokenizer from its three delimiter sets.
	///
	/// # Errors
	/// Returns `WordGenError::DuplicateDelimiter` if a character appears
	/// more than once across (or within) the sets.
	pub fn new(line_delimiters: &[char], token_delimiters: &[char], ignored: &[char]) -> Result<Self> {
		let mut classes = HashMap::new();

		let sets = [
			(line_delimiters, DelimiterKind::Line),
			(token_delimiters, DelimiterKind::Token),
			(ignored, DelimiterKind::Ignored),
		];
		for (characters, kind) in sets {
			for &character in characters {
				if let Some(&first) = classes.get(&character) {
					return Err(WordGenError::DuplicateDelimiter { character, first, second: kind });
				}
				classes.insert(character, kind);
			}
		}

		Ok(Self { classes })
	}

	/// Returns the delimiter category of `c`, `None` for ordinary characters.
	pub fn classify(&self, c: char) -> Option<DelimiterKind> {
		self.classes.get(&c).copied()
	}

	/// Splits `text` into lines of words.
	pub fn tokenize(&self, text: &str) -> Vec<Vec<String>> {
		let mut lines = Vec::new();
		let mut line = Vec::new();
		let mut word = String::new();

		for c in text.chars() {
			match self.classify(c) {
				None => word.push(c),
				Some(DelimiterKind::Ignored) => (),
				Some(DelimiterKind::Token) => flush_word(&mut word, &mut line),
				Some(DelimiterKind::Line) => {
					flush_word(&mut word, &mut line);
					flush_line(&mut line, &mut lines);
				}
			}
		}

		// Input may end without a trailing line delimiter
		flush_word(&mut word, &mut line);
		flush_line(&mut line, &mut lines);

		lines
	}

	/// Reads the whole of `reader` and splits it into lines of words.
	///
	/// Invalid UTF-8 sequences are replaced with U+FFFD, so one bad byte does
	/// not discard a whole corpus.
	///
	/// # Errors
	/// Returns `WordGenError::Read` if reading fails.
	pub fn tokenize_reader<R: Read>(&self, reader: R) -> Result<Vec<Vec<String>>> {
		let mut bytes = Vec::new();
		BufReader::new(reader).read_to_end(&mut bytes)?;
		Ok(self.tokenize(&String::from_utf8_lossy(&bytes)))
	}
}

fn flush_word(word: &mut String, line: &mut Vec<String>) {
	if !word.is_empty() {
		line.push(std::mem::take(word));
	}
}

fn flush_line(line: &mut Vec<String>, lines: &mut Vec<Vec<String>>) {
	if !line.is_empty() {
		lines.push(std::mem::take(line));
	}
}
