//! Error type shared by the tokenizer, the configuration and corpus I/O.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Category a character can be assigned to in a [`Tokenizer`](crate::tokenizer::Tokenizer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelimiterKind {
	/// Closes the current word and the current line.
	Line,
	/// Closes the current word.
	Token,
	/// Dropped from the input.
	Ignored,
}

impl fmt::Display for DelimiterKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Line => write!(f, "line delimiter"),
			Self::Token => write!(f, "token delimiter"),
			Self::Ignored => write!(f, "ignored character"),
		}
	}
}

/// Main error type of the crate.
#[derive(Debug)]
pub enum WordGenError {
	/// One character was given two roles in a delimiter table
	DuplicateDelimiter {
		/// The offending character
		character: char,
		/// Role it was assigned first
		first: DelimiterKind,
		/// Role it was assigned again
		second: DelimiterKind,
	},

	/// A configuration value failed validation
	InvalidParameter {
		/// Name of the parameter
		parameter: &'static str,
		/// Provided value
		value: String,
		/// Why the value was rejected
		reason: String,
	},

	/// Reading a corpus file failed
	Io {
		/// File involved
		path: PathBuf,
		/// Underlying I/O error
		source: io::Error,
	},

	/// Reading from a stream failed
	Read(io::Error),
}

impl fmt::Display for WordGenError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DuplicateDelimiter { character, first, second } => write!(
				f,
				"Character {character:?} assigned twice: {first}, then {second}"
			),
			Self::InvalidParameter { parameter, value, reason } => {
				write!(f, "Invalid {parameter} = {value}: {reason}")
			}
			Self::Io { path, source } => {
				write!(f, "Failed to read {}: {source}", path.display())
			}
			Self::Read(source) => write!(f, "Failed to read input: {source}"),
		}
	}
}

impl std::error::Error for WordGenError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io { source, .. } | Self::Read(source) => Some(source),
			_ => None,
		}
	}
}

impl From<io::Error> for WordGenError {
	fn from(source: io::Error) -> Self {
		Self::Read(source)
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, WordGenError>;
