use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, WordGenError};
use crate::tokenizer::Tokenizer;

/// File extension of corpus files in a data folder.
pub const CORPUS_EXTENSION: &str = "txt";

/// Reads a corpus file and splits it into lines of words.
///
/// # Errors
/// Returns `WordGenError::Io` if the file cannot be opened or read.
pub fn read_corpus<P: AsRef<Path>>(filename: P, tokenizer: &Tokenizer) -> Result<Vec<Vec<String>>> {
	let path = filename.as_ref();
	let with_path = |source: io::Error| WordGenError::Io { path: path.to_path_buf(), source };

	let file = File::open(path).map_err(with_path)?;
	let lines = match tokenizer.tokenize_reader(file) {
		Ok(lines) => lines,
		Err(WordGenError::Read(source)) => return Err(with_path(source)),
		Err(e) => return Err(e),
	};

	debug!("Read {} lines from {}", lines.len(), path.display());
	Ok(lines)
}

/// Checks that `name` designates a corpus directly inside a data folder.
///
/// Names are file stems: no separator, no leading dot (hidden files and
/// `..`), no control characters.
///
/// # Errors
/// Returns `WordGenError::InvalidParameter` naming the offending rule.
pub fn validate_corpus_name(name: &str) -> Result<&str> {
	let reason = if name.is_empty() {
		Some("is empty")
	} else if name.starts_with('.') {
		Some("starts with a dot")
	} else if name.contains(['/', '\\']) {
		Some("contains a path separator")
	} else if name.chars().any(char::is_control) {
		Some("contains a control character")
	} else {
		None
	};

	match reason {
		None => Ok(name),
		Some(reason) => Err(WordGenError::InvalidParameter {
			parameter: "corpus name",
			value: name.to_owned(),
			reason: reason.to_owned(),
		}),
	}
}

/// Path of the corpus file called `name` inside `data_folder`.
///
/// # Errors
/// Same as [`validate_corpus_name`].
pub fn corpus_path<P: AsRef<Path>>(data_folder: P, name: &str) -> Result<PathBuf> {
	let name = validate_corpus_name(name)?;
	Ok(data_folder.as_ref().join(format!("{name}.{CORPUS_EXTENSION}")))
}

/// Corpus name of a file: its stem, if the file has the corpus extension.
///
/// `"./data/poems.txt"` → `Some("poems")`, `"notes.md"` → `None`.
pub fn corpus_name<P: AsRef<Path>>(path: P) -> Option<String> {
	let path = path.as_ref();
	if path.extension()? != CORPUS_EXTENSION {
		return None;
	}
	let stem = path.file_stem()?.to_str()?;
	validate_corpus_name(stem).ok().map(str::to_owned)
}

/// Names of the corpora available in `data_folder`, sorted.
///
/// Subdirectories and files that would not pass [`validate_corpus_name`]
/// are left out, so every listed name can be trained.
pub fn list_corpora<P: AsRef<Path>>(data_folder: P) -> io::Result<Vec<String>> {
	let mut names = Vec::new();
	for entry in fs::read_dir(data_folder)? {
		let path = entry?.path();
		if !path.is_file() {
			continue;
		}
		if let Some(name) = corpus_name(&path) {
			names.push(name);
		}
	}

	names.sort();
	Ok(names)
}
