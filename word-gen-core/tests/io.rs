//! Corpus file helpers

use std::fs;

use tempfile::TempDir;
use word_gen_core::io::{corpus_name, corpus_path, list_corpora, read_corpus, validate_corpus_name};
use word_gen_core::{Chain, Tokenizer, WordGenError};

#[test]
fn test_list_corpora_keeps_trainable_text_files_sorted() {
	let dir = TempDir::new().expect("temp dir");
	fs::write(dir.path().join("zebra.txt"), "z").expect("write");
	fs::write(dir.path().join("apple.txt"), "a").expect("write");
	fs::write(dir.path().join("notes.md"), "n").expect("write");
	fs::write(dir.path().join(".hidden.txt"), "h").expect("write");
	fs::create_dir(dir.path().join("nested.txt")).expect("mkdir");

	let names = list_corpora(dir.path()).expect("listing");
	assert_eq!(names, vec!["apple", "zebra"]);
}

#[test]
fn test_read_corpus_trains_a_chain() {
	let dir = TempDir::new().expect("temp dir");
	let path = dir.path().join("poems.txt");
	fs::write(&path, "roses are red\nviolets are blue\n").expect("write");

	let lines = read_corpus(&path, &Tokenizer::default()).expect("readable corpus");
	assert_eq!(lines.len(), 2);

	let mut chain = Chain::default();
	chain.train(&lines);
	assert_eq!(chain.sentence_start_tree_root().child_count(), 2);
}

#[test]
fn test_read_corpus_missing_file_reports_the_path() {
	let dir = TempDir::new().expect("temp dir");
	let path = dir.path().join("missing.txt");

	match read_corpus(&path, &Tokenizer::default()) {
		Err(WordGenError::Io { path: reported, .. }) => assert_eq!(reported, path),
		other => panic!("expected an I/O error, got {other:?}"),
	}
}

#[test]
fn test_corpus_name() {
	assert_eq!(corpus_name("./data/poems.txt").as_deref(), Some("poems"));
	assert_eq!(corpus_name("poems.txt").as_deref(), Some("poems"));
	assert_eq!(corpus_name("notes.md"), None);
	assert_eq!(corpus_name("/"), None);
}

#[test]
fn test_corpus_path_stays_in_the_data_folder() {
	let folder = std::path::Path::new("data");
	assert_eq!(corpus_path(folder, "poems").expect("plain name"), folder.join("poems.txt"));

	for name in ["", "..", "../../home/user/notes", "/etc/passwd", "a/b", "a\\b", ".hidden", "tab\there"] {
		match corpus_path(folder, name) {
			Err(WordGenError::InvalidParameter { parameter, value, .. }) => {
				assert_eq!(parameter, "corpus name");
				assert_eq!(value, name);
			}
			other => panic!("{name:?} should be rejected, got {other:?}"),
		}
	}
}

#[test]
fn test_dots_inside_a_name_are_allowed() {
	assert_eq!(validate_corpus_name("v1.2").expect("inner dot"), "v1.2");
}
