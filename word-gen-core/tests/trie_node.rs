//! Weighted prefix tree node: insertion, lookup and sampling

use rand::SeedableRng;
use rand::rngs::StdRng;
use word_gen_core::TrieNode;

#[test]
fn test_add_weighted_child_accumulates() {
	let mut node = TrieNode::new();
	node.add_weighted_child("a", 2, false);
	node.add_weighted_child("b", 1, false);
	node.add_weighted_child("a", 3, false);

	assert_eq!(node.weight_sum(), 6);
	assert_eq!(node.child_weight("a"), 5);
	assert_eq!(node.child_weight("b"), 1);
	assert_eq!(node.child_weight("c"), 0);
	assert_eq!(node.child_count(), 2);
}

#[test]
fn test_add_child_is_weight_one() {
	let mut node = TrieNode::new();
	node.add_child("word", false);
	node.add_child("word", false);

	assert_eq!(node.weight_sum(), 2);
	assert_eq!(node.child_weight("word"), 2);
}

#[test]
fn test_add_children_inserts_a_path_from_index() {
	let mut root = TrieNode::new();
	root.add_children(&["x", "y", "z"], 1, false);

	// "x" is skipped, "y" hangs off the root
	assert!(root.child("x").is_none());
	assert_eq!(root.child_weight("y"), 1);
	let y = root.child("y").expect("y inserted");
	assert_eq!(y.child_weight("z"), 1);
	assert_eq!(root.depth(), 2);
}

#[test]
fn test_add_children_past_the_end_is_a_no_op() {
	let mut root = TrieNode::new();
	root.add_children(&["x"], 1, false);
	root.add_children::<&str>(&[], 0, false);

	assert!(root.is_empty());
	assert_eq!(root.weight_sum(), 0);
}

#[test]
fn test_seek_follows_the_path() {
	let mut root = TrieNode::new();
	root.add_children(&["the", "cat", "sat"], 0, false);

	let cat = root.seek(&["the", "cat"], 0, false).expect("path exists");
	assert_eq!(cat.surface(), "cat");
	assert_eq!(cat.child_weight("sat"), 1);

	let sat = root.seek(&["ignored", "the", "cat", "sat"], 1, false).expect("path exists");
	assert!(sat.is_empty());
}

#[test]
fn test_seek_empty_continuation_returns_self() {
	let mut root = TrieNode::new();
	root.add_child("a", false);

	let found = root.seek::<&str>(&[], 0, false).expect("nothing to follow");
	assert!(std::ptr::eq(found, &root));

	let found = root.seek(&["a"], 5, false).expect("index past the end");
	assert!(std::ptr::eq(found, &root));
}

#[test]
fn test_seek_miss_returns_none() {
	let mut root = TrieNode::new();
	root.add_children(&["a", "b"], 0, false);

	assert!(root.seek(&["b"], 0, false).is_none());
	assert!(root.seek(&["a", "c"], 0, false).is_none());
	assert!(root.seek(&["a", "b", "c"], 0, false).is_none());
}

#[test]
fn test_case_folding_merges_keys_and_keeps_first_surface() {
	let mut root = TrieNode::new();
	root.add_child("Hello", true);
	root.add_child("HELLO", true);
	root.add_child("hello", true);

	assert_eq!(root.child_count(), 1);
	assert_eq!(root.child_weight("hello"), 3);
	assert_eq!(root.child("hello").map(TrieNode::surface), Some("Hello"));

	// Lookup folds too
	assert!(root.seek(&["hElLo"], 0, true).is_some());
	assert!(root.seek(&["hElLo"], 0, false).is_none());
}

#[test]
fn test_case_sensitive_keys_stay_apart() {
	let mut root = TrieNode::new();
	root.add_child("Hello", false);
	root.add_child("hello", false);

	assert_eq!(root.child_count(), 2);
	assert_eq!(root.weight_sum(), 2);
}

#[test]
fn test_next_word_on_empty_node_is_none() {
	let node = TrieNode::new();
	let mut rng = StdRng::seed_from_u64(0);

	assert_eq!(node.weight_sum(), 0);
	assert_eq!(node.next_word(&mut rng), None);
}

#[test]
fn test_next_word_single_child_always_wins() {
	let mut node = TrieNode::new();
	node.add_weighted_child("only", 9, false);
	let mut rng = StdRng::seed_from_u64(42);

	for _ in 0..100 {
		assert_eq!(node.next_word(&mut rng), Some("only"));
	}
}

#[test]
fn test_next_word_follows_weights() {
	let mut node = TrieNode::new();
	node.add_weighted_child("rare", 1, false);
	node.add_weighted_child("common", 3, false);
	let mut rng = StdRng::seed_from_u64(1234);

	let draws = 4000;
	let common = (0..draws)
		.filter(|_| node.next_word(&mut rng) == Some("common"))
		.count();

	// Expected 3000, standard deviation about 27
	assert!(
		(2800..=3200).contains(&common),
		"Expected about 3000 draws of 'common', got {common}"
	);
}

#[test]
fn test_next_word_is_reproducible_with_a_seed() {
	let mut node = TrieNode::new();
	for (word, weight) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
		node.add_weighted_child(word, weight, false);
	}

	let mut first = StdRng::seed_from_u64(99);
	let mut second = StdRng::seed_from_u64(99);
	let a: Vec<_> = (0..50).map(|_| node.next_word(&mut first)).collect();
	let b: Vec<_> = (0..50).map(|_| node.next_word(&mut second)).collect();

	assert_eq!(a, b);
}
