use std::borrow::Cow;
use std::collections::BTreeMap;

use rand::Rng;

/// Folds a word to its storage key.
///
/// With `ignore_case` the word is lowercased (Unicode aware), otherwise it
/// is borrowed as-is.
pub(crate) fn fold(word: &str, ignore_case: bool) -> Cow<'_, str> {
	if ignore_case {
		Cow::Owned(word.to_lowercase())
	} else {
		Cow::Borrowed(word)
	}
}

/// Outgoing edge of a `TrieNode`: the accumulated weight and the owned child.
#[derive(Clone, Debug)]
struct Branch {
	weight: u64,
	node: TrieNode,
}

/// Represents a node in the weighted word prefix tree.
///
/// A path of `k` edges from a root encodes a sequence of `k` words. The
/// children of the node reached by that path are the words observed right
/// after the sequence, each weighted by how many times it was observed.
///
/// ## Responsibilities:
/// - Accumulate edge weights during training
/// - Descend along a word sequence (`seek`)
/// - Pick a child using weighted random sampling (`next_word`)
///
/// ## Invariants
/// - `weight_sum` always equals the sum of all edge weights
/// - Each child and its edge weight are stored under the same key
/// - Weights never decrease and nodes are never removed
#[derive(Clone, Debug, Default)]
pub struct TrieNode {
	/// Form re-emitted on generation. First-seen casing of the key.
	surface: String,
	/// Sum of all outgoing edge weights.
	weight_sum: u64,
	/// Outgoing edges indexed by the (possibly folded) next word.
	/// Ordered so that sampling scans children in a stable order.
	children: BTreeMap<String, Branch>,
}

impl TrieNode {
	/// Creates an empty root node.
	pub fn new() -> Self {
		Self::default()
	}

	fn with_surface(surface: &str) -> Self {
		Self {
			surface: surface.to_owned(),
			..Self::default()
		}
	}

	/// Records one observation of `word` below this node.
	///
	/// Weight-1 form of [`TrieNode::add_weighted_child`].
	pub fn add_child(&mut self, word: &str, ignore_case: bool) -> &mut TrieNode {
		self.add_weighted_child(word, 1, ignore_case)
	}

	/// Records `weight` observations of `word` below this node.
	///
	/// - Folds `word` when `ignore_case` is set.
	/// - Creates the child on first insertion; the child keeps `word` as its
	///   surface form from then on.
	/// - Adds `weight` to both the edge weight and `weight_sum`.
	///
	/// Returns the child, so that a path can be extended from it.
	///
	/// # Panics
	/// Panics if `weight_sum` would overflow `u64`. [`Chain`](super::chain::Chain)
	/// checks the headroom before inserting a line.
	pub fn add_weighted_child(&mut self, word: &str, weight: u64, ignore_case: bool) -> &mut TrieNode {
		let key = fold(word, ignore_case).into_owned();
		self.weight_sum = match self.weight_sum.checked_add(weight) {
			Some(sum) => sum,
			None => panic!("weight sum overflow below {:?}", self.surface),
		};

		let branch = self.children.entry(key).or_insert_with(|| Branch {
			weight: 0,
			node: TrieNode::with_surface(word),
		});
		// Bounded by weight_sum, cannot overflow
		branch.weight += weight;
		&mut branch.node
	}

	/// Inserts `words[index..]` as a path below this node, every edge weighted 1.
	pub fn add_children<S: AsRef<str>>(&mut self, words: &[S], index: usize, ignore_case: bool) {
		let weights = vec![1; words.len()];
		self.add_weighted_children(words, &weights, index, ignore_case);
	}

	/// Inserts `words[index..]` as a path below this node.
	///
	/// The edge for `words[k]` is weighted `weights[k]`. Insertion stops at
	/// the end of the shorter of the two slices; an `index` past the end
	/// inserts nothing.
	pub fn add_weighted_children<S: AsRef<str>>(
		&mut self,
		words: &[S],
		weights: &[u64],
		index: usize,
		ignore_case: bool,
	) {
		let mut node = self;
		for (word, weight) in words.iter().zip(weights).skip(index) {
			node = node.add_weighted_child(word.as_ref(), *weight, ignore_case);
		}
	}

	/// Follows `words[index..]` down the tree.
	///
	/// Returns:
	/// - the node reached after the last word,
	/// - `self` if there is nothing left to follow,
	/// - `None` as soon as a word has no matching child.
	pub fn seek<S: AsRef<str>>(&self, words: &[S], index: usize, ignore_case: bool) -> Option<&TrieNode> {
		let mut node = self;
		for word in words.iter().skip(index) {
			node = node.child(&fold(word.as_ref(), ignore_case))?;
		}
		Some(node)
	}

	/// Picks the next word using weighted random sampling.
	///
	/// The probability of a child is its edge weight divided by
	/// `weight_sum`. Returns the surface form of the chosen child, or `None`
	/// if this node has no children.
	pub fn next_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.next_node(rng).map(TrieNode::surface)
	}

	fn next_node<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&TrieNode> {
		// Empty node: nothing to draw from
		if self.weight_sum == 0 {
			return None;
		}

		let mut decision = rng.random_range(0..self.weight_sum);
		for branch in self.children.values() {
			if decision < branch.weight {
				return Some(&branch.node);
			}
			decision -= branch.weight;
		}

		// Unreachable while weight_sum matches the edge weights
		None
	}

	/// Form of the word this node stands for. Empty for roots.
	pub fn surface(&self) -> &str {
		&self.surface
	}

	/// Sum of all outgoing edge weights.
	pub fn weight_sum(&self) -> u64 {
		self.weight_sum
	}

	/// Child stored under `key`. The key is not folded.
	pub fn child(&self, key: &str) -> Option<&TrieNode> {
		self.children.get(key).map(|branch| &branch.node)
	}

	/// Edge weight toward the child stored under `key`, 0 if absent.
	pub fn child_weight(&self, key: &str) -> u64 {
		self.children.get(key).map_or(0, |branch| branch.weight)
	}

	/// Iterates over `(key, edge weight, child)` in key order.
	pub fn children(&self) -> impl Iterator<Item = (&str, u64, &TrieNode)> {
		self.children
			.iter()
			.map(|(key, branch)| (key.as_str(), branch.weight, &branch.node))
	}

	pub fn child_count(&self) -> usize {
		self.children.len()
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	/// Number of edges on the longest path below this node.
	pub fn depth(&self) -> usize {
		self.children
			.values()
			.map(|branch| branch.node.depth() + 1)
			.max()
			.unwrap_or(0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn fold_only_lowercases_when_asked() {
		assert_eq!(fold("HeLLo", true), "hello");
		assert_eq!(fold("HeLLo", false), "HeLLo");
		assert!(matches!(fold("x", false), Cow::Borrowed(_)));
	}

	#[test]
	fn zero_weight_child_is_never_drawn() {
		let mut node = TrieNode::new();
		node.add_weighted_child("never", 0, false);
		node.add_weighted_child("always", 3, false);

		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..200 {
			assert_eq!(node.next_word(&mut rng), Some("always"));
		}
	}

	#[test]
	fn weights_shorter_than_words_stop_the_path() {
		let mut root = TrieNode::new();
		root.add_weighted_children(&["a", "b", "c"], &[2, 5], 0, false);

		assert_eq!(root.child_weight("a"), 2);
		assert_eq!(root.seek(&["a"], 0, false).map(|n| n.child_weight("b")), Some(5));
		assert!(root.seek(&["a", "b", "c"], 0, false).is_none());
		assert_eq!(root.depth(), 2);
	}
}
