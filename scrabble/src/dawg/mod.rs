//! Directed Acyclic Word Graph: the compressed dictionary used to
//! validate words and drive move generation.

mod builder;
pub mod codec;
mod node;

use crate::{error::GameResult, game::tile::Letter};
pub use builder::DawgBuilder;
pub use node::{DawgNode, NodeId};
use std::collections::HashSet;

/// The root node's id; always present, even in an empty dictionary.
pub const ROOT: NodeId = 0;

/// A minimized dictionary automaton. Construct one with [`DawgBuilder`],
/// or load a previously encoded one with [`codec::decode`].
#[derive(Debug, Clone)]
pub struct Dawg {
    nodes: Vec<DawgNode>,
}

impl Default for Dawg {
    fn default() -> Self {
        DawgBuilder::new().build()
    }
}

impl Dawg {
    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> &DawgNode {
        &self.nodes[id as usize]
    }
    /// The root node.
    pub fn root(&self) -> &DawgNode {
        self.node(ROOT)
    }
    /// Number of nodes in the arena, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    /// Follows a sequence of letters from the root, without requiring the
    /// final node to be a word end. Used to validate cross-word prefixes
    /// during move generation.
    pub fn has_sequence(&self, letters: impl IntoIterator<Item = Letter>) -> bool {
        self.traverse(letters).is_some()
    }
    /// Checks whether `word` is a complete entry in the dictionary.
    pub fn has_word(&self, word: &str) -> bool {
        let letters: Vec<_> = word.chars().filter_map(Letter::new).collect();
        match self.traverse(letters) {
            Some(id) => self.node(id).is_end_of_word(),
            None => false,
        }
    }
    /// Traverses from the root, returning the node reached, or [`None`] if
    /// the sequence is not a path in the dictionary.
    pub fn traverse(&self, letters: impl IntoIterator<Item = Letter>) -> Option<NodeId> {
        let mut curr = ROOT;
        for letter in letters {
            curr = self.node(curr).get_child(letter)?;
        }
        Some(curr)
    }
    /// Every node in the dictionary reached by an edge labelled `letter`.
    /// An anchor tile doesn't say whether its letter is the first, middle
    /// or last letter of the word it belongs to, so every node reachable
    /// via a `letter`-edge from any parent is tried as a starting point
    /// for the move generator's bidirectional walk.
    pub fn get_sequence_roots(&self, letter: Letter) -> Vec<NodeId> {
        (0..self.nodes.len() as NodeId)
            .filter(|&id| self.node(id).get_parent(letter).is_some())
            .collect()
    }
    /// Enumerates every word in the dictionary.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.each_word(ROOT, &mut String::new(), &mut out);
        out
    }
    /// Enumerates every word with no further extension (no word in the
    /// dictionary strictly contains it as a prefix).
    pub fn longest_words(&self) -> Vec<String> {
        self.words()
            .into_iter()
            .filter(|w| {
                let letters: Vec<_> = w.chars().filter_map(Letter::new).collect();
                self.traverse(letters)
                    .map(|id| self.node(id).children().next().is_none())
                    .unwrap_or(false)
            })
            .collect()
    }
    fn each_word(&self, id: NodeId, prefix: &mut String, out: &mut Vec<String>) {
        if self.node(id).is_end_of_word() {
            out.push(prefix.clone());
        }
        for (letter, child) in self.node(id).children() {
            prefix.push(char::from(letter));
            self.each_word(child, prefix, out);
            prefix.pop();
        }
    }
    /// Finds every dictionary word (length >= 2) that can be formed using
    /// only the letters in `rack`, each used at most as many times as it
    /// appears. A space (`' '`) stands for a blank tile and matches any
    /// letter.
    pub fn find_anagrams(&self, rack: &str) -> Vec<String> {
        let mut counts = [0usize; 26];
        let mut blanks = 0;
        for ch in rack.chars() {
            match Letter::new(ch) {
                Some(l) => counts[usize::from(l)] += 1,
                None => blanks += 1,
            }
        }

        let mut out = Vec::new();
        self.anagram_walk(ROOT, &mut counts, blanks, &mut String::new(), &mut out);
        out.retain(|w: &String| w.chars().count() >= 2);
        out
    }
    fn anagram_walk(
        &self,
        id: NodeId,
        counts: &mut [usize; 26],
        blanks: usize,
        prefix: &mut String,
        out: &mut Vec<String>,
    ) {
        if self.node(id).is_end_of_word() && !prefix.is_empty() {
            out.push(prefix.clone());
        }

        for (letter, child) in self.node(id).children() {
            let idx = usize::from(letter);
            if counts[idx] > 0 {
                counts[idx] -= 1;
                prefix.push(char::from(letter));
                self.anagram_walk(child, counts, blanks, prefix, out);
                prefix.pop();
                counts[idx] += 1;
            } else if blanks > 0 {
                prefix.push(char::from(letter));
                self.anagram_walk(child, counts, blanks - 1, prefix, out);
                prefix.pop();
            }
        }
    }
    /// Finds every dictionary word matching `pattern`, where `pattern` is
    /// a fixed-length string of letters and `'_'` wildcards (a "hangman"
    /// query: known letters in known positions, blanks everywhere else).
    pub fn find_hangmen(&self, pattern: &str) -> Vec<String> {
        let slots: Vec<Option<Letter>> = pattern.chars().map(Letter::new).collect();
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        self.hangman_walk(ROOT, &slots, 0, &mut String::new(), &mut out, &mut seen);
        out
    }
    #[allow(clippy::too_many_arguments)]
    fn hangman_walk(
        &self,
        id: NodeId,
        slots: &[Option<Letter>],
        depth: usize,
        prefix: &mut String,
        out: &mut Vec<String>,
        seen: &mut HashSet<String>,
    ) {
        if depth == slots.len() {
            if self.node(id).is_end_of_word() && seen.insert(prefix.clone()) {
                out.push(prefix.clone());
            }
            return;
        }

        for (letter, child) in self.node(id).children() {
            if matches!(slots[depth], Some(expected) if expected != letter) {
                continue;
            }

            prefix.push(char::from(letter));
            self.hangman_walk(child, slots, depth + 1, prefix, out, seen);
            prefix.pop();
        }
    }
}

/// Builds a [`Dawg`] from a newline-separated word list, skipping blank
/// lines. Word order does not matter; [`DawgBuilder`] minimizes
/// regardless of insertion order.
pub fn from_word_list(words: impl IntoIterator<Item = impl AsRef<str>>) -> Dawg {
    let mut builder = DawgBuilder::new();
    for word in words {
        let word = word.as_ref().trim();
        if !word.is_empty() {
            builder.insert(word);
        }
    }
    builder.build()
}

/// Loads a [`Dawg`] from its encoded binary representation.
pub fn load(bytes: &[u8]) -> GameResult<Dawg> {
    codec::decode(bytes)
}
