//! Constructs a minimized [`super::Dawg`] from a word list.
//!
//! Construction happens in three passes, mirroring the reference
//! dictionary builder: insert every word into a plain trie, collapse
//! identical subtries via a register (so the graph becomes a DAG rather
//! than a tree), then renumber the surviving nodes breadth-first so the
//! final arena is dense and the binary encoding is compact.

use crate::{
    dawg::node::{DawgNode, NodeId},
    game::tile::Letter,
};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Default)]
struct TrieNode {
    is_end_of_word: bool,
    children: HashMap<Letter, usize>,
}

/// Builds a [`super::Dawg`] one word at a time.
#[derive(Debug, Default)]
pub struct DawgBuilder {
    nodes: Vec<TrieNode>,
}

impl DawgBuilder {
    /// Creates an empty builder, with only the root node present.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }
    /// Inserts a word. Words may be inserted in any order.
    pub fn insert(&mut self, word: &str) {
        let mut curr = 0usize;

        for ch in word.chars() {
            let Some(letter) = Letter::new(ch) else {
                continue;
            };

            curr = match self.nodes[curr].children.get(&letter) {
                Some(&next) => next,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[curr].children.insert(letter, id);
                    id
                }
            };
        }

        self.nodes[curr].is_end_of_word = true;
    }
    /// Minimizes the trie into a DAWG, then renumbers nodes breadth-first
    /// from the root and computes the reverse (`parents`) adjacency.
    pub fn build(self) -> super::Dawg {
        let mut signatures: HashMap<Signature, usize> = HashMap::new();
        let mut canonical: Vec<usize> = (0..self.nodes.len()).collect();

        self.minimize(0, &mut signatures, &mut canonical);

        let (order, remap) = Self::bfs_order(0, &canonical, &self.nodes);

        let mut nodes = vec![DawgNode::default(); order.len()];
        for (&old_id, &new_id) in remap.iter() {
            let trie_node = &self.nodes[old_id];
            nodes[new_id as usize].is_end_of_word = trie_node.is_end_of_word;

            let mut children: Vec<_> = trie_node
                .children
                .iter()
                .map(|(&letter, &child)| (letter, remap[&canonical[child]]))
                .collect();
            children.sort_by_key(|&(letter, _)| letter);
            nodes[new_id as usize].children = children;
        }

        Self::build_parent_lists(&mut nodes);

        super::Dawg { nodes }
    }

    /// Post-order walk that replaces any subtrie with an already-seen,
    /// structurally identical one, recorded in `signatures`.
    fn minimize(
        &self,
        id: usize,
        signatures: &mut HashMap<Signature, usize>,
        canonical: &mut Vec<usize>,
    ) {
        let mut child_ids: Vec<_> = self.nodes[id].children.values().copied().collect();
        child_ids.sort_unstable();

        for &child in &child_ids {
            if canonical[child] == child {
                self.minimize(child, signatures, canonical);
            }
        }

        let mut children: Vec<_> = self.nodes[id]
            .children
            .iter()
            .map(|(&letter, &child)| (letter, canonical[child]))
            .collect();
        children.sort_by_key(|&(letter, _)| letter);

        let signature = Signature {
            is_end_of_word: self.nodes[id].is_end_of_word,
            children,
        };

        match signatures.get(&signature) {
            Some(&existing) => canonical[id] = existing,
            None => {
                signatures.insert(signature, id);
            }
        }
    }
    /// Assigns dense ids to the surviving canonical nodes in breadth-first
    /// order starting from the root, returning the visitation order and a
    /// map from canonical old id to new id.
    fn bfs_order(
        root: usize,
        canonical: &[usize],
        nodes: &[TrieNode],
    ) -> (Vec<usize>, HashMap<usize, NodeId>) {
        let mut order = Vec::new();
        let mut remap = HashMap::new();
        let mut queue = VecDeque::new();

        remap.insert(canonical[root], 0u32);
        order.push(canonical[root]);
        queue.push_back(canonical[root]);

        while let Some(id) = queue.pop_front() {
            let mut children: Vec<_> = nodes[id].children.values().copied().collect();
            children.sort_unstable();

            for child in children {
                let canonical_child = canonical[child];
                if let std::collections::hash_map::Entry::Vacant(e) = remap.entry(canonical_child)
                {
                    e.insert(order.len() as NodeId);
                    order.push(canonical_child);
                    queue.push_back(canonical_child);
                }
            }
        }

        (order, remap)
    }
    /// Inverts every `children` edge to populate each node's `parents`.
    fn build_parent_lists(nodes: &mut [DawgNode]) {
        let edges: Vec<(NodeId, Letter, NodeId)> = nodes
            .iter()
            .enumerate()
            .flat_map(|(id, node)| {
                node.children
                    .iter()
                    .map(move |&(letter, child)| (id as NodeId, letter, child))
            })
            .collect();

        for (parent, letter, child) in edges {
            nodes[child as usize].parents.push((letter, parent));
        }

        for node in nodes.iter_mut() {
            node.parents.sort_by_key(|&(letter, _)| letter);
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Signature {
    is_end_of_word: bool,
    children: Vec<(Letter, usize)>,
}
