//! Binary (de)serialization of a [`super::Dawg`].
//!
//! Format: a big-endian `u32` node count, followed by two big-endian
//! `u32`s per node in breadth-first order: the node's letter, then a
//! packed word `child_index << 2 | end_of_word_bit | end_of_list_bit`.
//! Each node's children are written as a singly-linked list threaded
//! through the following nodes in the stream (`end_of_list_bit` marks
//! the last sibling), which is why decoding walks the stream once and
//! reconstructs `children`/`parents` afterwards.

use crate::{
    dawg::{node::DawgNode, Dawg},
    error::{GameError, GameResult},
    game::tile::Letter,
};

const CHILD_SHIFT: u32 = 2;
const END_OF_WORD_BIT: u32 = 0b01;
const END_OF_LIST_BIT: u32 = 0b10;

/// One flattened, on-disk record: an optional letter (the root carries
/// none) plus the index of its first child and whether it is the last
/// sibling in its list.
struct Record {
    letter: Option<Letter>,
    is_end_of_word: bool,
    first_child: Option<u32>,
    is_end_of_list: bool,
}

/// Encodes `dawg` into the external binary format.
pub fn encode(dawg: &Dawg) -> Vec<u8> {
    let records = flatten(dawg);

    let mut out = Vec::with_capacity(4 + records.len() * 8);
    out.extend((records.len() as u32).to_be_bytes());

    for record in &records {
        let letter_word = record.letter.map_or(0, |l| usize::from(l) as u32);
        let packed = record.first_child.map_or(0, |c| c << CHILD_SHIFT)
            | if record.is_end_of_word { END_OF_WORD_BIT } else { 0 }
            | if record.is_end_of_list { END_OF_LIST_BIT } else { 0 };

        out.extend(letter_word.to_be_bytes());
        out.extend(packed.to_be_bytes());
    }

    out
}

/// Flattens the arena into the sibling-linked-list record stream that
/// the binary format expects: each node's children are laid out
/// consecutively, starting at `first_child`, terminated by a node with
/// `is_end_of_list` set.
fn flatten(dawg: &Dawg) -> Vec<Record> {
    let mut records = Vec::with_capacity(dawg.nodes.len());
    let mut child_block_start = vec![0u32; dawg.nodes.len()];

    records.push(Record {
        letter: None,
        is_end_of_word: false,
        first_child: None,
        is_end_of_list: true,
    });

    for (id, node) in dawg.nodes.iter().enumerate() {
        if node.children.is_empty() {
            continue;
        }

        child_block_start[id] = records.len() as u32;

        let last = node.children.len() - 1;
        for (i, &(letter, child)) in node.children.iter().enumerate() {
            records.push(Record {
                letter: Some(letter),
                is_end_of_word: dawg.nodes[child as usize].is_end_of_word,
                first_child: None,
                is_end_of_list: i == last,
            });
        }
    }

    records[0].first_child = (!dawg.nodes[0].children.is_empty()).then(|| child_block_start[0]);

    for (id, node) in dawg.nodes.iter().enumerate() {
        if node.children.is_empty() {
            continue;
        }

        let start = child_block_start[id] as usize;
        for (offset, &(_, child)) in node.children.iter().enumerate() {
            let record = &mut records[start + offset];
            record.first_child = (!dawg.nodes[child as usize].children.is_empty())
                .then(|| child_block_start[child as usize]);
        }
    }

    records
}

/// Decodes a [`Dawg`] from the external binary format, rebuilding the
/// `children`/`parents` adjacency from the sibling-list encoding.
pub fn decode(bytes: &[u8]) -> GameResult<Dawg> {
    if bytes.len() < 4 {
        log::warn!("dictionary load failed: {} bytes is too short for a node count", bytes.len());
        return Err(GameError::CorruptDictionary);
    }

    let node_count = u32::from_be_bytes(bytes[0..4].try_into().unwrap()) as usize;
    let expected_len = 4 + node_count * 8;
    if bytes.len() != expected_len {
        log::warn!(
            "dictionary load failed: header claims {node_count} nodes ({expected_len} bytes), got {}",
            bytes.len()
        );
        return Err(GameError::CorruptDictionary);
    }

    let mut letters = vec![None; node_count];
    let mut is_end_of_word = vec![false; node_count];
    let mut first_child = vec![None; node_count];
    let mut is_end_of_list = vec![false; node_count];

    for i in 0..node_count {
        let offset = 4 + i * 8;
        let letter_word = u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap());
        let packed = u32::from_be_bytes(bytes[offset + 4..offset + 8].try_into().unwrap());

        letters[i] = if letter_word < 26 {
            Some(Letter::from(letter_word as usize))
        } else {
            None
        };
        is_end_of_word[i] = packed & END_OF_WORD_BIT != 0;
        is_end_of_list[i] = packed & END_OF_LIST_BIT != 0;
        first_child[i] = (packed >> CHILD_SHIFT != 0).then_some(packed >> CHILD_SHIFT);
    }

    // Reachability pass from the root rebuilds each node's ordered child
    // list by walking each sibling chain to its `end_of_list` terminator.
    let mut nodes: Vec<DawgNode> = (0..node_count)
        .map(|i| DawgNode {
            is_end_of_word: is_end_of_word[i],
            children: Vec::new(),
            parents: Vec::new(),
        })
        .collect();

    for id in 0..node_count {
        let Some(mut sibling) = first_child[id] else {
            continue;
        };

        loop {
            let idx = sibling as usize;
            let letter = letters[idx].ok_or_else(|| {
                log::warn!("dictionary load failed: sibling record {idx} carries no letter");
                GameError::CorruptDictionary
            })?;
            nodes[id].children.push((letter, sibling));

            if is_end_of_list[idx] {
                break;
            }
            sibling += 1;
        }

        nodes[id].children.sort_by_key(|&(letter, _)| letter);
    }

    let edges: Vec<(u32, Letter, u32)> = nodes
        .iter()
        .enumerate()
        .flat_map(|(id, node)| {
            node.children
                .iter()
                .map(move |&(letter, child)| (id as u32, letter, child))
        })
        .collect();

    for (parent, letter, child) in edges {
        nodes[child as usize].parents.push((letter, parent));
    }
    for node in nodes.iter_mut() {
        node.parents.sort_by_key(|&(letter, _)| letter);
    }

    Ok(Dawg { nodes })
}
