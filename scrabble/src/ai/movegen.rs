//! Move generator: enumerates every legal placement for a rack against
//! a board position, together with its score.
//!
//! Anchors are filled squares with at least one empty orthogonal
//! neighbour ([`Board::anchors`]). For each anchor, every dictionary
//! node reached by an edge labelled with the anchor's own letter
//! ([`Dawg::get_sequence_roots`]) is tried as a starting point for a
//! bidirectional walk: [`Moves::back`] extends leftward, consuming
//! either the rack (at empty cells, gated by the cross-check table) or
//! the board's own locked letter, until the dictionary has no
//! predecessor left to try; at that point [`Moves::forward`] takes over
//! and extends rightward from the accumulated prefix, reporting a
//! candidate every time it passes a complete word of length >= 2.
//! Vertical words are found by running the same walk against a
//! transposed copy of the board and mapping the resulting positions
//! back. When the board has no anchors at all (the opening move),
//! [`Moves::opening_plays`] anagrams the rack instead.

use crate::{
    dawg::{Dawg, NodeId},
    game::{
        board::{Board, CELLS},
        play::Play,
        rack::Rack,
        tile::{Letter, Tile},
    },
    util::{
        pos::{Col, Direction, Pos, Row},
        tile_counts::TileCounts,
    },
};
use std::collections::HashSet;

/// Generates every legal move for `rack` against `board`, scored
/// according to the dictionary in `dawg`.
pub struct Moves<'a> {
    dawg: &'a Dawg,
    board: &'a Board,
    rack: &'a Rack,
}

impl<'a> Moves<'a> {
    /// Creates a new move generator.
    pub fn new(dawg: &'a Dawg, board: &'a Board, rack: &'a Rack) -> Self {
        Self { dawg, board, rack }
    }

    /// Returns every legal [`Play::Place`] and its score, in both
    /// directions. Horizontal words are found directly against `board`;
    /// vertical words are found by running the same algorithm against a
    /// transposed copy, then mapping the resulting positions back.
    pub fn moves(&self) -> Vec<(Play, usize)> {
        let mut seen = HashSet::new();
        let mut plays = self.moves_h(self.board, false, &mut seen);
        let transposed = self.board.transposed();
        plays.extend(self.moves_h(&transposed, true, &mut seen));
        plays
    }

    fn moves_h(
        &self,
        board: &Board,
        transpose: bool,
        seen: &mut HashSet<Vec<(Pos, Tile)>>,
    ) -> Vec<(Play, usize)> {
        let anchors: Vec<Pos> = board.anchors().collect();

        if anchors.is_empty() {
            // An empty board has no anchors in either orientation; only
            // look for the opening play once, against the real board.
            return match transpose {
                true => vec![],
                false => self.opening_plays(),
            };
        }

        let cross_checks = self.cross_checks_v(board);
        let mut plays = vec![];

        for anchor in anchors {
            let Some(anchor_tile) = board.at(anchor) else {
                continue;
            };
            let Ok(anchor_letter) = anchor_tile.letter() else {
                continue;
            };
            if !self.dawg.has_sequence([anchor_letter]) {
                continue;
            }

            for node in self.dawg.get_sequence_roots(anchor_letter) {
                let mut counts = *self.rack.tile_counts();
                let mut word = vec![(anchor, anchor_tile)];

                self.back(
                    board,
                    &cross_checks,
                    &mut counts,
                    &mut word,
                    &mut plays,
                    seen,
                    anchor,
                    node,
                    transpose,
                );
            }
        }

        plays
    }

    /// Extends the word under construction leftward from `front`,
    /// consuming either the rack (through the cross-check table) or the
    /// board's own locked tile, following the dictionary's parent edges.
    /// Once `node` has no predecessor left in the dictionary and the
    /// cell before the prefix is empty or off the board, hands off to
    /// [`Moves::forward`] to extend the word the other way.
    #[allow(clippy::too_many_arguments)]
    fn back(
        &self,
        board: &Board,
        cross_checks: &[Option<HashSet<Letter>>],
        counts: &mut TileCounts,
        word: &mut Vec<(Pos, Tile)>,
        plays: &mut Vec<(Play, usize)>,
        seen: &mut HashSet<Vec<(Pos, Tile)>>,
        front: Pos,
        node: NodeId,
        transpose: bool,
    ) {
        match front.dir(Direction::West) {
            Some(prev) => match board.at(prev) {
                // A locked tile must be consumed, never skipped; if the
                // dictionary has no matching parent edge this path is a
                // dead end and forward() is not tried from here.
                Some(tile) => {
                    if let Ok(letter) = tile.letter() {
                        if let Some(parent) = self.dawg.node(node).get_parent(letter) {
                            word.insert(0, (prev, tile));
                            self.back(
                                board, cross_checks, counts, word, plays, seen, prev, parent,
                                transpose,
                            );
                            word.remove(0);
                        }
                    }
                }
                None => {
                    for (letter, parent) in self.dawg.node(node).parents() {
                        if !Self::admits(cross_checks, prev, letter) {
                            continue;
                        }
                        let Some(tile) = Self::choose_tile(letter, counts) else {
                            continue;
                        };

                        counts.remove(std::iter::once(tile));
                        word.insert(0, (prev, tile));
                        self.back(
                            board, cross_checks, counts, word, plays, seen, prev, parent,
                            transpose,
                        );
                        word.remove(0);
                        counts.insert(std::iter::once(tile));
                    }

                    if self.dawg.node(node).parents().next().is_none() {
                        self.forward(board, cross_checks, counts, word, plays, seen, node, transpose);
                    }
                }
            },
            None => {
                if self.dawg.node(node).parents().next().is_none() {
                    self.forward(board, cross_checks, counts, word, plays, seen, node, transpose);
                }
            }
        }
    }

    /// Extends the word under construction rightward from its tail,
    /// reporting a candidate at every complete word of length >= 2 whose
    /// next cell is empty or off the board.
    #[allow(clippy::too_many_arguments)]
    fn forward(
        &self,
        board: &Board,
        cross_checks: &[Option<HashSet<Letter>>],
        counts: &mut TileCounts,
        word: &mut Vec<(Pos, Tile)>,
        plays: &mut Vec<(Play, usize)>,
        seen: &mut HashSet<Vec<(Pos, Tile)>>,
        node: NodeId,
        transpose: bool,
    ) {
        let tail = word.last().expect("word is never empty").0;
        let next = tail.dir(Direction::East);
        let blocked = next.and_then(|p| board.at(p)).is_some();

        if self.dawg.node(node).is_end_of_word() && word.len() >= 2 && !blocked {
            self.report(word, plays, seen, transpose);
        }

        let Some(next) = next else { return };

        match board.at(next) {
            Some(tile) => {
                if let Ok(letter) = tile.letter() {
                    if let Some(child) = self.dawg.node(node).get_child(letter) {
                        word.push((next, tile));
                        self.forward(board, cross_checks, counts, word, plays, seen, child, transpose);
                        word.pop();
                    }
                }
            }
            None => {
                for (letter, child) in self.dawg.node(node).children() {
                    if !Self::admits(cross_checks, next, letter) {
                        continue;
                    }
                    let Some(tile) = Self::choose_tile(letter, counts) else {
                        continue;
                    };

                    counts.remove(std::iter::once(tile));
                    word.push((next, tile));
                    self.forward(board, cross_checks, counts, word, plays, seen, child, transpose);
                    word.pop();
                    counts.insert(std::iter::once(tile));
                }
            }
        }
    }

    /// Converts the accumulated word to real board coordinates, keeps
    /// only the newly placed tiles, and scores it against a scratch copy
    /// of the real board. Deduplicates against plays already reported
    /// from the other orientation or a different anchor/node pair.
    fn report(
        &self,
        word: &[(Pos, Tile)],
        plays: &mut Vec<(Play, usize)>,
        seen: &mut HashSet<Vec<(Pos, Tile)>>,
        transpose: bool,
    ) {
        let real: Vec<(Pos, Tile)> = word
            .iter()
            .map(|&(pos, tile)| {
                let real_pos = if transpose { pos.swap_rc() } else { pos };
                (real_pos, tile)
            })
            .collect();

        let new_tiles: Vec<(Pos, Tile)> = real
            .into_iter()
            .filter(|&(pos, _)| self.board.at(pos).is_none())
            .collect();

        if new_tiles.is_empty() || !seen.insert(new_tiles.clone()) {
            return;
        }

        let mut scratch = self.board.clone();
        if let Ok(score) = scratch.make_placement(&new_tiles, self.dawg) {
            plays.push((Play::Place(new_tiles), score));
        }
    }

    /// Picks a tile to realize `letter` from the rack, preferring a
    /// non-blank tile and falling back to a blank assigned to `letter`.
    fn choose_tile(letter: Letter, counts: &TileCounts) -> Option<Tile> {
        if counts.count(Tile::Letter(letter)) > 0 {
            Some(Tile::Letter(letter))
        } else if counts.count(Tile::Blank(None)) > 0 {
            Some(Tile::Blank(Some(letter)))
        } else {
            None
        }
    }

    /// Checks whether `letter` is admissible at `pos` under the
    /// cross-check table: unconstrained if `pos` has no perpendicular
    /// neighbour, otherwise gated on forming a complete, valid
    /// perpendicular word.
    fn admits(cross_checks: &[Option<HashSet<Letter>>], pos: Pos, letter: Letter) -> bool {
        match &cross_checks[usize::from(pos)] {
            None => true,
            Some(set) => set.contains(&letter),
        }
    }

    /// Precomputes, for each empty square, the set of letters that would
    /// form a valid perpendicular word if placed there. `None` means the
    /// square has no perpendicular neighbour, so every letter is
    /// admissible; this is what [`Moves::back`]/[`Moves::forward`] use to
    /// prune the rack letters they try at each empty cell.
    fn cross_checks_v(&self, board: &Board) -> Vec<Option<HashSet<Letter>>> {
        let mut table = vec![None; CELLS];
        let above_or_below = board.occ_h().above_or_below();

        for col in Col::iter() {
            for row in Row::iter() {
                let pos = Pos::from((row, col));
                if board.at(pos).is_some() || !above_or_below.is_set(pos) {
                    continue;
                }

                let word_above = Self::run(board, pos, Direction::North);
                let word_below = Self::run(board, pos, Direction::South);

                let admitted: HashSet<Letter> = Letter::iter()
                    .filter(|&letter| {
                        let candidate = format!("{word_above}{}{word_below}", char::from(letter));
                        self.dawg.has_word(&candidate)
                    })
                    .collect();

                table[usize::from(pos)] = Some(admitted);
            }
        }

        table
    }

    /// Reads the run of locked letters starting immediately `dir` of
    /// `pos`, stopping at the first empty cell or the board edge. The
    /// `North` run comes back reversed, so callers read top-to-bottom.
    fn run(board: &Board, pos: Pos, dir: Direction) -> String {
        let mut letters: Vec<char> = pos
            .project(dir)
            .skip(1)
            .map_while(|p| board.at(p).and_then(|t| t.letter().ok()).map(char::from))
            .collect();

        if dir == Direction::North {
            letters.reverse();
        }

        letters.into_iter().collect()
    }

    /// Falls back to an opening play when the board has no anchors yet:
    /// every anagram the rack can form, tried at every offset and
    /// orientation that covers the center square, scored against a
    /// scratch empty board. Returns the single best-scoring candidate.
    fn opening_plays(&self) -> Vec<(Play, usize)> {
        let rack_str: String = self
            .rack
            .iter()
            .map(|tile| match tile {
                Tile::Letter(l) => char::from(l),
                Tile::Blank(_) => ' ',
            })
            .collect();

        let mut best: Option<(Play, usize)> = None;

        for word in self.dawg.find_anagrams(&rack_str) {
            let len = word.chars().count();
            if len > 15 {
                continue;
            }

            for dir in [Direction::East, Direction::South] {
                for offset in 0..=(15 - len) {
                    if !(offset..offset + len).contains(&7) {
                        continue;
                    }

                    let Some(tiles) = Self::tiles_for_word(&word, self.rack.tile_counts()) else {
                        continue;
                    };

                    let start = match dir {
                        Direction::East => Pos::from((7usize, offset)),
                        _ => Pos::from((offset, 7usize)),
                    };
                    let positions: Vec<(Pos, Tile)> = start.project(dir).zip(tiles).collect();

                    let mut scratch = Board::default();
                    if let Ok(score) = scratch.make_placement(&positions, self.dawg) {
                        if best.as_ref().map_or(true, |&(_, best)| score > best) {
                            best = Some((Play::Place(positions), score));
                        }
                    }
                }
            }
        }

        best.into_iter().collect()
    }

    /// Greedily assigns a rack tile to each letter of `word`, preferring
    /// non-blank tiles; fails if the rack cannot cover the word.
    fn tiles_for_word(word: &str, counts: &TileCounts) -> Option<Vec<Tile>> {
        let mut counts = *counts;
        let mut tiles = Vec::with_capacity(word.chars().count());

        for ch in word.chars() {
            let letter = Letter::new(ch)?;
            let tile = Self::choose_tile(letter, &counts)?;
            counts.remove(std::iter::once(tile));
            tiles.push(tile);
        }

        Some(tiles)
    }
}
