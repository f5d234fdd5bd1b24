//! Models the scrabble board.

use crate::{
    dawg::Dawg,
    error::{GameError, GameResult, InvalidPlacementReason},
    game::tile::Tile,
    util::{
        self,
        bitboard::BitBoard,
        pos::Pos,
        scoring,
        words::{Word, Words},
    },
};
use std::fmt;

/// The number of rows on the board.
pub const ROWS: usize = 15;
/// The number of columns on the board.
pub const COLS: usize = 15;
/// The number of squares on the board.
pub const CELLS: usize = 15 * 15;

/// Represents the 15 x 15 scrabble board, storing the location of
/// locked-down tiles, and allowing placements to be made and scored.
#[derive(Clone, Debug)]
pub struct Board {
    grid: [Option<Tile>; CELLS],
    /// regular occupancy, for finding horizontal words.
    occ_h: BitBoard,
    /// vertical occupancy, rotated 90deg. For finding vertical words.
    occ_v: BitBoard,
}
impl Board {
    /// Computes the combined score for horizontal and vertical words,
    /// adding the bingo bonus where appropriate. Premium multipliers only
    /// ever apply to the newly placed tiles in `new_h`/`new_v`; a square
    /// already covered by a locked tile never re-triggers its bonus.
    fn score_and_validate(
        &self,
        new_h: BitBoard,
        new_v: BitBoard,
        dawg: &Dawg,
    ) -> GameResult<usize> {
        let words_h = Words::horizontal(self.occ_h | new_h);
        let words_v = Words::vertical(self.occ_v | new_v);

        let mut score = 0;
        for word in words_h.chain(words_v) {
            score += scoring::score(word, &new_h, self, dawg)?;
        }

        match new_h.bit_count() {
            7 => Ok(score + 50),
            _ => Ok(score),
        }
    }
    /// Gets an iterator over the words currently on the board.
    pub fn words(&self) -> impl Iterator<Item = Word> {
        let words_h = Words::horizontal(self.occ_h);
        let words_v = Words::vertical(self.occ_v);

        words_h.chain(words_v)
    }
    /// Gets the board occupancy.
    pub fn occ_h(&self) -> &BitBoard {
        &self.occ_h
    }
    /// Gets the rotated board occupancy.
    pub fn occ_v(&self) -> &BitBoard {
        &self.occ_v
    }
    /// Gets the tile at `pos`, if one is locked there.
    pub fn at(&self, pos: impl Into<Pos>) -> Option<Tile> {
        self.grid[usize::from(pos.into())]
    }
    /// Checks whether a square is an anchor: a filled square with at
    /// least one empty orthogonal neighbour.
    pub fn is_anchor(&self, pos: Pos) -> bool {
        self.at(pos).is_some() && self.occ_h.neighbours().is_set(pos)
    }
    /// Iterates over every anchor square currently on the board.
    pub fn anchors(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::iter().filter(move |&pos| self.is_anchor(pos))
    }
    /// Builds a copy of the board with rows and columns swapped, so that
    /// a horizontal-word algorithm run against it discovers the original
    /// board's vertical words. Positions found against the transposed
    /// board must be mapped back with [`Pos::swap_rc`].
    pub fn transposed(&self) -> Board {
        let mut grid = [None; CELLS];
        for pos in Pos::iter() {
            grid[usize::from(pos.swap_rc())] = self.grid[usize::from(pos)];
        }

        Board {
            grid,
            occ_h: self.occ_v,
            occ_v: self.occ_h,
        }
    }
    /// Removes all tiles in `tile_positions` from the board.
    pub fn undo_placement(&mut self, tile_positions: &[Pos]) {
        for &pos in tile_positions {
            self.grid[usize::from(pos)] = None;
            self.occ_h.clear(pos);
            self.occ_v.clear(pos.swap_rc());
        }
    }
    /// Attempts to place tiles on the board, scoring and validating the
    /// words they form. If validation fails the board is left unchanged.
    pub fn make_placement(
        &mut self,
        tile_positions: &[(Pos, Tile)],
        dawg: &Dawg,
    ) -> GameResult<usize> {
        let mut new_h = BitBoard::default();
        let mut new_v = BitBoard::default();

        for &(pos_h, _) in tile_positions {
            if new_h.is_set(pos_h) {
                return Err(GameError::InvalidPlacement(
                    InvalidPlacementReason::DuplicatePosition,
                ));
            }

            new_h.set(pos_h);
            new_v.set(pos_h.swap_rc());
        }

        util::validate_occ_h(self.occ_h, new_h)?;

        for &(pos, tile) in tile_positions {
            self.grid[usize::from(pos)] = Some(tile);
        }

        match self.score_and_validate(new_h, new_v, dawg) {
            Ok(score) => {
                self.occ_h |= new_h;
                self.occ_v |= new_v;

                Ok(score)
            }
            Err(e) => {
                tile_positions
                    .iter()
                    .for_each(|(pos, _)| self.grid[usize::from(*pos)] = None);

                Err(e)
            }
        }
    }
}
impl Default for Board {
    fn default() -> Self {
        Self {
            grid: [None; CELLS],
            occ_h: BitBoard::default(),
            occ_v: BitBoard::default(),
        }
    }
}
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        util::write_grid(f, |pos| match self.at(pos) {
            Some(tile) => format!("{}", tile),
            None => " . ".to_string(),
        })
    }
}
