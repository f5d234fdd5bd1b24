//! Models the scrabble Rack.

use crate::{
    error::{GameError, GameResult, InvalidPlacementReason},
    game::{tile::Tile, tile_bag::TileBag},
    util::tile_counts::TileCounts,
};
use std::fmt;

/// The maximum number of tiles that can be stored on a player's rack.
pub const RACK_SIZE: usize = 7;

/// Each player has a rack with up to 7 tiles on it.
#[derive(Debug)]
pub struct Rack {
    counts: TileCounts,
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for tile in self.iter() {
            write!(f, "{}", tile)?;
        }
        write!(f, "]")
    }
}
impl Rack {
    /// Creates a new [`Rack`], drawing [`RACK_SIZE`] letters from `bag`.
    pub fn new(bag: &mut TileBag) -> Self {
        let counts = TileCounts::from_iter(bag.draw_many(RACK_SIZE));

        Self { counts }
    }
    /// Creates a new [`Rack`] with the provided tiles.
    pub fn new_with_tiles(tiles: &[Tile]) -> Self {
        Self {
            counts: TileCounts::from_iter(tiles.iter().take(RACK_SIZE).copied()),
        }
    }
    /// Get the underlying tile counts for the rack.
    pub fn tile_counts(&self) -> &TileCounts {
        &self.counts
    }
    /// Gets the sum of the remaining tiles on the rack, used for scoring
    /// when the game ends.
    pub fn tile_sum(&self, score: impl Fn(Tile) -> usize) -> usize {
        self.iter().map(score).sum()
    }
    /// Adds tiles from `bag` to bring the rack back up to [`RACK_SIZE`].
    pub fn refill(&mut self, bag: &mut TileBag) {
        self.counts.insert(bag.draw_many(self.missing_count()));
    }
    /// Gets the number of tiles below [`RACK_SIZE`] in the rack.
    pub fn missing_count(&self) -> usize {
        RACK_SIZE - self.len()
    }
    /// Gets the number of tiles in the rack.
    pub fn len(&self) -> usize {
        self.counts.len()
    }
    /// Checks whether the rack is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// Exchanges the tiles provided with new ones from `bag`. If there are
    /// insufficient tiles in `bag`, or the tiles provided are not all
    /// present in the rack, returns an error.
    pub fn exchange_tiles(&mut self, tiles: &[Tile], bag: &mut TileBag) -> GameResult<()> {
        if !(1..=RACK_SIZE).contains(&tiles.len()) {
            return Err(GameError::InvalidPlacement(
                InvalidPlacementReason::RedrawCount,
            ));
        }

        if bag.len() < tiles.len() {
            return Err(GameError::InvalidPlacement(
                InvalidPlacementReason::NotEnoughLetters,
            ));
        }

        if !self.counts.contains(tiles.iter().copied()) {
            return Err(GameError::InvalidPlacement(
                InvalidPlacementReason::NotInRack,
            ));
        }

        self.counts.remove(tiles.iter().copied());
        self.counts.insert(bag.draw_many(tiles.len()));
        bag.add_tiles(tiles.iter().copied());

        Ok(())
    }
    /// Checks whether all `tiles` are contained within the rack.
    pub fn contains(&self, tiles: impl Iterator<Item = Tile>) -> bool {
        self.counts.contains(tiles)
    }
    /// Removes all `tiles` from the rack.
    pub fn remove(&mut self, tiles: impl Iterator<Item = Tile>) {
        self.counts.remove(tiles)
    }
    /// Gets an iterator over the tiles in the rack.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.counts.iter()
    }
}
