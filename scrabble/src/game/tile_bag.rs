//! Models the bag of undrawn tiles, plus the disjoint order-selection
//! draw stream used before a game starts.

use crate::{
    alphabet::Alphabet,
    error::{GameError, GameResult},
    game::{
        rack::RACK_SIZE,
        tile::{Letter, Tile},
    },
    util::tile_counts::TileCounts,
};
use rand::Rng;
use std::{collections::HashSet, iter::once};

/// A structure containing a finite number of tiles which can be used
/// during the game. Since there are 27 distinct tiles, an array with 27
/// elements is used to keep count.
#[derive(Debug)]
pub struct TileBag {
    counts: TileCounts,
}

impl TileBag {
    /// Builds a full bag from an [`Alphabet`]'s distribution.
    pub fn new(alphabet: &Alphabet) -> Self {
        let mut counts = [0; 27];
        for letter in alphabet.letters() {
            counts[usize::from(Tile::Letter(letter))] = alphabet.entry(letter).count;
        }
        counts[26] = alphabet.blank_count();

        Self {
            counts: TileCounts::from(counts),
        }
    }
    /// Checks whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// Returns the total number of tiles remaining in the bag.
    pub fn len(&self) -> usize {
        self.counts.len()
    }
    /// Draws a randomly selected letter from the bag, or [`None`] if it is
    /// empty.
    pub fn draw(&mut self) -> Option<Tile> {
        match self.len() {
            0 => None,
            len => Some({
                let idx = rand::thread_rng().gen_range(0..len);
                let mut tile_idx = 0;
                let mut count = self.counts.count(tile_idx);

                while count <= idx {
                    tile_idx += 1;
                    count += self.counts.count(tile_idx);
                }

                assert!(tile_idx < 27);

                let tile = Tile::from(tile_idx);
                self.counts.remove(once(tile));

                tile
            }),
        }
    }
    /// Draws `min(count, total, RACK_SIZE)` tiles from the bag.
    pub fn draw_many(&mut self, count: usize) -> impl Iterator<Item = Tile> + '_ {
        (0..RACK_SIZE).filter_map(|_| self.draw()).take(count)
    }
    /// Adds tiles from the provided iterator back into the bag.
    pub fn add_tiles(&mut self, tiles: impl Iterator<Item = Tile>) -> usize {
        let len = self.len();
        self.counts.insert(tiles.take(RACK_SIZE));
        self.len() - len
    }
    /// Draws one letter to be used for player-order selection, without
    /// touching the real bag: this stream is disjoint from the main bag
    /// and draws uniformly from letters never previously picked for
    /// order. Fails with [`GameError::Exhausted`] once `picked` already
    /// holds every letter in `alphabet`.
    pub fn draw_for_order(alphabet: &Alphabet, picked: &mut HashSet<Letter>) -> GameResult<Tile> {
        let available: Vec<Letter> = alphabet.letters().filter(|l| !picked.contains(l)).collect();
        if available.is_empty() {
            return Err(GameError::Exhausted);
        }

        let idx = rand::thread_rng().gen_range(0..available.len());
        let letter = available[idx];
        picked.insert(letter);

        Ok(Tile::Letter(letter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rack::RACK_SIZE;

    #[test]
    fn draw_limits() {
        let alphabet = Alphabet::default();
        let mut bag = TileBag::new(&alphabet);
        assert_eq!(bag.draw_many(0).count(), 0);
        assert_eq!(bag.draw_many(100).count(), RACK_SIZE);
        assert_eq!(bag.len(), 93);
    }

    #[test]
    fn empty_bag() {
        let alphabet = Alphabet::default();
        let mut bag = TileBag::new(&alphabet);
        let mut removed = vec![];

        while !bag.is_empty() {
            removed.extend(bag.draw_many(RACK_SIZE));
        }

        let mut len = 0;
        while len < 100 {
            bag.add_tiles(removed[len..].iter().copied().take(RACK_SIZE));
            len = (len + RACK_SIZE).min(100);
        }

        assert_eq!(bag.len(), len);
    }

    #[test]
    fn order_draw_does_not_touch_bag() {
        let alphabet = Alphabet::default();
        let mut bag = TileBag::new(&alphabet);
        let before = bag.len();
        let mut picked = std::collections::HashSet::new();

        for _ in 0..4 {
            TileBag::draw_for_order(&alphabet, &mut picked).unwrap();
        }
        assert_eq!(picked.len(), 4);
        assert_eq!(bag.len(), before);

        let _ = bag.draw();
    }

    #[test]
    fn order_draws_are_distinct() {
        let alphabet = Alphabet::default();
        let mut picked = std::collections::HashSet::new();

        for _ in 0..26 {
            let tile = TileBag::draw_for_order(&alphabet, &mut picked).unwrap();
            let letter = tile.letter().unwrap();
            assert!(picked.contains(&letter));
        }

        assert_eq!(picked.len(), 26);
        assert!(matches!(
            TileBag::draw_for_order(&alphabet, &mut picked),
            Err(GameError::Exhausted)
        ));
    }
}
