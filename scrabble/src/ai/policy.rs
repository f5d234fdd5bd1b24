//! Computer player policies: GREEDY picks the top-scoring candidate,
//! BALANCED weighs immediate score against a strategic/future estimate.

use crate::{
    ai::movegen::Moves,
    alphabet::{Alphabet, LetterKind},
    dawg::Dawg,
    game::{
        board::Board,
        play::Play,
        rack::Rack,
        tile::{Letter, Tile},
        tile_bag::TileBag,
    },
    util::pos::{Direction, Pos},
};

/// `γ` weighting the future-value term in [`Policy::Balanced`].
const GAMMA: f64 = 0.8;
/// Below this many tiles left in the bag, strategic value is discounted
/// in favour of immediate points.
const ENDGAME_BAG_SIZE: usize = 20;
const ENDGAME_STRATEGIC_MULTIPLIER: f64 = 0.7;

/// A strategy for choosing a move from the set of legal candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Policy {
    /// Always takes the highest-scoring candidate.
    Greedy,
    /// Weighs immediate score, board-position/rack-leave heuristics and a
    /// future-value estimate.
    Balanced,
}

impl Policy {
    /// Chooses a play for the current position. Falls back to an
    /// exchange (or a pass, if the bag is empty) when no placement is
    /// legal.
    pub fn choose(
        &self,
        dawg: &Dawg,
        board: &Board,
        rack: &Rack,
        bag: &TileBag,
        alphabet: &Alphabet,
    ) -> Play {
        let candidates = Moves::new(dawg, board, rack).moves();

        if candidates.is_empty() {
            return Self::fallback(rack, bag, alphabet);
        }

        match self {
            Policy::Greedy => candidates
                .into_iter()
                .max_by_key(|&(_, score)| score)
                .map(|(play, _)| play)
                .unwrap_or(Play::Pass),
            Policy::Balanced => candidates
                .into_iter()
                .map(|(play, score)| {
                    let value = Self::evaluate(&play, score, board, rack, bag, alphabet);
                    (play, value)
                })
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(play, _)| play)
                .unwrap_or(Play::Pass),
        }
    }

    /// Scores a candidate play as `immediate + strategic + γ·future_estimate`.
    fn evaluate(
        play: &Play,
        score: usize,
        board: &Board,
        rack: &Rack,
        bag: &TileBag,
        alphabet: &Alphabet,
    ) -> f64 {
        let Play::Place(tiles) = play else {
            return score as f64;
        };

        let immediate = score as f64;
        let mut strategic = 1.5 * tiles.len() as f64;
        if tiles.len() == 7 {
            strategic += 25.0;
        }

        strategic -= 2.5 * Self::newly_exposed_premiums(board, tiles) as f64;
        strategic += Self::position_heuristic(board, tiles, alphabet);

        let leave: Vec<Tile> = rack
            .iter()
            .filter(|&t| !tiles.iter().any(|&(_, placed)| placed == t))
            .collect();
        strategic -= Self::leave_penalty(&leave, alphabet);

        if bag.len() < ENDGAME_BAG_SIZE {
            strategic *= ENDGAME_STRATEGIC_MULTIPLIER;
        }

        let future = Self::future_estimate(&leave, board, tiles.len(), bag, alphabet);

        immediate + strategic + GAMMA * future
    }

    /// Counts empty, premium-bearing squares newly adjacent to this
    /// play's tiles (squares an opponent could now exploit).
    fn newly_exposed_premiums(board: &Board, tiles: &[(Pos, Tile)]) -> usize {
        let placed: Vec<Pos> = tiles.iter().map(|&(pos, _)| pos).collect();

        let mut count = 0;
        for &pos in &placed {
            for dir in [
                Direction::North,
                Direction::South,
                Direction::East,
                Direction::West,
            ] {
                if let Some(n) = pos.dir(dir) {
                    let was_empty_before =
                        board.at(n).is_none() && !placed.iter().any(|&p| p == n);
                    if was_empty_before && n.premium().is_some() {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Small heuristic bonus for plays that keep vowels next to
    /// letter-premium squares, where future plays can exploit them.
    fn position_heuristic(_board: &Board, tiles: &[(Pos, Tile)], alphabet: &Alphabet) -> f64 {
        let mut bonus = 0.0;
        for &(pos, tile) in tiles {
            let is_vowel = tile
                .letter()
                .ok()
                .map(|l| alphabet.entry(l).kind == LetterKind::Vowel)
                .unwrap_or(false);

            if is_vowel && pos.premium().is_some() {
                bonus += 0.5;
            }
        }
        bonus
    }

    /// Penalizes a post-play rack that is vowel-heavy, vowel-starved, or
    /// holds onto duplicate consonants and unplayed high-value tiles.
    fn leave_penalty(leave: &[Tile], alphabet: &Alphabet) -> f64 {
        if leave.is_empty() {
            return 0.0;
        }

        let vowels = leave
            .iter()
            .filter(|t| {
                t.letter()
                    .ok()
                    .map(|l| alphabet.entry(l).kind == LetterKind::Vowel)
                    .unwrap_or(false)
            })
            .count();

        let mut penalty = match vowels {
            0 | 1 => 3.0,
            v if v >= 5 => 3.0,
            _ => 0.0,
        };

        let mut seen = [0usize; 26];
        for tile in leave {
            if let Ok(letter) = tile.letter() {
                if alphabet.entry(letter).kind == LetterKind::Consonant {
                    seen[usize::from(letter)] += 1;
                }
            }
        }
        penalty += seen.iter().filter(|&&c| c > 1).map(|&c| (c - 1) as f64).sum::<f64>();

        penalty += leave
            .iter()
            .map(|&t| match alphabet.score(t) {
                p if p >= 8 => 1.5,
                p if p >= 4 => 0.5,
                _ => 0.0,
            })
            .sum::<f64>();

        penalty
    }

    /// Expected value of future draws, scaled by how balanced the
    /// remaining rack is and by how many tiles this play will draw.
    fn future_estimate(
        leave: &[Tile],
        board: &Board,
        tiles_used: usize,
        bag: &TileBag,
        alphabet: &Alphabet,
    ) -> f64 {
        let mut unseen = [0usize; 26];
        for letter in Letter::iter() {
            unseen[usize::from(letter)] = alphabet.entry(letter).count;
        }
        for tile in leave {
            if let Ok(letter) = tile.letter() {
                unseen[usize::from(letter)] = unseen[usize::from(letter)].saturating_sub(1);
            }
        }
        for word in board.words() {
            for pos in word {
                if let Some(tile) = board.at(pos) {
                    if let Ok(letter) = tile.letter() {
                        unseen[usize::from(letter)] = unseen[usize::from(letter)].saturating_sub(1);
                    }
                }
            }
        }

        let total_unseen: usize = unseen.iter().sum();
        if total_unseen == 0 {
            return 0.0;
        }

        let expected_value: f64 = Letter::iter()
            .map(|l| {
                let idx = usize::from(l);
                let probability = unseen[idx] as f64 / total_unseen as f64;
                probability * alphabet.entry(l).point as f64
            })
            .sum();

        let vowels = leave
            .iter()
            .filter(|t| {
                t.letter()
                    .ok()
                    .map(|l| alphabet.entry(l).kind == LetterKind::Vowel)
                    .unwrap_or(false)
            })
            .count();
        let ratio = match leave.is_empty() {
            true => 0.0,
            false => vowels as f64 / leave.len() as f64,
        };
        let balance_factor = match ratio {
            r if (0.3..=0.5).contains(&r) => 1.0,
            r if (0.2..=0.6).contains(&r) => 0.7,
            _ => 0.4,
        };

        let tiles_drawn = tiles_used.min(bag.len()) as f64;

        expected_value * balance_factor * tiles_drawn
    }

    /// No legal placement exists: exchange the least valuable tiles, or
    /// pass if the bag cannot supply a redraw.
    fn fallback(rack: &Rack, bag: &TileBag, alphabet: &Alphabet) -> Play {
        if bag.is_empty() {
            return Play::Pass;
        }

        let mut ranked: Vec<Tile> = rack.iter().collect();
        ranked.sort_by(|&a, &b| {
            Self::sacrificability(a, alphabet)
                .partial_cmp(&Self::sacrificability(b, alphabet))
                .unwrap_or(std::cmp::Ordering::Equal)
                .reverse()
        });

        let redraw_count = ranked.len().min(bag.len()).max(1);
        Play::Redraw(ranked[..redraw_count].to_vec())
    }

    /// Higher values are more willing to give up: common, low-value
    /// letters are sacrificed first; S is kept back, E is cheaply spent.
    fn sacrificability(tile: Tile, alphabet: &Alphabet) -> f64 {
        let Ok(letter) = tile.letter() else {
            return -10.0;
        };

        let entry = alphabet.entry(letter);
        let mut score = entry.frequency * 10.0 - entry.point as f64;

        match char::from(letter) {
            'S' => score -= 5.0,
            'E' => score += 1.0,
            'Q' | 'Z' | 'J' | 'X' => score -= 3.0,
            _ => {}
        }

        score
    }
}
