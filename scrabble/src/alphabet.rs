//! Describes the tiles available in a language: how many of each letter,
//! what each letter scores, and how common each letter is (used by the
//! computer policy's future-value estimate).

use crate::game::tile::{Letter, Tile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The category a tile belongs to, used by the computer policy's
/// vowel/consonant balance term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterKind {
    /// A, E, I, O, U.
    Vowel,
    /// Everything else.
    Consonant,
}

/// Per-letter facts: how many copies ship in the bag, how many points it
/// scores, whether it counts as a vowel or consonant, and its relative
/// frequency (`count / total_tiles`), cached so the computer policy does
/// not recompute it on every turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphabetEntry {
    /// Number of copies of the letter in a full bag.
    pub count: usize,
    /// The tile's face value.
    pub point: usize,
    /// Vowel or consonant.
    pub kind: LetterKind,
    /// `count` divided by the total number of (non-blank) tiles.
    pub frequency: f64,
}

/// The set of letters playable in a given language, plus the blank.
#[derive(Debug, Clone)]
pub struct Alphabet {
    entries: HashMap<Letter, AlphabetEntry>,
    blank_count: usize,
}

const VOWELS: &str = "AEIOU";

impl Default for Alphabet {
    /// The standard English Scrabble distribution, reproducing the point
    /// and count tables used throughout the engine.
    fn default() -> Self {
        const COUNTS: [usize; 26] = [
            9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1,
        ];
        const POINTS: [usize; 26] = [
            1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
        ];

        let total: usize = COUNTS.iter().sum();
        let mut entries = HashMap::with_capacity(26);

        for letter in Letter::iter() {
            let idx: usize = letter.into();
            let ch = char::from(letter);
            let kind = match VOWELS.contains(ch) {
                true => LetterKind::Vowel,
                false => LetterKind::Consonant,
            };

            entries.insert(
                letter,
                AlphabetEntry {
                    count: COUNTS[idx],
                    point: POINTS[idx],
                    kind,
                    frequency: COUNTS[idx] as f64 / total as f64,
                },
            );
        }

        Self {
            entries,
            blank_count: 2,
        }
    }
}

impl Alphabet {
    /// Looks up the static facts for a letter.
    pub fn entry(&self, letter: Letter) -> AlphabetEntry {
        self.entries[&letter]
    }
    /// The number of blanks in a full bag.
    pub fn blank_count(&self) -> usize {
        self.blank_count
    }
    /// The score of a tile under this alphabet (blanks score zero).
    pub fn score(&self, tile: Tile) -> usize {
        match tile.letter() {
            Ok(letter) if !tile.is_blank() => self.entry(letter).point,
            _ => 0,
        }
    }
    /// Iterates over every letter (not the blank) in the alphabet.
    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.entries.keys().copied()
    }
}

/// Names a specific language's lexicon and tile distribution. Only
/// English ships with this crate, but nothing here is English-specific.
#[derive(Debug, Clone)]
pub struct Language {
    /// Human readable name, e.g. `"English"`.
    pub name: String,
    /// The tile distribution for this language.
    pub alphabet: Alphabet,
    /// Location of the encoded DAWG for this language's word list.
    pub dawg_uri: String,
}

impl Language {
    /// The default English language, backed by `alphabet::Alphabet::default`.
    pub fn english(dawg_uri: impl Into<String>) -> Self {
        Self {
            name: "English".to_string(),
            alphabet: Alphabet::default(),
            dawg_uri: dawg_uri.into(),
        }
    }
}
