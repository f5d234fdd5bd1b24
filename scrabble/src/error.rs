//! The error and result types for the library.

use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// The [`Result`] type used throughout the [`game`](super::game) and
/// [`dawg`](super::dawg) modules.
pub type GameResult<T> = std::result::Result<T, GameError>;

/// Error taxonomy for the engine. Every player-facing hook returns one
/// of these rather than panicking; only [`GameError::EngineFault`]
/// causes a running game to transition to `GAME_OVER`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameError {
    /// No game or player exists with the given id.
    NotFound,
    /// The hook is not valid for the game's current state (includes
    /// attempting a play once the game is over).
    StateViolation,
    /// The caller is not the current player.
    TurnViolation,
    /// The placement is off-board, overlaps a locked tile, is not
    /// connected, misses the opening center square, or the rack does
    /// not contain the required tiles.
    InvalidPlacement(InvalidPlacementReason),
    /// One or more formed words were not in the dictionary; the play
    /// scores zero and is rejected.
    LexiconReject,
    /// A draw was required but the bag (or order pool) is empty.
    Exhausted,
    /// The dictionary binary was malformed.
    CorruptDictionary,
    /// A letter outside the alphabet was used in a query.
    UnknownLetter,
    /// A blank tile on the board had no chosen letter.
    MissingLetter,
    /// An internal invariant was violated. The game is forced into
    /// `GAME_OVER` when this is returned.
    EngineFault(&'static str),
}

/// Specific reasons a placement can be rejected, kept distinct from
/// [`GameError::InvalidPlacement`]'s sibling variants so that callers
/// can give a precise message without string-matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum InvalidPlacementReason {
    /// The letter bag does not contain enough letters to redraw the requested tiles.
    NotEnoughLetters,
    /// Attempted to play a tile which was not in the player's rack.
    NotInRack,
    /// Expected at least one and no more than 7 tiles to place.
    PlacementCount,
    /// The tiles added during a play would have overlaid existing tiles.
    CoincidentTiles,
    /// At least one pair of tiles added during a play share a square.
    DuplicatePosition,
    /// At least one and no more than the rack size may be redrawn.
    RedrawCount,
    /// The opening play must cover the center square.
    MustIntersectStart,
    /// Every word needs at least two letters.
    WordsNeedTwoLetters,
    /// Every tile should have a neighbour above, below, left or right.
    NotConnected,
    /// Placed tiles must share a common row or column.
    NoCommonLine,
}

impl Error for GameError {}
impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotFound => write!(f, "no game or player exists with that id"),
            GameError::StateViolation => write!(f, "that hook cannot be used in the current state"),
            GameError::TurnViolation => write!(f, "it is not that player's turn"),
            GameError::InvalidPlacement(reason) => write!(f, "{reason}"),
            GameError::LexiconReject => write!(f, "one or more formed words were not in the dictionary"),
            GameError::Exhausted => write!(f, "no tiles remain to draw"),
            GameError::CorruptDictionary => write!(f, "the dictionary file was malformed"),
            GameError::UnknownLetter => write!(f, "letter is outside the alphabet"),
            GameError::MissingLetter => {
                write!(f, "a blank tile placed on the board did not specify a letter")
            }
            GameError::EngineFault(msg) => write!(f, "internal invariant violated: {msg}"),
        }
    }
}
impl fmt::Display for InvalidPlacementReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                InvalidPlacementReason::NotEnoughLetters =>
                    "there are not enough letters in the bag to redraw",
                InvalidPlacementReason::NotInRack => "one or more placed tiles were not in the rack",
                InvalidPlacementReason::PlacementCount =>
                    "at least 1 and no more than 7 tiles can be placed",
                InvalidPlacementReason::CoincidentTiles => "tiles were placed over existing tiles",
                InvalidPlacementReason::DuplicatePosition =>
                    "multiple tiles were placed on the same square",
                InvalidPlacementReason::RedrawCount =>
                    "at least 1 and up to the rack size can be redrawn",
                InvalidPlacementReason::MustIntersectStart =>
                    "the opening play must cover the center square",
                InvalidPlacementReason::WordsNeedTwoLetters => "words need at least 2 letters",
                InvalidPlacementReason::NotConnected => "placed tiles are not connected to the board",
                InvalidPlacementReason::NoCommonLine =>
                    "placed tiles must share a common row or column",
            }
        )
    }
}
