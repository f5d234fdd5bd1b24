//! A single seat at the table: its identity, rack, and running score.

use crate::{
    ai::Policy,
    game::{rack::Rack, PlayerId},
};
use serde::{Deserialize, Serialize};

/// Distinguishes a human-controlled seat from a computer opponent, and
/// carries the strategy a computer seat uses to choose its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    /// A human player, whose moves arrive over a hook.
    Human,
    /// A computer player, which chooses moves via `policy` as soon as it
    /// becomes the current player.
    Computer(Policy),
}

/// Whether a seated player is waiting for their turn or currently
/// allowed to act, once the game has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Not this player's turn.
    Waiting,
    /// This player may `submit`, `skip`, `exchange` or `hint`.
    Playing,
}

/// A seat at the table.
#[derive(Debug)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) kind: PlayerKind,
    pub(crate) rack: Rack,
    pub(crate) score: usize,
    pub(crate) skip_count: usize,
    pub(crate) ready: bool,
    pub(crate) order_letter: Option<crate::game::tile::Tile>,
    pub(crate) status: PlayerStatus,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: String, kind: PlayerKind) -> Self {
        Self {
            id,
            name,
            kind,
            rack: Rack::new_with_tiles(&[]),
            score: 0,
            skip_count: 0,
            ready: false,
            order_letter: None,
            status: PlayerStatus::Waiting,
        }
    }
    /// This player's id.
    pub fn id(&self) -> PlayerId {
        self.id
    }
    /// This player's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Human or computer (with its policy).
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }
    /// Whether this seat is played by the computer.
    pub fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer(_))
    }
    /// This player's current rack.
    pub fn rack(&self) -> &Rack {
        &self.rack
    }
    /// This player's running score.
    pub fn score(&self) -> usize {
        self.score
    }
    /// Whether this player is marked ready in the lobby.
    pub fn is_ready(&self) -> bool {
        self.ready
    }
    /// Whether this player is the one currently allowed to act.
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    /// How many times this player has skipped (or been forced to skip)
    /// in a row. Two consecutive skips across every active player ends
    /// the game.
    pub fn skip_count(&self) -> usize {
        self.skip_count
    }
}
