//! Observable snapshots of [`Game`] state, built after every successful
//! hook and handed to the transport layer to broadcast: `players_meta`
//! (`update-players`/`update-lobby`), `game_meta` (`update-game`),
//! `board_serialization` (`update-board`) and a per-connection
//! `rack_serialization` (`update-racks`, one per connection; a referee
//! connection is sent every player's rack via
//! [`all_racks_serialization`]).
//!
//! `game-message`, the free-form text broadcast, carries no state of
//! its own and so has no type here.

use crate::{
    error::GameResult,
    game::{player::PlayerStatus, tile::Tile, Game, GameOverReason, GameState, PlayerId},
    util::pos::Pos,
};
use serde::{Deserialize, Serialize};

/// A seated player's lobby/turn metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMeta {
    /// The player's id.
    pub id: PlayerId,
    /// The player's display name.
    pub name: String,
    /// Whether this seat is played by the computer.
    pub is_computer: bool,
    /// Whether this player is marked ready in the lobby.
    pub ready: bool,
    /// Waiting for their turn, or currently allowed to act.
    pub status: PlayerStatus,
    /// The player's running score.
    pub score: usize,
    /// The player's current consecutive skip count.
    pub skip_count: usize,
}

/// Builds the `players_meta` broadcast payload: one entry per seated
/// player, in their current turn order.
pub fn players_meta(game: &Game) -> Vec<PlayerMeta> {
    game.players()
        .iter()
        .map(|player| PlayerMeta {
            id: player.id(),
            name: player.name().to_string(),
            is_computer: player.is_computer(),
            ready: player.is_ready(),
            status: player.status(),
            score: player.score(),
            skip_count: player.skip_count(),
        })
        .collect()
}

/// The `game_meta` broadcast payload: which state the game is in, plus
/// the state's observable detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameMeta {
    /// The lobby: players may still join, rename and ready up.
    WaitingForPlayers,
    /// Every player is ready and drawing an order letter.
    PlayerOrderSelection,
    /// The game is running.
    Started {
        /// The player currently allowed to act.
        current: PlayerId,
        /// Tiles remaining in the bag.
        bag_len: usize,
    },
    /// The game has ended.
    Over {
        /// Why the game ended.
        reason: GameOverReason,
        /// Every player's final score.
        scores: Vec<(PlayerId, usize)>,
    },
}

/// Builds the `game_meta` broadcast payload.
pub fn game_meta(game: &Game) -> GameMeta {
    match game.state() {
        GameState::WaitingForPlayers => GameMeta::WaitingForPlayers,
        GameState::PlayerOrderSelection => GameMeta::PlayerOrderSelection,
        GameState::Started => GameMeta::Started {
            current: game
                .current_player()
                .expect("a current player once the game has started"),
            bag_len: game.bag_len(),
        },
        GameState::Over(over) => GameMeta::Over {
            reason: over.reason(),
            scores: over.final_scores().collect(),
        },
    }
}

/// Builds the `update-board` broadcast payload: every square, in
/// row-major order, locked tile or not.
pub fn board_serialization(game: &Game) -> Vec<Option<Tile>> {
    Pos::iter().map(|pos| game.board().at(pos)).collect()
}

/// Builds the `update-racks` payload for one connection: the rack of
/// the player on the other end of it.
pub fn rack_serialization(game: &Game, id: PlayerId) -> GameResult<Vec<Tile>> {
    game.player(id).map(|player| player.rack().iter().collect())
}

/// Builds the referee view of `update-racks`: every seated player's
/// rack, keyed by id.
pub fn all_racks_serialization(game: &Game) -> Vec<(PlayerId, Vec<Tile>)> {
    game.players()
        .iter()
        .map(|player| (player.id(), player.rack().iter().collect()))
        .collect()
}
