//! The transport-agnostic request surface: one [`Request`] variant per
//! hook on [`scrabble::game::Game`], and the [`Response`] it produces.
//! `filters`/`handlers` are the only part of this crate that know these
//! travel over a websocket.

use crate::session::GameId;
use scrabble::{
    broadcast::{GameMeta, PlayerMeta},
    error::GameError,
    game::{player::PlayerKind, tile::Tile, PlayerId},
    util::pos::Pos,
};
use serde::{Deserialize, Serialize};

/// One tile placed as part of a [`Request::Submit`]. `tile_id`
/// distinguishes otherwise-identical blanks across a client's UI; the
/// engine itself disambiguates placements by `location` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedTile {
    /// The letter played (the chosen letter, for a blank).
    pub letter: char,
    /// Whether this tile is a blank standing in for `letter`.
    pub is_blank: bool,
    /// Column letter + 1-based row number, e.g. `H8`.
    pub location: Pos,
    /// Client-assigned id, stable across a blank's lifetime on the UI.
    pub tile_id: u32,
}

/// A request made of one session. Every variant that is not
/// `CreateGame`/`JoinGame` is scoped to a `game_id` the transport layer
/// has already resolved to a [`GameId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Request {
    /// Creates a new, empty session.
    CreateGame {
        /// The kind of seat for each initial player.
        player_types: Vec<PlayerKind>,
    },
    /// Joins an existing session.
    JoinGame {
        /// The game to join.
        game_id: GameId,
        /// Human or computer.
        player_type: PlayerKind,
    },
    /// Renames a seated player.
    SetPlayerName {
        /// The game to act on.
        game_id: GameId,
        /// The player being renamed.
        player_id: PlayerId,
        /// The new display name.
        name: String,
    },
    /// Marks a seated player ready.
    SetReady {
        /// The game to act on.
        game_id: GameId,
        /// The player readying up.
        player_id: PlayerId,
    },
    /// Confirms a player is seated, for a view redirect.
    EnterGame {
        /// The game to act on.
        game_id: GameId,
        /// The player entering.
        player_id: PlayerId,
    },
    /// Draws this player's order letter.
    RequestOrder {
        /// The game to act on.
        game_id: GameId,
        /// The player drawing.
        player_id: PlayerId,
    },
    /// Places tiles on the board.
    Submit {
        /// The game to act on.
        game_id: GameId,
        /// The player submitting.
        player_id: PlayerId,
        /// The tiles placed.
        tiles: Vec<PlacedTile>,
    },
    /// Forfeits the current turn.
    SkipTurn {
        /// The game to act on.
        game_id: GameId,
        /// The player skipping.
        player_id: PlayerId,
    },
    /// Exchanges one rack letter.
    ExchangeLetter {
        /// The game to act on.
        game_id: GameId,
        /// The player exchanging.
        player_id: PlayerId,
        /// The letter to exchange (`None` for a blank).
        letter: Option<char>,
    },
    /// Asks for the top-scoring move against a synthetic rack.
    RequestHint {
        /// The game to act on.
        game_id: GameId,
        /// The player requesting the hint.
        player_id: PlayerId,
        /// The synthetic rack to search with.
        letters: Vec<char>,
    },
    /// Leaves a session.
    QuitGame {
        /// The game to act on.
        game_id: GameId,
        /// The player leaving.
        player_id: PlayerId,
    },
}

/// The result of a [`Request`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Response {
    /// A session was created.
    GameCreated {
        /// Its id.
        game_id: GameId,
        /// The id of the admin (first) player.
        admin_player_id: PlayerId,
    },
    /// A player joined a session.
    Joined {
        /// The new player's id.
        player_id: PlayerId,
        /// Whether this player is the session's admin.
        is_admin: bool,
    },
    /// A hook with no data beyond success completed.
    Ok,
    /// An order-selection letter was drawn.
    OrderLetter(char),
    /// A submission was accepted, with its score. `points > 0` always
    /// holds for an accepted submission.
    Submitted {
        /// Points scored by the play.
        points: usize,
    },
    /// A hint was computed. `None` if no legal move exists.
    Hint {
        /// The top-scoring word found, if any.
        word: Option<String>,
        /// Its score.
        score: usize,
    },
    /// The request failed.
    Error {
        /// Why.
        kind: GameError,
    },
}

/// Pushed to every connection on a session after a hook changes its
/// state, in the order the hook committed them. A referee connection
/// is the only one to see `Racks` for players other than itself; an
/// ordinary player connection should show itself only the entry for
/// its own id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Push {
    /// `update-lobby` / `update-players`: the seated players changed.
    Players(Vec<PlayerMeta>),
    /// `update-game`: the game's state or current player changed.
    Game(GameMeta),
    /// `update-board`: a tile was placed.
    Board(Vec<Option<Tile>>),
    /// `update-racks`: one or more racks changed.
    Racks(Vec<(PlayerId, Vec<Tile>)>),
    /// `game-message`: a free-form notice, e.g. a play's formed word.
    Message(String),
}

/// Envelope for everything the server ever writes to a connection: the
/// reply to the request that was just made, or a push belonging to
/// whichever session that connection has joined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    /// The answer to the request just made.
    Response(Response),
    /// An out-of-band update to the joined session.
    Push(Push),
}
