//! Module for error handling.

use scrabble::error::GameError;

/// The library result type.
pub type Result<T> = std::result::Result<T, Error>;

impl warp::reject::Reject for Error {}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Self::Bincode(err)
    }
}
impl From<GameError> for Error {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

/// The library error type.
#[derive(Debug)]
pub enum Error {
    /// Error serializing or deserializing a message.
    Bincode(bincode::Error),
    /// A hook on the game engine failed.
    Game(GameError),
    /// No session exists with the given id.
    SessionNotFound,
    /// The websocket connection closed before an auth/join message
    /// was received.
    ConnectionClosed,
}
