//! The session registry: maps session ids to locked, shared game
//! handles — one registry lock guarding a map of per-game locks, plus a
//! background task that periodically closes finished games.

use crate::interface::Push;
use scrabble::{alphabet::Alphabet, dawg::Dawg, game::Game};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, ops::Deref, sync::Arc, time::Duration};
use tokio::sync::{broadcast, Mutex, RwLock};

/// Bound on a session's broadcast channel; a connection that falls
/// this far behind starts missing pushes rather than blocking others.
const BROADCAST_CAPACITY: usize = 64;

/// How often the reaper sweeps for sessions that reached `GAME_OVER`.
const REAP_PERIOD: Duration = Duration::from_secs(60);

/// Identifies one session (game) in the registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct GameId(u64);

/// A thread-safe handle to one session's [`Game`]. Every request hook
/// acquires this lock for its full duration, so hooks on one game
/// apply in the order they are admitted to it, and pushes sent after a
/// hook returns (but before the lock is released) are seen by clients
/// in that same order.
#[derive(Clone)]
pub struct GameHandle {
    game: Arc<Mutex<Game>>,
    pushes: broadcast::Sender<Push>,
}
impl From<Game> for GameHandle {
    fn from(game: Game) -> Self {
        let (pushes, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            game: Arc::new(Mutex::new(game)),
            pushes,
        }
    }
}
impl Deref for GameHandle {
    type Target = Mutex<Game>;

    fn deref(&self) -> &Self::Target {
        self.game.deref()
    }
}
impl GameHandle {
    /// Subscribes to this session's pushes; dropped connections simply
    /// let their receiver lag and eventually miss old messages.
    pub fn subscribe(&self) -> broadcast::Receiver<Push> {
        self.pushes.subscribe()
    }
    /// Sends a push to every subscribed connection. A send with no
    /// subscribers is not an error: nobody is listening yet.
    pub fn notify(&self, push: Push) {
        let _ = self.pushes.send(push);
    }
}

struct Inner {
    games: HashMap<GameId, GameHandle>,
    next_id: u64,
}

/// Every session currently live on this server, plus the one resource
/// they all share read-only: the lexicon.
#[derive(Clone)]
pub struct Sessions {
    dawg: Arc<Dawg>,
    inner: Arc<RwLock<Inner>>,
}
impl Sessions {
    /// Creates an empty registry backed by `dawg`, and spawns the
    /// background task that periodically reaps finished sessions.
    pub fn new(dawg: Arc<Dawg>) -> Self {
        let sessions = Self {
            dawg,
            inner: Arc::new(RwLock::new(Inner {
                games: HashMap::new(),
                next_id: 0,
            })),
        };

        tokio::spawn({
            let sessions = sessions.clone();
            async move {
                let mut interval = tokio::time::interval(REAP_PERIOD);

                loop {
                    interval.tick().await;
                    sessions.reap().await;
                }
            }
        });

        sessions
    }
    /// The lexicon shared read-only across every session.
    pub fn dawg(&self) -> &Dawg {
        &self.dawg
    }
    /// Creates a new, empty session and registers it.
    pub async fn create(&self, alphabet: Alphabet) -> (GameId, GameHandle) {
        let mut inner = self.inner.write().await;

        let id = GameId(inner.next_id);
        inner.next_id += 1;

        let handle = GameHandle::from(Game::new(alphabet));
        inner.games.insert(id, handle.clone());

        (id, handle)
    }
    /// Looks up a session's handle.
    pub async fn get(&self, id: GameId) -> Option<GameHandle> {
        self.inner.read().await.games.get(&id).cloned()
    }
    /// Removes every session that has reached `GAME_OVER`.
    async fn reap(&self) {
        let mut inner = self.inner.write().await;
        let mut finished = vec![];

        for (&id, handle) in inner.games.iter() {
            if handle.lock().await.state().is_over() {
                finished.push(id);
            }
        }

        for id in finished {
            log::info!("reaping finished session: {id:?}");
            inner.games.remove(&id);
        }
    }
}
