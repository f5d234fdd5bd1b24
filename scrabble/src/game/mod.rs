//! Module for handling abstract game representation and player
//! interaction (uncoupled from DB, UI and API).
//!
//! Game logic is shared between the client and server, so that
//! API calls can be minimised, (only for actually making moves)
//! by performing the majority of validation on the client side.
//! The types exposed in this module are also useful for modelling
//! state for the UI.
//!
//! [`Game`] is the lobby/order-selection/turn-rotation state machine: it
//! owns the board, bag and seated players, and every mutating hook
//! (`create_player`, `set_ready`, `request_order`, `submit`, `skip`,
//! `exchange`, `kick`) takes it through `WaitingForPlayers` →
//! `PlayerOrderSelection` → `Started` → `Over`.

use crate::{
    ai::{movegen::Moves, Policy},
    alphabet::Alphabet,
    dawg::Dawg,
    error::{GameError, GameResult, InvalidPlacementReason},
    game::{
        board::Board,
        play::Play,
        player::{Player, PlayerKind, PlayerStatus},
        tile::{Letter, Tile},
        tile_bag::TileBag,
    },
    util::pos::Pos,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod board;
pub mod play;
pub mod player;
pub mod rack;
pub mod tile;
pub mod tile_bag;

/// Identifies a seat at the table. Stable for the lifetime of the game,
/// even as other players join, are kicked or quit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PlayerId(usize);

impl From<PlayerId> for usize {
    fn from(PlayerId(num): PlayerId) -> Self {
        num
    }
}

/// The current state of the game.
#[derive(Debug, Clone)]
pub enum GameState {
    /// The lobby: players may join, rename themselves and mark ready.
    WaitingForPlayers,
    /// Every seated player is ready; each draws a letter to settle
    /// turn order.
    PlayerOrderSelection,
    /// The game is in progress; `submit`/`skip`/`exchange`/`hint` are
    /// the only hooks that act on the board.
    Started,
    /// The game has ended. Only broadcasts are emitted from here on.
    Over(GameOver),
}
impl GameState {
    /// Checks whether the game is over.
    pub fn is_over(&self) -> bool {
        matches!(self, GameState::Over(_))
    }
}

/// Stores the final scores and the outcome of the game.
#[derive(Clone, Debug)]
pub struct GameOver {
    scores: Vec<(PlayerId, usize)>,
    max_score: usize,
    reason: GameOverReason,
}
impl GameOver {
    /// Gets the final score for a particular player.
    pub fn score(&self, id: PlayerId) -> Option<usize> {
        self.scores.iter().find(|&&(p, _)| p == id).map(|&(_, s)| s)
    }
    /// Gets the maximum score achieved.
    pub fn max_score(&self) -> usize {
        self.max_score
    }
    /// Gets the reason that the game ended.
    pub fn reason(&self) -> GameOverReason {
        self.reason
    }
    /// Gets an iterator over the winning players.
    pub fn winners(&self) -> impl Iterator<Item = (PlayerId, usize)> + '_ {
        self.final_scores().filter(move |&(_, score)| score == self.max_score)
    }
    /// Gets an iterator over the losing players.
    pub fn losers(&self) -> impl Iterator<Item = (PlayerId, usize)> + '_ {
        self.final_scores().filter(move |&(_, score)| score < self.max_score)
    }
    /// Gets an iterator over (player id, score) tuples.
    pub fn final_scores(&self) -> impl Iterator<Item = (PlayerId, usize)> + '_ {
        self.scores.iter().copied()
    }
}

/// The reason that the game has ended.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum GameOverReason {
    /// A player has emptied their rack with no letters remaining in the bag.
    EmptyRack,
    /// Every active player's skip count reached 2.
    AllPlayersSkipped,
    /// Enough players quit or were kicked that one or none remain.
    InsufficientPlayers,
}

/// Top level struct allowing for management of the entire game.
/// Manages players, all state, and determines when the game is over,
/// calculating scores and determining the winner.
#[derive(Debug)]
pub struct Game {
    alphabet: Alphabet,
    board: Board,
    bag: TileBag,
    players: Vec<Player>,
    next_id: usize,
    current: usize,
    state: GameState,
    /// Letters already drawn by [`Game::request_order`]; disjoint from
    /// the bag itself, and never re-issued to another player.
    picked_for_order: HashSet<Letter>,
}

impl Game {
    /// Constructs a new, empty [`Game`] in `WaitingForPlayers`, with a
    /// full bag drawn from `alphabet`'s distribution.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            bag: TileBag::new(&alphabet),
            alphabet,
            board: Board::default(),
            players: vec![],
            next_id: 0,
            current: 0,
            state: GameState::WaitingForPlayers,
            picked_for_order: HashSet::new(),
        }
    }

    /// The current state of the game.
    pub fn state(&self) -> &GameState {
        &self.state
    }
    /// Borrows the board.
    pub fn board(&self) -> &Board {
        &self.board
    }
    /// The number of tiles left in the bag.
    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }
    /// The seated players, in turn order once the game has started.
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    /// Looks up a seated player by id.
    pub fn player(&self, id: PlayerId) -> GameResult<&Player> {
        self.index_of(id).map(|idx| &self.players[idx])
    }
    /// The player currently allowed to act, once the game has started.
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.state {
            GameState::Started => Some(self.players[self.current].id),
            _ => None,
        }
    }

    /// Seats a new player. Only valid in `WaitingForPlayers`.
    pub fn create_player(&mut self, name: impl Into<String>, kind: PlayerKind) -> GameResult<PlayerId> {
        if !matches!(self.state, GameState::WaitingForPlayers) {
            return Err(GameError::StateViolation);
        }

        let id = PlayerId(self.next_id);
        self.next_id += 1;

        let mut player = Player::new(id, name.into(), kind);
        // A computer seat has no lobby UI to tick "ready" in, so it
        // starts ready.
        player.ready = matches!(kind, PlayerKind::Computer(_));
        self.players.push(player);

        Ok(id)
    }
    /// Renames a seated player. Only valid in `WaitingForPlayers`.
    pub fn set_name(&mut self, id: PlayerId, name: impl Into<String>) -> GameResult<()> {
        if !matches!(self.state, GameState::WaitingForPlayers) {
            return Err(GameError::StateViolation);
        }
        let idx = self.index_of(id)?;
        self.players[idx].name = name.into();
        Ok(())
    }
    /// Marks a seated player ready (or not). Once every seated player is
    /// ready, the game advances to `PlayerOrderSelection`.
    pub fn set_ready(&mut self, id: PlayerId, ready: bool) -> GameResult<()> {
        if !matches!(self.state, GameState::WaitingForPlayers) {
            return Err(GameError::StateViolation);
        }
        let idx = self.index_of(id)?;
        self.players[idx].ready = ready;

        if !self.players.is_empty() && self.players.iter().all(Player::is_ready) {
            self.state = GameState::PlayerOrderSelection;
        }
        Ok(())
    }
    /// Confirms a player is seated in this game; used to redirect a
    /// client into the game view.
    pub fn enter(&self, id: PlayerId) -> GameResult<()> {
        self.index_of(id).map(|_| ())
    }
    /// Removes a seated player. In `WaitingForPlayers` this is a plain
    /// removal; kicking the current player during `Started` synthesises
    /// a skip first, so turn rotation (and any following computer
    /// turns) continues normally.
    pub fn kick(&mut self, id: PlayerId, dawg: &Dawg) -> GameResult<()> {
        match self.state {
            GameState::WaitingForPlayers => {
                let idx = self.index_of(id)?;
                self.players.remove(idx);
                Ok(())
            }
            GameState::Started => {
                let idx = self.index_of(id)?;
                if idx == self.current {
                    self.players[idx].skip_count += 1;
                    self.advance(dawg)?;
                }
                self.remove_player_index(idx);
                Ok(())
            }
            _ => Err(GameError::StateViolation),
        }
    }
    /// A player leaving of their own accord; same mechanics as `kick`.
    pub fn quit(&mut self, id: PlayerId, dawg: &Dawg) -> GameResult<()> {
        self.kick(id, dawg)
    }

    /// Draws this player's order letter. Once every seated player has
    /// one, racks are filled, players are sorted by letter and the game
    /// advances to `Started`.
    pub fn request_order(&mut self, id: PlayerId, dawg: &Dawg) -> GameResult<Tile> {
        if !matches!(self.state, GameState::PlayerOrderSelection) {
            return Err(GameError::StateViolation);
        }
        let idx = self.index_of(id)?;
        if self.players[idx].order_letter.is_some() {
            return Err(GameError::StateViolation);
        }

        let tile = TileBag::draw_for_order(&self.alphabet, &mut self.picked_for_order).map_err(|e| {
            log::warn!("order-letter pool exhausted for player {id:?}");
            e
        })?;
        self.players[idx].order_letter = Some(tile);

        if self.players.iter().all(|p| p.order_letter.is_some()) {
            self.start_game(dawg)?;
        }

        Ok(tile)
    }

    /// Places tiles on the board on behalf of the current player.
    /// Rejects a zero-score result (a legal-but-pointless play, such as
    /// a word formed entirely of blanks) the same way an out-of-
    /// dictionary word is rejected.
    pub fn submit(&mut self, id: PlayerId, tiles: Vec<(Pos, Tile)>, dawg: &Dawg) -> GameResult<usize> {
        let idx = self.require_current_player(id)?;

        if !self.players[idx].rack.contains(tiles.iter().map(|&(_, t)| t)) {
            return Err(GameError::InvalidPlacement(InvalidPlacementReason::NotInRack));
        }

        let score = self.board.make_placement(&tiles, dawg)?;
        if score == 0 {
            let positions: Vec<Pos> = tiles.iter().map(|&(pos, _)| pos).collect();
            self.board.undo_placement(&positions);
            return Err(GameError::LexiconReject);
        }

        let player = &mut self.players[idx];
        player.score += score;
        player.rack.remove(tiles.iter().map(|&(_, t)| t));
        player.rack.refill(&mut self.bag);
        player.skip_count = 0;

        self.advance(dawg)?;
        Ok(score)
    }
    /// Forfeits the current player's turn.
    pub fn skip(&mut self, id: PlayerId, dawg: &Dawg) -> GameResult<()> {
        let idx = self.require_current_player(id)?;
        self.players[idx].skip_count += 1;
        self.advance(dawg)
    }
    /// Exchanges one rack tile for a fresh draw; consumes the turn.
    pub fn exchange(&mut self, id: PlayerId, letter: Tile, dawg: &Dawg) -> GameResult<()> {
        let idx = self.require_current_player(id)?;
        self.players[idx].rack.exchange_tiles(&[letter], &mut self.bag)?;
        self.players[idx].skip_count += 1;
        self.advance(dawg)
    }
    /// Runs the move generator against a synthetic rack built from
    /// `letters`, returning the top-scoring candidate. Does not mutate
    /// the game.
    pub fn hint(&self, letters: &[Tile], dawg: &Dawg) -> Option<(Play, usize)> {
        let rack = rack::Rack::new_with_tiles(letters);
        Moves::new(dawg, &self.board, &rack)
            .moves()
            .into_iter()
            .max_by_key(|&(_, score)| score)
    }

    fn require_current_player(&self, id: PlayerId) -> GameResult<usize> {
        if !matches!(self.state, GameState::Started) {
            return Err(GameError::StateViolation);
        }
        let idx = self.index_of(id)?;
        match idx == self.current {
            true => Ok(idx),
            false => Err(GameError::TurnViolation),
        }
    }
    fn index_of(&self, id: PlayerId) -> GameResult<usize> {
        self.players.iter().position(|p| p.id == id).ok_or(GameError::NotFound)
    }

    fn start_game(&mut self, dawg: &Dawg) -> GameResult<()> {
        for player in &mut self.players {
            player.rack.refill(&mut self.bag);
        }
        self.players.sort_by_key(|p| p.order_letter);
        for (i, player) in self.players.iter_mut().enumerate() {
            player.status = match i {
                0 => PlayerStatus::Playing,
                _ => PlayerStatus::Waiting,
            };
        }
        self.current = 0;
        self.state = GameState::Started;
        log::debug!("game started with {} players", self.players.len());

        if let PlayerKind::Computer(policy) = self.players[0].kind {
            self.run_computer_turn(policy, dawg)?;
        }
        Ok(())
    }

    /// Checks the termination conditions and, if met, computes final
    /// scores; otherwise rotates to the next player, playing out any
    /// consecutive computer turns immediately.
    fn advance(&mut self, dawg: &Dawg) -> GameResult<()> {
        if self.check_game_over() {
            self.finish();
            return Ok(());
        }

        self.players[self.current].status = PlayerStatus::Waiting;
        self.current = (self.current + 1) % self.players.len();
        self.players[self.current].status = PlayerStatus::Playing;

        if self.check_game_over() {
            self.finish();
            return Ok(());
        }

        if let PlayerKind::Computer(policy) = self.players[self.current].kind {
            self.run_computer_turn(policy, dawg)?;
        }
        Ok(())
    }

    fn run_computer_turn(&mut self, policy: Policy, dawg: &Dawg) -> GameResult<()> {
        let idx = self.current;
        let play = policy.choose(
            dawg,
            &self.board,
            &self.players[idx].rack,
            &self.bag,
            &self.alphabet,
        );

        match play {
            Play::Pass => {
                self.players[idx].skip_count += 1;
                self.advance(dawg)
            }
            Play::Redraw(tiles) => {
                self.players[idx].rack.exchange_tiles(&tiles, &mut self.bag)?;
                self.players[idx].skip_count += 1;
                self.advance(dawg)
            }
            Play::Place(tiles) => match self.board.make_placement(&tiles, dawg) {
                Ok(0) => {
                    let positions: Vec<Pos> = tiles.iter().map(|&(pos, _)| pos).collect();
                    self.board.undo_placement(&positions);
                    self.players[idx].skip_count += 1;
                    self.advance(dawg)
                }
                Ok(score) => {
                    let player = &mut self.players[idx];
                    player.score += score;
                    player.rack.remove(tiles.iter().map(|&(_, t)| t));
                    player.rack.refill(&mut self.bag);
                    player.skip_count = 0;
                    self.advance(dawg)
                }
                // The policy only proposes candidates from the move
                // generator, so a rejection here means the board moved
                // under it unexpectedly; skip rather than wedge the game.
                Err(_) => {
                    self.players[idx].skip_count += 1;
                    self.advance(dawg)
                }
            },
        }
    }

    fn remove_player_index(&mut self, idx: usize) {
        self.players.remove(idx);

        if self.players.is_empty() {
            self.finish();
            return;
        }
        if idx < self.current {
            self.current -= 1;
        } else if idx == self.current {
            self.current %= self.players.len();
        }

        if matches!(self.state, GameState::Started) && self.check_game_over() {
            self.finish();
        }
    }

    fn check_game_over(&self) -> bool {
        if self.players.len() <= 1 {
            return true;
        }
        if self.bag.is_empty() && self.players.iter().any(|p| p.rack.is_empty()) {
            return true;
        }
        if self.players.iter().all(|p| p.skip_count >= 2) {
            return true;
        }
        false
    }

    fn finish(&mut self) {
        let reason = if self.players.len() <= 1 {
            GameOverReason::InsufficientPlayers
        } else if self.players.iter().any(|p| p.rack.is_empty()) {
            GameOverReason::EmptyRack
        } else {
            GameOverReason::AllPlayersSkipped
        };

        let mut scores: Vec<(PlayerId, usize)> = Vec::with_capacity(self.players.len());
        let mut rack_sum_total = 0;
        for player in &self.players {
            let rack_sum = player.rack.tile_sum(Tile::score);
            scores.push((player.id, player.score.saturating_sub(rack_sum)));
            rack_sum_total += rack_sum;
        }

        if let GameOverReason::EmptyRack = reason {
            if let Some(pos) = self.players.iter().position(|p| p.rack.is_empty()) {
                scores[pos].1 += rack_sum_total;
            }
        }

        let max_score = scores.iter().map(|&(_, s)| s).max().unwrap_or(0);
        log::debug!("game over ({reason:?}), max score {max_score}");
        self.state = GameState::Over(GameOver { scores, max_score, reason });
    }
}
