//! Dispatches a deserialized [`Request`] to the session it names and
//! builds the [`Response`], forwarding it to a `GameHandle` — minus the
//! websocket framing and authentication, which live in
//! [`crate::filters`] and are out of scope here respectively.

use crate::{
    interface::{PlacedTile, Push, Request, Response, ServerMessage},
    session::{GameHandle, GameId, Sessions},
};
use futures::{Sink, SinkExt, StreamExt};
use scrabble::{
    dawg::Dawg,
    error::{GameError, GameResult},
    game::{
        board::Board,
        play::Play,
        tile::{Letter, Tile},
        Game,
    },
    util::pos::Pos,
};
use std::fmt::Debug;
use tokio::sync::{broadcast, mpsc};
use warp::ws::{Message, WebSocket};

/// Handles one websocket connection end to end: reads requests,
/// dispatches them, and writes back both the response and any push
/// belonging to the session the connection has joined, until the
/// socket closes. One task owns the socket's write half and forwards
/// both responses and session pushes through an mpsc channel; there is
/// no authentication phase.
pub async fn connected(ws: WebSocket, sessions: Sessions) {
    let (sender, mut receiver) = ws.split();
    let (tx, rx) = mpsc::unbounded_channel::<ServerMessage>();

    let send_task = tokio::spawn(forward_to_socket(sender, rx));
    let mut push_task: Option<tokio::task::JoinHandle<()>> = None;

    while let Some(Ok(msg)) = receiver.next().await {
        if msg.is_close() {
            break;
        }

        let request = match bincode::deserialize::<Request>(msg.as_bytes()) {
            Ok(request) => request,
            Err(e) => {
                log::error!("failed to deserialize request: {e:?}");
                continue;
            }
        };
        let game_id = request_game_id(&request);

        let response = dispatch(&sessions, request).await;

        if push_task.is_none() {
            let subscribe_to = game_id.or_else(|| match &response {
                Response::GameCreated { game_id, .. } => Some(*game_id),
                _ => None,
            });

            if let Some(game_id) = subscribe_to {
                if let Some(handle) = sessions.get(game_id).await {
                    push_task = Some(spawn_push_forwarder(handle.subscribe(), tx.clone()));
                }
            }
        }

        if tx.send(ServerMessage::Response(response)).is_err() {
            break;
        }
    }

    if let Some(task) = push_task {
        task.abort();
    }
    drop(tx);
    if let Err(e) = send_task.await {
        log::error!("failed to join send task: {e:?}");
    }
}

fn request_game_id(request: &Request) -> Option<GameId> {
    match request {
        Request::CreateGame { .. } => None,
        Request::JoinGame { game_id, .. }
        | Request::SetPlayerName { game_id, .. }
        | Request::SetReady { game_id, .. }
        | Request::EnterGame { game_id, .. }
        | Request::RequestOrder { game_id, .. }
        | Request::Submit { game_id, .. }
        | Request::SkipTurn { game_id, .. }
        | Request::ExchangeLetter { game_id, .. }
        | Request::RequestHint { game_id, .. }
        | Request::QuitGame { game_id, .. } => Some(*game_id),
    }
}

fn spawn_push_forwarder(
    mut rx: broadcast::Receiver<Push>,
    tx: mpsc::UnboundedSender<ServerMessage>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(push) if tx.send(ServerMessage::Push(push)).is_ok() => {}
                Ok(_) => break,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    log::warn!("connection lagged, dropped {n} pushes");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

async fn forward_to_socket(
    mut sender: impl Sink<Message> + Unpin,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
) {
    while let Some(msg) = rx.recv().await {
        if send_msg(&mut sender, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_msg<S>(sender: &mut S, msg: &ServerMessage) -> Result<(), ()>
where
    S: Sink<Message> + Unpin,
    S::Error: Debug,
{
    let bytes = bincode::serialize(msg).map_err(|e| log::error!("failed to serialize message: {e:?}"))?;

    sender
        .send(Message::binary(bytes))
        .await
        .map_err(|e| log::error!("failed to send message: {e:?}"))
}

/// Runs one request against the session registry, acquiring the
/// target game's lock for the hook's full duration so that hooks on
/// one game apply in admission order.
pub async fn dispatch(sessions: &Sessions, request: Request) -> Response {
    match request {
        Request::CreateGame { player_types } => create_game(sessions, player_types).await,
        Request::JoinGame { game_id, player_type } => {
            with_game(sessions, game_id, |game| {
                let is_admin = game.players().is_empty();
                game.create_player("player", player_type)
                    .map(|player_id| Response::Joined { player_id, is_admin })
            })
            .await
        }
        Request::SetPlayerName { game_id, player_id, name } => {
            with_game(sessions, game_id, |game| game.set_name(player_id, name).map(|()| Response::Ok)).await
        }
        Request::SetReady { game_id, player_id } => {
            with_game(sessions, game_id, |game| game.set_ready(player_id, true).map(|()| Response::Ok)).await
        }
        Request::EnterGame { game_id, player_id } => {
            with_game(sessions, game_id, |game| game.enter(player_id).map(|()| Response::Ok)).await
        }
        Request::RequestOrder { game_id, player_id } => {
            with_game_dawg(sessions, game_id, |game, dawg| {
                game.request_order(player_id, dawg)
                    .map(|tile| Response::OrderLetter(char::from(tile.letter().unwrap_or_default())))
            })
            .await
        }
        Request::Submit { game_id, player_id, tiles } => {
            with_game_dawg(sessions, game_id, |game, dawg| {
                let positions = match to_tile_positions(&tiles) {
                    Some(positions) => positions,
                    None => return Err(GameError::UnknownLetter),
                };
                game.submit(player_id, positions, dawg).map(|points| Response::Submitted { points })
            })
            .await
        }
        Request::SkipTurn { game_id, player_id } => {
            with_game_dawg(sessions, game_id, |game, dawg| game.skip(player_id, dawg).map(|()| Response::Ok)).await
        }
        Request::ExchangeLetter { game_id, player_id, letter } => {
            with_game_dawg(sessions, game_id, |game, dawg| {
                let tile = match letter {
                    Some(ch) => match Letter::new(ch) {
                        Some(letter) => Tile::Letter(letter),
                        None => return Err(GameError::UnknownLetter),
                    },
                    None => Tile::blank(),
                };
                game.exchange(player_id, tile, dawg).map(|()| Response::Ok)
            })
            .await
        }
        Request::RequestHint { game_id, player_id, letters } => {
            with_game_dawg_readonly(sessions, game_id, |game, dawg| {
                game.player(player_id)?;

                let rack: Vec<Tile> = letters.iter().filter_map(|&ch| Letter::new(ch)).map(Tile::Letter).collect();
                Ok(match game.hint(&rack, dawg) {
                    Some((Play::Place(tiles), score)) => Response::Hint {
                        word: Some(word_text(game.board(), &tiles, dawg)),
                        score,
                    },
                    Some((_, score)) => Response::Hint { word: None, score },
                    None => Response::Hint { word: None, score: 0 },
                })
            })
            .await
        }
        Request::QuitGame { game_id, player_id } => {
            with_game_dawg(sessions, game_id, |game, dawg| game.quit(player_id, dawg).map(|()| Response::Ok)).await
        }
    }
}

async fn with_game<F>(sessions: &Sessions, id: GameId, f: F) -> Response
where
    F: FnOnce(&mut Game) -> GameResult<Response>,
{
    match sessions.get(id).await {
        Some(handle) => {
            let mut game = handle.lock().await;
            let response = f(&mut game).unwrap_or_else(|kind| Response::Error { kind });
            if !matches!(response, Response::Error { .. }) {
                notify_snapshot(&handle, &game);
            }
            response
        }
        None => Response::Error { kind: GameError::NotFound },
    }
}

async fn with_game_dawg<F>(sessions: &Sessions, id: GameId, f: F) -> Response
where
    F: FnOnce(&mut Game, &Dawg) -> GameResult<Response>,
{
    match sessions.get(id).await {
        Some(handle) => {
            let mut game = handle.lock().await;
            let response = f(&mut game, sessions.dawg()).unwrap_or_else(|kind| Response::Error { kind });
            if !matches!(response, Response::Error { .. }) {
                notify_snapshot(&handle, &game);
            }
            response
        }
        None => Response::Error { kind: GameError::NotFound },
    }
}

/// Like [`with_game_dawg`], but for hooks that never mutate the game
/// (only [`Request::RequestHint`]): no snapshot is pushed afterwards.
async fn with_game_dawg_readonly<F>(sessions: &Sessions, id: GameId, f: F) -> Response
where
    F: FnOnce(&Game, &Dawg) -> GameResult<Response>,
{
    match sessions.get(id).await {
        Some(handle) => {
            let game = handle.lock().await;
            f(&game, sessions.dawg()).unwrap_or_else(|kind| Response::Error { kind })
        }
        None => Response::Error { kind: GameError::NotFound },
    }
}

/// Pushes the `update-players`/`update-game`/`update-board`/
/// `update-racks` snapshots to every connection on this session.
/// `RequestHint` never reaches here: it never mutates the game, so its
/// own caller pushes nothing.
fn notify_snapshot(handle: &GameHandle, game: &Game) {
    handle.notify(Push::Players(scrabble::broadcast::players_meta(game)));
    handle.notify(Push::Game(scrabble::broadcast::game_meta(game)));
    handle.notify(Push::Board(scrabble::broadcast::board_serialization(game)));
    handle.notify(Push::Racks(scrabble::broadcast::all_racks_serialization(game)));
}

async fn create_game(sessions: &Sessions, player_types: Vec<scrabble::game::player::PlayerKind>) -> Response {
    if player_types.is_empty() {
        return Response::Error { kind: GameError::StateViolation };
    }

    let (game_id, handle) = sessions.create(scrabble::alphabet::Alphabet::default()).await;
    let mut game = handle.lock().await;

    let mut admin_player_id = None;
    for (i, kind) in player_types.into_iter().enumerate() {
        match game.create_player(format!("player {}", i + 1), kind) {
            Ok(id) => {
                admin_player_id.get_or_insert(id);
            }
            Err(kind) => return Response::Error { kind },
        }
    }

    notify_snapshot(&handle, &game);

    Response::GameCreated {
        game_id,
        admin_player_id: admin_player_id.expect("at least one player was seated"),
    }
}

fn to_tile_positions(tiles: &[PlacedTile]) -> Option<Vec<(Pos, Tile)>> {
    tiles.iter().map(|placed| to_tile(placed).map(|tile| (placed.location, tile))).collect()
}

fn to_tile(placed: &PlacedTile) -> Option<Tile> {
    let letter = Letter::new(placed.letter)?;
    Some(match placed.is_blank {
        true => Tile::Blank(Some(letter)),
        false => Tile::Letter(letter),
    })
}

/// Spells out the word a hinted placement would form, by replaying it
/// on a scratch copy of the board and reading back whichever word on
/// the board covers the new tiles. The hinted play never mutates
/// `board` itself.
fn word_text(board: &Board, tiles: &[(Pos, Tile)], dawg: &Dawg) -> String {
    let mut scratch = board.clone();
    if scratch.make_placement(tiles, dawg).is_err() {
        return String::new();
    }

    let new_positions: Vec<Pos> = tiles.iter().map(|&(pos, _)| pos).collect();
    scratch
        .words()
        .find(|word| word.into_iter().any(|pos| new_positions.contains(&pos)))
        .map(|word| {
            word.into_iter()
                .filter_map(|pos| scratch.at(pos))
                .map(|tile| tile.letter().ok().map(char::from).unwrap_or('?'))
                .collect()
        })
        .unwrap_or_default()
}
