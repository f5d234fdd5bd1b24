//! Warp route wiring: one websocket upgrade route per session, minus
//! the authentication handshake (out of scope here).

use crate::{handlers, session::Sessions};
use std::convert::Infallible;
use warp::{filters::BoxedFilter, ws::Ws, Filter, Rejection, Reply};

/// The server's one route: `GET /live`, upgraded to a websocket.
pub fn all(sessions: Sessions) -> BoxedFilter<(impl Reply,)> {
    live(sessions).boxed()
}

fn live(sessions: Sessions) -> BoxedFilter<(impl Reply,)> {
    warp::path("live")
        .and(warp::path::end())
        .and(warp::ws())
        .and(with_sessions(sessions))
        .map(|ws: Ws, sessions: Sessions| {
            ws.on_upgrade(move |socket| handlers::connected(socket, sessions));
            warp::reply()
        })
        .boxed()
}

fn with_sessions(sessions: Sessions) -> impl Filter<Extract = (Sessions,), Error = Infallible> + Clone {
    warp::any().map(move || sessions.clone())
}

/// Last-resort rejection handler so an unrecognised path gets a plain
/// 404 instead of warp's default body.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if err.is_not_found() {
        return Ok(warp::reply::with_status("not found", warp::http::StatusCode::NOT_FOUND));
    }

    log::error!("unhandled rejection: {err:?}");
    Ok(warp::reply::with_status(
        "internal error",
        warp::http::StatusCode::INTERNAL_SERVER_ERROR,
    ))
}
