//! The websocket front end over a [`scrabble::game::Game`] session
//! registry: request/response/push wire types in [`interface`], the
//! registry itself in [`session`], dispatch logic in [`handlers`], and
//! the warp route in [`filters`].

pub mod error;
pub mod filters;
pub mod handlers;
pub mod interface;
pub mod session;
