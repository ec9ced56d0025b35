#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod coord;
pub mod event;
pub mod force;
pub mod game;
pub mod grid;
pub mod matchmaker;
pub mod network;
pub mod piece;
pub mod registry;
pub mod server;
pub mod server_main;
pub mod session;
pub mod test_util;
