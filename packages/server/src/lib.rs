//! AccentSwap matchmaking and WebRTC signaling server.
//!
//! Pairs language learners whose preferred and learning languages complement
//! each other, and relays WebRTC handshake messages between the peers of a
//! signaling room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
