//! Data Transfer Objects (DTOs).
//!
//! DTOs are organized by protocol:
//! - `websocket`: signaling events exchanged over WebSocket
//! - `http`: HTTP API request/response bodies
//! - `profile`: profile records loaded from the profile store's JSON export

pub mod conversion;
pub mod http;
pub mod profile;
pub mod websocket;
