//! Infrastructure layer: concrete stores, message delivery and wire formats.

pub mod dto;
pub mod message_pusher;
pub mod repository;
