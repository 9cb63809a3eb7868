//! Request handlers.

mod http;
mod websocket;

pub use http::{
    end_match, find_match, get_active_matches, get_current_match, get_rooms, get_waiting_users,
    health_check, join_waiting_pool, leave_waiting_pool,
};
pub use websocket::websocket_handler;
