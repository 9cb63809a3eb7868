//! UI 層：HTTP / WebSocket の受け口
//!
//! axum のルーター、ハンドラー、認証エクストラクター、サーバー起動処理、
//! 期限切れルームの定期掃除を含みます。

mod error;
mod extractor;
mod handler;
mod server;
mod signal;
pub mod state;
mod sweeper;

pub use server::{Server, build_router};
pub use state::AppState;
pub use sweeper::{spawn_room_sweeper, sweep_expired_rooms};
