//! インメモリ Repository 実装
//!
//! プロセス内のデータ構造をストアとして使います。状態はプロセスの寿命と
//! 同じで、再起動をまたいで永続化されません。

mod matchmaking;
mod profile;
mod room;

pub use matchmaking::InMemoryMatchmakingRepository;
pub use profile::{InMemoryProfileRepository, ProfileLoadError};
pub use room::InMemoryRoomRepository;
