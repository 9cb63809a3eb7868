//! Utilities shared by the AccentSwap binaries and their tests.

pub mod logger;
pub mod time;
