//! Four Winds serving core
//!
//! Bot decision layer and per-room serialization built on the pure rules
//! kernel in `fourwinds-engine`: a generic Monte Carlo tree search, the
//! mahjong instantiation with its fallback heuristic, and the locked room
//! handle that transport layers drive.

pub mod bot;
pub mod mcts;
pub mod room;

pub use bot::{fallback_discard, Bot, BotAction, BotView, EvalCache, MahjongSearch};
pub use mcts::{search, SearchConfig, SearchSpec, SearchStats};
pub use room::{Room, RoomConfig};
