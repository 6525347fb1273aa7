//! Four Winds rules engine
//!
//! Pure, synchronous rules kernel for the simplified four-player mahjong
//! variant: tile catalog, wall construction and dealing, meld claim
//! resolution, the per-room turn state machine, and the point model.
//! Contains no I/O and no concurrency; the serving layer lives in
//! `fourwinds-core`.

pub mod errors;
pub mod event;
pub mod meld;
pub mod score;
pub mod state;
pub mod tile;
pub mod wall;

pub use errors::{EngineError, EngineResult};
pub use event::{GameEvent, GameOverReason, TileInfo};
pub use meld::{Meld, MeldType};
pub use state::{Outcome, Phase, RoomState, Seat};
pub use tile::{Suit, Tile};
pub use wall::Wall;
