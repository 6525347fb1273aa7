//! Typed broadcast events for state-change notifications.
//!
//! Every mutating state-machine operation returns the events it produced;
//! the transport layer serializes them verbatim. JSON construction happens
//! only at that boundary, never during play.

use serde::{Deserialize, Serialize};

use crate::meld::MeldType;
use crate::state::Seat;
use crate::tile::Tile;

/// Wire representation of a tile. Name, suit, and image path are
/// presentation-only and derived from the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    pub id: u8,
    pub name: String,
    pub suit: String,
    pub image_path: String,
}

impl From<Tile> for TileInfo {
    fn from(tile: Tile) -> Self {
        TileInfo {
            id: tile.id(),
            name: tile.name().to_string(),
            suit: tile.suit().name().to_string(),
            image_path: tile.image_path(),
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "draw-no-tiles")]
    WallExhausted,
}

/// A state-change notification for the broadcast layer.
///
/// `HandUpdate` is addressed to the affected seat only; everything else is
/// room-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Game start marker with the opening turn.
    GameStarted { current_turn: Seat },
    /// Per-seat hand sizes, indexed in rotation order.
    HandCounts { counts: [usize; 4] },
    /// The turn pointer moved.
    TurnUpdate { current_turn: Seat },
    /// A tile left a hand for the discard pile.
    TileDiscarded { seat: Seat, tile: TileInfo },
    /// A meld claim succeeded. The claimed discard leads `tiles`.
    MeldClaimed {
        seat: Seat,
        meld_type: MeldType,
        tiles: Vec<TileInfo>,
    },
    /// Full hand contents for one seat (private notification).
    HandUpdate { seat: Seat, hand: Vec<TileInfo> },
    /// Terminal state reached. `winner` is `None` for an exhausted wall.
    GameOver {
        winner: Option<Seat>,
        scores: [i64; 4],
        reason: GameOverReason,
    },
}
