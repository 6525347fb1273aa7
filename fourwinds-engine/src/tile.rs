//! Tile catalog for the 144-tile set.
//!
//! Provides the 42-id tile type system (34 standard types with four copies
//! each, 8 bonus tiles with one copy each), suit classification, and the
//! display name / image path table kept for wire compatibility.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Total number of distinct tile ids (0-41).
pub const NUM_TILE_IDS: usize = 42;

/// Number of standard tile ids (0-33), four copies each.
pub const NUM_STANDARD_IDS: usize = 34;

/// Number of tiles per suited category (1-9).
pub const NUM_SUIT_TILES: usize = 9;

/// Total physical tiles in a full set: 34 * 4 + 8.
pub const DECK_SIZE: usize = 144;

// Suit range starts (tile ids).
pub const BAMBOO_START: u8 = 0;
pub const CHARACTERS_START: u8 = 9;
pub const DOTS_START: u8 = 18;
pub const WINDS_START: u8 = 27;
pub const DRAGONS_START: u8 = 31;
pub const BONUS_START: u8 = 34;

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// The six tile categories. Only the first three are suited (rank-bearing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Bamboo,
    Characters,
    Dots,
    Winds,
    Dragons,
    Bonus,
}

impl Suit {
    /// Lowercase wire name, matching the broadcast payload convention.
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Bamboo => "bamboo",
            Suit::Characters => "characters",
            Suit::Dots => "dots",
            Suit::Winds => "winds",
            Suit::Dragons => "dragons",
            Suit::Bonus => "bonus",
        }
    }

    /// True for bamboo, characters, or dots (chi-capable categories).
    pub const fn is_suited(self) -> bool {
        matches!(self, Suit::Bamboo | Suit::Characters | Suit::Dots)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tile newtype
// ---------------------------------------------------------------------------

/// A tile id in the range 0-41. Wraps a `u8` for type safety.
///
/// Identity is by id: copies of the same id are interchangeable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(u8);

impl Tile {
    /// Creates a `Tile` if `id` is in range 0..42.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if id < NUM_TILE_IDS as u8 {
            Some(Tile(id))
        } else {
            None
        }
    }

    /// Raw numeric id (0-41).
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Which suit this tile belongs to.
    #[inline]
    pub const fn suit(self) -> Suit {
        match self.0 {
            0..=8 => Suit::Bamboo,
            9..=17 => Suit::Characters,
            18..=26 => Suit::Dots,
            27..=30 => Suit::Winds,
            31..=33 => Suit::Dragons,
            _ => Suit::Bonus,
        }
    }

    /// 1-based rank within the suit (1-9), or `None` for winds, dragons,
    /// and bonus tiles, where ranks are meaningless.
    #[inline]
    pub const fn rank(self) -> Option<u8> {
        if self.0 < WINDS_START {
            Some((self.0 % NUM_SUIT_TILES as u8) + 1)
        } else {
            None
        }
    }

    /// True for bamboo, characters, or dots.
    #[inline]
    pub const fn is_suited(self) -> bool {
        self.0 < WINDS_START
    }

    /// True for the 1 or 9 rank of any suit.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        if self.0 >= WINDS_START {
            return false;
        }
        let rank = self.0 % NUM_SUIT_TILES as u8;
        rank == 0 || rank == 8
    }

    /// True for the one-copy bonus tiles (flowers and seasons, ids 34-41).
    #[inline]
    pub const fn is_bonus(self) -> bool {
        self.0 >= BONUS_START
    }

    /// Human-readable name, e.g. "bamboo 6" or "red dragon".
    #[inline]
    pub fn name(self) -> &'static str {
        TILE_NAMES.get(self.0 as usize).copied().unwrap_or("unknown")
    }

    /// Presentation-only image path. Recomputed from id, never stored.
    pub fn image_path(self) -> String {
        format!("/static/images/tiles/{}.jpg", self.0)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}={})", self.0, self.name())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Wire-compatible display names for all 42 tile ids.
const TILE_NAMES: [&str; NUM_TILE_IDS] = [
    "bamboo 1",
    "bamboo 2",
    "bamboo 3",
    "bamboo 4",
    "bamboo 5",
    "bamboo 6",
    "bamboo 7",
    "bamboo 8",
    "bamboo 9",
    "characters 1",
    "characters 2",
    "characters 3",
    "characters 4",
    "characters 5",
    "characters 6",
    "characters 7",
    "characters 8",
    "characters 9",
    "dots 1",
    "dots 2",
    "dots 3",
    "dots 4",
    "dots 5",
    "dots 6",
    "dots 7",
    "dots 8",
    "dots 9",
    "east",
    "south",
    "west",
    "north",
    "green dragon",
    "red dragon",
    "white dragon",
    "flower 1",
    "flower 2",
    "flower 3",
    "flower 4",
    "season 1",
    "season 2",
    "season 3",
    "season 4",
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
