//! Wall construction, deterministic shuffle, and the initial deal.
//!
//! The shuffle vendors Fisher-Yates rather than relying on
//! `rand::seq::SliceRandom`, so the same seed produces the same deal across
//! rand versions. Seeded games use `ChaCha8Rng`; unseeded games pull a seed
//! from OS entropy through the same path.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::errors::{EngineError, EngineResult};
use crate::tile::{Tile, BONUS_START, DECK_SIZE, NUM_STANDARD_IDS, NUM_TILE_IDS};

/// Tiles consumed by the initial deal: 13 per seat plus the dealer's extra.
pub const DEAL_TILES: usize = 53;

/// Tiles dealt to each seat before the dealer's extra draw.
pub const HAND_TILES: usize = 13;

/// Vendored Fisher-Yates shuffle for cross-version determinism.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

/// Builds the full 144-tile deck in ascending id order:
/// four copies of each standard id (0-33), one copy of each bonus id (34-41).
pub fn build_deck() -> Vec<Tile> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for id in 0..NUM_STANDARD_IDS as u8 {
        for _ in 0..4 {
            // Safe: id < 34 is always a valid tile.
            deck.push(Tile::new(id).unwrap());
        }
    }
    for id in BONUS_START..NUM_TILE_IDS as u8 {
        deck.push(Tile::new(id).unwrap());
    }
    deck
}

/// The live wall: an ordered tile sequence drawn from the front.
#[derive(Debug, Clone)]
pub struct Wall {
    tiles: Vec<Tile>,
}

impl Wall {
    /// Fresh unshuffled wall in deterministic id order.
    pub fn new() -> Self {
        Wall { tiles: build_deck() }
    }

    /// Fresh wall shuffled with the given seed, or OS entropy when `None`.
    pub fn shuffled(seed: Option<u64>) -> Self {
        let mut wall = Wall::new();
        let actual_seed = seed.unwrap_or_else(|| rand::thread_rng().next_u64());
        let mut rng = ChaCha8Rng::seed_from_u64(actual_seed);
        fisher_yates_shuffle(&mut wall.tiles, &mut rng);
        wall
    }

    /// Builds a wall from an explicit tile sequence. Test fixtures use this
    /// to force specific deals.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Wall { tiles }
    }

    /// Draws the front tile, or `None` when the wall is exhausted.
    pub fn draw(&mut self) -> Option<Tile> {
        if self.tiles.is_empty() {
            None
        } else {
            Some(self.tiles.remove(0))
        }
    }

    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Snapshot of the remaining tiles, front first. The bot layer copies
    /// this into its search state.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Deals four hands in seat order (north, east, south, west): 13 tiles
    /// each in round-robin, then one extra tile to the dealer (seat 0).
    ///
    /// Fails with `ShortWall` if fewer than 53 tiles remain. This should be
    /// impossible with a fresh wall and aborts room setup when it happens.
    pub fn deal(&mut self) -> EngineResult<[Vec<Tile>; 4]> {
        if self.remaining() < DEAL_TILES {
            return Err(EngineError::ShortWall {
                remaining: self.remaining(),
            });
        }
        let mut hands: [Vec<Tile>; 4] = Default::default();
        for _ in 0..HAND_TILES {
            for hand in hands.iter_mut() {
                // Safe: the length check above covers all 53 draws.
                hand.push(self.tiles.remove(0));
            }
        }
        hands[0].push(self.tiles.remove(0)); // dealer's extra tile
        Ok(hands)
    }
}

impl Default for Wall {
    fn default() -> Self {
        Wall::new()
    }
}
