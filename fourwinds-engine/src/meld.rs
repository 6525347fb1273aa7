//! Meld claim predicates and extraction.
//!
//! Pure functions over a hand and a candidate discard: can the hand claim a
//! pong, chi, or kong, and which hand tiles leave the hand when it does.
//! The state machine applies the results; nothing here mutates room state
//! beyond the hand vector it is handed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::Seat;
use crate::tile::Tile;

/// The three claimable meld shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldType {
    Pong,
    Chi,
    Kong,
}

impl MeldType {
    /// Number of hand tiles a claim of this type consumes.
    pub const fn hand_tiles(self) -> usize {
        match self {
            MeldType::Pong | MeldType::Chi => 2,
            MeldType::Kong => 3,
        }
    }

    /// Total tiles in the finished meld (hand tiles + the claimed discard).
    pub const fn meld_tiles(self) -> usize {
        match self {
            MeldType::Pong | MeldType::Chi => 3,
            MeldType::Kong => 4,
        }
    }

    /// Resolution priority when multiple seats contest one discard.
    /// Higher wins: kong > pong > chi.
    pub const fn priority(self) -> u8 {
        match self {
            MeldType::Kong => 2,
            MeldType::Pong => 1,
            MeldType::Chi => 0,
        }
    }
}

impl fmt::Display for MeldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MeldType::Pong => "pong",
            MeldType::Chi => "chi",
            MeldType::Kong => "kong",
        };
        f.write_str(s)
    }
}

/// A completed meld. Immutable once formed; owned by the claiming seat's
/// meld list. The claimed discard is always the first tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,
    pub claimed_by: Seat,
}

// ---------------------------------------------------------------------------
// Claim predicates
// ---------------------------------------------------------------------------

fn copies_of(hand: &[Tile], id: u8) -> usize {
    hand.iter().filter(|t| t.id() == id).count()
}

/// True if `hand` holds at least two copies of the candidate's id.
pub fn can_claim_pong(hand: &[Tile], tile: Tile) -> bool {
    copies_of(hand, tile.id()) >= 2
}

/// True if `hand` holds at least three copies of the candidate's id.
pub fn can_claim_kong(hand: &[Tile], tile: Tile) -> bool {
    copies_of(hand, tile.id()) >= 3
}

/// Checks the three chi adjacency windows around the candidate's rank R:
/// (R-2, R-1), (R-1, R+1), (R+1, R+2), in that fixed priority order.
///
/// Returns the first matching sequence as three consecutive ranks including
/// R, or `None` when the tile is not suited or no window matches. Only one
/// sequence is ever reported even if several qualify.
pub fn can_claim_chi(hand: &[Tile], tile: Tile) -> Option<[u8; 3]> {
    let rank = tile.rank()?;
    let suit = tile.suit();

    let mut present = [false; 12]; // ranks 1-9, padded so rank+2 indexes safely
    for t in hand {
        if t.suit() == suit {
            if let Some(r) = t.rank() {
                present[r as usize] = true;
            }
        }
    }
    let has = |r: i16| -> bool { (1..=9).contains(&r) && present[r as usize] };

    let r = rank as i16;
    if has(r - 2) && has(r - 1) {
        return Some([rank - 2, rank - 1, rank]);
    }
    if has(r - 1) && has(r + 1) {
        return Some([rank - 1, rank, rank + 1]);
    }
    if has(r + 1) && has(r + 2) {
        return Some([rank, rank + 1, rank + 2]);
    }
    None
}

// ---------------------------------------------------------------------------
// Claim extraction
// ---------------------------------------------------------------------------

/// Removes the hand tiles a claim of `meld_type` on `tile` consumes, and
/// returns the finished meld tiles with the claimed discard first.
///
/// Returns `None` (hand untouched) when the hand cannot support the claim.
/// The discard itself is never inserted into the hand.
pub fn extract_claim(hand: &mut Vec<Tile>, tile: Tile, meld_type: MeldType) -> Option<Vec<Tile>> {
    let taken = match meld_type {
        MeldType::Pong => take_copies(hand, tile.id(), 2)?,
        MeldType::Kong => take_copies(hand, tile.id(), 3)?,
        MeldType::Chi => {
            let sequence = can_claim_chi(hand, tile)?;
            let needed: Vec<u8> = sequence
                .iter()
                .copied()
                .filter(|&r| r != tile.rank().expect("chi tile is suited"))
                .collect();
            let mut taken = Vec::with_capacity(2);
            for rank in needed {
                let pos = hand
                    .iter()
                    .position(|t| t.suit() == tile.suit() && t.rank() == Some(rank))?;
                taken.push(hand.remove(pos));
            }
            taken
        }
    };

    let mut meld = Vec::with_capacity(meld_type.meld_tiles());
    meld.push(tile);
    meld.extend(taken);
    Some(meld)
}

/// Removes exactly `count` tiles of `id` from the hand, or `None` (hand
/// untouched) if fewer are present.
fn take_copies(hand: &mut Vec<Tile>, id: u8, count: usize) -> Option<Vec<Tile>> {
    if copies_of(hand, id) < count {
        return None;
    }
    let mut taken = Vec::with_capacity(count);
    for _ in 0..count {
        let pos = hand.iter().position(|t| t.id() == id)?;
        taken.push(hand.remove(pos));
    }
    Some(taken)
}

// ---------------------------------------------------------------------------
// Set decomposition
// ---------------------------------------------------------------------------

/// True if the id multiset can be fully partitioned into triplets and
/// suited runs. Bounded recursion over at most 14 ids.
///
/// Not used by the simplified win check; exposed for hand analysis.
pub fn can_form_sets(ids: &[u8]) -> bool {
    let mut sorted: Vec<u8> = ids.to_vec();
    sorted.sort_unstable();
    decompose(&sorted)
}

fn decompose(ids: &[u8]) -> bool {
    let Some(&first) = ids.first() else {
        return true; // empty multiset is fully partitioned
    };

    // Triplet of the first id.
    if ids.iter().filter(|&&x| x == first).count() >= 3 {
        let mut rest: Vec<u8> = ids.to_vec();
        for _ in 0..3 {
            let pos = rest.iter().position(|&x| x == first).unwrap();
            rest.remove(pos);
        }
        if decompose(&rest) {
            return true;
        }
    }

    // Suited run starting at the first id. Runs must not cross a suit
    // boundary: ranks 8 and 9 cannot start one.
    if first < 27 && first % 9 <= 6 {
        let second = first + 1;
        let third = first + 2;
        if ids.contains(&second) && ids.contains(&third) {
            let mut rest: Vec<u8> = ids.to_vec();
            for needed in [first, second, third] {
                let pos = rest.iter().position(|&x| x == needed).unwrap();
                rest.remove(pos);
            }
            if decompose(&rest) {
                return true;
            }
        }
    }

    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
