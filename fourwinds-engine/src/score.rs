//! Terminal-position detection and the simplified point model.
//!
//! Two passes share the per-meld point table but answer different
//! questions: `is_winning_position` decides whether a seat just completed a
//! hand, while `settle` picks the seat with the highest cumulative meld
//! score and moves points. The settlement result is authoritative for the
//! score table even when the two passes disagree about the winner.

use crate::meld::{Meld, MeldType};
use crate::state::Seat;
use crate::tile::Tile;

/// Starting balance for every seat.
pub const STARTING_SCORE: i64 = 2000;

/// Tile total of a complete position: hand tiles plus meld tiles.
pub const WINNING_TILE_TOTAL: usize = 14;

/// Points a single meld is worth.
///
/// Pong on a terminal tile (rank 1 or 9 of a suit) scores 4, otherwise 2;
/// kong doubles its pong value; chi scores a flat 1.
pub fn meld_points(meld: &Meld) -> i64 {
    // The claimed discard leads the meld, so tiles[0] carries the id for
    // pong/kong terminal checks.
    let terminal = meld.tiles.first().map(|t| t.is_terminal()).unwrap_or(false);
    match meld.meld_type {
        MeldType::Pong => {
            if terminal {
                4
            } else {
                2
            }
        }
        MeldType::Kong => {
            if terminal {
                8
            } else {
                4
            }
        }
        MeldType::Chi => 1,
    }
}

/// Cumulative meld-derived score for one seat.
pub fn meld_score(melds: &[Meld]) -> i64 {
    melds.iter().map(meld_points).sum()
}

/// Flat winner bonus. Both branches currently award the same value; the
/// self-drawn flag is tracked but does not differentiate the payout.
pub fn win_bonus(self_drawn: bool) -> i64 {
    if self_drawn {
        2
    } else {
        2
    }
}

/// Point value of a completed position: meld points plus the winner bonus.
pub fn winning_hand_value(melds: &[Meld], self_drawn: bool) -> i64 {
    meld_score(melds) + win_bonus(self_drawn)
}

/// True when the seat's position is terminal: hand size plus 3 tiles per
/// pong/chi and 4 per kong totals exactly 14, and the residual hand is a
/// pair of equal ids.
///
/// This is a deliberate simplification: the two hand tiles are checked for
/// a pair only, with no sequence/triplet decomposition of the hand itself.
pub fn is_winning_position(hand: &[Tile], melds: &[Meld]) -> bool {
    let meld_tiles: usize = melds.iter().map(|m| m.meld_type.meld_tiles()).sum();
    if hand.len() + meld_tiles != WINNING_TILE_TOTAL {
        return false;
    }
    matches!(hand, [a, b] if a.id() == b.id())
}

/// Outcome of a settlement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// The seat with the highest meld-derived score. Not necessarily the
    /// seat whose win check fired.
    pub winner: Seat,
    /// That seat's meld-derived score (the per-loser transfer base).
    pub winner_score: i64,
    /// Final balances after transfers, indexed by seat.
    pub scores: [i64; 4],
}

/// Settles the game: the seat with the highest cumulative meld score is
/// declared winner, and every other seat transfers that score to it,
/// doubled when the winner occupies the east seat. Ties resolve to the
/// first seat in rotation order.
pub fn settle(melds: &[Vec<Meld>; 4], scores: &[i64; 4]) -> Settlement {
    let per_seat: [i64; 4] = std::array::from_fn(|i| meld_score(&melds[i]));

    let mut winner = Seat::North;
    for seat in Seat::ALL {
        if per_seat[seat.index()] > per_seat[winner.index()] {
            winner = seat;
        }
    }
    let winner_score = per_seat[winner.index()];
    let transfer = if winner == Seat::East {
        2 * winner_score
    } else {
        winner_score
    };

    let mut scores = *scores;
    for seat in Seat::ALL {
        if seat != winner {
            scores[seat.index()] -= transfer;
            scores[winner.index()] += transfer;
        }
    }

    Settlement {
        winner,
        winner_score,
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: u8) -> Tile {
        Tile::new(id).unwrap()
    }

    fn meld(meld_type: MeldType, ids: &[u8]) -> Meld {
        Meld {
            meld_type,
            tiles: ids.iter().map(|&id| tile(id)).collect(),
            claimed_by: Seat::North,
        }
    }

    #[test]
    fn pong_points_terminal_vs_simple() {
        assert_eq!(meld_points(&meld(MeldType::Pong, &[0, 0, 0])), 4); // bamboo 1
        assert_eq!(meld_points(&meld(MeldType::Pong, &[8, 8, 8])), 4); // bamboo 9
        assert_eq!(meld_points(&meld(MeldType::Pong, &[17, 17, 17])), 4); // characters 9
        assert_eq!(meld_points(&meld(MeldType::Pong, &[4, 4, 4])), 2);
        assert_eq!(meld_points(&meld(MeldType::Pong, &[27, 27, 27])), 2); // winds are not terminal
    }

    #[test]
    fn kong_doubles_pong_value() {
        assert_eq!(meld_points(&meld(MeldType::Kong, &[0, 0, 0, 0])), 8);
        assert_eq!(meld_points(&meld(MeldType::Kong, &[4, 4, 4, 4])), 4);
    }

    #[test]
    fn chi_scores_flat_one() {
        assert_eq!(meld_points(&meld(MeldType::Chi, &[2, 3, 4])), 1);
        assert_eq!(meld_points(&meld(MeldType::Chi, &[0, 1, 2])), 1, "chi ignores terminals");
    }

    #[test]
    fn win_bonus_equal_either_way() {
        assert_eq!(win_bonus(true), win_bonus(false));
    }

    #[test]
    fn winning_position_pair_plus_four_melds() {
        let hand = vec![tile(13), tile(13)];
        let melds = vec![
            meld(MeldType::Pong, &[0, 0, 0]),
            meld(MeldType::Chi, &[2, 3, 4]),
            meld(MeldType::Pong, &[9, 9, 9]),
            meld(MeldType::Chi, &[20, 21, 22]),
        ];
        assert!(is_winning_position(&hand, &melds));
    }

    #[test]
    fn winning_position_counts_kong_as_four() {
        // 3 pongs + 1 kong = 13 meld tiles; hand must be a single pair
        // to reach 15 -- which overshoots, so this is NOT a win.
        let hand = vec![tile(13), tile(13)];
        let melds = vec![
            meld(MeldType::Pong, &[0, 0, 0]),
            meld(MeldType::Pong, &[5, 5, 5]),
            meld(MeldType::Pong, &[9, 9, 9]),
            meld(MeldType::Kong, &[20, 20, 20, 20]),
        ];
        assert!(!is_winning_position(&hand, &melds));
    }

    #[test]
    fn winning_position_rejects_non_pair() {
        let hand = vec![tile(13), tile(14)];
        let melds = vec![
            meld(MeldType::Pong, &[0, 0, 0]),
            meld(MeldType::Chi, &[2, 3, 4]),
            meld(MeldType::Pong, &[9, 9, 9]),
            meld(MeldType::Chi, &[20, 21, 22]),
        ];
        assert!(!is_winning_position(&hand, &melds), "residual hand must be a pair");
    }

    #[test]
    fn winning_position_rejects_wrong_total() {
        let hand = vec![tile(13), tile(13)];
        let melds = vec![meld(MeldType::Pong, &[0, 0, 0])];
        assert!(!is_winning_position(&hand, &melds), "2 + 3 tiles is not 14");
    }

    #[test]
    fn settlement_picks_highest_meld_score() {
        let mut melds: [Vec<Meld>; 4] = Default::default();
        melds[Seat::South.index()] = vec![meld(MeldType::Pong, &[0, 0, 0])]; // 4 points
        melds[Seat::West.index()] = vec![meld(MeldType::Chi, &[2, 3, 4])]; // 1 point

        let start = [STARTING_SCORE; 4];
        let result = settle(&melds, &start);
        assert_eq!(result.winner, Seat::South);
        assert_eq!(result.winner_score, 4);
        assert_eq!(result.scores[Seat::South.index()], STARTING_SCORE + 3 * 4);
        assert_eq!(result.scores[Seat::West.index()], STARTING_SCORE - 4);
        assert_eq!(result.scores[Seat::North.index()], STARTING_SCORE - 4);
        assert_eq!(result.scores[Seat::East.index()], STARTING_SCORE - 4);
    }

    #[test]
    fn settlement_doubles_for_east() {
        let mut melds: [Vec<Meld>; 4] = Default::default();
        melds[Seat::East.index()] = vec![meld(MeldType::Kong, &[0, 0, 0, 0])]; // 8 points

        let start = [STARTING_SCORE; 4];
        let result = settle(&melds, &start);
        assert_eq!(result.winner, Seat::East);
        assert_eq!(result.scores[Seat::East.index()], STARTING_SCORE + 3 * 16);
        assert_eq!(result.scores[Seat::North.index()], STARTING_SCORE - 16);
    }

    #[test]
    fn settlement_conserves_points() {
        let mut melds: [Vec<Meld>; 4] = Default::default();
        melds[Seat::West.index()] = vec![
            meld(MeldType::Pong, &[0, 0, 0]),
            meld(MeldType::Chi, &[2, 3, 4]),
        ];
        melds[Seat::North.index()] = vec![meld(MeldType::Pong, &[5, 5, 5])];

        let start = [STARTING_SCORE; 4];
        let result = settle(&melds, &start);
        let total: i64 = result.scores.iter().sum();
        assert_eq!(total, 4 * STARTING_SCORE, "settlement is zero-sum");
    }

    #[test]
    fn settlement_tie_resolves_in_rotation_order() {
        // No melds anywhere: every seat scores 0, first seat in rotation wins.
        let melds: [Vec<Meld>; 4] = Default::default();
        let start = [STARTING_SCORE; 4];
        let result = settle(&melds, &start);
        assert_eq!(result.winner, Seat::North);
        assert_eq!(result.scores, start, "zero transfer when winner score is 0");
    }
}
