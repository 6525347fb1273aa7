//! Per-room game state machine.
//!
//! Orchestrates the draw -> discard -> claim-window -> advance cycle. The
//! claim window is the interesting part: after any discard, every seat may
//! attempt a claim before the next draw happens, pre-empting normal turn
//! order. All mutating operations return the broadcast events they produce.
//!
//! Callers serialize access per room (see `fourwinds-core`); this type
//! itself holds no locks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::event::{GameEvent, GameOverReason, TileInfo};
use crate::meld::{self, Meld, MeldType};
use crate::score::{self, Settlement, STARTING_SCORE};
use crate::tile::Tile;
use crate::wall::Wall;

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// One of the four seats. Turn order is the fixed cycle
/// north -> east -> south -> west -> north; north is the dealer and acts
/// first. This rotation is the system's defined convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    North,
    East,
    South,
    West,
}

impl Seat {
    /// All seats in rotation order.
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    /// Position in rotation order (0-3). Used as the array index for
    /// hands, melds, and scores.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Seat::North => 0,
            Seat::East => 1,
            Seat::South => 2,
            Seat::West => 3,
        }
    }

    /// The next seat in rotation.
    #[inline]
    pub const fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Seat::North => "north",
            Seat::East => "east",
            Seat::South => "south",
            Seat::West => "west",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Phase / outcome
// ---------------------------------------------------------------------------

/// What the room is waiting for. The claim window is implicit: claims are
/// accepted whenever the phase is `AwaitDraw` and a discard is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The turn seat must draw. Other seats may still claim the last
    /// discard during this phase.
    AwaitDraw,
    /// The turn seat holds an extra tile and must discard.
    AwaitDiscard,
    /// Terminal state; no further mutations are accepted.
    Finished(Outcome),
}

/// Terminal outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A seat completed a winning position. `winner` is the settlement
    /// winner, which is authoritative for the score table.
    Win { winner: Seat },
    /// The wall ran out on a draw attempt.
    WallExhausted,
}

/// Insert `tile` into a sorted hand, maintaining sort order.
#[inline]
fn sorted_insert(hand: &mut Vec<Tile>, tile: Tile) {
    let pos = hand.partition_point(|&t| t < tile);
    hand.insert(pos, tile);
}

// ---------------------------------------------------------------------------
// RoomState
// ---------------------------------------------------------------------------

/// The aggregate root for one game: wall, four hands, discard pile, melds,
/// the pending-discard slot, turn pointer, and score table.
///
/// Created by `RoomState::new`, mutated only through the operations below,
/// dropped when the room ends.
#[derive(Debug, Clone)]
pub struct RoomState {
    wall: Wall,
    hands: [Vec<Tile>; 4],
    discard_pile: Vec<Tile>,
    melds: [Vec<Meld>; 4],
    /// The most recent unclaimed discard. Cleared on claim, superseded by
    /// the next discard.
    last_discard: Option<Tile>,
    turn: Seat,
    phase: Phase,
    scores: [i64; 4],
}

impl RoomState {
    /// Deals a fresh game: shuffles with the given seed (OS entropy when
    /// `None`), deals 13 tiles per seat plus the dealer's extra, and seeds
    /// every score to 2000.
    ///
    /// The dealer (north) opens in the discard phase since it already holds
    /// 14 tiles. Returns the initial broadcastable events alongside the
    /// state. Fails only on a short wall, which aborts room setup.
    pub fn new(seed: Option<u64>) -> EngineResult<(Self, Vec<GameEvent>)> {
        Self::with_wall(Wall::shuffled(seed))
    }

    fn from_deal(wall: Wall, mut hands: [Vec<Tile>; 4]) -> EngineResult<(Self, Vec<GameEvent>)> {
        for hand in hands.iter_mut() {
            hand.sort_unstable();
        }
        let state = RoomState {
            wall,
            hands,
            discard_pile: Vec::new(),
            melds: Default::default(),
            last_discard: None,
            turn: Seat::North,
            phase: Phase::AwaitDiscard,
            scores: [STARTING_SCORE; 4],
        };

        let mut events = vec![GameEvent::GameStarted {
            current_turn: state.turn,
        }];
        for seat in Seat::ALL {
            events.push(state.hand_update_event(seat));
        }
        events.push(state.hand_counts_event());
        Ok((state, events))
    }

    /// Builds a room from a pre-arranged wall. Test fixtures use this to
    /// force specific deals (e.g. planting a pong opportunity).
    pub fn with_wall(mut wall: Wall) -> EngineResult<(Self, Vec<GameEvent>)> {
        let hands = wall.deal()?;
        Self::from_deal(wall, hands)
    }

    // -- accessors ---------------------------------------------------------

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn hand(&self, seat: Seat) -> &[Tile] {
        &self.hands[seat.index()]
    }

    pub fn melds(&self, seat: Seat) -> &[Meld] {
        &self.melds[seat.index()]
    }

    pub fn scores(&self) -> [i64; 4] {
        self.scores
    }

    pub fn last_discard(&self) -> Option<Tile> {
        self.last_discard
    }

    pub fn discard_pile(&self) -> &[Tile] {
        &self.discard_pile
    }

    pub fn wall_remaining(&self) -> usize {
        self.wall.remaining()
    }

    /// Snapshot of the remaining wall, for the bot layer's search state.
    pub fn wall_tiles(&self) -> &[Tile] {
        self.wall.tiles()
    }

    // -- operations --------------------------------------------------------

    /// Draws one tile for `seat`. An empty wall ends the game as a draw:
    /// melds already on the table still settle, but there is no winner.
    ///
    /// Returns the drawn tile (`None` on wall exhaustion) and the events
    /// produced.
    pub fn draw(&mut self, seat: Seat) -> EngineResult<(Option<Tile>, Vec<GameEvent>)> {
        self.ensure_active()?;
        self.ensure_turn(seat)?;
        if self.phase != Phase::AwaitDraw {
            return Err(EngineError::WrongPhase { seat });
        }

        let Some(tile) = self.wall.draw() else {
            let settlement = score::settle(&self.melds, &self.scores);
            self.scores = settlement.scores;
            self.phase = Phase::Finished(Outcome::WallExhausted);
            let events = vec![GameEvent::GameOver {
                winner: None,
                scores: self.scores,
                reason: GameOverReason::WallExhausted,
            }];
            return Ok((None, events));
        };

        sorted_insert(&mut self.hands[seat.index()], tile);
        self.phase = Phase::AwaitDiscard;
        let events = vec![self.hand_counts_event(), self.hand_update_event(seat)];
        Ok((Some(tile), events))
    }

    /// Discards one tile (matched by id) from `seat`'s hand: appends it to
    /// the discard pile, sets the pending discard, advances the turn, and
    /// opens the claim window. Runs the win check for the discarding seat.
    pub fn discard(&mut self, seat: Seat, tile_id: u8) -> EngineResult<Vec<GameEvent>> {
        self.ensure_active()?;
        self.ensure_turn(seat)?;
        if self.phase != Phase::AwaitDiscard {
            return Err(EngineError::WrongPhase { seat });
        }

        let hand = &mut self.hands[seat.index()];
        let pos = hand
            .iter()
            .position(|t| t.id() == tile_id)
            .ok_or(EngineError::TileNotInHand { seat, tile_id })?;
        let tile = hand.remove(pos);

        self.discard_pile.push(tile);
        self.last_discard = Some(tile);
        self.turn = seat.next();
        self.phase = Phase::AwaitDraw;

        let mut events = vec![
            GameEvent::TileDiscarded {
                seat,
                tile: TileInfo::from(tile),
            },
            GameEvent::TurnUpdate {
                current_turn: self.turn,
            },
            self.hand_counts_event(),
            self.hand_update_event(seat),
        ];

        // A discard can complete the discarder's own position (melds plus
        // a residual pair).
        if self.seat_has_won(seat) {
            events.extend(self.finish_with_win());
        }
        Ok(events)
    }

    /// Claims the pending discard for `seat` as the given meld type.
    ///
    /// Valid for any seat while the claim window is open (phase `AwaitDraw`
    /// with a pending discard). On success the claimant's hand loses the
    /// supporting tiles, the discard pile head is removed, the meld is
    /// recorded, and the turn is forcibly re-seated to the claimant, who
    /// must then discard.
    pub fn claim(&mut self, seat: Seat, meld_type: MeldType) -> EngineResult<Vec<GameEvent>> {
        self.ensure_active()?;
        if self.phase != Phase::AwaitDraw {
            return Err(EngineError::NoPendingDiscard);
        }
        let tile = self.last_discard.ok_or(EngineError::NoPendingDiscard)?;

        let hand = &mut self.hands[seat.index()];
        let tiles = meld::extract_claim(hand, tile, meld_type)
            .ok_or(EngineError::NotEligible { seat, meld_type })?;

        // The discard has been intercepted.
        self.discard_pile.pop();
        self.last_discard = None;

        let meld = Meld {
            meld_type,
            tiles: tiles.clone(),
            claimed_by: seat,
        };
        self.melds[seat.index()].push(meld);
        self.turn = seat;
        self.phase = Phase::AwaitDiscard;

        let mut events = vec![
            GameEvent::MeldClaimed {
                seat,
                meld_type,
                tiles: tiles.into_iter().map(TileInfo::from).collect(),
            },
            GameEvent::TurnUpdate { current_turn: seat },
            self.hand_counts_event(),
            self.hand_update_event(seat),
        ];

        if self.seat_has_won(seat) {
            events.extend(self.finish_with_win());
        }
        Ok(events)
    }

    /// The meld types `seat` could claim the pending discard with right
    /// now, in resolution priority order (kong, pong, chi). Empty when no
    /// claim window is open.
    pub fn claim_options(&self, seat: Seat) -> Vec<MeldType> {
        if self.phase != Phase::AwaitDraw {
            return Vec::new();
        }
        let Some(tile) = self.last_discard else {
            return Vec::new();
        };
        let hand = self.hand(seat);
        let mut options = Vec::new();
        if meld::can_claim_kong(hand, tile) {
            options.push(MeldType::Kong);
        }
        if meld::can_claim_pong(hand, tile) {
            options.push(MeldType::Pong);
        }
        if meld::can_claim_chi(hand, tile).is_some() {
            options.push(MeldType::Chi);
        }
        options
    }

    /// Explicit win check for one seat, settling the game if it holds.
    ///
    /// Returns `(is_win, score_table, settlement_winner)`. The settlement
    /// pass picks the seat with the highest meld score independently of
    /// `seat`, so the reported winner can differ from the seat whose check
    /// fired; the settlement result is authoritative.
    pub fn check_win_and_settle(
        &mut self,
        seat: Seat,
    ) -> (bool, [i64; 4], Option<Seat>, Vec<GameEvent>) {
        if let Phase::Finished(outcome) = self.phase {
            let winner = match outcome {
                Outcome::Win { winner } => Some(winner),
                Outcome::WallExhausted => None,
            };
            return (matches!(outcome, Outcome::Win { .. }), self.scores, winner, Vec::new());
        }
        if !self.seat_has_won(seat) {
            return (false, self.scores, None, Vec::new());
        }
        let events = self.finish_with_win();
        let winner = match self.phase {
            Phase::Finished(Outcome::Win { winner }) => winner,
            _ => unreachable!("finish_with_win always finishes with a win"),
        };
        (true, self.scores, Some(winner), events)
    }

    /// Point value of `seat`'s completed position, for reporting. The
    /// self-drawn flag is tracked but both branches award the same bonus.
    pub fn winning_hand_value(&self, seat: Seat, self_drawn: bool) -> i64 {
        score::winning_hand_value(self.melds(seat), self_drawn)
    }

    // -- internals ---------------------------------------------------------

    fn ensure_active(&self) -> EngineResult<()> {
        if self.is_finished() {
            Err(EngineError::GameFinished)
        } else {
            Ok(())
        }
    }

    fn ensure_turn(&self, seat: Seat) -> EngineResult<()> {
        if seat != self.turn {
            Err(EngineError::NotYourTurn {
                seat,
                current: self.turn,
            })
        } else {
            Ok(())
        }
    }

    fn seat_has_won(&self, seat: Seat) -> bool {
        score::is_winning_position(self.hand(seat), self.melds(seat))
    }

    /// Settles and transitions to the terminal win state. The settlement
    /// winner (highest meld score) goes into the outcome and the event.
    fn finish_with_win(&mut self) -> Vec<GameEvent> {
        let Settlement {
            winner, scores, ..
        } = score::settle(&self.melds, &self.scores);
        self.scores = scores;
        self.phase = Phase::Finished(Outcome::Win { winner });
        vec![GameEvent::GameOver {
            winner: Some(winner),
            scores: self.scores,
            reason: GameOverReason::Win,
        }]
    }

    fn hand_counts_event(&self) -> GameEvent {
        GameEvent::HandCounts {
            counts: std::array::from_fn(|i| self.hands[i].len()),
        }
    }

    fn hand_update_event(&self, seat: Seat) -> GameEvent {
        GameEvent::HandUpdate {
            seat,
            hand: self.hand(seat).iter().copied().map(TileInfo::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::DECK_SIZE;
    use crate::wall::{build_deck, DEAL_TILES};

    fn new_room(seed: u64) -> RoomState {
        RoomState::new(Some(seed)).unwrap().0
    }

    /// Wall arranged so east's first 13 tiles include two copies of id 5
    /// and the dealer can immediately discard a third copy of id 5.
    ///
    /// Deal order is round-robin north, east, south, west: position p of
    /// round r comes from wall index r * 4 + seat.
    fn pong_fixture() -> RoomState {
        let mut tiles = build_deck();
        // Move three copies of id 5 to the front of east's and north's picks.
        let five = Tile::new(5).unwrap();
        tiles.retain(|&t| t != five);
        tiles.insert(1, five); // east's first tile (wall index 1)
        tiles.insert(5, five); // east's second tile (wall index 5)
        tiles.insert(52, five); // dealer's extra tile (wall index 52)
        let wall = Wall::from_tiles(tiles);
        RoomState::with_wall(wall).unwrap().0
    }

    #[test]
    fn fresh_game_layout() {
        let room = new_room(11);
        assert_eq!(room.turn(), Seat::North);
        assert_eq!(room.phase(), Phase::AwaitDiscard);
        assert_eq!(room.hand(Seat::North).len(), 14);
        for seat in [Seat::East, Seat::South, Seat::West] {
            assert_eq!(room.hand(seat).len(), 13);
        }
        assert_eq!(room.wall_remaining(), DECK_SIZE - DEAL_TILES);
        assert_eq!(room.scores(), [STARTING_SCORE; 4]);
        assert!(room.last_discard().is_none());
    }

    #[test]
    fn start_events_include_all_hands() {
        let (_, events) = RoomState::new(Some(3)).unwrap();
        let hand_updates = events
            .iter()
            .filter(|e| matches!(e, GameEvent::HandUpdate { .. }))
            .count();
        assert_eq!(hand_updates, 4, "every seat gets its private hand");
        assert!(matches!(events[0], GameEvent::GameStarted { current_turn: Seat::North }));
    }

    #[test]
    fn turn_rotation_cycles() {
        let mut seat = Seat::North;
        let expected = [Seat::East, Seat::South, Seat::West, Seat::North];
        for want in expected {
            seat = seat.next();
            assert_eq!(seat, want);
        }
        assert_eq!(seat, Seat::North, "four rotations return to the start seat");
    }

    #[test]
    fn discard_advances_turn_and_opens_window() {
        let mut room = new_room(17);
        let tile_id = room.hand(Seat::North)[0].id();
        let events = room.discard(Seat::North, tile_id).unwrap();

        assert_eq!(room.turn(), Seat::East);
        assert_eq!(room.phase(), Phase::AwaitDraw);
        assert_eq!(room.last_discard().map(|t| t.id()), Some(tile_id));
        assert_eq!(room.hand(Seat::North).len(), 13);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::TileDiscarded { seat: Seat::North, .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::TurnUpdate { current_turn: Seat::East })));
    }

    #[test]
    fn draw_out_of_turn_rejected() {
        let mut room = new_room(17);
        let err = room.draw(Seat::South).unwrap_err();
        assert!(matches!(err, EngineError::NotYourTurn { .. }));
    }

    #[test]
    fn draw_before_discard_rejected() {
        // Dealer starts holding 14 tiles and must discard, not draw.
        let mut room = new_room(17);
        let err = room.draw(Seat::North).unwrap_err();
        assert!(matches!(err, EngineError::WrongPhase { seat: Seat::North }));
    }

    #[test]
    fn discard_of_unheld_tile_rejected() {
        let mut room = new_room(17);
        let unheld = (0..42u8)
            .find(|id| !room.hand(Seat::North).iter().any(|t| t.id() == *id))
            .unwrap();
        let err = room.discard(Seat::North, unheld).unwrap_err();
        assert!(matches!(err, EngineError::TileNotInHand { .. }));
    }

    #[test]
    fn draw_then_discard_cycle() {
        let mut room = new_room(23);
        let first = room.hand(Seat::North)[0].id();
        room.discard(Seat::North, first).unwrap();

        let (tile, _) = room.draw(Seat::East).unwrap();
        assert!(tile.is_some());
        assert_eq!(room.hand(Seat::East).len(), 14);
        assert_eq!(room.phase(), Phase::AwaitDiscard);

        let id = room.hand(Seat::East)[0].id();
        room.discard(Seat::East, id).unwrap();
        assert_eq!(room.turn(), Seat::South);
    }

    #[test]
    fn pong_claim_reduces_hand_and_reseats_turn() {
        let mut room = pong_fixture();
        assert_eq!(
            room.hand(Seat::East).iter().filter(|t| t.id() == 5).count(),
            2,
            "fixture must give east two copies of id 5"
        );

        room.discard(Seat::North, 5).unwrap();
        assert_eq!(room.turn(), Seat::East);

        let options = room.claim_options(Seat::East);
        assert!(options.contains(&MeldType::Pong));

        let before = room.hand(Seat::East).len();
        let events = room.claim(Seat::East, MeldType::Pong).unwrap();

        assert_eq!(room.hand(Seat::East).len(), before - 2, "pong takes two hand tiles");
        assert_eq!(room.melds(Seat::East).len(), 1);
        assert_eq!(room.melds(Seat::East)[0].meld_type, MeldType::Pong);
        assert!(room.melds(Seat::East)[0].tiles.iter().all(|t| t.id() == 5));
        assert_eq!(room.turn(), Seat::East, "claim pre-empts rotation");
        assert_eq!(room.phase(), Phase::AwaitDiscard);
        assert!(room.last_discard().is_none(), "claim consumes the pending discard");
        assert!(room.discard_pile().is_empty(), "intercepted discard leaves the pile");
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::MeldClaimed { seat: Seat::East, .. })));
    }

    #[test]
    fn claim_without_pending_discard_rejected() {
        let mut room = new_room(29);
        let err = room.claim(Seat::East, MeldType::Pong).unwrap_err();
        assert_eq!(err, EngineError::NoPendingDiscard);
    }

    #[test]
    fn claim_without_support_rejected() {
        let mut room = pong_fixture();
        room.discard(Seat::North, 5).unwrap();
        // South holds no copies of id 5 in this fixture.
        let err = room.claim(Seat::South, MeldType::Pong).unwrap_err();
        assert!(matches!(
            err,
            EngineError::NotEligible {
                seat: Seat::South,
                meld_type: MeldType::Pong
            }
        ));
    }

    #[test]
    fn claim_window_closes_after_draw() {
        let mut room = pong_fixture();
        room.discard(Seat::North, 5).unwrap();
        room.draw(Seat::East).unwrap();
        // The window closed when east drew; the stale discard cannot be taken.
        let err = room.claim(Seat::East, MeldType::Pong).unwrap_err();
        assert_eq!(err, EngineError::NoPendingDiscard);
    }

    #[test]
    fn empty_wall_draw_ends_in_draw_outcome() {
        let mut room = new_room(31);
        // Exhaust the wall manually.
        let remaining = room.wall_remaining();
        let mut seat = Seat::North;
        // Dealer discards first to enter the draw cycle.
        let id = room.hand(seat)[0].id();
        room.discard(seat, id).unwrap();
        seat = seat.next();
        for _ in 0..remaining {
            let (tile, _) = room.draw(seat).unwrap();
            assert!(tile.is_some());
            let id = room.hand(seat)[0].id();
            let events = room.discard(seat, id).unwrap();
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                // A random game can legitimately end in a win; rerun-proof
                // seeds below avoid this, but bail out defensively.
                return;
            }
            seat = seat.next();
        }
        assert_eq!(room.wall_remaining(), 0);
        let (tile, events) = room.draw(seat).unwrap();
        assert!(tile.is_none());
        assert!(matches!(room.phase(), Phase::Finished(Outcome::WallExhausted)));
        assert!(matches!(
            events.as_slice(),
            [GameEvent::GameOver {
                winner: None,
                reason: GameOverReason::WallExhausted,
                ..
            }]
        ));
        // No melds occurred, so settlement moves nothing.
        assert_eq!(room.scores(), [STARTING_SCORE; 4]);
    }

    #[test]
    fn finished_game_rejects_mutation() {
        let mut room = new_room(31);
        room.phase = Phase::Finished(Outcome::WallExhausted);
        assert_eq!(room.draw(Seat::North).unwrap_err(), EngineError::GameFinished);
        assert_eq!(
            room.discard(Seat::North, 0).unwrap_err(),
            EngineError::GameFinished
        );
        assert_eq!(
            room.claim(Seat::East, MeldType::Pong).unwrap_err(),
            EngineError::GameFinished
        );
    }

    #[test]
    fn check_win_and_settle_reports_settlement_winner() {
        let mut room = pong_fixture();
        // Not a win: full starting hand.
        let (is_win, scores, winner, events) = room.check_win_and_settle(Seat::North);
        assert!(!is_win);
        assert_eq!(scores, [STARTING_SCORE; 4]);
        assert_eq!(winner, None);
        assert!(events.is_empty());
    }

    #[test]
    fn forced_win_settles_and_finishes() {
        let mut room = pong_fixture();
        // Hand-craft a terminal position for east: 4 melds + a pair.
        let idx = Seat::East.index();
        room.hands[idx] = vec![Tile::new(13).unwrap(), Tile::new(13).unwrap()];
        room.melds[idx] = vec![
            Meld {
                meld_type: MeldType::Pong,
                tiles: vec![Tile::new(0).unwrap(); 3],
                claimed_by: Seat::East,
            },
            Meld {
                meld_type: MeldType::Pong,
                tiles: vec![Tile::new(9).unwrap(); 3],
                claimed_by: Seat::East,
            },
            Meld {
                meld_type: MeldType::Chi,
                tiles: vec![
                    Tile::new(2).unwrap(),
                    Tile::new(3).unwrap(),
                    Tile::new(4).unwrap(),
                ],
                claimed_by: Seat::East,
            },
            Meld {
                meld_type: MeldType::Chi,
                tiles: vec![
                    Tile::new(20).unwrap(),
                    Tile::new(21).unwrap(),
                    Tile::new(22).unwrap(),
                ],
                claimed_by: Seat::East,
            },
        ];

        let (is_win, scores, winner, events) = room.check_win_and_settle(Seat::East);
        assert!(is_win);
        assert_eq!(winner, Some(Seat::East));
        // East holds 4+4+1+1 = 10 meld points, doubled as the east seat.
        assert_eq!(scores[Seat::East.index()], STARTING_SCORE + 3 * 20);
        assert!(room.is_finished());
        assert!(matches!(
            events.as_slice(),
            [GameEvent::GameOver {
                winner: Some(Seat::East),
                reason: GameOverReason::Win,
                ..
            }]
        ));
    }
}
