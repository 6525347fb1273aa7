//! Bot decision layer: adapts room state into the generic search engine
//! and provides the deterministic fallback heuristic.
//!
//! The search operates on a deep-copied snapshot of the bot's view (hand,
//! pending discard, melds, remaining wall) so the tree can never mutate
//! live room state. Search failure is absorbed here: a bot decision always
//! produces a valid action for a non-empty hand.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use rand::{Rng, RngCore};

use fourwinds_engine::meld::{self, Meld, MeldType};
use fourwinds_engine::state::{RoomState, Seat};
use fourwinds_engine::tile::Tile;

use crate::mcts::{self, SearchConfig, SearchSpec};

/// Bounded playout depth for simulation.
const MAX_PLAYOUT_DEPTH: usize = 10;

/// Reward shaping weights: melds help, a fat hand hurts.
const MELD_WEIGHT: f64 = 0.3;
const HAND_WEIGHT: f64 = 0.1;

/// Default capacity of the evaluation cache.
const EVAL_CACHE_CAPACITY: usize = 4096;

// ---------------------------------------------------------------------------
// Search state and actions
// ---------------------------------------------------------------------------

/// One move in the bot's internal simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAction {
    Discard(Tile),
    Claim(MeldType),
}

/// The bot's view of the game, deep-copied out of the room.
#[derive(Debug, Clone)]
pub struct BotView {
    pub hand: Vec<Tile>,
    pub last_discard: Option<Tile>,
    pub melds: Vec<Meld>,
    pub wall: Vec<Tile>,
}

impl BotView {
    /// Snapshot the parts of the room the search is allowed to see. The
    /// pending discard is included only while the claim window is open for
    /// this seat; a stale discard must not generate claim moves.
    pub fn snapshot(room: &RoomState, seat: Seat, include_discard: bool) -> Self {
        BotView {
            hand: room.hand(seat).to_vec(),
            last_discard: if include_discard {
                room.last_discard()
            } else {
                None
            },
            melds: room.melds(seat).to_vec(),
            wall: room.wall_tiles().to_vec(),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation cache
// ---------------------------------------------------------------------------

/// Bounded per-hand evaluation cache with oldest-first eviction.
///
/// Keyed by the sorted multiset of hand tile ids. Not an LRU: reads do not
/// promote, entries leave strictly in insertion order once the map is full.
pub struct EvalCache {
    map: HashMap<Vec<u8>, f64>,
    order: VecDeque<Vec<u8>>,
    capacity: usize,
}

impl EvalCache {
    pub fn new(capacity: usize) -> Self {
        EvalCache {
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn key(hand: &[Tile]) -> Vec<u8> {
        let mut ids: Vec<u8> = hand.iter().map(|t| t.id()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn get(&self, hand: &[Tile]) -> Option<f64> {
        self.map.get(&Self::key(hand)).copied()
    }

    pub fn insert(&mut self, hand: &[Tile], value: f64) {
        let key = Self::key(hand);
        if self.map.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
            if self.order.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.map.remove(&oldest);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for EvalCache {
    fn default() -> Self {
        EvalCache::new(EVAL_CACHE_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// SearchSpec instantiation
// ---------------------------------------------------------------------------

/// The mahjong instantiation of the search engine.
///
/// Holds the evaluation cache across decisions; the search tree itself is
/// rebuilt per decision.
pub struct MahjongSearch {
    cache: RefCell<EvalCache>,
}

impl MahjongSearch {
    pub fn new() -> Self {
        MahjongSearch {
            cache: RefCell::new(EvalCache::default()),
        }
    }

    /// Heuristic position value from the acting seat's perspective,
    /// clamped to [-1, 1].
    fn reward(view: &BotView) -> f64 {
        let raw = view.melds.len() as f64 * MELD_WEIGHT - view.hand.len() as f64 * HAND_WEIGHT;
        raw.clamp(-1.0, 1.0)
    }

    /// Applies one simulated move. Claim moves that turn out infeasible
    /// leave the state unchanged, mirroring how the playout tolerates dead
    /// branches instead of erroring.
    fn step(view: &BotView, action: &BotAction) -> BotView {
        let mut next = view.clone();
        match action {
            BotAction::Discard(tile) => {
                if let Some(pos) = next.hand.iter().position(|t| t.id() == tile.id()) {
                    let removed = next.hand.remove(pos);
                    next.last_discard = Some(removed);
                }
            }
            BotAction::Claim(meld_type) => {
                if let Some(tile) = next.last_discard.take() {
                    if let Some(tiles) = meld::extract_claim(&mut next.hand, tile, *meld_type) {
                        next.melds.push(Meld {
                            meld_type: *meld_type,
                            tiles,
                            claimed_by: Seat::North,
                        });
                    }
                }
            }
        }
        next
    }
}

impl Default for MahjongSearch {
    fn default() -> Self {
        MahjongSearch::new()
    }
}

impl SearchSpec for MahjongSearch {
    type State = BotView;
    type Action = BotAction;

    fn legal_moves(&self, view: &BotView) -> Vec<BotAction> {
        let mut moves: Vec<BotAction> = view
            .hand
            .iter()
            .map(|&t| BotAction::Discard(t))
            .collect();
        if let Some(tile) = view.last_discard {
            if meld::can_claim_pong(&view.hand, tile) {
                moves.push(BotAction::Claim(MeldType::Pong));
            }
            if meld::can_claim_chi(&view.hand, tile).is_some() {
                moves.push(BotAction::Claim(MeldType::Chi));
            }
            if meld::can_claim_kong(&view.hand, tile) {
                moves.push(BotAction::Claim(MeldType::Kong));
            }
        }
        moves
    }

    fn apply(&self, view: &BotView, action: &BotAction) -> BotView {
        Self::step(view, action)
    }

    /// Bounded random playout with per-hand result caching.
    fn evaluate(&self, view: &BotView, rng: &mut dyn RngCore) -> f64 {
        if let Some(cached) = self.cache.borrow().get(&view.hand) {
            return cached;
        }

        let mut current = view.clone();
        for _ in 0..MAX_PLAYOUT_DEPTH {
            let moves = self.legal_moves(&current);
            if moves.is_empty() {
                break;
            }
            let pick = rng.gen_range(0..moves.len());
            current = Self::step(&current, &moves[pick]);
        }

        let reward = Self::reward(&current);
        self.cache.borrow_mut().insert(&view.hand, reward);
        reward
    }
}

// ---------------------------------------------------------------------------
// Fallback heuristic
// ---------------------------------------------------------------------------

/// Deterministic discard choice used when search produces nothing.
///
/// Scores every tile by (duplicate copies) + (same-suit tiles within rank
/// distance 1-2), minus 1 for a fully isolated tile, and discards the
/// lowest-scoring tile, preferring the highest id on ties. Never fails for
/// a non-empty hand.
pub fn fallback_discard(hand: &[Tile]) -> Option<Tile> {
    let mut best: Option<(Tile, i32)> = None;
    for &tile in hand {
        let score = keep_score(hand, tile);
        let better = match best {
            None => true,
            Some((b, s)) => score < s || (score == s && tile.id() > b.id()),
        };
        if better {
            best = Some((tile, score));
        }
    }
    best.map(|(t, _)| t)
}

fn keep_score(hand: &[Tile], tile: Tile) -> i32 {
    let duplicates = hand
        .iter()
        .filter(|t| t.id() == tile.id())
        .count() as i32
        - 1;

    let neighbors = match tile.rank() {
        Some(rank) => hand
            .iter()
            .filter(|t| {
                t.id() != tile.id()
                    && t.suit() == tile.suit()
                    && t.rank()
                        .map(|r| {
                            let d = (r as i32 - rank as i32).abs();
                            (1..=2).contains(&d)
                        })
                        .unwrap_or(false)
            })
            .count() as i32,
        // Honors and bonus tiles have no sequence neighbors.
        None => 0,
    };

    let mut score = duplicates + neighbors;
    if duplicates == 0 && neighbors == 0 {
        score -= 1;
    }
    score
}

// ---------------------------------------------------------------------------
// Bot
// ---------------------------------------------------------------------------

/// One bot player: a search configuration plus a persistent eval cache.
pub struct Bot {
    search: MahjongSearch,
    config: SearchConfig,
}

impl Bot {
    pub fn new(config: SearchConfig) -> Self {
        Bot {
            search: MahjongSearch::new(),
            config,
        }
    }

    /// Picks a discard for `seat`, which must currently hold the extra
    /// tile. Falls back to the heuristic when search yields nothing or a
    /// non-discard action; never errors for a non-empty hand.
    pub fn choose_discard(&self, room: &RoomState, seat: Seat) -> Option<Tile> {
        self.choose_discard_from(BotView::snapshot(room, seat, false))
    }

    /// Same decision from an already-captured view. Callers that hold a
    /// room lock snapshot first and run the search off the lock.
    pub fn choose_discard_from(&self, view: BotView) -> Option<Tile> {
        if view.hand.is_empty() {
            return None;
        }
        let hand = view.hand.clone();

        match mcts::search(&self.search, view, &self.config) {
            Some((BotAction::Discard(tile), _)) => Some(tile),
            Some((BotAction::Claim(_), _)) | None => {
                tracing::warn!("search produced no discard, using fallback heuristic");
                fallback_discard(&hand)
            }
        }
    }

    /// Picks a claim for the pending discard: the highest-priority meld
    /// type available (kong over pong over chi), or `None` to pass. A claim
    /// that would leave nothing to discard afterwards is never taken.
    pub fn choose_claim(&self, room: &RoomState, seat: Seat) -> Option<MeldType> {
        let hand_len = room.hand(seat).len();
        room.claim_options(seat)
            .into_iter()
            .find(|mt| hand_len > mt.hand_tiles())
    }
}
