//! Per-room serialization and the bot worker.
//!
//! A room is one independent unit of concurrency: all mutating operations
//! funnel through a single mutex, so a human claim request and a bot's
//! draw/discard can never interleave mid-update. Events produced under the
//! lock are broadcast through an mpsc channel for the transport layer to
//! forward verbatim.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use fourwinds_engine::errors::EngineResult;
use fourwinds_engine::event::GameEvent;
use fourwinds_engine::meld::MeldType;
use fourwinds_engine::state::{Phase, RoomState, Seat};
use fourwinds_engine::tile::Tile;

use crate::bot::{Bot, BotView};
use crate::mcts::SearchConfig;

/// Room construction parameters.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Shuffle seed; `None` uses OS entropy.
    pub seed: Option<u64>,
    /// Artificial pause before each bot action.
    pub think_delay: Duration,
    /// Interval at which an idle bot re-checks whether it can act.
    pub poll_interval: Duration,
    /// Search budgets for bot discard decisions.
    pub search: SearchConfig,
}

impl Default for RoomConfig {
    fn default() -> Self {
        RoomConfig {
            seed: None,
            think_delay: Duration::from_millis(500),
            poll_interval: Duration::from_millis(50),
            search: SearchConfig::default(),
        }
    }
}

/// Handle to one running room. Cloning shares the same underlying state;
/// every mutating call executes under the per-room lock and broadcasts the
/// events it produced.
#[derive(Clone)]
pub struct Room {
    state: Arc<Mutex<RoomState>>,
    events: Sender<GameEvent>,
    config: RoomConfig,
}

impl Room {
    /// Deals a new game and returns the room handle plus the broadcast
    /// receiver. The initial deal events are already queued on the channel.
    pub fn create(config: RoomConfig) -> EngineResult<(Self, Receiver<GameEvent>)> {
        let (state, initial_events) = RoomState::new(config.seed)?;
        let (tx, rx) = mpsc::channel();
        let room = Room {
            state: Arc::new(Mutex::new(state)),
            events: tx,
            config,
        };
        room.broadcast(initial_events);
        Ok((room, rx))
    }

    /// Wraps an already-built state in a room handle. Used by fixtures that
    /// construct a game from a pre-arranged wall.
    pub fn with_state(state: RoomState, config: RoomConfig) -> (Self, Receiver<GameEvent>) {
        let (tx, rx) = mpsc::channel();
        let room = Room {
            state: Arc::new(Mutex::new(state)),
            events: tx,
            config,
        };
        (room, rx)
    }

    fn lock(&self) -> MutexGuard<'_, RoomState> {
        // A poisoned lock means another thread panicked mid-update; the
        // state machine rejects inconsistent calls, so keep serving.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn broadcast(&self, events: Vec<GameEvent>) {
        for event in events {
            // A closed receiver just means nobody is listening anymore.
            let _ = self.events.send(event);
        }
    }

    // -- transport-facing operations ---------------------------------------

    pub fn request_draw(&self, seat: Seat) -> EngineResult<Option<Tile>> {
        let mut state = self.lock();
        let (tile, events) = state.draw(seat)?;
        drop(state);
        self.broadcast(events);
        Ok(tile)
    }

    pub fn request_discard(&self, seat: Seat, tile_id: u8) -> EngineResult<()> {
        let mut state = self.lock();
        let events = state.discard(seat, tile_id)?;
        drop(state);
        self.broadcast(events);
        Ok(())
    }

    pub fn request_claim(&self, seat: Seat, meld_type: MeldType) -> EngineResult<()> {
        let mut state = self.lock();
        let events = state.claim(seat, meld_type)?;
        drop(state);
        self.broadcast(events);
        Ok(())
    }

    pub fn claim_options(&self, seat: Seat) -> Vec<MeldType> {
        self.lock().claim_options(seat)
    }

    pub fn check_win_and_settle(&self, seat: Seat) -> (bool, [i64; 4], Option<Seat>) {
        let mut state = self.lock();
        let (is_win, scores, winner, events) = state.check_win_and_settle(seat);
        drop(state);
        self.broadcast(events);
        (is_win, scores, winner)
    }

    pub fn scores(&self) -> [i64; 4] {
        self.lock().scores()
    }

    pub fn is_finished(&self) -> bool {
        self.lock().is_finished()
    }

    // -- bot worker --------------------------------------------------------

    /// Spawns a worker thread that plays `seat` until the game ends.
    ///
    /// The worker acts only on its own turn: it claims the pending discard
    /// when it can (highest-priority meld first), draws otherwise, then
    /// searches for a discard. Every action revalidates under the lock, so
    /// a human claim landing during the think delay simply makes the bot's
    /// attempt fail and the worker re-observes the new state.
    pub fn spawn_bot(&self, seat: Seat) -> JoinHandle<()> {
        let room = self.clone();
        thread::Builder::new()
            .name(format!("bot-{seat}"))
            .spawn(move || room.run_bot(seat))
            .expect("failed to spawn bot worker thread")
    }

    fn run_bot(&self, seat: Seat) {
        let bot = Bot::new(self.config.search.clone());
        tracing::debug!(%seat, "bot worker started");

        loop {
            let (phase, turn) = {
                let state = self.lock();
                (state.phase(), state.turn())
            };

            match phase {
                Phase::Finished(_) => break,
                _ if turn != seat => {
                    thread::sleep(self.config.poll_interval);
                    continue;
                }
                Phase::AwaitDraw => {
                    thread::sleep(self.config.think_delay);
                    self.bot_draw_or_claim(&bot, seat);
                }
                Phase::AwaitDiscard => {
                    thread::sleep(self.config.think_delay);
                    self.bot_discard(&bot, seat);
                }
            }
        }
        tracing::debug!(%seat, "bot worker finished");
    }

    /// Claim the pending discard if possible, otherwise draw. Races with
    /// human claims are resolved by whoever takes the lock first; a lost
    /// race surfaces as a recoverable error and the loop re-observes.
    fn bot_draw_or_claim(&self, bot: &Bot, seat: Seat) {
        let claim = {
            let state = self.lock();
            if state.turn() != seat || state.phase() != Phase::AwaitDraw {
                return;
            }
            bot.choose_claim(&state, seat)
        };

        let result = match claim {
            Some(meld_type) => {
                tracing::info!(%seat, %meld_type, "bot claims discard");
                self.request_claim(seat, meld_type).map(|_| ())
            }
            None => self.request_draw(seat).map(|_| ()),
        };
        if let Err(err) = result {
            tracing::debug!(%seat, %err, "bot action superseded");
        }
    }

    /// Search for a discard on a snapshot, then revalidate and commit. The
    /// lock is held only to capture the view and to apply the result, never
    /// across the search itself; if the state moved underneath us the
    /// discard attempt fails recoverably.
    fn bot_discard(&self, bot: &Bot, seat: Seat) {
        let view = {
            let state = self.lock();
            if state.turn() != seat || state.phase() != Phase::AwaitDiscard {
                return;
            }
            BotView::snapshot(&state, seat, false)
        };

        let Some(tile) = bot.choose_discard_from(view) else {
            return;
        };
        if let Err(err) = self.request_discard(seat, tile.id()) {
            tracing::debug!(%seat, %err, "bot discard superseded");
        }
    }
}
