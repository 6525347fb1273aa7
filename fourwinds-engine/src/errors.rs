use std::fmt;

use crate::meld::MeldType;
use crate::state::Seat;

/// Errors surfaced by the room state machine.
///
/// Usage errors (`NotYourTurn`, `TileNotInHand`, `NoPendingDiscard`,
/// `NotEligible`) are recoverable and leave state untouched. `ShortWall` is
/// a defensive setup failure that aborts room creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A seat acted out of turn.
    NotYourTurn { seat: Seat, current: Seat },
    /// The turn seat acted in the wrong phase (e.g. drew twice in a row).
    WrongPhase { seat: Seat },
    /// Discard of a tile id the hand does not hold.
    TileNotInHand { seat: Seat, tile_id: u8 },
    /// Claim attempted with no discard on the table.
    NoPendingDiscard,
    /// Claim attempted without the hand tiles to support it.
    NotEligible { seat: Seat, meld_type: MeldType },
    /// Operation attempted after the game reached a terminal state.
    GameFinished,
    /// Fewer tiles available than the 53 an initial deal requires.
    ShortWall { remaining: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NotYourTurn { seat, current } => {
                write!(f, "it is not {seat}'s turn (current turn: {current})")
            }
            EngineError::WrongPhase { seat } => {
                write!(f, "{seat} cannot perform that action in the current phase")
            }
            EngineError::TileNotInHand { seat, tile_id } => {
                write!(f, "{seat} does not hold tile id {tile_id}")
            }
            EngineError::NoPendingDiscard => {
                write!(f, "no discarded tile is available to claim")
            }
            EngineError::NotEligible { seat, meld_type } => {
                write!(f, "{seat} cannot claim {meld_type} with the last discard")
            }
            EngineError::GameFinished => write!(f, "the game is already over"),
            EngineError::ShortWall { remaining } => {
                write!(f, "cannot deal: only {remaining} tiles in the wall")
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;
