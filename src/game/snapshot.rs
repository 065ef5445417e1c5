use serde::{Deserialize, Serialize};

use super::{
    error::MoveError,
    placement::{PlacementRecord, TileOrigin},
    tile::Tile,
    turn::{GameState, Score, TurnPhase},
};

/// Read-only copy of everything a client needs to draw the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Vec<Vec<Option<Tile>>>,
    pub rack: Vec<Tile>,
    pub pending: Vec<PlacementRecord>,
    pub score: Score,
    pub phase: TurnPhase,
    pub turn: u32,
    pub in_hand: Option<TileOrigin>,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            board: state.board().to_grid(),
            rack: state.rack().tiles().to_vec(),
            pending: state.pending().records().to_vec(),
            score: state.score(),
            phase: state.phase(),
            turn: state.turn(),
            in_hand: state.in_hand(),
        }
    }
}

/// Why a command had no effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub kind: String,
    pub message: String,
}

impl From<&MoveError> for Rejection {
    fn from(err: &MoveError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Reply to every command: the state after it ran, and the reason if it was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub snapshot: GameSnapshot,
    pub rejection: Option<Rejection>,
}

impl CommandOutcome {
    pub fn new<T>(state: &GameState, result: &Result<T, MoveError>) -> Self {
        Self {
            snapshot: GameSnapshot::from(state),
            rejection: result.as_ref().err().map(Rejection::from),
        }
    }

    pub fn accepted(state: &GameState) -> Self {
        Self {
            snapshot: GameSnapshot::from(state),
            rejection: None,
        }
    }
}
