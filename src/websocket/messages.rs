use serde::{Deserialize, Serialize};

use crate::game::{GameSnapshot, Rejection, TileOrigin, WordOutcome};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    PlaceTile {
        origin: TileOrigin,
        row: usize,
        col: usize,
    },
    ReturnTile {
        row: usize,
        col: usize,
    },
    /// Two-step placement: lift a tile, then drop it on a cell or the rack
    PickUp {
        origin: TileOrigin,
    },
    DropOn {
        row: usize,
        col: usize,
    },
    DropOnRack,
    CancelPickUp,
    Commit,
    Skip,
    GetState,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    State {
        snapshot: GameSnapshot,
        rejection: Option<Rejection>,
    },
    MoveScored {
        words: Vec<WordOutcome>,
        total: u32,
    },
    Error {
        message: String,
    },
}
