use thiserror::Error;

/// Reasons an engine command had no effect.
///
/// None of these are fatal: the state is left exactly as it was before the
/// command, and the reason is reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("cell ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("rack has no tile at index {index} (holding {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cell ({row}, {col}) holds no tile")]
    EmptyCell { row: usize, col: usize },

    #[error("cell ({row}, {col}) does not hold a tile placed this turn")]
    NotPendingTile { row: usize, col: usize },

    #[error("no tiles have been placed this turn")]
    NoPendingMove,

    #[error("a commit is already in progress")]
    ReentrantCommit,

    #[error("the board is locked while a commit is in progress")]
    CommitInProgress,

    #[error("another tile operation is already in flight")]
    OperationInFlight,

    #[error("no tile is being held")]
    NothingInHand,

    #[error("the game session has ended")]
    SessionEnded,

    #[error("commit result belongs to a move that was skipped or superseded")]
    StaleCommit,
}

impl MoveError {
    /// Stable machine-readable name used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            MoveError::CellOccupied { .. } => "cell_occupied",
            MoveError::OutOfBounds { .. } => "out_of_bounds",
            MoveError::IndexOutOfRange { .. } => "index_out_of_range",
            MoveError::EmptyCell { .. } => "empty_cell",
            MoveError::NotPendingTile { .. } => "not_pending_tile",
            MoveError::NoPendingMove => "no_pending_move",
            MoveError::ReentrantCommit => "reentrant_commit",
            MoveError::CommitInProgress => "commit_in_progress",
            MoveError::OperationInFlight => "operation_in_flight",
            MoveError::NothingInHand => "nothing_in_hand",
            MoveError::SessionEnded => "session_ended",
            MoveError::StaleCommit => "stale_commit",
        }
    }
}
