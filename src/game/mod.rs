// Move-resolution engine: tiles, rack, board, placement ledger, word
// extraction, validation/scoring and the turn state machine.

pub mod board;
pub mod error;
pub mod extractor;
pub mod placement;
pub mod rack;
pub mod scorer;
pub mod snapshot;
pub mod tile;
pub mod turn;
pub mod validator;

pub use board::{Board, Position, BOARD_SIZE};
pub use error::MoveError;
pub use extractor::{extract_words, Direction, ExtractedWord};
pub use placement::{PendingMove, PlacementRecord, TileOrigin};
pub use rack::{Rack, DEFAULT_RACK_SIZE};
pub use scorer::{MoveScore, Scorer, WordOutcome};
pub use snapshot::{CommandOutcome, GameSnapshot, Rejection};
pub use tile::{Tile, TileSupply};
pub use turn::{CommitOutcome, CommitTicket, GameRules, GameState, Score, ScoringScope, TurnPhase};
pub use validator::{Verdict, WordValidator};
