use std::str::FromStr;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Position},
    error::MoveError,
    extractor::{extract_words, ExtractedWord},
    placement::{PendingMove, PlacementRecord, TileOrigin},
    rack::{Rack, DEFAULT_RACK_SIZE},
    scorer::{MoveScore, Scorer},
    tile::{Tile, TileSupply},
    validator::WordValidator,
};

/// Which runs a commit scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringScope {
    /// Every run of two or more tiles on the board
    #[default]
    WholeBoard,
    /// Only runs that include a tile placed this turn
    NewWords,
}

impl FromStr for ScoringScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whole_board" => Ok(ScoringScope::WholeBoard),
            "new_words" => Ok(ScoringScope::NewWords),
            other => Err(format!("unknown scoring scope '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub rack_size: usize,
    pub scoring_scope: ScoringScope,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            rack_size: DEFAULT_RACK_SIZE,
            scoring_scope: ScoringScope::WholeBoard,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TurnPhase {
    /// Nothing placed this turn
    Idle,
    /// At least one tile placed this turn
    Placing,
    /// Words are being validated; the board is locked
    Committing { generation: u64 },
    /// The session is over; every command is refused
    Ended,
}

/// Words to validate for a commit that has been started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTicket {
    pub generation: u64,
    pub words: Vec<ExtractedWord>,
}

/// What a completed commit did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub score: MoveScore,
    pub placed: Vec<PlacementRecord>,
}

/// Everything one player's game consists of: board, rack, the move in
/// progress and the running score.
///
/// All mutation goes through the methods here. A commit is split into
/// [`GameState::begin_commit`] and [`GameState::finish_commit`] so callers can
/// run dictionary lookups without holding the state; a finish for a move that
/// was skipped in the meantime is discarded.
#[derive(Debug)]
pub struct GameState {
    board: Board,
    rack: Rack,
    pending: PendingMove,
    score: Score,
    supply: TileSupply<StdRng>,
    rules: GameRules,
    phase: TurnPhase,
    generation: u64,
    turn: u32,
    in_hand: Option<TileOrigin>,
}

impl GameState {
    pub fn new(rules: GameRules, rng: StdRng) -> Self {
        let mut supply = TileSupply::new(rng);
        let rack = Rack::new(&mut supply, rules.rack_size);
        Self::with_rack(rules, supply, rack)
    }

    /// Start from a known rack instead of a random draw
    pub fn with_rack(rules: GameRules, supply: TileSupply<StdRng>, rack: Rack) -> Self {
        Self {
            board: Board::new(),
            rack,
            pending: PendingMove::new(),
            score: Score::default(),
            supply,
            rules,
            phase: TurnPhase::Idle,
            generation: 0,
            turn: 0,
            in_hand: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn pending(&self) -> &PendingMove {
        &self.pending
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn rules(&self) -> GameRules {
        self.rules
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn in_hand(&self) -> Option<TileOrigin> {
        self.in_hand
    }

    fn is_committing(&self) -> bool {
        matches!(self.phase, TurnPhase::Committing { .. })
    }

    pub fn is_ended(&self) -> bool {
        self.phase == TurnPhase::Ended
    }

    /// Refuse anything once the session is over
    fn check_live(&self) -> Result<(), MoveError> {
        if self.is_ended() {
            Err(MoveError::SessionEnded)
        } else {
            Ok(())
        }
    }

    fn settle_phase(&mut self) {
        if !self.is_committing() && !self.is_ended() {
            self.phase = if self.pending.is_empty() {
                TurnPhase::Idle
            } else {
                TurnPhase::Placing
            };
        }
    }

    /// Tile the origin currently names, if the origin may be picked up
    fn tile_at_origin(&self, origin: TileOrigin) -> Result<Tile, MoveError> {
        match origin {
            TileOrigin::FromRack(index) => {
                self.rack
                    .get(index)
                    .copied()
                    .ok_or(MoveError::IndexOutOfRange {
                        index,
                        len: self.rack.len(),
                    })
            }
            TileOrigin::FromBoard(pos) => {
                pos.check_bounds()?;
                let tile = self.board.get(pos).ok_or(MoveError::EmptyCell {
                    row: pos.row,
                    col: pos.col,
                })?;
                if !self.pending.contains(pos) {
                    return Err(MoveError::NotPendingTile {
                        row: pos.row,
                        col: pos.col,
                    });
                }
                Ok(tile)
            }
        }
    }

    /// Start moving a tile. Nothing moves until it is dropped.
    pub fn pick_up(&mut self, origin: TileOrigin) -> Result<Tile, MoveError> {
        self.check_live()?;
        if self.is_committing() {
            return Err(MoveError::CommitInProgress);
        }
        if self.in_hand.is_some() {
            return Err(MoveError::OperationInFlight);
        }
        let tile = self.tile_at_origin(origin)?;
        self.in_hand = Some(origin);
        Ok(tile)
    }

    /// Let go of the held tile without moving it
    pub fn cancel_pick_up(&mut self) {
        self.in_hand = None;
    }

    /// Drop the held tile on a board cell. The hand is empty afterwards
    /// whether or not the drop was accepted.
    pub fn drop_on(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        self.check_live()?;
        let origin = self.in_hand.take().ok_or(MoveError::NothingInHand)?;
        self.place_from(origin, Position::new(row, col))
    }

    /// Drop the held tile back on the rack
    pub fn drop_on_rack(&mut self) -> Result<(), MoveError> {
        self.check_live()?;
        match self.in_hand.take().ok_or(MoveError::NothingInHand)? {
            // Rack to rack changes nothing
            TileOrigin::FromRack(_) => Ok(()),
            TileOrigin::FromBoard(pos) => self.unplace(pos),
        }
    }

    /// Put a tile on the board at `(row, col)` in one step
    pub fn place(&mut self, row: usize, col: usize, origin: TileOrigin) -> Result<(), MoveError> {
        self.pick_up(origin)?;
        self.drop_on(row, col)
    }

    /// Take a tile placed this turn off the board and back into the rack
    pub fn return_to_rack(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        self.pick_up(TileOrigin::FromBoard(Position::new(row, col)))?;
        self.drop_on_rack()
    }

    fn place_from(&mut self, origin: TileOrigin, to: Position) -> Result<(), MoveError> {
        self.check_live()?;
        if self.is_committing() {
            return Err(MoveError::CommitInProgress);
        }
        to.check_bounds()?;
        if self.board.is_occupied(to) {
            return Err(MoveError::CellOccupied {
                row: to.row,
                col: to.col,
            });
        }
        let tile = self.tile_at_origin(origin)?;

        match origin {
            TileOrigin::FromRack(index) => {
                self.board.put(to, tile)?;
                self.rack.remove(index)?;
                self.pending.record(to, tile);
            }
            TileOrigin::FromBoard(from) => {
                self.board.take(from);
                self.board.put(to, tile)?;
                self.pending.relocate(from, to);
            }
        }

        tracing::debug!(
            "Placed {} at ({}, {}) from {:?}",
            tile.letter,
            to.row,
            to.col,
            origin
        );
        self.settle_phase();
        Ok(())
    }

    fn unplace(&mut self, pos: Position) -> Result<(), MoveError> {
        self.check_live()?;
        if self.is_committing() {
            return Err(MoveError::CommitInProgress);
        }
        let tile = self.tile_at_origin(TileOrigin::FromBoard(pos))?;
        self.board.take(pos);
        self.pending.remove(pos);
        self.rack.push(tile);

        tracing::debug!("Returned {} from ({}, {}) to rack", tile.letter, pos.row, pos.col);
        self.settle_phase();
        Ok(())
    }

    /// Lock the board and collect the words to validate
    pub fn begin_commit(&mut self) -> Result<CommitTicket, MoveError> {
        self.check_live()?;
        if self.is_committing() {
            return Err(MoveError::ReentrantCommit);
        }
        if self.pending.is_empty() {
            return Err(MoveError::NoPendingMove);
        }

        self.in_hand = None;
        self.generation += 1;
        self.phase = TurnPhase::Committing {
            generation: self.generation,
        };

        let mut words = extract_words(&self.board);
        if self.rules.scoring_scope == ScoringScope::NewWords {
            words.retain(|w| w.touches(self.pending.positions()));
        }

        tracing::debug!(
            "Commit {} started with {} placement(s), {} word(s) to validate",
            self.generation,
            self.pending.len(),
            words.len()
        );

        Ok(CommitTicket {
            generation: self.generation,
            words,
        })
    }

    /// Apply a scored move, if the commit it belongs to is still current
    pub fn finish_commit(
        &mut self,
        generation: u64,
        score: MoveScore,
    ) -> Result<CommitOutcome, MoveError> {
        if self.phase != (TurnPhase::Committing { generation }) {
            tracing::debug!("Discarding result of superseded commit {}", generation);
            return Err(MoveError::StaleCommit);
        }

        self.score.player = self.score.player.saturating_add(score.total);
        let placed = self.pending.drain();
        self.rack.top_up(&mut self.supply);
        self.turn += 1;
        self.phase = TurnPhase::Idle;

        tracing::info!(
            "Committed {} tile(s) for {} point(s): {:?}",
            placed.len(),
            score.total,
            score.words.iter().map(|w| (&w.word, w.verdict)).collect::<Vec<_>>()
        );

        Ok(CommitOutcome { score, placed })
    }

    /// Commit the pending move, waiting on the dictionary in place
    pub async fn commit(&mut self, validator: &WordValidator) -> Result<CommitOutcome, MoveError> {
        let ticket = self.begin_commit()?;
        let score = Scorer::score_move(&ticket.words, validator).await;
        self.finish_commit(ticket.generation, score)
    }

    /// Forfeit the turn: pending tiles leave the board, the rack is redrawn and
    /// any commit still in flight is abandoned.
    pub fn skip(&mut self) -> Result<(), MoveError> {
        self.check_live()?;
        for record in self.pending.drain() {
            self.board.take(record.position);
        }
        self.rack.reset(&mut self.supply);
        self.in_hand = None;
        self.generation += 1;
        self.turn += 1;
        self.phase = TurnPhase::Idle;

        tracing::debug!("Turn skipped, rack redrawn");
        Ok(())
    }

    /// Close the game for good. Any outstanding commit is discarded and every
    /// later command is refused with `SessionEnded`.
    pub fn end_session(&mut self) {
        self.generation += 1;
        self.in_hand = None;
        self.phase = TurnPhase::Ended;
    }
}
