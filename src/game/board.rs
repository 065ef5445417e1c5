use serde::{Deserialize, Serialize};

use super::{error::MoveError, tile::Tile};

/// The board is always 15x15
pub const BOARD_SIZE: usize = 15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Reject coordinates off the board
    pub fn check_bounds(&self) -> Result<(), MoveError> {
        if self.in_bounds() {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds {
                row: self.row,
                col: self.col,
            })
        }
    }
}

/// Fixed-size grid where each cell holds at most one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Tile at `pos`, or `None` for an empty or off-board cell
    pub fn get(&self, pos: Position) -> Option<Tile> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.row][pos.col]
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Write a tile into an empty cell
    pub(crate) fn put(&mut self, pos: Position, tile: Tile) -> Result<(), MoveError> {
        pos.check_bounds()?;
        let cell = &mut self.cells[pos.row][pos.col];
        if cell.is_some() {
            return Err(MoveError::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }
        *cell = Some(tile);
        Ok(())
    }

    /// Clear a cell, returning what was there
    pub(crate) fn take(&mut self, pos: Position) -> Option<Tile> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.row][pos.col].take()
    }

    /// Rows top to bottom, each cell left to right
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Tile>; BOARD_SIZE]> {
        self.cells.iter()
    }

    /// Cells of column `col`, top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<Tile>> + '_ {
        self.cells.iter().map(move |row| row[col])
    }

    /// Grid as nested vectors for serialization
    pub fn to_grid(&self) -> Vec<Vec<Option<Tile>>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(c: char) -> Tile {
        Tile::new(c).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.rows().count(), BOARD_SIZE);
        assert!(board.rows().all(|row| row.len() == BOARD_SIZE));
    }

    #[test]
    fn test_put_and_take() {
        let mut board = Board::new();
        let pos = Position::new(7, 7);
        board.put(pos, tile('A')).unwrap();
        assert_eq!(board.get(pos), Some(tile('A')));
        assert_eq!(board.take(pos), Some(tile('A')));
        assert!(!board.is_occupied(pos));
    }

    #[test]
    fn test_put_on_occupied_cell_leaves_board_unchanged() {
        let mut board = Board::new();
        let pos = Position::new(0, 14);
        board.put(pos, tile('A')).unwrap();
        let before = board.clone();
        assert_eq!(
            board.put(pos, tile('B')),
            Err(MoveError::CellOccupied { row: 0, col: 14 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(
            board.put(Position::new(15, 0), tile('A')),
            Err(MoveError::OutOfBounds { row: 15, col: 0 })
        );
        assert_eq!(board.get(Position::new(0, 99)), None);
        assert_eq!(board.take(Position::new(99, 99)), None);
    }

    #[test]
    fn test_column_reads_top_to_bottom() {
        let mut board = Board::new();
        board.put(Position::new(0, 3), tile('X')).unwrap();
        board.put(Position::new(14, 3), tile('Y')).unwrap();
        let col: Vec<_> = board.column(3).collect();
        assert_eq!(col.len(), BOARD_SIZE);
        assert_eq!(col[0], Some(tile('X')));
        assert_eq!(col[14], Some(tile('Y')));
        assert!(col[1..14].iter().all(Option::is_none));
    }
}
