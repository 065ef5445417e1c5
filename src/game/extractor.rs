use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Position, BOARD_SIZE},
    tile::Tile,
};

/// Shortest run of tiles that counts as a word
pub const MIN_WORD_LENGTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

/// A run of consecutive tiles read off the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedWord {
    pub text: String,
    pub positions: Vec<Position>,
    pub direction: Direction,
}

impl ExtractedWord {
    /// True if any of this word's cells is in `cells`
    pub fn touches(&self, mut cells: impl Iterator<Item = Position>) -> bool {
        cells.any(|p| self.positions.contains(&p))
    }
}

/// Read every horizontal then every vertical run of two or more tiles.
///
/// Rows are scanned 0..15 left to right, then columns 0..15 top to bottom.
/// Runs are not deduplicated: a tile at a crossing belongs to one word per
/// direction.
pub fn extract_words(board: &Board) -> Vec<ExtractedWord> {
    let mut words = Vec::new();

    for (row, cells) in board.rows().enumerate() {
        let line = cells
            .iter()
            .enumerate()
            .map(|(col, tile)| (Position::new(row, col), *tile));
        scan_line(line, Direction::Across, &mut words);
    }

    for col in 0..BOARD_SIZE {
        let line = board
            .column(col)
            .enumerate()
            .map(|(row, tile)| (Position::new(row, col), tile));
        scan_line(line, Direction::Down, &mut words);
    }

    words
}

fn scan_line(
    line: impl Iterator<Item = (Position, Option<Tile>)>,
    direction: Direction,
    out: &mut Vec<ExtractedWord>,
) {
    let mut run: Vec<(Position, Tile)> = Vec::new();

    for (pos, cell) in line {
        match cell {
            Some(tile) => run.push((pos, tile)),
            None => flush_run(&mut run, direction, out),
        }
    }
    flush_run(&mut run, direction, out);
}

fn flush_run(run: &mut Vec<(Position, Tile)>, direction: Direction, out: &mut Vec<ExtractedWord>) {
    if run.len() >= MIN_WORD_LENGTH {
        out.push(ExtractedWord {
            text: run.iter().map(|(_, t)| t.letter).collect(),
            positions: run.iter().map(|(p, _)| *p).collect(),
            direction,
        });
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(tiles: &[(usize, usize, char)]) -> Board {
        let mut board = Board::new();
        for &(row, col, letter) in tiles {
            board
                .put(Position::new(row, col), Tile::new(letter).unwrap())
                .unwrap();
        }
        board
    }

    fn texts(words: &[ExtractedWord]) -> Vec<&str> {
        words.iter().map(|w| w.text.as_str()).collect()
    }

    #[test]
    fn test_empty_board_has_no_words() {
        assert!(extract_words(&Board::new()).is_empty());
    }

    #[test]
    fn test_single_row_word() {
        let board = board_with(&[(7, 7, 'C'), (7, 8, 'A'), (7, 9, 'T')]);
        let words = extract_words(&board);
        assert_eq!(texts(&words), vec!["CAT"]);
        assert_eq!(words[0].direction, Direction::Across);
        assert_eq!(
            words[0].positions,
            vec![Position::new(7, 7), Position::new(7, 8), Position::new(7, 9)]
        );
    }

    #[test]
    fn test_isolated_letters_are_not_words() {
        let board = board_with(&[(0, 0, 'A'), (2, 2, 'B'), (14, 14, 'C')]);
        assert!(extract_words(&board).is_empty());
    }

    #[test]
    fn test_runs_split_on_gaps_and_reach_edges() {
        let board = board_with(&[
            (3, 0, 'A'),
            (3, 1, 'T'),
            (3, 3, 'Q'),
            (3, 12, 'D'),
            (3, 13, 'O'),
            (3, 14, 'G'),
        ]);
        assert_eq!(texts(&extract_words(&board)), vec!["AT", "DOG"]);
    }

    #[test]
    fn test_rows_before_columns_and_crossings_counted_twice() {
        // C A T across row 7, C O W down column 7 sharing the C
        let board = board_with(&[
            (7, 7, 'C'),
            (7, 8, 'A'),
            (7, 9, 'T'),
            (8, 7, 'O'),
            (9, 7, 'W'),
        ]);
        let words = extract_words(&board);
        assert_eq!(texts(&words), vec!["CAT", "COW"]);
        assert_eq!(words[1].direction, Direction::Down);
    }

    #[test]
    fn test_same_word_both_directions_not_deduplicated() {
        // 2x2 block: AT / TA gives two across and two down words
        let board = board_with(&[(0, 0, 'A'), (0, 1, 'T'), (1, 0, 'T'), (1, 1, 'A')]);
        assert_eq!(texts(&extract_words(&board)), vec!["AT", "TA", "AT", "TA"]);
    }

    #[test]
    fn test_never_returns_short_runs() {
        let mut board = Board::new();
        // A scattered diagonal plus some pairs
        for i in 0..BOARD_SIZE {
            board.put(Position::new(i, i), Tile::new('E').unwrap()).unwrap();
        }
        board.put(Position::new(0, 1), Tile::new('X').unwrap()).unwrap();
        for word in extract_words(&board) {
            assert!(word.text.len() >= MIN_WORD_LENGTH);
            assert_eq!(word.text.len(), word.positions.len());
        }
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let board = board_with(&[(5, 5, 'H'), (5, 6, 'I')]);
        assert_eq!(extract_words(&board), extract_words(&board));
    }

    #[test]
    fn test_touches() {
        let board = board_with(&[(5, 5, 'H'), (5, 6, 'I')]);
        let word = &extract_words(&board)[0];
        assert!(word.touches([Position::new(5, 6)].into_iter()));
        assert!(!word.touches([Position::new(6, 6)].into_iter()));
    }
}
