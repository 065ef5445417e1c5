use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::utils::letters::{letter_value, ALPHABET};

/// A single letter tile. Its value is fixed by the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub letter: char,
    pub value: u32,
}

impl Tile {
    /// Build a tile for an A-Z letter (case-insensitive). Returns `None` for anything else.
    pub fn new(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        letter_value(letter).map(|value| Self { letter, value })
    }

    /// Convenience for fixtures: one tile per letter of `word`, skipping non-letters
    pub fn from_word(word: &str) -> Vec<Self> {
        word.chars().filter_map(Self::new).collect()
    }
}

/// Produces uniformly random tiles from an injected random source.
///
/// Not cryptographically meaningful; tests pass a seeded RNG to get
/// reproducible draws.
#[derive(Debug)]
pub struct TileSupply<R> {
    rng: R,
}

impl<R: Rng> TileSupply<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw `n` tiles, each letter sampled independently from A-Z
    pub fn draw_tiles(&mut self, n: usize) -> Vec<Tile> {
        (0..n).map(|_| self.draw_one()).collect()
    }

    fn draw_one(&mut self) -> Tile {
        let idx = self.rng.random_range(0..ALPHABET.len());
        let letter = ALPHABET[idx] as char;
        Tile {
            letter,
            value: letter_value(letter).unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_tile_values_follow_table() {
        assert_eq!(Tile::new('c'), Some(Tile { letter: 'C', value: 3 }));
        assert_eq!(Tile::new('Z').map(|t| t.value), Some(10));
        assert_eq!(Tile::new('!'), None);
    }

    #[test]
    fn test_draw_tiles_count_and_alphabet() {
        let mut supply = TileSupply::new(StdRng::seed_from_u64(7));
        let tiles = supply.draw_tiles(50);
        assert_eq!(tiles.len(), 50);
        for tile in &tiles {
            assert!(tile.letter.is_ascii_uppercase());
            assert_eq!(Some(tile.value), letter_value(tile.letter));
        }
    }

    #[test]
    fn test_draw_tiles_is_reproducible_with_same_seed() {
        let mut a = TileSupply::new(StdRng::seed_from_u64(42));
        let mut b = TileSupply::new(StdRng::seed_from_u64(42));
        assert_eq!(a.draw_tiles(7), b.draw_tiles(7));
    }

    #[test]
    fn test_draw_zero_tiles() {
        let mut supply = TileSupply::new(StdRng::seed_from_u64(1));
        assert!(supply.draw_tiles(0).is_empty());
    }

    #[test]
    fn test_from_word() {
        let tiles = Tile::from_word("cat");
        let letters: String = tiles.iter().map(|t| t.letter).collect();
        assert_eq!(letters, "CAT");
        assert_eq!(tiles.iter().map(|t| t.value).sum::<u32>(), 5);
    }
}
