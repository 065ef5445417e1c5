use rand::Rng;

use super::{
    error::MoveError,
    tile::{Tile, TileSupply},
};

/// Nominal number of tiles in a full hand
pub const DEFAULT_RACK_SIZE: usize = 7;

/// A player's hand. Order is insertion order and is observable: tiles are
/// picked by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rack {
    tiles: Vec<Tile>,
    target_size: usize,
}

impl Rack {
    /// Start with a full fresh draw
    pub fn new<R: Rng>(supply: &mut TileSupply<R>, target_size: usize) -> Self {
        Self {
            tiles: supply.draw_tiles(target_size),
            target_size,
        }
    }

    /// Build a rack holding exactly these tiles (fixtures, restored sessions)
    pub fn from_tiles(tiles: Vec<Tile>, target_size: usize) -> Self {
        Self { tiles, target_size }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Append `n` freshly drawn tiles
    pub fn refill<R: Rng>(&mut self, supply: &mut TileSupply<R>, n: usize) {
        self.tiles.extend(supply.draw_tiles(n));
    }

    /// Refill just enough to reach the target size
    pub fn top_up<R: Rng>(&mut self, supply: &mut TileSupply<R>) {
        let missing = self.target_size.saturating_sub(self.tiles.len());
        self.refill(supply, missing);
    }

    /// Remove and return the tile at `index`, keeping the others in order
    pub fn remove(&mut self, index: usize) -> Result<Tile, MoveError> {
        if index >= self.tiles.len() {
            return Err(MoveError::IndexOutOfRange {
                index,
                len: self.tiles.len(),
            });
        }
        Ok(self.tiles.remove(index))
    }

    /// Put a tile back at the end of the hand
    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Discard everything and draw a full hand
    pub fn reset<R: Rng>(&mut self, supply: &mut TileSupply<R>) {
        self.tiles = supply.draw_tiles(self.target_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn supply() -> TileSupply<StdRng> {
        TileSupply::new(StdRng::seed_from_u64(3))
    }

    fn letters(rack: &Rack) -> String {
        rack.tiles().iter().map(|t| t.letter).collect()
    }

    #[test]
    fn test_new_rack_is_full() {
        let rack = Rack::new(&mut supply(), DEFAULT_RACK_SIZE);
        assert_eq!(rack.len(), 7);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut rack = Rack::from_tiles(Tile::from_word("ABCDE"), 7);
        let removed = rack.remove(1).unwrap();
        assert_eq!(removed.letter, 'B');
        assert_eq!(letters(&rack), "ACDE");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut rack = Rack::from_tiles(Tile::from_word("AB"), 7);
        assert_eq!(
            rack.remove(2),
            Err(MoveError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(letters(&rack), "AB");
    }

    #[test]
    fn test_refill_appends() {
        let mut rack = Rack::from_tiles(Tile::from_word("QZ"), 7);
        rack.refill(&mut supply(), 3);
        assert_eq!(rack.len(), 5);
        assert_eq!(&letters(&rack)[..2], "QZ");
    }

    #[test]
    fn test_top_up_reaches_target() {
        let mut rack = Rack::from_tiles(Tile::from_word("CAT"), 7);
        rack.top_up(&mut supply());
        assert_eq!(rack.len(), 7);

        // Already over target: nothing drawn
        let mut big = Rack::from_tiles(Tile::from_word("ABCDEFGHI"), 7);
        big.top_up(&mut supply());
        assert_eq!(big.len(), 9);
    }

    #[test]
    fn test_reset_always_yields_target_size() {
        let mut supply = supply();
        for start in ["", "A", "ABCDEFGHIJ"] {
            let mut rack = Rack::from_tiles(Tile::from_word(start), 7);
            rack.reset(&mut supply);
            assert_eq!(rack.len(), 7);
        }
    }
}
