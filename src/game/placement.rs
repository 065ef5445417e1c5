use serde::{Deserialize, Serialize};

use super::{board::Position, tile::Tile};

/// Where the tile being placed comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileOrigin {
    /// Tile at this index of the rack
    FromRack(usize),
    /// Tile already on the board at this cell, placed this turn
    FromBoard(Position),
}

/// One tile put on the board since the last commit or skip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub position: Position,
    pub tile: Tile,
}

/// Ledger of the move in progress.
///
/// Every record points at an occupied board cell holding exactly the recorded
/// tile; the turn controller keeps the two in step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingMove {
    records: Vec<PlacementRecord>,
}

impl PendingMove {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.find(pos).is_some()
    }

    pub fn find(&self, pos: Position) -> Option<&PlacementRecord> {
        self.records.iter().find(|r| r.position == pos)
    }

    pub(crate) fn record(&mut self, position: Position, tile: Tile) {
        self.records.push(PlacementRecord { position, tile });
    }

    /// Move an existing record to new coordinates rather than adding a second one.
    /// Returns false if nothing was recorded at `from`.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) -> bool {
        match self.records.iter_mut().find(|r| r.position == from) {
            Some(record) => {
                record.position = to;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, pos: Position) -> Option<PlacementRecord> {
        let idx = self.records.iter().position(|r| r.position == pos)?;
        Some(self.records.remove(idx))
    }

    /// Empty the ledger, handing back what it held
    pub(crate) fn drain(&mut self) -> Vec<PlacementRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.records.iter().map(|r| r.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(c: char) -> Tile {
        Tile::new(c).unwrap()
    }

    #[test]
    fn test_relocate_updates_in_place() {
        let mut pending = PendingMove::new();
        pending.record(Position::new(7, 7), tile('C'));
        assert!(pending.relocate(Position::new(7, 7), Position::new(8, 7)));
        assert_eq!(pending.len(), 1);
        assert!(pending.contains(Position::new(8, 7)));
        assert!(!pending.contains(Position::new(7, 7)));
    }

    #[test]
    fn test_relocate_missing_record() {
        let mut pending = PendingMove::new();
        assert!(!pending.relocate(Position::new(0, 0), Position::new(1, 1)));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_remove_and_drain() {
        let mut pending = PendingMove::new();
        pending.record(Position::new(1, 1), tile('A'));
        pending.record(Position::new(1, 2), tile('B'));
        let removed = pending.remove(Position::new(1, 1)).unwrap();
        assert_eq!(removed.tile, tile('A'));
        assert_eq!(pending.remove(Position::new(1, 1)), None);
        let rest = pending.drain();
        assert_eq!(rest.len(), 1);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_origin_wire_format() {
        let json = serde_json::to_value(TileOrigin::FromRack(2)).unwrap();
        assert_eq!(json, serde_json::json!({ "from_rack": 2 }));

        let origin: TileOrigin =
            serde_json::from_str(r#"{"from_board":{"row":7,"col":8}}"#).unwrap();
        assert_eq!(origin, TileOrigin::FromBoard(Position::new(7, 8)));
    }
}
