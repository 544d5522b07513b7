#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::occupancy::OccupancyIndex;
use crate::piece::{PieceId, PieceStore};
use crate::vec::Vec2;

/// The topmost placed piece containing `world_pt`, if any.
///
/// Only the fine cell under the point is consulted; ties between overlapping
/// pieces go to the one placed last.
#[must_use]
pub fn piece_at(world_pt: Vec2, index: &OccupancyIndex, store: &PieceStore) -> Option<PieceId> {
    index
        .entries_at(world_pt)
        .iter()
        .filter(|entry| entry.rect.contains_point(world_pt))
        .filter_map(|entry| store.rank(&entry.id).map(|rank| (rank, entry.id)))
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, id)| id)
}
