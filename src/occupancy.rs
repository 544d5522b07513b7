//! Multi-resolution occupancy index for placed pieces.
//!
//! DESIGN
//! ======
//! Three hashed grids share one world:
//! - coarse (500): presence flag per cell
//! - medium (200): presence flag per cell
//! - fine (50): list of `(id, rect)` entries per cell
//!
//! The fine grid is the only source of truth for membership. A coarse or
//! medium cell is present iff some fine cell whose origin lies inside it is
//! non-empty, so the coarse levels can only over-report.
//!
//! A collision query walks coarse → medium → fine, carrying forward only the
//! cells that were present at the previous level. Cost is proportional to the
//! coarse/medium cells touched plus the pieces actually co-located with the
//! candidate, not to the number of placed pieces.

#[cfg(test)]
#[path = "occupancy_test.rs"]
mod occupancy_test;

use std::collections::HashSet;

use crate::config::GridConfig;
use crate::grid::HashedGrid;
use crate::piece::{BackgroundPiece, PieceId};
use crate::rect::Rect;
use crate::vec::Vec2;

/// One piece's footprint as recorded in a fine cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub id: PieceId,
    pub rect: Rect,
}

/// Coarse-to-fine cascade of hashed grids.
#[derive(Debug, Clone)]
pub struct OccupancyIndex {
    coarse: HashedGrid<bool>,
    medium: HashedGrid<bool>,
    fine: HashedGrid<Vec<Entry>>,
}

impl Default for OccupancyIndex {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}

impl OccupancyIndex {
    /// Build an empty index with the given cell sizes. Sizes are validated by
    /// [`GridConfig::validate`].
    #[must_use]
    pub fn new(config: &GridConfig) -> Self {
        Self {
            coarse: HashedGrid::new(config.coarse),
            medium: HashedGrid::new(config.medium),
            fine: HashedGrid::new(config.fine),
        }
    }

    /// Whether `candidate` overlaps any registered piece other than `exclude`.
    ///
    /// `exclude` supports moving an already-placed piece: its own old
    /// footprint is not an obstacle.
    #[must_use]
    pub fn is_colliding(&self, candidate: &Rect, exclude: Option<PieceId>) -> bool {
        self.is_colliding_where(candidate, |entry| Some(entry.id) == exclude)
    }

    /// Like [`Self::is_colliding`] for a whole piece: its own id is skipped,
    /// and so is any piece it is bridged to.
    #[must_use]
    pub fn is_colliding_piece(&self, piece: &BackgroundPiece) -> bool {
        self.is_colliding_where(&piece.rect, |entry| {
            entry.id == piece.id || piece.bridges.iter().any(|b| b.links(piece.id, entry.id))
        })
    }

    /// Collision query with a caller-supplied filter. Entries for which `skip`
    /// returns true are never tested against the candidate. This is where a
    /// bridge-aware policy plugs in.
    pub fn is_colliding_where<F>(&self, candidate: &Rect, mut skip: F) -> bool
    where
        F: FnMut(&Entry) -> bool,
    {
        if candidate.is_degenerate() {
            return false;
        }

        let mut working = vec![*candidate];
        for grid in [&self.coarse, &self.medium] {
            working = refine(grid, &working);
            if working.is_empty() {
                tracing::trace!(cell_size = grid.cell_size(), "collision query pruned");
                return false;
            }
        }

        let mut visited = HashedGrid::<()>::new(self.fine.cell_size());
        let mut tested: HashSet<PieceId> = HashSet::new();
        for rect in &working {
            for origin in self.fine.cells_spanning(rect) {
                if visited.set(origin, Some(())).is_some() {
                    continue;
                }
                let Some(entries) = self.fine.get(origin) else {
                    continue;
                };
                for entry in entries {
                    if !tested.insert(entry.id) || skip(entry) {
                        continue;
                    }
                    if entry.rect.overlaps(candidate) {
                        tracing::trace!(hit = %entry.id, "collision found");
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Record a piece's footprint at every level.
    ///
    /// Call only after [`Self::is_colliding`] cleared the spot; the index does
    /// not re-check.
    pub fn register(&mut self, id: PieceId, rect: Rect) {
        for origin in self.coarse.cells_spanning(&rect) {
            self.coarse.set(origin, Some(true));
        }
        for origin in self.medium.cells_spanning(&rect) {
            self.medium.set(origin, Some(true));
        }
        for origin in self.fine.cells_spanning(&rect) {
            self.fine.entry_or_default(origin).push(Entry { id, rect });
        }
        tracing::debug!(%id, x = rect.x, y = rect.y, w = rect.w, h = rect.h, "piece registered");
    }

    /// Remove a piece previously registered with footprint `rect`.
    ///
    /// Coarse and medium flags left without any non-empty fine cell beneath
    /// them are cleared again.
    pub fn unregister(&mut self, id: PieceId, rect: Rect) {
        for origin in self.fine.cells_spanning(&rect) {
            let now_empty = match self.fine.get_mut(origin) {
                Some(entries) => {
                    entries.retain(|e| e.id != id);
                    entries.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.fine.set(origin, None);
            }
        }

        let stale_medium: Vec<Vec2> = self
            .medium
            .cells_spanning(&rect)
            .filter(|&origin| self.medium.has(origin) && !self.fine_occupied_within(&self.medium.cell_rect(origin)))
            .collect();
        for origin in stale_medium {
            self.medium.set(origin, None);
        }

        let stale_coarse: Vec<Vec2> = self
            .coarse
            .cells_spanning(&rect)
            .filter(|&origin| self.coarse.has(origin) && !self.fine_occupied_within(&self.coarse.cell_rect(origin)))
            .collect();
        for origin in stale_coarse {
            self.coarse.set(origin, None);
        }
        tracing::debug!(%id, "piece unregistered");
    }

    /// Entries recorded in the fine cell containing `p`.
    #[must_use]
    pub fn entries_at(&self, p: Vec2) -> &[Entry] {
        self.fine.get(p).map(Vec::as_slice).unwrap_or_default()
    }

    /// True when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fine.is_empty()
    }

    /// Whether any fine cell whose origin lies inside `cell` holds an entry.
    fn fine_occupied_within(&self, cell: &Rect) -> bool {
        self.fine
            .cells_spanning(cell)
            .filter(|o| o.x < cell.right() && o.y < cell.bottom())
            .any(|o| self.fine.has(o))
    }
}

/// Cells of `grid` spanned by `working` that are present, as cell-sized rects.
fn refine(grid: &HashedGrid<bool>, working: &[Rect]) -> Vec<Rect> {
    let mut seen = HashedGrid::<()>::new(grid.cell_size());
    let mut next = Vec::new();
    for rect in working {
        for origin in grid.cells_spanning(rect) {
            if grid.has(origin) && seen.set(origin, Some(())).is_none() {
                next.push(grid.cell_rect(origin));
            }
        }
    }
    next
}
