//! Sparse hashed grid keyed by snapped cell coordinates.
//!
//! A `HashedGrid<T>` maps fixed-size square cells of an unbounded world to a
//! payload. Every query point is first snapped to the origin of the cell that
//! contains it, so any point inside a cell addresses the same entry. Storage
//! is a `HashMap` keyed by integer cell index, which handles negative and
//! far-apart coordinates without dense allocation.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use std::collections::HashMap;

use crate::rect::{Rect, cell_index, cell_origin};
use crate::vec::Vec2;

/// Sparse 2-D map from grid cells to `T`.
#[derive(Debug, Clone)]
pub struct HashedGrid<T> {
    cell_size: f64,
    cells: HashMap<(i64, i64), T>,
}

impl<T> HashedGrid<T> {
    /// Create an empty grid. `cell_size` must be positive and finite; the
    /// editor configuration validates this before any grid is built.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size, cells: HashMap::new() }
    }

    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Origin of the cell containing `p`.
    #[must_use]
    pub fn snap(&self, p: Vec2) -> Vec2 {
        let (cx, cy) = self.key(p);
        cell_origin(cx, cy, self.cell_size)
    }

    /// The full cell containing `p`, as a rectangle.
    #[must_use]
    pub fn cell_rect(&self, p: Vec2) -> Rect {
        let origin = self.snap(p);
        Rect::new(origin.x, origin.y, self.cell_size, self.cell_size)
    }

    /// Whether the cell containing `p` holds an entry.
    #[must_use]
    pub fn has(&self, p: Vec2) -> bool {
        self.cells.contains_key(&self.key(p))
    }

    #[must_use]
    pub fn get(&self, p: Vec2) -> Option<&T> {
        self.cells.get(&self.key(p))
    }

    pub fn get_mut(&mut self, p: Vec2) -> Option<&mut T> {
        let key = self.key(p);
        self.cells.get_mut(&key)
    }

    /// Store `value` in the cell containing `p`, or clear the cell when `None`.
    /// Returns the previous entry.
    pub fn set(&mut self, p: Vec2, value: Option<T>) -> Option<T> {
        let key = self.key(p);
        match value {
            Some(v) => self.cells.insert(key, v),
            None => self.cells.remove(&key),
        }
    }

    /// Entry for the cell containing `p`, inserting `T::default()` when empty.
    pub fn entry_or_default(&mut self, p: Vec2) -> &mut T
    where
        T: Default,
    {
        let key = self.key(p);
        self.cells.entry(key).or_default()
    }

    /// Origins of every cell `rect` spans on this grid.
    pub fn cells_spanning(&self, rect: &Rect) -> impl Iterator<Item = Vec2> + use<T> {
        rect.cell_origins(self.cell_size)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate occupied cells as `(origin, payload)`.
    pub fn iter(&self) -> impl Iterator<Item = (Vec2, &T)> {
        self.cells
            .iter()
            .map(|(&(cx, cy), v)| (cell_origin(cx, cy, self.cell_size), v))
    }

    fn key(&self, p: Vec2) -> (i64, i64) {
        (cell_index(p.x, self.cell_size), cell_index(p.y, self.cell_size))
    }
}
