//! Axis-aligned rectangles and the overlap test the occupancy index is built on.
//!
//! Rectangles use half-open extents: a rectangle at `x` with width `w` covers
//! `[x, x + w)`. Two rectangles that only share a boundary do not overlap, and
//! a rectangle with zero width or height overlaps nothing.

#[cfg(test)]
#[path = "rect_test.rs"]
mod rect_test;

use serde::{Deserialize, Serialize};

use crate::vec::Vec2;

/// Reasons a rectangle is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RectError {
    #[error("rectangle has a non-finite component: ({x}, {y}, {w}, {h})")]
    NonFinite { x: f64, y: f64, w: f64, h: f64 },
    #[error("rectangle has negative size: {w} x {h}")]
    NegativeSize { w: f64, h: f64 },
}

/// Axis-aligned box: top-left corner plus size, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Build a rectangle without validation. Callers inside the crate use this
    /// for values derived from already-validated rectangles.
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle, rejecting NaN/infinite components and negative sizes.
    ///
    /// # Errors
    ///
    /// Returns [`RectError`] when the rectangle is malformed.
    pub fn try_new(x: f64, y: f64, w: f64, h: f64) -> Result<Self, RectError> {
        Self::new(x, y, w, h).validated()
    }

    /// Check an existing value against the same rules as [`Self::try_new`].
    ///
    /// # Errors
    ///
    /// Returns [`RectError`] when the rectangle is malformed.
    pub fn validated(self) -> Result<Self, RectError> {
        let Self { x, y, w, h } = self;
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return Err(RectError::NonFinite { x, y, w, h });
        }
        if w < 0.0 || h < 0.0 {
            return Err(RectError::NegativeSize { w, h });
        }
        Ok(self)
    }

    /// A `size`-sized rectangle centred on `center`.
    #[must_use]
    pub fn centered_at(center: Vec2, size: Vec2) -> Self {
        let origin = center - size / 2.0;
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Same size, top-left moved to `origin`.
    #[must_use]
    pub fn with_origin(self, origin: Vec2) -> Self {
        Self::new(origin.x, origin.y, self.w, self.h)
    }

    /// Zero width or zero height.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// True iff the interiors of `self` and `other` intersect.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.right() > other.x && self.x < other.right() && self.bottom() > other.y && self.y < other.bottom()
    }

    /// True iff `p` lies inside the half-open extent of the rectangle.
    #[must_use]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Origins of every `cell_size` grid cell the rectangle spans, far edge
    /// included. A rectangle ending exactly on a cell boundary therefore also
    /// reports the cell that begins there.
    pub fn cell_origins(&self, cell_size: f64) -> impl Iterator<Item = Vec2> + use<> {
        let (x0, x1) = (cell_index(self.x, cell_size), cell_index(self.right(), cell_size));
        let (y0, y1) = (cell_index(self.y, cell_size), cell_index(self.bottom(), cell_size));
        (x0..=x1).flat_map(move |cx| (y0..=y1).map(move |cy| cell_origin(cx, cy, cell_size)))
    }
}

/// Index of the cell containing coordinate `v`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn cell_index(v: f64, cell_size: f64) -> i64 {
    (v / cell_size).floor() as i64
}

/// World-space origin of the cell at index `(cx, cy)`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn cell_origin(cx: i64, cy: i64, cell_size: f64) -> Vec2 {
    Vec2::new(cx as f64 * cell_size, cy as f64 * cell_size)
}
