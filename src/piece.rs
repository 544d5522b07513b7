//! Map pieces: background tiles, bridges between them, the asset palette and
//! the store of placed pieces.
//!
//! A piece starts out floating (selected from the palette but not yet in the
//! occupancy index) and becomes placed once the editor confirms it at a clear
//! spot. `PieceStore` owns every placed piece and remembers placement order,
//! which doubles as draw order for the host.

#[cfg(test)]
#[path = "piece_test.rs"]
mod piece_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rect::Rect;
use crate::vec::Vec2;

/// Unique identifier for a piece.
pub type PieceId = Uuid;

/// A palette entry the user can pick pieces from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Image path relative to the host's asset directory.
    pub src: String,
    /// Width of the piece in world units.
    pub w: f64,
    /// Height of the piece in world units.
    pub h: f64,
    /// Label shown on the palette button. Falls back to `src`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AssetInfo {
    /// Label for the palette button.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.src)
    }

    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }
}

/// The palette the editor ships with.
#[must_use]
pub fn default_palette() -> Vec<AssetInfo> {
    vec![AssetInfo { src: "background.png".into(), w: 1000.0, h: 560.0, name: Some("Grass".into()) }]
}

/// Region where two pieces are joined and should not count as colliding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bridge {
    pub rect: Rect,
    /// The ordered pair of pieces the bridge connects.
    pub connecting: (PieceId, PieceId),
}

impl Bridge {
    /// Whether this bridge joins `a` and `b`, in either order.
    #[must_use]
    pub fn links(&self, a: PieceId, b: PieceId) -> bool {
        self.connecting == (a, b) || self.connecting == (b, a)
    }
}

/// A rectangular background tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundPiece {
    pub id: PieceId,
    pub rect: Rect,
    /// Image path of the asset this piece was created from.
    pub src: String,
    #[serde(default)]
    pub bridges: Vec<Bridge>,
}

impl BackgroundPiece {
    /// A fresh piece for `asset` with its top-left at `origin`.
    #[must_use]
    pub fn from_asset(asset: &AssetInfo, origin: Vec2) -> Self {
        Self {
            id: Uuid::new_v4(),
            rect: Rect::new(origin.x, origin.y, asset.w, asset.h),
            src: asset.src.clone(),
            bridges: Vec::new(),
        }
    }
}

/// Placed pieces, keyed by id, in placement order.
#[derive(Debug, Default)]
pub struct PieceStore {
    pieces: HashMap<PieceId, BackgroundPiece>,
    order: Vec<PieceId>,
}

impl PieceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a piece. Re-inserting an existing id replaces it in place
    /// without changing its draw position.
    pub fn insert(&mut self, piece: BackgroundPiece) {
        let id = piece.id;
        if self.pieces.insert(id, piece).is_none() {
            self.order.push(id);
        }
    }

    #[must_use]
    pub fn get(&self, id: &PieceId) -> Option<&BackgroundPiece> {
        self.pieces.get(id)
    }

    pub fn get_mut(&mut self, id: &PieceId) -> Option<&mut BackgroundPiece> {
        self.pieces.get_mut(id)
    }

    /// Draw/placement order position of `id`; later is on top.
    #[must_use]
    pub fn rank(&self, id: &PieceId) -> Option<usize> {
        self.order.iter().position(|p| p == id)
    }

    /// All placed pieces, earliest first.
    #[must_use]
    pub fn placed(&self) -> Vec<&BackgroundPiece> {
        self.order.iter().filter_map(|id| self.pieces.get(id)).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
