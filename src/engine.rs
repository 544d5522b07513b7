//! Editor session: owns all map-editor state and turns normalized input
//! events into [`Action`]s for the host.
//!
//! `EditorCore` has no browser dependencies so it can be driven directly from
//! tests. The host forwards pointer, wheel and key events in screen
//! coordinates and applies the returned actions to its display.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;

use crate::camera::Camera;
use crate::config::{ConfigError, EditorConfig};
use crate::hit;
use crate::input::{Button, InputState, Key, Tool, UiState, WheelDelta};
use crate::occupancy::OccupancyIndex;
use crate::piece::{BackgroundPiece, PieceId, PieceStore};
use crate::rect::{Rect, RectError};
use crate::vec::Vec2;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no asset at palette index {0}")]
    UnknownAsset(usize),
    #[error("invalid piece footprint: {0}")]
    InvalidRect(#[from] RectError),
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A palette asset was picked; the piece follows the cursor until placed.
    PieceFloating { piece: BackgroundPiece },
    /// The floating piece moved with the cursor or the view.
    FloatingMoved { id: PieceId, rect: Rect },
    /// The floating piece was abandoned without being placed.
    FloatingDiscarded { id: PieceId },
    /// A piece was registered at a clear spot.
    PiecePlaced { piece: BackgroundPiece },
    /// Placement was refused because the spot is occupied (or malformed).
    PlacementRejected { id: PieceId, rect: Rect },
    /// A placed piece is being dragged; `colliding` tells the host whether a
    /// drop here would be refused.
    DragPreview { id: PieceId, rect: Rect, colliding: bool },
    /// A dragged piece was dropped at a clear spot.
    PieceMoved { id: PieceId, rect: Rect },
    /// A dragged piece was dropped on an occupied spot and snapped back.
    DragReverted { id: PieceId, rect: Rect },
    /// The camera transform changed.
    CameraChanged { pan_x: f64, pan_y: f64, scale: f64 },
}

/// Core editor state: everything that doesn't depend on the browser.
#[derive(Debug)]
pub struct EditorCore {
    pub config: EditorConfig,
    pub camera: Camera,
    pub index: OccupancyIndex,
    pub pieces: PieceStore,
    pub ui: UiState,
    pub input: InputState,
    /// Selected but not yet placed piece. Never in the index.
    pub floating: Option<BackgroundPiece>,
    /// Last known pointer position, in screen pixels.
    pub mouse: Vec2,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::from_valid_config(EditorConfig::default())
    }
}

impl EditorCore {
    /// Build a session from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config fails validation.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EditorConfig) -> Self {
        Self {
            camera: Camera::new(config.zoom),
            index: OccupancyIndex::new(&config.grid),
            pieces: PieceStore::new(),
            ui: UiState::default(),
            input: InputState::Idle,
            floating: None,
            mouse: Vec2::ZERO,
            viewport_width: 0.0,
            viewport_height: 0.0,
            config,
        }
    }

    // --- Viewport ---

    /// Update viewport dimensions in screen pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Place the first palette asset centred in the viewport.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] if the palette is empty or the footprint is malformed.
    pub fn seed_initial_piece(&mut self) -> Result<Action, EditorError> {
        let asset = self.config.palette.first().ok_or(EditorError::UnknownAsset(0))?;
        let center = Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        let origin = self.camera.screen_to_world_centered(center, asset.size());
        let piece = BackgroundPiece::from_asset(asset, origin);
        self.place(piece)
    }

    // --- Placement ---

    /// Whether `rect` overlaps a placed piece other than `exclude`.
    #[must_use]
    pub fn is_colliding(&self, rect: &Rect, exclude: Option<PieceId>) -> bool {
        self.index.is_colliding(rect, exclude)
    }

    /// Register `piece` if its footprint is clear.
    ///
    /// Returns [`Action::PiecePlaced`] or [`Action::PlacementRejected`].
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidRect`] for NaN/infinite coordinates or a negative size.
    pub fn place(&mut self, piece: BackgroundPiece) -> Result<Action, EditorError> {
        let rect = piece.rect.validated()?;
        if self.index.is_colliding_piece(&piece) {
            tracing::debug!(id = %piece.id, x = rect.x, y = rect.y, "placement rejected: occupied");
            return Ok(Action::PlacementRejected { id: piece.id, rect });
        }
        Ok(self.commit(piece))
    }

    fn commit(&mut self, piece: BackgroundPiece) -> Action {
        self.index.register(piece.id, piece.rect);
        self.ui.selected_id = Some(piece.id);
        tracing::debug!(id = %piece.id, src = %piece.src, placed = self.pieces.len() + 1, "piece placed");
        self.pieces.insert(piece.clone());
        Action::PiecePlaced { piece }
    }

    // --- Tool / palette ---

    /// Set the active tool. Switching tools abandons any floating piece and
    /// snaps back a piece that was mid-drag.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        let mut actions: Vec<Action> = self.abandon_gesture().into_iter().collect();
        actions.extend(self.discard_floating());
        actions
    }

    /// Drop the gesture in progress. A drag that already moved the piece on
    /// screen reports it back at its original footprint.
    fn abandon_gesture(&mut self) -> Option<Action> {
        match std::mem::take(&mut self.input) {
            InputState::DraggingPiece { id, orig, current, .. } if current != orig => {
                tracing::debug!(%id, "drag abandoned, reverting");
                Some(Action::DragReverted { id, rect: orig })
            }
            _ => None,
        }
    }

    /// Pick palette asset `index` as the new floating piece, centred on the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownAsset`] if `index` is out of range.
    pub fn select_asset(&mut self, index: usize) -> Result<Vec<Action>, EditorError> {
        let asset = self
            .config
            .palette
            .get(index)
            .ok_or(EditorError::UnknownAsset(index))?;
        let origin = self.camera.screen_to_world_centered(self.mouse, asset.size());
        let piece = BackgroundPiece::from_asset(asset, origin);
        tracing::debug!(id = %piece.id, asset = asset.label(), "asset selected");

        let mut actions: Vec<Action> = self.discard_floating().into_iter().collect();
        actions.push(Action::PieceFloating { piece: piece.clone() });
        self.floating = Some(piece);
        Ok(actions)
    }

    fn discard_floating(&mut self) -> Option<Action> {
        self.floating.take().map(|piece| {
            tracing::debug!(id = %piece.id, "floating piece discarded");
            Action::FloatingDiscarded { id: piece.id }
        })
    }

    /// Confirm the floating piece at its current spot if clear.
    fn place_floating(&mut self) -> Vec<Action> {
        let Some(rect) = self.floating.as_ref().map(|p| p.rect) else {
            return Vec::new();
        };
        let clear = match rect.validated() {
            Ok(_) => self.floating.as_ref().is_some_and(|piece| !self.index.is_colliding_piece(piece)),
            Err(e) => {
                tracing::warn!(error = %e, "floating piece has a malformed footprint");
                false
            }
        };
        match self.floating.take() {
            Some(piece) if clear => vec![self.commit(piece)],
            Some(piece) => {
                tracing::debug!(id = %piece.id, x = rect.x, y = rect.y, "placement rejected: occupied");
                let action = Action::PlacementRejected { id: piece.id, rect };
                self.floating = Some(piece);
                vec![action]
            }
            None => Vec::new(),
        }
    }

    /// Re-centre the floating piece on the cursor after the cursor or view moved.
    fn follow_cursor(&mut self) -> Option<Action> {
        let piece = self.floating.as_mut()?;
        let origin = self.camera.screen_to_world_centered(self.mouse, piece.rect.size());
        piece.rect = piece.rect.with_origin(origin);
        Some(Action::FloatingMoved { id: piece.id, rect: piece.rect })
    }

    fn camera_changed(&self) -> Action {
        Action::CameraChanged { pan_x: self.camera.pan_x, pan_y: self.camera.pan_y, scale: self.camera.scale() }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Vec2, button: Button) -> Vec<Action> {
        if !screen_pt.is_finite() {
            return Vec::new();
        }
        self.mouse = screen_pt;

        let pan_gesture = button == Button::Middle || (button == Button::Primary && self.ui.tool == Tool::Pan);
        if pan_gesture {
            let reverted = self.abandon_gesture();
            self.input = InputState::Panning { last_screen: screen_pt };
            return reverted.into_iter().collect();
        }
        if button != Button::Primary || self.ui.tool != Tool::Select || self.floating.is_some() {
            return Vec::new();
        }
        let reverted: Vec<Action> = self.abandon_gesture().into_iter().collect();

        let world = self.camera.screen_to_world(screen_pt);
        let Some(id) = hit::piece_at(world, &self.index, &self.pieces) else {
            self.ui.selected_id = None;
            return reverted;
        };
        let Some(rect) = self.pieces.get(&id).map(|p| p.rect) else {
            return reverted;
        };
        self.ui.selected_id = Some(id);
        self.input = InputState::DraggingPiece { id, grab_offset: world - rect.origin(), orig: rect, current: rect };
        reverted
    }

    pub fn on_pointer_move(&mut self, screen_pt: Vec2) -> Vec<Action> {
        if !screen_pt.is_finite() {
            return Vec::new();
        }
        self.mouse = screen_pt;

        match self.input {
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen_pt - last_screen);
                self.input = InputState::Panning { last_screen: screen_pt };
                let mut actions = vec![self.camera_changed()];
                actions.extend(self.follow_cursor());
                actions
            }
            InputState::DraggingPiece { id, grab_offset, orig, .. } => {
                let world = self.camera.screen_to_world(screen_pt);
                let current = orig.with_origin(world - grab_offset);
                self.input = InputState::DraggingPiece { id, grab_offset, orig, current };
                let colliding = self.index.is_colliding(&current, Some(id));
                tracing::trace!(%id, x = current.x, y = current.y, colliding, "drag preview");
                vec![Action::DragPreview { id, rect: current, colliding }]
            }
            InputState::Idle => self.follow_cursor().into_iter().collect(),
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Vec2, _button: Button) -> Vec<Action> {
        if screen_pt.is_finite() {
            self.mouse = screen_pt;
        }
        match std::mem::take(&mut self.input) {
            InputState::DraggingPiece { id, orig, current, .. } => self.drop_piece(id, orig, current),
            InputState::Panning { .. } | InputState::Idle => Vec::new(),
        }
    }

    fn drop_piece(&mut self, id: PieceId, orig: Rect, current: Rect) -> Vec<Action> {
        if current == orig {
            return Vec::new();
        }
        let clear = current.validated().is_ok() && !self.index.is_colliding(&current, Some(id));
        if !clear {
            tracing::debug!(%id, "drop blocked, reverting");
            return vec![Action::DragReverted { id, rect: orig }];
        }
        let Some(piece) = self.pieces.get_mut(&id) else {
            return Vec::new();
        };
        piece.rect = current;
        self.index.unregister(id, orig);
        self.index.register(id, current);
        tracing::debug!(%id, x = current.x, y = current.y, "piece moved");
        vec![Action::PieceMoved { id, rect: current }]
    }

    pub fn on_wheel(&mut self, screen_pt: Vec2, delta: WheelDelta) -> Vec<Action> {
        if !screen_pt.is_finite() {
            return Vec::new();
        }
        self.mouse = screen_pt;
        if !self.camera.zoom_at(delta.dy, screen_pt) {
            return Vec::new();
        }
        let mut actions = vec![self.camera_changed()];
        actions.extend(self.follow_cursor());
        actions
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if key.is_place() {
            self.place_floating()
        } else if key.is_cancel() {
            self.discard_floating().into_iter().collect()
        } else {
            Vec::new()
        }
    }

    // --- Queries ---

    /// The currently selected piece, if any.
    #[must_use]
    pub fn selection(&self) -> Option<PieceId> {
        self.ui.selected_id
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up a placed piece by id.
    #[must_use]
    pub fn piece(&self, id: &PieceId) -> Option<&BackgroundPiece> {
        self.pieces.get(id)
    }

    /// All placed pieces in draw order.
    #[must_use]
    pub fn placed(&self) -> Vec<&BackgroundPiece> {
        self.pieces.placed()
    }
}
