//! Input model: tools, mouse buttons, keys, wheel deltas, and the gesture
//! state machine.
//!
//! Events reach the editor already normalized to device (screen)
//! coordinates. `InputState` is the gesture tracked between pointer-down and
//! pointer-up, carrying what is needed to apply incremental deltas and to
//! revert a drag that ends on an occupied spot.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::piece::PieceId;
use crate::rect::Rect;
use crate::vec::Vec2;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pick up and move placed pieces (default).
    #[default]
    Select,
    /// Drag anywhere to pan the view.
    Pan,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Back/forward buttons are ignored.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `" "`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Confirms placement of the floating piece.
    #[must_use]
    pub fn is_place(&self) -> bool {
        self.0 == " "
    }

    /// Discards the floating piece.
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels. Carried for completeness; zoom
    /// reads only `dy`, so sideways trackpad swipes never zoom.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The piece last picked up or placed, if any.
    pub selected_id: Option<PieceId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The user is panning the view.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Vec2,
    },
    /// The user is moving a placed piece.
    DraggingPiece {
        /// Id of the piece being dragged.
        id: PieceId,
        /// World-space offset from the piece's top-left to the grab point.
        grab_offset: Vec2,
        /// Footprint at the start of the drag, restored if the drop is blocked.
        orig: Rect,
        /// Footprint following the pointer.
        current: Rect,
    },
}
