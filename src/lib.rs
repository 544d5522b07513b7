//! Map editor and ambient animals for a browser-hosted pasture.
//!
//! This crate is compiled to WebAssembly and runs in the browser. Its core is
//! the occupancy index: a three-level hashed grid that answers "does this
//! rectangle overlap anything already placed?" over an unbounded world. Around
//! it sit the editor session, which turns pointer/wheel/key events into
//! placement decisions and camera moves, and the wander behaviour that drifts
//! sprites across the viewport. The host JavaScript layer forwards DOM events
//! and applies the returned [`engine::Action`]s to its display.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor session [`engine::EditorCore`] and its actions |
//! | [`occupancy`] | Multi-resolution collision index |
//! | [`grid`] | Sparse hashed grid keyed by cell |
//! | [`rect`] | Rectangles, overlap and cell spans |
//! | [`vec`] | 2D vector math |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`piece`] | Background pieces, bridges and the piece store |
//! | [`hit`] | Point hit-testing against placed pieces |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`wander`] | Wandering animals and the herd spawner |
//! | [`config`] | Editor configuration and validation |
//! | [`wasm`] | `wasm-bindgen` handles for the host |
//! | [`consts`] | Shared numeric defaults (cell sizes, zoom limits, wander tuning) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod grid;
pub mod hit;
pub mod input;
pub mod occupancy;
pub mod piece;
pub mod rect;
pub mod vec;
pub mod wander;
pub mod wasm;
