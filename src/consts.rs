//! Shared numeric constants for the pasture crate.

// ── Occupancy grids ─────────────────────────────────────────────

/// Cell size of the coarsest occupancy grid, in world units.
pub const COARSE_CELL: f64 = 500.0;

/// Cell size of the medium occupancy grid, in world units.
pub const MEDIUM_CELL: f64 = 200.0;

/// Cell size of the fine occupancy grid, in world units. The fine grid holds
/// the actual piece entries.
pub const FINE_CELL: f64 = 50.0;

// ── Camera ──────────────────────────────────────────────────────

/// Zoom step that represents 100% scale. Zoom is stored as an integer step
/// count so repeated wheel ticks never accumulate float drift.
pub const SCALE_FULL: i32 = 50;

/// Smallest allowed scale, as a fraction of full.
pub const MIN_ZOOM_FACTOR: f64 = 0.1;

/// Largest allowed scale, as a multiple of full.
pub const MAX_ZOOM_FACTOR: f64 = 2.0;

/// Wheel deltas with magnitude at or below this are ignored (trackpad jitter).
pub const WHEEL_DEAD_ZONE: f64 = 1.0;

// ── Wander ──────────────────────────────────────────────────────

/// Half-width of the square a wandering animal picks its next destination from.
pub const WANDER_RADIUS: f64 = 500.0;

/// Gap kept between a wander destination and the viewport edge, in pixels.
pub const WANDER_EDGE_MARGIN: f64 = 10.0;

/// Idle time between wander legs, in milliseconds (inclusive range).
pub const WANDER_DELAY_MS: (f64, f64) = (500.0, 2000.0);

/// Per-frame travel distance while wandering.
pub const WANDER_SPEED: f64 = 2.0;

/// Per-frame travel distance while heading to an explicit destination.
pub const GOTO_SPEED: f64 = 5.0;

/// Distance under which an animal counts as having arrived.
pub const ARRIVE_DISTANCE: f64 = 1.0;

/// Interval between herd spawns, in milliseconds.
pub const SPAWN_INTERVAL_MS: f64 = 500.0;

/// Number of animals the herd grows to.
pub const HERD_SIZE: usize = 10;

/// Native sprite size before scaling.
pub const SPRITE_SIZE: (f64, f64) = (960.0, 1280.0);

/// Scale applied to the native sprite size.
pub const SPRITE_SCALE: f64 = 0.1;
