#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::config::ZoomConfig;
use crate::vec::Vec2;

/// Camera state for pan/zoom over the unbounded map.
///
/// `pan_x` / `pan_y` are in screen pixels. Zoom is an integer step count;
/// the scale factor is `zoom_step / scale_full`, so repeated wheel ticks land
/// on exact values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    zoom_step: i32,
    limits: ZoomConfig,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl Camera {
    /// Unpanned camera at 100% for the given (validated) zoom limits.
    #[must_use]
    pub fn new(limits: ZoomConfig) -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom_step: limits.scale_full, limits }
    }

    #[must_use]
    pub fn pan(&self) -> Vec2 {
        Vec2::new(self.pan_x, self.pan_y)
    }

    #[must_use]
    pub fn zoom_step(&self) -> i32 {
        self.zoom_step
    }

    /// Current scale factor (1.0 = 100%).
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale_for(self.zoom_step)
    }

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.pan()) / self.scale()
    }

    /// Top-left world position of a `size` box centred on `screen`.
    ///
    /// Used for the floating piece, which follows the cursor by its centre.
    #[must_use]
    pub fn screen_to_world_centered(&self, screen: Vec2, size: Vec2) -> Vec2 {
        self.screen_to_world(screen) - size / 2.0
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale() + self.pan()
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale()
    }

    /// Shift the view by `delta` screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan_x += delta.x;
        self.pan_y += delta.y;
    }

    /// Step the zoom by one in the direction of `wheel_dy`, keeping the world
    /// point under `pivot` fixed on screen.
    ///
    /// Returns `false` without touching state when the delta is inside the
    /// dead zone or the new step would leave the allowed range.
    pub fn zoom_at(&mut self, wheel_dy: f64, pivot: Vec2) -> bool {
        if wheel_dy.is_nan() || wheel_dy.abs() <= self.limits.wheel_dead_zone {
            return false;
        }
        let new_step = if wheel_dy > 0.0 { self.zoom_step + 1 } else { self.zoom_step - 1 };
        if f64::from(new_step) < self.limits.min_step() || f64::from(new_step) > self.limits.max_step() {
            tracing::trace!(step = self.zoom_step, "zoom clamped");
            return false;
        }

        let old_scale = self.scale();
        let new_scale = self.scale_for(new_step);
        let shift = (pivot - self.pan()) * (1.0 - new_scale / old_scale);
        self.pan_by(shift);
        self.zoom_step = new_step;
        tracing::trace!(step = new_step, scale = new_scale, "zoom changed");
        true
    }

    fn scale_for(&self, step: i32) -> f64 {
        f64::from(step) / f64::from(self.limits.scale_full)
    }
}
