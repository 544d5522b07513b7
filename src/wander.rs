//! Ambient animals that drift around the viewport.
//!
//! Each [`Animal`] idles for a random delay, then walks toward a random
//! destination near its position, kept inside the viewport. [`Herd`] spawns
//! animals on a timer until it reaches its target size and steps them every
//! frame. Randomness is injected so tests can seed it.

#[cfg(test)]
#[path = "wander_test.rs"]
mod wander_test;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WanderConfig;
use crate::rect::Rect;
use crate::vec::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// Idle, then stroll to a random nearby spot.
    #[default]
    Wander,
    /// Head straight for an explicit destination at the faster speed.
    GoTo,
}

/// One wandering sprite. `pos` is the sprite centre in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: Uuid,
    pub pos: Vec2,
    pub size: Vec2,
    pub mode: MovementMode,
    /// Idle time left before the next wander leg, in milliseconds.
    pub delay_ms: f64,
    pub destination: Option<Vec2>,
}

impl Animal {
    /// New idle animal centred on `pos` with a freshly rolled delay.
    pub fn new<R: Rng + ?Sized>(pos: Vec2, size: Vec2, config: &WanderConfig, rng: &mut R) -> Self {
        Self {
            id: Uuid::new_v4(),
            pos,
            size,
            mode: MovementMode::Wander,
            delay_ms: uniform(rng, config.delay_min_ms, config.delay_max_ms),
            destination: None,
        }
    }

    /// Screen-space footprint of the sprite.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::centered_at(self.pos, self.size)
    }

    /// Send the animal straight to `destination`, interrupting any wander leg.
    pub fn go_to(&mut self, destination: Vec2) {
        self.mode = MovementMode::GoTo;
        self.destination = Some(destination);
    }

    /// Advance one frame. `delta_ms` drains the idle delay; movement is a
    /// fixed distance per frame.
    pub fn step<R: Rng + ?Sized>(&mut self, delta_ms: f64, viewport: Vec2, config: &WanderConfig, rng: &mut R) {
        if self.mode == MovementMode::Wander && self.destination.is_none() {
            if self.delay_ms <= 0.0 {
                self.destination = Some(self.pick_destination(viewport, config, rng));
            } else {
                self.delay_ms -= delta_ms;
            }
        }

        let Some(dest) = self.destination else {
            return;
        };
        let speed = match self.mode {
            MovementMode::Wander => config.wander_speed,
            MovementMode::GoTo => config.goto_speed,
        };
        let remaining = dest - self.pos;
        // Snap on the last leg so a step can't overshoot back and forth.
        self.pos = if remaining.magnitude() <= speed { dest } else { self.pos + remaining.set_mag(speed) };

        if self.pos.distance(dest) < config.arrive_distance {
            self.destination = None;
            self.delay_ms = uniform(rng, config.delay_min_ms, config.delay_max_ms);
            self.mode = MovementMode::Wander;
        }
    }

    /// Random point in a square of half-width `radius` around the animal,
    /// clamped so the whole sprite plus margin stays on screen.
    fn pick_destination<R: Rng + ?Sized>(&self, viewport: Vec2, config: &WanderConfig, rng: &mut R) -> Vec2 {
        let half = self.size / 2.0;
        let r = config.radius;
        let x = self.pos.x + uniform(rng, -r, r);
        let y = self.pos.y + uniform(rng, -r, r);
        let m = config.edge_margin;
        Vec2::new(
            clamp_axis(x, half.x + m, viewport.x - half.x - m),
            clamp_axis(y, half.y + m, viewport.y - half.y - m),
        )
    }
}

/// A group of animals that grows on a timer.
#[derive(Debug, Clone)]
pub struct Herd {
    config: WanderConfig,
    animals: Vec<Animal>,
    spawn_timer_ms: f64,
}

impl Herd {
    #[must_use]
    pub fn new(config: WanderConfig) -> Self {
        Self { config, animals: Vec::new(), spawn_timer_ms: 0.0 }
    }

    #[must_use]
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn animals_mut(&mut self) -> &mut [Animal] {
        &mut self.animals
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.animals.len() >= self.config.herd_size
    }

    /// Advance the spawn timer and every animal by one frame. Returns how many
    /// animals were spawned.
    pub fn tick<R: Rng + ?Sized>(&mut self, delta_ms: f64, viewport: Vec2, rng: &mut R) -> usize {
        let mut spawned = 0;
        if !self.is_full() {
            self.spawn_timer_ms += delta_ms;
            while self.spawn_timer_ms >= self.config.spawn_interval_ms && !self.is_full() {
                self.spawn_timer_ms -= self.config.spawn_interval_ms;
                self.spawn(viewport, rng);
                spawned += 1;
            }
        }

        for animal in &mut self.animals {
            animal.step(delta_ms, viewport, &self.config, rng);
        }
        spawned
    }

    fn spawn<R: Rng + ?Sized>(&mut self, viewport: Vec2, rng: &mut R) {
        let size = Vec2::new(self.config.sprite_w, self.config.sprite_h);
        let half = size / 2.0;
        let pos = Vec2::new(
            uniform(rng, half.x, (viewport.x - half.x).max(half.x)),
            uniform(rng, half.y, (viewport.y - half.y).max(half.y)),
        );
        let animal = Animal::new(pos, size, &self.config, rng);
        tracing::debug!(id = %animal.id, x = pos.x, y = pos.y, count = self.animals.len() + 1, "animal spawned");
        self.animals.push(animal);
    }
}

/// Uniform sample from `[lo, hi]`; collapses to `lo` for an empty range.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if lo < hi { rng.random_range(lo..=hi) } else { lo }
}

/// Clamp into `[lo, hi]`, or the midpoint when the viewport is too small to
/// fit the sprite.
fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi { f64::midpoint(lo, hi) } else { v.max(lo).min(hi) }
}
