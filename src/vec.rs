//! Two-dimensional vector math.
//!
//! `Vec2` is a plain `Copy` value used for screen points, world points, sizes
//! and velocities alike. Every operation returns a new value. Each arithmetic
//! operation comes in a vector–vector and a vector–scalar flavour; the
//! `std::ops` impls forward to those.

#[cfg(test)]
#[path = "vec_test.rs"]
mod vec_test;

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A point or displacement in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

#[allow(clippy::should_implement_trait)]
impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components set to `v`.
    #[must_use]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub fn add_scalar(self, s: f64) -> Self {
        Self::new(self.x + s, self.y + s)
    }

    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn sub_scalar(self, s: f64) -> Self {
        Self::new(self.x - s, self.y - s)
    }

    /// Component-wise product.
    #[must_use]
    pub fn mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    #[must_use]
    pub fn mul_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// Component-wise quotient.
    #[must_use]
    pub fn div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    #[must_use]
    pub fn div_scalar(self, s: f64) -> Self {
        Self::new(self.x / s, self.y / s)
    }

    /// Euclidean distance between `self` and `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector has no direction; normalizing it yields NaN components.
    #[must_use]
    pub fn normalize(self) -> Self {
        self.div_scalar(self.magnitude())
    }

    /// Same direction, magnitude `m`. Inherits the NaN behaviour of [`Self::normalize`].
    #[must_use]
    pub fn set_mag(self, m: f64) -> Self {
        self.normalize().mul_scalar(m)
    }

    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    #[must_use]
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// True when neither component is NaN or infinite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec2::add(self, rhs)
    }
}

impl Add<f64> for Vec2 {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        self.add_scalar(rhs)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec2::sub(self, rhs)
    }
}

impl Sub<f64> for Vec2 {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        self.sub_scalar(rhs)
    }
}

impl Mul for Vec2 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Vec2::mul(self, rhs)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.mul_scalar(rhs)
    }
}

impl Div for Vec2 {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Vec2::div(self, rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        self.div_scalar(rhs)
    }
}
