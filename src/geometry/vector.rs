#![warn(missing_docs)]
//! Two-dimensional vector used for points and directions in the optical plane.
use std::{
    fmt::Display,
    ops::{Add, Mul, Neg, Sub},
};

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{LbError, LbResult};

/// Components with an absolute value below this limit are read as exactly zero.
pub const SNAP_TO_ZERO: f64 = 1e-10;

fn snapped(value: f64) -> f64 {
    if value.abs() < SNAP_TO_ZERO {
        0.0
    } else {
        value
    }
}

/// A 2D vector supporting basic arithmetic operations.
///
/// A [`Vector2D`] is used both for positions and for directions. Reading a component (and
/// comparing two vectors) treats every component with an absolute value below
/// [`SNAP_TO_ZERO`] as exactly `0.0`. Apart from that, equality is exact.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector2D(Vector2<f64>);

impl Vector2D {
    /// Creates a new [`Vector2D`].
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self(Vector2::new(x, y))
    }
    /// Returns the null vector `(0, 0)`.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
    /// Returns the x component of this [`Vector2D`].
    #[must_use]
    pub fn x(&self) -> f64 {
        snapped(self.0.x)
    }
    /// Returns the y component of this [`Vector2D`].
    #[must_use]
    pub fn y(&self) -> f64 {
        snapped(self.0.y)
    }
    /// Overwrite the x component of this [`Vector2D`].
    pub fn set_x(&mut self, x: f64) {
        self.0.x = x;
    }
    /// Overwrite the y component of this [`Vector2D`].
    pub fn set_y(&mut self, y: f64) {
        self.0.y = y;
    }
    /// Multiply this vector with a scalar.
    #[must_use]
    pub fn scale(&self, k: f64) -> Self {
        Self(self.0 * k)
    }
    /// Scalar (dot) product of two vectors.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }
    /// Returns the length of this [`Vector2D`].
    #[must_use]
    pub fn length(&self) -> f64 {
        self.0.norm()
    }
    /// Returns a unit vector with the same orientation.
    ///
    /// # Errors
    ///
    /// This function will return [`LbError::DivisionByZero`] if the vector has zero length.
    pub fn unit(&self) -> LbResult<Self> {
        let length = self.length();
        if length == 0.0 {
            return Err(LbError::DivisionByZero);
        }
        Ok(Self(self.0 / length))
    }
    /// Rotate this vector about the origin by the given angle (in degrees).
    #[must_use]
    pub fn rotate(&self, theta: f64) -> Self {
        let (sin, cos) = theta.to_radians().sin_cos();
        Self::new(
            cos * self.0.x - sin * self.0.y,
            sin * self.0.x + cos * self.0.y,
        )
    }
    /// Returns `true` if both components are zero (after snapping tiny components to zero).
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.x() == 0.0 && self.y() == 0.0
    }
    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.x.is_finite() && self.0.y.is_finite()
    }
}

impl From<Vector2<f64>> for Vector2D {
    fn from(value: Vector2<f64>) -> Self {
        Self(value)
    }
}
impl From<Vector2D> for Vector2<f64> {
    fn from(value: Vector2D) -> Self {
        value.0
    }
}
impl From<(f64, f64)> for Vector2D {
    fn from(value: (f64, f64)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl PartialEq for Vector2D {
    fn eq(&self, other: &Self) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }
}

impl Add for Vector2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}
impl Sub for Vector2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}
impl Neg for Vector2D {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}
impl Mul<f64> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Display for Vector2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

impl AbsDiffEq for Vector2D {
    type Epsilon = f64;
    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}
impl RelativeEq for Vector2D {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }
    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}
