#![warn(missing_docs)]
//! Parametric lines in the optical plane.
use std::fmt::Display;

use approx::abs_diff_eq;

use super::Vector2D;
use crate::error::LbResult;

/// Relative tolerance used by [`Line2D::contains_point`].
const CONTAINS_TOLERANCE: f64 = 1e-9;

/// A line of the form `P(λ) = a + λ·u`.
///
/// `u` gives the direction of the line and `a` its base point. Distances along the line are measured
/// relative to this base point. The direction is normalized during construction, hence
/// `|u| == 1` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    a: Vector2D,
    u: Vector2D,
}
impl Default for Line2D {
    /// Line through the origin along the x axis.
    fn default() -> Self {
        Self {
            a: Vector2D::zero(),
            u: Vector2D::new(1.0, 0.0),
        }
    }
}
impl Line2D {
    /// Creates a new [`Line2D`] with the given base point and direction.
    ///
    /// # Errors
    ///
    /// This function will return [`LbError::DivisionByZero`](crate::error::LbError::DivisionByZero) if
    /// the given direction is a null vector.
    pub fn new(a: Vector2D, u: Vector2D) -> LbResult<Self> {
        Ok(Self { a, u: u.unit()? })
    }
    /// Create a line through two points.
    ///
    /// The base point is `p1`, the direction points from `p1` to `p2`.
    ///
    /// # Errors
    ///
    /// This function will return [`LbError::DivisionByZero`](crate::error::LbError::DivisionByZero) if
    /// both points are identical.
    pub fn through_points(p1: Vector2D, p2: Vector2D) -> LbResult<Self> {
        Self::new(p1, p2 - p1)
    }
    /// Returns the base point of this [`Line2D`].
    #[must_use]
    pub const fn base(&self) -> Vector2D {
        self.a
    }
    /// Returns the (unit) direction of this [`Line2D`].
    #[must_use]
    pub const fn direction(&self) -> Vector2D {
        self.u
    }
    /// Return the point for the given λ value.
    #[must_use]
    pub fn point_at(&self, lambda: f64) -> Vector2D {
        self.a + self.u * lambda
    }
    /// Returns `true` if point `p` is part of this line.
    ///
    /// λ is solved from the x component (or from the y component for vertical lines) and the resulting
    /// point is compared against `p` with a tight tolerance relative to `|p|`.
    #[must_use]
    pub fn contains_point(&self, p: &Vector2D) -> bool {
        let lambda = if self.u.x() != 0.0 {
            (p.x() - self.a.x()) / self.u.x()
        } else if self.u.y() != 0.0 {
            (p.y() - self.a.y()) / self.u.y()
        } else {
            return *p == self.a;
        };
        abs_diff_eq!(
            self.point_at(lambda),
            *p,
            epsilon = CONTAINS_TOLERANCE * (1.0 + p.length())
        )
    }
    /// Signed projection of `p - a` onto the line direction.
    #[must_use]
    pub fn signed_side(&self, p: &Vector2D) -> f64 {
        (*p - self.a).dot(&self.u)
    }
    /// Returns `true` if `p` lies in the positive half space of this line (λ >= 0).
    #[must_use]
    pub fn is_positive_side(&self, p: &Vector2D) -> bool {
        self.signed_side(p) >= 0.0
    }
    /// Returns the intersection point of this line with another line.
    ///
    /// `None` is returned if the lines are parallel or identical. Nearly parallel lines are not
    /// treated specially and may produce far away points.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Vector2D> {
        if other.u == self.u || self.u.is_null() || other.u.is_null() {
            return None;
        }
        let denominator = self.u.x().mul_add(other.u.y(), -other.u.x() * self.u.y());
        if denominator == 0.0 {
            // anti-parallel lines
            return None;
        }
        let lambda = -(self.a.x() * other.u.y() - other.a.x() * other.u.y()
            - other.u.x() * self.a.y()
            + other.u.x() * other.a.y())
            / denominator;
        Some(self.point_at(lambda))
    }
    /// Returns the intersection with `other` only if it lies between the points `p1` and `p2`.
    ///
    /// The point lies between `p1` and `p2` if its distances to both points are smaller than the
    /// distance between `p1` and `p2`. In addition, the point has to be in the positive half space
    /// of `other` (i.e. ahead of a ray described by `other`).
    #[must_use]
    pub fn bounded_intersect(&self, other: &Self, p1: Vector2D, p2: Vector2D) -> Option<Vector2D> {
        let p = self.intersect(other)?;
        let l0 = (p1 - p2).length();
        if (p - p1).length() < l0 && (p - p2).length() < l0 && other.is_positive_side(&p) {
            Some(p)
        } else {
            None
        }
    }
    /// Returns a line orthogonal to this line through the given point.
    #[must_use]
    pub fn normal_through(&self, p: Vector2D) -> Self {
        Self {
            a: p,
            u: Vector2D::new(self.u.y(), -self.u.x()),
        }
    }
    /// Mirror this line on another line.
    ///
    /// The new base point is the intersection of both lines. If the lines do not intersect, an
    /// unmodified copy of this line is returned.
    #[must_use]
    pub fn mirror(&self, other: &Self) -> Self {
        self.intersect(other).map_or(*self, |p| {
            let theta = 2.0 * other.u.y().atan2(other.u.x());
            let (sin, cos) = theta.sin_cos();
            Self {
                a: p,
                u: Vector2D::new(
                    cos * self.u.x() + sin * self.u.y(),
                    sin * self.u.x() - cos * self.u.y(),
                ),
            }
        })
    }
    /// Returns a copy of this line rotated about the origin by the given angle (in degrees).
    #[must_use]
    pub fn rotate(&self, alpha: f64) -> Self {
        Self {
            a: self.a.rotate(alpha),
            u: self.u.rotate(alpha),
        }
    }
}

impl Display for Line2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + lambda * {}", self.a, self.u)
    }
}
