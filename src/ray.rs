#![warn(missing_docs)]
//! Module for handling optical rays
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::geometry::{Line2D, Vector2D};

/// A directed segment of the ray tree.
///
/// A [`Ray`] starts at `origin` and propagates along `direction`. Once the propagator found the
/// next surface hit by the ray, the `terminus` is set. A processed ray without terminus did not hit
/// anything and extends to infinity. An unprocessed ray without terminus was cut off by the round
/// limit. The `processed` flag is part of the serialized form so both cases can be told apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    origin: Vector2D,
    direction: Vector2D,
    terminus: Option<Vector2D>,
    #[serde(default)]
    processed: bool,
}
impl Ray {
    /// Creates a new unprocessed [`Ray`].
    ///
    /// The direction is normalized. A null direction is kept as is. Such a ray is never propagated.
    #[must_use]
    pub fn new(origin: Vector2D, direction: Vector2D) -> Self {
        Self {
            origin,
            direction: direction.unit().unwrap_or_else(|_| Vector2D::zero()),
            terminus: None,
            processed: false,
        }
    }
    /// Returns the origin of this [`Ray`].
    #[must_use]
    pub const fn origin(&self) -> Vector2D {
        self.origin
    }
    /// Returns the direction of this [`Ray`].
    #[must_use]
    pub const fn direction(&self) -> Vector2D {
        self.direction
    }
    /// Returns the end point of this [`Ray`] if it hit a surface.
    #[must_use]
    pub const fn terminus(&self) -> Option<Vector2D> {
        self.terminus
    }
    /// Sets the end point of this [`Ray`].
    pub fn set_terminus(&mut self, terminus: Vector2D) {
        self.terminus = Some(terminus);
    }
    /// Returns `true` if this [`Ray`] has already been advanced by the propagator.
    #[must_use]
    pub const fn is_processed(&self) -> bool {
        self.processed
    }
    /// Mark this [`Ray`] as advanced.
    pub fn mark_processed(&mut self) {
        self.processed = true;
    }
    /// Returns `true` if the ray has been advanced without hitting anything.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.processed && self.terminus.is_none()
    }
    /// Length of the segment between origin and terminus.
    ///
    /// Returns `None` for rays without terminus.
    #[must_use]
    pub fn length(&self) -> Option<f64> {
        self.terminus.map(|t| (t - self.origin).length())
    }
    /// Returns the line along which this [`Ray`] propagates.
    ///
    /// Returns `None` if the direction is a null vector.
    #[must_use]
    pub fn line(&self) -> Option<Line2D> {
        if self.direction.is_null() {
            None
        } else {
            Line2D::new(self.origin, self.direction).ok()
        }
    }
}
impl From<Line2D> for Ray {
    fn from(line: Line2D) -> Self {
        Self::new(line.base(), line.direction())
    }
}
impl Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.terminus {
            Some(t) => write!(f, "{} -> {}", self.origin, t),
            None => write!(f, "{} -> dir {}", self.origin, self.direction),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    #[test]
    fn new() {
        let r = Ray::new(Vector2D::new(1.0, 2.0), Vector2D::new(0.0, 2.0));
        assert_eq!(r.origin(), Vector2D::new(1.0, 2.0));
        assert_eq!(r.direction(), Vector2D::new(0.0, 1.0));
        assert_eq!(r.terminus(), None);
        assert!(!r.is_processed());
        assert!(!r.is_open());
    }
    #[test]
    fn null_direction() {
        let r = Ray::new(Vector2D::new(1.0, 2.0), Vector2D::zero());
        assert!(r.direction().is_null());
        assert!(r.line().is_none());
    }
    #[test]
    fn from_line() {
        let l = Line2D::new(Vector2D::new(1.0, 2.0), Vector2D::new(3.0, 4.0)).unwrap();
        let r = Ray::from(l);
        assert_eq!(r.origin(), l.base());
        assert_eq!(r.direction(), l.direction());
        assert_eq!(r.line(), Some(l));
    }
    #[test]
    fn terminus() {
        let mut r = Ray::new(Vector2D::zero(), Vector2D::new(1.0, 0.0));
        assert_eq!(r.length(), None);
        r.mark_processed();
        assert!(r.is_open());
        r.set_terminus(Vector2D::new(3.0, 4.0));
        assert!(!r.is_open());
        assert_relative_eq!(r.length().unwrap(), 5.0);
    }
    #[test]
    fn display() {
        let mut r = Ray::new(Vector2D::zero(), Vector2D::new(1.0, 0.0));
        assert_eq!(format!("{r}"), "(0, 0) -> dir (1, 0)");
        r.set_terminus(Vector2D::new(2.0, 0.0));
        assert_eq!(format!("{r}"), "(0, 0) -> (2, 0)");
    }
    #[test]
    fn serialize() {
        let mut r = Ray::new(Vector2D::zero(), Vector2D::new(1.0, 0.0));
        r.mark_processed();
        r.set_terminus(Vector2D::new(2.0, 0.0));
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"origin":[0.0,0.0],"direction":[1.0,0.0],"terminus":[2.0,0.0],"processed":true}"#
        );
    }
    #[test]
    fn deserialize() {
        let r: Ray = serde_json::from_str(
            r#"{"origin":[0.0,0.0],"direction":[1.0,0.0],"terminus":null,"processed":true}"#,
        )
        .unwrap();
        assert!(r.is_open());
        let r: Ray =
            serde_json::from_str(r#"{"origin":[0.0,0.0],"direction":[1.0,0.0],"terminus":null}"#)
                .unwrap();
        assert!(!r.is_processed());
        assert!(!r.is_open());
    }
}
