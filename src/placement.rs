#![warn(missing_docs)]
//! Placement of an optical element on the optical table.
//!
//! Every element is described in its own local coordinate system. A [`Placement`] maps points and
//! directions between this local system and the world (table) coordinates.
use serde::{Deserialize, Serialize};
use uom::si::{angle::degree, f64::Angle};

use crate::{
    degree,
    error::{LbError, LbResult},
    geometry::{Line2D, Vector2D},
};

/// Position, orientation and mirroring of an element.
///
/// The world → local mapping of a point first subtracts the position, then rotates by `-rotation`
/// and finally mirrors the x (`flip_h`) and / or y (`flip_v`) component. Directions skip the
/// translation. The local → world mapping applies the inverse steps in reverse order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    position: Vector2D,
    rotation: Angle,
    #[serde(default)]
    flip_h: bool,
    #[serde(default)]
    flip_v: bool,
}
impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vector2D::zero(),
            rotation: degree!(0.0),
            flip_h: false,
            flip_v: false,
        }
    }
}
impl Placement {
    /// Creates a new [`Placement`] at the given position with the given rotation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the position or the rotation is not finite.
    pub fn new(position: Vector2D, rotation: Angle) -> LbResult<Self> {
        let mut placement = Self::default();
        placement.set_position(position)?;
        placement.set_rotation(rotation)?;
        Ok(placement)
    }
    /// Returns the position of this [`Placement`].
    #[must_use]
    pub const fn position(&self) -> Vector2D {
        self.position
    }
    /// Sets the position of this [`Placement`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the position is not finite.
    pub fn set_position(&mut self, position: Vector2D) -> LbResult<()> {
        if !position.is_finite() {
            return Err(LbError::Properties("position must be finite".into()));
        }
        self.position = position;
        Ok(())
    }
    /// Returns the rotation of this [`Placement`].
    #[must_use]
    pub const fn rotation(&self) -> Angle {
        self.rotation
    }
    /// Sets the rotation of this [`Placement`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the angle is not finite.
    pub fn set_rotation(&mut self, rotation: Angle) -> LbResult<()> {
        if !rotation.is_finite() {
            return Err(LbError::Properties("rotation angle must be finite".into()));
        }
        self.rotation = rotation;
        Ok(())
    }
    /// Returns `true` if the local x axis is mirrored.
    #[must_use]
    pub const fn flip_h(&self) -> bool {
        self.flip_h
    }
    /// Mirror the local x axis.
    pub fn set_flip_h(&mut self, flip_h: bool) {
        self.flip_h = flip_h;
    }
    /// Returns `true` if the local y axis is mirrored.
    #[must_use]
    pub const fn flip_v(&self) -> bool {
        self.flip_v
    }
    /// Mirror the local y axis.
    pub fn set_flip_v(&mut self, flip_v: bool) {
        self.flip_v = flip_v;
    }
    fn flip(&self, v: Vector2D) -> Vector2D {
        let mut flipped = v;
        if self.flip_h {
            flipped.set_x(-v.x());
        }
        if self.flip_v {
            flipped.set_y(-v.y());
        }
        flipped
    }
    /// Map a world direction into the local system.
    #[must_use]
    pub fn to_local_dir(&self, v: Vector2D) -> Vector2D {
        self.flip(v.rotate(-self.rotation.get::<degree>()))
    }
    /// Map a world point into the local system.
    #[must_use]
    pub fn to_local_point(&self, p: Vector2D) -> Vector2D {
        self.to_local_dir(p - self.position)
    }
    /// Map a local direction into the world system.
    #[must_use]
    pub fn to_world_dir(&self, v: Vector2D) -> Vector2D {
        self.flip(v).rotate(self.rotation.get::<degree>())
    }
    /// Map a local point into the world system.
    #[must_use]
    pub fn to_world_point(&self, p: Vector2D) -> Vector2D {
        self.to_world_dir(p) + self.position
    }
    /// Map a world line into the local system.
    ///
    /// # Errors
    ///
    /// This function will return an error if the mapped direction degenerates.
    pub fn line_to_local(&self, line: &Line2D) -> LbResult<Line2D> {
        Line2D::new(
            self.to_local_point(line.base()),
            self.to_local_dir(line.direction()),
        )
    }
    /// Map a local line into the world system.
    ///
    /// # Errors
    ///
    /// This function will return an error if the mapped direction degenerates.
    pub fn line_to_world(&self, line: &Line2D) -> LbResult<Line2D> {
        Line2D::new(
            self.to_world_point(line.base()),
            self.to_world_dir(line.direction()),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::radian;
    use approx::assert_abs_diff_eq;
    #[test]
    fn default() {
        let p = Placement::default();
        assert_eq!(p.position(), Vector2D::zero());
        assert_eq!(p.rotation(), degree!(0.0));
        assert!(!p.flip_h());
        assert!(!p.flip_v());
    }
    #[test]
    fn new() {
        let p = Placement::new(Vector2D::new(1.0, 2.0), degree!(30.0)).unwrap();
        assert_eq!(p.position(), Vector2D::new(1.0, 2.0));
        assert_eq!(p.rotation(), degree!(30.0));
        assert!(Placement::new(Vector2D::new(f64::NAN, 2.0), degree!(30.0)).is_err());
        assert!(Placement::new(Vector2D::zero(), radian!(f64::INFINITY)).is_err());
    }
    #[test]
    fn identity() {
        let p = Placement::default();
        let v = Vector2D::new(3.0, -4.0);
        assert_eq!(p.to_local_point(v), v);
        assert_eq!(p.to_world_point(v), v);
    }
    #[test]
    fn translation_only_for_points() {
        let p = Placement::new(Vector2D::new(10.0, 5.0), degree!(0.0)).unwrap();
        assert_eq!(p.to_local_point(Vector2D::new(11.0, 5.0)), Vector2D::new(1.0, 0.0));
        assert_eq!(p.to_local_dir(Vector2D::new(1.0, 0.0)), Vector2D::new(1.0, 0.0));
        assert_eq!(p.to_world_point(Vector2D::new(1.0, 0.0)), Vector2D::new(11.0, 5.0));
    }
    #[test]
    fn rotation() {
        let p = Placement::new(Vector2D::new(10.0, 0.0), degree!(90.0)).unwrap();
        assert_abs_diff_eq!(
            p.to_local_point(Vector2D::new(10.0, 1.0)),
            Vector2D::new(1.0, 0.0),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            p.to_world_dir(Vector2D::new(1.0, 0.0)),
            Vector2D::new(0.0, 1.0),
            epsilon = 1e-15
        );
    }
    #[test]
    fn flips() {
        let mut p = Placement::default();
        p.set_flip_h(true);
        assert_eq!(p.to_local_point(Vector2D::new(1.0, 2.0)), Vector2D::new(-1.0, 2.0));
        p.set_flip_v(true);
        assert_eq!(p.to_local_point(Vector2D::new(1.0, 2.0)), Vector2D::new(-1.0, -2.0));
        p.set_flip_h(false);
        assert_eq!(p.to_world_dir(Vector2D::new(1.0, 2.0)), Vector2D::new(1.0, -2.0));
    }
    #[test]
    fn round_trip() {
        let mut p = Placement::new(Vector2D::new(-3.0, 7.5), degree!(33.0)).unwrap();
        p.set_flip_h(true);
        p.set_flip_v(true);
        for v in [Vector2D::new(1.0, 2.0), Vector2D::new(-5.0, 0.5), Vector2D::zero()] {
            assert_abs_diff_eq!(p.to_world_point(p.to_local_point(v)), v, epsilon = 1e-12);
            assert_abs_diff_eq!(p.to_local_dir(p.to_world_dir(v)), v, epsilon = 1e-12);
        }
    }
    #[test]
    fn lines() {
        let p = Placement::new(Vector2D::new(0.0, 10.0), degree!(-90.0)).unwrap();
        let world = Line2D::new(Vector2D::new(0.0, 0.0), Vector2D::new(0.0, 1.0)).unwrap();
        let local = p.line_to_local(&world).unwrap();
        assert_abs_diff_eq!(local.base(), Vector2D::new(10.0, 0.0), epsilon = 1e-14);
        assert_abs_diff_eq!(local.direction(), Vector2D::new(-1.0, 0.0), epsilon = 1e-15);
        let back = p.line_to_world(&local).unwrap();
        assert_abs_diff_eq!(back.base(), world.base(), epsilon = 1e-14);
        assert_abs_diff_eq!(back.direction(), world.direction(), epsilon = 1e-15);
    }
    #[test]
    fn serialize() {
        let p = Placement::new(Vector2D::new(1.0, 2.0), degree!(0.0)).unwrap();
        let yaml = serde_yaml::to_string(&p).unwrap();
        let back: Placement = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, p);
    }
}
