#![warn(missing_docs)]
use serde::{Deserialize, Serialize};

use super::{deflected, facet_hit, positive, ElementType, Optical};
use crate::{
    error::LbResult,
    geometry::{Line2D, Vector2D},
    optical_surface::{Intersection, NearestHit},
    properties::Properties,
};

/// A plane mirror reflecting on both sides.
///
/// The mirror is a segment of the given length on the local y axis, centered at the local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatMirror {
    length: f64,
}
impl Default for FlatMirror {
    fn default() -> Self {
        Self { length: 50.0 }
    }
}
impl FlatMirror {
    /// Creates a new [`FlatMirror`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the length is not positive and finite.
    pub fn new(length: f64) -> LbResult<Self> {
        Ok(Self {
            length: positive(ElementType::FlatMirror, "length", length)?,
        })
    }
    /// Returns the length of this [`FlatMirror`].
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }
    fn end_points(&self) -> (Vector2D, Vector2D) {
        (
            Vector2D::new(0.0, -self.length / 2.0),
            Vector2D::new(0.0, self.length / 2.0),
        )
    }
}
impl Optical for FlatMirror {
    fn element_type(&self) -> ElementType {
        ElementType::FlatMirror
    }
    fn intersect(&self, ray: &Line2D) -> Option<Intersection> {
        let mut nearest = NearestHit::new(ray);
        let (p1, p2) = self.end_points();
        nearest.consider(facet_hit(ray, p1, p2), |p| {
            deflected(p, ray.direction(), Vector2D::new(1.0, 0.0), 0.0)
        });
        nearest.into_nearest()
    }
    fn outline(&self) -> Vec<Vector2D> {
        let (p1, p2) = self.end_points();
        vec![p1, p2]
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("length", "length of the mirror", self.length.into())?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Self::new(props.get_f64("length")?)
    }
}
