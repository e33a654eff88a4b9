#![warn(missing_docs)]
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{facet_hit, positive, ElementType, Optical};
use crate::{
    error::LbResult,
    geometry::{Line2D, Vector2D},
    optical_surface::{Intersection, NearestHit},
    properties::Properties,
};

/// An opaque rectangle absorbing all rays hitting it.
///
/// The rectangle spans from the local origin to `(width, height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaqueBox {
    width: f64,
    height: f64,
}
impl Default for OpaqueBox {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
        }
    }
}
impl OpaqueBox {
    /// Creates a new [`OpaqueBox`].
    ///
    /// # Errors
    ///
    /// This function will return an error if width or height is not positive and finite.
    pub fn new(width: f64, height: f64) -> LbResult<Self> {
        let element = ElementType::OpaqueBox;
        Ok(Self {
            width: positive(element, "width", width)?,
            height: positive(element, "height", height)?,
        })
    }
    /// Returns the width of this [`OpaqueBox`].
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }
    /// Returns the height of this [`OpaqueBox`].
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
}
impl Optical for OpaqueBox {
    fn element_type(&self) -> ElementType {
        ElementType::OpaqueBox
    }
    fn intersect(&self, ray: &Line2D) -> Option<Intersection> {
        let mut nearest = NearestHit::new(ray);
        // top, right, bottom, left
        for (p1, p2) in self.outline().into_iter().circular_tuple_windows() {
            nearest.consider(facet_hit(ray, p1, p2), |_| Vec::new());
        }
        nearest.into_nearest()
    }
    fn outline(&self) -> Vec<Vector2D> {
        vec![
            Vector2D::zero(),
            Vector2D::new(self.width, 0.0),
            Vector2D::new(self.width, self.height),
            Vector2D::new(0.0, self.height),
        ]
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("width", "width of the box", self.width.into())?;
        props.create("height", "height of the box", self.height.into())?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Self::new(props.get_f64("width")?, props.get_f64("height")?)
    }
}
