#![warn(missing_docs)]
use serde::{Deserialize, Serialize};

use super::{deflected, facet_hit, positive, refractive_index, ElementType, Optical};
use crate::{
    error::LbResult,
    geometry::{Line2D, Vector2D},
    optical_surface::{Intersection, NearestHit},
    properties::Properties,
};

/// An isosceles prism.
///
/// The apex is located at `(0, -height / 2)`, the base at `y = height / 2`. With the default
/// parameters (`width = 2 * height`) the apex angle is 90°.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prism {
    width: f64,
    height: f64,
    index: f64,
}
impl Default for Prism {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 50.0,
            index: 1.5,
        }
    }
}
impl Prism {
    /// Creates a new [`Prism`].
    ///
    /// # Errors
    ///
    /// This function will return an error if width, height or refractive index is not positive and
    /// finite.
    pub fn new(width: f64, height: f64, index: f64) -> LbResult<Self> {
        let element = ElementType::Prism;
        Ok(Self {
            width: positive(element, "width", width)?,
            height: positive(element, "height", height)?,
            index: refractive_index(element, index)?,
        })
    }
    /// Returns the base width of this [`Prism`].
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }
    /// Returns the height of this [`Prism`].
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
    /// Returns the refractive index of this [`Prism`].
    #[must_use]
    pub const fn index(&self) -> f64 {
        self.index
    }
}
impl Optical for Prism {
    fn element_type(&self) -> ElementType {
        ElementType::Prism
    }
    fn intersect(&self, ray: &Line2D) -> Option<Intersection> {
        let (lp, tp, rp) = (
            Vector2D::new(-self.width / 2.0, self.height / 2.0),
            Vector2D::new(0.0, -self.height / 2.0),
            Vector2D::new(self.width / 2.0, self.height / 2.0),
        );
        let left = tp - lp;
        let right = tp - rp;
        let facets = [
            (lp, tp, Vector2D::new(left.y(), -left.x())),
            (tp, rp, Vector2D::new(-right.y(), right.x())),
            (rp, lp, Vector2D::new(0.0, 1.0)),
        ];
        let u = ray.direction();
        let mut nearest = NearestHit::new(ray);
        for (p1, p2, normal) in facets {
            nearest.consider(facet_hit(ray, p1, p2), |p| {
                deflected(p, u, normal, self.index)
            });
        }
        nearest.into_nearest()
    }
    fn outline(&self) -> Vec<Vector2D> {
        vec![
            Vector2D::new(-self.width / 2.0, self.height / 2.0),
            Vector2D::new(0.0, -self.height / 2.0),
            Vector2D::new(self.width / 2.0, self.height / 2.0),
        ]
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("width", "width of the base", self.width.into())?;
        props.create("height", "height of the prism", self.height.into())?;
        props.create("index", "refractive index", self.index.into())?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Self::new(
            props.get_f64("width")?,
            props.get_f64("height")?,
            props.get_f64("index")?,
        )
    }
}
