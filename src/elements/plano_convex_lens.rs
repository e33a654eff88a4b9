#![warn(missing_docs)]
use serde::{Deserialize, Serialize};

use super::{
    clamp_max, clamp_min, deflected, facet_hit, half_chord, lens_index, positive, ElementType,
    Optical,
};
use crate::{
    error::LbResult,
    geometry::{Line2D, Vector2D},
    optical_surface::{Intersection, NearestHit},
    optics::intersect_line_circle,
    properties::Properties,
};

/// A plano-convex lens.
///
/// The flat side lies on the local y axis (`x = 0`), the spherical side bulges towards +x. The
/// radius of curvature is derived from the focal length using the lensmaker's equation for a thin
/// lens: `R = (n - 1) * f`.
///
/// ## Properties
///   - `aperture`
///   - `focal length`
///   - `index`
///   - `thickness` (at the optical axis)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanoConvexLens {
    aperture: f64,
    focal_length: f64,
    index: f64,
    thickness: f64,
}
impl Default for PlanoConvexLens {
    fn default() -> Self {
        Self {
            aperture: 50.0,
            focal_length: 100.0,
            index: 1.5,
            thickness: 10.0,
        }
    }
}
impl PlanoConvexLens {
    /// Creates a new [`PlanoConvexLens`].
    ///
    /// The aperture is limited to the diameter of the spherical surface. The thickness is raised to
    /// the minimum value needed for a flat side of the given aperture.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the focal length is not positive and finite.
    ///   - the refractive index is not larger than 1.0.
    ///   - aperture or thickness is not positive and finite.
    pub fn new(aperture: f64, focal_length: f64, index: f64, thickness: f64) -> LbResult<Self> {
        let element = ElementType::PlanoConvexLens;
        let focal_length = positive(element, "focal length", focal_length)?;
        let index = lens_index(element, index)?;
        let radius = (index - 1.0) * focal_length;
        let aperture = clamp_max(
            element,
            "aperture",
            positive(element, "aperture", aperture)?,
            2.0 * radius,
        );
        let min_thickness = radius - half_chord(radius, aperture / 2.0);
        let thickness = clamp_min(
            element,
            "thickness",
            positive(element, "thickness", thickness)?,
            min_thickness,
        );
        Ok(Self {
            aperture,
            focal_length,
            index,
            thickness,
        })
    }
    /// Returns the free aperture of this [`PlanoConvexLens`].
    #[must_use]
    pub const fn aperture(&self) -> f64 {
        self.aperture
    }
    /// Returns the focal length of this [`PlanoConvexLens`].
    #[must_use]
    pub const fn focal_length(&self) -> f64 {
        self.focal_length
    }
    /// Returns the refractive index of this [`PlanoConvexLens`].
    #[must_use]
    pub const fn index(&self) -> f64 {
        self.index
    }
    /// Returns the center thickness of this [`PlanoConvexLens`].
    #[must_use]
    pub const fn thickness(&self) -> f64 {
        self.thickness
    }
    /// Radius of curvature of the spherical surface.
    #[must_use]
    pub fn radius(&self) -> f64 {
        (self.index - 1.0) * self.focal_length
    }
    /// Sagitta of the spherical surface over the full aperture.
    fn sagitta(&self) -> f64 {
        let r = self.radius();
        r - half_chord(r, self.aperture / 2.0)
    }
}
impl Optical for PlanoConvexLens {
    fn element_type(&self) -> ElementType {
        ElementType::PlanoConvexLens
    }
    fn intersect(&self, ray: &Line2D) -> Option<Intersection> {
        let half = self.aperture / 2.0;
        let edge = self.thickness - self.sagitta();
        let (tl, tr, br, bl) = (
            Vector2D::new(0.0, -half),
            Vector2D::new(edge, -half),
            Vector2D::new(edge, half),
            Vector2D::new(0.0, half),
        );
        let u = ray.direction();
        let mut nearest = NearestHit::new(ray);
        if tr.x() != tl.x() {
            nearest.consider(facet_hit(ray, tl, tr), |p| {
                deflected(p, u, Vector2D::new(0.0, -1.0), self.index)
            });
            nearest.consider(facet_hit(ray, br, bl), |p| {
                deflected(p, u, Vector2D::new(0.0, 1.0), self.index)
            });
        }
        nearest.consider(facet_hit(ray, bl, tl), |p| {
            deflected(p, u, Vector2D::new(-1.0, 0.0), self.index)
        });
        let center = self.thickness - self.radius();
        for p in intersect_line_circle(ray, center, self.radius()) {
            if p.x() >= center && p.y().abs() <= half {
                nearest.consider(Some(p), |p| {
                    deflected(p, u, Vector2D::new(p.x() - center, p.y()), self.index)
                });
            }
        }
        nearest.into_nearest()
    }
    #[allow(clippy::cast_precision_loss)]
    fn outline(&self) -> Vec<Vector2D> {
        let r = self.radius();
        let half = self.aperture / 2.0;
        let mut points = vec![Vector2D::new(0.0, -half)];
        points.extend((0..=10).map(|i| {
            let y = (i as f64).mul_add(-self.aperture / 10.0, half);
            Vector2D::new(self.thickness - (r - half_chord(r, y)), -y)
        }));
        points.push(Vector2D::new(0.0, half));
        points
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("aperture", "free aperture", self.aperture.into())?;
        props.create("focal length", "focal length", self.focal_length.into())?;
        props.create("index", "refractive index", self.index.into())?;
        props.create("thickness", "center thickness", self.thickness.into())?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Self::new(
            props.get_f64("aperture")?,
            props.get_f64("focal length")?,
            props.get_f64("index")?,
            props.get_f64("thickness")?,
        )
    }
}
