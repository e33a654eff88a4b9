#![warn(missing_docs)]
use serde::{Deserialize, Serialize};

use super::{deflected, facet_hit, positive, ElementType, Optical};
use crate::{
    error::{LbError, LbResult},
    geometry::{Line2D, Vector2D},
    optical_surface::{Intersection, NearestHit},
    optics::intersect_line_parabola,
    properties::Properties,
};

/// Thickness of the mirror substrate below the rim.
const SUBSTRATE: f64 = 10.0;

/// An off-axis section of a parabolic mirror.
///
/// The reflecting surface follows `y(x) = x - x² / 2f` for `|x| <= aperture / 2`. Rays travelling
/// along +y are focused into the point `(f, 0)`. The remaining sides of the substrate absorb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParabolicMirror {
    aperture: f64,
    focal_length: f64,
}
impl Default for ParabolicMirror {
    fn default() -> Self {
        Self {
            aperture: 50.0,
            focal_length: 100.0,
        }
    }
}
impl ParabolicMirror {
    /// Creates a new [`ParabolicMirror`].
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the aperture is not positive and finite.
    ///   - the focal length is zero or not finite.
    pub fn new(aperture: f64, focal_length: f64) -> LbResult<Self> {
        let element = ElementType::ParabolicMirror;
        if focal_length == 0.0 || !focal_length.is_finite() {
            return Err(LbError::Properties(format!(
                "{element}: focal length must be finite and non-zero"
            )));
        }
        Ok(Self {
            aperture: positive(element, "aperture", aperture)?,
            focal_length,
        })
    }
    /// Returns the aperture of this [`ParabolicMirror`].
    #[must_use]
    pub const fn aperture(&self) -> f64 {
        self.aperture
    }
    /// Returns the focal length of this [`ParabolicMirror`].
    #[must_use]
    pub const fn focal_length(&self) -> f64 {
        self.focal_length
    }
    fn surface(&self, x: f64) -> f64 {
        let f = self.focal_length;
        -((x - f).powi(2) / (2.0 * f) - f / 2.0)
    }
    /// Corners of the substrate: top left, bottom left, bottom right, top right.
    fn corners(&self) -> [Vector2D; 4] {
        let half = self.aperture / 2.0;
        let bottom = self.surface(half) + SUBSTRATE;
        [
            Vector2D::new(-half, self.surface(-half)),
            Vector2D::new(-half, bottom),
            Vector2D::new(half, bottom),
            Vector2D::new(half, self.surface(half)),
        ]
    }
}
impl Optical for ParabolicMirror {
    fn element_type(&self) -> ElementType {
        ElementType::ParabolicMirror
    }
    fn intersect(&self, ray: &Line2D) -> Option<Intersection> {
        let [tl, bl, br, tr] = self.corners();
        let mut nearest = NearestHit::new(ray);
        for (p1, p2) in [(tl, bl), (br, bl), (br, tr)] {
            nearest.consider(facet_hit(ray, p1, p2), |_| Vec::new());
        }
        let f = self.focal_length;
        let u = ray.direction();
        for p in intersect_line_parabola(ray, f) {
            if p.x().abs() <= self.aperture / 2.0 {
                nearest.consider(Some(p), |p| {
                    deflected(p, u, Vector2D::new((f - p.x()) / f, -1.0), 0.0)
                });
            }
        }
        nearest.into_nearest()
    }
    #[allow(clippy::cast_precision_loss)]
    fn outline(&self) -> Vec<Vector2D> {
        let [tl, bl, br, _] = self.corners();
        let mut points = vec![tl, bl, br];
        points.extend((0..10).map(|i| {
            let x = (i as f64).mul_add(-self.aperture / 10.0, self.aperture / 2.0);
            Vector2D::new(x, self.surface(x))
        }));
        points
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("aperture", "free aperture", self.aperture.into())?;
        props.create("focal length", "focal length", self.focal_length.into())?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Self::new(props.get_f64("aperture")?, props.get_f64("focal length")?)
    }
}
