#![warn(missing_docs)]
use serde::{Deserialize, Serialize};

use super::{
    clamp_max, deflected, facet_hit, half_chord, lens_index, positive, ElementType, Optical,
};
use crate::{
    error::{LbError, LbResult},
    geometry::{Line2D, Vector2D},
    optical_surface::{Intersection, NearestHit},
    optics::intersect_line_circle,
    properties::Properties,
};

/// A plano-concave lens.
///
/// The flat side lies on the local y axis (`x = 0`). The hollow spherical side faces towards +x.
/// Its vertex is located at `x = thickness`. The focal length is negative.
///
/// ## Properties
///   - `aperture`
///   - `focal length`
///   - `index`
///   - `thickness` (at the optical axis)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanoConcaveLens {
    aperture: f64,
    focal_length: f64,
    index: f64,
    thickness: f64,
}
impl Default for PlanoConcaveLens {
    fn default() -> Self {
        Self {
            aperture: 50.0,
            focal_length: -100.0,
            index: 1.5,
            thickness: 10.0,
        }
    }
}
impl PlanoConcaveLens {
    /// Creates a new [`PlanoConcaveLens`].
    ///
    /// The aperture is limited to the diameter of the spherical surface.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the focal length is not negative and finite.
    ///   - the refractive index is not larger than 1.0.
    ///   - aperture or thickness is not positive and finite.
    pub fn new(aperture: f64, focal_length: f64, index: f64, thickness: f64) -> LbResult<Self> {
        let element = ElementType::PlanoConcaveLens;
        if !(focal_length.is_finite() && focal_length < 0.0) {
            return Err(LbError::Properties(format!(
                "{element}: focal length must be negative and finite"
            )));
        }
        let index = lens_index(element, index)?;
        let radius = -(index - 1.0) * focal_length;
        let aperture = clamp_max(
            element,
            "aperture",
            positive(element, "aperture", aperture)?,
            2.0 * radius,
        );
        Ok(Self {
            aperture,
            focal_length,
            index,
            thickness: positive(element, "thickness", thickness)?,
        })
    }
    /// Returns the free aperture of this [`PlanoConcaveLens`].
    #[must_use]
    pub const fn aperture(&self) -> f64 {
        self.aperture
    }
    /// Returns the (negative) focal length of this [`PlanoConcaveLens`].
    #[must_use]
    pub const fn focal_length(&self) -> f64 {
        self.focal_length
    }
    /// Returns the refractive index of this [`PlanoConcaveLens`].
    #[must_use]
    pub const fn index(&self) -> f64 {
        self.index
    }
    /// Returns the center thickness of this [`PlanoConcaveLens`].
    #[must_use]
    pub const fn thickness(&self) -> f64 {
        self.thickness
    }
    /// Radius of curvature of the spherical surface.
    #[must_use]
    pub fn radius(&self) -> f64 {
        -(self.index - 1.0) * self.focal_length
    }
    /// x coordinate of the center of the spherical surface.
    fn center(&self) -> f64 {
        self.radius() + self.thickness
    }
    /// Thickness at the rim.
    fn edge_thickness(&self) -> f64 {
        self.center() - half_chord(self.radius(), self.aperture / 2.0)
    }
}
impl Optical for PlanoConcaveLens {
    fn element_type(&self) -> ElementType {
        ElementType::PlanoConcaveLens
    }
    fn intersect(&self, ray: &Line2D) -> Option<Intersection> {
        let half = self.aperture / 2.0;
        let edge = self.edge_thickness();
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
        let center = self.center();
        for p in intersect_line_circle(ray, center, self.radius()) {
            if p.x() <= center && p.y().abs() <= half {
                // the surface normal points out of the glass, i.e. towards the center
                nearest.consider(Some(p), |p| {
                    deflected(p, u, Vector2D::new(center - p.x(), -p.y()), self.index)
                });
            }
        }
        nearest.into_nearest()
    }
    #[allow(clippy::cast_precision_loss)]
    fn outline(&self) -> Vec<Vector2D> {
        let r = self.radius();
        let center = self.center();
        let half = self.aperture / 2.0;
        let mut points = vec![Vector2D::new(0.0, -half)];
        points.extend((0..=10).map(|i| {
            let y = (i as f64).mul_add(-self.aperture / 10.0, half);
            Vector2D::new(center - half_chord(r, y), -y)
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::test_helper::test_helper::check_warnings;
    use approx::assert_abs_diff_eq;
    fn ray(x: f64, y: f64, dx: f64, dy: f64) -> Line2D {
        Line2D::new(Vector2D::new(x, y), Vector2D::new(dx, dy)).unwrap()
    }
    #[test]
    fn default() {
        let node = PlanoConcaveLens::default();
        assert_eq!(node.focal_length(), -100.0);
        assert_eq!(node.radius(), 50.0);
        assert_eq!(node.center(), 60.0);
    }
    #[test]
    fn new_invalid() {
        assert!(PlanoConcaveLens::new(50.0, 100.0, 1.5, 10.0).is_err());
        assert!(PlanoConcaveLens::new(50.0, f64::NEG_INFINITY, 1.5, 10.0).is_err());
        assert!(PlanoConcaveLens::new(50.0, -100.0, 0.9, 10.0).is_err());
        assert!(PlanoConcaveLens::new(50.0, -100.0, 1.5, 0.0).is_err());
    }
    #[test]
    fn new_clamped() {
        testing_logger::setup();
        let node = PlanoConcaveLens::new(120.0, -100.0, 1.5, 10.0).unwrap();
        assert_eq!(node.aperture(), 100.0);
        check_warnings(vec!["plano-concave lens: aperture 120 is too large. Using 100"]);
    }
    #[test]
    fn full_aperture() {
        testing_logger::setup();
        let node = PlanoConcaveLens::new(100.0, -33.3, 1.5, 10.0).unwrap();
        check_warnings(vec!["plano-concave lens: aperture 100 is too large. Using 33.3"]);
        assert_eq!(node.aperture(), 33.3);
        assert_eq!(node.edge_thickness(), node.center());
        assert!(node.outline().iter().all(|p| p.x().is_finite() && p.y().is_finite()));
        let hit = node.intersect(&ray(0.0, 0.0, 1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(hit.point(), Vector2D::new(10.0, 0.0), epsilon = 1e-12);
    }
    #[test]
    fn on_axis() {
        let node = PlanoConcaveLens::default();
        let hit = node.intersect(&ray(0.0, 0.0, 1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(hit.point(), Vector2D::new(10.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            hit.emergent()[0].direction(),
            Vector2D::new(1.0, 0.0),
            epsilon = 1e-12
        );
    }
    #[test]
    fn diverging() {
        let node = PlanoConcaveLens::default();
        let hit = node.intersect(&ray(-50.0, 5.0, 1.0, 0.0)).unwrap();
        assert_eq!(hit.point(), Vector2D::new(0.0, 5.0));
        let inside = hit.emergent()[0];
        let hit = node.intersect(&inside).unwrap();
        let p = hit.point();
        assert_abs_diff_eq!(p.x(), 60.0 - 2475.0_f64.sqrt(), epsilon = 1e-9);
        let d = hit.emergent()[0].direction();
        assert!(d.y() > 0.0);
        // virtual focus in front of the lens
        let crossing = p.x() - p.y() * d.x() / d.y();
        assert!(crossing > -100.0 && crossing < -80.0);
    }
    #[test]
    fn entering_from_behind() {
        let node = PlanoConcaveLens::default();
        let hit = node.intersect(&ray(100.0, 5.0, -1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(hit.point().x(), 60.0 - 2475.0_f64.sqrt(), epsilon = 1e-9);
        assert_eq!(hit.emergent().len(), 1);
    }
    #[test]
    fn outline() {
        let node = PlanoConcaveLens::default();
        let outline = node.outline();
        assert_eq!(outline.len(), 13);
        assert_abs_diff_eq!(outline[6], Vector2D::new(10.0, 0.0), epsilon = 1e-12);
    }
    #[test]
    fn properties() {
        let node = PlanoConcaveLens::new(20.0, -50.0, 1.6, 5.0).unwrap();
        assert_eq!(
            PlanoConcaveLens::from_properties(&node.properties().unwrap()).unwrap(),
            node
        );
    }
}
