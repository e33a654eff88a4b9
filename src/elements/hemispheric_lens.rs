#![warn(missing_docs)]
use serde::{Deserialize, Serialize};

use super::{
    clamp_max, deflected, facet_hit, half_chord, lens_index, positive, ElementType, Optical,
};
use crate::{
    error::LbResult,
    geometry::{Line2D, Vector2D},
    optical_surface::{Intersection, NearestHit},
    optics::intersect_line_circle,
    properties::Properties,
};

/// A spherical cap lens.
///
/// The sphere is centered at the local origin. The cap is cut off by a flat chord at
/// `y = height - radius`. A height equal to the radius yields a hemisphere, twice the radius a full
/// ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HemisphericLens {
    radius: f64,
    height: f64,
    index: f64,
}
impl Default for HemisphericLens {
    fn default() -> Self {
        Self {
            radius: 10.0,
            height: 15.0,
            index: 1.5,
        }
    }
}
impl HemisphericLens {
    /// Creates a new [`HemisphericLens`].
    ///
    /// The height is limited to the diameter of the sphere.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - radius or height is not positive and finite.
    ///   - the refractive index is not larger than 1.0.
    pub fn new(radius: f64, height: f64, index: f64) -> LbResult<Self> {
        let element = ElementType::HemisphericLens;
        let radius = positive(element, "radius", radius)?;
        let height = clamp_max(
            element,
            "height",
            positive(element, "height", height)?,
            2.0 * radius,
        );
        Ok(Self {
            radius,
            height,
            index: lens_index(element, index)?,
        })
    }
    /// Returns the sphere radius of this [`HemisphericLens`].
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }
    /// Returns the cap height of this [`HemisphericLens`].
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
    /// Returns the refractive index of this [`HemisphericLens`].
    #[must_use]
    pub const fn index(&self) -> f64 {
        self.index
    }
    /// End points of the flat chord.
    fn chord(&self) -> (Vector2D, Vector2D) {
        let (r, h) = (self.radius, self.height);
        let y = h - r;
        let x = half_chord(r, y);
        (Vector2D::new(-x, y), Vector2D::new(x, y))
    }
}
impl Optical for HemisphericLens {
    fn element_type(&self) -> ElementType {
        ElementType::HemisphericLens
    }
    fn intersect(&self, ray: &Line2D) -> Option<Intersection> {
        let (bl, br) = self.chord();
        let u = ray.direction();
        let mut nearest = NearestHit::new(ray);
        if bl.x() != br.x() {
            nearest.consider(facet_hit(ray, bl, br), |p| {
                deflected(p, u, Vector2D::new(0.0, 1.0), self.index)
            });
        }
        for p in intersect_line_circle(ray, 0.0, self.radius) {
            if p.y() < bl.y() {
                nearest.consider(Some(p), |p| deflected(p, u, p, self.index));
            }
        }
        nearest.into_nearest()
    }
    fn outline(&self) -> Vec<Vector2D> {
        let (r, h) = (self.radius, self.height);
        let right: Vec<Vector2D> = (0..=20_i32)
            .map(|i| {
                let y = (f64::from(i) - 10.0) / 10.0 * h / 2.0 - (2.0 * r - h) / 2.0;
                Vector2D::new(half_chord(r, y), y)
            })
            .collect();
        let left: Vec<Vector2D> = right
            .iter()
            .rev()
            .map(|p| Vector2D::new(-p.x(), p.y()))
            .collect();
        let mut points = right;
        points.extend(left);
        points.push(Vector2D::new(0.0, -r));
        points
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("radius", "radius of the sphere", self.radius.into())?;
        props.create("height", "height of the cap", self.height.into())?;
        props.create("index", "refractive index", self.index.into())?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Self::new(
            props.get_f64("radius")?,
            props.get_f64("height")?,
            props.get_f64("index")?,
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
        let node = HemisphericLens::default();
        assert_eq!(node.radius(), 10.0);
        assert_eq!(node.height(), 15.0);
        assert_eq!(node.index(), 1.5);
    }
    #[test]
    fn new() {
        assert!(HemisphericLens::new(0.0, 5.0, 1.5).is_err());
        assert!(HemisphericLens::new(10.0, -5.0, 1.5).is_err());
        assert!(HemisphericLens::new(10.0, 5.0, 1.0).is_err());
        testing_logger::setup();
        let node = HemisphericLens::new(10.0, 25.0, 1.5).unwrap();
        assert_eq!(node.height(), 20.0);
        check_warnings(vec!["hemispheric lens: height 25 is too large. Using 20"]);
    }
    #[test]
    fn chord() {
        let node = HemisphericLens::default();
        let hit = node.intersect(&ray(0.0, 50.0, 0.0, -1.0)).unwrap();
        assert_eq!(hit.point(), Vector2D::new(0.0, 5.0));
        assert_eq!(hit.distance(), 45.0);
        assert_eq!(hit.emergent()[0].direction(), Vector2D::new(0.0, -1.0));
    }
    #[test]
    fn sphere() {
        let node = HemisphericLens::default();
        let hit = node.intersect(&ray(3.0, 5.0, 0.0, -1.0)).unwrap();
        assert_abs_diff_eq!(
            hit.point(),
            Vector2D::new(3.0, -(91.0_f64.sqrt())),
            epsilon = 1e-12
        );
        // leaving the glass the ray is bent towards the axis
        assert!(hit.emergent()[0].direction().x() < 0.0);
    }
    #[test]
    fn full_ball() {
        let node = HemisphericLens::new(10.0, 20.0, 1.5).unwrap();
        let hit = node.intersect(&ray(3.0, 50.0, 0.0, -1.0)).unwrap();
        assert_abs_diff_eq!(
            hit.point(),
            Vector2D::new(3.0, 91.0_f64.sqrt()),
            epsilon = 1e-12
        );
    }
    #[test]
    fn clamped_full_ball() {
        testing_logger::setup();
        let node = HemisphericLens::new(0.5 * 33.3, 40.0, 1.5).unwrap();
        check_warnings(vec!["hemispheric lens: height 40 is too large. Using 33.3"]);
        assert_eq!(node.height(), 33.3);
        let (bl, br) = node.chord();
        assert_eq!(bl.x(), 0.0);
        assert_eq!(br.x(), 0.0);
        assert!(node.outline().iter().all(|p| p.x().is_finite() && p.y().is_finite()));
        let hit = node.intersect(&ray(3.0, 50.0, 0.0, -1.0)).unwrap();
        assert_abs_diff_eq!(
            hit.point(),
            Vector2D::new(3.0, (node.radius() * node.radius() - 9.0).sqrt()),
            epsilon = 1e-12
        );
    }
    #[test]
    fn miss() {
        let node = HemisphericLens::default();
        assert!(node.intersect(&ray(20.0, 50.0, 0.0, -1.0)).is_none());
    }
    #[test]
    fn outline() {
        let node = HemisphericLens::default();
        let outline = node.outline();
        assert_eq!(outline.len(), 43);
        assert_abs_diff_eq!(outline[0], Vector2D::new(0.0, -10.0), epsilon = 1e-12);
        assert_abs_diff_eq!(outline[20], Vector2D::new(75.0_f64.sqrt(), 5.0), epsilon = 1e-12);
        assert_abs_diff_eq!(outline[21], Vector2D::new(-(75.0_f64.sqrt()), 5.0), epsilon = 1e-12);
        assert_eq!(outline[42], Vector2D::new(0.0, -10.0));
    }
    #[test]
    fn properties() {
        let node = HemisphericLens::new(5.0, 3.0, 1.7).unwrap();
        assert_eq!(
            HemisphericLens::from_properties(&node.properties().unwrap()).unwrap(),
            node
        );
    }
}
