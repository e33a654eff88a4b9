#![warn(missing_docs)]
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

use super::{clamp_max, clamp_min, ray_count, ray_count_prop, ElementType, Optical};
use crate::{
    degree,
    error::{LbError, LbResult},
    geometry::{Line2D, Vector2D},
    optical_surface::Intersection,
    properties::Properties,
};

/// Radius of the fan drawn for a point source.
const FAN_RADIUS: f64 = 20.0;

/// A point light source emitting a fan of rays.
///
/// The rays start at the local origin and are evenly distributed over the full divergence angle
/// around the local -y axis.
///
/// ## Properties
///   - `divergence`
///   - `rays`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSource {
    divergence: Angle,
    rays: usize,
}
impl Default for PointSource {
    /// Create a point source with 5 rays and a divergence of 30°.
    fn default() -> Self {
        Self {
            divergence: degree!(30.0),
            rays: 5,
        }
    }
}
impl PointSource {
    /// Creates a new [`PointSource`].
    ///
    /// The divergence is clamped to the range 1° ..= 360° and at least 3 rays are emitted.
    ///
    /// # Errors
    ///
    /// This function will return an error if the divergence angle is not finite.
    pub fn new(divergence: Angle, rays: usize) -> LbResult<Self> {
        if !divergence.is_finite() {
            return Err(LbError::Properties(
                "point light: divergence angle must be finite".into(),
            ));
        }
        let element = ElementType::PointSource;
        let div_deg = divergence.get::<degree>();
        let clamped = clamp_max(
            element,
            "divergence angle",
            clamp_min(element, "divergence angle", div_deg, 1.0),
            360.0,
        );
        let divergence = if clamped == div_deg {
            divergence
        } else {
            degree!(clamped)
        };
        Ok(Self {
            divergence,
            rays: clamp_min(element, "number of rays", rays, 3),
        })
    }
    /// Returns the full divergence angle of this [`PointSource`].
    #[must_use]
    pub const fn divergence(&self) -> Angle {
        self.divergence
    }
    /// Returns the number of rays emitted by this [`PointSource`].
    #[must_use]
    pub const fn nr_of_rays(&self) -> usize {
        self.rays
    }
    #[allow(clippy::cast_precision_loss)]
    fn directions(&self) -> Vec<Vector2D> {
        let divergence = self.divergence.get::<radian>();
        let step = divergence / self.rays.saturating_sub(1).max(1) as f64;
        (0..self.rays)
            .map(|i| {
                let alpha = (i as f64).mul_add(step, -divergence / 2.0);
                Vector2D::new(alpha.sin(), -alpha.cos())
            })
            .collect()
    }
}
impl Optical for PointSource {
    fn element_type(&self) -> ElementType {
        ElementType::PointSource
    }
    fn intersect(&self, _ray: &Line2D) -> Option<Intersection> {
        None
    }
    fn outline(&self) -> Vec<Vector2D> {
        let mut points = vec![Vector2D::zero()];
        points.extend(self.directions().into_iter().map(|d| d * FAN_RADIUS));
        points
    }
    fn emit(&self) -> Vec<Line2D> {
        self.directions()
            .into_iter()
            .filter_map(|d| Line2D::new(Vector2D::zero(), d).ok())
            .collect()
    }
    fn is_light_source(&self) -> bool {
        true
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("divergence", "full divergence angle", self.divergence.into())?;
        props.create("rays", "number of rays", ray_count_prop(self.rays))?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Self::new(
            props.get_angle("divergence")?,
            ray_count(props.get_i32("rays")?),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::test_helper::test_helper::check_warnings;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    #[test]
    fn default() {
        let node = PointSource::default();
        assert_eq!(node.divergence(), degree!(30.0));
        assert_eq!(node.nr_of_rays(), 5);
        assert!(node.is_light_source());
        assert_eq!(node.element_type(), ElementType::PointSource);
    }
    #[test]
    fn new_clamped() {
        testing_logger::setup();
        let node = PointSource::new(degree!(0.0), 1).unwrap();
        assert_eq!(node.divergence(), degree!(1.0));
        assert_eq!(node.nr_of_rays(), 3);
        assert_eq!(node.emit().len(), 3);
        check_warnings(vec![
            "point light: divergence angle 0 is too small. Using 1",
            "point light: number of rays 1 is too small. Using 3",
        ]);
        let node = PointSource::new(degree!(400.0), 3).unwrap();
        assert_eq!(node.divergence(), degree!(360.0));
    }
    #[test]
    fn new_invalid() {
        assert!(PointSource::new(degree!(f64::NAN), 3).is_err());
        assert!(PointSource::new(degree!(f64::INFINITY), 3).is_err());
    }
    #[test]
    fn emit() {
        let node = PointSource::new(degree!(90.0), 3).unwrap();
        let rays = node.emit();
        assert_eq!(rays.len(), 3);
        for ray in &rays {
            assert_eq!(ray.base(), Vector2D::zero());
            assert_relative_eq!(ray.direction().length(), 1.0);
        }
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(rays[0].direction(), Vector2D::new(-s, -s), epsilon = 1e-15);
        assert_abs_diff_eq!(rays[1].direction(), Vector2D::new(0.0, -1.0), epsilon = 1e-15);
        assert_abs_diff_eq!(rays[2].direction(), Vector2D::new(s, -s), epsilon = 1e-15);
    }
    #[test]
    fn intersect() {
        let node = PointSource::default();
        let ray = Line2D::new(Vector2D::new(-10.0, 0.0), Vector2D::new(1.0, 0.0)).unwrap();
        assert!(node.intersect(&ray).is_none());
    }
    #[test]
    fn outline() {
        let node = PointSource::default();
        let outline = node.outline();
        assert_eq!(outline.len(), 6);
        assert_eq!(outline[0], Vector2D::zero());
        assert_relative_eq!(outline[3].length(), 20.0);
    }
    #[test]
    fn properties() {
        let node = PointSource::default();
        let props = node.properties().unwrap();
        assert_eq!(props.get_angle("divergence").unwrap(), degree!(30.0));
        assert_eq!(props.get_i32("rays").unwrap(), 5);
        assert_eq!(PointSource::from_properties(&props).unwrap(), node);
    }
}
