#![warn(missing_docs)]
use serde::{Deserialize, Serialize};

use super::{clamp_min, positive, ray_count, ray_count_prop, ElementType, Optical};
use crate::{
    error::LbResult,
    geometry::{Line2D, Vector2D},
    optical_surface::Intersection,
    properties::Properties,
};

/// A collimated light source.
///
/// All rays propagate along the local +x axis. They start on the local y axis and are evenly
/// distributed over the given width.
///
/// ## Properties
///   - `width`
///   - `rays`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelSource {
    width: f64,
    rays: usize,
}
impl Default for ParallelSource {
    /// Create a parallel source with a width of 10 and 5 rays.
    fn default() -> Self {
        Self {
            width: 10.0,
            rays: 5,
        }
    }
}
impl ParallelSource {
    /// Creates a new [`ParallelSource`].
    ///
    /// At least one ray is emitted.
    ///
    /// # Errors
    ///
    /// This function will return an error if the width is not positive and finite.
    pub fn new(width: f64, rays: usize) -> LbResult<Self> {
        let element = ElementType::ParallelSource;
        Ok(Self {
            width: positive(element, "width", width)?,
            rays: clamp_min(element, "number of rays", rays, 1),
        })
    }
    /// Returns the width of this [`ParallelSource`].
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }
    /// Returns the number of rays emitted by this [`ParallelSource`].
    #[must_use]
    pub const fn nr_of_rays(&self) -> usize {
        self.rays
    }
}
impl Optical for ParallelSource {
    fn element_type(&self) -> ElementType {
        ElementType::ParallelSource
    }
    fn intersect(&self, _ray: &Line2D) -> Option<Intersection> {
        None
    }
    fn outline(&self) -> Vec<Vector2D> {
        let w = self.width;
        vec![
            Vector2D::new(-w, -w / 2.0),
            Vector2D::new(w, -w / 2.0),
            Vector2D::new(w, w / 2.0),
            Vector2D::new(-w, w / 2.0),
        ]
    }
    #[allow(clippy::cast_precision_loss)]
    fn emit(&self) -> Vec<Line2D> {
        let direction = Vector2D::new(1.0, 0.0);
        if self.rays == 1 {
            return Line2D::new(Vector2D::zero(), direction)
                .into_iter()
                .collect();
        }
        let step = self.width / (self.rays.saturating_sub(1).max(1)) as f64;
        (0..self.rays)
            .filter_map(|i| {
                let y = (i as f64).mul_add(step, -self.width / 2.0);
                Line2D::new(Vector2D::new(0.0, y), direction).ok()
            })
            .collect()
    }
    fn is_light_source(&self) -> bool {
        true
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("width", "width of the beam", self.width.into())?;
        props.create("rays", "number of rays", ray_count_prop(self.rays))?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Self::new(props.get_f64("width")?, ray_count(props.get_i32("rays")?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::test_helper::test_helper::check_warnings;
    #[test]
    fn default() {
        let node = ParallelSource::default();
        assert_eq!(node.width(), 10.0);
        assert_eq!(node.nr_of_rays(), 5);
        assert!(node.is_light_source());
        assert_eq!(node.element_type(), ElementType::ParallelSource);
    }
    #[test]
    fn new() {
        testing_logger::setup();
        let node = ParallelSource::new(5.0, 0).unwrap();
        assert_eq!(node.nr_of_rays(), 1);
        check_warnings(vec!["parallel light: number of rays 0 is too small. Using 1"]);
        assert!(ParallelSource::new(0.0, 3).is_err());
        assert!(ParallelSource::new(f64::NAN, 3).is_err());
    }
    #[test]
    fn emit() {
        let node = ParallelSource::new(10.0, 3).unwrap();
        let rays = node.emit();
        let origins: Vec<Vector2D> = rays.iter().map(Line2D::base).collect();
        assert_eq!(
            origins,
            vec![
                Vector2D::new(0.0, -5.0),
                Vector2D::new(0.0, 0.0),
                Vector2D::new(0.0, 5.0)
            ]
        );
        for ray in rays {
            assert_eq!(ray.direction(), Vector2D::new(1.0, 0.0));
        }
    }
    #[test]
    fn emit_single_ray() {
        let node = ParallelSource::new(10.0, 1).unwrap();
        let rays = node.emit();
        assert_eq!(rays.len(), 1);
        assert_eq!(rays[0].base(), Vector2D::zero());
    }
    #[test]
    fn outline() {
        let node = ParallelSource::default();
        let outline = node.outline();
        assert_eq!(outline.len(), 4);
        assert_eq!(outline[0], Vector2D::new(-10.0, -5.0));
        assert_eq!(outline[2], Vector2D::new(10.0, 5.0));
    }
    #[test]
    fn properties() {
        let node = ParallelSource::new(4.0, 7).unwrap();
        let props = node.properties().unwrap();
        assert_eq!(props.get_f64("width").unwrap(), 4.0);
        assert_eq!(props.get_i32("rays").unwrap(), 7);
        assert_eq!(ParallelSource::from_properties(&props).unwrap(), node);
    }
}
