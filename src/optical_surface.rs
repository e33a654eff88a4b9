#![warn(missing_docs)]
//! An optical element placed on the optical table.
//!
//! This module also contains the data structures describing the intersection of a ray with an
//! element as well as the rule for selecting the nearest intersection.
use serde::{Deserialize, Serialize};

use crate::{
    elements::{create_element, Element, ElementType},
    error::LbResult,
    geometry::{Line2D, Vector2D},
    placement::Placement,
    properties::{Properties, Proptype},
    ray::Ray,
};

/// Minimum distance a ray has to travel before an intersection is accepted.
///
/// This rejects intersections with the surface a ray has just emerged from.
pub const MIN_TRAVEL: f64 = 1e-7;

/// Result of a successful intersection of a ray with an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    point: Vector2D,
    distance: f64,
    emergent: Vec<Line2D>,
}
impl Intersection {
    /// Creates a new [`Intersection`].
    #[must_use]
    pub const fn new(point: Vector2D, distance: f64, emergent: Vec<Line2D>) -> Self {
        Self {
            point,
            distance,
            emergent,
        }
    }
    /// Returns the intersection point.
    #[must_use]
    pub const fn point(&self) -> Vector2D {
        self.point
    }
    /// Returns the distance between the origin of the ray and the intersection point.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }
    /// Returns the rays leaving the intersection point (transmitted and / or reflected).
    #[must_use]
    pub fn emergent(&self) -> &[Line2D] {
        &self.emergent
    }
    /// Consumes the [`Intersection`] and returns the emergent rays.
    #[must_use]
    pub fn into_emergent(self) -> Vec<Line2D> {
        self.emergent
    }
}

/// Collector selecting the nearest intersection of a ray among several candidates.
///
/// A candidate is accepted if it lies in the positive half space of the ray, the travel distance is
/// larger than [`MIN_TRAVEL`] and it is strictly nearer than all candidates seen so far. On equal
/// distances the first candidate wins. Hence, the order of evaluation matters.
pub struct NearestHit<'a> {
    ray: &'a Line2D,
    nearest: Option<Intersection>,
}
impl<'a> NearestHit<'a> {
    /// Creates a new, empty [`NearestHit`] collector for the given ray.
    #[must_use]
    pub const fn new(ray: &'a Line2D) -> Self {
        Self { ray, nearest: None }
    }
    /// Consider a candidate point.
    ///
    /// The emergent rays are only calculated (by calling `emergent` with the intersection point)
    /// if the candidate is accepted.
    pub fn consider<F>(&mut self, point: Option<Vector2D>, emergent: F)
    where
        F: FnOnce(Vector2D) -> Vec<Line2D>,
    {
        let Some(point) = point else {
            return;
        };
        let distance = (self.ray.base() - point).length();
        if distance > MIN_TRAVEL
            && self.ray.is_positive_side(&point)
            && self.is_nearer(distance)
        {
            self.nearest = Some(Intersection::new(point, distance, emergent(point)));
        }
    }
    fn is_nearer(&self, distance: f64) -> bool {
        self.nearest
            .as_ref()
            .map_or(true, |nearest| distance < nearest.distance)
    }
    /// Returns the nearest accepted intersection (if any).
    #[must_use]
    pub fn into_nearest(self) -> Option<Intersection> {
        self.nearest
    }
}

/// An [`Element`] together with its [`Placement`] on the optical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalSurface {
    #[serde(default)]
    placement: Placement,
    element: Element,
    #[serde(skip)]
    active: bool,
}
impl OpticalSurface {
    /// Creates a new [`OpticalSurface`].
    #[must_use]
    pub const fn new(element: Element, placement: Placement) -> Self {
        Self {
            placement,
            element,
            active: false,
        }
    }
    /// Create a surface with an element of the given type (with default parameters) at the given position.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the element type is unknown.
    ///   - the position is not finite.
    pub fn from_type(element_type: &str, x: f64, y: f64) -> LbResult<Self> {
        let element = create_element(element_type)?;
        let mut placement = Placement::default();
        placement.set_position(Vector2D::new(x, y))?;
        Ok(Self::new(element, placement))
    }
    /// Returns a reference to the element of this [`OpticalSurface`].
    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.element
    }
    /// Returns the type of the element.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.element.optical().element_type()
    }
    /// Returns a reference to the placement of this [`OpticalSurface`].
    #[must_use]
    pub const fn placement(&self) -> &Placement {
        &self.placement
    }
    /// Sets the placement of this [`OpticalSurface`].
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }
    /// Returns `true` if this [`OpticalSurface`] is selected.
    ///
    /// The selection state is not used by the propagation.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
    /// Select or deselect this [`OpticalSurface`].
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
    /// Returns `true` if the element emits light.
    #[must_use]
    pub fn is_light_source(&self) -> bool {
        self.element.optical().is_light_source()
    }
    /// Find the nearest intersection of a ray (given in world coordinates) with this surface.
    ///
    /// The intersection point as well as the emergent rays are returned in world coordinates.
    #[must_use]
    pub fn intersect(&self, ray: &Line2D) -> Option<Intersection> {
        let local_ray = self.placement.line_to_local(ray).ok()?;
        let hit = self.element.optical().intersect(&local_ray)?;
        let point = self.placement.to_world_point(hit.point());
        let distance = hit.distance();
        let emergent = hit
            .into_emergent()
            .iter()
            .filter_map(|line| self.placement.line_to_world(line).ok())
            .collect();
        Some(Intersection::new(point, distance, emergent))
    }
    /// Return the initial rays of a light source in world coordinates.
    ///
    /// Other elements return an empty list.
    #[must_use]
    pub fn emit(&self) -> Vec<Ray> {
        self.element
            .optical()
            .emit()
            .iter()
            .filter_map(|line| self.placement.line_to_world(line).ok())
            .map(Ray::from)
            .collect()
    }
    /// Return the display polygon of the element in world coordinates.
    #[must_use]
    pub fn outline(&self) -> Vec<Vector2D> {
        self.element
            .optical()
            .outline()
            .into_iter()
            .map(|p| self.placement.to_world_point(p))
            .collect()
    }
    /// Return the corners (minimum, maximum) of the axis aligned box enclosing the outline.
    #[must_use]
    pub fn bounding_box(&self) -> (Vector2D, Vector2D) {
        let outline = self.outline();
        let first = outline
            .first()
            .copied()
            .unwrap_or_else(|| self.placement.position());
        outline.iter().fold((first, first), |(min, max), p| {
            (
                Vector2D::new(min.x().min(p.x()), min.y().min(p.y())),
                Vector2D::new(max.x().max(p.x()), max.y().max(p.y())),
            )
        })
    }
    fn placement_properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        let position = self.placement.position();
        props.create("x", "x position", position.x().into())?;
        props.create("y", "y position", position.y().into())?;
        props.create("rotation", "rotation angle", self.placement.rotation().into())?;
        props.create("flip h", "mirror horizontally", self.placement.flip_h().into())?;
        props.create("flip v", "mirror vertically", self.placement.flip_v().into())?;
        Ok(props)
    }
    fn placement_from_properties(props: &Properties) -> LbResult<Placement> {
        let mut placement = Placement::new(
            Vector2D::new(props.get_f64("x")?, props.get_f64("y")?),
            props.get_angle("rotation")?,
        )?;
        placement.set_flip_h(props.get_bool("flip h")?);
        placement.set_flip_v(props.get_bool("flip v")?);
        Ok(placement)
    }
    /// Returns all properties of this surface.
    ///
    /// These are the placement properties (`x`, `y`, `rotation`, `flip h`, `flip v`) followed by the
    /// element specific ones.
    ///
    /// # Errors
    ///
    /// This function will return an error if an element property shadows a placement property.
    pub fn properties(&self) -> LbResult<Properties> {
        let mut props = self.placement_properties()?;
        for (name, prop) in &self.element.optical().properties()? {
            props.create(name, prop.description(), prop.prop().clone())?;
        }
        Ok(props)
    }
    /// Set a (placement or element) property.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the property does not exist or has a different type.
    ///   - the new value is invalid.
    pub fn set_property(&mut self, name: &str, value: Proptype) -> LbResult<()> {
        let mut placement_props = self.placement_properties()?;
        if placement_props.contains(name) {
            placement_props.set(name, value)?;
            self.placement = Self::placement_from_properties(&placement_props)?;
            Ok(())
        } else {
            self.element.set_property(name, value)
        }
    }
    /// Check placement and element parameters (e.g. after reading a scene file).
    ///
    /// # Errors
    ///
    /// This function will return an error if a parameter is invalid.
    pub fn validate(&mut self) -> LbResult<()> {
        self.placement = Self::placement_from_properties(&self.placement_properties()?)?;
        self.element.validate()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{degree, error::LbError};
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn ray(x: f64, y: f64, dx: f64, dy: f64) -> Line2D {
        Line2D::new(Vector2D::new(x, y), Vector2D::new(dx, dy)).unwrap()
    }
    #[test]
    fn nearest_hit() {
        let r = ray(0.0, 0.0, 1.0, 0.0);
        let mut nearest = NearestHit::new(&r);
        nearest.consider(None, |_| Vec::new());
        nearest.consider(Some(Vector2D::new(5.0, 0.0)), |p| vec![ray(p.x(), p.y(), 0.0, 1.0)]);
        nearest.consider(Some(Vector2D::new(3.0, 0.0)), |_| Vec::new());
        // not nearer
        nearest.consider(Some(Vector2D::new(4.0, 0.0)), |_| Vec::new());
        let hit = nearest.into_nearest().unwrap();
        assert_eq!(hit.point(), Vector2D::new(3.0, 0.0));
        assert_eq!(hit.distance(), 3.0);
        assert!(hit.emergent().is_empty());
    }
    #[test]
    fn nearest_hit_rejects() {
        let r = ray(0.0, 0.0, 1.0, 0.0);
        let mut nearest = NearestHit::new(&r);
        // behind the ray
        nearest.consider(Some(Vector2D::new(-3.0, 0.0)), |_| Vec::new());
        // at the origin of the ray
        nearest.consider(Some(Vector2D::new(1e-8, 0.0)), |_| Vec::new());
        assert!(nearest.into_nearest().is_none());
    }
    #[test]
    fn nearest_hit_first_wins_ties() {
        let r = ray(0.0, 0.0, 1.0, 0.0);
        let mut nearest = NearestHit::new(&r);
        nearest.consider(Some(Vector2D::new(0.0, 5.0)), |_| Vec::new());
        nearest.consider(Some(Vector2D::new(0.0, -5.0)), |_| Vec::new());
        nearest.consider(Some(Vector2D::new(3.0, 4.0)), |_| Vec::new());
        assert_eq!(
            nearest.into_nearest().unwrap().point(),
            Vector2D::new(0.0, 5.0)
        );
    }
    #[test]
    fn from_type() {
        let surface = OpticalSurface::from_type("flat mirror", 10.0, 20.0).unwrap();
        assert_eq!(surface.element_type(), ElementType::FlatMirror);
        assert_eq!(surface.placement().position(), Vector2D::new(10.0, 20.0));
        assert!(!surface.is_active());
        assert!(!surface.is_light_source());
        assert_matches!(
            OpticalSurface::from_type("wrong", 0.0, 0.0),
            Err(LbError::Registry(_))
        );
        assert!(OpticalSurface::from_type("box", f64::NAN, 0.0).is_err());
    }
    #[test]
    fn active() {
        let mut surface = OpticalSurface::from_type("label", 0.0, 0.0).unwrap();
        surface.set_active(true);
        assert!(surface.is_active());
    }
    #[test]
    fn intersect_world_coordinates() {
        let mut surface = OpticalSurface::from_type("flat mirror", 100.0, 0.0).unwrap();
        surface.set_property("rotation", degree!(45.0).into()).unwrap();
        let hit = surface.intersect(&ray(0.0, -5.0, 1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(hit.point(), Vector2D::new(105.0, -5.0), epsilon = 1e-12);
        assert_abs_diff_eq!(hit.distance(), 105.0, epsilon = 1e-12);
        assert_eq!(hit.emergent().len(), 1);
        assert_abs_diff_eq!(
            hit.emergent()[0].direction(),
            Vector2D::new(0.0, -1.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(hit.emergent()[0].base(), hit.point(), epsilon = 1e-12);
    }
    #[test]
    fn emit() {
        let mut surface = OpticalSurface::from_type("parallel light", 10.0, 10.0).unwrap();
        surface.set_property("rays", 3.into()).unwrap();
        surface.set_property("rotation", degree!(90.0).into()).unwrap();
        let rays = surface.emit();
        assert_eq!(rays.len(), 3);
        assert_abs_diff_eq!(rays[0].origin(), Vector2D::new(15.0, 10.0), epsilon = 1e-12);
        assert_abs_diff_eq!(rays[0].direction(), Vector2D::new(0.0, 1.0), epsilon = 1e-15);
        assert!(OpticalSurface::from_type("box", 0.0, 0.0)
            .unwrap()
            .emit()
            .is_empty());
    }
    #[test]
    fn outline_and_bounding_box() {
        let surface = OpticalSurface::from_type("box", 5.0, -5.0).unwrap();
        assert_eq!(
            surface.outline(),
            vec![
                Vector2D::new(5.0, -5.0),
                Vector2D::new(15.0, -5.0),
                Vector2D::new(15.0, 5.0),
                Vector2D::new(5.0, 5.0)
            ]
        );
        assert_eq!(
            surface.bounding_box(),
            (Vector2D::new(5.0, -5.0), Vector2D::new(15.0, 5.0))
        );
        let label = OpticalSurface::from_type("label", 1.0, 2.0).unwrap();
        assert_eq!(
            label.bounding_box(),
            (Vector2D::new(1.0, 2.0), Vector2D::new(1.0, 2.0))
        );
    }
    #[test]
    fn properties() {
        let surface = OpticalSurface::from_type("beam splitter", 1.0, 2.0).unwrap();
        let props = surface.properties().unwrap();
        for name in ["x", "y", "rotation", "flip h", "flip v", "width", "height", "index"] {
            assert!(props.contains(name), "missing property {name}");
        }
        assert_eq!(props.get_f64("x").unwrap(), 1.0);
        assert_eq!(props.get_f64("y").unwrap(), 2.0);
    }
    #[test]
    fn properties_all_elements() {
        use crate::elements::ElementType;
        use strum::IntoEnumIterator;
        for element_type in ElementType::iter() {
            let surface = OpticalSurface::from_type(&element_type.to_string(), 0.0, 0.0).unwrap();
            let props = surface.properties();
            assert!(props.is_ok(), "{element_type}: {props:?}");
        }
    }
    #[test]
    fn set_property() {
        let mut surface = OpticalSurface::from_type("box", 0.0, 0.0).unwrap();
        surface.set_property("x", 3.0.into()).unwrap();
        surface.set_property("flip v", true.into()).unwrap();
        surface.set_property("height", 2.0.into()).unwrap();
        assert_eq!(surface.placement().position(), Vector2D::new(3.0, 0.0));
        assert!(surface.placement().flip_v());
        assert_eq!(surface.properties().unwrap().get_f64("height").unwrap(), 2.0);
        assert_matches!(
            surface.set_property("x", true.into()),
            Err(LbError::Properties(_))
        );
        assert_matches!(
            surface.set_property("y", f64::NAN.into()),
            Err(LbError::Properties(_))
        );
        assert_matches!(
            surface.set_property("unknown", 1.0.into()),
            Err(LbError::Properties(_))
        );
        assert_eq!(surface.placement().position(), Vector2D::new(3.0, 0.0));
    }
    #[test]
    fn serialize() {
        let mut surface = OpticalSurface::from_type("right-angle prism", 1.0, 2.0).unwrap();
        surface.set_active(true);
        let yaml = serde_yaml::to_string(&surface).unwrap();
        let back: OpticalSurface = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.placement(), surface.placement());
        assert_eq!(back.element(), surface.element());
        assert!(!back.is_active());
    }
}
