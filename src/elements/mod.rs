//! This module contains the concrete element types (lenses, mirrors, light sources, etc...)
//!
//! Every element is described in its own local coordinate system. Positioning on the optical
//! table is handled by [`OpticalSurface`](crate::optical_surface::OpticalSurface).
mod beam_splitter;
mod flat_mirror;
mod hemispheric_lens;
mod label;
mod opaque_box;
mod parabolic_mirror;
mod parallel_source;
mod plano_concave_lens;
mod plano_convex_lens;
mod point_source;
mod prism;

pub use beam_splitter::BeamSplitter;
pub use flat_mirror::FlatMirror;
pub use hemispheric_lens::HemisphericLens;
pub use label::Label;
pub use opaque_box::OpaqueBox;
pub use parabolic_mirror::ParabolicMirror;
pub use parallel_source::ParallelSource;
pub use plano_concave_lens::PlanoConcaveLens;
pub use plano_convex_lens::PlanoConvexLens;
pub use point_source::PointSource;
pub use prism::Prism;

use log::warn;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

use crate::{
    error::{LbError, LbResult},
    geometry::{Line2D, Vector2D},
    optical_surface::Intersection,
    optics::snell,
    properties::{Properties, Proptype},
};

/// Common behaviour of all element types.
///
/// All coordinates handled by this trait are local coordinates of the element.
pub trait Optical {
    /// Returns the type of this element.
    fn element_type(&self) -> ElementType;
    /// Find the nearest intersection of a (local) ray with this element.
    fn intersect(&self, ray: &Line2D) -> Option<Intersection>;
    /// Return the display polygon of this element.
    fn outline(&self) -> Vec<Vector2D>;
    /// Return the initial rays of a light source.
    ///
    /// Elements which are not light sources return an empty list.
    fn emit(&self) -> Vec<Line2D> {
        Vec::new()
    }
    /// Returns `true` if this element emits light.
    fn is_light_source(&self) -> bool {
        false
    }
    /// Return the element specific properties.
    ///
    /// # Errors
    ///
    /// This function will return an error if two properties share the same name.
    fn properties(&self) -> LbResult<Properties>;
    /// Create a (validated) element from a set of properties.
    ///
    /// # Errors
    ///
    /// This function will return an error if a property is missing or a value is invalid.
    fn from_properties(props: &Properties) -> LbResult<Self>
    where
        Self: Sized;
}

/// Identifiers of all available element types.
///
/// The string representation of each variant is the identifier used by the registry and in scene
/// files.
#[derive(EnumIter, EnumString, strum::Display, PartialEq, Eq, Debug, Clone, Copy)]
pub enum ElementType {
    /// point light source with a fan of rays
    #[strum(serialize = "point light")]
    PointSource,
    /// collimated light source
    #[strum(serialize = "parallel light")]
    ParallelSource,
    /// absorbing rectangle
    #[strum(serialize = "box")]
    OpaqueBox,
    /// text label
    #[strum(serialize = "label")]
    Label,
    /// plane mirror
    #[strum(serialize = "flat mirror")]
    FlatMirror,
    /// beam splitter plate
    #[strum(serialize = "beam splitter")]
    BeamSplitter,
    /// right-angle prism
    #[strum(serialize = "right-angle prism")]
    Prism,
    /// plano-convex lens
    #[strum(serialize = "plano-convex lens")]
    PlanoConvexLens,
    /// plano-concave lens
    #[strum(serialize = "plano-concave lens")]
    PlanoConcaveLens,
    /// hemispheric lens
    #[strum(serialize = "hemispheric lens")]
    HemisphericLens,
    /// parabolic mirror
    #[strum(serialize = "parabolic mirror")]
    ParabolicMirror,
}

/// An optical element of any type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    #[serde(rename = "point light")]
    PointSource(PointSource),
    #[serde(rename = "parallel light")]
    ParallelSource(ParallelSource),
    #[serde(rename = "box")]
    OpaqueBox(OpaqueBox),
    #[serde(rename = "label")]
    Label(Label),
    #[serde(rename = "flat mirror")]
    FlatMirror(FlatMirror),
    #[serde(rename = "beam splitter")]
    BeamSplitter(BeamSplitter),
    #[serde(rename = "right-angle prism")]
    Prism(Prism),
    #[serde(rename = "plano-convex lens")]
    PlanoConvexLens(PlanoConvexLens),
    #[serde(rename = "plano-concave lens")]
    PlanoConcaveLens(PlanoConcaveLens),
    #[serde(rename = "hemispheric lens")]
    HemisphericLens(HemisphericLens),
    #[serde(rename = "parabolic mirror")]
    ParabolicMirror(ParabolicMirror),
}
impl Element {
    /// Access the element through the common [`Optical`] interface.
    #[must_use]
    pub fn optical(&self) -> &dyn Optical {
        match self {
            Self::PointSource(e) => e,
            Self::ParallelSource(e) => e,
            Self::OpaqueBox(e) => e,
            Self::Label(e) => e,
            Self::FlatMirror(e) => e,
            Self::BeamSplitter(e) => e,
            Self::Prism(e) => e,
            Self::PlanoConvexLens(e) => e,
            Self::PlanoConcaveLens(e) => e,
            Self::HemisphericLens(e) => e,
            Self::ParabolicMirror(e) => e,
        }
    }
    /// Set an element specific property.
    ///
    /// The element is rebuilt from its changed property set. Hence, all parameter clamps and checks
    /// of the element's constructor apply. The element stays unchanged on error.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the property does not exist or has a different type.
    ///   - the new value is invalid for this element.
    pub fn set_property(&mut self, name: &str, value: Proptype) -> LbResult<()> {
        match self {
            Self::PointSource(e) => update(e, name, value),
            Self::ParallelSource(e) => update(e, name, value),
            Self::OpaqueBox(e) => update(e, name, value),
            Self::Label(e) => update(e, name, value),
            Self::FlatMirror(e) => update(e, name, value),
            Self::BeamSplitter(e) => update(e, name, value),
            Self::Prism(e) => update(e, name, value),
            Self::PlanoConvexLens(e) => update(e, name, value),
            Self::PlanoConcaveLens(e) => update(e, name, value),
            Self::HemisphericLens(e) => update(e, name, value),
            Self::ParabolicMirror(e) => update(e, name, value),
        }
    }
    /// Re-run all parameter checks of this element.
    ///
    /// This is used after deserialization, since scene files may contain arbitrary values.
    ///
    /// # Errors
    ///
    /// This function will return an error if a parameter is invalid.
    pub fn validate(&mut self) -> LbResult<()> {
        match self {
            Self::PointSource(e) => revalidate(e),
            Self::ParallelSource(e) => revalidate(e),
            Self::OpaqueBox(e) => revalidate(e),
            Self::Label(e) => revalidate(e),
            Self::FlatMirror(e) => revalidate(e),
            Self::BeamSplitter(e) => revalidate(e),
            Self::Prism(e) => revalidate(e),
            Self::PlanoConvexLens(e) => revalidate(e),
            Self::PlanoConcaveLens(e) => revalidate(e),
            Self::HemisphericLens(e) => revalidate(e),
            Self::ParabolicMirror(e) => revalidate(e),
        }
    }
}
fn update<T: Optical>(element: &mut T, name: &str, value: Proptype) -> LbResult<()> {
    let mut props = element.properties()?;
    props.set(name, value)?;
    *element = T::from_properties(&props)?;
    Ok(())
}
fn revalidate<T: Optical>(element: &mut T) -> LbResult<()> {
    *element = T::from_properties(&element.properties()?)?;
    Ok(())
}

/// Factory function creating a new element of the given type with default parameters.
///
/// # Errors
///
/// This function will return an [`LbError::Registry`] if there is no element with the given identifier.
pub fn create_element(element_type: &str) -> LbResult<Element> {
    let element_type: ElementType = element_type
        .parse()
        .map_err(|_| LbError::Registry(format!("cannot create element type {element_type}")))?;
    Ok(match element_type {
        ElementType::PointSource => Element::PointSource(PointSource::default()),
        ElementType::ParallelSource => Element::ParallelSource(ParallelSource::default()),
        ElementType::OpaqueBox => Element::OpaqueBox(OpaqueBox::default()),
        ElementType::Label => Element::Label(Label::default()),
        ElementType::FlatMirror => Element::FlatMirror(FlatMirror::default()),
        ElementType::BeamSplitter => Element::BeamSplitter(BeamSplitter::default()),
        ElementType::Prism => Element::Prism(Prism::default()),
        ElementType::PlanoConvexLens => Element::PlanoConvexLens(PlanoConvexLens::default()),
        ElementType::PlanoConcaveLens => Element::PlanoConcaveLens(PlanoConcaveLens::default()),
        ElementType::HemisphericLens => Element::HemisphericLens(HemisphericLens::default()),
        ElementType::ParabolicMirror => Element::ParabolicMirror(ParabolicMirror::default()),
    })
}

/// Intersection of a ray with the straight facet between `p1` and `p2`.
fn facet_hit(ray: &Line2D, p1: Vector2D, p2: Vector2D) -> Option<Vector2D> {
    Line2D::through_points(p1, p2)
        .ok()?
        .bounded_intersect(ray, p1, p2)
}
/// Ray leaving `point` after refraction / reflection of `incident` on a surface with the given normal.
///
/// A degenerate result is dropped.
fn deflected(point: Vector2D, incident: Vector2D, normal: Vector2D, ior: f64) -> Vec<Line2D> {
    snell(incident, normal, ior)
        .and_then(|direction| Line2D::new(point, direction))
        .into_iter()
        .collect()
}
/// Check that a parameter is finite and strictly positive.
fn positive(element: ElementType, name: &str, value: f64) -> LbResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LbError::Properties(format!(
            "{element}: {name} must be positive and finite"
        )))
    }
}
/// Check that a refractive index is finite and strictly positive.
fn refractive_index(element: ElementType, value: f64) -> LbResult<f64> {
    positive(element, "refractive index", value)
}
/// Check that the refractive index of a lens is finite and larger than 1.0.
fn lens_index(element: ElementType, value: f64) -> LbResult<f64> {
    if value.is_finite() && value > 1.0 {
        Ok(value)
    } else {
        Err(LbError::Properties(format!(
            "{element}: refractive index must be larger than 1.0"
        )))
    }
}
/// Half length of the chord of a circle (centered at the origin) at distance `offset` from its center.
///
/// The radicand is clamped to zero, so a chord touching the circle yields `0.0` instead of NaN.
fn half_chord(radius: f64, offset: f64) -> f64 {
    (radius * radius - offset * offset).max(0.0).sqrt()
}
/// Clamp a value to a lower bound, warning if the value had to be changed.
fn clamp_min<T: PartialOrd + std::fmt::Display + Copy>(
    element: ElementType,
    name: &str,
    value: T,
    min: T,
) -> T {
    if value < min {
        warn!("{element}: {name} {value} is too small. Using {min}");
        min
    } else {
        value
    }
}
/// Clamp a value to an upper bound, warning if the value had to be changed.
fn clamp_max<T: PartialOrd + std::fmt::Display + Copy>(
    element: ElementType,
    name: &str,
    value: T,
    max: T,
) -> T {
    if value > max {
        warn!("{element}: {name} {value} is too large. Using {max}");
        max
    } else {
        value
    }
}
/// Convert a ray count property into a count. Negative values become zero.
fn ray_count(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}
/// Convert a ray count into its property value.
fn ray_count_prop(count: usize) -> Proptype {
    Proptype::I32(i32::try_from(count).unwrap_or(i32::MAX))
}
