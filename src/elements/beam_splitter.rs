#![warn(missing_docs)]
use serde::{Deserialize, Serialize};

use super::{deflected, facet_hit, positive, refractive_index, ElementType, Optical};
use crate::{
    error::LbResult,
    geometry::{Line2D, Vector2D},
    optical_surface::{Intersection, NearestHit},
    properties::Properties,
};

/// A beam splitter plate.
///
/// The plate is a rectangle centered at the local origin. Its top side (at `y = -height / 2`) is the
/// splitting facet. A ray hitting this facet is split into a refracted and a reflected ray. The
/// remaining three sides are fully reflecting. If `side_facets` is set, they refract instead.
///
/// ## Properties
///   - `width`
///   - `height`
///   - `index`
///   - `side facets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamSplitter {
    width: f64,
    height: f64,
    index: f64,
    #[serde(default)]
    side_facets: bool,
}
impl Default for BeamSplitter {
    /// Create a beam splitter plate of 100 x 20 with a refractive index of 1.5 and reflecting sides.
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 20.0,
            index: 1.5,
            side_facets: false,
        }
    }
}
impl BeamSplitter {
    /// Creates a new [`BeamSplitter`].
    ///
    /// # Errors
    ///
    /// This function will return an error if width, height or refractive index is not positive and
    /// finite.
    pub fn new(width: f64, height: f64, index: f64) -> LbResult<Self> {
        let element = ElementType::BeamSplitter;
        Ok(Self {
            width: positive(element, "width", width)?,
            height: positive(element, "height", height)?,
            index: refractive_index(element, index)?,
            side_facets: false,
        })
    }
    /// Let the three non-splitting sides refract (instead of reflect) rays.
    #[must_use]
    pub const fn with_side_facets(mut self, side_facets: bool) -> Self {
        self.side_facets = side_facets;
        self
    }
    /// Returns the width of this [`BeamSplitter`].
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }
    /// Returns the height of this [`BeamSplitter`].
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
    /// Returns the refractive index of this [`BeamSplitter`].
    #[must_use]
    pub const fn index(&self) -> f64 {
        self.index
    }
    /// Returns `true` if the non-splitting sides refract rays.
    #[must_use]
    pub const fn side_facets(&self) -> bool {
        self.side_facets
    }
    fn corners(&self) -> [Vector2D; 4] {
        let (w, h) = (self.width / 2.0, self.height / 2.0);
        [
            Vector2D::new(-w, -h),
            Vector2D::new(w, -h),
            Vector2D::new(w, h),
            Vector2D::new(-w, h),
        ]
    }
}
impl Optical for BeamSplitter {
    fn element_type(&self) -> ElementType {
        ElementType::BeamSplitter
    }
    fn intersect(&self, ray: &Line2D) -> Option<Intersection> {
        let [tl, tr, br, bl] = self.corners();
        let u = ray.direction();
        let mut nearest = NearestHit::new(ray);
        nearest.consider(facet_hit(ray, tl, tr), |p| {
            let mut rays = deflected(p, u, Vector2D::new(0.0, -1.0), self.index);
            rays.extend(Line2D::new(p, Vector2D::new(u.x(), -u.y())).ok());
            rays
        });
        let side_ior = if self.side_facets { self.index } else { 0.0 };
        let sides = [
            (tr, br, Vector2D::new(1.0, 0.0)),
            (br, bl, Vector2D::new(0.0, 1.0)),
            (bl, tl, Vector2D::new(-1.0, 0.0)),
        ];
        for (p1, p2, normal) in sides {
            nearest.consider(facet_hit(ray, p1, p2), |p| deflected(p, u, normal, side_ior));
        }
        nearest.into_nearest()
    }
    fn outline(&self) -> Vec<Vector2D> {
        let (w, h) = (self.width / 2.0, self.height / 2.0);
        // the splitting layer is drawn as a thin stripe on top of the plate
        vec![
            Vector2D::new(-w, -h),
            Vector2D::new(w, -h),
            Vector2D::new(w, -h + 1.0),
            Vector2D::new(-w, -h + 1.0),
            Vector2D::new(-w, h),
            Vector2D::new(w, h),
            Vector2D::new(w, -h + 1.0),
            Vector2D::new(-w, -h + 1.0),
        ]
    }
    fn properties(&self) -> LbResult<Properties> {
        let mut props = Properties::default();
        props.create("width", "width of the plate", self.width.into())?;
        props.create("height", "thickness of the plate", self.height.into())?;
        props.create("index", "refractive index", self.index.into())?;
        props.create(
            "side facets",
            "refracting instead of reflecting side facets",
            self.side_facets.into(),
        )?;
        Ok(props)
    }
    fn from_properties(props: &Properties) -> LbResult<Self> {
        Ok(Self::new(
            props.get_f64("width")?,
            props.get_f64("height")?,
            props.get_f64("index")?,
        )?
        .with_side_facets(props.get_bool("side facets")?))
    }
}
