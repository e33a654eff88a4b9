#![warn(missing_docs)]
//! The optical table: an ordered collection of [`OpticalSurface`]s.
//!
//! Scenes can be read from and written to YAML files.
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::{LbError, LbResult},
    geometry::Line2D,
    optical_surface::{Intersection, OpticalSurface},
};

/// An ordered set of [`OpticalSurface`]s.
///
/// The order of the surfaces only matters if a ray hits two surfaces at exactly the same distance.
/// In this case the surface added first wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    surfaces: Vec<OpticalSurface>,
}
impl Scene {
    /// Creates a new, empty [`Scene`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Add a surface to the scene and return its index.
    pub fn add(&mut self, surface: OpticalSurface) -> usize {
        self.surfaces.push(surface);
        self.surfaces.len() - 1
    }
    /// Remove the surface with the given index.
    ///
    /// # Errors
    ///
    /// This function will return an error if the index is out of range.
    pub fn remove(&mut self, index: usize) -> LbResult<OpticalSurface> {
        if index >= self.surfaces.len() {
            return Err(LbError::Scene(format!(
                "cannot remove surface {index}: scene has only {} surfaces",
                self.surfaces.len()
            )));
        }
        Ok(self.surfaces.remove(index))
    }
    /// Remove all surfaces.
    pub fn clear(&mut self) {
        self.surfaces.clear();
    }
    /// Returns the surface with the given index.
    #[must_use]
    pub fn surface(&self, index: usize) -> Option<&OpticalSurface> {
        self.surfaces.get(index)
    }
    /// Returns a mutable reference to the surface with the given index.
    pub fn surface_mut(&mut self, index: usize) -> Option<&mut OpticalSurface> {
        self.surfaces.get_mut(index)
    }
    /// Iterate over all surfaces in scene order.
    pub fn iter(&self) -> std::slice::Iter<'_, OpticalSurface> {
        self.surfaces.iter()
    }
    /// Returns the number of surfaces in this [`Scene`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }
    /// Returns `true` if the scene does not contain any surface.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
    /// Iterate over all light sources in scene order.
    pub fn light_sources(&self) -> impl Iterator<Item = &OpticalSurface> {
        self.surfaces.iter().filter(|s| s.is_light_source())
    }
    /// Find the nearest intersection of a (world) ray with all surfaces of this scene.
    ///
    /// Returns the index of the surface hit together with the [`Intersection`]. On equal distances
    /// the surface added first wins.
    #[must_use]
    pub fn nearest_intersection(&self, ray: &Line2D) -> Option<(usize, Intersection)> {
        let mut nearest: Option<(usize, Intersection)> = None;
        for (index, surface) in self.surfaces.iter().enumerate() {
            if let Some(hit) = surface.intersect(ray) {
                if nearest
                    .as_ref()
                    .map_or(true, |(_, n)| hit.distance() < n.distance())
                {
                    nearest = Some((index, hit));
                }
            }
        }
        nearest
    }
    /// Create a [`Scene`] from a YAML string.
    ///
    /// All parameters are checked (and clamped) after reading.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the string cannot be parsed.
    ///   - a surface contains invalid parameters.
    pub fn from_yaml_str(yaml: &str) -> LbResult<Self> {
        let mut scene: Self = serde_yaml::from_str(yaml)
            .map_err(|e| LbError::Scene(format!("parsing of scene failed: {e}")))?;
        for surface in &mut scene.surfaces {
            surface.validate()?;
        }
        Ok(scene)
    }
    /// Read a [`Scene`] from a YAML file.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the given path is not found or readable.
    ///   - the parsing of the file failed.
    pub fn from_file(path: &Path) -> LbResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LbError::Scene(format!("cannot read file {} : {}", path.display(), e))
        })?;
        let scene = Self::from_yaml_str(&contents)?;
        info!(
            "read scene with {} surfaces from {}",
            scene.len(),
            path.display()
        );
        Ok(scene)
    }
    /// Return the YAML representation of this [`Scene`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn to_yaml_string(&self) -> LbResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LbError::Scene(format!("serialization of scene failed: {e}")))
    }
    /// Save this [`Scene`] to a YAML file.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the serialization of the scene failed.
    ///   - the file cannot be created or written.
    pub fn save_to_file(&self, path: &Path) -> LbResult<()> {
        let serialized = self.to_yaml_string()?;
        let mut output = File::create(path).map_err(|e| {
            LbError::Scene(format!(
                "could not create file path: {}: {}",
                path.display(),
                e
            ))
        })?;
        write!(output, "{serialized}").map_err(|e| {
            LbError::Scene(format!(
                "writing to file path {} failed: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }
}
impl<'a> IntoIterator for &'a Scene {
    type Item = &'a OpticalSurface;
    type IntoIter = std::slice::Iter<'a, OpticalSurface>;

    fn into_iter(self) -> Self::IntoIter {
        self.surfaces.iter()
    }
}
