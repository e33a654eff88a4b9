//! This is the documentation for the **lightbench** software package. **lightbench** traces rays
//! of light through a two-dimensional arrangement of optical elements (mirrors, lenses, prisms,
//! beam splitters, ...) using geometric optics.
//!
//! A [`Scene`](scene::Scene) contains a list of [`OpticalSurface`](optical_surface::OpticalSurface)s.
//! Each surface is an [`Element`](elements::Element) placed on the optical table. The
//! [`Propagator`](propagator::Propagator) collects the rays of all light sources and follows them
//! from surface to surface until no further surface is hit.
//!
//! ```rust
//! use lightbench::{optical_surface::OpticalSurface, propagator::Propagator, scene::Scene};
//! use lightbench::degree;
//!
//! let mut scene = Scene::new();
//! scene.add(OpticalSurface::from_type("parallel light", 0.0, 0.0).unwrap());
//! let mut mirror = OpticalSurface::from_type("flat mirror", 100.0, 0.0).unwrap();
//! mirror.set_property("rotation", degree!(45.0).into()).unwrap();
//! scene.add(mirror);
//! let rays = Propagator::run(&scene, 20).unwrap();
//! assert_eq!(rays.len(), 10);
//! ```
pub mod console;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod optical_surface;
pub mod optics;
pub mod placement;
pub mod properties;
pub mod propagator;
pub mod ray;
pub mod scene;
pub mod utils;
