#![warn(missing_docs)]
//! Round based propagation of rays through a [`Scene`].
//!
//! The propagation starts with the rays emitted by all light sources. In each round every ray not
//! yet processed is intersected with all surfaces of the scene. A ray hitting a surface gets a
//! terminus and the emergent rays of the intersection are appended to the ray list. They are
//! processed in the next round.
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{LbError, LbResult},
    optical_surface::Intersection,
    ray::Ray,
    scene::Scene,
};

/// Configuration data for a propagation.
///
/// The config contains the following info
///   - maximum number of rounds
///   - parallel intersection search within a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagatorConfig {
    max_rounds: usize,
    #[serde(default)]
    parallel: bool,
}
impl Default for PropagatorConfig {
    /// Create a default config with the following parameters:
    ///   - maximum number of rounds: `20`
    ///   - sequential intersection search
    fn default() -> Self {
        Self {
            max_rounds: 20,
            parallel: false,
        }
    }
}
impl PropagatorConfig {
    /// Creates a new [`PropagatorConfig`].
    ///
    /// # Errors
    ///
    /// This function will return an error if `max_rounds` is zero.
    pub fn new(max_rounds: usize, parallel: bool) -> LbResult<Self> {
        if max_rounds == 0 {
            return Err(LbError::Other("maximum number of rounds must be >= 1".into()));
        }
        Ok(Self {
            max_rounds,
            parallel,
        })
    }
    /// Returns the maximum number of rounds of this [`PropagatorConfig`].
    #[must_use]
    pub const fn max_rounds(&self) -> usize {
        self.max_rounds
    }
    /// Returns `true` if the intersection search runs in parallel.
    #[must_use]
    pub const fn parallel(&self) -> bool {
        self.parallel
    }
}

/// State of a [`Propagation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationState {
    /// no rays have been emitted yet
    Seeding,
    /// the initial rays are emitted. `round` rounds have been completed so far.
    Advancing {
        /// number of completed rounds
        round: usize,
    },
    /// no further expansion
    Done,
}

/// A single propagation of rays through a [`Scene`].
///
/// This exposes the individual steps of the propagation. Use [`Propagator`] for a complete run.
pub struct Propagation<'a> {
    scene: &'a Scene,
    rays: Vec<Ray>,
    state: PropagationState,
}
impl<'a> Propagation<'a> {
    /// Creates a new [`Propagation`] for the given scene.
    #[must_use]
    pub const fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            rays: Vec::new(),
            state: PropagationState::Seeding,
        }
    }
    /// Collect the initial rays of all light sources (in scene order).
    ///
    /// Returns the number of initial rays.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the propagation has already been seeded.
    ///   - the scene does not emit any ray.
    pub fn seed(&mut self) -> LbResult<usize> {
        if self.state != PropagationState::Seeding {
            return Err(LbError::Other("propagation has already been seeded".into()));
        }
        let rays: Vec<Ray> = self
            .scene
            .light_sources()
            .flat_map(|source| source.emit())
            .collect();
        if rays.is_empty() {
            return Err(LbError::NoLightSource);
        }
        info!(
            "seeded {} rays from {} light sources",
            rays.len(),
            self.scene.light_sources().count()
        );
        self.rays = rays;
        self.state = PropagationState::Advancing { round: 0 };
        Ok(self.rays.len())
    }
    /// Advance all unprocessed rays by one round.
    ///
    /// Returns the number of new rays. If no new ray was created, the propagation is done.
    /// Calling this function on a finished propagation has no effect.
    ///
    /// # Errors
    ///
    /// This function will return an error if the propagation has not been seeded yet.
    pub fn advance_round(&mut self, parallel: bool) -> LbResult<usize> {
        let round = match self.state {
            PropagationState::Seeding => {
                return Err(LbError::Other("propagation has not been seeded".into()))
            }
            PropagationState::Done => return Ok(0),
            PropagationState::Advancing { round } => round + 1,
        };
        let pending: Vec<usize> = self
            .rays
            .iter()
            .enumerate()
            .filter(|(_, ray)| !ray.is_processed())
            .map(|(index, _)| index)
            .collect();
        for index in &pending {
            self.rays[*index].mark_processed();
        }
        let hits = self.find_hits(&pending, parallel);
        let mut new_rays = Vec::new();
        for (index, hit) in pending.into_iter().zip(hits) {
            if let Some(hit) = hit {
                self.rays[index].set_terminus(hit.point());
                new_rays.extend(hit.into_emergent().into_iter().map(Ray::from));
            }
        }
        let nr_of_new_rays = new_rays.len();
        self.rays.extend(new_rays);
        debug!("round {round}: {nr_of_new_rays} new rays");
        self.state = if nr_of_new_rays == 0 {
            PropagationState::Done
        } else {
            PropagationState::Advancing { round }
        };
        Ok(nr_of_new_rays)
    }
    /// Nearest intersection for each of the given rays.
    fn find_hits(&self, indices: &[usize], parallel: bool) -> Vec<Option<Intersection>> {
        let hit = |index: &usize| {
            self.rays[*index]
                .line()
                .and_then(|line| self.scene.nearest_intersection(&line))
                .map(|(_, intersection)| intersection)
        };
        if parallel {
            indices.par_iter().map(hit).collect()
        } else {
            indices.iter().map(hit).collect()
        }
    }
    /// Stop any further expansion.
    pub fn finish(&mut self) {
        self.state = PropagationState::Done;
    }
    /// Returns the state of this [`Propagation`].
    #[must_use]
    pub const fn state(&self) -> PropagationState {
        self.state
    }
    /// Returns the rays of this [`Propagation`].
    #[must_use]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }
    /// Consumes the [`Propagation`] and returns the rays.
    #[must_use]
    pub fn into_rays(self) -> Vec<Ray> {
        self.rays
    }
}

/// Complete propagation runs.
pub struct Propagator;
impl Propagator {
    /// Propagate the rays of all light sources through the scene for at most `max_rounds` rounds.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - `max_rounds` is zero.
    ///   - the scene does not contain a light source emitting rays.
    pub fn run(scene: &Scene, max_rounds: usize) -> LbResult<Vec<Ray>> {
        Self::propagate(scene, &PropagatorConfig::new(max_rounds, false)?)
    }
    /// Propagate the rays of all light sources through the scene using the given config.
    ///
    /// # Errors
    ///
    /// This function will return an error if the scene does not contain a light source emitting
    /// rays.
    pub fn propagate(scene: &Scene, config: &PropagatorConfig) -> LbResult<Vec<Ray>> {
        info!("Performing ray propagation of scene with {} surfaces.", scene.len());
        let mut propagation = Propagation::new(scene);
        propagation.seed()?;
        for _ in 0..config.max_rounds() {
            if propagation.advance_round(config.parallel())? == 0 {
                break;
            }
        }
        if propagation.state() != PropagationState::Done {
            info!(
                "maximum number of rounds ({}) reached. Stopping propagation.",
                config.max_rounds()
            );
            propagation.finish();
        }
        let rays = propagation.into_rays();
        info!("propagation finished with {} rays", rays.len());
        Ok(rays)
    }
}
