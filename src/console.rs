//! Handling the lightbench CLI
//!
//! This module handles the command line parsing as well as basic information (e.g. help dialog,
//! version information, list of available elements).
use std::{fmt::Write, path::PathBuf};

use clap::Parser;
use strum::IntoEnumIterator;

use crate::{
    elements::{create_element, ElementType},
    error::{LbError, LbResult},
    propagator::PropagatorConfig,
    ray::Ray,
};

/// Raw command line arguments of the lightbench application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PartialArgs {
    /// file path of the scene (YAML) to be propagated
    #[arg(short, long)]
    scene: Option<String>,

    /// maximum number of propagation rounds
    #[arg(short, long, default_value_t = 20)]
    max_rounds: usize,

    /// search intersections of all rays of a round in parallel
    #[arg(short, long)]
    parallel: bool,

    /// destination file of the ray list (JSON). if not defined, the rays are written to stdout
    #[arg(short, long)]
    output: Option<String>,

    /// print all available element types together with their properties and exit
    #[arg(short, long)]
    list_elements: bool,
}

/// Checked command line arguments of the lightbench application.
#[derive(Debug, PartialEq)]
pub enum Args {
    /// print the list of available element types
    ListElements,
    /// propagate the rays of a scene
    Propagate {
        /// file path of the scene
        scene: PathBuf,
        /// propagation parameters
        config: PropagatorConfig,
        /// destination of the ray list
        output: Option<PathBuf>,
    },
}
impl TryFrom<PartialArgs> for Args {
    type Error = LbError;

    fn try_from(part_args: PartialArgs) -> LbResult<Self> {
        if part_args.list_elements {
            return Ok(Self::ListElements);
        }
        let scene = part_args.scene.map(PathBuf::from).ok_or_else(|| {
            LbError::Console("no scene file given. Use --scene <file> or --help".into())
        })?;
        if !scene.is_file() {
            return Err(LbError::Console(format!(
                "invalid scene file path: {}",
                scene.display()
            )));
        }
        let config = PropagatorConfig::new(part_args.max_rounds, part_args.parallel)
            .map_err(|e| LbError::Console(format!("invalid number of rounds: {e}")))?;
        Ok(Self::Propagate {
            scene,
            config,
            output: part_args.output.map(PathBuf::from),
        })
    }
}

/// Returns a listing of all element types with their properties and default values.
#[must_use]
pub fn element_list() -> String {
    let mut list = String::new();
    for element_type in ElementType::iter() {
        let _ = writeln!(list, "{element_type}");
        if let Ok(props) = create_element(&element_type.to_string())
            .and_then(|element| element.optical().properties())
        {
            for (name, prop) in &props {
                let _ = writeln!(
                    list,
                    "    {name:<14}{} (default: {})",
                    prop.description(),
                    prop.prop()
                );
            }
        }
    }
    list
}

/// Serialize a list of rays to JSON.
///
/// # Errors
///
/// This function will return an error if the serialization fails.
pub fn rays_to_json(rays: &[Ray]) -> LbResult<String> {
    serde_json::to_string_pretty(rays)
        .map_err(|e| LbError::Console(format!("serialization of rays failed: {e}")))
}
