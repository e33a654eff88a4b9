use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

use clap::Parser;
use env_logger::Env;
use lightbench::{
    console::{element_list, rays_to_json, Args, PartialArgs},
    error::{LbError, LbResult},
    propagator::Propagator,
    ray::Ray,
    scene::Scene,
};
use log::info;

fn write_rays(rays: &[Ray], output: Option<&Path>) -> LbResult<()> {
    let json = rays_to_json(rays)?;
    match output {
        Some(path) => {
            let mut file = File::create(path).map_err(|e| {
                LbError::Console(format!("could not create file {}: {}", path.display(), e))
            })?;
            writeln!(file, "{json}").map_err(|e| {
                LbError::Console(format!("writing to file {} failed: {}", path.display(), e))
            })?;
            info!("wrote {} rays to {}", rays.len(), path.display());
        }
        None => {
            writeln!(io::stdout(), "{json}")
                .map_err(|e| LbError::Console(format!("writing to stdout failed: {e}")))?;
        }
    }
    Ok(())
}

fn main() -> LbResult<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    //parse CLI arguments
    match Args::try_from(PartialArgs::parse())? {
        Args::ListElements => {
            print!("{}", element_list());
            Ok(())
        }
        Args::Propagate {
            scene,
            config,
            output,
        } => {
            let scene = Scene::from_file(&scene)?;
            let rays = Propagator::propagate(&scene, &config)?;
            write_rays(&rays, output.as_deref())
        }
    }
}
