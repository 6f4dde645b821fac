pub mod color;
pub mod generate;
pub mod sweep;

use std::error::Error;
use std::fs;
use std::path::Path;

use kcol_core::rng::RngHandle;
use kcol_graph::{generate, GeneratorParams, Graph};

/// Reads generator parameters from a YAML file.
pub fn load_params(path: &Path) -> Result<GeneratorParams, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let params: GeneratorParams = serde_yaml::from_str(&text)?;
    Ok(params)
}

fn build_graph(config: &Path, seed: u64) -> Result<(GeneratorParams, Graph), Box<dyn Error>> {
    let params = load_params(config)?;
    let graph = generate(&params, &mut RngHandle::from_seed(seed))?;
    Ok((params, graph))
}
