pub mod generate;
pub mod table;
pub mod version;

use std::error::Error;
use std::path::Path;

use wx_chain::ChainConfig;

/// Loads the optional YAML configuration, falling back to the embedded defaults.
pub fn load_config(path: Option<&Path>) -> Result<ChainConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(ChainConfig::load(path)?),
        None => Ok(ChainConfig::default()),
    }
}
