use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use wx_chain::State;
use wx_core::to_canonical_json_pretty;

use super::load_config;

#[derive(Args, Debug)]
pub struct TableArgs {
    /// YAML file whose `states` table should be shown instead of the default.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TableEntry {
    candidates: Vec<State>,
    distribution: BTreeMap<State, f64>,
}

pub fn run(args: &TableArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let table = config.table()?;
    let mut entries = BTreeMap::new();
    for (state, candidates) in table.entries() {
        entries.insert(
            state.clone(),
            TableEntry {
                candidates: candidates.clone(),
                distribution: table.distribution(state)?,
            },
        );
    }
    println!("{}", to_canonical_json_pretty(&entries)?);
    Ok(())
}
