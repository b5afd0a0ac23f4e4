use crate::constants::DEFAULT_SEED;
use anyhow::Context;
use impact_core::ImpactResults;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: impact-viz <lon> <lat> [results.ron] [--seed N] [--fast]";

#[derive(Clone, Debug, PartialEq)]
pub struct CliArgs {
    pub longitude: f64,
    pub latitude: f64,
    pub results_path: Option<PathBuf>,
    pub seed: u64,
    /// Run frames back to back instead of in real time.
    pub fast: bool,
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<CliArgs> {
    let mut positional = Vec::new();
    let mut seed = DEFAULT_SEED;
    let mut fast = false;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fast" => fast = true,
            "--seed" => {
                let value = iter.next().context("--seed needs a value")?;
                seed = value
                    .parse()
                    .with_context(|| format!("invalid seed {value:?}"))?;
            }
            _ => positional.push(arg),
        }
    }
    if positional.len() < 2 || positional.len() > 3 {
        anyhow::bail!(USAGE);
    }
    let longitude: f64 = positional[0]
        .parse()
        .with_context(|| format!("invalid longitude {:?}", positional[0]))?;
    let latitude: f64 = positional[1]
        .parse()
        .with_context(|| format!("invalid latitude {:?}", positional[1]))?;
    Ok(CliArgs {
        longitude,
        latitude,
        results_path: positional.get(2).map(PathBuf::from),
        seed,
        fast,
    })
}

pub fn parse_results(text: &str) -> anyhow::Result<ImpactResults> {
    ron::from_str(text).context("malformed results record")
}

pub fn load_results(path: &Path) -> anyhow::Result<ImpactResults> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading results from {}", path.display()))?;
    parse_results(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Reference record for the "Impactor 2025" scenario, used when no file is given.
pub fn demo_results() -> ImpactResults {
    ImpactResults {
        diameter_m: 800.0,
        crater_diameter_km: 51.89,
        shockwave_radius_km: 97.48,
        thermal_radius_km: 440.91,
        earthquake_magnitude: 7.5,
        energy_megatons: 21_600.0,
        population_density: 0,
    }
}
