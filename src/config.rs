//! Command-line arguments and the JSON run configuration.
//!
//! The JSON file mirrors the layout the plotting scripts were written against:
//! a `lattice` section, a `simulation` section and an `output` section. Every
//! key is optional and falls back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use dilute_sim::config::{
    BoundaryMode, ConcentrationRange, CrystalType, InitPolicy, LatticeConfig, PercolationAxes,
    SimConfig,
};
use serde::{Deserialize, Serialize};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "dilute-clusters")]
#[command(about = "Cluster and percolation statistics of site-diluted Ising magnets", long_about = None)]
pub struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "data/configs/default.json")]
    pub config: PathBuf,

    /// Crystal structure to simulate
    #[arg(
        short,
        long,
        default_value = "ALL",
        value_parser = ["SC", "BCC", "FCC", "ALL"],
        ignore_case = true
    )]
    pub lattice: String,

    /// Directory for the result tables (overrides config file)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// PRNG seed (overrides config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Crystal types selected by `--lattice`, in run order.
    pub fn crystals(&self) -> Result<Vec<CrystalType>, String> {
        if self.lattice.eq_ignore_ascii_case("ALL") {
            return Ok(CrystalType::ALL.to_vec());
        }
        Ok(vec![CrystalType::try_from(self.lattice.as_str())?])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatticeSettings {
    pub size: usize,
    pub n_layers: usize,
    /// `"periodic"`, `"open"` or `"hard"`
    pub boundary_conditions: String,
    /// `"up"` or `"random"`
    pub init: String,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            size: 10,
            n_layers: 10,
            boundary_conditions: "periodic".to_string(),
            init: "up".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    pub initial_concentration: f64,
    pub final_concentration: f64,
    pub concentration_step: f64,
    pub num_configurations: usize,
    pub monte_carlo_steps: usize,
    pub temperature: f64,
    pub coupling: f64,
    pub seed: u64,
    /// `"any"` or a combination of `x`, `y`, `z`
    pub percolation_axes: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            initial_concentration: 0.05,
            final_concentration: 1.0,
            concentration_step: 0.05,
            num_configurations: 100,
            monte_carlo_steps: 0,
            temperature: 1.0,
            coupling: 1.0,
            seed: 42,
            percolation_axes: "any".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data/output_txt"),
        }
    }
}

/// Whole run configuration as read from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub lattice: LatticeSettings,
    pub simulation: SimulationSettings,
    pub output: OutputSettings,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).wrap_err_with(|| {
            format!("Unable to read configuration file: {}", path.display())
        })?;
        Self::from_json(&content)
            .wrap_err_with(|| format!("Invalid configuration file: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).wrap_err("Failed to parse configuration")
    }

    /// Apply command-line overrides.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(dir) = &args.output_dir {
            self.output.directory = dir.clone();
        }
        if let Some(seed) = args.seed {
            self.simulation.seed = seed;
        }
        self
    }

    /// Engine configuration for one crystal type.
    ///
    /// String tags are parsed here; numeric ranges are checked by the engine
    /// when the simulation is built.
    pub fn sim_config(&self, crystal: CrystalType) -> Result<SimConfig> {
        let lat = &self.lattice;
        let sim = &self.simulation;
        let tag_err = |e: String| eyre!("configuration error: {e}");
        Ok(SimConfig {
            lattice: LatticeConfig {
                size: lat.size,
                layers: lat.n_layers,
                crystal,
                boundary: BoundaryMode::try_from(lat.boundary_conditions.as_str())
                    .map_err(tag_err)?,
            },
            concentration: ConcentrationRange {
                start: sim.initial_concentration,
                end: sim.final_concentration,
                step: sim.concentration_step,
            },
            n_configurations: sim.num_configurations,
            mc_steps: sim.monte_carlo_steps,
            temperature: sim.temperature,
            coupling: sim.coupling,
            init_policy: InitPolicy::try_from(lat.init.as_str()).map_err(tag_err)?,
            percolation_axes: PercolationAxes::try_from(sim.percolation_axes.as_str())
                .map_err(tag_err)?,
            seed: sim.seed,
        })
    }
}
