//! Concentration sweeps of site-diluted Ising magnets on SC, BCC and FCC
//! lattices, writing one cluster-statistics table per crystal type.

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use dilute_sim::config::{CrystalType, SimConfig};
use dilute_sim::Simulation;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};

mod config;
mod output;

use config::{Args, Settings};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    setup_logging(args.verbose);

    info!("Reading configuration from: {}", args.config.display());
    let settings = Settings::from_file(&args.config)?.with_args(&args);
    let crystals = args.crystals().map_err(|e| eyre!(e))?;

    for crystal in crystals {
        let cfg = settings.sim_config(crystal)?;
        simulate_crystal(crystal, &cfg, &settings)?;
    }
    Ok(())
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn simulate_crystal(crystal: CrystalType, cfg: &SimConfig, settings: &Settings) -> Result<()> {
    info!(
        "Lattice type is {crystal}: {}x{}x{}, {} configurations per point",
        cfg.lattice.size, cfg.lattice.size, cfg.lattice.layers, cfg.n_configurations
    );

    let mut sim = Simulation::new(cfg.clone()).map_err(|e| eyre!("{crystal}: {e}"))?;
    let n_points = cfg.concentration.values().len();
    let pb = ProgressBar::new((n_points * cfg.n_configurations) as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{prefix} {msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )?
        .progress_chars("=> "),
    );
    pb.set_prefix(crystal.tag());

    let result = sim.run_sweep(&|c: f64| {
        pb.set_message(format!("c = {c:.3}"));
        pb.inc(1);
    });
    pb.finish_and_clear();

    let path = output::write_sweep(&settings.output.directory, &result)?;
    info!("{crystal}: {} rows written to {}", result.rows.len(), path.display());
    Ok(())
}
