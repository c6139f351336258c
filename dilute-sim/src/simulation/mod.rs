pub mod realization;

pub use realization::Realization;

use crate::clusters::{ClusterFinder, ClusterSet, WolffUpdater};
use crate::config::SimConfig;
use crate::geometry::Lattice;
use crate::statistics::{ClusterStatistics, ConcentrationRow, SweepResult};
use tracing::{debug, trace};
use validator::Validate;

/// Number of vacancies that leaves a magnetic fraction of (at least)
/// `concentration` on `volume` sites: `ceil((1 − c) · V)`, clamped to
/// `[0, V]`. A small slack keeps products like `0.25 · 16` from rounding up.
pub fn non_magnetic_count(concentration: f64, volume: usize) -> usize {
    let n = ((1.0 - concentration) * volume as f64 - 1e-9).ceil();
    n.clamp(0.0, volume as f64) as usize
}

/// Driver for one lattice: owns the neighbor table, the realization and all
/// scratch space, and runs configurations strictly one after another.
pub struct Simulation {
    config: SimConfig,
    lattice: Lattice,
    real: Realization,
    finder: ClusterFinder,
    wolff: WolffUpdater,
    stats: ClusterStatistics,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, String> {
        config.validate().map_err(|e| format!("{e}"))?;
        let lattice = Lattice::new(&config.lattice)?;
        let n_spins = lattice.n_spins;
        Ok(Self {
            real: Realization::new(&lattice, config.seed),
            finder: ClusterFinder::new(n_spins, config.percolation_axes),
            wolff: WolffUpdater::new(n_spins),
            stats: ClusterStatistics::new(),
            lattice,
            config,
        })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn realization(&self) -> &Realization {
        &self.real
    }

    /// Statistics accumulated since the last concentration point started.
    pub fn statistics(&self) -> &ClusterStatistics {
        &self.stats
    }

    /// Generate one configuration and label its clusters:
    /// initialize, dilute, equilibrate with `mc_steps` Wolff moves, label.
    pub fn run_configuration(&mut self, n_vacancies: usize) -> ClusterSet {
        let cfg = &self.config;
        self.real.prepare(cfg.init_policy, n_vacancies);
        let mean_flip = self.wolff.sweep(
            &self.lattice,
            &mut self.real.field,
            cfg.coupling,
            cfg.temperature,
            cfg.mc_steps,
            &mut self.real.rng,
        );
        let clusters = self.finder.find_clusters(&self.lattice, &self.real.field);
        trace!(
            n_magnetic = self.real.field.n_magnetic(),
            mean_flip,
            n_clusters = clusters.len(),
            largest = clusters.largest(),
            "configuration done"
        );
        clusters
    }

    /// Average `n_configurations` independent configurations at one
    /// concentration. `on_configuration` fires once per configuration.
    pub fn run_concentration(
        &mut self,
        concentration: f64,
        on_configuration: &dyn Fn(f64),
    ) -> ConcentrationRow {
        let n_vacancies = non_magnetic_count(concentration, self.lattice.n_spins);
        self.stats.reset();
        for _ in 0..self.config.n_configurations {
            on_configuration(concentration);
            let clusters = self.run_configuration(n_vacancies);
            self.stats.accumulate(&clusters);
        }

        let row = ConcentrationRow::from_statistics(concentration, &self.stats, self.lattice.n_spins);
        debug!(
            crystal = %self.lattice.crystal,
            concentration,
            n_vacancies,
            all_count = row.all_count,
            all_size = row.all_size,
            perc_count = row.perc_count,
            "concentration point done"
        );
        row
    }

    /// Every concentration of the configured range, in increasing order.
    pub fn run_sweep(&mut self, on_configuration: &dyn Fn(f64)) -> SweepResult {
        let rows = self
            .config
            .concentration
            .values()
            .into_iter()
            .map(|c| self.run_concentration(c, on_configuration))
            .collect();
        SweepResult {
            crystal: self.lattice.crystal,
            rows,
        }
    }
}

/// Build a [`Simulation`] for `config` and run its full concentration sweep.
///
/// `on_configuration` is called once per configuration with the current
/// concentration (useful for progress bars).
pub fn run_sweep_loop(
    config: &SimConfig,
    on_configuration: &dyn Fn(f64),
) -> Result<SweepResult, String> {
    let mut sim = Simulation::new(config.clone())?;
    Ok(sim.run_sweep(on_configuration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        BoundaryMode, ConcentrationRange, CrystalType, InitPolicy, LatticeConfig, PercolationAxes,
    };
    use std::cell::Cell;

    fn config(
        size: usize,
        layers: usize,
        boundary: BoundaryMode,
        concentration: ConcentrationRange,
    ) -> SimConfig {
        SimConfig {
            lattice: LatticeConfig {
                size,
                layers,
                crystal: CrystalType::Sc,
                boundary,
            },
            concentration,
            n_configurations: 4,
            mc_steps: 0,
            temperature: 1.0,
            coupling: 1.0,
            init_policy: InitPolicy::AllUp,
            percolation_axes: PercolationAxes::default(),
            seed: 42,
        }
    }

    #[test]
    fn test_non_magnetic_count() {
        assert_eq!(non_magnetic_count(1.0, 16), 0);
        assert_eq!(non_magnetic_count(0.0, 16), 16);
        assert_eq!(non_magnetic_count(0.75, 16), 4);
        assert_eq!(non_magnetic_count(0.7, 16), 5);
        assert_eq!(non_magnetic_count(1.0005, 16), 0);
    }

    #[test]
    fn test_full_lattice_row() {
        // 4x4x1 periodic, fully magnetic, no MC: one spanning up cluster of 16
        let cfg = config(4, 1, BoundaryMode::Periodic, ConcentrationRange::single(1.0));
        let mut sim = Simulation::new(cfg).unwrap();
        let calls = Cell::new(0);
        let row = sim.run_concentration(1.0, &|_| calls.set(calls.get() + 1));

        assert_eq!(calls.get(), 4);
        assert_eq!(row.all_count, 1.0);
        assert_eq!(row.all_size, 1.0);
        assert_eq!(row.up_count, 1.0);
        assert_eq!(row.up_size, 1.0);
        assert_eq!(row.down_count, 0.0);
        assert_eq!(row.down_size, 0.0);
        assert_eq!(row.perc_count, 1.0);
        assert_eq!(row.perc_size, 1.0);
    }

    #[test]
    fn test_fully_diluted_row_is_zero() {
        let cfg = config(4, 1, BoundaryMode::Periodic, ConcentrationRange::single(0.0));
        let mut sim = Simulation::new(cfg).unwrap();
        let row = sim.run_concentration(0.0, &|_| {});
        assert!(row.fields()[1..].iter().all(|&v| v == 0.0));
        assert_eq!(sim.realization().field.n_magnetic(), 0);
    }

    #[test]
    fn test_configuration_respects_concentration() {
        let cfg = config(6, 2, BoundaryMode::Open, ConcentrationRange::single(0.5));
        let mut sim = Simulation::new(cfg).unwrap();
        let clusters = sim.run_configuration(non_magnetic_count(0.5, 72));
        let total: usize = clusters.all.iter().map(|c| c.size()).sum();
        assert_eq!(total, 36);
        assert_eq!(sim.realization().field.n_magnetic(), 36);
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let mut cfg = config(
            5,
            3,
            BoundaryMode::Periodic,
            ConcentrationRange {
                start: 0.2,
                end: 1.0,
                step: 0.2,
            },
        );
        cfg.mc_steps = 3;
        cfg.temperature = 3.0;
        cfg.init_policy = InitPolicy::Random;

        let a = run_sweep_loop(&cfg, &|_| {}).unwrap();
        let b = run_sweep_loop(&cfg, &|_| {}).unwrap();
        assert_eq!(a.crystal, CrystalType::Sc);
        assert_eq!(a.rows.len(), 5);
        assert_eq!(a.rows, b.rows);

        let concentrations: Vec<f64> = a.rows.iter().map(|r| r.concentration).collect();
        assert!(concentrations.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_more_magnetic_sites_mean_bigger_clusters() {
        let mut cfg = config(
            8,
            4,
            BoundaryMode::Periodic,
            ConcentrationRange {
                start: 0.1,
                end: 0.9,
                step: 0.8,
            },
        );
        cfg.n_configurations = 10;
        let result = run_sweep_loop(&cfg, &|_| {}).unwrap();
        let sparse = result.rows[0];
        let dense = result.rows[1];
        assert!(dense.all_size > sparse.all_size);
        // At 90% site occupation the SC lattice is far above its ~31% threshold
        assert!(dense.perc_count > 0.0);
        assert!(dense.perc_size > sparse.perc_size);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut cfg = config(4, 1, BoundaryMode::Open, ConcentrationRange::single(0.5));
        cfg.temperature = -1.0;
        assert!(Simulation::new(cfg).is_err());

        let mut cfg = config(4, 1, BoundaryMode::Open, ConcentrationRange::single(0.5));
        cfg.lattice.size = 0;
        assert!(run_sweep_loop(&cfg, &|_| {}).is_err());
    }
}
