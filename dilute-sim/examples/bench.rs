use std::cell::Cell;
use std::time::Instant;

use dilute_sim::config::*;
use dilute_sim::run_sweep_loop;

const L: usize = 32;
const N_LAYERS: usize = 32;
const N_CONFIGURATIONS: usize = 50;
const MC_STEPS: usize = 10;

fn main() {
    println!(
        "Lattice: {}x{}x{}  |  Configurations: {}  |  Wolff steps: {}",
        L, L, N_LAYERS, N_CONFIGURATIONS, MC_STEPS
    );
    println!("{}", "-".repeat(70));

    for crystal in CrystalType::ALL {
        let config = SimConfig {
            lattice: LatticeConfig {
                size: L,
                layers: N_LAYERS,
                crystal,
                boundary: BoundaryMode::Periodic,
            },
            concentration: ConcentrationRange {
                start: 0.1,
                end: 1.0,
                step: 0.1,
            },
            n_configurations: N_CONFIGURATIONS,
            mc_steps: MC_STEPS,
            temperature: 4.0,
            coupling: 1.0,
            init_policy: InitPolicy::AllUp,
            percolation_axes: PercolationAxes::default(),
            seed: 42,
        };

        let n_done = Cell::new(0usize);
        let t0 = Instant::now();
        let result = run_sweep_loop(&config, &|_| n_done.set(n_done.get() + 1)).unwrap();
        let elapsed = t0.elapsed().as_secs_f64();

        let per_config = elapsed / n_done.get() as f64 * 1000.0;
        let threshold = result
            .rows
            .iter()
            .find(|r| r.perc_count >= 0.5)
            .map_or(f64::NAN, |r| r.concentration);
        println!(
            "{:>3}: {:.3} s  |  {:.3} ms/configuration  |  percolating from c = {:.1}",
            crystal.tag(),
            elapsed,
            per_config,
            threshold
        );
    }
}
