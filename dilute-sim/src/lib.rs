pub mod clusters;
pub mod config;
pub mod geometry;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use clusters::{ClusterFinder, ClusterSet, WolffUpdater};
pub use geometry::Lattice;
pub use simulation::{non_magnetic_count, run_sweep_loop, Realization, Simulation};
pub use spins::SpinField;
pub use statistics::{ConcentrationRow, SweepResult};
