pub mod results;
mod stats;

pub use results::{ConcentrationRow, SweepResult};
pub use stats::{ClusterCategory, ClusterStatistics};
