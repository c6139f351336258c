use super::stats::{ClusterCategory, ClusterStatistics};
use crate::config::CrystalType;

/// Cluster averages at one magnetic concentration.
///
/// Counts are clusters per configuration. Sizes are the mean cluster size
/// divided by the lattice volume, so 1.0 means a single cluster filling the
/// whole lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcentrationRow {
    pub concentration: f64,
    pub all_count: f64,
    pub all_size: f64,
    pub up_count: f64,
    pub up_size: f64,
    pub down_count: f64,
    pub down_size: f64,
    pub perc_count: f64,
    pub perc_size: f64,
}

impl ConcentrationRow {
    /// Column names, in the order of [`fields`](Self::fields).
    pub const COLUMNS: [&'static str; 9] = [
        "concentration",
        "all_count",
        "all_size",
        "up_count",
        "up_size",
        "down_count",
        "down_size",
        "perc_count",
        "perc_size",
    ];

    pub fn from_statistics(concentration: f64, stats: &ClusterStatistics, volume: usize) -> Self {
        let v = volume as f64;
        let count = |c| stats.average_count(c);
        let size = |c| stats.average_size(c) / v;
        Self {
            concentration,
            all_count: count(ClusterCategory::All),
            all_size: size(ClusterCategory::All),
            up_count: count(ClusterCategory::Up),
            up_size: size(ClusterCategory::Up),
            down_count: count(ClusterCategory::Down),
            down_size: size(ClusterCategory::Down),
            perc_count: count(ClusterCategory::Percolating),
            perc_size: size(ClusterCategory::Percolating),
        }
    }

    pub fn fields(&self) -> [f64; 9] {
        [
            self.concentration,
            self.all_count,
            self.all_size,
            self.up_count,
            self.up_size,
            self.down_count,
            self.down_size,
            self.perc_count,
            self.perc_size,
        ]
    }
}

/// One full concentration sweep for a single crystal type.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub crystal: CrystalType,
    pub rows: Vec<ConcentrationRow>,
}
