use crate::clusters::{Cluster, ClusterSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterCategory {
    All,
    Up,
    Down,
    Percolating,
}

impl ClusterCategory {
    pub const ALL: [ClusterCategory; 4] = [Self::All, Self::Up, Self::Down, Self::Percolating];

    fn slot(self) -> usize {
        match self {
            Self::All => 0,
            Self::Up => 1,
            Self::Down => 2,
            Self::Percolating => 3,
        }
    }
}

/// Running cluster counts and sizes over many configurations.
///
/// Reset once per (concentration, temperature) point, updated once per
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct ClusterStatistics {
    counts: [u64; 4],
    sizes: [u64; 4],
    n_configurations: u64,
}

impl ClusterStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn accumulate(&mut self, clusters: &ClusterSet) {
        self.n_configurations += 1;
        self.add(ClusterCategory::All, clusters.all.iter());
        self.add(ClusterCategory::Up, clusters.up());
        self.add(ClusterCategory::Down, clusters.down());
        self.add(ClusterCategory::Percolating, clusters.percolating());
    }

    fn add<'a>(&mut self, category: ClusterCategory, clusters: impl Iterator<Item = &'a Cluster>) {
        let k = category.slot();
        for c in clusters {
            self.counts[k] += 1;
            self.sizes[k] += c.size() as u64;
        }
    }

    pub fn n_configurations(&self) -> u64 {
        self.n_configurations
    }

    pub fn total_count(&self, category: ClusterCategory) -> u64 {
        self.counts[category.slot()]
    }

    pub fn total_size(&self, category: ClusterCategory) -> u64 {
        self.sizes[category.slot()]
    }

    /// Mean size of a cluster in `category`; 0 if none was seen.
    pub fn average_size(&self, category: ClusterCategory) -> f64 {
        let k = category.slot();
        if self.counts[k] == 0 {
            return 0.0;
        }
        self.sizes[k] as f64 / self.counts[k] as f64
    }

    /// Mean number of clusters in `category` per configuration.
    pub fn average_count(&self, category: ClusterCategory) -> f64 {
        if self.n_configurations == 0 {
            return 0.0;
        }
        self.counts[category.slot()] as f64 / self.n_configurations as f64
    }
}
