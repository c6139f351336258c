use super::percolation::{SpanDetector, Spanning};
use super::union_find::DisjointSet;
use crate::config::PercolationAxes;
use crate::geometry::Lattice;
use crate::spins::SpinField;

const NO_CLUSTER: u32 = u32::MAX;

/// A maximal set of same-sign magnetic sites joined by neighbor bonds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Member sites in ascending order.
    pub sites: Vec<u32>,
    /// +1 or −1, shared by every member.
    pub sign: i8,
    /// Enabled axes the cluster spans; non-empty iff it percolates.
    pub spanning: Spanning,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.sites.len()
    }

    pub fn percolates(&self) -> bool {
        self.spanning.any()
    }
}

/// Result of one cluster-identification pass.
///
/// `all` partitions the magnetic sites. The up, down and percolating views
/// are filters over it.
#[derive(Debug, Clone, Default)]
pub struct ClusterSet {
    pub all: Vec<Cluster>,
}

impl ClusterSet {
    pub fn up(&self) -> impl Iterator<Item = &Cluster> {
        self.all.iter().filter(|c| c.sign > 0)
    }

    pub fn down(&self) -> impl Iterator<Item = &Cluster> {
        self.all.iter().filter(|c| c.sign < 0)
    }

    pub fn percolating(&self) -> impl Iterator<Item = &Cluster> {
        self.all.iter().filter(|c| c.percolates())
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Size of the largest cluster, 0 if there are none.
    pub fn largest(&self) -> usize {
        self.all.iter().map(Cluster::size).max().unwrap_or(0)
    }
}

/// Union-find cluster labelling with percolation classification.
///
/// Owns all scratch arrays so that repeated passes over the same lattice do
/// not reallocate. Every call to [`find_clusters`](Self::find_clusters) is a
/// fresh pass; nothing carries over from the previous one.
pub struct ClusterFinder {
    uf: DisjointSet,
    cluster_of_root: Vec<u32>,
    spans: SpanDetector,
    axes: PercolationAxes,
}

impl ClusterFinder {
    pub fn new(n_spins: usize, axes: PercolationAxes) -> Self {
        Self {
            uf: DisjointSet::new(n_spins),
            cluster_of_root: vec![NO_CLUSTER; n_spins],
            spans: SpanDetector::new(n_spins),
            axes,
        }
    }

    /// Identify all same-sign clusters of `field` and classify percolation.
    pub fn find_clusters(&mut self, lattice: &Lattice, field: &SpinField) -> ClusterSet {
        assert_eq!(
            field.n_spins(),
            lattice.n_spins,
            "spin field does not match the lattice"
        );
        assert_eq!(
            self.uf.len(),
            lattice.n_spins,
            "cluster finder scratch does not match the lattice"
        );

        let magnetic = field.magnetic_sites();
        self.uf.reset(magnetic);

        for &i in magnetic {
            let i = i as usize;
            let sign = field.spin(i);
            for &j in lattice.neighbors(i) {
                if field.spin(j as usize) == sign {
                    self.uf.union(i, j as usize);
                }
            }
        }

        let mut all: Vec<Cluster> = Vec::new();
        for i in 0..lattice.n_spins {
            let sign = field.spin(i);
            if sign == 0 {
                continue;
            }
            let root = self.uf.find(i);
            let mut slot = self.cluster_of_root[root];
            if slot == NO_CLUSTER {
                slot = all.len() as u32;
                self.cluster_of_root[root] = slot;
                all.push(Cluster {
                    sites: Vec::new(),
                    sign,
                    spanning: Spanning::default(),
                });
            }
            all[slot as usize].sites.push(i as u32);
        }

        for cluster in all.iter_mut() {
            let root = self.uf.find(cluster.sites[0] as usize);
            self.cluster_of_root[root] = NO_CLUSTER;
            cluster.spanning = self
                .spans
                .spanning(lattice, field, &cluster.sites, self.axes);
        }

        ClusterSet { all }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Axis, BoundaryMode, CrystalType, InitPolicy, LatticeConfig};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn lattice(size: usize, layers: usize, crystal: CrystalType, boundary: BoundaryMode) -> Lattice {
        Lattice::new(&LatticeConfig {
            size,
            layers,
            crystal,
            boundary,
        })
        .unwrap()
    }

    fn finder(lattice: &Lattice) -> ClusterFinder {
        ClusterFinder::new(lattice.n_spins, PercolationAxes::default())
    }

    #[test]
    fn test_full_periodic_plane_is_one_percolating_cluster() {
        let lat = lattice(4, 1, CrystalType::Sc, BoundaryMode::Periodic);
        let field = SpinField::new(lat.n_spins);
        let clusters = finder(&lat).find_clusters(&lat, &field);

        assert_eq!(clusters.len(), 1);
        let c = &clusters.all[0];
        assert_eq!(c.size(), 16);
        assert_eq!(c.sign, 1);
        assert_eq!(clusters.up().count(), 1);
        assert_eq!(clusters.down().count(), 0);
        assert_eq!(clusters.percolating().count(), 1);
        assert!(c.spanning.along(Axis::X));
        assert!(c.spanning.along(Axis::Y));
    }

    #[test]
    fn test_fully_diluted_has_no_clusters() {
        let lat = lattice(4, 1, CrystalType::Sc, BoundaryMode::Periodic);
        let mut field = SpinField::new(lat.n_spins);
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        field.dilute(16, &mut rng);

        let clusters = finder(&lat).find_clusters(&lat, &field);
        assert!(clusters.is_empty());
        assert_eq!(clusters.largest(), 0);
    }

    #[test]
    fn test_single_down_site_in_open_cube() {
        // 2x2x2 open, site 0 flipped down
        let lat = lattice(2, 2, CrystalType::Sc, BoundaryMode::Open);
        let mut field = SpinField::new(lat.n_spins);
        field.set(0, -1);

        let clusters = finder(&lat).find_clusters(&lat, &field);
        assert_eq!(clusters.len(), 2);

        let up: Vec<&Cluster> = clusters.up().collect();
        let down: Vec<&Cluster> = clusters.down().collect();
        assert_eq!(up.len(), 1);
        assert_eq!(down.len(), 1);
        assert_eq!(up[0].sites, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(down[0].sites, vec![0]);
        assert!(!down[0].percolates());
    }

    #[test]
    fn test_sign_separates_clusters() {
        // 4x1 strip written as a 4x4x1 open lattice, row y = 0:  + + - +
        // Everything else vacant.
        let lat = lattice(4, 1, CrystalType::Sc, BoundaryMode::Open);
        let mut field = SpinField::new(lat.n_spins);
        for i in 4..16 {
            field.dilute_site(i);
        }
        field.set(2, -1);

        let clusters = finder(&lat).find_clusters(&lat, &field);
        let sites: Vec<Vec<u32>> = clusters.all.iter().map(|c| c.sites.clone()).collect();
        assert_eq!(sites, vec![vec![0, 1], vec![2], vec![3]]);
        assert_eq!(clusters.up().count(), 2);
        assert_eq!(clusters.down().count(), 1);
        assert_eq!(clusters.percolating().count(), 0);
    }

    #[test]
    fn test_partition_of_magnetic_sites() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        for crystal in CrystalType::ALL {
            for boundary in [BoundaryMode::Open, BoundaryMode::Periodic] {
                let lat = lattice(6, 3, crystal, boundary);
                let mut field = SpinField::new(lat.n_spins);
                let mut cf = finder(&lat);

                for _ in 0..3 {
                    field.initialize(InitPolicy::Random, &mut rng);
                    field.dilute(lat.n_spins / 3, &mut rng);
                    let clusters = cf.find_clusters(&lat, &field);

                    let mut seen = vec![0u32; lat.n_spins];
                    for c in &clusters.all {
                        for &s in &c.sites {
                            seen[s as usize] += 1;
                            assert_eq!(field.spin(s as usize), c.sign);
                        }
                    }
                    for i in 0..lat.n_spins {
                        let expected = u32::from(field.is_magnetic(i));
                        assert_eq!(seen[i], expected, "{crystal} {boundary:?} site {i}");
                    }

                    assert_eq!(
                        clusters.up().count() + clusters.down().count(),
                        clusters.len()
                    );
                }
            }
        }
    }

    #[test]
    fn test_clusters_are_maximal() {
        // No bond between two same-sign magnetic sites may cross clusters.
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let lat = lattice(5, 4, CrystalType::Bcc, BoundaryMode::Periodic);
        let mut field = SpinField::new(lat.n_spins);
        field.initialize(InitPolicy::Random, &mut rng);
        field.dilute(30, &mut rng);

        let clusters = finder(&lat).find_clusters(&lat, &field);
        let mut label = vec![usize::MAX; lat.n_spins];
        for (k, c) in clusters.all.iter().enumerate() {
            for &s in &c.sites {
                label[s as usize] = k;
            }
        }
        for i in 0..lat.n_spins {
            if !field.is_magnetic(i) {
                continue;
            }
            for &j in lat.neighbors(i) {
                if field.spin(j as usize) == field.spin(i) {
                    assert_eq!(label[i], label[j as usize]);
                }
            }
        }
    }

    #[test]
    fn test_repeated_passes_are_independent() {
        let lat = lattice(4, 1, CrystalType::Sc, BoundaryMode::Periodic);
        let mut cf = finder(&lat);
        let mut field = SpinField::new(lat.n_spins);
        assert_eq!(cf.find_clusters(&lat, &field).len(), 1);

        // Checkerboard: 16 isolated singletons under SC bonds
        for i in 0..16 {
            let [x, y, _] = lat.index_to_coord(i);
            if (x + y) % 2 == 1 {
                field.set(i, -1);
            }
        }
        let clusters = cf.find_clusters(&lat, &field);
        assert_eq!(clusters.len(), 16);
        assert!(clusters.all.iter().all(|c| c.size() == 1));
        assert_eq!(clusters.percolating().count(), 0);

        field.initialize(InitPolicy::AllUp, &mut Xoshiro256StarStar::seed_from_u64(0));
        assert_eq!(cf.find_clusters(&lat, &field).largest(), 16);
    }
}
