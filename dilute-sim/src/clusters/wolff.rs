use super::utils::bfs_cluster;
use crate::geometry::Lattice;
use crate::spins::SpinField;
use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

/// Bond activation probability of the Wolff update, `1 − exp(−2J/T)`.
#[inline]
pub fn activation_probability(coupling: f64, temperature: f64) -> f64 {
    1.0 - (-2.0 * coupling / temperature).exp()
}

/// Wolff single-cluster update on a diluted ferromagnet.
///
/// Seeds on a uniformly random magnetic site and grows a cluster over
/// same-sign magnetic neighbors, activating each visited bond independently
/// with [`activation_probability`]. The whole cluster is then flipped.
/// Vacancies never join, so dilution acts as a fixed, non-participating
/// boundary.
///
/// Owns its scratch buffers; one updater serves any number of steps on
/// lattices of the size it was built for.
pub struct WolffUpdater {
    in_cluster: Vec<bool>,
    stack: Vec<usize>,
    members: Vec<usize>,
}

impl WolffUpdater {
    pub fn new(n_spins: usize) -> Self {
        Self {
            in_cluster: vec![false; n_spins],
            stack: Vec::with_capacity(n_spins),
            members: Vec::with_capacity(n_spins),
        }
    }

    /// Perform one cluster move and return the number of flipped spins
    /// (0 when the field has no magnetic site).
    pub fn step(
        &mut self,
        lattice: &Lattice,
        field: &mut SpinField,
        coupling: f64,
        temperature: f64,
        rng: &mut Xoshiro256StarStar,
    ) -> usize {
        assert_eq!(
            self.in_cluster.len(),
            lattice.n_spins,
            "Wolff scratch does not match the lattice"
        );
        let Some(seed) = field.random_magnetic_site(rng) else {
            return 0;
        };
        let sign = field.spin(seed);
        let p = activation_probability(coupling, temperature);

        {
            let spins = field.spins();
            bfs_cluster(
                lattice,
                seed,
                &mut self.in_cluster,
                &mut self.stack,
                &mut self.members,
                |_site, nb| spins[nb] == sign && rng.gen::<f64>() < p,
            );
        }

        for &i in &self.members {
            field.flip(i);
            self.in_cluster[i] = false;
        }
        let size = self.members.len();
        self.members.clear();
        size
    }

    /// `n_steps` consecutive moves; returns the mean flipped-cluster size.
    pub fn sweep(
        &mut self,
        lattice: &Lattice,
        field: &mut SpinField,
        coupling: f64,
        temperature: f64,
        n_steps: usize,
        rng: &mut Xoshiro256StarStar,
    ) -> f64 {
        if n_steps == 0 {
            return 0.0;
        }
        let mut flipped = 0usize;
        for _ in 0..n_steps {
            flipped += self.step(lattice, field, coupling, temperature, rng);
        }
        flipped as f64 / n_steps as f64
    }
}
