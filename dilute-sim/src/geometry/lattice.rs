use super::offsets::offsets;
use crate::config::{Axis, BoundaryMode, CrystalType, LatticeConfig};
use validator::Validate;

/// Cubic-family lattice of `size × size × layers` sites with a precomputed
/// neighbor table.
///
/// Sites are indexed as `x + y * size + z * size²`. The neighbor table is
/// stored in compressed-row form: the neighbors of site `i` are
/// `neighbors[row_start[i]..row_start[i + 1]]`, and `directions[k]` is the
/// index (into the crystal's offset list) of the offset that produced
/// `neighbors[k]`. Under open boundaries rows are shorter at the edges;
/// under periodic boundaries every row holds the full offset list, in order.
pub struct Lattice {
    /// In-plane extent (x and y).
    pub size: usize,
    /// Extent along z.
    pub layers: usize,
    /// Total number of sites, `size * size * layers`.
    pub n_spins: usize,
    pub crystal: CrystalType,
    pub boundary: BoundaryMode,
    offsets: &'static [[i32; 3]],
    row_start: Vec<usize>,
    neighbors: Vec<u32>,
    directions: Vec<u8>,
}

impl Lattice {
    /// Build the lattice and its neighbor table.
    ///
    /// Fails if the configuration is invalid (zero extent, or a volume that
    /// does not fit a `u32` site index).
    pub fn new(config: &LatticeConfig) -> Result<Self, String> {
        config.validate().map_err(|e| format!("{e}"))?;

        let mut lattice = Self {
            size: config.size,
            layers: config.layers,
            n_spins: config.volume(),
            crystal: config.crystal,
            boundary: config.boundary,
            offsets: offsets(config.crystal),
            row_start: Vec::new(),
            neighbors: Vec::new(),
            directions: Vec::new(),
        };
        lattice.build_neighbors();
        Ok(lattice)
    }

    fn build_neighbors(&mut self) {
        let n_offsets = self.offsets.len();
        let extent = [self.size as i64, self.size as i64, self.layers as i64];

        let mut row_start = Vec::with_capacity(self.n_spins + 1);
        let mut neighbors = Vec::with_capacity(self.n_spins * n_offsets);
        let mut directions = Vec::with_capacity(self.n_spins * n_offsets);
        row_start.push(0);

        for i in 0..self.n_spins {
            let coord = self.index_to_coord(i);

            'offsets: for (d, off) in self.offsets.iter().enumerate() {
                let mut nb = [0usize; 3];
                for axis in 0..3 {
                    let c = coord[axis] as i64 + off[axis] as i64;
                    nb[axis] = match self.boundary {
                        BoundaryMode::Open => {
                            if c < 0 || c >= extent[axis] {
                                continue 'offsets;
                            }
                            c as usize
                        }
                        BoundaryMode::Periodic => c.rem_euclid(extent[axis]) as usize,
                    };
                }
                neighbors.push(self.coord_to_index(nb) as u32);
                directions.push(d as u8);
            }
            row_start.push(neighbors.len());
        }

        self.row_start = row_start;
        self.neighbors = neighbors;
        self.directions = directions;
    }

    /// Maximum coordination number (the size of the crystal's offset list).
    pub fn n_neighbors(&self) -> usize {
        self.offsets.len()
    }

    pub fn offsets(&self) -> &'static [[i32; 3]] {
        self.offsets
    }

    pub fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::X | Axis::Y => self.size,
            Axis::Z => self.layers,
        }
    }

    #[inline]
    pub fn coord_to_index(&self, [x, y, z]: [usize; 3]) -> usize {
        assert!(
            x < self.size && y < self.size && z < self.layers,
            "coordinate ({x}, {y}, {z}) outside {}x{}x{} lattice",
            self.size,
            self.size,
            self.layers,
        );
        x + y * self.size + z * self.size * self.size
    }

    #[inline]
    pub fn index_to_coord(&self, i: usize) -> [usize; 3] {
        assert!(
            i < self.n_spins,
            "site index {i} out of range (n_spins = {})",
            self.n_spins
        );
        let area = self.size * self.size;
        let z = i / area;
        let y = (i % area) / self.size;
        let x = i % self.size;
        [x, y, z]
    }

    /// Neighbor indices of site `i`.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[u32] {
        &self.neighbors[self.row_start[i]..self.row_start[i + 1]]
    }

    /// Neighbors of site `i` paired with the lattice offset leading to each.
    #[inline]
    pub fn bonds(&self, i: usize) -> impl Iterator<Item = (usize, [i32; 3])> + '_ {
        let row = self.row_start[i]..self.row_start[i + 1];
        self.neighbors[row.clone()]
            .iter()
            .zip(self.directions[row].iter())
            .map(|(&nb, &d)| (nb as usize, self.offsets[d as usize]))
    }
}
