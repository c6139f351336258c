use crate::config::InitPolicy;
use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

const VACANT: u32 = u32::MAX;

/// Three-state spin configuration of a diluted magnet.
///
/// `spins[i]` is +1 (up), −1 (down) or 0 (vacant). The magnetic sites are
/// additionally kept in an unordered list so that a uniformly random magnetic
/// site can be drawn in O(1); `slot[i]` is the position of site `i` in that
/// list, or `VACANT`. A site is in the list iff its spin is non-zero.
#[derive(Debug, Clone)]
pub struct SpinField {
    spins: Vec<i8>,
    magnetic: Vec<u32>,
    slot: Vec<u32>,
}

impl SpinField {
    /// A fully magnetic field of `n_spins` up spins.
    pub fn new(n_spins: usize) -> Self {
        assert!(
            n_spins <= u32::MAX as usize,
            "{n_spins} sites do not fit a 32-bit site index"
        );
        Self {
            spins: vec![1; n_spins],
            magnetic: (0..n_spins as u32).collect(),
            slot: (0..n_spins as u32).collect(),
        }
    }

    /// Make every site magnetic again, with orientations chosen by `policy`.
    pub fn initialize(&mut self, policy: InitPolicy, rng: &mut Xoshiro256StarStar) {
        match policy {
            InitPolicy::AllUp => self.spins.fill(1),
            InitPolicy::Random => {
                for s in self.spins.iter_mut() {
                    *s = if rng.gen::<bool>() { 1 } else { -1 };
                }
            }
        }
        let n_spins = self.spins.len() as u32;
        self.magnetic.clear();
        self.magnetic.extend(0..n_spins);
        for (i, slot) in self.slot.iter_mut().enumerate() {
            *slot = i as u32;
        }
    }

    /// Turn `count` distinct magnetic sites, drawn uniformly without
    /// replacement, into vacancies.
    ///
    /// Asking for more than are left dilutes every remaining magnetic site.
    /// Returns the number of sites actually diluted.
    pub fn dilute(&mut self, count: usize, rng: &mut Xoshiro256StarStar) -> usize {
        let count = count.min(self.magnetic.len());
        for _ in 0..count {
            let k = rng.gen_range(0..self.magnetic.len());
            let site = self.magnetic[k] as usize;
            self.remove_magnetic(site);
            self.spins[site] = 0;
        }
        count
    }

    /// Make site `i` vacant. No-op if it already is.
    pub fn dilute_site(&mut self, i: usize) {
        self.check_index(i);
        if self.spins[i] != 0 {
            self.remove_magnetic(i);
            self.spins[i] = 0;
        }
    }

    /// Reverse the spin at `i`. Vacant sites stay vacant.
    #[inline]
    pub fn flip(&mut self, i: usize) {
        self.check_index(i);
        self.spins[i] = -self.spins[i];
    }

    /// Overwrite the state of site `i` with `spin` ∈ {−1, 0, +1}.
    pub fn set(&mut self, i: usize, spin: i8) {
        self.check_index(i);
        assert!((-1..=1).contains(&spin), "invalid spin value {spin}");
        match (self.spins[i] != 0, spin != 0) {
            (true, false) => self.remove_magnetic(i),
            (false, true) => {
                self.slot[i] = self.magnetic.len() as u32;
                self.magnetic.push(i as u32);
            }
            _ => {}
        }
        self.spins[i] = spin;
    }

    #[inline]
    pub fn spin(&self, i: usize) -> i8 {
        self.check_index(i);
        self.spins[i]
    }

    #[inline]
    pub fn is_magnetic(&self, i: usize) -> bool {
        self.spin(i) != 0
    }

    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    /// Indices of the non-vacant sites, in no particular order.
    pub fn magnetic_sites(&self) -> &[u32] {
        &self.magnetic
    }

    pub fn n_spins(&self) -> usize {
        self.spins.len()
    }

    pub fn n_magnetic(&self) -> usize {
        self.magnetic.len()
    }

    /// A uniformly random magnetic site, or `None` if every site is vacant.
    pub fn random_magnetic_site(&self, rng: &mut Xoshiro256StarStar) -> Option<usize> {
        if self.magnetic.is_empty() {
            return None;
        }
        Some(self.magnetic[rng.gen_range(0..self.magnetic.len())] as usize)
    }

    /// Mean spin per magnetic site; 0 for a fully diluted field.
    pub fn magnetization(&self) -> f64 {
        if self.magnetic.is_empty() {
            return 0.0;
        }
        let sum: i64 = self.spins.iter().map(|&s| s as i64).sum();
        sum as f64 / self.magnetic.len() as f64
    }

    #[inline]
    fn check_index(&self, i: usize) {
        assert!(
            i < self.spins.len(),
            "site index {i} out of range (n_spins = {})",
            self.spins.len()
        );
    }

    /// Swap-and-pop site `i` out of the magnetic list.
    fn remove_magnetic(&mut self, i: usize) {
        let k = self.slot[i] as usize;
        debug_assert!(k != VACANT as usize, "site {i} is not in the magnetic list");
        self.magnetic.swap_remove(k);
        if let Some(&moved) = self.magnetic.get(k) {
            self.slot[moved as usize] = k as u32;
        }
        self.slot[i] = VACANT;
    }
}
