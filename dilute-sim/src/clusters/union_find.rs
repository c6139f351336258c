/// Disjoint-set forest over site indices with union by rank and path halving.
///
/// Only the sites passed to [`reset`](Self::reset) are meaningful after a
/// reset; the entries of every other site are left stale and must not be
/// queried until they are reset too.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// `n` singleton sets `{0}, {1}, …, {n-1}`.
    pub fn new(n: usize) -> Self {
        assert!(n <= u32::MAX as usize, "{n} elements do not fit u32 indices");
        Self {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Make each of `sites` a singleton again.
    pub fn reset(&mut self, sites: &[u32]) {
        for &s in sites {
            self.parent[s as usize] = s;
            self.rank[s as usize] = 0;
        }
    }

    /// Representative of `x`'s set, halving the path on the way up.
    #[inline]
    pub fn find(&mut self, x: usize) -> usize {
        let parent = &mut self.parent;
        let mut x = x as u32;
        while parent[x as usize] != x {
            parent[x as usize] = parent[parent[x as usize] as usize];
            x = parent[x as usize];
        }
        x as usize
    }

    /// Merge the sets of `x` and `y`; returns the surviving representative.
    #[inline]
    pub fn union(&mut self, x: usize, y: usize) -> usize {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return rx;
        }
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry as u32;
            ry
        } else {
            self.parent[ry] = rx as u32;
            if self.rank[rx] == self.rank[ry] {
                self.rank[rx] += 1;
            }
            rx
        }
    }

    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    #[cfg(test)]
    pub(crate) fn rank_of(&self, x: usize) -> u8 {
        self.rank[x]
    }
}
