use std::collections::VecDeque;

use crate::config::{Axis, BoundaryMode, PercolationAxes};
use crate::geometry::Lattice;
use crate::spins::SpinField;

/// Axes a cluster spans end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spanning(pub [bool; 3]);

impl Spanning {
    pub fn along(&self, axis: Axis) -> bool {
        self.0[axis.index()]
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&s| s)
    }

    fn restrict(self, lattice: &Lattice, axes: PercolationAxes) -> Self {
        let mut out = self.0;
        for axis in Axis::ALL {
            // A one-site-thick axis cannot be spanned in any meaningful sense.
            out[axis.index()] &= axes.contains(axis) && lattice.extent(axis) > 1;
        }
        Self(out)
    }
}

/// Scratch space for percolation tests, sized to the lattice.
pub(super) struct SpanDetector {
    visited: Vec<bool>,
    unwrapped: Vec<[i64; 3]>,
    queue: VecDeque<usize>,
}

impl SpanDetector {
    pub(super) fn new(n_spins: usize) -> Self {
        Self {
            visited: vec![false; n_spins],
            unwrapped: vec![[0; 3]; n_spins],
            queue: VecDeque::new(),
        }
    }

    /// Which of the enabled `axes` the same-sign cluster made of `sites` spans.
    pub(super) fn spanning(
        &mut self,
        lattice: &Lattice,
        field: &SpinField,
        sites: &[u32],
        axes: PercolationAxes,
    ) -> Spanning {
        let raw = match lattice.boundary {
            BoundaryMode::Open => touches_both_faces(lattice, sites),
            BoundaryMode::Periodic => self.wraps(lattice, field, sites),
        };
        raw.restrict(lattice, axes)
    }

    /// Breadth-first walk from `sites[0]`, carrying each site's coordinate
    /// unwrapped across the periodic boundary. Reaching a visited site with a
    /// different unwrapped coordinate means the cluster closed a loop around
    /// the torus along every axis where the two disagree.
    fn wraps(&mut self, lattice: &Lattice, field: &SpinField, sites: &[u32]) -> Spanning {
        let Some(&seed) = sites.first() else {
            return Spanning::default();
        };
        let seed = seed as usize;
        let sign = field.spin(seed);

        let c = lattice.index_to_coord(seed);
        self.unwrapped[seed] = [c[0] as i64, c[1] as i64, c[2] as i64];
        self.visited[seed] = true;
        self.queue.push_back(seed);

        let mut wrapped = [false; 3];
        while let Some(site) = self.queue.pop_front() {
            let u = self.unwrapped[site];
            for (nb, off) in lattice.bonds(site) {
                if field.spin(nb) != sign {
                    continue;
                }
                let cand = [
                    u[0] + off[0] as i64,
                    u[1] + off[1] as i64,
                    u[2] + off[2] as i64,
                ];
                if !self.visited[nb] {
                    self.visited[nb] = true;
                    self.unwrapped[nb] = cand;
                    self.queue.push_back(nb);
                } else {
                    let seen = self.unwrapped[nb];
                    for axis in 0..3 {
                        wrapped[axis] |= cand[axis] != seen[axis];
                    }
                }
            }
        }

        for &s in sites {
            self.visited[s as usize] = false;
        }
        Spanning(wrapped)
    }
}

/// Open boundaries: the cluster holds a site on both the first and the last
/// layer perpendicular to an axis.
fn touches_both_faces(lattice: &Lattice, sites: &[u32]) -> Spanning {
    let mut low = [false; 3];
    let mut high = [false; 3];
    for &s in sites {
        let c = lattice.index_to_coord(s as usize);
        for axis in Axis::ALL {
            let a = axis.index();
            low[a] |= c[a] == 0;
            high[a] |= c[a] + 1 == lattice.extent(axis);
        }
    }
    Spanning([low[0] && high[0], low[1] && high[1], low[2] && high[2]])
}
