use crate::geometry::Lattice;

/// Grow a cluster from `seed` by depth-first search over the neighbor table.
/// `should_add(site, neighbor)` decides whether each not-yet-visited neighbor
/// joins; it may be stochastic. Every member is marked in `in_cluster` and
/// appended to `members` (seed first).
///
/// Caller owns the buffers: `in_cluster` must be all-false and `stack` empty.
/// On return `stack` is empty again; clearing `in_cluster` is left to the
/// caller, who can do it in O(|members|).
#[inline]
pub(super) fn bfs_cluster(
    lattice: &Lattice,
    seed: usize,
    in_cluster: &mut [bool],
    stack: &mut Vec<usize>,
    members: &mut Vec<usize>,
    mut should_add: impl FnMut(usize, usize) -> bool,
) {
    in_cluster[seed] = true;
    stack.push(seed);
    members.push(seed);

    while let Some(site) = stack.pop() {
        for &nb in lattice.neighbors(site) {
            let nb = nb as usize;
            if !in_cluster[nb] && should_add(site, nb) {
                in_cluster[nb] = true;
                stack.push(nb);
                members.push(nb);
            }
        }
    }
}
