use crate::config::CrystalType;

/// Simple cubic: the six axis unit vectors, coordination number 6.
pub const SC: [[i32; 3]; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

/// Body-centered cubic as modelled here: the simple-cubic set plus the two
/// body diagonals `(+1,+1,+1)` and `(-1,-1,-1)`, coordination number 8.
pub const BCC: [[i32; 3]; 8] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
    [1, 1, 1],
    [-1, -1, -1],
];

/// Face-centered cubic: all twelve face diagonals, i.e. every vector with one
/// zero and two `±1` components.
pub const FCC: [[i32; 3]; 12] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
];

/// Neighbor offsets for `crystal`, in the order they appear in the neighbor table.
pub fn offsets(crystal: CrystalType) -> &'static [[i32; 3]] {
    match crystal {
        CrystalType::Sc => &SC,
        CrystalType::Bcc => &BCC,
        CrystalType::Fcc => &FCC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_offsets_closed_under_negation() {
        for crystal in [CrystalType::Sc, CrystalType::Bcc, CrystalType::Fcc] {
            let set: HashSet<[i32; 3]> = offsets(crystal).iter().copied().collect();
            assert_eq!(set.len(), offsets(crystal).len(), "{crystal} has duplicates");
            for off in &set {
                let neg = [-off[0], -off[1], -off[2]];
                assert!(set.contains(&neg), "{crystal}: {off:?} has no inverse");
            }
        }
    }

    #[test]
    fn test_fcc_is_face_diagonals_only() {
        for off in FCC {
            let zeros = off.iter().filter(|&&c| c == 0).count();
            let units = off.iter().filter(|&&c| c.abs() == 1).count();
            assert_eq!((zeros, units), (1, 2), "{off:?}");
        }
    }
}
