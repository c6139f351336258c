pub mod lattice;
pub mod offsets;

pub use lattice::Lattice;
pub use offsets::{offsets, BCC, FCC, SC};
