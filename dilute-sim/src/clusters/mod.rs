//! Cluster machinery: union-find labelling of same-sign clusters with
//! percolation classification, and the Wolff single-cluster update.
//!
//! Both halves grow clusters over the same neighbor table but answer different
//! questions. Labelling (`find_clusters`) is a deterministic global
//! decomposition of the current configuration into maximal same-sign
//! clusters. The Wolff update grows one stochastic sub-cluster from a random
//! seed and flips it, which is how configurations are equilibrated at a given
//! temperature before they are labelled.

mod labeling;
mod percolation;
pub mod union_find;
mod utils;
pub mod wolff;

pub use labeling::{Cluster, ClusterFinder, ClusterSet};
pub use percolation::Spanning;
pub use union_find::DisjointSet;
pub use wolff::{activation_probability, WolffUpdater};
