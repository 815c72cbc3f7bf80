pub mod classify_cluster;
pub mod classify_stats;

pub use classify_cluster::{classify_cluster, distinct_taxonomies, Discrimination};
pub use classify_stats::{compute_statistics, StatisticsBundle, TaxonomyClusters};
use crate::types::{Cluster, ClusterId};
