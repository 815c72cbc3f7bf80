// src/classify/classify_cluster.rs

use std::collections::BTreeSet;

use super::Cluster;

/// How well a cluster separates taxa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discrimination {
    /// Every record carries the same taxonomy string.
    Good,
    /// Records carry two or more distinct taxonomy strings.
    Bad,
}

/// Distinct taxonomy strings of a cluster, sorted.
pub fn distinct_taxonomies(cluster: &Cluster) -> BTreeSet<&str> {
    cluster
        .content
        .records()
        .iter()
        .map(|record| record.taxonomy.as_str())
        .collect()
}

/// Exactly one distinct taxonomy => `Good`, anything else => `Bad`.
///
/// Filtered clusters are never empty, so `Bad` always means a mix.
pub fn classify_cluster(cluster: &Cluster) -> Discrimination {
    if distinct_taxonomies(cluster).len() == 1 {
        Discrimination::Good
    } else {
        Discrimination::Bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClusterContent, ClusterId, Record};

    fn cluster(lines: &[&str]) -> Cluster {
        let content: ClusterContent = lines.iter().filter_map(|l| Record::from_line(l)).collect();
        Cluster::new(ClusterId::new("1"), content)
    }

    #[test]
    fn test_single_taxonomy_is_good() {
        let c = cluster(&["a\t1\tk__X;g__Y", "b\t2\tk__X;g__Y"]);
        assert_eq!(classify_cluster(&c), Discrimination::Good);
        assert_eq!(distinct_taxonomies(&c).len(), 1);
    }

    #[test]
    fn test_mixed_taxonomies_are_bad() {
        let c = cluster(&["a\t1\tk__X;g__Y", "b\t2\tk__X;g__Z", "c\t3\tk__X;g__Y"]);
        assert_eq!(classify_cluster(&c), Discrimination::Bad);
        assert_eq!(
            distinct_taxonomies(&c).into_iter().collect::<Vec<_>>(),
            vec!["k__X;g__Y", "k__X;g__Z"]
        );
    }

    #[test]
    fn test_taxon_id_does_not_affect_discrimination() {
        let c = cluster(&["a\t1\tk__X", "b\t99\tk__X"]);
        assert_eq!(classify_cluster(&c), Discrimination::Good);
    }
}
