// src/classify/classify_stats.rs

use ahash::AHashMap;
use std::collections::BTreeSet;

use super::classify_cluster::{classify_cluster, distinct_taxonomies, Discrimination};
use super::{Cluster, ClusterId};

/// taxonomy -> clusters it appears in, in cluster order
pub type TaxonomyClusters = AHashMap<String, Vec<ClusterId>>;

/// Discrimination statistics over a set of filtered clusters.
///
/// Counts are derived from the sets on demand; percentages are stored as
/// computed (0 when their denominator is 0).
#[derive(Debug, Clone, Default)]
pub struct StatisticsBundle {
    /// Distinct taxonomies across all clusters.
    pub unique_taxonomies: BTreeSet<String>,
    /// Taxonomies found in at least one good cluster.
    pub good_discriminated_taxonomies: BTreeSet<String>,
    /// Taxonomies found in at least one bad cluster.
    pub bad_discriminated_taxonomies: BTreeSet<String>,
    /// Taxonomies that are both good and bad discriminated.
    pub overlapping_taxonomies: BTreeSet<String>,
    pub percentage_good_taxonomies: f64,

    pub total_clusters: usize,
    pub good_count: usize,
    pub bad_count: usize,
    pub percentage_good_discrimination: f64,

    /// Bad clusters with their full (filtered) content, in input order.
    pub bad_clusters: Vec<Cluster>,
    pub taxonomy_good_clusters: TaxonomyClusters,
    pub taxonomy_bad_clusters: TaxonomyClusters,
}

impl StatisticsBundle {
    pub fn num_unique_taxonomies(&self) -> usize {
        self.unique_taxonomies.len()
    }

    pub fn num_good_discriminated_taxonomies(&self) -> usize {
        self.good_discriminated_taxonomies.len()
    }

    pub fn num_overlapping_taxonomies(&self) -> usize {
        self.overlapping_taxonomies.len()
    }

    /// Clusters in which `taxonomy` was the only taxonomy.
    pub fn good_clusters_of(&self, taxonomy: &str) -> &[ClusterId] {
        self.taxonomy_good_clusters
            .get(taxonomy)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Clusters in which `taxonomy` was mixed with others.
    pub fn bad_clusters_of(&self, taxonomy: &str) -> &[ClusterId] {
        self.taxonomy_bad_clusters
            .get(taxonomy)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Classify every cluster and aggregate corpus-wide statistics.
pub fn compute_statistics(filtered_clusters: &[Cluster]) -> StatisticsBundle {
    let mut stats = StatisticsBundle {
        total_clusters: filtered_clusters.len(),
        ..Default::default()
    };

    for cluster in filtered_clusters {
        let taxonomies = distinct_taxonomies(cluster);
        stats
            .unique_taxonomies
            .extend(taxonomies.iter().map(|t| t.to_string()));

        let (tax_set, tax_clusters) = match classify_cluster(cluster) {
            Discrimination::Good => {
                stats.good_count += 1;
                (
                    &mut stats.good_discriminated_taxonomies,
                    &mut stats.taxonomy_good_clusters,
                )
            }
            Discrimination::Bad => {
                stats.bad_count += 1;
                stats.bad_clusters.push(cluster.clone());
                (
                    &mut stats.bad_discriminated_taxonomies,
                    &mut stats.taxonomy_bad_clusters,
                )
            }
        };

        for taxonomy in taxonomies {
            tax_set.insert(taxonomy.to_string());
            tax_clusters
                .entry(taxonomy.to_string())
                .or_default()
                .push(cluster.id.clone());
        }
    }

    stats.overlapping_taxonomies = stats
        .good_discriminated_taxonomies
        .intersection(&stats.bad_discriminated_taxonomies)
        .cloned()
        .collect();

    stats.percentage_good_taxonomies = percentage(
        stats.good_discriminated_taxonomies.len(),
        stats.unique_taxonomies.len(),
    );
    stats.percentage_good_discrimination = percentage(stats.good_count, stats.total_clusters);

    log::info!(
        "{} cluster(s): {} good, {} bad; {} taxonomies, {} overlapping",
        stats.total_clusters,
        stats.good_count,
        stats.bad_count,
        stats.unique_taxonomies.len(),
        stats.overlapping_taxonomies.len()
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster_file::parse_cluster_reader;
    use std::io::Cursor;

    const LACTO: &str = "k__Bacteria;f__Lactobacillaceae;g__Lactobacillus";
    const LEUCO: &str = "k__Bacteria;f__Leuconostocaceae;g__Leuconostoc";

    fn parse(input: &str) -> Vec<Cluster> {
        parse_cluster_reader(Cursor::new(input)).unwrap()
    }

    fn ids(list: &[ClusterId]) -> Vec<&str> {
        list.iter().map(ClusterId::as_str).collect()
    }

    #[test]
    fn test_good_and_bad_clusters() {
        let clusters = parse(&format!(
            "Cluster 1:\nseqA\t111\t{LACTO}\nseqB\t112\t{LACTO}\n\
             Cluster 2:\nseqC\t113\t{LEUCO}\nseqD\t114\t{LACTO}\n"
        ));
        let stats = compute_statistics(&clusters);

        assert_eq!(stats.total_clusters, 2);
        assert_eq!(stats.good_count, 1);
        assert_eq!(stats.bad_count, 1);
        assert_eq!(stats.num_unique_taxonomies(), 2);
        assert_eq!(stats.num_good_discriminated_taxonomies(), 1);
        assert!((stats.percentage_good_taxonomies - 50.0).abs() < 1e-9);
        assert!((stats.percentage_good_discrimination - 50.0).abs() < 1e-9);

        assert_eq!(stats.bad_clusters.len(), 1);
        assert_eq!(stats.bad_clusters[0].id.as_str(), "2");

        assert_eq!(stats.num_overlapping_taxonomies(), 1);
        assert!(stats.overlapping_taxonomies.contains(LACTO));
        assert_eq!(ids(stats.good_clusters_of(LACTO)), vec!["1"]);
        assert_eq!(ids(stats.bad_clusters_of(LACTO)), vec!["2"]);
        assert!(stats.good_clusters_of(LEUCO).is_empty());
    }

    #[test]
    fn test_counts_add_up_and_overlap_is_listed_on_both_sides() {
        let clusters = parse(&format!(
            "Cluster 4:\na\t1\t{LEUCO}\n\
             Cluster 2:\nb\t2\t{LACTO}\nc\t3\t{LEUCO}\n\
             Cluster 7:\nd\t4\t{LACTO}\n\
             Cluster 3:\ne\t5\t{LEUCO}\nf\t6\tk__Bacteria;g__Weissella\n"
        ));
        let stats = compute_statistics(&clusters);

        assert_eq!(stats.good_count + stats.bad_count, clusters.len());
        assert_eq!(stats.num_overlapping_taxonomies(), 2);
        for taxonomy in &stats.overlapping_taxonomies {
            assert!(!stats.good_clusters_of(taxonomy).is_empty());
            assert!(!stats.bad_clusters_of(taxonomy).is_empty());
        }
        // membership follows input order, not numeric order
        assert_eq!(ids(stats.bad_clusters_of(LEUCO)), vec!["2", "3"]);
        assert_eq!(ids(stats.good_clusters_of(LEUCO)), vec!["4"]);
    }

    #[test]
    fn test_no_clusters_yields_zero_percentages() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.total_clusters, 0);
        assert_eq!(stats.percentage_good_taxonomies, 0.0);
        assert_eq!(stats.percentage_good_discrimination, 0.0);
        assert!(stats.bad_clusters.is_empty());
    }
}
