//src/filter.rs

use ahash::AHashSet;
use std::path::Path;

use crate::cluster_file::parse_cluster_file;
use crate::error::Result;
use crate::keywords::KeywordFilter;
use crate::types::{Cluster, ClusterContent};

/// Result of applying a [`KeywordFilter`] to every cluster of a file.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Clusters with at least one surviving record, in input order.
    pub filtered_clusters: Vec<Cluster>,
    /// Clusters left empty by the filter, with their unfiltered content.
    pub rejected_clusters: Vec<Cluster>,
    /// Every taxonomy seen before filtering.
    pub all_taxonomies: AHashSet<String>,
}

/// Filters already parsed clusters.
///
/// Fails with `KeywordNotFound` when a keyword matches none of the
/// taxonomies observed in `clusters`.
pub fn filter_parsed_clusters(clusters: Vec<Cluster>, filter: &KeywordFilter) -> Result<FilterOutcome> {
    let mut outcome = FilterOutcome::default();

    for cluster in clusters {
        for record in cluster.content.records() {
            outcome.all_taxonomies.insert(record.taxonomy.clone());
        }

        let kept: ClusterContent = cluster
            .content
            .records()
            .iter()
            .filter(|record| filter.admits(&record.taxonomy))
            .cloned()
            .collect();

        if kept.is_empty() {
            log::debug!("Cluster {} rejected ({} record(s))", cluster.id, cluster.content.len());
            outcome.rejected_clusters.push(cluster);
        } else {
            log::debug!(
                "Cluster {} kept {}/{} record(s)",
                cluster.id,
                kept.len(),
                cluster.content.len()
            );
            outcome.filtered_clusters.push(Cluster::new(cluster.id, kept));
        }
    }

    filter.validate(outcome.all_taxonomies.iter())?;

    log::info!(
        "Kept {} cluster(s), rejected {} ({} distinct taxonomies before filtering)",
        outcome.filtered_clusters.len(),
        outcome.rejected_clusters.len(),
        outcome.all_taxonomies.len()
    );
    Ok(outcome)
}

/// Parses `cluster_file` and filters its records by taxonomy keywords.
pub fn filter_clusters<P: AsRef<Path>>(cluster_file: P, filter: &KeywordFilter) -> Result<FilterOutcome> {
    let clusters = parse_cluster_file(cluster_file)?;
    filter_parsed_clusters(clusters, filter)
}
