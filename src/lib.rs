// src/lib.rs
pub mod types;
pub mod error;
pub mod cluster_file;
pub mod keywords;
pub mod filter;
pub mod classify;
pub mod report;
pub mod html;
pub mod genome_select;
pub mod taxo_compare;

use ahash::AHashSet;
use std::fs;
use std::path::Path;

pub use crate::error::{Result, TaxoError};
pub use crate::keywords::KeywordFilter;
pub use crate::report::OutputPaths;

use crate::classify::{compute_statistics, StatisticsBundle};
use crate::filter::filter_clusters;
use crate::report::{clusters_text, html_companion_path, statistics_report_text, taxonomy_list_text};
use crate::types::Cluster;

/// Everything produced from one cluster file.
/// Only structured data is kept; text and HTML are generated on demand.
pub struct ClusterReport {
    /// Clusters with at least one record left after keyword filtering
    pub filtered_clusters: Vec<Cluster>,
    /// Clusters emptied by the filter, with their original content
    pub rejected_clusters: Vec<Cluster>,
    /// Taxonomies observed before filtering
    pub all_taxonomies: AHashSet<String>,

    pub statistics: StatisticsBundle,
}

impl ClusterReport {
    pub fn get_statistics_report(&self) -> String {
        statistics_report_text(&self.statistics)
    }

    pub fn get_corrected_clusters_text(&self) -> String {
        clusters_text(&self.filtered_clusters)
    }

    pub fn get_rejected_clusters_text(&self) -> String {
        clusters_text(&self.rejected_clusters)
    }

    pub fn get_unique_taxonomies_text(&self) -> String {
        taxonomy_list_text(&self.statistics.unique_taxonomies)
    }

    pub fn get_good_taxonomies_text(&self) -> String {
        taxonomy_list_text(&self.statistics.good_discriminated_taxonomies)
    }

    pub fn get_statistics_html(&self) -> String {
        html::statistics_html(&self.statistics)
    }

    pub fn get_corrected_clusters_html(&self) -> String {
        html::clusters_html(&self.filtered_clusters)
    }

    pub fn get_rejected_clusters_html(&self) -> String {
        html::clusters_html(&self.rejected_clusters)
    }

    /// Writes every report file, each text file followed by its HTML companion.
    pub fn write_outputs(&self, paths: &OutputPaths) -> Result<()> {
        write_pair(&paths.corrected_file, self.get_corrected_clusters_text(), self.get_corrected_clusters_html())?;

        if let Some(rejected_file) = &paths.rejected_file {
            write_pair(rejected_file, self.get_rejected_clusters_text(), self.get_rejected_clusters_html())?;
        }

        write_pair(&paths.stats_file, self.get_statistics_report(), self.get_statistics_html())?;

        fs::write(&paths.good_taxo_file, self.get_good_taxonomies_text())?;
        fs::write(&paths.unique_taxo_file, self.get_unique_taxonomies_text())?;
        Ok(())
    }
}

fn write_pair(text_path: &Path, text: String, html: String) -> Result<()> {
    fs::write(text_path, text)?;
    let html_path = html_companion_path(text_path);
    fs::write(&html_path, html)?;
    log::debug!("Wrote {} and {}", text_path.display(), html_path.display());
    Ok(())
}

/// Unified entry: filter the clusters of `cluster_file` and compute statistics.
///
/// Nothing is written; an unknown keyword fails before any output exists.
pub fn run_cluster_report<P: AsRef<Path>>(cluster_file: P, filter: &KeywordFilter) -> Result<ClusterReport> {
    let outcome = filter_clusters(cluster_file, filter)?;
    let statistics = compute_statistics(&outcome.filtered_clusters);

    Ok(ClusterReport {
        filtered_clusters: outcome.filtered_clusters,
        rejected_clusters: outcome.rejected_clusters,
        all_taxonomies: outcome.all_taxonomies,
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CLUSTERS: &str = "Cluster 1:\n\
        seqA\t111\tk__Bacteria;f__Lactobacillaceae;g__Lactobacillus\n\
        seqB\t112\tk__Bacteria;f__Lactobacillaceae;g__Lactobacillus\n\
        Cluster 2:\n\
        seqC\t113\tk__Bacteria;f__Leuconostocaceae;g__Leuconostoc\n\
        seqD\t114\tk__Bacteria;f__Lactobacillaceae;g__Lactobacillus\n";

    fn write_clusters(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("cluster.txt");
        fs::write(&path, CLUSTERS).expect("Could not write cluster.txt");
        path
    }

    fn output_paths(dir: &TempDir) -> OutputPaths {
        let mut paths = OutputPaths::new(dir.path().join("stats.txt"), dir.path().join("cluster_corrected.txt"));
        paths.rejected_file = Some(dir.path().join("rejected.txt"));
        paths.unique_taxo_file = dir.path().join("uniq_taxo.txt");
        paths.good_taxo_file = dir.path().join("uniq_taxo_good_discriminated.txt");
        paths
    }

    fn words(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_unfiltered_run() {
        let dir = tempfile::tempdir().unwrap();
        let report = run_cluster_report(write_clusters(&dir), &KeywordFilter::permissive())
            .expect("Report failed");

        assert_eq!(report.filtered_clusters.len(), 2);
        assert!(report.rejected_clusters.is_empty());
        let stats = &report.statistics;
        assert_eq!(stats.good_count, 1);
        assert_eq!(stats.bad_count, 1);
        assert_eq!(stats.num_unique_taxonomies(), 2);
        assert!(report
            .get_statistics_report()
            .contains("Percentage of clusters with good discrimination: 50.00%\n"));
    }

    #[test]
    fn test_exclude_shrinks_cluster_without_rejecting_it() {
        let dir = tempfile::tempdir().unwrap();
        let filter = KeywordFilter::new(None, words(&["Leuconostoc"]));
        let report = run_cluster_report(write_clusters(&dir), &filter).expect("Report failed");

        let stats = &report.statistics;
        assert_eq!(stats.good_count, 2);
        assert_eq!(stats.bad_count, 0);
        assert!((stats.percentage_good_discrimination - 100.0).abs() < 1e-9);
        assert!(report.rejected_clusters.is_empty());
        assert_eq!(report.filtered_clusters[1].content.len(), 1);
        assert_eq!(report.all_taxonomies.len(), 2);
    }

    #[test]
    fn test_unknown_keyword_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = output_paths(&dir);
        let filter = KeywordFilter::new(words(&["NotARealTaxon"]), None);

        let result = run_cluster_report(write_clusters(&dir), &filter)
            .and_then(|report| report.write_outputs(&paths));
        match result {
            Err(TaxoError::KeywordNotFound(kw)) => assert_eq!(kw, "NotARealTaxon"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(()) => panic!("expected KeywordNotFound"),
        }
        assert!(!paths.stats_file.exists());
        assert!(!paths.corrected_file.exists());
        assert!(!paths.unique_taxo_file.exists());
    }

    #[test]
    fn test_write_outputs_creates_every_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let paths = output_paths(&dir);
        let filter = KeywordFilter::new(None, words(&["g__Lactobacillus"]));
        let report = run_cluster_report(write_clusters(&dir), &filter).expect("Report failed");
        report.write_outputs(&paths).expect("Could not write outputs");

        let corrected = fs::read_to_string(&paths.corrected_file).unwrap();
        assert_eq!(
            corrected,
            "Cluster 2:\nseqC\t113\tk__Bacteria;f__Leuconostocaceae;g__Leuconostoc\n"
        );

        // Cluster 1 was emptied and is logged with its original content
        let rejected = fs::read_to_string(paths.rejected_file.as_ref().unwrap()).unwrap();
        assert!(rejected.starts_with("Cluster 1:\nseqA\t111\t"));
        assert_eq!(rejected.lines().count(), 3);

        assert_eq!(
            fs::read_to_string(&paths.unique_taxo_file).unwrap(),
            "k__Bacteria;f__Leuconostocaceae;g__Leuconostoc\n"
        );
        assert_eq!(
            fs::read_to_string(&paths.good_taxo_file).unwrap(),
            "k__Bacteria;f__Leuconostocaceae;g__Leuconostoc\n"
        );

        for html in ["stats.html", "cluster_corrected.html", "rejected.html"] {
            let content = fs::read_to_string(dir.path().join(html)).unwrap();
            assert!(content.starts_with("<html><body>\n"), "{html} is not HTML");
        }
    }

    #[test]
    fn test_rejected_html_skipped_without_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = output_paths(&dir);
        paths.rejected_file = None;
        let report = run_cluster_report(write_clusters(&dir), &KeywordFilter::permissive()).unwrap();
        report.write_outputs(&paths).unwrap();

        assert!(paths.stats_file.exists());
        assert!(!dir.path().join("rejected.txt").exists());
        assert!(!dir.path().join("rejected.html").exists());
    }
}
