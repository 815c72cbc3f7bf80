// src/report.rs

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use crate::classify::StatisticsBundle;
use crate::types::{Cluster, ClusterId};

/// Where each artifact of a cluster report goes.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub stats_file: PathBuf,
    pub corrected_file: PathBuf,
    /// Rejected clusters are only written when this is set.
    pub rejected_file: Option<PathBuf>,
    pub unique_taxo_file: PathBuf,
    pub good_taxo_file: PathBuf,
}

impl OutputPaths {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(stats_file: P, corrected_file: Q) -> Self {
        Self {
            stats_file: stats_file.into(),
            corrected_file: corrected_file.into(),
            rejected_file: None,
            unique_taxo_file: PathBuf::from("uniq_taxo.txt"),
            good_taxo_file: PathBuf::from("uniq_taxo_good_discriminated.txt"),
        }
    }
}

/// HTML file written next to a text report: `stats.txt` -> `stats.html`.
pub fn html_companion_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match path.extension() {
        Some(ext) if ext == "txt" => path.with_extension("html"),
        _ => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".html");
            PathBuf::from(name)
        }
    }
}

/// Clusters in input format, one `Cluster <id>:` block each.
pub fn clusters_text(clusters: &[Cluster]) -> String {
    let mut output = String::new();
    for cluster in clusters {
        let _ = writeln!(output, "Cluster {}:", cluster.id);
        for record in cluster.content.records() {
            let _ = writeln!(output, "{}", record.line);
        }
    }
    output
}

/// One taxonomy per line, in the iterator's order.
pub fn taxonomy_list_text<'a, I>(taxonomies: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let mut output = String::new();
    for taxonomy in taxonomies {
        let _ = writeln!(output, "{taxonomy}");
    }
    output
}

pub(crate) fn join_ids(ids: &[ClusterId]) -> String {
    ids.iter()
        .map(ClusterId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The headline statistic lines, shared by the text and HTML reports.
pub fn summary_lines(stats: &StatisticsBundle) -> Vec<String> {
    vec![
        format!("Number of unique taxonomies: {}", stats.num_unique_taxonomies()),
        format!(
            "Number of good discriminated taxonomies: {}",
            stats.num_good_discriminated_taxonomies()
        ),
        format!(
            "Percentage of good discriminated taxonomies: {:.2}%",
            stats.percentage_good_taxonomies
        ),
        format!(
            "Number of taxonomies both good and bad discriminated: {}",
            stats.num_overlapping_taxonomies()
        ),
        format!("Total number of filtered clusters: {}", stats.total_clusters),
        format!("Number of clusters with good discrimination: {}", stats.good_count),
        format!("Number of clusters with bad discrimination: {}", stats.bad_count),
        format!(
            "Percentage of clusters with good discrimination: {:.2}%",
            stats.percentage_good_discrimination
        ),
    ]
}

/// Full statistics report: summary, bad cluster dump, overlapping taxonomies.
pub fn statistics_report_text(stats: &StatisticsBundle) -> String {
    let mut output = String::new();
    for line in summary_lines(stats) {
        let _ = writeln!(output, "{line}");
    }
    output.push('\n');

    output.push_str("Badly discriminated clusters:\n");
    for cluster in &stats.bad_clusters {
        output.push_str(&clusters_text(std::slice::from_ref(cluster)));
        output.push('\n');
    }

    output.push_str("Taxonomies both good and bad discriminated:\n");
    for taxonomy in &stats.overlapping_taxonomies {
        let _ = writeln!(output, "{taxonomy}:");
        let _ = writeln!(
            output,
            "  Well discriminated in clusters: {}",
            join_ids(stats.good_clusters_of(taxonomy))
        );
        let _ = writeln!(
            output,
            "  Poorly discriminated in clusters: {}",
            join_ids(stats.bad_clusters_of(taxonomy))
        );
        output.push('\n');
    }
    output
}
