// src/html.rs

use std::fmt::Write as FmtWrite;

use crate::classify::StatisticsBundle;
use crate::report::{join_ids, summary_lines};
use crate::types::{Cluster, Record};

/// NCBI taxonomy browser entry for a taxon id.
pub const NCBI_TAXONOMY_BROWSER: &str = "https://www.ncbi.nlm.nih.gov/Taxonomy/Browser/wwwtax.cgi?id=";

/// Escapes the characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<li>` for one record, linking its taxon id to the taxonomy browser.
fn record_item(output: &mut String, record: &Record) {
    let taxid = escape_html(&record.taxon_id);
    let _ = writeln!(
        output,
        "<li>{}\t<a href='{}{}' target='_blank'>{}</a>\t{}</li>",
        escape_html(&record.sequence_id),
        NCBI_TAXONOMY_BROWSER,
        taxid,
        taxid,
        escape_html(&record.taxonomy)
    );
}

fn cluster_block(output: &mut String, cluster: &Cluster, heading: &str) {
    let _ = writeln!(output, "<{heading}>Cluster {}:</{heading}>", escape_html(cluster.id.as_str()));
    output.push_str("<ul>\n");
    for record in cluster.content.records() {
        record_item(output, record);
    }
    output.push_str("</ul>\n");
}

/// HTML listing of clusters (corrected or rejected), one `<h2>` per cluster.
pub fn clusters_html(clusters: &[Cluster]) -> String {
    let mut output = String::from("<html><body>\n");
    for cluster in clusters {
        cluster_block(&mut output, cluster, "h2");
    }
    output.push_str("</body></html>\n");
    output
}

/// HTML version of the statistics report.
pub fn statistics_html(stats: &StatisticsBundle) -> String {
    let mut output = String::from("<html><body>\n");

    for line in summary_lines(stats) {
        let _ = writeln!(output, "<p>{}</p>", escape_html(&line));
    }

    output.push_str("<h2>Badly discriminated clusters:</h2>\n");
    for cluster in &stats.bad_clusters {
        cluster_block(&mut output, cluster, "h3");
    }

    output.push_str("<h2>Taxonomies both good and bad discriminated:</h2>\n");
    for taxonomy in &stats.overlapping_taxonomies {
        let _ = writeln!(output, "<p><b>{}:</b></p>", escape_html(taxonomy));
        output.push_str("<ul>\n");
        let _ = writeln!(
            output,
            "<li>Well discriminated in clusters: {}</li>",
            escape_html(&join_ids(stats.good_clusters_of(taxonomy)))
        );
        let _ = writeln!(
            output,
            "<li>Poorly discriminated in clusters: {}</li>",
            escape_html(&join_ids(stats.bad_clusters_of(taxonomy)))
        );
        output.push_str("</ul>\n");
    }

    output.push_str("</body></html>\n");
    output
}
