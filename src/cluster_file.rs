//src/cluster_file.rs

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::types::{Cluster, ClusterContent, ClusterId, Record};

/// Opens a text file for line reading, decompressing it when it ends in `.gz`.
pub fn open_text_reader<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Returns the id of a `Cluster <digits>:` header line.
/// Anything after the colon is ignored.
pub fn cluster_header_id(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("Cluster ")?;
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 || !rest[digits_end..].starts_with(':') {
        return None;
    }
    Some(&rest[..digits_end])
}

/// Parses a cluster file in the format:
/// ```text
/// Cluster <id>:
/// <sequence_id>\t<taxon_id>\t<taxonomy>
/// ...
/// ```
/// Clusters are returned in file order, including those without any
/// well-formed record. Lines that are not headers and do not split into
/// exactly 3 tab-separated fields are skipped, as are records appearing
/// before the first header.
pub fn parse_cluster_reader<R: BufRead>(reader: R) -> io::Result<Vec<Cluster>> {
    let mut clusters = Vec::new();
    let mut current: Option<Cluster> = None;

    for line_result in reader.lines() {
        let line = line_result?;
        let line = line.trim();

        if let Some(id) = cluster_header_id(line) {
            if let Some(done) = current.take() {
                clusters.push(done);
            }
            current = Some(Cluster::new(ClusterId::new(id), ClusterContent::new()));
            continue;
        }

        // Skip malformed lines
        let Some(record) = Record::from_line(line) else {
            continue;
        };
        if let Some(cluster) = current.as_mut() {
            cluster.content.insert(record);
        }
    }

    // The last cluster has no following header to close it
    if let Some(done) = current {
        clusters.push(done);
    }

    log::debug!("Parsed {} cluster(s)", clusters.len());
    Ok(clusters)
}

/// Parses a cluster file from disk (plain text or `.gz`).
pub fn parse_cluster_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Cluster>> {
    let reader = open_text_reader(path)?;
    parse_cluster_reader(reader)
}
