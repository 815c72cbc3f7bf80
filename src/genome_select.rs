// src/genome_select.rs

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::io::{self, BufRead};
use std::path::Path;

use crate::cluster_file::open_text_reader;
use crate::keywords::KeywordFilter;

/// Lines of a sequence/header file split by the genome keyword rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenomeSelection {
    /// Admitted headers plus every non-header line, in input order.
    pub kept_lines: Vec<String>,
    pub rejected_lines: Vec<String>,
}

impl GenomeSelection {
    pub fn kept_text(&self) -> String {
        let mut output = String::new();
        for line in &self.kept_lines {
            let _ = writeln!(output, "{line}");
        }
        output
    }

    pub fn rejected_log_text(&self) -> String {
        let mut output = String::from("Rejected lines:\n");
        for line in &self.rejected_lines {
            let _ = writeln!(output, "{line}");
        }
        output
    }

    /// Sorted, deduplicated genome names of the kept headers.
    pub fn genome_names(&self) -> BTreeSet<String> {
        self.kept_lines
            .iter()
            .filter_map(|line| genome_name(line))
            .map(str::to_string)
            .collect()
    }

    pub fn genome_names_text(&self) -> String {
        let mut output = String::new();
        for name in self.genome_names() {
            let _ = writeln!(output, "{name}");
        }
        output
    }
}

/// Taxonomy of a header, i.e. everything after the first `taxid=<digits>; `.
pub fn header_taxonomy(header: &str) -> Option<&str> {
    for (pos, key) in header.match_indices("taxid=") {
        let rest = &header[pos + key.len()..];
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end > 0 {
            if let Some(taxonomy) = rest[digits_end..].strip_prefix("; ") {
                return Some(taxonomy);
            }
        }
    }
    None
}

/// `>NAME|...` -> `NAME`
pub fn genome_name(header: &str) -> Option<&str> {
    let body = header.strip_prefix('>')?;
    let (name, _) = body.split_once('|')?;
    (!name.is_empty()).then_some(name)
}

/// Filters the `>` header lines of `reader` with [`KeywordFilter::admits_genome`].
///
/// Headers without a `taxid=<digits>; ` taxonomy are dropped from both sides.
pub fn select_genomes<R: BufRead>(reader: R, filter: &KeywordFilter) -> io::Result<GenomeSelection> {
    let mut selection = GenomeSelection::default();

    for line_result in reader.lines() {
        let line = line_result?;
        if !line.starts_with('>') {
            selection.kept_lines.push(line);
            continue;
        }
        let Some(taxonomy) = header_taxonomy(&line) else {
            continue;
        };
        if filter.admits_genome(taxonomy) {
            selection.kept_lines.push(line);
        } else {
            selection.rejected_lines.push(line);
        }
    }

    log::info!(
        "Genome selection kept {} line(s), rejected {} header(s)",
        selection.kept_lines.len(),
        selection.rejected_lines.len()
    );
    Ok(selection)
}

pub fn select_genomes_file<P: AsRef<Path>>(path: P, filter: &KeywordFilter) -> io::Result<GenomeSelection> {
    let reader = open_text_reader(path)?;
    select_genomes(reader, filter)
}
