// src/taxo_compare.rs

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::io::{self, BufRead};
use std::path::Path;

use crate::cluster_file::open_text_reader;

/// The three regions of a two-set Venn diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetComparison {
    pub only_left: BTreeSet<String>,
    pub only_right: BTreeSet<String>,
    pub shared: BTreeSet<String>,
}

/// Reads a taxonomy list (one entry per line); blank lines are ignored.
pub fn read_taxonomy_list<R: BufRead>(reader: R) -> io::Result<BTreeSet<String>> {
    let mut taxonomies = BTreeSet::new();
    for line_result in reader.lines() {
        let line = line_result?;
        let line = line.trim();
        if !line.is_empty() {
            taxonomies.insert(line.to_string());
        }
    }
    Ok(taxonomies)
}

pub fn read_taxonomy_list_file<P: AsRef<Path>>(path: P) -> io::Result<BTreeSet<String>> {
    read_taxonomy_list(open_text_reader(path)?)
}

pub fn compare_taxonomy_sets(left: &BTreeSet<String>, right: &BTreeSet<String>) -> SetComparison {
    SetComparison {
        only_left: left.difference(right).cloned().collect(),
        only_right: right.difference(left).cloned().collect(),
        shared: left.intersection(right).cloned().collect(),
    }
}

/// Both comparisons of a target gene against the 16S reference.
#[derive(Debug, Clone, Default)]
pub struct GeneComparison {
    /// All taxonomies caught by each gene.
    pub caught: SetComparison,
    /// Taxonomies well discriminated by each gene.
    pub discriminated: SetComparison,
}

impl GeneComparison {
    pub fn new(
        target_all: &BTreeSet<String>,
        reference_all: &BTreeSet<String>,
        target_good: &BTreeSet<String>,
        reference_good: &BTreeSet<String>,
    ) -> Self {
        Self {
            caught: compare_taxonomy_sets(target_all, reference_all),
            discriminated: compare_taxonomy_sets(target_good, reference_good),
        }
    }

    pub fn summary_text(&self) -> String {
        let mut output = String::new();
        write_section(&mut output, "Caught species comparison", &self.caught);
        output.push('\n');
        write_section(&mut output, "Species correctly discriminated", &self.discriminated);
        output
    }
}

fn write_section(output: &mut String, title: &str, cmp: &SetComparison) {
    let _ = writeln!(output, "{title}");
    for (label, members) in [
        ("Only target gene", &cmp.only_left),
        ("Only 16S gene", &cmp.only_right),
        ("Both genes", &cmp.shared),
    ] {
        let _ = writeln!(output, "{label}: {}", members.len());
        for taxonomy in members {
            let _ = writeln!(output, "  {taxonomy}");
        }
    }
}
