//src/types.rs

use ahash::AHashMap;
use std::fmt;

/// Identifier taken from a `Cluster <id>:` header.
///
/// Kept as the literal digit token: clusters are always reported in the
/// order they were first seen, never sorted numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterId(String);

impl ClusterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One sequence entry of a cluster:
/// ```text
/// <sequence_id>\t<taxon_id>\t<taxonomy>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub sequence_id: String,
    /// Opaque token, only interpreted when building taxonomy browser links.
    pub taxon_id: String,
    pub taxonomy: String,
    /// The whitespace-stripped source line, written back verbatim in reports.
    pub line: String,
}

impl Record {
    /// Builds a record from a stripped cluster line.
    /// Returns `None` unless the line has exactly 3 tab-separated fields.
    pub fn from_line(line: &str) -> Option<Self> {
        let mut fields = line.split('\t');
        let (seq_id, taxon_id, taxonomy) = (fields.next()?, fields.next()?, fields.next()?);
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            sequence_id: seq_id.trim().to_string(),
            taxon_id: taxon_id.to_string(),
            taxonomy: taxonomy.to_string(),
            line: line.to_string(),
        })
    }
}

/// Records of one cluster keyed by sequence id, in first-insertion order.
///
/// Inserting an id that is already present replaces the record in place,
/// so the later line wins but keeps the earlier position.
#[derive(Debug, Clone, Default)]
pub struct ClusterContent {
    records: Vec<Record>,
    positions: AHashMap<String, usize>,
}

impl ClusterContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: Record) {
        match self.positions.get(&record.sequence_id) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.positions
                    .insert(record.sequence_id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, sequence_id: &str) -> Option<&Record> {
        self.positions.get(sequence_id).map(|&pos| &self.records[pos])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// `positions` is derived from `records`
impl PartialEq for ClusterContent {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for ClusterContent {}

impl FromIterator<Record> for ClusterContent {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut content = ClusterContent::new();
        for record in iter {
            content.insert(record);
        }
        content
    }
}

/// A cluster header and the records listed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub id: ClusterId,
    pub content: ClusterContent,
}

impl Cluster {
    pub fn new(id: ClusterId, content: ClusterContent) -> Self {
        Self { id, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: &str) -> Record {
        Record::from_line(line).expect("well-formed line")
    }

    #[test]
    fn test_record_requires_three_fields() {
        assert!(Record::from_line("seqA\t111").is_none());
        assert!(Record::from_line("seqA\t111\tk__Bacteria\textra").is_none());

        let rec = record(" seqA \t111\tk__Bacteria;g__Lactobacillus");
        assert_eq!(rec.sequence_id, "seqA");
        assert_eq!(rec.taxon_id, "111");
        assert_eq!(rec.taxonomy, "k__Bacteria;g__Lactobacillus");
        assert_eq!(rec.line, " seqA \t111\tk__Bacteria;g__Lactobacillus");
    }

    #[test]
    fn test_duplicate_sequence_id_overwrites_in_place() {
        let mut content = ClusterContent::new();
        content.insert(record("seqA\t1\tk__A"));
        content.insert(record("seqB\t2\tk__B"));
        content.insert(record("seqA\t3\tk__C"));

        assert_eq!(content.len(), 2);
        let ids: Vec<&str> = content.records().iter().map(|r| r.sequence_id.as_str()).collect();
        assert_eq!(ids, vec!["seqA", "seqB"]);
        assert_eq!(content.get("seqA").map(|r| r.taxonomy.as_str()), Some("k__C"));
    }
}
