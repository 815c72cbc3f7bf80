//src/keywords.rs

use crate::error::{Result, TaxoError};

/// Include/exclude keyword rules applied to taxonomy strings.
///
/// Matching is a case-sensitive substring test. `None` and an empty list
/// are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl KeywordFilter {
    pub fn new(include: Option<Vec<String>>, exclude: Option<Vec<String>>) -> Self {
        Self {
            include: include.unwrap_or_default(),
            exclude: exclude.unwrap_or_default(),
        }
    }

    /// A filter that keeps every record.
    pub fn permissive() -> Self {
        Self::default()
    }

    fn any_include(&self, taxonomy: &str) -> bool {
        self.include.iter().any(|kw| taxonomy.contains(kw.as_str()))
    }

    fn any_exclude(&self, taxonomy: &str) -> bool {
        self.exclude.iter().any(|kw| taxonomy.contains(kw.as_str()))
    }

    /// Cluster record rule: an empty include list admits everything.
    pub fn admits(&self, taxonomy: &str) -> bool {
        let include_condition = self.include.is_empty() || self.any_include(taxonomy);
        let exclude_condition = self.exclude.is_empty() || !self.any_exclude(taxonomy);
        include_condition && exclude_condition
    }

    /// Genome header rule: a header is only kept when an include keyword
    /// matches, so an empty include list admits nothing.
    pub fn admits_genome(&self, taxonomy: &str) -> bool {
        let include = !self.include.is_empty() && self.any_include(taxonomy);
        let exclude = !self.exclude.is_empty() && self.any_exclude(taxonomy);
        include && !exclude
    }

    /// Checks that every keyword occurs in at least one of `taxonomies`.
    /// Include keywords are checked first, each list in the given order.
    pub fn validate<'a, I>(&self, taxonomies: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a String> + Clone,
    {
        for keyword in self.include.iter().chain(self.exclude.iter()) {
            let found = taxonomies
                .clone()
                .into_iter()
                .any(|taxonomy| taxonomy.contains(keyword.as_str()));
            if !found {
                return Err(TaxoError::KeywordNotFound(keyword.clone()));
            }
        }
        Ok(())
    }
}
