use serde::{Deserialize, Serialize};
use std::fmt;

/// One input value paired with the similarity key the matching service returned for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Original text exactly as it appeared in the input list
    pub input: String,
    /// Opaque similarity token, compared byte for byte
    pub key: String,
}

impl MatchRecord {
    pub fn new(input: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.input, self.key)
    }
}

/// Group of two or more records sharing one similarity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    records: Vec<MatchRecord>,
}

impl Cluster {
    /// Wraps a run of equal-key records. Returns `None` for runs that are too
    /// small to count as a match.
    pub(crate) fn from_run(records: Vec<MatchRecord>) -> Option<Self> {
        if records.len() < MIN_CLUSTER_SIZE {
            return None;
        }
        debug_assert!(records.windows(2).all(|w| w[0].key == w[1].key));
        Some(Self { records })
    }

    pub fn key(&self) -> &str {
        &self.records[0].key
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<MatchRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Cluster {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Smallest group size that is reported as a cluster
pub const MIN_CLUSTER_SIZE: usize = 2;
