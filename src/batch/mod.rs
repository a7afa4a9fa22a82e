//! Sequential batch pipelines over an input file of one value per line.
//!
//! Each non-empty line is resolved through a [`KeyResolver`] one at a time.
//! Per-line failures are logged and never abort the run; only opening the
//! input or creating the output is fatal.
//!
//! [`KeyResolver`]: crate::service::KeyResolver

mod append;
mod input;
mod report;

pub use self::append::*;
pub use self::input::*;
pub use self::report::*;

pub const TARGET_BATCH: &str = "batch";

/// Counts gathered while processing a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Non-empty input lines processed
    pub lines_read: usize,
    /// Lookups that produced a non-empty key
    pub resolved: usize,
    /// Lookups that failed outright
    pub failed: usize,
    /// Successful lookups without a key
    pub empty_keys: usize,
}

impl BatchSummary {
    pub fn unresolved(&self) -> usize {
        self.failed + self.empty_keys
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::Cell;
    use std::collections::{HashMap, HashSet};

    use crate::service::{KeyResolver, LookupError, LookupResponse, SUCCESS_CODE};

    /// In-memory resolver. Inputs missing from the table fail like a
    /// transport error.
    pub struct TableResolver {
        keys: HashMap<String, String>,
        failing: HashSet<String>,
        calls: Cell<usize>,
    }

    impl TableResolver {
        pub fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                keys: entries
                    .iter()
                    .map(|(input, key)| (input.to_string(), key.to_string()))
                    .collect(),
                failing: HashSet::new(),
                calls: Cell::new(0),
            }
        }

        pub fn failing(mut self, input: &str) -> Self {
            self.failing.insert(input.to_string());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl KeyResolver for TableResolver {
        async fn resolve(&self, input: &str) -> Result<LookupResponse, LookupError> {
            self.calls.set(self.calls.get() + 1);
            if self.failing.contains(input) {
                return Err(LookupError::ServiceStatus {
                    code: "Error".to_string(),
                });
            }
            self.keys
                .get(input)
                .map(|key| LookupResponse {
                    key: key.clone(),
                    code: SUCCESS_CODE.to_string(),
                    credits: "100".to_string(),
                })
                .ok_or_else(|| LookupError::Transport(format!("no entry for {:?}", input)))
        }
    }
}
