//! Client for the remote record-matching service.
//!
//! Each endpoint takes one value and returns a small flat JSON object with a
//! `Code` field. Match endpoints also return a similarity key used to group
//! records that refer to the same real-world entity.

mod client;
mod endpoint;
mod types;

pub use self::client::*;
pub use self::endpoint::*;
pub use self::types::*;

/// Resolves an input value to its similarity key.
///
/// Batch pipelines only depend on this trait, so they run against the live
/// service or an in-memory table alike.
#[allow(async_fn_in_trait)]
pub trait KeyResolver {
    async fn resolve(&self, input: &str) -> Result<LookupResponse, LookupError>;
}

impl KeyResolver for MatchingService {
    async fn resolve(&self, input: &str) -> Result<LookupResponse, LookupError> {
        let algorithm = self.configured_algorithm();
        self.lookup(input, algorithm).await
    }
}
