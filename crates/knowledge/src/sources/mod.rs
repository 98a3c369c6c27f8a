//! Web sources that turn a query into [`SearchResult`]s.
//!
//! Each source speaks its own HTTP API and response shape; the
//! [`SourceClient`] trait hides that behind a fetch that always yields a
//! (possibly empty) list.

pub mod duckduckgo;
pub mod http;
pub mod wikipedia;

pub use duckduckgo::DuckDuckGoClient;
pub use wikipedia::WikipediaClient;

use crate::types::SearchResult;
use webask_core::AppResult;

/// A pluggable web source.
///
/// Implementors provide the fallible [`search`](SourceClient::search);
/// callers use [`fetch`](SourceClient::fetch), which absorbs every failure
/// so that one misbehaving source cannot fail the whole answer.
#[async_trait::async_trait]
pub trait SourceClient: Send + Sync {
    /// Short identifier used in logs and on produced results.
    fn name(&self) -> &str;

    /// Query the source and parse admitted results.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Search`](webask_core::AppError::Search) if the
    /// request fails, the status is not 2xx, or the body cannot be parsed.
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>>;

    /// Query the source; any failure becomes an empty list.
    async fn fetch(&self, query: &str) -> Vec<SearchResult> {
        match self.search(query).await {
            Ok(results) => {
                tracing::debug!(source = self.name(), count = results.len(), "source returned results");
                results
            }
            Err(err) => {
                tracing::warn!(source = self.name(), error = %err, "source query failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webask_core::AppError;

    struct BrokenSource;

    #[async_trait::async_trait]
    impl SourceClient for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        async fn search(&self, _query: &str) -> AppResult<Vec<SearchResult>> {
            Err(AppError::Search("connection reset".to_string()))
        }
    }

    #[test]
    fn source_client_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SourceClient>();
        let _boxed: Box<dyn SourceClient> = Box::new(BrokenSource);
    }

    #[tokio::test]
    async fn fetch_turns_errors_into_empty_list() {
        let source = BrokenSource;
        assert!(source.search("anything").await.is_err());
        assert!(source.fetch("anything").await.is_empty());
    }
}
