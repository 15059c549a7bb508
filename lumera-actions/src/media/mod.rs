//! Media search API integration
//!
//! The gallery's assets live with a third-party media service; the store
//! only keeps their public ids. Listing the whole gallery asks the service
//! which assets exist in our folder (optionally matching a search term) and
//! filters the local records to those ids.

pub mod expression;
pub mod search;

use async_trait::async_trait;
use thiserror::Error;

pub use expression::SearchExpression;
pub use search::SearchClient;

/// Media API failure
#[derive(Debug, Error)]
#[error("media api request failed: {0}")]
pub struct MediaError(#[from] reqwest::Error);

/// Query seam over the media service's asset index.
#[async_trait]
pub trait MediaIndex: Send + Sync {
    /// Return the public ids of assets matching the expression.
    async fn search_asset_ids(
        &self,
        expression: &SearchExpression,
    ) -> Result<Vec<String>, MediaError>;
}
