//! Media search API client
//!
//! Talks to the Cloudinary-style search endpoint:
//! `POST /v1_1/{cloud_name}/resources/search` with basic auth and a JSON
//! body carrying the expression. Only the asset public ids are read from
//! the response.

use async_trait::async_trait;
use lumera_core::config::MediaConfig;

use super::{MediaError, MediaIndex, SearchExpression};

const API_BASE: &str = "https://api.cloudinary.com";

/// Upper bound on assets fetched per search.
const MAX_RESULTS: u32 = 500;

/// HTTP client for the media search API
pub struct SearchClient {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl SearchClient {
    pub fn new(config: &MediaConfig) -> Result<Self, MediaError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }
}

#[async_trait]
impl MediaIndex for SearchClient {
    async fn search_asset_ids(
        &self,
        expression: &SearchExpression,
    ) -> Result<Vec<String>, MediaError> {
        #[derive(serde::Serialize)]
        struct SearchRequest<'a> {
            expression: &'a str,
            max_results: u32,
        }

        #[derive(serde::Deserialize)]
        struct SearchResponse {
            resources: Vec<Resource>,
        }

        #[derive(serde::Deserialize)]
        struct Resource {
            public_id: String,
        }

        let url = format!("{API_BASE}/v1_1/{}/resources/search", self.cloud_name);
        let expression = expression.build();

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&SearchRequest {
                expression: &expression,
                max_results: MAX_RESULTS,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await?;

        Ok(response
            .resources
            .into_iter()
            .map(|resource| resource.public_id)
            .collect())
    }
}
