// ============================
// crates/backend-lib/src/catalog.rs
// ============================
//! Pass-through client for the third-party character catalog.
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use crate::config::CatalogSettings;
use crate::error::AppError;

pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(settings: &CatalogSettings) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build catalog client: {e}")))?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search people by name; the upstream JSON body is returned untouched
    #[instrument(skip(self))]
    pub async fn search_people(&self, search: &str) -> Result<Value, AppError> {
        let url = format!("{}/people/", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("search", search)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Upstream(format!("invalid catalog response: {e}")))
    }
}
