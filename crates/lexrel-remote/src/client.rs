//! Relation service client implementation.

use std::time::Duration;

use lexrel_domain::traits::RelationService;
use lexrel_domain::{Relation, RelationId};

use crate::RemoteError;

/// Default timeout for service requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts for idempotent requests
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// HTTP client for the relation service
///
/// Idempotent requests (GET, DELETE) are retried with exponential
/// backoff; POST is single-shot because the collection is keyed by a
/// client-minted id and a blind replay could double-insert.
///
/// # Examples
///
/// ```no_run
/// use lexrel_remote::RelationClient;
///
/// let client = RelationClient::new("http://localhost:3000");
/// ```
pub struct RelationClient {
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl RelationClient {
    /// Create a new client for the service at `base_url`
    ///
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn items_url(&self) -> String {
        format!("{}/items", self.base_url)
    }

    /// Fetch the full remote collection
    pub async fn fetch_all(&self) -> Result<Vec<Relation>, RemoteError> {
        let url = self.items_url();

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.get(&url).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return response
                            .json::<Vec<Relation>>()
                            .await
                            .map_err(|e| RemoteError::InvalidResponse(e.to_string()));
                    }
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    last_error = Some(RemoteError::Api(format!("HTTP {}: {}", status, body)));
                }
                Err(e) => {
                    last_error = Some(RemoteError::from(e));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tracing::debug!(url = %url, attempt = attempts, "retrying fetch in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| RemoteError::Connection("max retries exceeded".to_string())))
    }

    /// Create a record remotely; returns the service's echo of it
    pub async fn create(&self, record: &Relation) -> Result<Relation, RemoteError> {
        let response = self.client.post(self.items_url()).json(record).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RemoteError::Api(format!("HTTP {}: {}", status, body)));
        }

        response
            .json::<Relation>()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }

    /// Delete a record remotely by id
    pub async fn delete(&self, id: RelationId) -> Result<(), RemoteError> {
        let url = format!("{}/{}", self.items_url(), id);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.delete(&url).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return Ok(());
                    }
                    let status = response.status();
                    if status == reqwest::StatusCode::NOT_FOUND {
                        // retrying cannot make the record exist
                        return Err(RemoteError::Api(format!("HTTP {}: no such item", status)));
                    }
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    last_error = Some(RemoteError::Api(format!("HTTP {}: {}", status, body)));
                }
                Err(e) => {
                    last_error = Some(RemoteError::from(e));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tracing::debug!(url = %url, attempt = attempts, "retrying delete in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| RemoteError::Connection("max retries exceeded".to_string())))
    }
}

impl RelationService for RelationClient {
    type Error = RemoteError;

    async fn fetch_all(&self) -> Result<Vec<Relation>, Self::Error> {
        RelationClient::fetch_all(self).await
    }

    async fn create(&self, record: &Relation) -> Result<Relation, Self::Error> {
        RelationClient::create(self, record).await
    }

    async fn delete(&self, id: RelationId) -> Result<(), Self::Error> {
        RelationClient::delete(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RelationClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let client = RelationClient::new("http://localhost:3000/");
        assert_eq!(client.items_url(), "http://localhost:3000/items");
    }

    #[test]
    fn test_items_response_parsing() {
        let json = r#"[
            {
                "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                "word1": "cat",
                "word2": "dog",
                "relation": "opposite"
            }
        ]"#;

        let items: Vec<Relation> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].word1, "cat");
        assert_eq!(
            items[0].id.to_string(),
            "01890a5d-ac96-774b-bcce-b302099a8057"
        );
    }

    #[tokio::test]
    async fn test_connection_error_mapping() {
        // Nothing listens on the discard port; the request fails fast.
        let client = RelationClient::new("http://127.0.0.1:9").with_max_retries(1);

        let result = client.fetch_all().await;
        match result {
            Err(RemoteError::Connection(_)) => {}
            other => panic!("Expected Connection error, got {:?}", other),
        }
    }

    // Integration test (requires a running relation service)
    #[tokio::test]
    #[ignore] // Only run when a service is available on localhost:3000
    async fn test_round_trip_integration() {
        let client = RelationClient::new("http://localhost:3000");

        let record = Relation::new("cat", "dog", "opposite");
        let echoed = client.create(&record).await.unwrap();
        assert_eq!(echoed.id, record.id);

        let items = client.fetch_all().await.unwrap();
        assert!(items.iter().any(|r| r.id == record.id));

        client.delete(record.id).await.unwrap();
    }
}
