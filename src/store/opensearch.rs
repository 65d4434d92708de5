use crate::config::OpenSearchConfig;
use crate::error::{ProvisionError, Result};
use crate::store::{CreateOutcome, IndexStore, StoreInfo};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenSearch REST client for index management
pub struct OpenSearchClient {
    http: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl OpenSearchClient {
    pub fn new(config: &OpenSearchConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(config.use_ssl && !config.verify_certs)
            .build()
            .map_err(|e| ProvisionError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            credentials: config
                .credentials()
                .map(|(user, pass)| (user.to_string(), pass.to_string())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn index_url(&self, index: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(index))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((user, pass)) => request.basic_auth(user, Some(pass)),
            None => request,
        }
    }
}

#[async_trait]
impl IndexStore for OpenSearchClient {
    async fn ping(&self) -> Result<StoreInfo> {
        let response = self
            .authorize(self.http.get(&self.base_url))
            .send()
            .await
            .map_err(|e| ProvisionError::ConnectionFailed {
                url: self.base_url.clone(),
                cause: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProvisionError::ConnectionFailed {
                url: self.base_url.clone(),
                cause: format!("status {}: {}", status, body),
            });
        }

        let info: Value = response.json().await?;
        Ok(parse_store_info(&info))
    }

    async fn index_exists(&self, index: &str) -> Result<bool> {
        let response = self
            .authorize(self.http.head(self.index_url(index)))
            .send()
            .await
            .map_err(|e| ProvisionError::IndexCheckFailed {
                index: index.to_string(),
                cause: e.to_string(),
            })?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(ProvisionError::IndexCheckFailed {
                index: index.to_string(),
                cause: format!("unexpected status {}", status),
            }),
        }
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<CreateOutcome> {
        let response = self
            .authorize(self.http.put(self.index_url(index)))
            .json(body)
            .send()
            .await
            .map_err(|e| ProvisionError::IndexCreateFailed {
                index: index.to_string(),
                status: 0,
                cause: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            debug!("Created OpenSearch index '{}'", index);
            return Ok(CreateOutcome::Created);
        }

        let text = response.text().await.unwrap_or_default();
        if is_already_exists(&text) {
            return Ok(CreateOutcome::AlreadyExists);
        }

        Err(ProvisionError::IndexCreateFailed {
            index: index.to_string(),
            status: status.as_u16(),
            cause: text,
        })
    }

    async fn get_mapping(&self, index: &str) -> Result<Option<Value>> {
        let url = format!("{}/_mapping", self.index_url(index));
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| ProvisionError::MappingFetchFailed {
                index: index.to_string(),
                cause: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProvisionError::MappingFetchFailed {
                index: index.to_string(),
                cause: format!("status {}: {}", status, text),
            });
        }

        let body: Value = response.json().await.map_err(|e| ProvisionError::MappingFetchFailed {
            index: index.to_string(),
            cause: e.to_string(),
        })?;

        Ok(Some(extract_properties(&body, index)))
    }
}

/// A failed create caused by a concurrent provisioner is not an error
fn is_already_exists(body: &str) -> bool {
    body.contains("resource_already_exists_exception")
}

fn parse_store_info(info: &Value) -> StoreInfo {
    StoreInfo {
        cluster_name: info["cluster_name"].as_str().unwrap_or("unknown").to_string(),
        version: info["version"]["number"].as_str().unwrap_or("unknown").to_string(),
    }
}

/// `GET /{index}/_mapping` answers `{"<index>": {"mappings": {"properties": {...}}}}`.
/// Falls back to the first entry when the index is reached through an alias.
fn extract_properties(body: &Value, index: &str) -> Value {
    let entry = body
        .get(index)
        .or_else(|| body.as_object().and_then(|m| m.values().next()));

    entry
        .and_then(|e| e.get("mappings"))
        .and_then(|m| m.get("properties"))
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()))
}
