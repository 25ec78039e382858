//! Registry fetch boundary.
//!
//! Pure I/O: one GET against the registry endpoint, deserialized into a
//! [`RegistrySnapshot`]. No business logic beyond that. The client is built
//! from an explicit [`ClientConfig`] so tests can point it anywhere.

use crate::config::ClientConfig;
use crate::error::{BlockforgeError, Result};
use crate::project_identity;
use crate::registry::RegistrySnapshot;
use reqwest::blocking::Client;

pub struct RegistryClient {
    endpoint: String,
    token: Option<String>,
    http: Client,
}

impl RegistryClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BlockforgeError::RemoteFetchError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: project_identity::registry_endpoint(&config.registry_url),
            token: config.token.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the current catalogue snapshot. Any non-2xx response or
    /// malformed body is a fetch failure.
    pub fn fetch_snapshot(&self) -> Result<RegistrySnapshot> {
        let mut request = self.http.get(&self.endpoint).header(
            "User-Agent",
            format!("{}-cli", project_identity::BINARY_NAME),
        );
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| BlockforgeError::RemoteFetchError(format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BlockforgeError::RemoteFetchError(format!(
                "Registry returned HTTP {} for {}",
                status, self.endpoint
            )));
        }

        let body = response
            .text()
            .map_err(|e| BlockforgeError::RemoteFetchError(format!("Reading body: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            BlockforgeError::RemoteFetchError(format!("Malformed registry payload: {}", e))
        })
    }
}
