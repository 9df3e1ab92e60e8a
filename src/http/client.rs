use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::fetch_context;

/// JSON-over-HTTP client with a fixed user agent and timeout
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client })
    }

    /// GET `url` and return the body as JSON; non-2xx statuses are errors
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.send_get_request(url).await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{}: upstream returned status {}", fetch_context(url), status);
        }

        response
            .json()
            .await
            .with_context(|| fetch_context(url))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| fetch_context(url))
    }
}
