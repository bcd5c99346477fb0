use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

pub const AGIFY_API: &str = "https://api.agify.io";

#[derive(Debug, Deserialize)]
pub struct AgifyResponse {
    #[serde(default)]
    pub count: i64,
    pub name: String,
    pub age: Option<i32>,
}

#[derive(Clone)]
pub struct AgifyClient {
    client: Client,
    base_url: String,
}

impl AgifyClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn age(&self, name: &str) -> Result<i32> {
        let url = super::lookup_url(&self.base_url, name);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Agify API error: {} - {}", status, body));
        }

        let response: AgifyResponse = response.json().await?;

        // Unknown names come back with a null age, stored as 0.
        Ok(response.age.unwrap_or_default())
    }
}
