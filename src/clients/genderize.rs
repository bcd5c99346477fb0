use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

pub const GENDERIZE_API: &str = "https://api.genderize.io";

#[derive(Debug, Deserialize)]
pub struct GenderizeResponse {
    #[serde(default)]
    pub count: i64,
    pub name: String,
    pub gender: Option<String>,
    #[serde(default)]
    pub probability: f64,
}

#[derive(Clone)]
pub struct GenderizeClient {
    client: Client,
    base_url: String,
}

impl GenderizeClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn gender(&self, name: &str) -> Result<String> {
        let url = super::lookup_url(&self.base_url, name);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Genderize API error: {} - {}", status, body));
        }

        let response: GenderizeResponse = response.json().await?;

        Ok(response.gender.unwrap_or_default())
    }
}
