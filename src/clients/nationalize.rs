use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

pub const NATIONALIZE_API: &str = "https://api.nationalize.io";

#[derive(Debug, Deserialize)]
pub struct NationalizeResponse {
    #[serde(default)]
    pub count: i64,
    pub name: String,
    #[serde(default)]
    pub country: Vec<CountryGuess>,
}

#[derive(Debug, Deserialize)]
pub struct CountryGuess {
    pub country_id: String,
    #[serde(default)]
    pub probability: f64,
}

#[derive(Clone)]
pub struct NationalizeClient {
    client: Client,
    base_url: String,
}

impl NationalizeClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Most likely country code, i.e. the first entry of the response.
    pub async fn nationality(&self, name: &str) -> Result<String> {
        let url = super::lookup_url(&self.base_url, name);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Nationalize API error: {} - {}", status, body));
        }

        let response: NationalizeResponse = response.json().await?;

        response
            .country
            .into_iter()
            .next()
            .map(|c| c.country_id)
            .ok_or_else(|| anyhow!("Nationalize has no country for '{}'", response.name))
    }
}
