//! Clients for the public name-lookup services used to enrich people.

pub mod agify;
pub mod genderize;
pub mod nationalize;

use crate::config::EnrichmentConfig;
use agify::AgifyClient;
use genderize::GenderizeClient;
use nationalize::NationalizeClient;
use reqwest::Client;

fn lookup_url(base_url: &str, name: &str) -> String {
    format!(
        "{}/?name={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(name)
    )
}

/// The three lookup clients sharing one HTTP connection pool.
#[derive(Clone)]
pub struct EnrichClient {
    pub agify: AgifyClient,
    pub genderize: GenderizeClient,
    pub nationalize: NationalizeClient,
}

impl EnrichClient {
    pub fn new(client: &Client, config: &EnrichmentConfig) -> Self {
        Self {
            agify: AgifyClient::new(client.clone(), config.agify_url.clone()),
            genderize: GenderizeClient::new(client.clone(), config.genderize_url.clone()),
            nationalize: NationalizeClient::new(client.clone(), config.nationalize_url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn echo(body: Value) -> Router {
        Router::new().route(
            "/",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let mut body = body.clone();
                body["name"] = json!(params.get("name").cloned().unwrap_or_default());
                async move { Json(body) }
            }),
        )
    }

    #[test]
    fn test_lookup_url_encodes_name() {
        assert_eq!(
            lookup_url("https://api.agify.io/", "Zoë Anne"),
            "https://api.agify.io/?name=Zo%C3%AB%20Anne"
        );
    }

    #[tokio::test]
    async fn test_agify_reads_age() {
        let base = serve(echo(json!({"count": 10, "age": 41}))).await;
        let client = AgifyClient::new(Client::new(), base);

        assert_eq!(client.age("Dmitriy").await.unwrap(), 41);
    }

    #[tokio::test]
    async fn test_agify_null_age_reads_as_zero() {
        let base = serve(echo(json!({"count": 0, "age": null}))).await;
        let client = AgifyClient::new(Client::new(), base);

        assert_eq!(client.age("Xqzv").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_genderize_null_gender_reads_as_empty() {
        let base = serve(echo(json!({"count": 0, "gender": null, "probability": 0.0}))).await;
        let client = GenderizeClient::new(Client::new(), base);

        assert_eq!(client.gender("Xqzv").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_genderize_reads_gender() {
        let base = serve(echo(json!({"count": 5, "gender": "male", "probability": 0.99}))).await;
        let client = GenderizeClient::new(Client::new(), base);

        assert_eq!(client.gender("Dmitriy").await.unwrap(), "male");
    }

    #[tokio::test]
    async fn test_nationalize_takes_first_country() {
        let base = serve(echo(json!({
            "count": 5,
            "country": [
                {"country_id": "UA", "probability": 0.4},
                {"country_id": "RU", "probability": 0.3}
            ]
        })))
        .await;
        let client = NationalizeClient::new(Client::new(), base);

        assert_eq!(client.nationality("Dmitriy").await.unwrap(), "UA");
    }

    #[tokio::test]
    async fn test_nationalize_with_no_countries_is_an_error() {
        let base = serve(echo(json!({"count": 0, "country": []}))).await;
        let client = NationalizeClient::new(Client::new(), base);

        assert!(client.nationality("Xqzv").await.is_err());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let app = Router::new().route(
            "/",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base = serve(app).await;
        let client = GenderizeClient::new(Client::new(), base);

        let err = client.gender("Dmitriy").await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }
}
