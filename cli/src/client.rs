//! Minimal HTTP client for the server endpoints the CLI uses.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct OrphanedCopy {
    pub id: Uuid,
    pub slug: String,
    pub original_recipe_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct OrphansResponse {
    pub recipes: Vec<OrphanedCopy>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct Client {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl Client {
    pub fn new(server: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: server.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub async fn unauthed_ping(&self) -> Result<PingResponse> {
        self.get("/api/test/unauthed-ping").await
    }

    pub async fn orphans(&self) -> Result<OrphansResponse> {
        self.get("/api/recipes/orphans").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base, path);
        let mut request = self.http.get(&url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(anyhow!("{} returned {}: {}", path, status, message));
        }

        response
            .json()
            .await
            .with_context(|| format!("Invalid response from {}", path))
    }
}
