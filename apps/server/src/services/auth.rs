// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-legged OAuth token cache with single-flight refresh.
//!
//! The cached (token, expiry) pair lives behind one async mutex that is
//! held across the refresh call, so requests arriving while a refresh is
//! in flight wait for it instead of issuing duplicate token fetches.
//! Refresh happens lazily, a fixed lead time before the reported expiry.

use crate::config::Config;
use crate::error::ApiError;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const TOKEN_SCOPE: &str = "data:read data:write bucket:read bucket:create viewables:read";

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// OAuth client-credentials token cache for the APS APIs.
pub struct TokenCache {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    refresh_lead: Duration,
    state: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.aps_base_url.trim_end_matches('/').to_string(),
            client_id: config.aps_client_id.clone(),
            client_secret: config.aps_client_secret.clone(),
            refresh_lead: Duration::from_secs(config.token_refresh_lead_secs),
            state: Mutex::new(None),
        }
    }

    /// Current access token, refreshing when stale.
    pub async fn access_token(&self) -> Result<String, ApiError> {
        let (token, _) = self.token_with_remaining().await?;
        Ok(token)
    }

    /// Current access token plus its remaining lifetime in seconds.
    pub async fn token_with_remaining(&self) -> Result<(String, u64), ApiError> {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            let now = Instant::now();
            if cached.expires_at > now {
                let remaining = (cached.expires_at - now).as_secs();
                return Ok((cached.access_token.clone(), remaining));
            }
        }

        tracing::info!("Fetching new APS access token");
        let fresh = self.fetch_token().await?;
        let remaining = fresh
            .expires_at
            .saturating_duration_since(Instant::now())
            .as_secs();
        let token = fresh.access_token.clone();
        *state = Some(fresh);
        Ok((token, remaining))
    }

    async fn fetch_token(&self) -> Result<CachedToken, ApiError> {
        let resp = self
            .http
            .post(format!("{}/authentication/v2/token", self.base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", TOKEN_SCOPE),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Auth(format!("token request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Auth(format!("token response parse failed: {e}")))?;

        tracing::info!(expires_in = body.expires_in, "Obtained APS access token");

        // Treat the token as expired a little early so callers never hold
        // one the platform is about to reject.
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(self.refresh_lead);
        Ok(CachedToken {
            access_token: body.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}
