// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// APS (Autodesk Platform Services) app client id.
    pub aps_client_id: String,
    /// APS app client secret.
    pub aps_client_secret: String,
    /// Base URL of the APS REST APIs.
    pub aps_base_url: String,
    /// Image-generation API key; AI rendering is disabled without it.
    pub stability_api_key: Option<String>,
    /// Base URL of the image-generation API.
    pub stability_base_url: String,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Seconds before token expiry at which a refresh is forced.
    pub token_refresh_lead_secs: u64,
    /// Maximum request body size in MB (render payloads carry base64 images).
    pub max_body_mb: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".into())
                .parse()
                .unwrap_or(3001),
            aps_client_id: std::env::var("APS_CLIENT_ID").unwrap_or_default(),
            aps_client_secret: std::env::var("APS_CLIENT_SECRET").unwrap_or_default(),
            aps_base_url: std::env::var("APS_BASE_URL")
                .unwrap_or_else(|_| "https://developer.api.autodesk.com".into()),
            stability_api_key: std::env::var("STABILITY_API_KEY").ok().filter(|k| !k.is_empty()),
            stability_base_url: std::env::var("STABILITY_BASE_URL")
                .unwrap_or_else(|_| "https://api.stability.ai".into()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".into())
                .parse()
                .unwrap_or(120),
            token_refresh_lead_secs: std::env::var("TOKEN_REFRESH_LEAD_SECS")
                .unwrap_or_else(|_| "300".into())
                .parse()
                .unwrap_or(300),
            max_body_mb: std::env::var("MAX_BODY_MB")
                .unwrap_or_else(|_| "50".into())
                .parse()
                .unwrap_or(50),
        }
    }

    /// Whether APS credentials are configured.
    pub fn has_credentials(&self) -> bool {
        !self.aps_client_id.is_empty() && !self.aps_client_secret.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
