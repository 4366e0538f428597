// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image-generation client for AI-rendered viewport snapshots.
//!
//! Forwards a captured viewport image to the Stability image-to-image
//! endpoint with a fixed parameter set tuned to keep the building geometry
//! recognizable, and hands back the rendered PNG as a data URL.

use crate::error::ApiError;
use base64::Engine;
use serde::Deserialize;

const RENDER_MODEL_PATH: &str =
    "/v1/generation/stable-diffusion-xl-1024-v1-0/image-to-image";
/// Fraction of the init image preserved; keeps the composition intact.
const IMAGE_STRENGTH: &str = "0.35";

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    base64: String,
}

/// Client for the image-generation API. Without an API key every render
/// request fails fast.
pub struct RenderClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RenderClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one image-to-image generation. `image` is a base64 payload,
    /// optionally wrapped in a data URL.
    pub async fn render(&self, image: &str, prompt: &str) -> Result<String, ApiError> {
        let api_key = self.api_key.as_ref().ok_or(ApiError::RenderUnavailable)?;

        let image_bytes = decode_image(image)?;
        tracing::info!(
            image_bytes = image_bytes.len(),
            prompt = prompt,
            "Starting AI rendering"
        );

        let part = reqwest::multipart::Part::bytes(image_bytes)
            .file_name("input.png")
            .mime_str("image/png")
            .map_err(|e| ApiError::Internal(format!("multipart error: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("init_image", part)
            .text("init_image_mode", "IMAGE_STRENGTH")
            .text("image_strength", IMAGE_STRENGTH)
            .text("text_prompts[0][text]", prompt.to_string())
            .text("text_prompts[0][weight]", "1")
            .text("cfg_scale", "7")
            .text("samples", "1")
            .text("steps", "30");

        let resp = self
            .http
            .post(format!("{}{}", self.base_url, RENDER_MODEL_PATH))
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Upstream { status, message });
        }

        let body: GenerationResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("render response parse failed: {e}")))?;

        let artifact = body
            .artifacts
            .first()
            .ok_or_else(|| ApiError::Internal("No image generated".into()))?;

        tracing::info!("AI rendering completed");
        Ok(format!("data:image/png;base64,{}", artifact.base64))
    }
}

/// Strip an optional `data:image/...;base64,` prefix and decode.
fn decode_image(image: &str) -> Result<Vec<u8>, ApiError> {
    let payload = match image.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:image/") => rest,
        _ => image,
    };
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ApiError::InvalidImage(e.to_string()))
}
