// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! AI rendering endpoint.

use crate::error::ApiError;
use crate::types::{RenderRequest, RenderResponse};
use crate::AppState;
use axum::{extract::State, Json};

/// POST /api/ai/render - Turn a viewport snapshot into a photorealistic
/// rendering via the image-generation API.
pub async fn render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let image = request.image.ok_or(ApiError::MissingField("image"))?;
    let prompt = request.prompt.ok_or(ApiError::MissingField("prompt"))?;

    if let Some(style) = &request.style {
        tracing::debug!(style = %style, "Render style requested");
    }

    let rendered_image = state.render.render(&image, &prompt).await?;
    Ok(Json(RenderResponse {
        success: true,
        rendered_image,
    }))
}
