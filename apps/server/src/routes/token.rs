// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Token endpoint consumed by the viewer SDK.

use crate::error::ApiError;
use crate::types::TokenResponse;
use crate::AppState;
use axum::{extract::State, Json};

/// GET /api/token - Access token plus remaining lifetime.
pub async fn get_token(State(state): State<AppState>) -> Result<Json<TokenResponse>, ApiError> {
    let (access_token, expires_in) = state.auth.token_with_remaining().await?;
    Ok(Json(TokenResponse {
        access_token,
        expires_in,
    }))
}
