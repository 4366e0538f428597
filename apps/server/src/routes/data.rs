// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data Management passthrough endpoints (hubs, projects, folders, items).
//!
//! Upstream JSON goes back to the client verbatim; upstream failures keep
//! their status code via [`ApiError::Upstream`].

use crate::error::ApiError;
use crate::types::{TopFoldersQuery, VersionsQuery};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

/// GET /api/hubs - List hubs (BIM 360 / ACC accounts).
pub async fn hubs(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let body = state.aps.hubs().await?;
    tracing::debug!(count = data_len(&body), "Fetched hubs");
    Ok(Json(body))
}

/// GET /api/hubs/:hubId/projects - Projects in a hub.
pub async fn projects(
    State(state): State<AppState>,
    Path(hub_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let body = state.aps.projects(&hub_id).await?;
    tracing::debug!(hub_id = %hub_id, count = data_len(&body), "Fetched projects");
    Ok(Json(body))
}

/// GET /api/projects/:projectId/topFolders?hubId= - Top-level folders.
pub async fn top_folders(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<TopFoldersQuery>,
) -> Result<Json<Value>, ApiError> {
    let body = state.aps.top_folders(&query.hub_id, &project_id).await?;
    tracing::debug!(project_id = %project_id, count = data_len(&body), "Fetched top folders");
    Ok(Json(body))
}

/// GET /api/projects/:projectId/folders/:folderId/contents
pub async fn folder_contents(
    State(state): State<AppState>,
    Path((project_id, folder_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let body = state.aps.folder_contents(&project_id, &folder_id).await?;
    tracing::debug!(folder_id = %folder_id, count = data_len(&body), "Fetched folder contents");
    Ok(Json(body))
}

/// GET /api/items/:itemId/versions?projectId=
pub async fn item_versions(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(query): Query<VersionsQuery>,
) -> Result<Json<Value>, ApiError> {
    let body = state.aps.item_versions(&query.project_id, &item_id).await?;
    Ok(Json(body))
}

fn data_len(body: &Value) -> usize {
    body.get("data").and_then(Value::as_array).map_or(0, Vec::len)
}
