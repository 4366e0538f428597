// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check and API information endpoints.

use crate::error::ApiError;
use crate::types::{ApiInfoResponse, EndpointInfo, HealthResponse};
use crate::AppState;
use axum::{extract::State, Json};

/// GET /health - Health check endpoint.
pub async fn check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        has_credentials: state.config.has_credentials(),
        has_ai_key: state.render.is_configured(),
        database_4d_count: state.store.count().await?,
    }))
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "acc-4d-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "OAuth token and Model Derivative proxy for the ACC-4D viewer",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/token",
                description: "Viewer access token",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/hubs",
                description: "List hubs",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/hubs/:hubId/projects",
                description: "List projects in a hub",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/projects/:projectId/topFolders",
                description: "Top-level folders of a project",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/projects/:projectId/folders/:folderId/contents",
                description: "Folder contents",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/items/:itemId/versions",
                description: "Item versions",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/modelderivative/translate",
                description: "Start a viewable translation job",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/modelderivative/:urn/manifest",
                description: "Translation manifest",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/modelderivative/convert-to-ifc",
                description: "Start an IFC conversion job",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/modelderivative/:urn/ifc-status",
                description: "IFC conversion status",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/modelderivative/download/:urn/:derivativeUrn",
                description: "Download a derivative file",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/4d/properties",
                description: "Save schedule properties for an element",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/4d/properties/:elementId",
                description: "Schedule properties for an element",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/4d/project/:projectId/properties",
                description: "All stored schedule properties",
            },
            EndpointInfo {
                method: "DELETE",
                path: "/api/4d/properties/:elementId",
                description: "Delete schedule properties for an element",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/ai/render",
                description: "AI-render a viewport snapshot",
            },
            EndpointInfo {
                method: "GET",
                path: "/health",
                description: "Health check",
            },
        ],
    })
}
