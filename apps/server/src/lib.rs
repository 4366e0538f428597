// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ACC-4D Server - OAuth token and Model Derivative proxy.
//!
//! The server sits between the browser viewer and the APS REST APIs:
//!
//! - Two-legged OAuth token issuance with a single-flight cache
//! - Data Management passthrough (hubs, projects, folders, item versions)
//! - Model Derivative jobs: viewable translation, IFC conversion and
//!   derivative download
//! - The 4D schedule record store behind a repository trait
//! - Image-generation proxy for AI-rendered viewport snapshots
//!
//! # Endpoints
//!
//! - `GET /api/token` - Viewer access token
//! - `GET /api/hubs`, `GET /api/hubs/:hubId/projects`,
//!   `GET /api/projects/:projectId/topFolders`,
//!   `GET /api/projects/:projectId/folders/:folderId/contents`,
//!   `GET /api/items/:itemId/versions` - Data Management passthrough
//! - `POST /api/modelderivative/translate`,
//!   `GET /api/modelderivative/:urn/manifest`,
//!   `POST /api/modelderivative/convert-to-ifc`,
//!   `GET /api/modelderivative/:urn/ifc-status`,
//!   `GET /api/modelderivative/download/:urn/:derivativeUrn` - Derivatives
//! - `POST/GET/DELETE /api/4d/properties...` - Schedule record store
//! - `POST /api/ai/render` - AI rendering
//! - `GET /health` - Health check

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod types;

use config::Config;
use services::{ApsClient, MemoryRepository, RenderClient, ScheduleRepository, TokenCache};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<TokenCache>,
    pub aps: Arc<ApsClient>,
    pub render: Arc<RenderClient>,
    pub store: Arc<dyn ScheduleRepository>,
}

impl AppState {
    /// Wire up clients and the in-memory store from configuration.
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let auth = Arc::new(TokenCache::new(http.clone(), &config));
        let aps = Arc::new(ApsClient::new(
            http.clone(),
            &config.aps_base_url,
            auth.clone(),
        ));
        let render = Arc::new(RenderClient::new(
            http,
            &config.stability_base_url,
            config.stability_api_key.clone(),
        ));

        Self {
            config: Arc::new(config),
            auth,
            aps,
            render,
            store: Arc::new(MemoryRepository::new()),
        }
    }
}

/// Build the application router with middleware.
pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let body_limit = state.config.max_body_mb * 1024 * 1024;

    Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/health", get(routes::health::check))
        // Viewer token
        .route("/api/token", get(routes::token::get_token))
        // Data Management passthrough
        .route("/api/hubs", get(routes::data::hubs))
        .route("/api/hubs/:hubId/projects", get(routes::data::projects))
        .route(
            "/api/projects/:projectId/topFolders",
            get(routes::data::top_folders),
        )
        .route(
            "/api/projects/:projectId/folders/:folderId/contents",
            get(routes::data::folder_contents),
        )
        .route(
            "/api/items/:itemId/versions",
            get(routes::data::item_versions),
        )
        // Model Derivative
        .route(
            "/api/modelderivative/translate",
            post(routes::derivative::translate),
        )
        .route(
            "/api/modelderivative/:urn/manifest",
            get(routes::derivative::manifest),
        )
        .route(
            "/api/modelderivative/convert-to-ifc",
            post(routes::derivative::convert_to_ifc),
        )
        .route(
            "/api/modelderivative/:urn/ifc-status",
            get(routes::derivative::ifc_status),
        )
        .route(
            "/api/modelderivative/download/:urn/:derivativeUrn",
            get(routes::derivative::download),
        )
        // 4D schedule record store
        .route("/api/4d/properties", post(routes::fourd::save))
        .route(
            "/api/4d/properties/:elementId",
            get(routes::fourd::get).delete(routes::fourd::delete),
        )
        .route(
            "/api/4d/project/:projectId/properties",
            get(routes::fourd::list),
        )
        // AI rendering
        .route("/api/ai/render", post(routes::render::render))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
