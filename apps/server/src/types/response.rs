// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API endpoints.

use crate::services::StoredRecord;
use serde::Serialize;

/// `GET /api/token` response consumed by the viewer SDK.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Acknowledgement for schedule record writes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveScheduleResponse {
    pub success: bool,
    pub record_id: String,
    pub message: &'static str,
}

/// One stored schedule record.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub data: StoredRecord,
}

/// All stored schedule records.
#[derive(Debug, Serialize)]
pub struct ScheduleListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<StoredRecord>,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Acknowledgement for conversion job submissions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStartedResponse {
    pub success: bool,
    pub job_id: String,
    pub message: &'static str,
}

/// `POST /api/ai/render` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub success: bool,
    pub rendered_image: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    #[serde(rename = "hasCredentials")]
    pub has_credentials: bool,
    #[serde(rename = "hasAIKey")]
    pub has_ai_key: bool,
    #[serde(rename = "database4DCount")]
    pub database_4d_count: usize,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}
