// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API endpoints.

use acc_4d_core::{DbId, ScheduleRecord};
use serde::Deserialize;

/// Body of the translation endpoints.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub urn: Option<String>,
}

/// Body of `POST /api/4d/properties`. Both fields are validated by the
/// handler so missing input reads as a 400 rather than a decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveScheduleRequest {
    pub element_id: Option<DbId>,
    pub properties: Option<ScheduleRecord>,
}

/// Query string of the top-folders endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopFoldersQuery {
    pub hub_id: String,
}

/// Query string of the item-versions endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionsQuery {
    pub project_id: String,
}

/// Body of `POST /api/ai/render`.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub image: Option<String>,
    pub prompt: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}
