// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule record ("4D properties") endpoints over the repository.

use crate::error::ApiError;
use crate::services::StoredRecord;
use crate::types::{
    MessageResponse, SaveScheduleRequest, ScheduleListResponse, ScheduleResponse,
    SaveScheduleResponse,
};
use crate::AppState;
use acc_4d_core::DbId;
use axum::{
    extract::{Path, State},
    Json,
};

/// POST /api/4d/properties - Save schedule properties for an element.
/// Overwrites any prior record for the same element.
pub async fn save(
    State(state): State<AppState>,
    Json(request): Json<SaveScheduleRequest>,
) -> Result<Json<SaveScheduleResponse>, ApiError> {
    let element_id = request.element_id.ok_or(ApiError::MissingField("elementId"))?;
    let mut record = request
        .properties
        .ok_or(ApiError::MissingField("properties"))?;

    // The path of record is the request's element id, whatever the payload
    // carried.
    record.element_id = element_id;

    let stored = StoredRecord::new(record);
    let record_id = stored.record_id.clone();
    state.store.save(stored).await?;

    tracing::info!(element_id = element_id, record_id = %record_id, "Saved 4D properties");

    Ok(Json(SaveScheduleResponse {
        success: true,
        record_id,
        message: "Properties saved successfully",
    }))
}

/// GET /api/4d/properties/:elementId
pub async fn get(
    State(state): State<AppState>,
    Path(element_id): Path<DbId>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let record = state
        .store
        .get(element_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No properties found for this element".into()))?;

    Ok(Json(ScheduleResponse {
        success: true,
        data: record,
    }))
}

/// GET /api/4d/project/:projectId/properties - All stored records. The
/// project id is accepted for URL compatibility but records are not
/// partitioned by project.
pub async fn list(
    State(state): State<AppState>,
    Path(_project_id): Path<String>,
) -> Result<Json<ScheduleListResponse>, ApiError> {
    let records = state.store.list().await?;
    Ok(Json(ScheduleListResponse {
        success: true,
        count: records.len(),
        data: records,
    }))
}

/// DELETE /api/4d/properties/:elementId
pub async fn delete(
    State(state): State<AppState>,
    Path(element_id): Path<DbId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state.store.delete(element_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(
            "No properties found for this element".into(),
        ));
    }

    tracing::info!(element_id = element_id, "Deleted 4D properties");
    Ok(Json(MessageResponse {
        success: true,
        message: "Properties deleted successfully",
    }))
}
