// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model Derivative endpoints: translation, IFC conversion, download.

use crate::error::ApiError;
use crate::services::{interpret_ifc_manifest, DerivativeFormat};
use crate::types::{ConversionStartedResponse, TranslateRequest};
use crate::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
    Json,
};
use serde_json::Value;

/// POST /api/modelderivative/translate - Start an SVF translation job.
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<Value>, ApiError> {
    let urn = request.urn.ok_or(ApiError::MissingField("urn"))?;
    let body = state
        .aps
        .start_translation(&urn, DerivativeFormat::Svf)
        .await?;
    Ok(Json(body))
}

/// GET /api/modelderivative/:urn/manifest - Translation manifest/status.
pub async fn manifest(
    State(state): State<AppState>,
    Path(urn): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let body = state.aps.manifest(&urn).await?;
    Ok(Json(body))
}

/// POST /api/modelderivative/convert-to-ifc - Start an IFC conversion job.
pub async fn convert_to_ifc(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<ConversionStartedResponse>, ApiError> {
    let urn = request.urn.ok_or(ApiError::MissingField("urn"))?;

    let body = state
        .aps
        .start_translation(&urn, DerivativeFormat::Ifc)
        .await
        .map_err(friendly_ifc_error)?;

    let job_id = body
        .get("urn")
        .and_then(Value::as_str)
        .unwrap_or(&urn)
        .to_string();

    Ok(Json(ConversionStartedResponse {
        success: true,
        job_id,
        message: "IFC conversion job started successfully",
    }))
}

/// Rewrite unsupported-format upstream messages into something a user can
/// act on; everything else passes through untouched.
fn friendly_ifc_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Upstream { status, message }
            if message.contains("not supported") || message.contains("unsupported") =>
        {
            ApiError::Upstream {
                status,
                message: "IFC export is not supported for this file type. Only certain \
                          Revit and other CAD formats can be exported to IFC."
                    .to_string(),
            }
        }
        other => other,
    }
}

/// GET /api/modelderivative/:urn/ifc-status - Conversion progress and, once
/// complete, the download URL.
pub async fn ifc_status(
    State(state): State<AppState>,
    Path(urn): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let manifest = state.aps.manifest(&urn).await?;
    let conversion = interpret_ifc_manifest(&urn, &manifest);
    tracing::debug!(urn = %urn, status = %conversion.status, "IFC status checked");
    Ok(Json(serde_json::to_value(conversion)?))
}

/// GET /api/modelderivative/download/:urn/:derivativeUrn - Stream the
/// derivative file through to the client.
pub async fn download(
    State(state): State<AppState>,
    Path((urn, derivative_urn)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    tracing::info!(derivative_urn = %derivative_urn, "Downloading derivative");
    let upstream = state.aps.download_derivative(&urn, &derivative_urn).await?;

    let stream = upstream.bytes_stream();
    Response::builder()
        .header(header::CONTENT_TYPE, "application/ifc")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"model.ifc\"",
        )
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
