// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! APS (Autodesk Platform Services) REST client.
//!
//! Covers the Data Management endpoints the file browser needs and the
//! Model Derivative endpoints behind translation, IFC conversion and
//! derivative download. Upstream JSON is passed through verbatim;
//! upstream failures keep their status code.

use crate::error::ApiError;
use crate::services::auth::TokenCache;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::{json, Value};
use std::sync::Arc;

/// Derivative output requested from the translation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeFormat {
    Svf,
    Ifc,
}

impl DerivativeFormat {
    fn as_str(&self) -> &'static str {
        match self {
            DerivativeFormat::Svf => "svf",
            DerivativeFormat::Ifc => "ifc",
        }
    }
}

/// Thin client over the APS REST APIs.
pub struct ApsClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<TokenCache>,
}

impl ApsClient {
    pub fn new(http: reqwest::Client, base_url: &str, auth: Arc<TokenCache>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// GET a JSON document with bearer auth, passing upstream failures
    /// through with their status code.
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let token = self.auth.access_token().await?;
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .send()
            .await?;
        into_json(resp).await
    }

    /// List hubs (BIM 360 / ACC accounts).
    pub async fn hubs(&self) -> Result<Value, ApiError> {
        self.get_json("/project/v1/hubs").await
    }

    /// List projects in a hub.
    pub async fn projects(&self, hub_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/project/v1/hubs/{}/projects", encode(hub_id)))
            .await
    }

    /// Top-level folders of a project.
    pub async fn top_folders(&self, hub_id: &str, project_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!(
            "/project/v1/hubs/{}/projects/{}/topFolders",
            encode(hub_id),
            encode(project_id)
        ))
        .await
    }

    /// Contents of a folder.
    pub async fn folder_contents(
        &self,
        project_id: &str,
        folder_id: &str,
    ) -> Result<Value, ApiError> {
        self.get_json(&format!(
            "/data/v1/projects/{}/folders/{}/contents",
            encode(project_id),
            encode(folder_id)
        ))
        .await
    }

    /// Versions of an item.
    pub async fn item_versions(&self, project_id: &str, item_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!(
            "/data/v1/projects/{}/items/{}/versions",
            encode(project_id),
            encode(item_id)
        ))
        .await
    }

    /// Start a translation job for a stored design file.
    pub async fn start_translation(
        &self,
        urn: &str,
        format: DerivativeFormat,
    ) -> Result<Value, ApiError> {
        let token = self.auth.access_token().await?;
        let job = json!({
            "input": { "urn": urn },
            "output": {
                "formats": [{
                    "type": format.as_str(),
                    "views": ["2d", "3d"],
                }],
            },
        });

        let resp = self
            .http
            .post(format!(
                "{}/modelderivative/v2/designdata/job",
                self.base_url
            ))
            .bearer_auth(token)
            // Force a new translation even when one already exists.
            .header("x-ads-force", "true")
            .json(&job)
            .send()
            .await?;

        tracing::info!(urn = urn, format = format.as_str(), "Translation job requested");
        into_json(resp).await
    }

    /// Translation manifest for a design.
    pub async fn manifest(&self, urn: &str) -> Result<Value, ApiError> {
        self.get_json(&format!(
            "/modelderivative/v2/designdata/{}/manifest",
            encode(urn)
        ))
        .await
    }

    /// Stream a derivative file (e.g. the produced IFC).
    pub async fn download_derivative(
        &self,
        urn: &str,
        derivative_urn: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let token = self.auth.access_token().await?;
        let resp = self
            .http
            .get(format!(
                "{}/modelderivative/v2/designdata/{}/manifest/{}",
                self.base_url,
                encode(urn),
                encode(derivative_urn)
            ))
            .bearer_auth(token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(upstream_error(resp).await);
        }
        Ok(resp)
    }
}

/// Percent-encode a path segment (URNs contain `:` and `/`).
fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string()
}

async fn into_json(resp: reqwest::Response) -> Result<Value, ApiError> {
    if !resp.status().is_success() {
        return Err(upstream_error(resp).await);
    }
    resp.json().await.map_err(ApiError::from)
}

/// Build a passthrough error from an upstream failure, preferring the
/// `detail`/`diagnostic` fields APS uses.
async fn upstream_error(resp: reqwest::Response) -> ApiError {
    let status = resp.status();
    let message = match resp.json::<Value>().await {
        Ok(body) => body
            .get("detail")
            .or_else(|| body.get("diagnostic"))
            .or_else(|| body.get("developerMessage"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(e) => e.to_string(),
    };
    ApiError::Upstream { status, message }
}

/// Interpreted IFC conversion state derived from a manifest.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IfcConversionState {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    pub message: String,
}

/// Walk a Model Derivative manifest and work out where the IFC conversion
/// stands: still queued, in progress, failed, or complete with a
/// downloadable resource.
pub fn interpret_ifc_manifest(urn: &str, manifest: &Value) -> IfcConversionState {
    let empty = Vec::new();
    let derivatives = manifest
        .get("derivatives")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    let ifc_derivative = derivatives.iter().find(|d| {
        d.get("outputType").and_then(Value::as_str) == Some("ifc")
            || children(d).iter().any(|c| is_ifc_resource(c))
    });

    let Some(derivative) = ifc_derivative else {
        return IfcConversionState {
            status: "pending".into(),
            progress: None,
            download_url: None,
            message: "IFC conversion not found in manifest. It may still be queued.".into(),
        };
    };

    let status = derivative
        .get("status")
        .or_else(|| manifest.get("status"))
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    match status {
        "success" | "complete" => {
            let ifc_file = children(derivative)
                .iter()
                .find(|c| is_ifc_resource(c))
                .and_then(|c| c.get("urn"))
                .and_then(Value::as_str);

            match ifc_file {
                Some(derivative_urn) => IfcConversionState {
                    status: "success".into(),
                    progress: None,
                    download_url: Some(format!(
                        "/api/modelderivative/download/{}/{}",
                        encode(urn),
                        encode(derivative_urn)
                    )),
                    message: "IFC conversion completed successfully".into(),
                },
                None => IfcConversionState {
                    status: "complete".into(),
                    progress: None,
                    download_url: None,
                    message: "IFC conversion completed but download URL not available".into(),
                },
            }
        }
        "inprogress" | "pending" => {
            let progress = derivative
                .get("progress")
                .or_else(|| manifest.get("progress"))
                .and_then(Value::as_str)
                .unwrap_or("0%");
            IfcConversionState {
                status: "inprogress".into(),
                progress: Some(progress.to_string()),
                download_url: None,
                message: format!("IFC conversion in progress: {progress}"),
            }
        }
        "failed" => {
            let messages: Vec<String> = derivatives
                .iter()
                .flat_map(|d| {
                    d.get("messages")
                        .and_then(Value::as_array)
                        .cloned()
                        .unwrap_or_default()
                })
                .filter_map(|m| {
                    m.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .or_else(|| m.as_str().map(str::to_string))
                })
                .collect();
            let message = if messages.is_empty() {
                "Conversion failed".to_string()
            } else {
                messages.join("; ")
            };
            IfcConversionState {
                status: "failed".into(),
                progress: None,
                download_url: None,
                message,
            }
        }
        "timeout" => IfcConversionState {
            status: "timeout".into(),
            progress: None,
            download_url: None,
            message: "IFC conversion timed out".into(),
        },
        other => IfcConversionState {
            status: other.to_string(),
            progress: None,
            download_url: None,
            message: format!("Unknown conversion status: {other}"),
        },
    }
}

fn children(derivative: &Value) -> Vec<&Value> {
    derivative
        .get("children")
        .and_then(Value::as_array)
        .map(|c| c.iter().collect())
        .unwrap_or_default()
}

fn is_ifc_resource(child: &Value) -> bool {
    child.get("type").and_then(Value::as_str) == Some("resource")
        && (child.get("role").and_then(Value::as_str) == Some("ifc")
            || child.get("mime").and_then(Value::as_str) == Some("application/ifc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_derivative_reads_as_pending() {
        let state = interpret_ifc_manifest("urn-a", &json!({ "derivatives": [] }));
        assert_eq!(state.status, "pending");
        assert!(state.download_url.is_none());
    }

    #[test]
    fn success_builds_download_path() {
        let manifest = json!({
            "status": "success",
            "derivatives": [{
                "outputType": "ifc",
                "status": "success",
                "children": [{
                    "type": "resource",
                    "role": "ifc",
                    "urn": "urn:adsk.viewing:fs.file:abc/output.ifc",
                }],
            }],
        });
        let state = interpret_ifc_manifest("urn-a", &manifest);
        assert_eq!(state.status, "success");
        let url = state.download_url.unwrap();
        assert!(url.starts_with("/api/modelderivative/download/urn%2Da/"));
        assert!(!url.contains("output.ifc/"));
    }

    #[test]
    fn success_without_resource_is_complete() {
        let manifest = json!({
            "derivatives": [{ "outputType": "ifc", "status": "success" }],
        });
        let state = interpret_ifc_manifest("urn-a", &manifest);
        assert_eq!(state.status, "complete");
        assert!(state.download_url.is_none());
    }

    #[test]
    fn in_progress_reports_progress() {
        let manifest = json!({
            "progress": "42% complete",
            "derivatives": [{ "outputType": "ifc", "status": "inprogress" }],
        });
        let state = interpret_ifc_manifest("urn-a", &manifest);
        assert_eq!(state.status, "inprogress");
        assert_eq!(state.progress.as_deref(), Some("42% complete"));
    }

    #[test]
    fn failure_joins_diagnostic_messages() {
        let manifest = json!({
            "derivatives": [{
                "outputType": "ifc",
                "status": "failed",
                "messages": [
                    { "message": "Unsupported element" },
                    { "message": "Export aborted" },
                ],
            }],
        });
        let state = interpret_ifc_manifest("urn-a", &manifest);
        assert_eq!(state.status, "failed");
        assert_eq!(state.message, "Unsupported element; Export aborted");
    }

    #[test]
    fn derivative_found_by_child_role() {
        let manifest = json!({
            "status": "inprogress",
            "derivatives": [{
                "outputType": "svf",
                "children": [{ "type": "resource", "role": "ifc" }],
            }],
        });
        let state = interpret_ifc_manifest("urn-a", &manifest);
        assert_eq!(state.status, "inprogress");
    }
}
