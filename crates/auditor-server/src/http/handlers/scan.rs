//! `POST /api/scan/start`

use std::sync::Arc;

use auditor_core::RepoName;
use auditor_core::ScanResult;
use auditor_core::ScanTarget;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::http::ApiError;
use crate::http::AppState;

/// Optional request body. An empty body scans the whole extraction root.
#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    /// Repository handle returned by the upload endpoint.
    #[serde(default)]
    pub repository: Option<String>,
}

/// Success body of a scan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// Fixed acknowledgment text.
    pub message: &'static str,

    /// File count and issue estimate.
    pub static_analysis: ScanResult,

    /// Document produced by the refactor advisor, passed through unchanged.
    pub ai_suggestions: Value,
}

/// Runs static analysis, then asks the advisor for suggestions.
#[tracing::instrument(skip(state, body))]
pub async fn start_scan(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ScanResponse>, ApiError> {
    let request = parse_request(&body)?;
    let target = match request.repository {
        Some(name) => ScanTarget::Repository(RepoName::new(name).map_err(ApiError::Scan)?),
        None => ScanTarget::ExtractionRoot,
    };

    let aggregator = state.aggregator.clone();
    let static_analysis = tokio::task::spawn_blocking(move || aggregator.run_static_analysis(&target))
        .await
        .map_err(ApiError::Task)?
        .map_err(ApiError::Scan)?;

    let ai_suggestions = state
        .advisor
        .suggest(&static_analysis)
        .await
        .map_err(ApiError::Scan)?;

    Ok(Json(ScanResponse {
        message: "Scan complete",
        static_analysis,
        ai_suggestions,
    }))
}

fn parse_request(body: &[u8]) -> Result<ScanRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ScanRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| ApiError::InvalidBody(format!("Invalid scan request: {err}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_scans_root() {
        assert!(parse_request(b"").unwrap().repository.is_none());
        assert!(parse_request(b"  \n").unwrap().repository.is_none());
        assert!(parse_request(b"{}").unwrap().repository.is_none());
    }

    #[test]
    fn test_repository_body() {
        let request = parse_request(br#"{"repository":"sample"}"#).unwrap();
        assert_eq!(request.repository.as_deref(), Some("sample"));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            parse_request(b"{not json"),
            Err(ApiError::InvalidBody(_))
        ));
    }
}
