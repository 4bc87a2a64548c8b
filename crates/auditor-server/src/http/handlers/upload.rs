//! `POST /api/repo/upload`

use std::io::Write;
use std::sync::Arc;

use auditor_core::ExtractedRepository;
use auditor_core::Extractor;
use auditor_core::RepoName;
use axum::Json;
use axum::body::Bytes;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartRejection;
use axum::extract::State;
use serde::Serialize;

use crate::http::ApiError;
use crate::http::AppState;

/// Multipart field that carries the archive.
pub const UPLOAD_FIELD: &str = "repo";

/// Success body of an upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Fixed acknowledgment text.
    pub message: &'static str,

    /// Handle to pass to the scan endpoint.
    pub repository: RepoName,

    /// Number of files written.
    pub files_extracted: usize,
}

struct Upload {
    file_name: Option<String>,
    data: Bytes,
}

/// Accepts a single archive in field `repo` and extracts it under the root.
///
/// A request that is not `multipart/form-data` carries no file and is
/// answered like a form without the `repo` field.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_repo(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "request is not a multipart form");
        ApiError::MissingUpload
    })?;
    let upload = read_upload(multipart).await?;
    let name = RepoName::from_upload(upload.file_name.as_deref());

    tracing::info!(
        repository = %name,
        file_name = upload.file_name.as_deref().unwrap_or("<none>"),
        bytes = upload.data.len(),
        "received upload"
    );

    let extractor = state.extractor.clone();
    let repo = tokio::task::spawn_blocking(move || stage_and_extract(&extractor, &upload.data, &name))
        .await
        .map_err(ApiError::Task)?
        .map_err(ApiError::Upload)?;

    Ok(Json(UploadResponse {
        message: "Repository uploaded and extracted!",
        repository: repo.name,
        files_extracted: repo.report.files_extracted,
    }))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(ApiError::Multipart)? {
        if field.name() != Some(UPLOAD_FIELD) {
            tracing::debug!(field = ?field.name(), "ignoring multipart field");
            continue;
        }
        if upload.is_some() {
            return Err(ApiError::DuplicateUpload);
        }

        let file_name = field.file_name().map(str::to_owned);
        let data = field.bytes().await.map_err(ApiError::Multipart)?;
        upload = Some(Upload { file_name, data });
    }

    upload.ok_or(ApiError::MissingUpload)
}

/// Writes the upload to a temporary file outside the extraction root and
/// extracts it. The temporary file is removed when this returns.
fn stage_and_extract(
    extractor: &Extractor,
    data: &[u8],
    name: &RepoName,
) -> auditor_core::Result<ExtractedRepository> {
    let mut staged = tempfile::Builder::new()
        .prefix("auditor-upload-")
        .suffix(".zip")
        .tempfile()?;
    staged.write_all(data)?;
    staged.flush()?;

    extractor.extract(staged.path(), name)
}
