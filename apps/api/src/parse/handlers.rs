use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::parse::{parse_document, UploadedDocument};
use crate::state::AppState;

/// Multipart field name the upload must arrive under.
pub const UPLOAD_FIELD: &str = "resume";

/// POST /parse
///
/// Accepts exactly one file under the `resume` multipart field, runs the
/// intake pipeline, and responds with the normalized candidate record.
/// The upload is buffered fully in memory; nothing is staged on disk.
pub async fn handle_parse(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut upload: Option<UploadedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let media_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        tracing::debug!(media_type = %media_type, bytes = bytes.len(), "Resume upload received");

        upload = Some(UploadedDocument { bytes, media_type });
        break;
    }

    let doc = upload.ok_or(AppError::NoFile)?;
    let record = parse_document(&doc, state.llm.as_ref(), std::process::id()).await?;

    Ok(Json(record))
}
