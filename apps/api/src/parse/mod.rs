// Resume intake pipeline: multipart upload -> text extraction -> prompt ->
// completion -> normalized candidate record.
// All LLM calls go through llm_client — no direct completion-API calls here.

pub mod extract;
pub mod handlers;
pub mod normalize;
pub mod prompts;

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::CompletionApi;

/// One uploaded document, held fully in memory for the life of the request.
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub media_type: String,
}

/// Runs the pipeline for a single upload. Strictly sequential; the first
/// failing stage aborts the request and surfaces at the handler boundary.
pub async fn parse_document(
    doc: &UploadedDocument,
    llm: &dyn CompletionApi,
    worker_pid: u32,
) -> Result<serde_json::Value, AppError> {
    let text = extract::extract_text(&doc.bytes, &doc.media_type)?;
    debug!(chars = text.len(), "Extracted resume text");

    let prompt = prompts::build_prompt(&text);
    let raw = llm.complete(&prompt).await?;
    let record = normalize::normalize(&raw, &text, worker_pid)?;

    Ok(record)
}
