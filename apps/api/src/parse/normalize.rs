//! Response normalization: fence stripping, JSON parsing, and the
//! `raw_text_snippet` / `worker_pid` bookkeeping fields.

use serde_json::Value;
use thiserror::Error;

/// Length bound for the `raw_text_snippet` bookkeeping field, in characters.
pub const SNIPPET_MAX_CHARS: usize = 400;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The completion service replied, but the cleaned text is not valid
    /// JSON. `raw` holds the post-stripping text for diagnostic surfacing.
    #[error("Invalid JSON returned")]
    InvalidJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl NormalizeError {
    pub fn raw(&self) -> &str {
        match self {
            NormalizeError::InvalidJson { raw, .. } => raw,
        }
    }
}

/// Strips code-fence markers from the raw completion text, parses it as JSON,
/// and fills the bookkeeping fields when the model did not supply them.
/// Fields already present in the model output are never overwritten.
pub fn normalize(raw: &str, source_text: &str, worker_pid: u32) -> Result<Value, NormalizeError> {
    let cleaned = strip_fences(raw);

    let mut parsed: Value = serde_json::from_str(&cleaned).map_err(|source| {
        NormalizeError::InvalidJson {
            raw: cleaned.clone(),
            source,
        }
    })?;

    if let Some(record) = parsed.as_object_mut() {
        record
            .entry("raw_text_snippet")
            .or_insert_with(|| Value::String(snippet(source_text)));
        record
            .entry("worker_pid")
            .or_insert_with(|| Value::from(worker_pid));
    }

    Ok(parsed)
}

/// Removes every occurrence of the opening and closing fence markers, then
/// trims surrounding whitespace. Idempotent on already-clean text.
pub fn strip_fences(text: &str) -> String {
    text.replace(FENCE_OPEN, "")
        .replace(FENCE_CLOSE, "")
        .trim()
        .to_string()
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_fences_removes_json_fence_block() {
        let input = "```json\n{\"name\": \"Bob\"}\n```";
        assert_eq!(strip_fences(input), "{\"name\": \"Bob\"}");
    }

    #[test]
    fn test_strip_fences_removes_bare_fences() {
        let input = "```\n{\"name\": \"Bob\"}\n```";
        assert_eq!(strip_fences(input), "{\"name\": \"Bob\"}");
    }

    #[test]
    fn test_strip_fences_is_idempotent_on_clean_text() {
        let clean = "{\"name\": \"Bob\"}";
        assert_eq!(strip_fences(clean), clean);
        assert_eq!(strip_fences(&strip_fences(clean)), clean);
    }

    #[test]
    fn test_strip_fences_removes_every_occurrence() {
        let input = "```json\n{\"a\": 1}\n```\n```json\n\n```";
        assert_eq!(strip_fences(input), "{\"a\": 1}");
    }

    #[test]
    fn test_normalize_fills_snippet_when_absent() {
        let record = normalize(r#"{"name":"Jane"}"#, "Jane Doe, Software Engineer", 42).unwrap();
        assert_eq!(record["name"], "Jane");
        assert_eq!(record["raw_text_snippet"], "Jane Doe, Software Engineer");
        assert_eq!(record["worker_pid"], 42);
    }

    #[test]
    fn test_normalize_truncates_snippet_to_bound() {
        let source = "x".repeat(1000);
        let record = normalize(r#"{}"#, &source, 1).unwrap();
        let snippet = record["raw_text_snippet"].as_str().unwrap();
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS);
    }

    #[test]
    fn test_normalize_snippet_is_char_boundary_safe() {
        // Multibyte characters: byte-indexed truncation would panic or split.
        let source = "é".repeat(SNIPPET_MAX_CHARS + 100);
        let record = normalize(r#"{}"#, &source, 1).unwrap();
        let snippet = record["raw_text_snippet"].as_str().unwrap();
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS);
    }

    #[test]
    fn test_normalize_preserves_model_supplied_snippet() {
        let record = normalize(
            r#"{"raw_text_snippet": "model's own snippet"}"#,
            "source text",
            1,
        )
        .unwrap();
        assert_eq!(record["raw_text_snippet"], "model's own snippet");
    }

    #[test]
    fn test_normalize_preserves_model_supplied_worker_pid() {
        let record = normalize(r#"{"worker_pid": 99}"#, "source", 1).unwrap();
        assert_eq!(record["worker_pid"], 99);
    }

    #[test]
    fn test_normalize_rejects_non_json_with_raw_payload() {
        let err = normalize("I am not JSON at all", "source", 1).unwrap_err();
        assert_eq!(err.raw(), "I am not JSON at all");
        assert_eq!(err.to_string(), "Invalid JSON returned");
    }

    #[test]
    fn test_normalize_failure_carries_post_stripping_text() {
        let err = normalize("```json\nnearly { json\n```", "source", 1).unwrap_err();
        assert_eq!(err.raw(), "nearly { json");
    }

    #[test]
    fn test_normalize_parses_fenced_completion() {
        let record = normalize("```json\n{\"name\":\"Bob\"}\n```", "Bob's resume", 7).unwrap();
        assert_eq!(record, json!({
            "name": "Bob",
            "raw_text_snippet": "Bob's resume",
            "worker_pid": 7
        }));
    }

    #[test]
    fn test_normalize_leaves_non_object_json_unaugmented() {
        // Top-level arrays have nowhere to hang bookkeeping fields; they pass
        // through as the service returned them.
        let record = normalize(r#"[{"name":"Jane"}]"#, "source", 1).unwrap();
        assert_eq!(record, json!([{"name": "Jane"}]));
    }
}
