// Intake pipeline prompt templates.

/// Delimiter wrapping the resume text block inside the prompt.
const TEXT_DELIMITER: &str = "\"\"\"";

/// Resume parsing prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"You are a resume parsing assistant. Extract the candidate information from the resume text that follows.
Return ONLY valid JSON. No comments or explanation.

Resume:
"""
{resume_text}
""""#;

/// Builds the completion prompt for one extracted resume.
/// Pure: identical text always yields the identical prompt string.
pub fn build_prompt(text: &str) -> String {
    RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", &neutralize_delimiters(text))
}

/// Replaces occurrences of the wrapping delimiter inside the resume text so a
/// document that itself contains `"""` cannot close the block early.
fn neutralize_delimiters(text: &str) -> String {
    text.replace(TEXT_DELIMITER, "'''")
}
