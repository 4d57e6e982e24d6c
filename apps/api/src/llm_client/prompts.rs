// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds cross-cutting fragments.

/// System message sent with every completion request.
pub const JSON_ONLY_SYSTEM: &str = "You output only JSON.";
