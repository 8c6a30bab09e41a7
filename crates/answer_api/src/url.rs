/// Default base URL for the answering service.
pub const DEFAULT_ANSWER_BASE_URL: &str = "http://127.0.0.1:5000";

/// Normalize a base URL to the answering service chat endpoint.
///
/// Normalization rules:
/// 1) blank input falls back to the default base URL
/// 2) keep a `/chat` suffix unchanged
/// 3) append `/chat` otherwise
#[must_use]
pub fn normalize_chat_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_ANSWER_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/chat") {
        return trimmed.to_string();
    }
    format!("{trimmed}/chat")
}
