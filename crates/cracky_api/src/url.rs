/// Default base URL for the shop API.
pub const DEFAULT_CHAT_BASE_URL: &str = "http://localhost:8000/api";

/// Normalize a base URL to the chat endpoint.
///
/// Normalization rules:
/// 1) keep `/chat/` unchanged
/// 2) restore the trailing slash when the path ends in `/chat`
/// 3) append `/chat/` otherwise
pub fn normalize_chat_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_CHAT_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/chat") {
        return format!("{trimmed}/");
    }
    format!("{trimmed}/chat/")
}
