use std::collections::BTreeMap;

use crate::config::CrackyApiConfig;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_USER_AGENT: &str = "user-agent";

/// Build a deterministic header map for chat requests.
///
/// `bearer_token` overrides the configured credential; an absent or blank
/// credential simply omits `Authorization`, leaving the backend to answer
/// with `401` for protected operations.
pub fn build_headers(
    config: &CrackyApiConfig,
    bearer_token: Option<&str>,
) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();

    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    let token = match (bearer_token, config.bearer_token.as_deref()) {
        (Some(explicit), _) => Some(explicit),
        (None, configured) => configured,
    };
    if let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) {
        headers.insert(HEADER_AUTHORIZATION.to_owned(), format!("Bearer {token}"));
    }

    if let Some(user_agent) = config
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        headers.insert(HEADER_USER_AGENT.to_owned(), user_agent.to_owned());
    }

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    headers
}
