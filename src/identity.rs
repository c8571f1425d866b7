use std::fmt;

/// Key used when no valid session token is present.
pub const DEFAULT_IDENTITY_KEY: &str = "default";

/// Namespace prefix carried by every shop session token.
pub const TOKEN_NAMESPACE_PREFIX: &str = "demo_token_";

/// Stable string partitioning persisted conversation history per user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey(String);

impl IdentityKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn fallback() -> Self {
        Self(DEFAULT_IDENTITY_KEY.to_string())
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves a session token into the identity key that owns the persisted
/// conversation.
///
/// Tokens have the shape `demo_token_<username>_<userid>`; the username is
/// the key, so two sessions for the same user share one conversation across
/// restarts. Anything unparseable resolves to [`DEFAULT_IDENTITY_KEY`].
/// This is the only place that inspects token internals.
#[must_use]
pub fn resolve_identity(session_token: Option<&str>) -> IdentityKey {
    session_token
        .and_then(identity_name_from_token)
        .map(IdentityKey)
        .unwrap_or_else(IdentityKey::fallback)
}

fn identity_name_from_token(token: &str) -> Option<String> {
    let remainder = token.strip_prefix(TOKEN_NAMESPACE_PREFIX)?;
    let (name, id) = remainder.rsplit_once('_')?;
    if name.is_empty() || id.is_empty() {
        return None;
    }

    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::{resolve_identity, DEFAULT_IDENTITY_KEY};

    #[test]
    fn valid_token_resolves_to_username() {
        assert_eq!(
            resolve_identity(Some("demo_token_alice_1")).as_str(),
            "alice"
        );
    }

    #[test]
    fn same_username_resolves_identically_across_tokens() {
        assert_eq!(
            resolve_identity(Some("demo_token_alice_1")),
            resolve_identity(Some("demo_token_alice_99"))
        );
    }

    #[test]
    fn usernames_may_contain_underscores() {
        assert_eq!(
            resolve_identity(Some("demo_token_red_team_lead_7")).as_str(),
            "red_team_lead"
        );
    }

    #[test]
    fn missing_token_falls_back_to_default_key() {
        assert_eq!(resolve_identity(None).as_str(), DEFAULT_IDENTITY_KEY);
    }

    #[test]
    fn malformed_tokens_fall_back_to_default_key() {
        for token in [
            "",
            "demo_token_",
            "demo_token_alice",
            "demo_token__3",
            "session_alice_1",
            "alice",
        ] {
            assert_eq!(
                resolve_identity(Some(token)).as_str(),
                DEFAULT_IDENTITY_KEY,
                "token {token:?} must fall back"
            );
        }
    }
}
