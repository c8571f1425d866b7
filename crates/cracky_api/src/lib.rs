//! HTTP transport for the Red Team Shop assistant chat endpoint.
//!
//! One request shape, one reply shape: `POST <base>/chat/` with
//! `{"message": ...}` and an optional bearer credential, answered by
//! `{"reply": ...}`. A `401` is surfaced as its own error variant so
//! callers can select the authentication fallback text; every other
//! failure collapses into transport/status errors.

mod client;
mod config;
mod error;
mod headers;
mod payload;
mod url;

pub use client::CrackyApiClient;
pub use config::CrackyApiConfig;
pub use error::{parse_error_message, CrackyApiError};
pub use headers::build_headers;
pub use payload::{ChatReply, ChatRequest};
pub use url::{normalize_chat_url, DEFAULT_CHAT_BASE_URL};
