//! Floating assistant widget core for the Red Team Shop storefront.
//!
//! The widget is a pure state machine ([`widget::AssistantWidget`]) driven
//! by discrete UI events and completed network callbacks; every side effect
//! goes through the injected [`widget::WidgetHost`] seam. Persistence is
//! per-identity (`history_store`), the remote boundary is one JSON POST
//! (`cracky_api`), and the cross-page input buffers live in `search_state`.
//!
//! ## Session identity
//!
//! Conversations are keyed by the username parsed from the session token
//! (`demo_token_<username>_<userid>`); anything unparseable falls back to a
//! fixed default key. The whole widget is suppressed while no token is
//! present.
//!
//! ## Failure contract
//!
//! Remote failures never surface as errors: the transcript gains a normal
//! assistant bubble whose text distinguishes an authentication rejection
//! from every other failure. Malformed stored history loads as absent and
//! is reseeded with the welcome message.

pub mod identity;
pub mod runtime;
pub mod transcript;
pub mod widget;
pub mod window;
