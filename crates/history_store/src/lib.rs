mod error;
mod paths;
mod schema;
mod store;

pub use error::HistoryStoreError;
pub use paths::{history_file_name, history_root, sanitize_identity_key};
pub use schema::{Sender, StoredMessage};
pub use store::HistoryStore;
