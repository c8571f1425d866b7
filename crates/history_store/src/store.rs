use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::HistoryStoreError;
use crate::paths::history_file_name;
use crate::schema::StoredMessage;

/// Durable per-identity chat history. Each identity key owns one JSON file
/// under `root`; saves replace the whole file, loads fail soft.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    root: PathBuf,
}

impl HistoryStore {
    /// Creates a store handle. The root directory is created lazily by the
    /// first save, not here.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn file_path(&self, identity_key: &str) -> PathBuf {
        self.root.join(history_file_name(identity_key))
    }

    /// Loads the stored conversation for `identity_key`.
    ///
    /// Returns `None` when no record exists. Malformed stored data (bad
    /// JSON, unknown fields, invalid timestamps) is logged and treated as
    /// absent; this never raises to the caller.
    #[must_use]
    pub fn load(&self, identity_key: &str) -> Option<Vec<StoredMessage>> {
        let path = self.file_path(identity_key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return None,
            Err(error) => {
                log::warn!("failed to read chat history at {}: {error}", path.display());
                return None;
            }
        };

        let messages: Vec<StoredMessage> = match serde_json::from_str(&raw) {
            Ok(messages) => messages,
            Err(error) => {
                log::warn!(
                    "discarding malformed chat history at {}: {error}",
                    path.display()
                );
                return None;
            }
        };

        if let Some(message) = first_invalid_timestamp(&messages) {
            log::warn!(
                "discarding chat history at {} with invalid timestamp '{}' on message {}",
                path.display(),
                message.timestamp,
                message.id
            );
            return None;
        }

        Some(messages)
    }

    /// Persists the full ordered message sequence for `identity_key`,
    /// replacing any prior record. The write lands in a sibling temp file
    /// first and is published by rename.
    pub fn save(
        &self,
        identity_key: &str,
        messages: &[StoredMessage],
    ) -> Result<(), HistoryStoreError> {
        fs::create_dir_all(&self.root)
            .map_err(|source| HistoryStoreError::io("creating history root", &self.root, source))?;

        let path = self.file_path(identity_key);
        let serialized = serde_json::to_vec_pretty(messages)
            .map_err(|source| HistoryStoreError::json_serialize(&path, source))?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, serialized)
            .map_err(|source| HistoryStoreError::io("writing chat history", &staging, source))?;
        fs::rename(&staging, &path)
            .map_err(|source| HistoryStoreError::io("publishing chat history", &path, source))?;

        Ok(())
    }

    /// Deletes the stored record for `identity_key`. A missing record is
    /// success; other identities' records are untouched.
    pub fn clear(&self, identity_key: &str) -> Result<(), HistoryStoreError> {
        let path = self.file_path(identity_key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(HistoryStoreError::io("clearing chat history", &path, source)),
        }
    }
}

fn first_invalid_timestamp(messages: &[StoredMessage]) -> Option<&StoredMessage> {
    messages
        .iter()
        .find(|message| OffsetDateTime::parse(&message.timestamp, &Rfc3339).is_err())
}
