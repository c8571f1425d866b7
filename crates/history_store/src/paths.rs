use std::path::{Path, PathBuf};

pub const HISTORY_DIR: [&str; 2] = [".cracky", "chat_history"];

#[must_use]
pub fn history_root(base: &Path) -> PathBuf {
    base.join(HISTORY_DIR[0]).join(HISTORY_DIR[1])
}

#[must_use]
pub fn sanitize_identity_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            ':' | '/' | '\\' | ' ' | '.' => '-',
            _ => c,
        })
        .collect()
}

#[must_use]
pub fn history_file_name(key: &str) -> String {
    format!("chat_history_{}.json", sanitize_identity_key(key))
}
