use serde::{Deserialize, Serialize};

/// The only value carried between runs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    #[serde(rename = "lastHash", default)]
    pub last_hash: String,
}

impl SyncState {
    pub fn is_unchanged(&self, current_hash: &str) -> bool {
        self.last_hash == current_hash
    }
}
