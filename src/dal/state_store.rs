use std::{fs, path::PathBuf};

use crate::{domain::sync_state::SyncState, error::SyncError};

pub trait StateStore {
    /// Never fails: anything unreadable is the initial state.
    fn load(&self) -> SyncState;

    fn save(&self, state: &SyncState) -> Result<(), SyncError>;
}

pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStateStore { path: path.into() }
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> SyncState {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                log::info!("No state at {}: {}", self.path.display(), e);
                return SyncState::default();
            }
        };

        serde_json::from_str(&data).unwrap_or_else(|e| {
            log::error!(
                "Ignoring unreadable state at {}: {:?}",
                self.path.display(),
                e
            );
            SyncState::default()
        })
    }

    fn save(&self, state: &SyncState) -> Result<(), SyncError> {
        let data = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, data)?;

        Ok(())
    }
}
