//! File-backed credential slot under the platform config directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::{CredentialStore, StoredCredential};

const APP_DIR: &str = "assetgate";
const FILE_NAME: &str = "credentials.json";

/// Credential store persisted as a single JSON record on disk.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store under `<config_dir>/assetgate/credentials.json`.
    ///
    /// `None` when the platform has no config directory; callers fall back to
    /// [`crate::MemoryCredentialStore`] in that case.
    pub fn in_config_dir() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::at_path(dir.join(APP_DIR).join(FILE_NAME)))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, record: &StoredCredential) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(record)?;
        fs::write(&self.path, bytes)?;

        // The token is a live credential; keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn read_record(&self) -> Option<StoredCredential> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "credential file unreadable");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "credential file corrupt; ignoring");
                None
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, token: &str) {
        if let Err(err) = self.write_record(&StoredCredential::new(token)) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist credential");
        }
    }

    fn load(&self) -> Option<String> {
        self.read_record().map(|record| record.token)
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove credential file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileCredentialStore {
        FileCredentialStore::at_path(dir.path().join("nested").join(FILE_NAME))
    }

    #[test]
    fn survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).save("tok-1");

        // A fresh store over the same path sees the token.
        assert_eq!(store_in(&dir).load().as_deref(), Some("tok-1"));
    }

    #[test]
    fn overwrite_replaces_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save("old");
        let first = store.read_record().unwrap();
        store.save("new");
        let second = store.read_record().unwrap();

        assert_eq!(second.token, "new");
        assert!(second.stored_at >= first.stored_at);
    }

    #[test]
    fn missing_and_corrupt_files_read_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load(), None);

        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save("tok");
        store.clear();
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("tok");

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
