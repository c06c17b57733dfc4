//! Persistence of the auth token.
//!
//! [`TokenStore`] is the fallible storage backend. [`SessionStore`] wraps a backend and makes
//! storage best-effort: failures are logged and read as "no token", they never reach callers.

use crate::constants::TOKEN_FILE_NAME;
use crate::error::StoreError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Durable storage for a single opaque token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&self, token: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Stores the token in a file named [`TOKEN_FILE_NAME`] inside a directory.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            // Owner-only from creation; the token is a credential.
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(write_err)?;

        // `mode` only applies to new files.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
                tracing::warn!("could not restrict token file permissions: {}", e);
            }
        }

        file.write_all(token.as_bytes()).map_err(write_err)?;

        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Process-local token storage, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.token.lock().map_err(|_| StoreError::Poisoned)?.clone())
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.token.lock().map_err(|_| StoreError::Poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.token.lock().map_err(|_| StoreError::Poisoned)? = None;
        Ok(())
    }
}

/// Best-effort handle on the persisted token, shared by the HTTP client and the session.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn TokenStore>,
}

impl SessionStore {
    pub fn new(backend: impl TokenStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// The persisted token, or `None` when absent or unreadable.
    pub fn get(&self) -> Option<String> {
        match self.backend.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Failed to read auth token: {}", e);
                None
            }
        }
    }

    /// Persists `Some(token)` or removes the token for `None`.
    pub fn set(&self, token: Option<&str>) {
        let result = match token {
            Some(token) => self.backend.save(token),
            None => self.backend.clear(),
        };

        if let Err(e) = result {
            tracing::error!("Failed to persist auth token: {}", e);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
