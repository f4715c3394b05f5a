//! Session persistence between CLI invocations.
//!
//! The session token is the only secret written to disk. Credentials are
//! never stored; a fresh `kotak login` is needed once the token expires.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use kotak::{BaseUrl, KotakClient, SessionState};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// What `kotak login` leaves behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub base_url: String,
    pub user_id: String,
    pub consumer_key: String,
    pub session_token: String,
}

impl StoredSession {
    pub fn new(base_url: &BaseUrl, user_id: &str, state: &SessionState) -> Self {
        Self {
            base_url: base_url.to_string(),
            user_id: user_id.to_string(),
            consumer_key: state.consumer_key().to_string(),
            session_token: state.export_session_token(),
        }
    }

    /// Rebuild an authenticated client without repeating the handshake.
    pub fn into_client(self, timeout: Duration) -> Result<KotakClient> {
        let base_url = BaseUrl::new(&self.base_url).context("Invalid base URL in session")?;
        let state = SessionState::from_persisted(self.consumer_key, self.session_token);
        KotakClient::restore(base_url, state, timeout).context("Failed to build HTTP client")
    }
}

/// `session.json` under the platform data directory.
pub fn default_session_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "kotak").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("session.json"))
}

pub fn save_session(path: &Path, session: &StoredSession) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create data directory")?;
    }

    let json = serde_json::to_string_pretty(session)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).context("Failed to open session file")?;

    // A file left by an older run keeps its mode on open.
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(0o600))?;

    file.write_all(json.as_bytes()).context("Failed to write session file")?;

    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

/// Returns `Ok(None)` when no session has been saved.
pub fn load_session(path: &Path) -> Result<Option<StoredSession>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).context("Failed to read session file")?;
    let stored = serde_json::from_str(&json).context("Invalid session file")?;
    Ok(Some(stored))
}

/// Delete the session file. Returns whether one existed.
pub fn clear_session(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).context("Failed to remove session file")?;
    Ok(true)
}
