/*
[INPUT]:  Session token material and a snapshot file path
[OUTPUT]: Serializable session snapshot, persisted as JSON
[POS]:    Auth layer - resume a session across processes
[UPDATE]: When snapshot fields or file permissions change
*/

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::Result;

/// Tokens and expiries of a session, detached from any client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub access: String,
    pub refresh: String,
    pub access_expired_at: DateTime<Utc>,
    pub refresh_expired_at: DateTime<Utc>,
    #[serde(default)]
    pub is_2fa_confirmed: bool,
}

impl SessionSnapshot {
    /// Load a snapshot previously written by [`SessionSnapshot::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the snapshot as JSON, readable by the owner only
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, serde_json::to_vec_pretty(self)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }
}
