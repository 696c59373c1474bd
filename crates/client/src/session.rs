//! Signed-in session, optionally persisted as a JSON file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use domain::models::PublicUser;

use crate::error::ClientError;

/// A bearer token together with the user it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: PublicUser,
}

impl Session {
    pub fn new(token: impl Into<String>, user: PublicUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Reads a session saved with [`Session::save`].
    ///
    /// A missing or unreadable file yields `None`, the signed-out state.
    pub fn load(path: impl AsRef<Path>) -> Option<Session> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    /// Writes the session to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ClientError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Removes a saved session. Clearing an absent file succeeds.
    pub fn clear(path: impl AsRef<Path>) -> Result<(), ClientError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
