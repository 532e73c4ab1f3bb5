//! Agent identity and the local credentials file
//!
//! The credentials file is a single JSON object `{"did": ..., "name": ...}`
//! written after a successful registration and read on every start.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default credentials file, relative to the working directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = ".agentchat_credentials.json";

/// Decentralized identifier assigned by the service at registration.
///
/// Deserializing rejects an empty or blank DID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

impl Did {
    pub fn new(did: impl Into<String>) -> Self {
        Self(did.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// First `len` characters, for display.
    pub fn short(&self, len: usize) -> &str {
        match self.0.char_indices().nth(len) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl TryFrom<String> for Did {
    type Error = String;

    fn try_from(did: String) -> std::result::Result<Self, Self::Error> {
        if did.trim().is_empty() {
            return Err("did must not be empty".to_string());
        }
        Ok(Self(did))
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.0
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted credentials record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub did: Did,
    pub name: String,
}

/// JSON file holding the agent's identity.
#[derive(Debug, Clone)]
pub struct CredentialsStore {
    path: PathBuf,
}

impl CredentialsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored identity.
    ///
    /// `Ok(None)` when the file does not exist. A file that exists but does
    /// not parse is reported as [`ClientError::CorruptCredentials`].
    pub fn load(&self) -> Result<Option<Identity>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No credentials at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let identity: Identity =
            serde_json::from_str(&raw).map_err(|source| ClientError::CorruptCredentials {
                path: self.path.clone(),
                source,
            })?;

        Ok(Some(identity))
    }

    /// Write the identity, replacing any previous record.
    pub fn save(&self, identity: &Identity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Replace via rename
        let tmp = self.path.with_extension("json.tmp");
        let mut writer = std::io::BufWriter::new(std::fs::File::create(&tmp)?);
        serde_json::to_writer(&mut writer, identity).map_err(std::io::Error::from)?;
        writer.flush()?;
        drop(writer);
        std::fs::rename(&tmp, &self.path)?;

        info!("Credentials saved to {:?}", self.path);
        Ok(())
    }
}
