//! Per-process client state
//!
//! A [`Session`] holds the loaded identity and the ids of channels created
//! during this run. Channel ids are not persisted.

use crate::error::{ClientError, Result};
use crate::identity::{Did, Identity};

#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
    channels: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            channels: Vec::new(),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.identity().is_ok()
    }

    /// The loaded identity, or [`ClientError::NotRegistered`].
    ///
    /// An identity with a blank DID counts as not registered.
    pub fn identity(&self) -> Result<&Identity> {
        self.identity
            .as_ref()
            .filter(|identity| !identity.did.is_empty())
            .ok_or(ClientError::NotRegistered)
    }

    pub fn did(&self) -> Result<&Did> {
        self.identity().map(|i| &i.did)
    }

    /// Channels created by this session, oldest first.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub(crate) fn set_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    pub(crate) fn record_channel(&mut self, channel_id: String) {
        self.channels.push(channel_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unregistered() {
        let session = Session::new();
        assert!(!session.is_registered());
        assert!(matches!(session.did(), Err(ClientError::NotRegistered)));
        assert!(session.channels().is_empty());
    }

    #[test]
    fn test_session_with_identity() {
        let mut session = Session::with_identity(Identity {
            did: Did::new("did:key:abc123"),
            name: "Kimi".to_string(),
        });
        session.record_channel("ch-1".to_string());

        assert_eq!(session.did().unwrap().as_str(), "did:key:abc123");
        assert_eq!(session.channels(), ["ch-1".to_string()]);
    }

    #[test]
    fn test_blank_did_is_not_registered() {
        let session = Session::with_identity(Identity {
            did: Did::new(""),
            name: "Kimi".to_string(),
        });
        assert!(!session.is_registered());
        assert!(matches!(session.did(), Err(ClientError::NotRegistered)));
    }
}
