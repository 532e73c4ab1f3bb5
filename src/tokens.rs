//! Unique tokens and request signing
//!
//! Registration needs a public-key token and a signature, every message needs
//! a nonce. Both sources sit behind small traits so a real key scheme can be
//! plugged in without touching the client.

use crate::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique identifiers for public-key tokens and nonces.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Monotonic counter, deterministic across runs.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Produces the `signature` field of a registration payload.
pub trait Signer: Send + Sync {
    fn sign(&self, payload: &[u8]) -> Result<String>;
}

/// Fixed signature string. The service does not verify signatures yet.
#[derive(Debug, Clone)]
pub struct PlaceholderSigner {
    signature: String,
}

impl PlaceholderSigner {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
        }
    }

    /// `<name>-signature`, lowercased.
    pub fn for_agent(name: &str) -> Self {
        Self::new(format!("{}-signature", name.to_lowercase()))
    }
}

impl Signer for PlaceholderSigner {
    fn sign(&self, _payload: &[u8]) -> Result<String> {
        Ok(self.signature.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_ids_do_not_collide() {
        let ids = RandomIds;
        let seen: HashSet<String> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_sequential_ids_are_monotonic() {
        let ids = SequentialIds::new(41);
        assert_eq!(ids.next_id(), "41");
        assert_eq!(ids.next_id(), "42");
        assert_eq!(ids.next_id(), "43");
    }

    #[test]
    fn test_placeholder_signer_ignores_payload() {
        let signer = PlaceholderSigner::for_agent("Kimi");
        assert_eq!(signer.sign(b"one").unwrap(), "kimi-signature");
        assert_eq!(signer.sign(b"two").unwrap(), "kimi-signature");
    }
}
