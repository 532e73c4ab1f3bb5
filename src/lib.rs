//! AgentChat client
//!
//! Registers an agent identity on the AgentChat platform, keeps it in a local
//! credentials file, and talks to the platform's REST API to create and list
//! channels and to send and read messages.
//!
//! ## Module Structure
//!
//! - `api`: wire types and endpoint paths
//! - `client`: the HTTP client and its operations
//! - `config`: endpoint, profile and file locations
//! - `error`: the client error type
//! - `identity`: DID, identity record and credentials file
//! - `session`: per-process identity and created channels
//! - `tokens`: unique id generation and request signing

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod session;
pub mod tokens;

pub use api::{ChannelMetadata, ChannelSummary, MessageRecord};
pub use client::{AgentClient, Registration};
pub use config::{AgentProfile, ClientConfig, ConfigError, DEFAULT_MESSAGE_LIMIT};
pub use error::{ClientError, Result};
pub use identity::{CredentialsStore, Did, Identity};
pub use session::Session;
pub use tokens::{IdGenerator, PlaceholderSigner, RandomIds, SequentialIds, Signer};
