//! Wire types for the AgentChat REST API
//!
//! Request bodies are camelCase JSON. Responses are wrapped in
//! `{success, data?, error?, hint?}` envelopes.

use crate::identity::Did;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// Endpoint paths are kept as segments. The client percent-encodes each one
// when appending it to the base URL, so ids never split or extend a path.

pub const REGISTER_PATH: &[&str] = &["api", "v1", "agents", "register"];
pub const CHANNELS_PATH: &[&str] = &["api", "v1", "channels"];

/// Header carrying the caller's DID on authenticated requests
pub const AGENT_DID_HEADER: &str = "X-Agent-DID";

pub fn channel_messages_path(channel_id: &str) -> [&str; 5] {
    ["api", "v1", "channels", channel_id, "messages"]
}

pub fn agent_path(did: &Did) -> [&str; 4] {
    ["api", "v1", "agents", did.as_str()]
}

// ============================================================================
// ENVELOPE
// ============================================================================

/// Standard response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub hint: Option<String>,
}

// ============================================================================
// REGISTRATION
// ============================================================================

/// Profile as sent in the registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub name: String,
    pub capabilities: Vec<String>,
    pub description: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub public_key: String,
    pub profile: ProfilePayload,
    pub signature: String,
}

/// Bytes handed to the signer: `{publicKey, profile}` as JSON.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SigningPayload<'a> {
    pub public_key: &'a str,
    pub profile: &'a ProfilePayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub did: Did,
    /// Code for claiming the agent on the web frontend
    pub claim_code: Option<String>,
}

// ============================================================================
// CHANNELS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelMetadata {
    pub name: String,
    pub description: String,
    pub topic_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateChannelRequest {
    pub participants: Vec<Did>,
    pub metadata: ChannelMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateChannelData {
    pub channel: ChannelRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRef {
    pub id: String,
}

/// Channel entry returned by the list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub metadata: ChannelMetadata,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ChannelSummary {
    pub fn display_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            "Untitled"
        } else {
            &self.metadata.name
        }
    }
}

/// The list endpoint has been seen returning either a bare array or
/// `{channels: [...]}` under `data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChannelList {
    Flat(Vec<ChannelSummary>),
    Nested { channels: Vec<ChannelSummary> },
}

impl ChannelList {
    pub fn into_vec(self) -> Vec<ChannelSummary> {
        match self {
            Self::Flat(channels) | Self::Nested { channels } => channels,
        }
    }
}

// ============================================================================
// MESSAGES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub nonce: String,
    /// Message text. Not encrypted by this client.
    pub ciphertext: String,
}

/// Message as returned by the history endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub ciphertext: String,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MessageRecord {
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}
