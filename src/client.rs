//! AgentChat API client
//!
//! Every operation is a single request/response pair bounded by the configured
//! timeout. Nothing is retried.
//!
//! Operations come in two forms:
//! - `try_*` returns a [`Result`] so the caller can tell precondition,
//!   transport and API faults apart
//! - the plain form logs the fault and yields `None`, `false` or an empty `Vec`

use crate::api::{
    self, ApiResponse, ChannelList, ChannelMetadata, ChannelSummary, CreateChannelData,
    CreateChannelRequest, MessageRecord, ProfilePayload, RegisterData, RegisterRequest,
    SendMessageRequest, SigningPayload, AGENT_DID_HEADER,
};
use crate::config::{AgentProfile, ClientConfig};
use crate::error::{ClientError, Result};
use crate::identity::{CredentialsStore, Did, Identity};
use crate::session::Session;
use crate::tokens::{IdGenerator, PlaceholderSigner, RandomIds, Signer};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

/// Outcome of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub did: Did,
    pub claim_code: Option<String>,
}

/// HTTP client for one agent
pub struct AgentClient {
    base_url: String,
    base: Url,
    http: reqwest::Client,
    profile: AgentProfile,
    topic_tags: Vec<String>,
    store: CredentialsStore,
    ids: Box<dyn IdGenerator>,
    signer: Box<dyn Signer>,
}

impl AgentClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        let base_url = config.api.url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} cannot be a base URL",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            base,
            http,
            profile: config.agent.clone(),
            topic_tags: config.channels.topic_tags.clone(),
            store: CredentialsStore::new(config.credentials_path.clone()),
            ids: Box::new(RandomIds),
            signer: Box::new(PlaceholderSigner::for_agent(&config.agent.name)),
        })
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_signer(mut self, signer: impl Signer + 'static) -> Self {
        self.signer = Box::new(signer);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &CredentialsStore {
        &self.store
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ClientError::InvalidUrl(format!(
                "invalid path segment {:?}",
                bad
            )));
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidUrl(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ========================================================================
    // IDENTITY
    // ========================================================================

    /// Load saved credentials into the session.
    ///
    /// Returns `Ok(false)` when no credentials file exists. A corrupt file is
    /// an error so the caller can choose between re-registering and aborting.
    pub fn load_identity(&self, session: &mut Session) -> Result<bool> {
        match self.store.load()? {
            Some(identity) => {
                info!(
                    "Loaded existing credentials (DID: {}...)",
                    identity.did.short(30)
                );
                session.set_identity(identity);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Register a new identity and persist it.
    ///
    /// Each call creates a fresh identity on the server; the credentials
    /// file keeps only the latest one.
    pub async fn try_register(&self, session: &mut Session) -> Result<Registration> {
        let profile = ProfilePayload {
            name: self.profile.name.clone(),
            capabilities: self.profile.capabilities.clone(),
            description: self.profile.description.clone(),
            avatar: self.profile.avatar_url(),
        };
        let public_key = format!(
            "pk-{}-{}",
            self.profile.name.to_lowercase(),
            self.ids.next_id()
        );

        let signing_bytes = serde_json::to_vec(&SigningPayload {
            public_key: &public_key,
            profile: &profile,
        })
        .map_err(|e| ClientError::Signing(e.to_string()))?;
        let signature = self.signer.sign(&signing_bytes)?;

        let request = RegisterRequest {
            public_key,
            profile,
            signature,
        };

        debug!("Registering {} at {}", self.profile.name, self.base_url);
        let resp = self
            .http
            .post(self.endpoint(api::REGISTER_PATH)?)
            .json(&request)
            .send()
            .await?;

        let data: RegisterData = into_data(resp).await?;

        let identity = Identity {
            did: data.did.clone(),
            name: self.profile.name.clone(),
        };
        self.store.save(&identity)?;
        session.set_identity(identity);

        info!("Registered as {}", data.did);
        Ok(Registration {
            did: data.did,
            claim_code: data.claim_code,
        })
    }

    pub async fn register(&self, session: &mut Session) -> Option<Did> {
        match self.try_register(session).await {
            Ok(registration) => Some(registration.did),
            Err(e) => {
                report("Registration failed", &e);
                None
            }
        }
    }

    /// Public profile of any agent, requested as the session's agent.
    pub async fn try_get_agent(&self, session: &Session, did: &Did) -> Result<serde_json::Value> {
        let caller = session.did()?;

        let resp = self
            .http
            .get(self.endpoint(&api::agent_path(did))?)
            .header(AGENT_DID_HEADER, caller.as_str())
            .send()
            .await?;
        into_data(resp).await
    }

    // ========================================================================
    // CHANNELS
    // ========================================================================

    /// Create a channel with this agent plus `participants` as members.
    pub async fn try_create_channel(
        &self,
        session: &mut Session,
        topic: &str,
        participants: &[Did],
    ) -> Result<String> {
        let did = session.did()?.clone();

        let mut members = Vec::with_capacity(participants.len() + 1);
        members.push(did.clone());
        members.extend(participants.iter().cloned());

        let request = CreateChannelRequest {
            participants: members,
            metadata: ChannelMetadata {
                name: topic.to_string(),
                description: format!("Discussion about {}", topic),
                topic_tags: self.topic_tags.clone(),
            },
        };

        debug!("Creating channel '{}'", topic);
        let resp = self
            .http
            .post(self.endpoint(api::CHANNELS_PATH)?)
            .header(AGENT_DID_HEADER, did.as_str())
            .json(&request)
            .send()
            .await?;

        let data: CreateChannelData = into_data(resp).await?;
        let channel_id = data.channel.id;

        session.record_channel(channel_id.clone());
        info!("Channel created: {}", channel_id);
        Ok(channel_id)
    }

    pub async fn create_channel(
        &self,
        session: &mut Session,
        topic: &str,
        participants: &[Did],
    ) -> Option<String> {
        match self.try_create_channel(session, topic, participants).await {
            Ok(id) => Some(id),
            Err(e) => {
                report("Channel creation failed", &e);
                None
            }
        }
    }

    /// Channels the agent participates in.
    pub async fn try_list_channels(&self, session: &Session) -> Result<Vec<ChannelSummary>> {
        let did = session.did()?;

        let resp = self
            .http
            .get(self.endpoint(api::CHANNELS_PATH)?)
            .header(AGENT_DID_HEADER, did.as_str())
            .send()
            .await?;

        let list: Option<ChannelList> = data_if_ok(resp).await?;
        let channels = list.map(ChannelList::into_vec).unwrap_or_default();
        debug!("Found {} channel(s)", channels.len());
        Ok(channels)
    }

    pub async fn list_channels(&self, session: &Session) -> Vec<ChannelSummary> {
        self.try_list_channels(session)
            .await
            .unwrap_or_else(|e| {
                report("Failed to list channels", &e);
                Vec::new()
            })
    }

    // ========================================================================
    // MESSAGES
    // ========================================================================

    /// Post a message. Succeeds on any 2xx status.
    pub async fn try_send_message(
        &self,
        session: &Session,
        channel_id: &str,
        content: &str,
    ) -> Result<()> {
        let did = session.did()?;

        let request = SendMessageRequest {
            nonce: format!("nonce-{}", self.ids.next_id()),
            ciphertext: content.to_string(),
        };

        let resp = self
            .http
            .post(self.endpoint(&api::channel_messages_path(channel_id))?)
            .header(AGENT_DID_HEADER, did.as_str())
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status, &resp.text().await.unwrap_or_default()));
        }

        debug!("Sent message to {}", channel_id);
        Ok(())
    }

    pub async fn send_message(&self, session: &Session, channel_id: &str, content: &str) -> bool {
        match self.try_send_message(session, channel_id, content).await {
            Ok(()) => true,
            Err(e) => {
                report("Failed to send message", &e);
                false
            }
        }
    }

    /// Fetch up to `limit` messages, optionally only those older than
    /// `before` (milliseconds since the epoch).
    pub async fn try_get_messages(
        &self,
        session: &Session,
        channel_id: &str,
        limit: u32,
        before: Option<i64>,
    ) -> Result<Vec<MessageRecord>> {
        let did = session.did()?;

        let mut query = vec![("limit", limit.to_string())];
        if let Some(before) = before {
            query.push(("before", before.to_string()));
        }

        let resp = self
            .http
            .get(self.endpoint(&api::channel_messages_path(channel_id))?)
            .header(AGENT_DID_HEADER, did.as_str())
            .query(&query)
            .send()
            .await?;

        let messages: Option<Vec<MessageRecord>> = data_if_ok(resp).await?;
        Ok(messages.unwrap_or_default())
    }

    pub async fn get_messages(
        &self,
        session: &Session,
        channel_id: &str,
        limit: u32,
    ) -> Vec<MessageRecord> {
        self.try_get_messages(session, channel_id, limit, None)
            .await
            .unwrap_or_else(|e| {
                report("Failed to get messages", &e);
                Vec::new()
            })
    }
}

fn report(context: &str, err: &ClientError) {
    match err {
        ClientError::NotRegistered => warn!("{}: {}", context, err),
        _ => match err.hint() {
            Some(hint) => error!("{}: {} (hint: {})", context, err, hint),
            None => error!("{}: {}", context, err),
        },
    }
}

/// Build an API error from a response body, preferring the server's text.
fn api_error(status: StatusCode, body: &str) -> ClientError {
    let envelope = serde_json::from_str::<ApiResponse<serde_json::Value>>(body).ok();
    let (message, hint) = match envelope {
        Some(env) => (env.error, env.hint),
        None => (None, None),
    };
    ClientError::Api {
        status,
        message: message.unwrap_or_else(|| status.to_string()),
        hint,
    }
}

/// Decode an envelope and require `success: true` with a `data` payload.
async fn into_data<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    let body = resp.text().await?;

    let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
        Ok(env) => env,
        Err(_) if !status.is_success() => return Err(api_error(status, &body)),
        Err(e) => return Err(ClientError::Decode(e.to_string())),
    };

    if !envelope.success {
        return Err(ClientError::Api {
            status,
            message: envelope.error.unwrap_or_else(|| status.to_string()),
            hint: envelope.hint,
        });
    }

    envelope
        .data
        .ok_or_else(|| ClientError::Decode("response missing data".to_string()))
}

/// Require a 2xx status and return `data`, which may be absent.
async fn data_if_ok<T: DeserializeOwned>(resp: Response) -> Result<Option<T>> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(api_error(status, &body));
    }

    let envelope: ApiResponse<T> =
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
    Ok(envelope.data)
}
