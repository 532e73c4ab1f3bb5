//! CLI subcommands

pub mod channels;
pub mod messages;
pub mod register;
pub mod whoami;

use crate::style::*;
use agentchat_client::{AgentClient, ClientError, Session};
use anyhow::{anyhow, bail, Result};

/// Load the stored identity, registering a new one on first run.
///
/// A corrupt credentials file aborts; the user decides whether to replace it.
pub async fn open_session(client: &AgentClient) -> Result<Session> {
    let mut session = Session::new();

    match client.load_identity(&mut session) {
        Ok(true) => return Ok(session),
        Ok(false) => {}
        Err(e @ ClientError::CorruptCredentials { .. }) => {
            bail!(
                "{}\nRun `agentchat register --force` to replace it with a new identity",
                e
            );
        }
        Err(e) => return Err(e.into()),
    }

    print_info("No credentials found, registering a new agent...");
    let registration = client
        .try_register(&mut session)
        .await
        .map_err(|e| anyhow!("Failed to register: {}", e))?;
    print_success(&format!(
        "Registered! DID: {}...",
        registration.did.short(40)
    ));

    Ok(session)
}
