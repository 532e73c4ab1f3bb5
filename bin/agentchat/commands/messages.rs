//! Message commands - send and read channel messages

use super::open_session;
use crate::style::*;
use agentchat_client::AgentClient;
use anyhow::{bail, Context, Result};

const PREVIEW_CHARS: usize = 100;
const SENDER_CHARS: usize = 20;

pub async fn send(client: &AgentClient, channel_id: &str, message: &str) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        bail!("Message cannot be empty");
    }

    let session = open_session(client).await?;
    let name = &session.identity()?.name;

    if !client.send_message(&session, channel_id, message).await {
        bail!("Failed to send message to {}", channel_id);
    }

    println!(
        "{} [{}]: {}",
        icon_success(),
        style_cyan(name),
        truncate(message, PREVIEW_CHARS)
    );
    Ok(())
}

pub async fn history(
    client: &AgentClient,
    channel_id: &str,
    limit: u32,
    before: Option<i64>,
) -> Result<()> {
    let session = open_session(client).await?;

    let messages = client
        .try_get_messages(&session, channel_id, limit, before)
        .await
        .with_context(|| format!("Failed to get messages for {}", channel_id))?;

    print_header(&format!("Last {} messages", messages.len()));

    for msg in &messages {
        let sender = if msg.sender.is_empty() {
            "unknown"
        } else {
            msg.sender.as_str()
        };
        let when = msg
            .sent_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();

        println!(
            "  {} [{}]: {}",
            style_dim(&when),
            style_cyan(&truncate(sender, SENDER_CHARS)),
            truncate(&msg.ciphertext, PREVIEW_CHARS)
        );
    }
    println!();

    Ok(())
}
