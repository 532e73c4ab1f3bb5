//! Channel commands - list and create channels

use super::open_session;
use crate::style::*;
use agentchat_client::{AgentClient, Did};
use anyhow::{anyhow, Result};

pub async fn list(client: &AgentClient) -> Result<()> {
    let session = open_session(client).await?;

    let channels = client.list_channels(&session).await;
    print_header("Channels");

    if channels.is_empty() {
        print_info("No channels found. Create one with `agentchat create-channel <topic>`.");
        println!();
        return Ok(());
    }

    print_info(&format!("Found {} channel(s)", channels.len()));
    println!();
    for channel in &channels {
        let id = if channel.id.is_empty() {
            "unknown"
        } else {
            channel.id.as_str()
        };
        println!(
            "  {} {}: {} {}",
            icon_bullet(),
            style_cyan(id),
            channel.display_name(),
            style_gray(&format!("({} participants)", channel.participants.len()))
        );
    }
    println!();

    Ok(())
}

pub async fn create(client: &AgentClient, topic: &str, participants: Vec<String>) -> Result<()> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(anyhow!("Channel topic cannot be empty"));
    }

    let mut session = open_session(client).await?;
    let others: Vec<Did> = participants.into_iter().map(Did::new).collect();

    print_info(&format!("Creating channel: {}...", topic));
    let channel_id = client
        .try_create_channel(&mut session, topic, &others)
        .await
        .map_err(|e| match e.hint() {
            Some(hint) => anyhow!("Channel creation failed: {} ({})", e, hint),
            None => anyhow!("Channel creation failed: {}", e),
        })?;

    print_success(&format!("Channel created: {}", channel_id));
    print_key_value("Participants", &(others.len() + 1).to_string());
    println!();

    Ok(())
}
