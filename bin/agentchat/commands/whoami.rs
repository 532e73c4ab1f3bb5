//! Whoami command - show the stored identity

use crate::style::*;
use agentchat_client::{AgentClient, Session};
use anyhow::{Context, Result};

pub async fn run(client: &AgentClient) -> Result<()> {
    print_header("Identity");

    let mut session = Session::new();
    let loaded = client
        .load_identity(&mut session)
        .context("Failed to read credentials")?;
    if !loaded {
        print_warning("Not registered yet. Run `agentchat register`.");
        return Ok(());
    }

    let identity = session.identity()?;
    print_key_value("DID", identity.did.as_str());
    print_key_value("Name", &identity.name);
    print_key_value("Credentials", &format!("{:?}", client.credentials().path()));
    print_key_value("Server", client.base_url());

    match client.try_get_agent(&session, &identity.did).await {
        Ok(agent) => {
            let capabilities = agent
                .pointer("/profile/capabilities")
                .and_then(|v| v.as_array())
                .map(|caps| {
                    caps.iter()
                        .filter_map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            print_key_value("Status", &style_cyan("known to server"));
            if !capabilities.is_empty() {
                print_key_value("Capabilities", &capabilities);
            }
        }
        Err(e) => print_warning(&format!("Server lookup failed: {}", e)),
    }

    println!();
    Ok(())
}
