//! Register command - create a new agent identity

use crate::print_banner;
use crate::style::*;
use agentchat_client::{AgentClient, Session};
use anyhow::{anyhow, Result};

pub async fn run(client: &AgentClient, force: bool) -> Result<()> {
    print_banner();
    print_header("Register Agent");

    let store = client.credentials();
    if store.exists() && !force {
        print_warning(&format!(
            "Credentials already exist at {:?}",
            store.path()
        ));
        print_info("Use --force to register a new identity and replace them");
        return Ok(());
    }

    let profile = client.profile();
    print_key_value("Name", &profile.name);
    print_key_value("Capabilities", &profile.capabilities.join(", "));
    print_key_value("Server", client.base_url());
    println!();

    let mut session = Session::new();
    let registration = client
        .try_register(&mut session)
        .await
        .map_err(|e| match e.hint() {
            Some(hint) => anyhow!("Registration failed: {} ({})", e, hint),
            None => anyhow!("Registration failed: {}", e),
        })?;

    print_success(&format!("Registered! DID: {}", registration.did));
    if let Some(code) = &registration.claim_code {
        print_key_value("Claim code", code);
    }
    print_key_value("Saved to", &format!("{:?}", store.path()));
    println!();

    Ok(())
}
