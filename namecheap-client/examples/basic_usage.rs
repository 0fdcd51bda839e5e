//! Basic usage example for the Namecheap client
//!
//! This example demonstrates how to:
//! - Create a client from NAMECHEAP_* environment variables
//! - Create a client with custom HTTP configuration
//! - Check domain availability
//! - List DNS host records
//! - Run a command that has no typed helper
//!
//! Note: This example requires API access to be enabled on your account and
//! your IP to be whitelisted. Set NAMECHEAP_SANDBOX=1 to use the sandbox.

use namecheap_client::{ApiError, NamecheapClient, Params};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example 1: Credentials from the environment
    println!("=== Example 1: Client From Environment ===");
    let client = NamecheapClient::builder().with_env().build()?;
    println!("✓ Client created for API user {}", client.credentials().api_user());

    // Example 2: Custom HTTP configuration
    println!("\n=== Example 2: Custom HTTP Configuration ===");
    let _configured_client = NamecheapClient::builder()
        .with_env()
        .timeout(Duration::from_secs(10))
        .client_builder(reqwest::blocking::Client::builder().use_rustls_tls())
        .build()?;
    println!("✓ Client created with custom timeout (10s)");

    // Check availability
    println!("\nChecking availability...");
    let domains = ["example.com", "example-unique-name.net"];
    match client.domains().check(&domains) {
        Ok(checks) => {
            for check in checks {
                let mark = if check.available { "✓" } else { "✗" };
                println!("{} {}", mark, check.domain);
            }
        }
        Err(ApiError::Authentication { message, .. }) => {
            println!("✗ Credentials rejected: {}", message);
            return Ok(());
        }
        Err(e) => println!("✗ Check failed: {}", e),
    }

    // DNS host records of a domain you own
    if let Ok(domain) = std::env::var("NAMECHEAP_DOMAIN") {
        println!("\nFetching host records for {}...", domain);
        match client.dns().get_hosts(&domain) {
            Ok(hosts) => {
                for host in hosts {
                    println!(
                        "  {:<20} {:<6} {} (ttl {:?})",
                        host.name,
                        host.record_type.as_str(),
                        host.address,
                        host.ttl
                    );
                }
            }
            Err(e) => println!("✗ Failed to fetch hosts: {}", e),
        }
    }

    // Raw call
    println!("\nCalling namecheap.users.address.getList...");
    let outcome = client.call("namecheap.users.address.getList", Params::new())?;
    println!("✓ Served by {:?} in {:?}s", outcome.server, outcome.execution_time);
    for warning in &outcome.warnings {
        println!("  warning: {}", warning);
    }

    Ok(())
}
