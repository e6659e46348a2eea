//! Example: Listing a YoLink home
//!
//! Authenticates with the client-credentials grant, fetches the home info and
//! device list, then prints the client status.
//!
//! # Setup
//!
//! 1. Set credentials: ```bash export YOSMART_UAID=ua_...
//!    export YOSMART_SECRET=sec_v1_... ```
//!
//! 2. Run this example: ```bash cargo run -p yolink-infra --example
//!    home_overview ```

use yolink_infra::{init_tracing, LogFormat, YoLinkClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(LogFormat::Pretty);

    let client = YoLinkClient::from_env()?;

    println!("YoLink Home Overview");
    println!("====================\n");

    if !client.authenticate().await {
        println!("✗ Authentication failed, check YOSMART_UAID / YOSMART_SECRET");
        return Ok(());
    }

    match client.get_home_info().await {
        Ok(home) => println!("✓ Home: {}", home.id),
        Err(failure) => println!("✗ Home info unavailable: {failure}"),
    }

    match client.get_devices().await {
        Ok(devices) => {
            println!("✓ {} device(s)", devices.len());
            for device in &devices {
                println!("  - {} [{}] {}", device.name, device.device_type, device.device_id);
            }
        }
        Err(failure) => {
            let hint = if failure.is_retryable() { " (retryable)" } else { "" };
            println!("✗ Device list unavailable: {failure}{hint}");
        }
    }

    let status = client.status().await;
    println!("\nStatus:");
    println!("  authenticated: {}", status.authenticated);
    println!("  token valid:   {}", status.token_valid);
    if let Some(expires_at) = status.token_expires_at {
        println!("  expires at:    {expires_at}");
    }
    println!("  devices:       {}", status.device_count);

    Ok(())
}
