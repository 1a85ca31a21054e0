//! Relay control example
//!
//! Connects to a module, prints its identification and output states,
//! toggles relay 1, then logs out.
//!
//! ```sh
//! ETH008_IP=192.168.1.100 ETH008_PASSWORD=password cargo run --example relay_control
//! ```

use eth008::Device;

async fn run(device: &mut Device) -> eth008::Result<()> {
    device.connect().await?;
    device.authenticate().await?;

    let info = device.get_info().await?;
    println!("{}", info);

    println!("Before: {}", device.get_output_states().await?);

    let now_active = device.toggle_output(1).await?;
    println!(
        "Relay 1 is now {}",
        if now_active { "ACTIVE" } else { "INACTIVE" }
    );

    println!("After:  {}", device.get_output_states().await?);

    Ok(())
}

#[tokio::main]
async fn main() -> eth008::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let ip = std::env::var("ETH008_IP").unwrap_or_else(|_| "192.168.1.100".to_string());

    let mut device = Device::new(ip, eth008::DEFAULT_PORT);
    if let Ok(password) = std::env::var("ETH008_PASSWORD") {
        device = device.with_password(password);
    }

    // Logout and disconnect run on the error path too
    let outcome = run(&mut device).await;
    device.close().await?;

    outcome
}
