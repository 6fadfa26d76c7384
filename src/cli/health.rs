use super::ui;
use crate::providers::RatesClient;
use anyhow::{Result, bail};

pub async fn run(client: &RatesClient) -> Result<()> {
    let status = client.health().await?;
    if !status.ok {
        bail!("Server at {} reported unhealthy", client.origin());
    }

    println!(
        "{} {}",
        client.origin(),
        ui::style_text("ok", ui::StyleType::Subtle)
    );
    Ok(())
}
