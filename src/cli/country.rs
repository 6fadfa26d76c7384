use super::ui;
use crate::providers::RatesClient;
use anyhow::Result;

pub async fn run(client: &RatesClient, iso3: &str) -> Result<()> {
    let pb = ui::new_spinner(&format!("Fetching country {}...", iso3.trim()));
    let result = client.fetch_country(iso3).await;
    pb.finish_and_clear();

    println!("{}", serde_json::to_string_pretty(&result?)?);
    Ok(())
}
