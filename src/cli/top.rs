use super::{rates::render, ui};
use crate::providers::RatesClient;
use anyhow::Result;

pub async fn run(client: &RatesClient, year: Option<i64>, n: Option<u32>, table: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching top countries...");
    let result = client.fetch_top(year, n).await;
    pb.finish_and_clear();

    println!("{}", render(&result?, table)?);
    Ok(())
}
