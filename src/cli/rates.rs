use super::ui;
use crate::core::{RatesSource, fetch_rates_for_years};
use anyhow::{Result, bail};
use serde_json::Value;

/// Formats a payload as a table when asked and possible, otherwise as pretty JSON.
pub fn render(payload: &Value, table: bool) -> Result<String> {
    if table && let Some(table) = ui::records_table(payload) {
        return Ok(table.to_string());
    }
    Ok(serde_json::to_string_pretty(payload)?)
}

/// Fetches and prints rates.
///
/// With no `years` a single request goes out for `fallback_year` (or the
/// fetcher's default). Several years are fetched concurrently and each result
/// is printed under its own heading. A non-blank `search` restricts every
/// request to countries whose name contains it.
pub async fn run(
    source: &(dyn RatesSource + Send + Sync),
    years: &[i64],
    fallback_year: Option<i64>,
    search: Option<&str>,
    table: bool,
) -> Result<()> {
    let search = search.map(str::trim).filter(|q| !q.is_empty());

    if years.len() <= 1 {
        let year = years.first().copied().or(fallback_year);
        let pb = ui::new_spinner("Fetching rates...");
        let result = match search {
            Some(q) => source.search_rates(year, q).await,
            None => source.fetch_rates(year).await,
        };
        pb.finish_and_clear();

        println!("{}", render(&result?, table)?);
        return Ok(());
    }

    let pb = ui::new_spinner(&format!("Fetching rates for {} years...", years.len()));
    let results = fetch_rates_for_years(source, years, search).await;
    pb.finish_and_clear();

    let mut failed = 0;
    for (year, result) in results {
        println!("{}\n", ui::style_text(&format!("Year {year}"), ui::StyleType::Title));
        match result {
            Ok(payload) => println!("{}\n", render(&payload, table)?),
            Err(e) => {
                failed += 1;
                println!("{}\n", ui::style_text(&format!("{e:#}"), ui::StyleType::Error));
            }
        }
    }

    if failed > 0 {
        bail!("Failed to load rates for {failed} of {} years", years.len());
    }
    Ok(())
}
