use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats a JSON scalar into a cell. Numbers keep their full precision;
/// `null` and missing values are displayed as "N/A".
pub fn value_cell(value: Option<&Value>) -> Cell {
    match value {
        None | Some(Value::Null) => Cell::new("N/A").fg(Color::DarkGrey),
        Some(Value::String(s)) => Cell::new(s),
        Some(Value::Number(n)) => Cell::new(n.to_string()).set_alignment(CellAlignment::Right),
        Some(other) => Cell::new(other.to_string()),
    }
}

/// Renders the `results` array of a payload as a table.
///
/// Columns come from the keys of the first record. Returns `None` when the
/// payload has no non-empty `results` array of objects.
pub fn records_table(payload: &Value) -> Option<Table> {
    let records = payload.get("results")?.as_array()?;
    let columns: Vec<&String> = records.first()?.as_object()?.keys().collect();

    let mut table = new_styled_table();
    table.set_header(columns.iter().map(|c| header_cell(c)).collect::<Vec<_>>());

    for record in records {
        let record = record.as_object()?;
        table.add_row(
            columns
                .iter()
                .map(|c| value_cell(record.get(c.as_str())))
                .collect::<Vec<_>>(),
        );
    }
    Some(table)
}

/// Creates a spinner shown on stderr while requests are in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
