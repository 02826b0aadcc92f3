pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// One row per batch entry: identifier, bucket, headline yields, error.
pub(crate) fn batch_rows(entries: &[Value]) -> Vec<[String; 5]> {
    entries
        .iter()
        .map(|entry| {
            let eval = &entry["evaluation"];
            let headline = match eval["headline"].as_str() {
                Some("MONTHLY") => &eval["monthly"],
                _ => &eval["annual"],
            };
            [
                scalar(&entry["isin"]),
                scalar(&entry["bucket"]),
                scalar(&headline["gross_yield"]),
                scalar(&headline["yield_net_of_duty"]),
                scalar(&entry["error"]),
            ]
        })
        .collect()
}

pub(crate) const BATCH_HEADERS: [&str; 5] =
    ["isin", "bucket", "gross_yield", "yield_net_of_duty", "error"];

pub(crate) fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_rows_pick_headline_mode() {
        let entries = vec![
            json!({
                "isin": "IT0005370306",
                "bucket": "60M",
                "evaluation": {
                    "headline": "MONTHLY",
                    "annual": { "gross_yield": "2.2402", "yield_net_of_duty": "2.1751" },
                    "monthly": { "gross_yield": "2.2402", "yield_net_of_duty": "2.0406" }
                }
            }),
            json!({ "isin": "IT0000000009", "error": "Invalid input" }),
        ];
        let rows = batch_rows(&entries);
        assert_eq!(rows[0][3], "2.0406");
        assert_eq!(rows[1][1], "");
        assert_eq!(rows[1][4], "Invalid input");
    }
}
