use serde_json::Value;
use std::io;

use super::{batch_rows, scalar, BATCH_HEADERS};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(entries)) = map.get("entries") {
                let _ = wtr.write_record(BATCH_HEADERS);
                for row in batch_rows(entries) {
                    let _ = wtr.write_record(&row);
                }
            } else {
                // Two-column CSV: field, value
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &scalar(val)]);
                }
            }
        }
        _ => {
            let _ = wtr.write_record([&scalar(result)]);
        }
    }

    let _ = wtr.flush();
}
