use serde_json::Value;

use super::scalar;

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls back
/// to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "yield_net_of_duty",
        "yield_with_commission_and_annual_duty",
        "annual_duty_taxable_gain",
        "bucket",
        "evaluated",
    ];

    if let Value::Object(map) = result_obj {
        // An evaluation answers with its headline mode
        if let Some(Value::String(mode)) = map.get("headline") {
            let side = if mode == "MONTHLY" { "monthly" } else { "annual" };
            if let Some(val) = map.get(side).and_then(|r| r.get("yield_net_of_duty")) {
                println!("{}", scalar(val));
                return;
            }
        }

        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", scalar(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar(val));
            return;
        }
    }

    println!("{}", scalar(result_obj));
}
