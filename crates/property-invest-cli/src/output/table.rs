use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format_value;

/// Format output as tables using the tabled crate.
///
/// Evaluation envelopes print the metrics as a Field/Value table followed by
/// the 10-year projection as a year table, then warnings and methodology.
pub fn print_table(value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{}", value);
        return;
    };

    match map.get("result") {
        Some(Value::Object(result)) => {
            if let Some(Value::Object(metrics)) = result.get("metrics") {
                print_field_table(metrics);
            } else {
                print_field_table(result);
            }

            if let Some(Value::Array(projection)) = result.get("projection") {
                println!("\nProjection:");
                print_record_table(projection);
            }
        }
        _ => print_field_table(map),
    }

    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = map.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_field_table(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if matches!(val, Value::Array(_) | Value::Object(_)) {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn print_record_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", format_value(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    let table = Table::from(builder);
    println!("{}", table);
}
