use serde_json::Value;
use std::io;

use super::format_value;

/// Write output as CSV to stdout.
///
/// When the result carries a projection series, the series is emitted as
/// records (the chartable data); otherwise the result prints as field/value
/// rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(projection)) = map.get("projection") {
                write_records(&mut wtr, projection);
            } else {
                write_fields(&mut wtr, map);
            }
        }
        Value::Array(arr) => write_records(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_value(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &serde_json::Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        if matches!(val, Value::Array(_) | Value::Object(_)) {
            continue;
        }
        let _ = wtr.write_record([key.as_str(), &csv_value(val)]);
    }
}

fn write_records(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&csv_value(item)]);
        }
    }
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => format_value(other),
    }
}
