use serde_json::Value;

use super::format_value;

/// Print just the headline number from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first scalar field in the result object.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Evaluation results nest the numbers under "metrics"
    let fields = result
        .as_object()
        .and_then(|m| m.get("metrics"))
        .unwrap_or(result);

    let priority_keys = [
        "monthly_cash_flow",
        "cap_rate",
        "cash_on_cash_return",
        "monthly_payment",
        "monthly_mortgage_payment",
    ];

    if let Value::Object(map) = fields {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_value(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(fields));
}
