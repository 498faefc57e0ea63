use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::format_cell;

/// Format output as a table using the tabled crate.
///
/// List-valued fields (recommendations, alerts) are printed below the table
/// rather than squeezed into a cell.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_fields(result);
                print_envelope_notes(map);
            }
            _ => print_fields(map),
        },
        _ => println!("{}", value),
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() {
            continue;
        }
        let cell = if val.is_null() {
            "n/a".to_string()
        } else {
            format_cell(val, ", ")
        };
        builder.push_record([key.as_str(), &cell]);
    }
    println!("{}", Table::from(builder));

    if let Some(Value::Array(recs)) = map.get("recommendations") {
        println!("\nRecommendations:");
        for r in recs {
            println!("  - {}", format_cell(r, ", "));
        }
    }

    if let Some(Value::Array(alerts)) = map.get("alerts") {
        if !alerts.is_empty() {
            println!("\nAlerts:");
            for a in alerts {
                println!("  ! {}", format_cell(a, ", ").yellow());
            }
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
