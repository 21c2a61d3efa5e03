//! Response rendering for `--format json|table|raw`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::Table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Raw => serde_json::to_string(value)?,
        OutputFormat::Table => {
            let prefs = ui::prefs();
            to_table(serde_json::to_value(value)?).render(prefs.table_color, prefs.term_width)
        }
    })
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// A list of tickets or categories gives one row per record. A single
/// record (one ticket, a scan report) gives one row per field.
fn to_table(value: Value) -> Table {
    match value {
        Value::Array(items) => records(items),
        Value::Object(record) => fields(record),
        scalar => {
            let mut table = Table::new(["value"]);
            table.push(vec![cell(&scalar)]);
            table
        }
    }
}

fn records(items: Vec<Value>) -> Table {
    let records: Vec<Map<String, Value>> = items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => record,
            other => Map::from_iter([(String::from("value"), other)]),
        })
        .collect();

    let mut columns: Vec<&str> = Vec::new();
    for key in records.iter().flat_map(Map::keys) {
        if !columns.contains(&key.as_str()) {
            columns.push(key);
        }
    }
    columns.sort_by_key(|column| (column_rank(column), *column));

    let mut table = Table::new(columns.iter().copied());
    for record in &records {
        table.push(
            columns
                .iter()
                .map(|column| record.get(*column).map_or_else(|| String::from("-"), cell))
                .collect(),
        );
    }
    table
}

fn fields(record: Map<String, Value>) -> Table {
    let mut entries: Vec<(String, Value)> = record.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| (column_rank(a), a).cmp(&(column_rank(b), b)));

    let mut table = Table::new(["field", "value"]);
    for (field, value) in entries {
        table.push(vec![field, cell(&value)]);
    }
    table
}

/// Ticket and category fields lead in this order; everything else follows
/// alphabetically.
fn column_rank(column: &str) -> usize {
    const LEADING: [&str; 6] = ["id", "name", "category", "issue_type", "status", "description"];
    LEADING
        .iter()
        .position(|leading| *leading == column)
        .unwrap_or(LEADING.len())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        status: &'static str,
        description: &'static str,
        id: &'static str,
        category: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                status: "open",
                description: "router down",
                id: "tkt-0a1b2c3d",
                category: "Network",
            },
            Row {
                status: "closed",
                description: "refund",
                id: "tkt-0a1b2c3e",
                category: "Unknown Category",
            },
        ]
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&rows(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["id"], "tkt-0a1b2c3d");
        assert_eq!(parsed[1]["category"], "Unknown Category");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&rows(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn table_puts_id_and_category_first() {
        let out = render(&rows(), OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        let columns: Vec<&str> = header.split_whitespace().collect();
        assert_eq!(columns, ["id", "category", "status", "description"]);
        assert!(out.contains("Unknown Category"));
    }

    #[test]
    fn table_render_for_object_is_field_value() {
        let out = render(&rows().remove(0), OutputFormat::Table).expect("table render should work");
        assert!(out.starts_with("field"));
        let fields: Vec<&str> = out
            .lines()
            .skip(2)
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(fields, ["id", "category", "status", "description"]);
        assert!(out.contains("router down"));
    }

    #[test]
    fn issue_type_lists_join_with_commas() {
        let categories = serde_json::json!([
            {"id": "cat-0a1b2c3d", "name": "Network", "issue_types": ["Outage", "Slow"]}
        ]);
        let out = render(&categories, OutputFormat::Table).expect("table render should work");
        let columns: Vec<&str> = out.lines().next().unwrap().split_whitespace().collect();
        assert_eq!(columns, ["id", "name", "issue_types"]);
        assert!(out.contains("Outage, Slow"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let empty: Vec<Row> = Vec::new();
        assert_eq!(render(&empty, OutputFormat::Table).unwrap(), "(no rows)");
    }
}
