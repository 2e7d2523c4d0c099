use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) => render_rows(items),
        Value::Object(map) => render_object(map),
        scalar => value_to_cell(scalar),
    }
}

/// Scalar fields become a key/value table. Fields holding lists of records
/// (a page's `data`, a bulk result's `updated` and `failed`) are rendered as
/// their own titled tables underneath.
fn render_object(map: &Map<String, Value>) -> String {
    let mut scalars = Vec::new();
    let mut sections = Vec::new();

    for (key, value) in map {
        match value {
            Value::Array(items) if items.iter().all(Value::is_object) => {
                sections.push(format!("{key}:\n{}", render_rows(items)));
            }
            Value::Object(inner) => {
                sections.push(format!("{key}:\n{}", render_object(inner)));
            }
            other => scalars.push(vec![key.clone(), value_to_cell(other)]),
        }
    }

    let mut blocks = Vec::with_capacity(1 + sections.len());
    if !scalars.is_empty() {
        blocks.push(table::render(&["key", "value"], &scalars));
    }
    blocks.extend(sections);
    blocks.join("\n\n")
}

fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![value_to_cell(item)]).collect();
        return table::render(&["value"], &rows);
    }

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect()
        })
        .collect();
    table::render(&header_refs, &rows)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}
