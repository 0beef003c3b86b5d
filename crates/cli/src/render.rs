//! Terminal output: aligned tables, pretty JSON, errors, and the
//! end-of-session summary.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use study_core::SessionSummary;

/// Pretty-print any serializable value as JSON.
///
/// # Errors
///
/// Fails only if the value cannot be serialized.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print rows as an aligned table when they are objects, or as a plain list
/// otherwise.
pub fn print_table(rows: &[Value]) {
    for line in table_lines(rows) {
        println!("{line}");
    }
}

/// Serialize items and print them as JSON or as a table.
///
/// # Errors
///
/// Fails only if an item cannot be serialized.
pub fn print_items<T: Serialize>(items: &[T], json: bool) -> Result<()> {
    let rows = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    if json {
        print_json(&rows)?;
    } else {
        print_table(&rows);
    }
    Ok(())
}

/// Print one record: JSON or a one-row table.
///
/// # Errors
///
/// Fails only if the value cannot be serialized.
pub fn print_record(value: &Value, json: bool) -> Result<()> {
    if json {
        print_json(value)
    } else {
        print_table(std::slice::from_ref(value));
        Ok(())
    }
}

/// Print `value[key]` as a table when present, the whole payload as JSON
/// otherwise. Several endpoints wrap their record in an envelope.
///
/// # Errors
///
/// Fails only if the value cannot be serialized.
pub fn print_enveloped(value: &Value, key: &str, json: bool) -> Result<()> {
    if json {
        return print_json(value);
    }
    match value.get(key) {
        Some(Value::Array(items)) => print_table(items),
        Some(inner) => print_table(std::slice::from_ref(inner)),
        None => return print_json(value),
    }
    Ok(())
}

/// Print the end-of-session report.
pub fn print_summary(summary: &SessionSummary) {
    println!();
    for line in summary_lines(summary) {
        println!("{line}");
    }
}

/// Print a failure the way users should see it: the normalized message by
/// default, the full chain in debug mode.
pub fn print_error(error: &anyhow::Error, debug: bool) {
    if debug {
        eprintln!("Error: {error:?}");
    } else {
        eprintln!("Error: {error}");
    }
}

fn summary_lines(summary: &SessionSummary) -> Vec<String> {
    if summary.is_empty() {
        return vec!["No cards were reviewed this session.".to_string()];
    }

    let mut lines = vec![
        "Session Summary:".to_string(),
        format!("Cards reviewed: {}", summary.reviewed()),
    ];
    if let Some(average) = summary.average() {
        lines.push(format!("Average recall rating: {average:.2}"));
    }
    lines.push("Rating breakdown:".to_string());
    for (rating, count) in summary.breakdown() {
        lines.push(format!(
            "  {} (Rated {}): {} time(s)",
            rating.label(),
            rating.value(),
            count
        ));
    }
    lines
}

fn table_lines(rows: &[Value]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["(none)".to_string()];
    }

    let objects: Option<Vec<_>> = rows.iter().map(Value::as_object).collect();
    let Some(objects) = objects else {
        return rows.iter().map(cell_text).collect();
    };

    // Columns are the union of keys across rows, in first-seen order.
    let mut columns: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !columns.iter().any(|column| column == key) {
                columns.push(key.clone());
            }
        }
    }

    let mut widths: Vec<usize> = columns.iter().map(|column| column.chars().count()).collect();
    let mut body: Vec<Vec<String>> = Vec::with_capacity(objects.len());
    for object in &objects {
        let row: Vec<String> = columns
            .iter()
            .map(|column| object.get(column).map(cell_text).unwrap_or_default())
            .collect();
        for (width, cell) in widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count());
        }
        body.push(row);
    }

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format_row(&columns, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &body {
        lines.push(format_row(row, &widths));
    }
    lines
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use study_core::Rating;

    #[test]
    fn table_unions_columns_and_pads_cells() {
        let rows = vec![
            json!({"id": "card-1", "word": "별"}),
            json!({"id": "card-22", "definition": "tree"}),
        ];
        let lines = table_lines(&rows);
        assert_eq!(lines[0], "id       word  definition");
        assert_eq!(lines[1], "-------  ----  ----------");
        assert_eq!(lines[2], "card-1   별");
        assert_eq!(lines[3], "card-22        tree");
    }

    #[test]
    fn non_object_rows_print_as_a_plain_list() {
        let rows = vec![json!("first"), json!("second")];
        assert_eq!(table_lines(&rows), ["first", "second"]);
    }

    #[test]
    fn empty_rows_print_a_placeholder() {
        assert_eq!(table_lines(&[]), ["(none)"]);
    }

    #[test]
    fn numbers_and_booleans_render_compactly() {
        let rows = vec![json!({"n": 3, "ok": true})];
        let lines = table_lines(&rows);
        assert_eq!(lines[2], "3  true");
    }

    #[test]
    fn summary_reports_counts_average_and_breakdown() {
        let summary = SessionSummary::from_grades(&[
            Rating::Good,
            Rating::Good,
            Rating::Easy,
            Rating::Again,
        ]);
        assert_eq!(
            summary_lines(&summary),
            [
                "Session Summary:",
                "Cards reviewed: 4",
                "Average recall rating: 2.75",
                "Rating breakdown:",
                "  Again (Rated 1): 1 time(s)",
                "  Good (Rated 3): 2 time(s)",
                "  Easy (Rated 4): 1 time(s)",
            ]
        );
    }

    #[test]
    fn summary_renders_a_whole_number_average_with_two_decimals() {
        let summary = SessionSummary::from_grades(&[Rating::Good]);
        assert!(summary_lines(&summary).contains(&"Average recall rating: 3.00".to_string()));
    }

    #[test]
    fn empty_summary_reports_no_reviews() {
        let summary = SessionSummary::from_grades(&[]);
        assert_eq!(
            summary_lines(&summary),
            ["No cards were reviewed this session."]
        );
    }
}
