// crates/mastdup-core/src/display.rs

//! Plain-text tables for the terminal.

use crate::model::ObservationRecord;
use crate::survey::TargetCountMap;
use crate::text::truncate;
use std::fmt::Write;

/// Placeholder for absent values.
pub const MISSING: &str = "--";

/// Default cap on cell width; long titles get `...`.
pub const DEFAULT_MAX_CELL_WIDTH: usize = 40;

fn format_line(cells: &[&str], widths: &[usize]) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{c:<w$}", w = *w))
        .collect();
    parts.join("  ").trim_end().to_string()
}

/// Left-aligned fixed-width table with a dashed rule under the header.
fn render_grid(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", format_line(header, &widths));
    let _ = writeln!(out, "{}", format_line(&rule, &widths));
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        let _ = writeln!(out, "{}", format_line(&cells, &widths));
    }
    out
}

/// Render `records` with the given columns, one line per record.
pub fn render_table(
    records: &[ObservationRecord],
    columns: &[&str],
    max_cell_width: usize,
) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            columns
                .iter()
                .map(|c| {
                    let value = r.field(c).unwrap_or_else(|| MISSING.to_string());
                    truncate(&value, max_cell_width)
                })
                .collect()
        })
        .collect();
    render_grid(columns, &rows)
}

/// Two-column `target | count` table.
pub fn render_counts(counts: &TargetCountMap) -> String {
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|(target, n)| vec![target.to_string(), n.to_string()])
        .collect();
    render_grid(&["target", "count"], &rows)
}
