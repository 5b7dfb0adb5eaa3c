//! Plain-text rendering of records, tables, and population charts.

use std::fmt::Write;

use crate::core::record::StateRecord;

const COLUMN_GAP: usize = 2;

/// Render rows with every cell padded to the widest cell in the table.
pub fn table<'a>(records: impl IntoIterator<Item = &'a StateRecord>) -> String {
    let rows: Vec<[String; 4]> = records.into_iter().map(StateRecord::cells).collect();
    let width = rows
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0)
        + COLUMN_GAP;
    let mut out = String::new();
    for row in &rows {
        let line: String = row.iter().map(|cell| format!("{cell:<width$}")).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Labelled view of a single record.
pub fn record(record: &StateRecord) -> String {
    format!(
        "State:      {}\nCapital:    {}\nPopulation: {}\nFlower:     {}\n",
        record.name, record.capital, record.population, record.flower
    )
}

/// Horizontal bar chart scaled so the largest population spans `width` cells.
pub fn bar_chart(records: &[&StateRecord], width: usize) -> String {
    let label_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);
    let max = records.iter().map(|r| r.population).max().unwrap_or(0);
    let mut out = String::new();
    for record in records {
        let bar = "#".repeat(bar_len(record.population, max, width));
        let _ = writeln!(
            out,
            "{:<label_width$} | {bar} {}",
            record.name, record.population
        );
    }
    out
}

fn bar_len(value: u64, max: u64, width: usize) -> usize {
    if max == 0 || value == 0 {
        return 0;
    }
    let scaled = (u128::from(value) * width as u128 + u128::from(max) / 2) / u128::from(max);
    (scaled as usize).max(1)
}
