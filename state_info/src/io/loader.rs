//! Record file loading: `name,capital,population,flower`, one row per line.

use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::core::error::LoadError;
use crate::core::record::StateRecord;
use crate::core::table::StateTable;

/// Read and parse the record file at `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<StateTable, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_table(&contents)?;
    info!(rows = table.len(), "state table loaded");
    Ok(table)
}

/// Parse record file contents into a typed table.
///
/// Blank lines are skipped. Every other line must carry exactly four
/// comma-separated fields with an integer population.
pub fn parse_table(contents: &str) -> Result<StateTable, LoadError> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut records = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            debug!(line, "skipping blank line");
            continue;
        }
        records.push(parse_row(line, raw)?);
    }
    Ok(StateTable::from_records(records))
}

fn parse_row(line: usize, raw: &str) -> Result<StateRecord, LoadError> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
    let &[name, capital, population, flower] = fields.as_slice() else {
        return Err(LoadError::FieldCount {
            line,
            found: fields.len(),
        });
    };
    if name.is_empty() {
        return Err(LoadError::EmptyName { line });
    }
    let population = population
        .parse::<u64>()
        .map_err(|source| LoadError::Population {
            line,
            value: population.to_string(),
            source,
        })?;
    Ok(StateRecord::new(name, capital, population, flower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, SAMPLE_CSV, sample_table};

    #[test]
    fn parses_rows_in_file_order() {
        let table = parse_table(SAMPLE_CSV).expect("parse");
        assert_eq!(table, sample_table());
    }

    #[test]
    fn skips_blank_lines_and_handles_crlf_and_bom() {
        let contents = "\u{feff}Ohio,Columbus,11799448,Scarlet Carnation\r\n\r\n   \nTexas, Austin ,29145505,Bluebonnet\r\n";
        let table = parse_table(contents).expect("parse");
        assert_eq!(table.len(), 2);
        let texas = table.find_by_name("Texas").expect("texas");
        assert_eq!(texas.capital, "Austin");
        assert_eq!(table.list_all()[0].name, "Ohio");
    }

    #[test]
    fn empty_contents_yield_empty_table() {
        let table = parse_table("\n\n").expect("parse");
        assert!(table.is_empty());
    }

    #[test]
    fn reports_field_count_with_line_number() {
        let err = parse_table("Ohio,Columbus,1,Carnation\n\nTexas,Austin,2\n").expect_err("short row");
        assert!(matches!(err, LoadError::FieldCount { line: 3, found: 3 }));
    }

    #[test]
    fn reports_non_numeric_population() {
        let err = parse_table("Ohio,Columbus,many,Carnation\n").expect_err("bad population");
        match err {
            LoadError::Population { line, value, .. } => {
                assert_eq!(line, 1);
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            parse_table("Ohio,Columbus,-4,Carnation\n"),
            Err(LoadError::Population { line: 1, .. })
        ));
    }

    #[test]
    fn reports_empty_name() {
        let err = parse_table(" ,Columbus,1,Carnation\n").expect_err("empty name");
        assert!(matches!(err, LoadError::EmptyName { line: 1 }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_table(&temp.path().join("missing.csv")).expect_err("missing");
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn loading_twice_is_deterministic() {
        let fixture = Fixture::sample().expect("fixture");
        let first = load_table(&fixture.data_path()).expect("first load");
        let second = load_table(&fixture.data_path()).expect("second load");
        assert_eq!(first.list_all(), second.list_all());
    }
}
