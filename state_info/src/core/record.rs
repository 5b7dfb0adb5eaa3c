//! The `StateRecord` row type and population input parsing.

use serde::{Deserialize, Serialize};

use super::error::TableError;

/// One row of the state table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub name: String,
    pub capital: String,
    pub population: u64,
    pub flower: String,
}

impl StateRecord {
    pub fn new(
        name: impl Into<String>,
        capital: impl Into<String>,
        population: u64,
        flower: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            capital: capital.into(),
            population,
            flower: flower.into(),
        }
    }

    /// Field values in column order, formatted for display.
    pub fn cells(&self) -> [String; 4] {
        [
            self.name.clone(),
            self.capital.clone(),
            self.population.to_string(),
            self.flower.clone(),
        ]
    }
}

/// Parse user-typed population input.
///
/// Only integers are accepted. Range checks happen in
/// [`StateTable::update_population`](super::table::StateTable::update_population)
/// so that negative values are reported the same way whichever path they take.
pub fn parse_population(raw: &str) -> Result<i64, TableError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| TableError::InvalidPopulation {
            value: trimmed.to_string(),
            reason: "not an integer",
        })
}
