//! The state table, its name index, and the query and mutation operations.

use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::warn;

use super::error::TableError;
use super::record::StateRecord;

/// Name to table position. The first occurrence of a name wins.
pub type NameIndex = HashMap<String, usize>;

/// Ordered, fixed-length table of state records.
///
/// Rows keep file order and are never inserted, removed, or reordered.
/// The only mutation is [`StateTable::update_population`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTable {
    records: Vec<StateRecord>,
    index: NameIndex,
}

impl StateTable {
    /// Build a table from records in their source order.
    pub fn from_records(records: Vec<StateRecord>) -> Self {
        let mut index = NameIndex::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if let Some(first) = index.get(&record.name) {
                warn!(
                    name = %record.name,
                    first,
                    duplicate = position,
                    "duplicate state name; lookups resolve to the first row"
                );
                continue;
            }
            index.insert(record.name.clone(), position);
        }
        Self { records, index }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of `name` in table order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// All records in table order.
    pub fn list_all(&self) -> &[StateRecord] {
        &self.records
    }

    /// Case-sensitive, exact-match lookup.
    pub fn find_by_name(&self, name: &str) -> Result<&StateRecord, TableError> {
        self.position(name)
            .map(|position| &self.records[position])
            .ok_or_else(|| TableError::NotFound(name.to_string()))
    }

    /// The `n` most populous records, largest first.
    ///
    /// Sorts on every call. Ties keep table order.
    pub fn top_n_by_population(&self, n: usize) -> Vec<&StateRecord> {
        let mut ranked: Vec<&StateRecord> = self.records.iter().collect();
        ranked.sort_by_key(|record| Reverse(record.population));
        ranked.truncate(n);
        ranked
    }

    /// 1-based population rank of `name`, counting ties by table order.
    pub fn population_rank(&self, name: &str) -> Option<usize> {
        let position = self.position(name)?;
        let target = &self.records[position];
        let ahead = self
            .records
            .iter()
            .enumerate()
            .filter(|(other, record)| {
                record.population > target.population
                    || (record.population == target.population && *other < position)
            })
            .count();
        Some(ahead + 1)
    }

    /// Set the population of `name` in place.
    ///
    /// Both the name and the value are checked before anything is written.
    pub fn update_population(
        &mut self,
        name: &str,
        value: i64,
    ) -> Result<&StateRecord, TableError> {
        let position = self
            .position(name)
            .ok_or_else(|| TableError::UnknownState(name.to_string()))?;
        let population = u64::try_from(value).map_err(|_| TableError::InvalidPopulation {
            value: value.to_string(),
            reason: "must not be negative",
        })?;
        let record = &mut self.records[position];
        record.population = population;
        Ok(record)
    }
}
