//! Annual mortality rates by integer age
//!
//! A table covers some subset of ages 0..=120. Ages the table does not list are
//! reported as missing; the survival model decides what to do with them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Highest age a table may carry (and the default terminal age of the engine)
pub const MAX_TABLE_AGE: u32 = 120;

/// Mortality table: qx by attained age, plus the identifier of its basis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityTable {
    /// Informational name of the mortality basis (e.g. "417e_2024_unisex")
    basis_id: String,

    /// Annual probability of death by integer age
    qx: BTreeMap<u32, f64>,
}

impl MortalityTable {
    /// Create from an explicit age -> qx map
    pub fn new(basis_id: impl Into<String>, qx: BTreeMap<u32, f64>) -> Self {
        Self {
            basis_id: basis_id.into(),
            qx,
        }
    }

    /// Create from a dense vector where index = age
    pub fn from_rates(basis_id: impl Into<String>, rates: &[f64]) -> Self {
        let qx = rates
            .iter()
            .enumerate()
            .map(|(age, &q)| (age as u32, q))
            .collect();
        Self::new(basis_id, qx)
    }

    pub fn basis_id(&self) -> &str {
        &self.basis_id
    }

    /// Annual mortality rate at `age`, if the table lists that age
    pub fn qx(&self, age: u32) -> Option<f64> {
        self.qx.get(&age).copied()
    }

    /// Lowest and highest ages present
    pub fn age_range(&self) -> Option<(u32, u32)> {
        let first = self.qx.keys().next()?;
        let last = self.qx.keys().next_back()?;
        Some((*first, *last))
    }

    /// (age, qx) pairs in ascending age order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.qx.iter().map(|(&age, &q)| (age, q))
    }

    pub fn len(&self) -> usize {
        self.qx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rates_indexes_by_age() {
        let table = MortalityTable::from_rates("test", &[0.01, 0.02, 0.03]);
        assert_eq!(table.basis_id(), "test");
        assert_eq!(table.qx(1), Some(0.02));
        assert_eq!(table.qx(3), None);
        assert_eq!(table.age_range(), Some((0, 2)));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_sparse_table() {
        let qx: BTreeMap<u32, f64> = [(65, 0.009), (66, 0.010)].into_iter().collect();
        let table = MortalityTable::new("sparse", qx);

        assert_eq!(table.qx(64), None);
        assert_eq!(table.qx(65), Some(0.009));
        assert_eq!(table.age_range(), Some((65, 66)));
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(65, 0.009), (66, 0.010)]);
        assert!(MortalityTable::new("empty", BTreeMap::new()).age_range().is_none());
    }
}
