use std::collections::{BTreeMap, BTreeSet};

/// Loaded but never read.
pub fn unused_names(
    autoloaded: &BTreeSet<String>,
    used: &BTreeMap<String, u64>,
) -> BTreeSet<String> {
    autoloaded
        .iter()
        .filter(|name| !used.contains_key(*name))
        .cloned()
        .collect()
}

/// Read during tracking but not eagerly loaded, with read counts.
pub fn used_not_autoloaded_names(
    autoloaded: &BTreeSet<String>,
    used: &BTreeMap<String, u64>,
) -> BTreeMap<String, u64> {
    used.iter()
        .filter(|(name, _)| !autoloaded.contains(*name))
        .map(|(name, count)| (name.clone(), *count))
        .collect()
}

pub fn used_and_autoloaded_names(
    autoloaded: &BTreeSet<String>,
    used: &BTreeMap<String, u64>,
) -> BTreeMap<String, u64> {
    used.iter()
        .filter(|(name, _)| autoloaded.contains(*name))
        .map(|(name, count)| (name.clone(), *count))
        .collect()
}

/// Candidates that are absent from the store's current key set.
pub fn missing_names(
    candidates: &BTreeMap<String, u64>,
    existing: &BTreeSet<String>,
) -> BTreeMap<String, u64> {
    candidates
        .iter()
        .filter(|(name, _)| !existing.contains(*name))
        .map(|(name, count)| (name.clone(), *count))
        .collect()
}

/// The three-way split of autoloaded and read names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub unused: BTreeSet<String>,
    pub used_not_autoloaded: BTreeMap<String, u64>,
    pub used_autoloaded: BTreeMap<String, u64>,
}

impl Reconciliation {
    pub fn compute(autoloaded: &BTreeSet<String>, used: &BTreeMap<String, u64>) -> Self {
        Self {
            unused: unused_names(autoloaded, used),
            used_not_autoloaded: used_not_autoloaded_names(autoloaded, used),
            used_autoloaded: used_and_autoloaded_names(autoloaded, used),
        }
    }
}
