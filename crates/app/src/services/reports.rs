use std::collections::BTreeSet;
use std::sync::Arc;

use optimizer_core::{
    GridPage, GridQuery, GridRow, MissingOptionRow, OptionRow, OptionsDump, SourceMap,
    USAGE_RECORD_OPTION, UsageRecord, matches_search, missing_names, page_window, sort_rows,
    unused_names, used_not_autoloaded_names,
};
use optimizer_db::Db;

use crate::error::Result;
use crate::services::{SharedConfig, open_db};

/// Reconciles autoloaded entries against the usage record.
#[derive(Clone)]
pub struct ReportsService {
    config: SharedConfig,
    sources: Arc<SourceMap>,
}

impl ReportsService {
    pub(super) fn new(config: SharedConfig, sources: Arc<SourceMap>) -> Self {
        Self { config, sources }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn source_of(&self, name: &str) -> &str {
        self.sources.resolve(name)
    }

    /// Autoloaded entries that were never read.
    pub fn unused_options(&self, query: &GridQuery) -> Result<GridPage<OptionRow>> {
        let db = self.db()?;
        let usage = load_usage(&db)?;
        if usage.is_empty() {
            return Ok(GridPage::empty(query.draw));
        }
        let autoloaded = tracked_autoloaded(&db)?;
        let names = unused_names(&autoloaded, &usage.used_options);
        let total = names.len();
        let filtered = filter_names(names.iter(), query);
        let rows = db
            .options_by_names(&filtered)?
            .iter()
            .map(|entry| OptionRow::from_entry(entry, self.source_of(&entry.name), None))
            .collect();
        Ok(build_page(query, total, rows))
    }

    /// Entries that were read but are not autoloaded, with their read counts.
    pub fn used_not_autoloaded(&self, query: &GridQuery) -> Result<GridPage<OptionRow>> {
        let db = self.db()?;
        let usage = load_usage(&db)?;
        if usage.is_empty() {
            return Ok(GridPage::empty(query.draw));
        }
        let autoloaded = tracked_autoloaded(&db)?;
        let candidates = used_not_autoloaded_names(&autoloaded, &usage.used_options);
        let candidate_names: Vec<String> = candidates.keys().cloned().collect();
        let existing = db.existing_option_names(&candidate_names)?;
        let total = existing.len();
        let filtered = filter_names(existing.iter(), query);
        let rows = db
            .options_by_names(&filtered)?
            .iter()
            .map(|entry| {
                let count = candidates.get(&entry.name).copied();
                OptionRow::from_entry(entry, self.source_of(&entry.name), count)
            })
            .collect();
        Ok(build_page(query, total, rows))
    }

    /// Names that were read but do not exist in the store.
    pub fn options_that_do_not_exist(
        &self,
        query: &GridQuery,
    ) -> Result<GridPage<MissingOptionRow>> {
        let db = self.db()?;
        let usage = load_usage(&db)?;
        if usage.is_empty() {
            return Ok(GridPage::empty(query.draw));
        }
        let autoloaded = tracked_autoloaded(&db)?;
        let candidates = used_not_autoloaded_names(&autoloaded, &usage.used_options);
        let candidate_names: Vec<String> = candidates.keys().cloned().collect();
        let existing = db.existing_option_names(&candidate_names)?;
        let missing = missing_names(&candidates, &existing);
        let total = missing.len();
        let rows = missing
            .iter()
            .filter(|(name, _)| matches_search(name, query.search.as_deref()))
            .map(|(name, count)| MissingOptionRow::new(name, self.source_of(name), *count))
            .collect();
        Ok(build_page(query, total, rows))
    }

    /// Every entry except the usage record itself, sorted by name.
    pub fn all_options(&self) -> Result<OptionsDump> {
        let db = self.db()?;
        let data = db
            .all_options()?
            .iter()
            .filter(|entry| entry.name != USAGE_RECORD_OPTION)
            .map(|entry| OptionRow::from_entry(entry, self.source_of(&entry.name), None))
            .collect();
        Ok(OptionsDump { data })
    }
}

/// Reads of the usage record's own entry are not reported.
fn load_usage(db: &Db) -> Result<UsageRecord> {
    let mut usage = db.load_usage_record()?.unwrap_or_default();
    usage.used_options.remove(USAGE_RECORD_OPTION);
    Ok(usage)
}

/// The usage record's own entry is bookkeeping, not a candidate for reports.
fn tracked_autoloaded(db: &Db) -> Result<BTreeSet<String>> {
    let mut names = db.autoloaded_option_names()?;
    names.remove(USAGE_RECORD_OPTION);
    Ok(names)
}

fn filter_names<'a>(names: impl Iterator<Item = &'a String>, query: &GridQuery) -> Vec<String> {
    names
        .filter(|name| matches_search(name, query.search.as_deref()))
        .cloned()
        .collect()
}

fn build_page<T: GridRow>(query: &GridQuery, total: usize, mut rows: Vec<T>) -> GridPage<T> {
    let filtered = rows.len();
    let column = query.sort_column_for(&rows).to_string();
    sort_rows(&mut rows, &column, query.order_dir);
    GridPage {
        draw: query.draw,
        records_total: total,
        records_filtered: filtered,
        data: page_window(rows, query.start, query.length),
    }
}
