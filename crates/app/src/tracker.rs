//! Request-scoped observation of option reads.
//!
//! A [`RequestScope`] loads the persisted usage record when a request
//! starts, counts reads through [`RequestScope::get_option`], and writes the
//! accumulated view back in [`RequestScope::finish`]. Concurrent scopes do
//! not coordinate: each one writes the mapping it accumulated, so the last
//! request to finish wins and counts can be lost. The numbers are a
//! profiling signal, not an audit trail.

use std::collections::BTreeMap;

use optimizer_core::{OptionEntry, USAGE_RECORD_OPTION, UsageRecord};
use optimizer_db::Db;

use crate::error::Result;
use crate::util::time::starting_point_now;

/// Receives the two store events the tracker cares about.
pub trait OptionAccessObserver {
    /// An existing entry was read.
    fn option_read(&mut self, name: &str);
    /// A read found nothing and the caller fell back to a default.
    fn option_defaulted(&mut self, name: &str);
}

/// In-memory read counts for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageTracker {
    accessed: BTreeMap<String, u64>,
    should_reset: bool,
    dirty: bool,
}

impl UsageTracker {
    pub fn new(accessed: BTreeMap<String, u64>) -> Self {
        Self {
            accessed,
            should_reset: false,
            dirty: false,
        }
    }

    pub fn from_record(record: Option<UsageRecord>) -> Self {
        Self::new(record.map(|record| record.used_options).unwrap_or_default())
    }

    pub fn count(&self, name: &str) -> Option<u64> {
        self.accessed.get(name).copied()
    }

    /// Clears the persisted record when this request finishes.
    pub fn request_reset(&mut self) {
        self.should_reset = true;
    }

    pub fn should_reset(&self) -> bool {
        self.should_reset
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the record's mapping with this request's view.
    pub fn apply_to(&self, record: &mut UsageRecord) {
        if self.should_reset {
            record.used_options.clear();
            record.starting_point_date = starting_point_now();
        } else {
            record.used_options = self.accessed.clone();
        }
    }
}

impl OptionAccessObserver for UsageTracker {
    fn option_read(&mut self, name: &str) {
        *self.accessed.entry(name.to_string()).or_insert(0) += 1;
        self.dirty = true;
    }

    fn option_defaulted(&mut self, name: &str) {
        if self.accessed.remove(name).is_some() {
            self.dirty = true;
        }
    }
}

/// Reads one entry and reports the outcome to `observer`.
pub fn read_option(
    db: &Db,
    name: &str,
    observer: &mut dyn OptionAccessObserver,
) -> Result<Option<OptionEntry>> {
    let entry = db.get_option(name)?;
    match entry {
        Some(_) => observer.option_read(name),
        None => observer.option_defaulted(name),
    }
    Ok(entry)
}

/// Everything one request needs to observe reads and persist them at the end.
pub struct RequestScope {
    db: Db,
    tracker: UsageTracker,
    persist: bool,
}

impl RequestScope {
    pub(crate) fn begin(db: Db) -> Result<Self> {
        let tracker = UsageTracker::from_record(db.load_usage_record()?);
        Ok(Self {
            db,
            tracker,
            persist: true,
        })
    }

    /// Reads made during admin page views are never persisted. A requested
    /// reset still is.
    pub fn skip_persistence(&mut self) {
        self.persist = false;
    }

    pub fn get_option(&mut self, name: &str) -> Result<Option<OptionEntry>> {
        read_option(&self.db, name, &mut self.tracker)
    }

    pub fn request_reset(&mut self) {
        self.tracker.request_reset();
    }

    pub fn tracker(&self) -> &UsageTracker {
        &self.tracker
    }

    /// Persists the request's view. Returns whether anything was written.
    pub fn finish(self) -> Result<bool> {
        if !self.persist && !self.tracker.should_reset() {
            tracing::debug!("skipping usage persistence for admin view");
            return Ok(false);
        }
        if !self.tracker.should_reset() && !self.tracker.is_dirty() {
            return Ok(false);
        }
        let mut record = self
            .db
            .load_usage_record()?
            .unwrap_or_else(|| UsageRecord::new(starting_point_now()));
        self.tracker.apply_to(&mut record);
        self.db.save_usage_record(&record, true)?;
        tracing::debug!(
            option = USAGE_RECORD_OPTION,
            tracked = record.used_options.len(),
            reset = self.tracker.should_reset(),
            "persisted usage record"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_count_up_from_one() {
        let mut tracker = UsageTracker::default();
        tracker.option_read("siteurl");
        tracker.option_read("siteurl");
        tracker.option_read("home");
        assert_eq!(tracker.count("siteurl"), Some(2));
        assert_eq!(tracker.count("home"), Some(1));
        assert!(tracker.is_dirty());
    }

    #[test]
    fn default_event_removes_counted_name() {
        let mut tracker = UsageTracker::default();
        tracker.option_read("ghost");
        tracker.option_defaulted("ghost");
        assert_eq!(tracker.count("ghost"), None);
    }

    #[test]
    fn default_event_for_unknown_name_is_not_a_change() {
        let mut tracker = UsageTracker::new(BTreeMap::new());
        tracker.option_defaulted("never_seen");
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn apply_replaces_mapping_or_clears_on_reset() {
        let mut record = UsageRecord::new("2024-01-01 00:00:00");
        record.used_options.insert("stale".to_string(), 5);

        let mut tracker = UsageTracker::default();
        tracker.option_read("fresh");
        tracker.apply_to(&mut record);
        assert_eq!(record.count("fresh"), Some(1));
        assert_eq!(record.count("stale"), None);
        assert_eq!(record.starting_point_date, "2024-01-01 00:00:00");

        tracker.request_reset();
        tracker.apply_to(&mut record);
        assert!(record.is_empty());
        assert_ne!(record.starting_point_date, "2024-01-01 00:00:00");
    }
}
