mod grid;
mod option;
mod reconcile;
mod rows;
mod sources;
mod usage;

pub use grid::{
    GridPage, GridQuery, GridRow, SortDirection, SortValue, DEFAULT_PAGE_LENGTH, MAX_PAGE_LENGTH,
    matches_search, natural_cmp, page_window, sort_rows,
};
pub use option::{
    AUTOLOAD_VALUES, OptionEntry, autoload_label, parse_autoload, row_id,
};
pub use reconcile::{
    Reconciliation, missing_names, unused_names, used_and_autoloaded_names,
    used_not_autoloaded_names,
};
pub use rows::{MissingOptionRow, OptionRow, OptionsDump};
pub use sources::{SourceMap, UNKNOWN_SOURCE};
pub use usage::{USAGE_RECORD_OPTION, UsageRecord};
