use serde::Serialize;

use crate::grid::{GridRow, SortValue};
use crate::option::{OptionEntry, autoload_label, row_id};

/// One option as shown in the report grids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionRow {
    pub name: String,
    pub plugin: String,
    pub value: String,
    pub size: f64,
    pub autoload: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    pub row_id: String,
}

impl OptionRow {
    pub fn from_entry(entry: &OptionEntry, plugin: &str, count: Option<u64>) -> Self {
        Self {
            name: entry.name.clone(),
            plugin: plugin.to_string(),
            value: entry.display_value(),
            size: entry.size_kb(),
            autoload: autoload_label(entry.autoload).to_string(),
            count,
            row_id: row_id(&entry.name),
        }
    }
}

impl GridRow for OptionRow {
    const SORTABLE: &'static [&'static str] = &["name", "plugin", "size", "count"];

    fn sort_value(&self, column: &str) -> Option<SortValue<'_>> {
        match column {
            "name" => Some(SortValue::Text(&self.name)),
            "plugin" => Some(SortValue::Text(&self.plugin)),
            "size" => Some(SortValue::Number(self.size)),
            "count" => self.count.map(|count| SortValue::Number(count as f64)),
            _ => None,
        }
    }
}

/// A name that was read but is absent from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingOptionRow {
    pub name: String,
    pub plugin: String,
    pub count: u64,
    pub option_name: String,
    pub row_id: String,
}

impl MissingOptionRow {
    pub fn new(name: &str, plugin: &str, count: u64) -> Self {
        Self {
            name: name.to_string(),
            plugin: plugin.to_string(),
            count,
            option_name: name.to_string(),
            row_id: row_id(name),
        }
    }
}

impl GridRow for MissingOptionRow {
    const SORTABLE: &'static [&'static str] = &["name", "plugin", "count"];

    fn sort_value(&self, column: &str) -> Option<SortValue<'_>> {
        match column {
            "name" => Some(SortValue::Text(&self.name)),
            "plugin" => Some(SortValue::Text(&self.plugin)),
            "count" => Some(SortValue::Number(self.count as f64)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionsDump {
    pub data: Vec<OptionRow>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::grid::{GridQuery, SortDirection, sort_rows};

    fn row(name: &str, count: Option<u64>) -> OptionRow {
        OptionRow::from_entry(&OptionEntry::new(name, json!("v"), true), "Unknown", count)
    }

    #[test]
    fn count_sort_without_counts_falls_back_to_name() {
        let mut rows = vec![row("beta", None), row("Alpha", None), row("gamma", None)];
        let query = GridQuery {
            order_column: "count".to_string(),
            order_dir: SortDirection::Desc,
            ..GridQuery::default()
        };
        let column = query.sort_column_for(&rows).to_string();
        assert_eq!(column, "name");
        sort_rows(&mut rows, &column, query.order_dir);
        let names: Vec<_> = rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["gamma", "beta", "Alpha"]);
    }

    #[test]
    fn count_sort_uses_counts_when_present() {
        let rows = vec![row("a", Some(3)), row("b", Some(1))];
        let query = GridQuery {
            order_column: "count".to_string(),
            ..GridQuery::default()
        };
        assert_eq!(query.sort_column_for(&rows), "count");
    }
}
