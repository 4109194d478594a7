use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LENGTH: usize = 25;
pub const MAX_PAGE_LENGTH: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Paging, sorting and search parameters for one grid draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridQuery {
    pub draw: u64,
    pub start: usize,
    /// `None` returns every row after `start`.
    pub length: Option<usize>,
    pub search: Option<String>,
    pub order_column: String,
    pub order_dir: SortDirection,
}

impl Default for GridQuery {
    fn default() -> Self {
        Self {
            draw: 0,
            start: 0,
            length: Some(DEFAULT_PAGE_LENGTH),
            search: None,
            order_column: "name".to_string(),
            order_dir: SortDirection::Asc,
        }
    }
}

impl GridQuery {
    /// The requested column if `T` can sort by it and every row carries a
    /// value for it, `name` otherwise.
    pub fn sort_column_for<T: GridRow>(&self, rows: &[T]) -> &str {
        let column = self.order_column.as_str();
        let orderable = T::SORTABLE.contains(&column)
            && rows.iter().all(|row| row.sort_value(column).is_some());
        if orderable { column } else { "name" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridPage<T> {
    pub draw: u64,
    #[serde(rename = "recordsTotal")]
    pub records_total: usize,
    #[serde(rename = "recordsFiltered")]
    pub records_filtered: usize,
    pub data: Vec<T>,
}

impl<T> GridPage<T> {
    pub fn empty(draw: u64) -> Self {
        Self {
            draw,
            records_total: 0,
            records_filtered: 0,
            data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Number(f64),
    Text(&'a str),
}

pub trait GridRow {
    const SORTABLE: &'static [&'static str];

    fn sort_value(&self, column: &str) -> Option<SortValue<'_>>;
}

fn compare_values(a: Option<SortValue<'_>>, b: Option<SortValue<'_>>) -> Ordering {
    match (a, b) {
        (Some(SortValue::Number(a)), Some(SortValue::Number(b))) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(SortValue::Text(a)), Some(SortValue::Text(b))) => natural_cmp(a, b),
        _ => Ordering::Equal,
    }
}

pub fn sort_rows<T: GridRow>(rows: &mut [T], column: &str, dir: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = compare_values(a.sort_value(column), b.sort_value(column));
        match dir {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

pub fn page_window<T>(rows: Vec<T>, start: usize, length: Option<usize>) -> Vec<T> {
    let iter = rows.into_iter().skip(start);
    match length {
        Some(length) => iter.take(length).collect(),
        None => iter.collect(),
    }
}

pub fn matches_search(name: &str, search: Option<&str>) -> bool {
    match search.map(str::trim).filter(|needle| !needle.is_empty()) {
        Some(needle) => name.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Case-insensitive natural ordering: digit runs compare by numeric value.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = compare_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(ch) = chars.peek().copied() {
        if !ch.is_ascii_digit() {
            break;
        }
        run.push(ch);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
