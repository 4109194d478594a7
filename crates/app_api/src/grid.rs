use std::collections::HashMap;

use optimizer_app::{AppError, Result};
use optimizer_core::{DEFAULT_PAGE_LENGTH, GridQuery, MAX_PAGE_LENGTH, SortDirection};

/// Parses the grid widget's flat query parameters (`draw`, `start`,
/// `length`, `search[value]`, `order[0][column]`, `order[0][dir]`,
/// `columns[i][data]`) into a [`GridQuery`].
pub fn parse_grid_query(params: &HashMap<String, String>) -> Result<GridQuery> {
    let draw = parse_number::<u64>(params, "draw")?.unwrap_or(0);
    let start = parse_number::<usize>(params, "start")?.unwrap_or(0);
    let length = match parse_number::<i64>(params, "length")? {
        None => Some(DEFAULT_PAGE_LENGTH),
        Some(-1) => None,
        Some(value) if value < 0 => {
            return Err(AppError::InvalidInput(format!("invalid length {value}")));
        }
        Some(value) => Some((value as usize).min(MAX_PAGE_LENGTH)),
    };
    let search = params
        .get("search[value]")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let order_dir = match params.get("order[0][dir]") {
        Some(raw) => SortDirection::parse(raw)
            .ok_or_else(|| AppError::InvalidInput(format!("invalid sort direction {raw}")))?,
        None => SortDirection::Asc,
    };

    Ok(GridQuery {
        draw,
        start,
        length,
        search,
        order_column: order_column(params)?,
        order_dir,
    })
}

fn order_column(params: &HashMap<String, String>) -> Result<String> {
    if let Some(index) = parse_number::<usize>(params, "order[0][column]")? {
        if let Some(data) = params
            .get(&format!("columns[{index}][data]"))
            .map(|data| data.trim())
            .filter(|data| !data.is_empty())
        {
            return Ok(data.to_string());
        }
    }
    Ok(params
        .get("order[0][name]")
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or("name")
        .to_string())
}

fn parse_number<T: std::str::FromStr>(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>> {
    match params.get(key).map(|value| value.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::InvalidInput(format!("invalid {key} value {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_nothing_is_sent() {
        let query = parse_grid_query(&HashMap::new()).expect("query");
        assert_eq!(query, GridQuery::default());
    }

    #[test]
    fn resolves_order_column_through_column_index() {
        let query = parse_grid_query(&params(&[
            ("draw", "4"),
            ("start", "10"),
            ("length", "5"),
            ("search[value]", " seo "),
            ("order[0][column]", "2"),
            ("order[0][dir]", "DESC"),
            ("columns[0][data]", "name"),
            ("columns[1][data]", "plugin"),
            ("columns[2][data]", "size"),
        ]))
        .expect("query");
        assert_eq!(query.draw, 4);
        assert_eq!(query.start, 10);
        assert_eq!(query.length, Some(5));
        assert_eq!(query.search.as_deref(), Some("seo"));
        assert_eq!(query.order_column, "size");
        assert_eq!(query.order_dir, SortDirection::Desc);
    }

    #[test]
    fn length_minus_one_means_everything_and_large_values_are_capped() {
        let query = parse_grid_query(&params(&[("length", "-1")])).expect("query");
        assert_eq!(query.length, None);
        let query = parse_grid_query(&params(&[("length", "50000")])).expect("query");
        assert_eq!(query.length, Some(MAX_PAGE_LENGTH));
    }

    #[test]
    fn rejects_malformed_numbers_and_directions() {
        assert!(parse_grid_query(&params(&[("start", "ten")])).is_err());
        assert!(parse_grid_query(&params(&[("length", "-3")])).is_err());
        assert!(parse_grid_query(&params(&[("order[0][dir]", "up")])).is_err());
    }

    #[test]
    fn missing_column_definition_falls_back_to_name() {
        let query = parse_grid_query(&params(&[("order[0][column]", "9")])).expect("query");
        assert_eq!(query.order_column, "name");
    }

    #[test]
    fn column_data_wins_over_column_name() {
        let query = parse_grid_query(&params(&[
            ("order[0][column]", "1"),
            ("order[0][name]", "source"),
            ("columns[1][data]", "plugin"),
        ]))
        .expect("query");
        assert_eq!(query.order_column, "plugin");
    }

    #[test]
    fn column_name_is_used_without_an_index() {
        let query = parse_grid_query(&params(&[("order[0][name]", "size")])).expect("query");
        assert_eq!(query.order_column, "size");
    }
}
