use chrono::Local;

/// Local wall-clock time in the store's `YYYY-MM-DD HH:MM:SS` format.
pub fn starting_point_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
