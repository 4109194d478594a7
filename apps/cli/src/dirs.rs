use std::path::PathBuf;

const DATA_DIR_NAME: &str = "option-optimizer";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

/// Picks the data dir: an explicit choice wins, then `$XDG_DATA_HOME`, then
/// `~/.local/share`.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<DataDirResolution, String> {
    let dir = match explicit {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let matched_existing = dir.exists();
    Ok(DataDirResolution {
        dir,
        matched_existing,
    })
}

fn default_data_dir() -> Result<PathBuf, String> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(xdg).join(DATA_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join(DATA_DIR_NAME))
}
