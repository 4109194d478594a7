use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

pub const UNKNOWN_SOURCE: &str = "Unknown";

const BUILTIN_KNOWN_PLUGINS: &str = include_str!("known_plugins.json");

#[derive(Debug, Deserialize)]
struct KnownPlugin {
    name: Option<String>,
    #[serde(default)]
    option_prefixes: Vec<String>,
}

/// Ordered prefix table mapping option names to the plugin that owns them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    prefixes: Vec<(String, String)>,
}

impl SourceMap {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let plugins: Vec<KnownPlugin> = serde_json::from_str(json)?;
        let prefixes = plugins
            .into_iter()
            .filter_map(|plugin| plugin.name.map(|name| (name, plugin.option_prefixes)))
            .flat_map(|(name, prefixes)| {
                prefixes
                    .into_iter()
                    .map(move |prefix| (prefix, name.clone()))
            })
            .collect();
        Ok(Self { prefixes })
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(std::io::Error::other)
    }

    /// Table shipped with the crate, parsed on first use.
    pub fn builtin() -> &'static SourceMap {
        static BUILTIN: OnceLock<SourceMap> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::from_json(BUILTIN_KNOWN_PLUGINS).unwrap_or_default())
    }

    pub fn resolve(&self, name: &str) -> &str {
        self.prefixes
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix.as_str()))
            .map(|(_, label)| label.as_str())
            .unwrap_or(UNKNOWN_SOURCE)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses() {
        let map = SourceMap::builtin();
        assert!(!map.is_empty());
        assert_eq!(map.resolve("wpseo_titles"), "Yoast SEO");
        assert_eq!(map.resolve("woocommerce_version"), "WooCommerce");
    }

    #[test]
    fn first_matching_prefix_wins() {
        let map = SourceMap::from_json(
            r#"[
                {"name": "Short", "option_prefixes": ["foo"]},
                {"name": "Long", "option_prefixes": ["foo_bar"]}
            ]"#,
        )
        .expect("parse");
        assert_eq!(map.resolve("foo_bar_baz"), "Short");
    }

    #[test]
    fn unnamed_plugins_and_misses_resolve_unknown() {
        let map = SourceMap::from_json(
            r#"[{"option_prefixes": ["ghost_"]}, {"name": "Real", "option_prefixes": ["real_"]}]"#,
        )
        .expect("parse");
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("ghost_setting"), UNKNOWN_SOURCE);
        assert_eq!(map.resolve("real_setting"), "Real");
        assert_eq!(map.resolve("xyz"), UNKNOWN_SOURCE);
    }
}
