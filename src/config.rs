//! Run configuration: `replaystat.toml`.
//!
//! The configuration is the whole runtime surface of the pipeline: which root
//! directory feeds each category, which filters and metrics run (in order),
//! where reports land, and whether metric failures are isolated. It is loaded
//! once at startup and never reloaded mid-run.

use crate::core::Category;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "replaystat.toml";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filters to apply, in order. Cheap filters belong first.
    pub filters: Vec<String>,
    /// Metrics to accumulate, in registration order.
    pub metrics: Vec<String>,
    /// Directory metric reports are written into.
    pub output_dir: PathBuf,
    /// Category key -> corpus root directory.
    pub roots: BTreeMap<String, PathBuf>,
    pub fault_handling: FaultHandling,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultHandling {
    /// Log-and-continue when a metric update fails. Off by default: an
    /// accumulator bug aborts the run rather than skewing results quietly.
    pub isolate_metric_failures: bool,
    /// Attempt every metric's save and report the failures together, instead
    /// of stopping at the first one.
    pub isolate_save_failures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filters: vec!["queen-opening".to_string()],
            metrics: vec![
                "games-analyzed".to_string(),
                "game-duration".to_string(),
                "result-by-color".to_string(),
                "opening-move".to_string(),
            ],
            output_dir: PathBuf::from("./reports"),
            roots: BTreeMap::from([("dumbot".to_string(), PathBuf::from("./plays/dumbot"))]),
            fault_handling: FaultHandling::default(),
        }
    }
}

impl Config {
    /// Resolve the `[roots]` table into typed categories.
    ///
    /// An unknown category key is a setup error, not a silent skip.
    pub fn resolved_roots(&self) -> Result<BTreeMap<Category, PathBuf>> {
        let mut roots = BTreeMap::new();
        for (key, path) in &self.roots {
            let category = Category::from_key(key).ok_or_else(|| {
                anyhow!(
                    "unknown category '{}' in [roots] (expected one of: {})",
                    key,
                    Category::ALL.map(|c| c.key()).join(", ")
                )
            })?;
            roots.insert(category, path.clone());
        }
        Ok(roots)
    }
}

fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).context("failed to parse replaystat.toml")?;
    // Name validation happens here so a typo aborts at setup, before any
    // file is parsed.
    for name in &config.filters {
        if crate::filters::filter_by_name(name).is_none() {
            return Err(anyhow!("unknown filter '{}' in configuration", name));
        }
    }
    for name in &config.metrics {
        if crate::metrics::metric_by_name(name, Path::new(".")).is_none() {
            return Err(anyhow!("unknown metric '{}' in configuration", name));
        }
    }
    config.resolved_roots()?;
    Ok(config)
}

/// Load configuration from an explicit path, or from `./replaystat.toml` when
/// present, or fall back to the defaults.
///
/// An explicit path that cannot be read is fatal; the implicit path is
/// optional and only logged.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let contents = read_config_file(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse_config(&contents)
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            match read_config_file(default_path) {
                Ok(contents) => {
                    log::debug!("loaded config from {}", default_path.display());
                    parse_config(&contents)
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    log::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Config::default())
                }
                Err(e) => Err(e).with_context(|| {
                    format!("failed to read config file {}", default_path.display())
                }),
            }
        }
    }
}

/// Default configuration rendered for `replaystat init`.
pub fn default_config_toml() -> String {
    let header = "# replaystat configuration\n\
                  #\n\
                  # [roots] maps corpus categories to directories; every file\n\
                  # reachable under a root is treated as a replay record of\n\
                  # that category. Valid keys: all, tournament, players, dumbot.\n";
    let body = toml::to_string_pretty(&Config::default())
        .unwrap_or_default();
    format!("{header}\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_a_full_config() {
        let config = parse_config(indoc! {r#"
            filters = ["queen-opening", "base-game"]
            metrics = ["games-analyzed"]
            output_dir = "./out"

            [roots]
            tournament = "./plays/tournament"
            dumbot = "./plays/dumbot"

            [fault_handling]
            isolate_metric_failures = true
        "#})
        .unwrap();

        assert_eq!(config.filters, vec!["queen-opening", "base-game"]);
        assert_eq!(config.metrics, vec!["games-analyzed"]);
        assert!(config.fault_handling.isolate_metric_failures);
        assert!(!config.fault_handling.isolate_save_failures);

        let roots = config.resolved_roots().unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots.contains_key(&Category::Tournament));
        assert!(roots.contains_key(&Category::BotVsHuman));
    }

    #[test]
    fn unknown_filter_name_is_a_setup_error() {
        let err = parse_config(r#"filters = ["no-such-filter"]"#).unwrap_err();
        assert!(err.to_string().contains("no-such-filter"));
    }

    #[test]
    fn unknown_metric_name_is_a_setup_error() {
        let err = parse_config(r#"metrics = ["no-such-metric"]"#).unwrap_err();
        assert!(err.to_string().contains("no-such-metric"));
    }

    #[test]
    fn unknown_category_key_is_a_setup_error() {
        let err = parse_config("[roots]\nreplays = \"./plays\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown category"));
    }

    #[test]
    fn default_config_round_trips() {
        let rendered = default_config_toml();
        let parsed = parse_config(&rendered).unwrap();
        assert_eq!(parsed.metrics.len(), 4);
    }
}
