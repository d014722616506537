// Runtime configuration.
// Merges command-line/environment arguments with the optional JSON config file.

mod cli;


use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::cache::{WorkspacePaths, read_text};
use crate::render::DEFAULT_DATE_FORMAT;

pub use cli::CliArgs;

/// Feed used when neither the config file nor the environment names one.
pub const DEFAULT_RSS_URL: &str = "https://www.erinmikailstaples.com/rss/";

/// Contents of `.github/readme.config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub blog: BlogConfig,
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub rss_url: Option<String>,
    pub max_items: usize,
    pub date_format: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            rss_url: None,
            max_items: 5,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub recent_days_window: i64,
    pub max_languages: usize,
    pub max_frameworks: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            recent_days_window: 90,
            max_languages: 6,
            max_frameworks: 6,
        }
    }
}

impl FileConfig {
    /// Load the config file; a missing or invalid file yields defaults.
    pub fn load(path: &Path) -> Self {
        let contents = match read_text(path) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read config file, using defaults");
                return Self::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "invalid config file, using defaults");
            Self::default()
        })
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub paths: WorkspacePaths,
    pub rss_url: String,
    pub max_items: usize,
    pub date_format: String,
    pub recent_days_window: i64,
    pub max_languages: usize,
    pub max_frameworks: usize,
    pub login: Option<String>,
    pub token: Option<String>,
    pub graphql_url: String,
    pub dry_run: bool,
}

impl Settings {
    /// Resolve settings from arguments and the config file they point at.
    pub fn resolve(args: CliArgs) -> Self {
        let paths = WorkspacePaths::new(&args.root).with_overrides(
            args.readme,
            args.config_file,
            args.state_file,
        );
        let file = FileConfig::load(&paths.config_file);

        let rss_url = non_empty(file.blog.rss_url)
            .or_else(|| non_empty(args.rss_url))
            .unwrap_or_else(|| DEFAULT_RSS_URL.to_string());
        let login = non_empty(args.login).or_else(|| non_empty(args.repository_owner));

        Self {
            paths,
            rss_url,
            max_items: file.blog.max_items,
            date_format: file.blog.date_format,
            recent_days_window: file.stats.recent_days_window,
            max_languages: file.stats.max_languages,
            max_frameworks: file.stats.max_frameworks,
            login,
            token: non_empty(args.token),
            graphql_url: args.graphql_url,
            dry_run: args.dry_run,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
