use std::path::PathBuf;

use clap::Parser;

use crate::github::GITHUB_GRAPHQL_URL;

/// Command-line arguments for readme-pulse.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "readme-pulse",
    version,
    about = "Refresh the blog and GitHub activity blocks of a profile README"
)]
pub struct CliArgs {
    /// Workspace root holding README.md and the .github directory.
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Override the README path.
    #[arg(long, value_name = "PATH")]
    pub readme: Option<PathBuf>,

    /// Override the JSON config file path.
    #[arg(long = "config-file", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Override the state file path.
    #[arg(long = "state-file", value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Feed URL used when the config file does not name one.
    #[arg(long = "rss-url", env = "BLOG_RSS_URL", value_name = "URL")]
    pub rss_url: Option<String>,

    /// GitHub login whose activity is summarized.
    #[arg(long, env = "GH_LOGIN", value_name = "LOGIN")]
    pub login: Option<String>,

    /// Fallback login, as set by GitHub Actions.
    #[arg(long = "repository-owner", env = "GITHUB_REPOSITORY_OWNER", hide = true)]
    pub repository_owner: Option<String>,

    /// Token for the GitHub GraphQL API.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// GraphQL endpoint, for GitHub Enterprise hosts.
    #[arg(long = "graphql-url", env = "GITHUB_GRAPHQL_URL", default_value = GITHUB_GRAPHQL_URL)]
    pub graphql_url: String,

    /// Fetch and render, but leave README and state files untouched.
    #[arg(long = "dry-run", action = clap::ArgAction::SetTrue)]
    pub dry_run: bool,
}
