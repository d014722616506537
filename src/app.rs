// Refresh run orchestration.
// Fetches both data sources, renders their blocks, and rewrites the README when it changed.

use std::fs;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::cache::{CacheState, write_atomic};
use crate::config::Settings;
use crate::document::{BLOG_MARKERS, STATS_MARKERS};
use crate::error::{PulseError, Result};
use crate::feed::{FeedClient, FeedFetch};
use crate::github::{ContributionSummary, GitHubClient};
use crate::render::{render_blog_block, render_stats_block};

/// What a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// A fresh blog block was rendered and substituted.
    pub blog_refreshed: bool,
    /// A fresh stats block was rendered and substituted.
    pub stats_refreshed: bool,
    /// The README content differs from what was on disk.
    pub readme_changed: bool,
}

/// One refresh pass over a workspace.
pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run a pass using the current time.
    pub async fn run(&self) -> Result<RunReport> {
        self.run_at(Utc::now()).await
    }

    /// Run a pass as of `now`.
    ///
    /// Data source failures only drop their block; reading or writing the
    /// README and state files is fatal.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunReport> {
        let paths = &self.settings.paths;
        let mut state = CacheState::load(&paths.state_file)?;

        let blog_block = self.blog_block(&mut state, now).await;
        let stats_block = self.stats_block(now).await;

        let original = fs::read_to_string(&paths.readme)?;
        let mut content = original.clone();
        if let Some(block) = &blog_block {
            content = BLOG_MARKERS.apply(&content, block)?;
        }
        if let Some(block) = &stats_block {
            content = STATS_MARKERS.apply(&content, block)?;
        }

        state.record_blocks(blog_block.as_deref(), stats_block.as_deref());

        let report = RunReport {
            blog_refreshed: blog_block.is_some(),
            stats_refreshed: stats_block.is_some(),
            readme_changed: content != original,
        };

        if self.settings.dry_run {
            info!(?report, "dry run, leaving files untouched");
            return Ok(report);
        }

        state.save(&paths.state_file)?;
        if report.readme_changed {
            write_atomic(&paths.readme, &content)?;
            info!(path = %paths.readme.display(), "README written");
        }

        Ok(report)
    }

    /// Rendered blog block, or None when the feed is unchanged or failed.
    async fn blog_block(&self, state: &mut CacheState, now: DateTime<Utc>) -> Option<String> {
        match self.fetch_posts(state).await {
            Ok(FeedFetch::Fetched(posts)) => {
                info!(count = posts.len(), "blog posts fetched");
                Some(render_blog_block(&posts, &self.settings.date_format, now))
            }
            Ok(FeedFetch::Unchanged) => {
                info!("blog feed not modified, keeping existing block");
                None
            }
            Err(err) => {
                warn!(error = %err, url = %self.settings.rss_url, "blog fetch failed");
                None
            }
        }
    }

    async fn fetch_posts(&self, state: &mut CacheState) -> Result<FeedFetch> {
        let client = FeedClient::new()?;
        client
            .fetch(&self.settings.rss_url, self.settings.max_items, state)
            .await
    }

    /// Rendered stats block, or None when the query failed.
    async fn stats_block(&self, now: DateTime<Utc>) -> Option<String> {
        match self.fetch_summary(now).await {
            Ok(summary) => {
                info!(
                    commits = summary.total_commits_year,
                    languages = summary.languages.len(),
                    frameworks = summary.frameworks.len(),
                    "GitHub stats fetched"
                );
                Some(render_stats_block(
                    &summary,
                    self.settings.max_languages,
                    self.settings.max_frameworks,
                ))
            }
            Err(err @ PulseError::MissingToken) => {
                error!(error = %err, "GitHub stats skipped");
                None
            }
            Err(err) => {
                warn!(error = %err, "GitHub stats fetch failed");
                None
            }
        }
    }

    async fn fetch_summary(&self, now: DateTime<Utc>) -> Result<ContributionSummary> {
        let token = self.settings.token.as_deref().ok_or(PulseError::MissingToken)?;
        let login = self.settings.login.as_deref().ok_or(PulseError::MissingLogin)?;

        let client = GitHubClient::new(token, self.settings.graphql_url.clone())?;
        client
            .contribution_summary(login, self.settings.recent_days_window, now)
            .await
    }
}
