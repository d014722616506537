// Contribution statistics aggregation.
// Weights languages by code share and commit volume, and ranks frameworks by repository topics.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use tracing::debug;

use super::types::{ContributionsCollection, Repository};

/// Exact layout GitHub uses for `pushedAt`.
const PUSHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Repository topic keyword to framework display name.
pub const FRAMEWORK_KEYWORDS: &[(&str, &str)] = &[
    ("react", "React"),
    ("nextjs", "Next.js"),
    ("next-js", "Next.js"),
    ("astro", "Astro"),
    ("svelte", "Svelte"),
    ("vue", "Vue"),
    ("nuxt", "Nuxt"),
    ("angular", "Angular"),
    ("express", "Express"),
    ("nodejs", "Node.js"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("fastapi", "FastAPI"),
    ("rails", "Rails"),
    ("laravel", "Laravel"),
    ("spring", "Spring"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
    ("tailwind", "Tailwind CSS"),
    ("bootstrap", "Bootstrap"),
];

/// Display name for a repository topic, if it names a known framework.
pub fn framework_for_topic(topic: &str) -> Option<&'static str> {
    let key = topic.trim().to_lowercase();
    FRAMEWORK_KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == key)
        .map(|(_, display)| *display)
}

/// Year-to-date activity, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributionSummary {
    pub total_commits_year: u64,
    pub restricted_commits_year: u64,
    /// Language name and rounded percentage, heaviest first.
    pub languages: Vec<(String, u32)>,
    /// Framework display names, heaviest first.
    pub frameworks: Vec<String>,
}

/// Additive name-to-weight table that remembers first-seen order.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    entries: Vec<(String, f64)>,
}

impl WeightTable {
    pub fn add(&mut self, name: &str, weight: f64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, total)) => *total += weight,
            None => self.entries.push((name.to_string(), weight)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, w)| *w)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by weight, heaviest first. Ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(String, f64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Accumulated language and framework weights.
#[derive(Debug, Clone, Default)]
pub struct Weights {
    pub languages: WeightTable,
    pub frameworks: WeightTable,
}

impl Weights {
    /// Fold one repository's composition and topics in.
    pub fn add_repository(&mut self, repo: &Repository, contributions: f64) {
        let edges = repo.language_edges();
        let total = match edges.iter().map(|e| e.size).sum::<u64>() {
            0 => 1.0,
            sum => sum as f64,
        };

        for edge in edges {
            let name = edge
                .node
                .as_ref()
                .map(|n| n.name.trim())
                .unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            self.languages
                .add(name, (edge.size as f64 / total) * contributions);
        }

        for framework in repo.topic_names().filter_map(framework_for_topic) {
            self.frameworks.add(framework, contributions);
        }
    }

    /// Normalize languages to percentages and drop framework weights.
    pub fn finish(&self) -> (Vec<(String, u32)>, Vec<String>) {
        let total = match self.languages.total() {
            t if t == 0.0 => 1.0,
            t => t,
        };
        let languages = self
            .languages
            .ranked()
            .into_iter()
            .map(|(name, w)| (name, ((w / total) * 100.0).round() as u32))
            .collect();
        let frameworks = self
            .frameworks
            .ranked()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        (languages, frameworks)
    }
}

/// Whether a push timestamp falls within the last `window_days`.
///
/// A missing or unparsable timestamp counts as recent, as does a window
/// too large to subtract from `now`.
pub fn is_recent(pushed_at: Option<&str>, now: DateTime<Utc>, window_days: i64) -> bool {
    let Some(raw) = pushed_at else {
        return true;
    };
    let Ok(pushed) = NaiveDateTime::parse_from_str(raw, PUSHED_AT_FORMAT) else {
        return true;
    };
    let cutoff = TimeDelta::try_days(window_days).and_then(|window| now.checked_sub_signed(window));
    match cutoff {
        Some(cutoff) => pushed.and_utc() >= cutoff,
        None => true,
    }
}

/// Accumulate weights over the repositories with recent commits.
pub fn accumulate(
    collection: &ContributionsCollection,
    window_days: i64,
    now: DateTime<Utc>,
) -> Weights {
    let mut weights = Weights::default();

    for item in &collection.commit_contributions_by_repository {
        let contributions = item.contributions.total_count;
        if contributions <= 0 {
            continue;
        }
        let Some(repo) = &item.repository else {
            continue;
        };

        if !is_recent(repo.pushed_at.as_deref(), now, window_days) {
            debug!(repo = %repo.name_with_owner, pushed_at = ?repo.pushed_at, "skipping stale repository");
            continue;
        }

        weights.add_repository(repo, contributions as f64);
    }

    weights
}

/// Build the summary for a contributions collection.
pub fn aggregate(
    collection: &ContributionsCollection,
    window_days: i64,
    now: DateTime<Utc>,
) -> ContributionSummary {
    let (languages, frameworks) = accumulate(collection, window_days, now).finish();

    ContributionSummary {
        total_commits_year: collection.total_commit_contributions,
        restricted_commits_year: collection.restricted_contributions_count,
        languages,
        frameworks,
    }
}
