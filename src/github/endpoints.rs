// GitHub GraphQL queries.
// Provides typed methods for fetching a user's contribution data.

use chrono::{DateTime, Datelike, SecondsFormat, TimeZone, Utc};
use serde_json::json;

use crate::error::{PulseError, Result};

use super::client::GitHubClient;
use super::stats::{ContributionSummary, aggregate};
use super::types::{ContributionsCollection, ContributionsData};

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!, $fromYear: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $fromYear, to: $to) {
      totalCommitContributions
      restrictedContributionsCount
      commitContributionsByRepository(maxRepositories: 100) {
        repository {
          nameWithOwner
          isPrivate
          isFork
          stargazerCount
          primaryLanguage { name }
          languages(first: 10, orderBy: {field: SIZE, direction: DESC}) {
            edges { size node { name } }
          }
          repositoryTopics(first: 30) {
            nodes { topic { name } }
          }
          pushedAt
        }
        contributions {
          totalCount
        }
      }
    }
  }
}
"#;

/// Midnight UTC on 1 January of `now`'s year.
pub fn start_of_year(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

impl GitHubClient {
    /// Get `login`'s contributions from the start of the year up to `now`.
    pub async fn contributions_collection(
        &self,
        login: &str,
        now: DateTime<Utc>,
    ) -> Result<ContributionsCollection> {
        let login = login.trim();
        if login.is_empty() {
            return Err(PulseError::MissingLogin);
        }

        let variables = json!({
            "login": login,
            "fromYear": start_of_year(now).to_rfc3339_opts(SecondsFormat::Secs, true),
            "to": now.to_rfc3339_opts(SecondsFormat::Secs, true),
        });
        let data: ContributionsData = self.query(CONTRIBUTIONS_QUERY, variables).await?;

        data.user
            .map(|user| user.contributions_collection)
            .ok_or(PulseError::MissingData("user"))
    }

    /// Get the aggregated activity summary for `login`.
    pub async fn contribution_summary(
        &self,
        login: &str,
        window_days: i64,
        now: DateTime<Utc>,
    ) -> Result<ContributionSummary> {
        let collection = self.contributions_collection(login, now).await?;
        Ok(aggregate(&collection, window_days, now))
    }
}
