// GitHub API module.
// Provides the GraphQL client, contribution types, and activity aggregation.

pub mod client;
pub mod endpoints;
pub mod stats;
pub mod types;

pub use client::{GITHUB_GRAPHQL_URL, GitHubClient};
pub use stats::ContributionSummary;
