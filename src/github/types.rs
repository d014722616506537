// GitHub GraphQL request and response types.
// Mirrors the subset of the contributions schema the stats query selects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PulseError, Result};

/// GraphQL request body.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// Entry of the top-level `errors` list.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Unwrap `data`, treating any reported error as a failure.
    pub fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(PulseError::GraphQl(messages.join("; ")));
        }
        self.data.ok_or(PulseError::MissingData("data"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContributionsData {
    pub user: Option<UserContributions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContributions {
    pub contributions_collection: ContributionsCollection,
}

/// A user's contributions within one time window.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributionsCollection {
    pub total_commit_contributions: u64,
    pub restricted_contributions_count: u64,
    pub commit_contributions_by_repository: Vec<RepositoryContribution>,
}

/// Commits the user made to one repository.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryContribution {
    pub repository: Option<Repository>,
    pub contributions: ContributionCount,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributionCount {
    pub total_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    pub name_with_owner: String,
    pub is_private: bool,
    pub is_fork: bool,
    pub stargazer_count: u64,
    pub primary_language: Option<LanguageRef>,
    pub languages: Option<LanguageConnection>,
    pub repository_topics: Option<TopicConnection>,
    /// Raw `pushedAt`; parsed leniently by the aggregator.
    pub pushed_at: Option<String>,
}

impl Repository {
    pub fn language_edges(&self) -> &[LanguageEdge] {
        self.languages
            .as_ref()
            .map(|c| c.edges.as_slice())
            .unwrap_or_default()
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.repository_topics
            .iter()
            .flat_map(|c| c.nodes.iter())
            .filter_map(|n| n.topic.as_ref())
            .map(|t| t.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LanguageConnection {
    pub edges: Vec<LanguageEdge>,
}

/// Language with its byte size in a repository.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LanguageEdge {
    pub size: u64,
    pub node: Option<LanguageRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopicConnection {
    pub nodes: Vec<TopicNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopicNode {
    pub topic: Option<Topic>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Topic {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_repository_contribution() {
        let value = json!({
            "repository": {
                "nameWithOwner": "octocat/hello",
                "isPrivate": false,
                "isFork": false,
                "stargazerCount": 12,
                "primaryLanguage": { "name": "Rust" },
                "languages": { "edges": [
                    { "size": 900, "node": { "name": "Rust" } },
                    { "size": 100, "node": { "name": "Shell" } }
                ]},
                "repositoryTopics": { "nodes": [
                    { "topic": { "name": "cli" } },
                    { "topic": { "name": "React" } }
                ]},
                "pushedAt": "2025-10-18T16:58:12Z"
            },
            "contributions": { "totalCount": 7 }
        });

        let item: RepositoryContribution = serde_json::from_value(value).unwrap();
        let repo = item.repository.unwrap();

        assert_eq!(item.contributions.total_count, 7);
        assert_eq!(repo.name_with_owner, "octocat/hello");
        assert_eq!(repo.language_edges().len(), 2);
        assert_eq!(repo.topic_names().collect::<Vec<_>>(), vec!["cli", "React"]);
        assert_eq!(repo.pushed_at.as_deref(), Some("2025-10-18T16:58:12Z"));
    }

    #[test]
    fn test_missing_connections_are_empty() {
        let repo: Repository = serde_json::from_value(json!({
            "nameWithOwner": "octocat/bare",
            "languages": null,
            "repositoryTopics": null,
            "pushedAt": null
        }))
        .unwrap();

        assert!(repo.language_edges().is_empty());
        assert_eq!(repo.topic_names().count(), 0);
        assert!(repo.pushed_at.is_none());
    }

    #[test]
    fn test_into_data_prefers_errors() {
        let response: GraphQlResponse<Value> = serde_json::from_value(json!({
            "data": { "user": null },
            "errors": [{ "message": "first" }, { "message": "second", "type": "NOT_FOUND" }]
        }))
        .unwrap();

        match response.into_data() {
            Err(PulseError::GraphQl(message)) => assert_eq!(message, "first; second"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_into_data_requires_data() {
        let response: GraphQlResponse<Value> = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            response.into_data(),
            Err(PulseError::MissingData("data"))
        ));
    }
}
