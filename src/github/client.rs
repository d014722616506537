// GitHub GraphQL HTTP client.
// Handles authentication and the query/response envelope.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PulseError, Result};

use super::types::{GraphQlRequest, GraphQlResponse};

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const GRAPHQL_TIMEOUT: Duration = Duration::from_secs(25);
const CLIENT_USER_AGENT: &str = concat!("readme-pulse/", env!("CARGO_PKG_VERSION"));

/// GitHub GraphQL client bound to one endpoint and token.
pub struct GitHubClient {
    client: Client,
    endpoint: String,
}

impl GitHubClient {
    /// Create a new client for `endpoint` authenticated with `token`.
    pub fn new(token: &str, endpoint: impl Into<String>) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(PulseError::MissingToken);
        }

        let mut auth = HeaderValue::from_str(&format!("bearer {}", token))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(GRAPHQL_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Run a GraphQL query and return its `data` payload.
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let response = check_response(response).await?;
        let envelope: GraphQlResponse<T> = response.json().await?;
        envelope.into_data()
    }
}

/// Anything other than 200 is a failure for this endpoint.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        status => Err(PulseError::Status {
            what: "GraphQL",
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}
