use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{LinearError, Result};

const API_ENDPOINT: &str = "https://api.linear.app/graphql";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Published request quota for API-key authenticated clients.
pub const RATE_LIMIT_PER_HOUR: u32 = 1500;

pub struct LinearClient {
    http: Client,
    api_key: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

impl LinearClient {
    pub fn new(api_key: String) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, api_key })
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let operation = operation_name(query);
        let request = GraphQLRequest { query, variables };
        let started = Instant::now();

        tracing::debug!(operation, "sending GraphQL request");

        let response = self
            .http
            .post(API_ENDPOINT)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(
            operation,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            return Err(status_error(status, body));
        }

        let body = response.bytes().await?;
        decode_response(&body)
    }
}

/// Map a non-2xx status to the matching error kind.
pub fn status_error(status: StatusCode, body: String) -> LinearError {
    match status {
        StatusCode::UNAUTHORIZED => LinearError::Authentication,
        StatusCode::TOO_MANY_REQUESTS => LinearError::rate_limited(),
        _ => LinearError::Http {
            status: status.as_u16(),
            body,
        },
    }
}

/// Decode a 2xx GraphQL body. A top-level `errors` list wins over any partial `data`.
pub fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let gql_response: GraphQLResponse<T> = serde_json::from_slice(body).map_err(|e| {
        LinearError::GraphQL {
            messages: vec![format!("malformed response body: {e}")],
        }
    })?;

    if let Some(errors) = gql_response.errors {
        if !errors.is_empty() {
            return Err(LinearError::GraphQL {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }
    }

    gql_response.data.ok_or(LinearError::EmptyResponse)
}

fn operation_name(query: &str) -> &str {
    query
        .split_whitespace()
        .skip_while(|word| *word != "query" && *word != "mutation")
        .nth(1)
        .map(|name| name.split('(').next().unwrap_or(name))
        .unwrap_or("anonymous")
}
