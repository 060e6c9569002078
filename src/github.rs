// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! GitHub GraphQL transport backed by Octocrab.
//!
//! Sends documents to the GraphQL endpoint with the configured bearer token
//! and unwraps the `data` member of the response. A response carrying an
//! `errors` array fails the whole call, even when partial data is present.

use octocrab::Octocrab;
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    error::Error,
    transport::{GraphQlTransport, RuntimeBridge},
};

const SERVICE: &str = "GitHub";

/// Blocking GraphQL client used by the aggregation queries.
#[derive(Clone,)]
pub struct GithubClient
{
    octocrab: Octocrab,
    bridge:   RuntimeBridge,
}

impl GithubClient
{
    /// Builds a client, authenticated when `token` is provided.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use markscribe::{GithubClient, RuntimeBridge};
    ///
    /// # fn example() -> Result<(), markscribe::Error> {
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// let bridge = RuntimeBridge::new(runtime.handle().clone());
    /// let client = GithubClient::new(Some("ghp_token"), bridge)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(token: Option<&str,>, bridge: RuntimeBridge,) -> Result<Self, Error,>
    {
        let _guard = bridge.handle().enter();
        let builder = Octocrab::builder();
        let builder = match token {
            Some(token,) => builder.personal_token(token.to_owned(),),
            None => builder,
        };
        let octocrab = builder.build().map_err(|e| {
            Error::transport(SERVICE, format!("failed to initialize GitHub client: {e}"),)
        },)?;

        Ok(Self {
            octocrab,
            bridge,
        },)
    }
}

impl GraphQlTransport for GithubClient
{
    fn query(&self, query: &str, variables: Value,) -> Result<Value, Error,>
    {
        debug!("Issuing GraphQL query with variables {}", variables);
        let payload = json!({ "query": query, "variables": variables });
        let octocrab = self.octocrab.clone();

        let response: Value = self.bridge.block_on(SERVICE, async move {
            octocrab
                .graphql::<Value,>(&payload,)
                .await
                .map_err(|e| Error::transport(SERVICE, e.to_string(),),)
        },)?;

        extract_data(response,)
    }
}

/// Unwraps the `data` member of a GraphQL response.
///
/// # Errors
///
/// Returns [`Error::GraphQl`] when the response lists errors and
/// [`Error::Transport`] when it has neither errors nor data.
pub fn extract_data(mut response: Value,) -> Result<Value, Error,>
{
    if let Some(errors,) = response.get("errors",).and_then(Value::as_array,)
        && !errors.is_empty()
    {
        let message = errors
            .iter()
            .map(|error| {
                error.get("message",).and_then(Value::as_str,).unwrap_or("unknown error",)
            },)
            .collect::<Vec<_,>>()
            .join("; ",);
        return Err(Error::GraphQl {
            message,
        },);
    }

    match response.get_mut("data",).map(Value::take,) {
        Some(data,) if !data.is_null() => Ok(data,),
        _ => Err(Error::transport(SERVICE, "GraphQL response carried no data",),),
    }
}
