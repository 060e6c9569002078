// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Collaborator seams consumed by the aggregation queries.
//!
//! The aggregation core is synchronous: templates call feeds one at a time
//! and every feed blocks on its transport. Network clients are async, so the
//! concrete transports drive them through a [`RuntimeBridge`], which also
//! enforces the single run-wide deadline.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::{runtime::Handle, time::Instant};

use crate::{error::Error, wakatime::WakatimeUserStats};

/// Executes GraphQL documents against GitHub.
pub trait GraphQlTransport: Send + Sync
{
    /// Runs `query` with `variables` and returns the `data` member of the
    /// response.
    ///
    /// # Errors
    ///
    /// Fails on connection errors, non-success statuses and responses that
    /// carry a GraphQL `errors` array.
    fn query(&self, query: &str, variables: Value,) -> Result<Value, Error,>;
}

/// One item of a syndication feed as delivered by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct FeedItem
{
    pub title:       String,
    pub author:      String,
    pub description: String,
    pub link:        String,
    pub published:   Option<DateTime<Utc,>,>,
}

/// Fetches and parses RSS/Atom feeds.
pub trait FeedSource: Send + Sync
{
    /// Downloads `url` and returns its items in document order.
    ///
    /// # Errors
    ///
    /// Fails on connection errors, non-success statuses and unparsable feeds.
    fn fetch(&self, url: &str,) -> Result<Vec<FeedItem,>, Error,>;
}

/// Retrieves coding-time statistics.
pub trait StatsSource: Send + Sync
{
    /// Returns the statistics of the last seven days.
    ///
    /// # Errors
    ///
    /// Fails on connection errors, any non-`200` status and malformed bodies.
    fn last_seven_days(&self,) -> Result<WakatimeUserStats, Error,>;
}

/// Runs futures to completion on a tokio runtime from synchronous code.
///
/// Must be used from a thread that is not itself driving the runtime, such as
/// the main thread of the CLI.
#[derive(Debug, Clone,)]
pub struct RuntimeBridge
{
    handle:   Handle,
    deadline: Option<Instant,>,
}

impl RuntimeBridge
{
    /// Creates a bridge without a deadline.
    pub fn new(handle: Handle,) -> Self
    {
        Self {
            handle,
            deadline: None,
        }
    }

    /// Bounds every call made through this bridge by `deadline`.
    pub fn with_deadline(mut self, deadline: Option<Instant,>,) -> Self
    {
        self.deadline = deadline;
        self
    }

    /// Runtime handle used to drive futures.
    pub fn handle(&self,) -> &Handle
    {
        &self.handle
    }

    /// Blocks on `future`, failing with [`Error::Timeout`] once the deadline
    /// passes.
    ///
    /// # Errors
    ///
    /// Returns the future's own error or [`Error::Timeout`].
    pub fn block_on<F, T,>(&self, service: &'static str, future: F,) -> Result<T, Error,>
    where
        F: Future<Output = Result<T, Error,>,>,
    {
        match self.deadline {
            Some(deadline,) => self.handle.block_on(async {
                tokio::time::timeout_at(deadline, future,)
                    .await
                    .map_err(|_| Error::Timeout {
                        service,
                    },)?
            },),
            None => self.handle.block_on(future,),
        }
    }
}
