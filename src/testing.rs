// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Scripted collaborators for unit tests.

use std::{collections::VecDeque, sync::Mutex};

use serde_json::Value;

use crate::{
    error::Error,
    transport::{FeedItem, FeedSource, GraphQlTransport, StatsSource},
    wakatime::WakatimeUserStats,
};

/// GraphQL transport answering with queued `data` payloads and recording
/// every request.
#[derive(Debug, Default,)]
pub struct ScriptedTransport
{
    responses: Mutex<VecDeque<Result<Value, String,>,>,>,
    calls:     Mutex<Vec<(String, Value,),>,>,
}

impl ScriptedTransport
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Queues a successful response carrying `data`.
    pub fn respond(self, data: Value,) -> Self
    {
        self.responses.lock().expect("responses lock",).push_back(Ok(data,),);
        self
    }

    /// Queues a transport failure.
    pub fn fail(self, message: &str,) -> Self
    {
        self.responses.lock().expect("responses lock",).push_back(Err(message.to_owned(),),);
        self
    }

    /// Variables of every request issued so far.
    pub fn variables(&self,) -> Vec<Value,>
    {
        self.calls.lock().expect("calls lock",).iter().map(|(_, vars,)| vars.clone(),).collect()
    }

    /// Documents of every request issued so far.
    pub fn queries(&self,) -> Vec<String,>
    {
        self.calls.lock().expect("calls lock",).iter().map(|(query, _,)| query.clone(),).collect()
    }

    pub fn call_count(&self,) -> usize
    {
        self.calls.lock().expect("calls lock",).len()
    }
}

impl GraphQlTransport for ScriptedTransport
{
    fn query(&self, query: &str, variables: Value,) -> Result<Value, Error,>
    {
        self.calls.lock().expect("calls lock",).push((query.to_owned(), variables,),);
        match self.responses.lock().expect("responses lock",).pop_front() {
            Some(Ok(data,),) => Ok(data,),
            Some(Err(message,),) => Err(Error::transport("GitHub", message,),),
            None => Err(Error::transport("GitHub", "no scripted response left",),),
        }
    }
}

/// Feed source returning fixed items for any URL.
#[derive(Debug, Default,)]
pub struct StaticFeedSource
{
    items:   Vec<FeedItem,>,
    fetched: Mutex<Vec<String,>,>,
}

impl StaticFeedSource
{
    pub fn new(items: Vec<FeedItem,>,) -> Self
    {
        Self {
            items,
            fetched: Mutex::new(Vec::new(),),
        }
    }

    pub fn fetched(&self,) -> Vec<String,>
    {
        self.fetched.lock().expect("fetched lock",).clone()
    }
}

impl FeedSource for StaticFeedSource
{
    fn fetch(&self, url: &str,) -> Result<Vec<FeedItem,>, Error,>
    {
        self.fetched.lock().expect("fetched lock",).push(url.to_owned(),);
        Ok(self.items.clone(),)
    }
}

/// Stats source returning a fixed snapshot.
#[derive(Debug, Default,)]
pub struct StaticStatsSource
{
    pub stats: WakatimeUserStats,
}

impl StatsSource for StaticStatsSource
{
    fn last_seven_days(&self,) -> Result<WakatimeUserStats, Error,>
    {
        Ok(self.stats.clone(),)
    }
}
