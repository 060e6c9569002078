// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! RSS and Atom feed source.
//!
//! Downloads a feed over HTTP and parses it with `feed-rs`, which accepts RSS
//! 0.9x/1.0/2.0, Atom and JSON Feed documents alike.

use tracing::debug;

use crate::{
    error::Error,
    transport::{FeedItem, FeedSource, RuntimeBridge},
};

const SERVICE: &str = "RSS";

/// Blocking HTTP feed source.
#[derive(Debug, Clone,)]
pub struct HttpFeedSource
{
    http:   reqwest::Client,
    bridge: RuntimeBridge,
}

impl HttpFeedSource
{
    /// Creates a feed source driven by `bridge`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the HTTP client cannot be built.
    pub fn new(bridge: RuntimeBridge,) -> Result<Self, Error,>
    {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),)
            .build()
            .map_err(|e| Error::transport(SERVICE, format!("failed to build HTTP client: {e}"),),)?;

        Ok(Self {
            http,
            bridge,
        },)
    }
}

impl FeedSource for HttpFeedSource
{
    fn fetch(&self, url: &str,) -> Result<Vec<FeedItem,>, Error,>
    {
        debug!("Fetching feed {}", url);
        let request = self.http.get(url,);

        let body = self.bridge.block_on(SERVICE, async move {
            let response = request
                .send()
                .await
                .and_then(reqwest::Response::error_for_status,)
                .map_err(|e| Error::transport(SERVICE, e.to_string(),),)?;
            let bytes =
                response.bytes().await.map_err(|e| Error::transport(SERVICE, e.to_string(),),)?;
            Ok(bytes,)
        },)?;

        parse_feed(&body,)
    }
}

/// Parses a feed document into items, in document order.
///
/// # Errors
///
/// Returns [`Error::Transport`] when the document is not a recognizable feed.
pub fn parse_feed(document: &[u8],) -> Result<Vec<FeedItem,>, Error,>
{
    let feed = feed_rs::parser::parse(document,)
        .map_err(|e| Error::transport(SERVICE, format!("failed to parse feed: {e}"),),)?;

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| FeedItem {
            title:       entry.title.map(|text| text.content,).unwrap_or_default(),
            author:      entry.authors.into_iter().next().map(author_name,).unwrap_or_default(),
            description: entry.summary.map(|text| text.content,).unwrap_or_default(),
            link:        entry.links.into_iter().next().map(|link| link.href,).unwrap_or_default(),
            published:   entry.published.or(entry.updated,),
        },)
        .collect(),)
}

/// Display name of a feed author.
///
/// RSS 2.0 `<author>` elements arrive with the element name as `name` and the
/// `email (Name)` text as `email`.
fn author_name(person: feed_rs::model::Person,) -> String
{
    let placeholder = person.name.trim().is_empty() || person.name == "author";
    match person.email {
        Some(email,) if placeholder => {
            let email = email.trim();
            email
                .strip_suffix(')',)
                .and_then(|rest| rest.split_once('(',),)
                .map(|(_, name,)| name.trim(),)
                .filter(|name| !name.is_empty(),)
                .unwrap_or(email,)
                .to_owned()
        }
        _ => person.name,
    }
}
