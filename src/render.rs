// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Function registry exposing feeds and formatters to templates.
//!
//! Templates are rendered with `minijinja`. Every feed is registered under
//! its template name and receives the shared [`Feeds`] context. A failing
//! feed aborts the render; the original error is kept as the source of the
//! template error.

use std::sync::Arc;

use chrono::Utc;
use minijinja::{Environment, ErrorKind, Value, context};
use serde::Serialize;

use crate::{
    error::Error,
    feeds::{Feeds, clamp_count},
    humanize::humanize_timestamp,
    stats::{BucketSet, category_bar},
};

macro_rules! register_feed {
    ($env:expr, $feeds:expr, $name:literal, | $ctx:ident $(, $arg:ident : $ty:ty)* | $body:expr) => {{
        let $ctx = Arc::clone(&$feeds,);
        $env.add_function($name, move |$($arg: $ty),*| to_value($body,),);
    }};
}

fn template_error(error: Error,) -> minijinja::Error
{
    minijinja::Error::new(ErrorKind::InvalidOperation, error.to_display_string(),)
        .with_source(error,)
}

fn to_value<T: Serialize,>(result: Result<T, Error,>,) -> Result<Value, minijinja::Error,>
{
    result.map(|value| Value::from_serialize(&value,),).map_err(template_error,)
}

/// Formats a bucket list handed over by a template, either plain buckets or
/// machine records.
fn wakatime_category_bar(count: i64, buckets: Value,) -> Result<String, minijinja::Error,>
{
    let json = serde_json::to_value(&buckets,)
        .map_err(|e| template_error(Error::decode("bucket set", e,),),)?;
    let set: BucketSet = serde_json::from_value(json,)
        .map_err(|e| template_error(Error::decode("bucket set", e,),),)?;
    Ok(category_bar(clamp_count(count,), &set.into_buckets(),),)
}

/// Relative time of an RFC 3339 timestamp; empty for missing values.
fn humanize(value: Value,) -> Result<String, minijinja::Error,>
{
    if value.is_undefined() || value.is_none() {
        return Ok(String::new(),);
    }
    let text = value.as_str().ok_or_else(|| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "humanize expects a timestamp string",)
    })?;
    humanize_timestamp(text, Utc::now(),).ok_or_else(|| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("'{text}' is not an RFC 3339 timestamp")
        )
    })
}

fn lower(value: String,) -> String
{
    value.to_lowercase()
}

/// Builds a template environment with every feed and formatter registered.
pub fn environment(feeds: Arc<Feeds,>,) -> Environment<'static,>
{
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true,);

    register_feed!(env, feeds, "recentContributions", |f, count: i64| {
        f.recent_contributions(clamp_count(count,),)
    });
    register_feed!(env, feeds, "recentPullRequests", |f, count: i64| {
        f.recent_pull_requests(clamp_count(count,),)
    });
    register_feed!(env, feeds, "popularRepos", |f, owner: String, count: i64| {
        f.popular_repos(&owner, clamp_count(count,),)
    });
    register_feed!(env, feeds, "recentCreatedRepos", |f, owner: String, count: i64| {
        f.recent_created_repos(&owner, clamp_count(count,),)
    });
    register_feed!(env, feeds, "recentForkedRepos", |f, owner: String, count: i64| {
        f.recent_forked_repos(&owner, clamp_count(count,),)
    });
    register_feed!(env, feeds, "recentForks", |f, owner: String, count: i64| {
        f.recent_forked_repos(&owner, clamp_count(count,),)
    });
    register_feed!(env, feeds, "recentPushedRepos", |f, owner: String, count: i64| {
        f.recent_pushed_repos(&owner, clamp_count(count,),)
    });
    register_feed!(env, feeds, "latestReleasedRepos", |f, owner: String, count: i64| {
        f.latest_released_repos(&owner, clamp_count(count,),)
    });
    register_feed!(env, feeds, "recentReleases", |f, count: i64| {
        f.recent_releases(clamp_count(count,),)
    });
    register_feed!(env, feeds, "repo", |f, owner: String, name: String| {
        f.repo(&owner, &name,)
    });
    register_feed!(env, feeds, "repoRecentReleases", |f, owner: String, name: String, count: i64| {
        f.repo_recent_releases(&owner, &name, clamp_count(count,),)
    });
    register_feed!(env, feeds, "repoReleaseHistory", |f, owner: String, name: String, count: i64| {
        f.repo_release_history(&owner, &name, clamp_count(count,),)
    });
    register_feed!(env, feeds, "followers", |f, count: i64| {
        f.followers(clamp_count(count,),)
    });
    register_feed!(env, feeds, "recentStars", |f, count: i64| {
        f.recent_stars(clamp_count(count,),)
    });
    register_feed!(env, feeds, "gists", |f, count: i64| {
        f.gists(clamp_count(count,),)
    });
    register_feed!(env, feeds, "sponsors", |f, count: i64| {
        f.sponsors(clamp_count(count,),)
    });
    register_feed!(env, feeds, "rss", |f, url: String, count: i64| {
        f.rss(&url, clamp_count(count,),)
    });
    register_feed!(env, feeds, "wakatimeData", |f| {
        f.wakatime_data()
    });

    env.add_function("wakatimeCategoryBar", wakatime_category_bar,);
    env.add_function("humanize", humanize,);
    env.add_filter("humanize", humanize,);
    env.add_function("lower", lower,);
    env.add_filter("lower", lower,);

    env
}

/// Renders `source` with the feeds of `feeds`.
///
/// # Errors
///
/// Returns [`Error::Render`] for syntax errors and for any feed failure
/// raised while rendering.
pub fn render_template(source: &str, feeds: Arc<Feeds,>,) -> Result<String, Error,>
{
    let env = environment(feeds,);
    Ok(env.render_str(source, context! {},)?,)
}
