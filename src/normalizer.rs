// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw GraphQL node shapes and their conversion into canonical entities.
//!
//! The raw types accept whatever subset of fields a query selects. Missing
//! fields and explicit `null` values both decode to the zero value of the
//! target type, which keeps every normalizer total: converting a raw node
//! never fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::{
    filter,
    model::{Gist, PullRequest, Release, Repo, User},
};

/// Decodes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T,>(deserializer: D,) -> Result<T, D::Error,>
where
    D: Deserializer<'de,>,
    T: Deserialize<'de,> + Default,
{
    Ok(Option::<T,>::deserialize(deserializer,)?.unwrap_or_default(),)
}

/// `{ login }` selection of an owner or actor.
#[derive(Debug, Clone, Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOwner
{
    #[serde(deserialize_with = "null_as_default")]
    pub login: String,
}

/// `{ totalCount }` selection of a connection.
#[derive(Debug, Clone, Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCount
{
    #[serde(deserialize_with = "null_as_default")]
    pub total_count: u64,
}

/// Repository fields shared by every repository-shaped query.
#[derive(Debug, Clone, Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRepository
{
    #[serde(deserialize_with = "null_as_default")]
    pub owner:           RawOwner,
    #[serde(deserialize_with = "null_as_default")]
    pub name:            String,
    #[serde(deserialize_with = "null_as_default")]
    pub name_with_owner: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url:             String,
    #[serde(deserialize_with = "null_as_default")]
    pub description:     String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_private:      bool,
    #[serde(deserialize_with = "null_as_default")]
    pub stargazers:      RawCount,
}

/// Release fields selected by release-bearing queries.
#[derive(Debug, Clone, Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRelease
{
    #[serde(deserialize_with = "null_as_default")]
    pub name:          String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag_name:      String,
    pub published_at:  Option<DateTime<Utc,>,>,
    pub created_at:    Option<DateTime<Utc,>,>,
    #[serde(deserialize_with = "null_as_default")]
    pub url:           String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_latest:     bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_prerelease: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_draft:      bool,
}

/// `releases { nodes { ... } }` selection, ordered newest first by the query.
#[derive(Debug, Clone, Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReleases
{
    #[serde(deserialize_with = "null_as_default")]
    pub nodes: Vec<RawRelease,>,
}

/// Pull request fields including the owning repository.
#[derive(Debug, Clone, Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPullRequest
{
    #[serde(deserialize_with = "null_as_default")]
    pub title:      String,
    #[serde(deserialize_with = "null_as_default")]
    pub url:        String,
    #[serde(deserialize_with = "null_as_default")]
    pub state:      String,
    pub created_at: Option<DateTime<Utc,>,>,
    pub updated_at: Option<DateTime<Utc,>,>,
    pub merged_at:  Option<DateTime<Utc,>,>,
    #[serde(deserialize_with = "null_as_default")]
    pub repository: RawRepository,
}

/// Account fields shared by users and organizations.
#[derive(Debug, Clone, Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
pub struct RawUser
{
    #[serde(deserialize_with = "null_as_default")]
    pub login:      String,
    #[serde(deserialize_with = "null_as_default")]
    pub name:       String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url:        String,
}

/// Gist fields.
#[derive(Debug, Clone, Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
pub struct RawGist
{
    #[serde(deserialize_with = "null_as_default")]
    pub name:        String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url:         String,
    pub created_at:  Option<DateTime<Utc,>,>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_public:   bool,
}

/// A GraphQL connection exposing `edges { cursor node }`.
#[derive(Debug, Clone, Deserialize,)]
pub struct Connection<T,>
{
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T,>,>,
}

impl<T,> Default for Connection<T,>
{
    fn default() -> Self
    {
        Self {
            edges: Vec::new(),
        }
    }
}

/// A single connection edge.
#[derive(Debug, Clone, Deserialize,)]
pub struct Edge<T,>
{
    #[serde(default)]
    pub cursor: String,
    pub node:   T,
}

/// Converts a raw repository node into a [`Repo`] without a release.
pub fn repo_from_raw(raw: RawRepository,) -> Repo
{
    Repo {
        owner:           raw.owner.login,
        name:            raw.name,
        name_with_owner: raw.name_with_owner,
        url:             raw.url,
        description:     raw.description,
        stargazers:      raw.stargazers.total_count,
        is_private:      raw.is_private,
        last_release:    None,
    }
}

/// Converts a raw release node into a [`Release`], keeping every flag.
pub fn release_from_raw(raw: RawRelease,) -> Release
{
    Release {
        name:          raw.name,
        tag_name:      raw.tag_name,
        published_at:  raw.published_at,
        created_at:    raw.created_at,
        url:           raw.url,
        is_latest:     raw.is_latest,
        is_prerelease: raw.is_prerelease,
        is_draft:      raw.is_draft,
    }
}

/// Selects the newest qualifying release from a newest-first release list.
///
/// Every node is checked on its own: drafts, prereleases, untagged and
/// unpublished releases are skipped and the first remaining one wins. Returns
/// `None` when no node qualifies.
pub fn release_list_from_raw(releases: RawReleases,) -> Option<Release,>
{
    releases.nodes.into_iter().map(release_from_raw,).find(filter::is_valid_release,)
}

/// Converts a raw pull request node, normalizing its repository as well.
pub fn pull_request_from_raw(raw: RawPullRequest,) -> PullRequest
{
    PullRequest {
        title:      raw.title,
        url:        raw.url,
        state:      raw.state,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        merged_at:  raw.merged_at,
        repo:       repo_from_raw(raw.repository,),
    }
}

/// Converts a raw account node into a [`User`].
pub fn user_from_raw(raw: RawUser,) -> User
{
    User {
        login:      raw.login,
        name:       raw.name,
        avatar_url: raw.avatar_url,
        url:        raw.url,
    }
}

/// Converts a raw gist node into a [`Gist`].
pub fn gist_from_raw(raw: RawGist,) -> Gist
{
    Gist {
        name:        raw.name,
        description: raw.description,
        url:         raw.url,
        created_at:  raw.created_at,
        is_public:   raw.is_public,
    }
}
