// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Canonical entities handed to templates.
//!
//! All entities are immutable value snapshots built per query from raw API
//! nodes. They serialize with snake_case field names so templates can address
//! them as `repo.name_with_owner`, `release.published_at` and so on.
//! Timestamps serialize as RFC 3339 strings; a missing timestamp is `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub repository. Identity is [`Repo::name_with_owner`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Repo
{
    /// Login of the owning user or organization.
    pub owner:           String,
    /// Repository name without the owner.
    pub name:            String,
    /// Full `owner/name` identifier.
    pub name_with_owner: String,
    /// Web URL of the repository.
    pub url:             String,
    /// Repository description, empty when unset.
    pub description:     String,
    /// Number of stargazers.
    pub stargazers:      u64,
    /// Whether the repository is private.
    pub is_private:      bool,
    /// Most recent qualifying release, if one was selected.
    pub last_release:    Option<Release,>,
}

/// A published release of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Release
{
    pub name:          String,
    pub tag_name:      String,
    pub published_at:  Option<DateTime<Utc,>,>,
    pub created_at:    Option<DateTime<Utc,>,>,
    pub url:           String,
    pub is_latest:     bool,
    pub is_prerelease: bool,
    pub is_draft:      bool,
}

/// A repository together with the time of the latest commit contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Contribution
{
    pub repo:        Repo,
    pub occurred_at: Option<DateTime<Utc,>,>,
}

/// A pull request authored by the profile login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct PullRequest
{
    pub title:      String,
    pub url:        String,
    /// Upstream state: `OPEN`, `CLOSED` or `MERGED`.
    pub state:      String,
    pub created_at: Option<DateTime<Utc,>,>,
    pub updated_at: Option<DateTime<Utc,>,>,
    pub merged_at:  Option<DateTime<Utc,>,>,
    pub repo:       Repo,
}

/// A single entry of an RSS or Atom feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct RssEntry
{
    pub title:        String,
    /// Author name, or a Markdown profile link when the author is mapped.
    pub author:       String,
    pub description:  String,
    pub url:          String,
    pub published_at: Option<DateTime<Utc,>,>,
}

/// A GitHub account (user or organization).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
pub struct User
{
    pub login:      String,
    /// Display name, empty when unset.
    pub name:       String,
    pub avatar_url: String,
    pub url:        String,
}

/// A repository starred by the profile login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Star
{
    pub starred_at: Option<DateTime<Utc,>,>,
    pub repo:       Repo,
}

/// A public gist of the profile login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Gist
{
    pub name:        String,
    pub description: String,
    pub url:         String,
    pub created_at:  Option<DateTime<Utc,>,>,
    pub is_public:   bool,
}

/// A sponsorship of the profile login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Sponsor
{
    pub user:       User,
    pub created_at: Option<DateTime<Utc,>,>,
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn repo_serializes_with_snake_case_fields()
    {
        let repo = Repo {
            owner: "octocat".to_owned(),
            name: "hello".to_owned(),
            name_with_owner: "octocat/hello".to_owned(),
            ..Repo::default()
        };

        let json = serde_json::to_value(&repo,).expect("serialization failed",);
        assert_eq!(json["name_with_owner"], "octocat/hello");
        assert!(json["last_release"].is_null());
    }

    #[test]
    fn release_timestamps_serialize_as_rfc3339()
    {
        let release = Release {
            tag_name: "v1.0.0".to_owned(),
            published_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0,).unwrap(),),
            ..Release::default()
        };

        let json = serde_json::to_value(&release,).expect("serialization failed",);
        assert_eq!(json["published_at"], "2024-03-01T12:00:00Z");
        assert!(json["created_at"].is_null());
    }
}
