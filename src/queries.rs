// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! GraphQL documents issued by the aggregation queries.

/// Largest `first:` window accepted by the GitHub GraphQL API.
pub const MAX_WINDOW: usize = 100;

macro_rules! repository_fragment {
    () => {
        "
fragment RepositoryFields on Repository {
  owner { login }
  name
  nameWithOwner
  url
  description
  isPrivate
  stargazers { totalCount }
}"
    };
}

macro_rules! release_fragment {
    () => {
        "
fragment ReleaseFields on Release {
  name
  tagName
  publishedAt
  createdAt
  url
  isLatest
  isPrerelease
  isDraft
}"
    };
}

pub const VIEWER_LOGIN: &str = "query { viewer { login } }";

pub const RECENT_CONTRIBUTIONS: &str = concat!(
    "query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      commitContributionsByRepository(maxRepositories: 100) {
        contributions(first: 1) { edges { cursor node { occurredAt } } }
        repository { ...RepositoryFields }
      }
    }
  }
}",
    repository_fragment!()
);

pub const RECENT_PULL_REQUESTS: &str = concat!(
    "query($login: String!, $count: Int!) {
  user(login: $login) {
    pullRequests(first: $count, orderBy: {field: CREATED_AT, direction: DESC}) {
      edges {
        cursor
        node {
          title
          url
          state
          createdAt
          updatedAt
          mergedAt
          repository { ...RepositoryFields }
        }
      }
    }
  }
}",
    repository_fragment!()
);

/// Owner repositories ordered by a caller supplied field, optionally
/// restricted to forks or non-forks and to a set of affiliations.
pub const OWNER_REPOSITORIES: &str = concat!(
    "query($owner: String!, $count: Int!, $field: RepositoryOrderField!, $isFork: Boolean, $affiliations: [RepositoryAffiliation]!) {
  repositoryOwner(login: $owner) {
    repositories(first: $count, privacy: PUBLIC, isFork: $isFork, ownerAffiliations: $affiliations, orderBy: {field: $field, direction: DESC}) {
      edges { cursor node { ...RepositoryFields } }
    }
  }
}",
    repository_fragment!()
);

pub const LATEST_RELEASED_REPOSITORIES: &str = concat!(
    "query($owner: String!) {
  repositoryOwner(login: $owner) {
    repositories(first: 100, privacy: PUBLIC, orderBy: {field: UPDATED_AT, direction: DESC}) {
      edges {
        cursor
        node {
          ...RepositoryFields
          latestRelease { ...ReleaseFields }
        }
      }
    }
  }
}",
    repository_fragment!(),
    release_fragment!()
);

pub const RECENT_RELEASES: &str = concat!(
    "query($login: String!, $after: String) {
  user(login: $login) {
    repositoriesContributedTo(first: 100, after: $after, includeUserRepositories: true, contributionTypes: COMMIT, privacy: PUBLIC) {
      edges {
        cursor
        node {
          ...RepositoryFields
          releases(first: 10, orderBy: {field: CREATED_AT, direction: DESC}) { nodes { ...ReleaseFields } }
        }
      }
    }
  }
}",
    repository_fragment!(),
    release_fragment!()
);

pub const REPOSITORY: &str = concat!(
    "query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    ...RepositoryFields
    releases(first: 10, orderBy: {field: CREATED_AT, direction: DESC}) { nodes { ...ReleaseFields } }
  }
}",
    repository_fragment!(),
    release_fragment!()
);

pub const REPOSITORY_RELEASES: &str = concat!(
    "query($owner: String!, $name: String!, $count: Int!) {
  repository(owner: $owner, name: $name) {
    releases(first: $count, orderBy: {field: CREATED_AT, direction: DESC}) { nodes { ...ReleaseFields } }
  }
}",
    release_fragment!()
);

pub const FOLLOWERS: &str = "query($login: String!, $count: Int!) {
  user(login: $login) {
    followers(first: $count) {
      edges { cursor node { login name avatarUrl url } }
    }
  }
}";

pub const RECENT_STARS: &str = concat!(
    "query($login: String!, $count: Int!) {
  user(login: $login) {
    starredRepositories(first: $count, orderBy: {field: STARRED_AT, direction: DESC}) {
      edges { cursor starredAt node { ...RepositoryFields } }
    }
  }
}",
    repository_fragment!()
);

pub const GISTS: &str = "query($login: String!, $count: Int!) {
  user(login: $login) {
    gists(first: $count, privacy: PUBLIC, orderBy: {field: CREATED_AT, direction: DESC}) {
      edges { cursor node { name description url createdAt isPublic } }
    }
  }
}";

pub const SPONSORS: &str = "query($login: String!, $count: Int!) {
  user(login: $login) {
    sponsorshipsAsMaintainer(first: $count, orderBy: {field: CREATED_AT, direction: DESC}) {
      edges {
        cursor
        node {
          createdAt
          sponsorEntity {
            ... on User { login name avatarUrl url }
            ... on Organization { login name avatarUrl url }
          }
        }
      }
    }
  }
}";

/// Upstream ordering fields used by the per-owner repository feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum RepositoryOrder
{
    /// Descending by star count.
    Stargazers,
    /// Descending by creation time.
    CreatedAt,
    /// Descending by last push.
    PushedAt,
}

impl RepositoryOrder
{
    /// GraphQL enum literal of the ordering field.
    pub fn as_field(self,) -> &'static str
    {
        match self {
            Self::Stargazers => "STARGAZERS",
            Self::CreatedAt => "CREATED_AT",
            Self::PushedAt => "PUSHED_AT",
        }
    }
}

/// Affiliations a per-owner repository feed accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum Affiliation
{
    /// Repositories the owner owns.
    Owner,
    /// Owned repositories plus those the owner collaborates on; the upstream
    /// default.
    OwnerOrCollaborator,
}

impl Affiliation
{
    /// GraphQL `RepositoryAffiliation` literals.
    pub fn as_list(self,) -> &'static [&'static str]
    {
        match self {
            Self::Owner => &["OWNER"],
            Self::OwnerOrCollaborator => &["OWNER", "COLLABORATOR"],
        }
    }
}

/// Returns the `first:` window for a feed of `count` items, reserving `slack`
/// extra items for entries that filtering may drop.
pub fn window(count: usize, slack: usize,) -> usize
{
    count.saturating_add(slack,).min(MAX_WINDOW,)
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn declares(document: &str, fragment: &str,) -> bool
    {
        document.contains(&format!("fragment {fragment} on",),)
    }

    fn spreads(document: &str, fragment: &str,) -> bool
    {
        document.contains(&format!("...{fragment}"),)
    }

    #[test]
    fn documents_declare_exactly_the_fragments_they_spread()
    {
        for document in [
            RECENT_CONTRIBUTIONS,
            RECENT_PULL_REQUESTS,
            OWNER_REPOSITORIES,
            LATEST_RELEASED_REPOSITORIES,
            RECENT_RELEASES,
            REPOSITORY,
            REPOSITORY_RELEASES,
            RECENT_STARS,
            FOLLOWERS,
            GISTS,
            SPONSORS,
        ] {
            for fragment in ["RepositoryFields", "ReleaseFields"] {
                assert_eq!(
                    declares(document, fragment),
                    spreads(document, fragment),
                    "fragment {fragment} mismatch in {document}"
                );
            }
        }
    }

    #[test]
    fn window_reserves_slack_and_respects_api_limit()
    {
        assert_eq!(window(5, 1), 6);
        assert_eq!(window(100, 1), 100);
        assert_eq!(window(usize::MAX, 1), 100);
    }

    #[test]
    fn repository_order_maps_to_graphql_fields()
    {
        assert_eq!(RepositoryOrder::Stargazers.as_field(), "STARGAZERS");
        assert_eq!(RepositoryOrder::CreatedAt.as_field(), "CREATED_AT");
        assert_eq!(RepositoryOrder::PushedAt.as_field(), "PUSHED_AT");
    }

    #[test]
    fn owner_repositories_take_affiliations_as_variable()
    {
        assert!(OWNER_REPOSITORIES.contains("ownerAffiliations: $affiliations"));
        assert_eq!(Affiliation::Owner.as_list(), ["OWNER"]);
        assert_eq!(Affiliation::OwnerOrCollaborator.as_list(), ["OWNER", "COLLABORATOR"]);
    }
}
