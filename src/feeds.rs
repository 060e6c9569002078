// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Aggregation queries exposed to templates as feeds.
//!
//! Every feed issues its request(s) through the [`Feeds`] context, normalizes
//! the raw nodes, applies the filter rules, sorts and truncates to the
//! requested count. A count of zero returns an empty list without touching
//! the network. Any transport or decode failure aborts the feed; missing data
//! yields an empty result instead.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{
    config,
    error::Error,
    filter,
    model::{Contribution, Gist, PullRequest, Release, Repo, RssEntry, Sponsor, Star, User},
    normalizer::{
        self, Connection, RawGist, RawOwner, RawPullRequest, RawRelease, RawReleases,
        RawRepository, RawUser, null_as_default,
    },
    paginate::{Page, walk_pages},
    queries::{self, Affiliation, RepositoryOrder},
    transport::{FeedSource, GraphQlTransport, StatsSource},
    wakatime::WakatimeUserStats,
};

/// Extra items requested when the profile repository may occupy a slot.
const META_SLACK: usize = 1;
/// Extra releases requested to make up for drafts and prereleases.
const RELEASE_SLACK: usize = 5;

#[derive(Deserialize,)]
struct UserResponse<T,>
{
    user: Option<T,>,
}

#[derive(Deserialize,)]
#[serde(rename_all = "camelCase")]
struct OwnerResponse<T,>
{
    repository_owner: Option<T,>,
}

#[derive(Deserialize,)]
struct RepositoryResponse<T,>
{
    repository: Option<T,>,
}

#[derive(Deserialize,)]
struct ViewerResponse
{
    viewer: Option<RawOwner,>,
}

#[derive(Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
struct ContributionsUser
{
    contributions_collection: Option<ContributionsCollection,>,
}

#[derive(Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
struct ContributionsCollection
{
    #[serde(deserialize_with = "null_as_default")]
    commit_contributions_by_repository: Vec<RepositoryContributions,>,
}

#[derive(Default, Deserialize,)]
#[serde(default)]
struct RepositoryContributions
{
    #[serde(deserialize_with = "null_as_default")]
    contributions: Connection<ContributionNode,>,
    #[serde(deserialize_with = "null_as_default")]
    repository:    RawRepository,
}

#[derive(Deserialize,)]
#[serde(rename_all = "camelCase")]
struct ContributionNode
{
    occurred_at: Option<DateTime<Utc,>,>,
}

#[derive(Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
struct PullRequestsUser
{
    #[serde(deserialize_with = "null_as_default")]
    pull_requests: Connection<RawPullRequest,>,
}

#[derive(Default, Deserialize,)]
#[serde(default)]
struct RepositoriesOwner
{
    #[serde(deserialize_with = "null_as_default")]
    repositories: Connection<RawRepository,>,
}

#[derive(Default, Deserialize,)]
#[serde(default)]
struct ReleasedRepositoriesOwner
{
    #[serde(deserialize_with = "null_as_default")]
    repositories: Connection<ReleasedRepository,>,
}

#[derive(Deserialize,)]
#[serde(rename_all = "camelCase")]
struct ReleasedRepository
{
    #[serde(flatten)]
    repository:     RawRepository,
    latest_release: Option<RawRelease,>,
}

#[derive(Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
struct ContributedRepositoriesUser
{
    #[serde(deserialize_with = "null_as_default")]
    repositories_contributed_to: Connection<RepositoryWithReleases,>,
}

#[derive(Deserialize,)]
struct RepositoryWithReleases
{
    #[serde(flatten)]
    repository: RawRepository,
    #[serde(default, deserialize_with = "null_as_default")]
    releases:   RawReleases,
}

#[derive(Default, Deserialize,)]
#[serde(default)]
struct RepositoryReleases
{
    #[serde(deserialize_with = "null_as_default")]
    releases: RawReleases,
}

#[derive(Default, Deserialize,)]
#[serde(default)]
struct FollowersUser
{
    #[serde(deserialize_with = "null_as_default")]
    followers: Connection<RawUser,>,
}

#[derive(Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
struct StarsUser
{
    #[serde(deserialize_with = "null_as_default")]
    starred_repositories: StarConnection,
}

#[derive(Default, Deserialize,)]
#[serde(default)]
struct StarConnection
{
    #[serde(deserialize_with = "null_as_default")]
    edges: Vec<StarEdge,>,
}

#[derive(Deserialize,)]
#[serde(rename_all = "camelCase")]
struct StarEdge
{
    starred_at: Option<DateTime<Utc,>,>,
    node:       RawRepository,
}

#[derive(Default, Deserialize,)]
#[serde(default)]
struct GistsUser
{
    #[serde(deserialize_with = "null_as_default")]
    gists: Connection<RawGist,>,
}

#[derive(Default, Deserialize,)]
#[serde(rename_all = "camelCase", default)]
struct SponsorsUser
{
    #[serde(deserialize_with = "null_as_default")]
    sponsorships_as_maintainer: Connection<Sponsorship,>,
}

#[derive(Deserialize,)]
#[serde(rename_all = "camelCase")]
struct Sponsorship
{
    created_at:     Option<DateTime<Utc,>,>,
    sponsor_entity: Option<RawUser,>,
}

/// Resolves the login of the account owning the GitHub token.
///
/// # Errors
///
/// Fails when the query fails or the response carries no login.
pub fn viewer_login(transport: &dyn GraphQlTransport,) -> Result<String, Error,>
{
    let data = transport.query(queries::VIEWER_LOGIN, json!({}),)?;
    let response: ViewerResponse =
        serde_json::from_value(data,).map_err(|e| Error::decode("viewer login", e,),)?;

    match response.viewer.map(|viewer| viewer.login,) {
        Some(login,) if !login.is_empty() => Ok(login,),
        _ => Err(Error::validation("GitHub did not report a viewer login",),),
    }
}

/// Clamps a template supplied count, mapping negatives to zero.
pub fn clamp_count(count: i64,) -> usize
{
    usize::try_from(count.max(0,),).unwrap_or(usize::MAX,)
}

/// Shared context of every feed: collaborators and profile settings.
pub struct Feeds
{
    github:      Arc<dyn GraphQlTransport,>,
    rss:         Arc<dyn FeedSource,>,
    wakatime:    Option<Arc<dyn StatsSource,>,>,
    login:       Option<String,>,
    rss_authors: BTreeMap<String, String,>,
}

impl Feeds
{
    /// Creates a context without a login, WakaTime source or author mapping.
    pub fn new(github: Arc<dyn GraphQlTransport,>, rss: Arc<dyn FeedSource,>,) -> Self
    {
        Self {
            github,
            rss,
            wakatime: None,
            login: None,
            rss_authors: BTreeMap::new(),
        }
    }

    /// Sets the profile login used by self-referential feeds.
    pub fn with_login(mut self, login: impl Into<String,>,) -> Self
    {
        self.login = Some(login.into(),);
        self
    }

    /// Sets the coding statistics source.
    pub fn with_wakatime(mut self, source: Arc<dyn StatsSource,>,) -> Self
    {
        self.wakatime = Some(source,);
        self
    }

    /// Sets the mapping from RSS author names to GitHub logins.
    pub fn with_rss_authors(mut self, authors: BTreeMap<String, String,>,) -> Self
    {
        self.rss_authors = authors;
        self
    }

    /// Profile login, when configured.
    pub fn login(&self,) -> Option<&str,>
    {
        self.login.as_deref()
    }

    fn require_login(&self,) -> Result<&str, Error,>
    {
        self.login.as_deref().ok_or(Error::NotConfigured {
            what: "GitHub login",
        },)
    }

    fn fetch<T,>(&self, context: &'static str, query: &str, variables: Value,) -> Result<T, Error,>
    where
        T: DeserializeOwned,
    {
        let data = self.github.query(query, variables,)?;
        serde_json::from_value(data,).map_err(|e| Error::decode(context, e,),)
    }

    /// Repositories the login recently committed to, newest contribution
    /// first.
    ///
    /// # Errors
    ///
    /// Fails without a login or when the query fails.
    pub fn recent_contributions(&self, count: usize,) -> Result<Vec<Contribution,>, Error,>
    {
        if count == 0 {
            return Ok(Vec::new(),);
        }
        let login = self.require_login()?;
        debug!("Fetching recent contributions of {}", login);

        let response: UserResponse<ContributionsUser,> = self.fetch(
            "recent contributions",
            queries::RECENT_CONTRIBUTIONS,
            json!({ "login": login }),
        )?;

        let mut contributions: Vec<Contribution,> = response
            .user
            .and_then(|user| user.contributions_collection,)
            .map(|collection| collection.commit_contributions_by_repository,)
            .unwrap_or_default()
            .into_iter()
            .map(|entry| Contribution {
                occurred_at: entry
                    .contributions
                    .edges
                    .into_iter()
                    .next()
                    .and_then(|edge| edge.node.occurred_at,),
                repo:        normalizer::repo_from_raw(entry.repository,),
            },)
            .filter(|contribution| filter::is_public_activity(&contribution.repo, login,),)
            .collect();

        contributions.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at,),);
        contributions.truncate(count,);

        info!("Found {} recent contributions", contributions.len());
        Ok(contributions,)
    }

    /// Pull requests recently opened by the login, newest first.
    ///
    /// # Errors
    ///
    /// Fails without a login or when the query fails.
    pub fn recent_pull_requests(&self, count: usize,) -> Result<Vec<PullRequest,>, Error,>
    {
        if count == 0 {
            return Ok(Vec::new(),);
        }
        let login = self.require_login()?;
        let window = queries::window(count, META_SLACK,);
        debug!("Fetching {} recent pull requests of {}", window, login);

        let response: UserResponse<PullRequestsUser,> = self.fetch(
            "recent pull requests",
            queries::RECENT_PULL_REQUESTS,
            json!({ "login": login, "count": window }),
        )?;

        let pull_requests: Vec<PullRequest,> = response
            .user
            .map(|user| user.pull_requests.edges,)
            .unwrap_or_default()
            .into_iter()
            .map(|edge| normalizer::pull_request_from_raw(edge.node,),)
            .filter(|pull_request| filter::is_public_activity(&pull_request.repo, login,),)
            .take(count,)
            .collect();

        info!("Found {} recent pull requests", pull_requests.len());
        Ok(pull_requests,)
    }

    /// Public repositories of `owner` with the most stars.
    ///
    /// # Errors
    ///
    /// Fails on an invalid owner or when the query fails.
    pub fn popular_repos(&self, owner: &str, count: usize,) -> Result<Vec<Repo,>, Error,>
    {
        self.owner_repositories(
            owner,
            count,
            RepositoryOrder::Stargazers,
            None,
            Affiliation::OwnerOrCollaborator,
        )
    }

    /// Most recently created non-fork repositories of `owner`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid owner or when the query fails.
    pub fn recent_created_repos(&self, owner: &str, count: usize,) -> Result<Vec<Repo,>, Error,>
    {
        self.owner_repositories(
            owner,
            count,
            RepositoryOrder::CreatedAt,
            Some(false,),
            Affiliation::Owner,
        )
    }

    /// Most recently created forks of `owner`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid owner or when the query fails.
    pub fn recent_forked_repos(&self, owner: &str, count: usize,) -> Result<Vec<Repo,>, Error,>
    {
        self.owner_repositories(
            owner,
            count,
            RepositoryOrder::CreatedAt,
            Some(true,),
            Affiliation::Owner,
        )
    }

    /// Repositories of `owner` with the most recent pushes.
    ///
    /// # Errors
    ///
    /// Fails on an invalid owner or when the query fails.
    pub fn recent_pushed_repos(&self, owner: &str, count: usize,) -> Result<Vec<Repo,>, Error,>
    {
        self.owner_repositories(
            owner,
            count,
            RepositoryOrder::PushedAt,
            None,
            Affiliation::OwnerOrCollaborator,
        )
    }

    /// Ordering is left to the upstream query; only the profile repository
    /// and private repositories are dropped.
    fn owner_repositories(
        &self,
        owner: &str,
        count: usize,
        order: RepositoryOrder,
        is_fork: Option<bool,>,
        affiliation: Affiliation,
    ) -> Result<Vec<Repo,>, Error,>
    {
        config::validate_login(owner,)?;
        if count == 0 {
            return Ok(Vec::new(),);
        }
        let window = queries::window(count, META_SLACK,);
        debug!(
            "Fetching {} repositories of {} ordered by {} (fork: {:?}, {:?})",
            window,
            owner,
            order.as_field(),
            is_fork,
            affiliation
        );

        let response: OwnerResponse<RepositoriesOwner,> = self.fetch(
            "owner repositories",
            queries::OWNER_REPOSITORIES,
            json!({
                "owner": owner,
                "count": window,
                "field": order.as_field(),
                "isFork": is_fork,
                "affiliations": affiliation.as_list(),
            }),
        )?;

        let repos: Vec<Repo,> = response
            .repository_owner
            .map(|found| found.repositories.edges,)
            .unwrap_or_default()
            .into_iter()
            .map(|edge| normalizer::repo_from_raw(edge.node,),)
            .filter(|repo| filter::is_public_activity(repo, owner,),)
            .take(count,)
            .collect();

        info!("Found {} repositories of {}", repos.len(), owner);
        Ok(repos,)
    }

    /// Repositories of `owner` with a published release, most recent release
    /// first. Repositories without a qualifying release are left out.
    ///
    /// # Errors
    ///
    /// Fails on an invalid owner or when the query fails.
    pub fn latest_released_repos(&self, owner: &str, count: usize,) -> Result<Vec<Repo,>, Error,>
    {
        config::validate_login(owner,)?;
        if count == 0 {
            return Ok(Vec::new(),);
        }
        debug!("Fetching released repositories of {}", owner);

        let response: OwnerResponse<ReleasedRepositoriesOwner,> = self.fetch(
            "latest released repositories",
            queries::LATEST_RELEASED_REPOSITORIES,
            json!({ "owner": owner }),
        )?;

        let mut repos: Vec<Repo,> = response
            .repository_owner
            .map(|found| found.repositories.edges,)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|edge| {
                let release = edge
                    .node
                    .latest_release
                    .map(normalizer::release_from_raw,)
                    .filter(filter::is_valid_release,)?;
                let mut repo = normalizer::repo_from_raw(edge.node.repository,);
                repo.last_release = Some(release,);
                Some(repo,)
            },)
            .filter(|repo| filter::is_public_activity(repo, owner,),)
            .collect();

        repos.sort_by(|a, b| release_published(b,).cmp(&release_published(a,),),);
        repos.truncate(count,);

        info!("Found {} released repositories of {}", repos.len(), owner);
        Ok(repos,)
    }

    /// Repositories the login contributed to, ordered by their latest
    /// qualifying release (newest first, then by stars).
    ///
    /// Walks every page of contributed repositories before sorting.
    ///
    /// # Errors
    ///
    /// Fails without a login or when any page fails.
    pub fn recent_releases(&self, count: usize,) -> Result<Vec<Repo,>, Error,>
    {
        if count == 0 {
            return Ok(Vec::new(),);
        }
        let login = self.require_login()?;
        debug!("Fetching releases of repositories {} contributed to", login);

        let nodes = walk_pages(|cursor| {
            let response: UserResponse<ContributedRepositoriesUser,> = self.fetch(
                "recent releases",
                queries::RECENT_RELEASES,
                json!({ "login": login, "after": cursor }),
            )?;
            let edges =
                response.user.map(|user| user.repositories_contributed_to.edges,).unwrap_or_default();
            let next_cursor =
                edges.last().map(|edge| edge.cursor.clone(),).filter(|cursor| !cursor.is_empty(),);
            Ok(Page::new(edges.into_iter().map(|edge| edge.node,).collect(), next_cursor,),)
        },)?;

        let mut repos: Vec<Repo,> = nodes
            .into_iter()
            .filter_map(|node| {
                let release = normalizer::release_list_from_raw(node.releases,)?;
                let mut repo = normalizer::repo_from_raw(node.repository,);
                repo.last_release = Some(release,);
                Some(repo,)
            },)
            .filter(|repo| filter::is_public_activity(repo, login,),)
            .collect();

        sort_by_release(&mut repos,);
        repos.truncate(count,);

        info!("Found {} repositories with recent releases", repos.len());
        Ok(repos,)
    }

    /// A single repository with its newest qualifying release.
    ///
    /// Returns `None` when the repository does not exist. Visibility is not
    /// filtered since the caller names the repository explicitly.
    ///
    /// # Errors
    ///
    /// Fails on an invalid owner or name or when the query fails.
    pub fn repo(&self, owner: &str, name: &str,) -> Result<Option<Repo,>, Error,>
    {
        config::validate_login(owner,)?;
        config::validate_repository_name(name,)?;
        debug!("Fetching repository {}/{}", owner, name);

        let response: RepositoryResponse<RepositoryWithReleases,> = self.fetch(
            "repository",
            queries::REPOSITORY,
            json!({ "owner": owner, "name": name }),
        )?;

        Ok(response.repository.map(|node| {
            let mut repo = normalizer::repo_from_raw(node.repository,);
            repo.last_release = normalizer::release_list_from_raw(node.releases,);
            repo
        },),)
    }

    /// Newest published releases of a repository, without drafts and
    /// prereleases.
    ///
    /// # Errors
    ///
    /// Fails on an invalid owner or name or when the query fails.
    pub fn repo_recent_releases(
        &self,
        owner: &str,
        name: &str,
        count: usize,
    ) -> Result<Vec<Release,>, Error,>
    {
        let releases = self.repository_releases(owner, name, count, RELEASE_SLACK,)?;
        Ok(releases.into_iter().filter(filter::is_valid_release,).take(count,).collect(),)
    }

    /// Newest releases of a repository exactly as published upstream,
    /// including drafts and prereleases.
    ///
    /// # Errors
    ///
    /// Fails on an invalid owner or name or when the query fails.
    pub fn repo_release_history(
        &self,
        owner: &str,
        name: &str,
        count: usize,
    ) -> Result<Vec<Release,>, Error,>
    {
        let mut releases = self.repository_releases(owner, name, count, 0,)?;
        releases.truncate(count,);
        Ok(releases,)
    }

    fn repository_releases(
        &self,
        owner: &str,
        name: &str,
        count: usize,
        slack: usize,
    ) -> Result<Vec<Release,>, Error,>
    {
        config::validate_login(owner,)?;
        config::validate_repository_name(name,)?;
        if count == 0 {
            return Ok(Vec::new(),);
        }
        let window = queries::window(count, slack,);
        debug!("Fetching {} releases of {}/{}", window, owner, name);

        let response: RepositoryResponse<RepositoryReleases,> = self.fetch(
            "repository releases",
            queries::REPOSITORY_RELEASES,
            json!({ "owner": owner, "name": name, "count": window }),
        )?;

        let releases: Vec<Release,> = response
            .repository
            .map(|repository| repository.releases.nodes,)
            .unwrap_or_default()
            .into_iter()
            .map(normalizer::release_from_raw,)
            .collect();

        info!("Found {} releases of {}/{}", releases.len(), owner, name);
        Ok(releases,)
    }

    /// Most recent followers of the login.
    ///
    /// # Errors
    ///
    /// Fails without a login or when the query fails.
    pub fn followers(&self, count: usize,) -> Result<Vec<User,>, Error,>
    {
        if count == 0 {
            return Ok(Vec::new(),);
        }
        let login = self.require_login()?;
        let window = queries::window(count, 0,);
        debug!("Fetching {} followers of {}", window, login);

        let response: UserResponse<FollowersUser,> = self.fetch(
            "followers",
            queries::FOLLOWERS,
            json!({ "login": login, "count": window }),
        )?;

        let users: Vec<User,> = response
            .user
            .map(|user| user.followers.edges,)
            .unwrap_or_default()
            .into_iter()
            .map(|edge| normalizer::user_from_raw(edge.node,),)
            .take(count,)
            .collect();

        info!("Found {} followers", users.len());
        Ok(users,)
    }

    /// Public repositories most recently starred by the login.
    ///
    /// # Errors
    ///
    /// Fails without a login or when the query fails.
    pub fn recent_stars(&self, count: usize,) -> Result<Vec<Star,>, Error,>
    {
        if count == 0 {
            return Ok(Vec::new(),);
        }
        let login = self.require_login()?;
        let window = queries::window(count, META_SLACK,);
        debug!("Fetching {} stars of {}", window, login);

        let response: UserResponse<StarsUser,> = self.fetch(
            "recent stars",
            queries::RECENT_STARS,
            json!({ "login": login, "count": window }),
        )?;

        let stars: Vec<Star,> = response
            .user
            .map(|user| user.starred_repositories.edges,)
            .unwrap_or_default()
            .into_iter()
            .map(|edge| Star {
                starred_at: edge.starred_at,
                repo:       normalizer::repo_from_raw(edge.node,),
            },)
            .filter(|star| filter::is_public_activity(&star.repo, login,),)
            .take(count,)
            .collect();

        info!("Found {} stars", stars.len());
        Ok(stars,)
    }

    /// Most recently created public gists of the login.
    ///
    /// # Errors
    ///
    /// Fails without a login or when the query fails.
    pub fn gists(&self, count: usize,) -> Result<Vec<Gist,>, Error,>
    {
        if count == 0 {
            return Ok(Vec::new(),);
        }
        let login = self.require_login()?;
        let window = queries::window(count, 0,);
        debug!("Fetching {} gists of {}", window, login);

        let response: UserResponse<GistsUser,> =
            self.fetch("gists", queries::GISTS, json!({ "login": login, "count": window }),)?;

        let gists: Vec<Gist,> = response
            .user
            .map(|user| user.gists.edges,)
            .unwrap_or_default()
            .into_iter()
            .map(|edge| normalizer::gist_from_raw(edge.node,),)
            .filter(|gist| gist.is_public,)
            .take(count,)
            .collect();

        info!("Found {} gists", gists.len());
        Ok(gists,)
    }

    /// Most recent sponsors of the login, users and organizations alike.
    ///
    /// # Errors
    ///
    /// Fails without a login or when the query fails.
    pub fn sponsors(&self, count: usize,) -> Result<Vec<Sponsor,>, Error,>
    {
        if count == 0 {
            return Ok(Vec::new(),);
        }
        let login = self.require_login()?;
        let window = queries::window(count, 0,);
        debug!("Fetching {} sponsors of {}", window, login);

        let response: UserResponse<SponsorsUser,> =
            self.fetch("sponsors", queries::SPONSORS, json!({ "login": login, "count": window }),)?;

        let sponsors: Vec<Sponsor,> = response
            .user
            .map(|user| user.sponsorships_as_maintainer.edges,)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|edge| {
                let entity = edge.node.sponsor_entity?;
                Some(Sponsor {
                    user:       normalizer::user_from_raw(entity,),
                    created_at: edge.node.created_at,
                },)
            },)
            .take(count,)
            .collect();

        info!("Found {} sponsors", sponsors.len());
        Ok(sponsors,)
    }

    /// First `count` items of the feed at `url`, in document order.
    ///
    /// Authors listed in the configured author map are rendered as Markdown
    /// links to their GitHub profile.
    ///
    /// # Errors
    ///
    /// Fails when the feed cannot be fetched or parsed.
    pub fn rss(&self, url: &str, count: usize,) -> Result<Vec<RssEntry,>, Error,>
    {
        if count == 0 {
            return Ok(Vec::new(),);
        }
        debug!("Fetching {} entries of feed {}", count, url);

        let entries: Vec<RssEntry,> = self
            .rss
            .fetch(url,)?
            .into_iter()
            .take(count,)
            .map(|item| RssEntry {
                author:       self.display_author(item.author,),
                title:        item.title,
                description:  item.description,
                url:          item.link,
                published_at: item.published,
            },)
            .collect();

        info!("Found {} feed entries", entries.len());
        Ok(entries,)
    }

    fn display_author(&self, author: String,) -> String
    {
        match self.rss_authors.get(&author,) {
            Some(login,) => format!("[{login}](https://github.com/{login})"),
            None => author,
        }
    }

    /// Coding statistics of the last seven days.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotConfigured`] without an API key, or when the
    /// request fails.
    pub fn wakatime_data(&self,) -> Result<WakatimeUserStats, Error,>
    {
        let source = self.wakatime.as_ref().ok_or(Error::NotConfigured {
            what: "WakaTime API key",
        },)?;
        source.last_seven_days()
    }
}

fn release_published(repo: &Repo,) -> Option<DateTime<Utc,>,>
{
    repo.last_release.as_ref().and_then(|release| release.published_at,)
}

/// Orders repositories by release publication time, newest first, breaking
/// ties by star count. Repositories without a publication time sort last.
pub fn sort_by_release(repos: &mut [Repo],)
{
    repos.sort_by(|a, b| {
        release_published(b,)
            .cmp(&release_published(a,),)
            .then_with(|| b.stargazers.cmp(&a.stargazers,),)
    },);
}
