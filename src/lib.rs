//! Data feeds for rendering Markdown profile documents.
//!
//! The library aggregates public activity from GitHub, RSS/Atom feeds and
//! WakaTime into small, deterministic lists and exposes them as functions
//! callable from `minijinja` templates. The aggregation core is synchronous;
//! network clients are plugged in behind the traits of the transport module
//! and driven through a [`RuntimeBridge`] bounded by a single deadline.

mod config;
mod error;
mod feeds;
mod filter;
mod github;
mod humanize;
mod model;
mod normalizer;
mod paginate;
mod queries;
mod render;
mod rss;
mod stats;
#[cfg(test)]
mod testing;
mod transport;
mod wakatime;

pub use config::{
    ConfigFile, RssSection, WakatimeSection, load_config, parse_config, validate_login,
    validate_repository_name,
};
pub use error::{Error, io_error};
pub use feeds::{Feeds, clamp_count, sort_by_release, viewer_login};
pub use filter::{is_meta_repository, is_public, is_public_activity, is_valid_release};
pub use github::{GithubClient, extract_data};
pub use humanize::{humanize_since, humanize_timestamp};
pub use model::{Contribution, Gist, PullRequest, Release, Repo, RssEntry, Sponsor, Star, User};
pub use normalizer::{
    Connection, Edge, RawCount, RawGist, RawOwner, RawPullRequest, RawRelease, RawReleases,
    RawRepository, RawUser, gist_from_raw, pull_request_from_raw, release_from_raw,
    release_list_from_raw, repo_from_raw, user_from_raw,
};
pub use paginate::{MAX_PAGES, Page, walk_pages};
pub use queries::RepositoryOrder;
pub use render::{environment, render_template};
pub use rss::{HttpFeedSource, parse_feed};
pub use stats::{BAR_WIDTH, BucketSet, bar, category_bar, format_time};
pub use transport::{FeedItem, FeedSource, GraphQlTransport, RuntimeBridge, StatsSource};
pub use wakatime::{
    DEFAULT_BASE_URL, WakatimeBestDay, WakatimeCategory, WakatimeClient, WakatimeDataResponse,
    WakatimeMachine, WakatimeUserStats, parse_stats_response,
};
