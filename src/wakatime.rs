// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! WakaTime coding statistics client.
//!
//! Fetches `/users/current/stats/last_7_days` with HTTP Basic authentication
//! built from the API key. Any status other than `200` is a hard failure and
//! is never retried.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::Error,
    transport::{RuntimeBridge, StatsSource},
};

/// Default API root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://wakatime.com/api/v1";

const SERVICE: &str = "WakaTime";
const STATS_PATH: &str = "/users/current/stats/last_7_days";

/// Envelope of the stats endpoint.
#[derive(Debug, Clone, Default, Deserialize,)]
pub struct WakatimeDataResponse
{
    #[serde(default)]
    pub data: WakatimeUserStats,
}

/// Statistics of the last seven days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize,)]
#[serde(default)]
pub struct WakatimeUserStats
{
    pub total_seconds: f64,
    pub total_seconds_including_other_language: f64,
    pub human_readable_total: String,
    pub human_readable_total_including_other_language: String,
    pub daily_average: f64,
    pub daily_average_including_other_language: f64,
    pub human_readable_daily_average: String,
    pub human_readable_daily_average_including_other_language: String,
    pub categories: Vec<WakatimeCategory,>,
    pub projects: Vec<WakatimeCategory,>,
    pub languages: Vec<WakatimeCategory,>,
    pub editors: Vec<WakatimeCategory,>,
    pub operating_systems: Vec<WakatimeCategory,>,
    pub dependencies: Vec<WakatimeCategory,>,
    pub machines: Vec<WakatimeMachine,>,
    pub best_day: Option<WakatimeBestDay,>,
    pub range: String,
    pub human_readable_range: String,
    pub holidays: u32,
    pub days_including_holidays: u32,
    pub days_minus_holidays: u32,
    pub status: String,
    pub percent_calculated: u32,
    pub is_already_updating: bool,
    pub is_coding_activity_visible: bool,
    pub is_other_usage_visible: bool,
    pub is_stuck: bool,
    pub is_including_today: bool,
    pub is_up_to_date: bool,
    pub start: String,
    pub end: String,
    pub timezone: String,
    pub timeout: u32,
    pub writes_only: bool,
    pub user_id: String,
    pub username: String,
    pub created_at: String,
    pub modified_at: String,
}

/// Day with the most coding time in the range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize,)]
#[serde(default)]
pub struct WakatimeBestDay
{
    pub date:          String,
    pub text:          String,
    pub total_seconds: f64,
}

/// A named time bucket (language, project, editor, operating system,
/// dependency or category).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize,)]
#[serde(default)]
pub struct WakatimeCategory
{
    pub name:          String,
    pub total_seconds: f64,
    pub percent:       f64,
    pub digital:       String,
    pub text:          String,
    pub hours:         u64,
    pub minutes:       u64,
    pub seconds:       u64,
}

/// A machine bucket, which carries the machine identifier on top of the
/// common bucket fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize,)]
pub struct WakatimeMachine
{
    #[serde(flatten)]
    pub bucket:          WakatimeCategory,
    pub machine_name_id: String,
}

/// Blocking client for the WakaTime API.
#[derive(Debug, Clone,)]
pub struct WakatimeClient
{
    http:     reqwest::Client,
    api_key:  String,
    base_url: String,
    bridge:   RuntimeBridge,
}

impl WakatimeClient
{
    /// Creates a client for `base_url`, trimming a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the HTTP client cannot be built.
    pub fn new(api_key: &str, base_url: &str, bridge: RuntimeBridge,) -> Result<Self, Error,>
    {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),)
            .build()
            .map_err(|e| Error::transport(SERVICE, format!("failed to build HTTP client: {e}"),),)?;

        Ok(Self {
            http,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/',).to_owned(),
            bridge,
        },)
    }

    /// Full URL of the seven-day stats endpoint.
    pub fn stats_url(&self,) -> String
    {
        format!("{}{STATS_PATH}", self.base_url)
    }
}

impl StatsSource for WakatimeClient
{
    fn last_seven_days(&self,) -> Result<WakatimeUserStats, Error,>
    {
        let url = self.stats_url();
        debug!("Fetching coding stats from {}", url);

        let request = self
            .http
            .get(&url,)
            .header(reqwest::header::ACCEPT, "application/json",)
            .basic_auth(&self.api_key, None::<&str,>,);

        let (status, body,) = self.bridge.block_on(SERVICE, async move {
            let response =
                request.send().await.map_err(|e| Error::transport(SERVICE, e.to_string(),),)?;
            let status = response.status();
            let body = response.text().await.map_err(|e| Error::transport(SERVICE, e.to_string(),),)?;
            Ok((status, body,),)
        },)?;

        let stats = parse_stats_response(status, &body,)?;
        info!("Loaded coding stats for range {}", stats.range);
        Ok(stats,)
    }
}

/// Validates the status and decodes the body of a stats response.
///
/// # Errors
///
/// Returns [`Error::Transport`] for any status other than `200` and
/// [`Error::Decode`] for malformed bodies.
pub fn parse_stats_response(status: StatusCode, body: &str,) -> Result<WakatimeUserStats, Error,>
{
    if status != StatusCode::OK {
        return Err(Error::transport(
            SERVICE,
            format!("API returned status code {}: {}", status.as_u16(), status),
        ),);
    }

    let response: WakatimeDataResponse =
        serde_json::from_str(body,).map_err(|e| Error::decode("WakaTime stats response", e,),)?;
    Ok(response.data,)
}
