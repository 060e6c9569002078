// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Optional settings file and validation of GitHub identifiers.
//!
//! The YAML document only carries settings that are awkward to pass on the
//! command line. Values given through flags or environment variables always
//! take precedence over the file.

use std::{collections::BTreeMap, fs, path::Path};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    error::{self, Error},
    wakatime::DEFAULT_BASE_URL,
};

const LOGIN_PATTERN: &str = r"^[A-Za-z0-9](?:[A-Za-z0-9_-]{0,38})$";
const REPOSITORY_PATTERN: &str = r"^[A-Za-z0-9._-]{1,100}$";

/// Root of the settings file.
///
/// # Examples
///
/// ```
/// use markscribe::parse_config;
///
/// let yaml = r#"
/// login: octocat
/// rss:
///   authors:
///     "Christian Rocha": meowgorithm
/// "#;
/// let config = parse_config(yaml,).expect("valid configuration",);
/// assert_eq!(config.login.as_deref(), Some("octocat"));
/// assert_eq!(config.rss.authors["Christian Rocha"], "meowgorithm");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile
{
    /// Profile login used by self-referential feeds.
    pub login:    Option<String,>,
    /// WakaTime client settings.
    pub wakatime: WakatimeSection,
    /// RSS feed settings.
    pub rss:      RssSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default, deny_unknown_fields)]
pub struct WakatimeSection
{
    /// API root, for self-hosted compatible servers.
    pub base_url: Option<String,>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(default, deny_unknown_fields)]
pub struct RssSection
{
    /// Feed author display names mapped to GitHub logins.
    pub authors: BTreeMap<String, String,>,
}

impl ConfigFile
{
    /// Login from the command line or environment, falling back to the file.
    pub fn resolved_login(&self, cli: Option<&str,>,) -> Option<String,>
    {
        cli.map(str::trim,)
            .filter(|login| !login.is_empty(),)
            .map(str::to_owned,)
            .or_else(|| self.login.clone(),)
    }

    /// WakaTime API root from the command line or environment, then the
    /// file, then the public service.
    pub fn resolved_wakatime_url(&self, cli: Option<&str,>,) -> String
    {
        cli.map(str::trim,)
            .filter(|url| !url.is_empty(),)
            .or(self.wakatime.base_url.as_deref(),)
            .unwrap_or(DEFAULT_BASE_URL,)
            .to_owned()
    }
}

/// Loads and validates the settings file at `path`.
///
/// # Errors
///
/// Returns an [`Error`] when the file cannot be read, is not valid YAML, or
/// names invalid logins.
pub fn load_config(path: &Path,) -> Result<ConfigFile, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_config(&contents,)
}

/// Parses and validates a settings document. An empty document yields the
/// defaults.
///
/// # Errors
///
/// Propagates [`Error::Config`] for malformed YAML or unknown keys and
/// [`Error::Validation`] for invalid logins.
pub fn parse_config(contents: &str,) -> Result<ConfigFile, Error,>
{
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default(),);
    }

    let config: ConfigFile = serde_yaml::from_str(contents,)?;
    if let Some(login,) = config.login.as_deref() {
        validate_login(login,)?;
    }
    for login in config.rss.authors.values() {
        validate_login(login,)?;
    }

    Ok(config,)
}

/// Checks `login` against the GitHub user and organization name grammar.
///
/// # Errors
///
/// Returns [`Error::Validation`] for invalid logins.
///
/// # Examples
///
/// ```
/// use markscribe::validate_login;
///
/// assert!(validate_login("charmbracelet").is_ok());
/// assert!(validate_login("-leading-dash").is_err());
/// ```
pub fn validate_login(login: &str,) -> Result<(), Error,>
{
    let pattern = Regex::new(LOGIN_PATTERN,)
        .map_err(|e| Error::validation(format!("invalid regex: {e}"),),)?;
    if pattern.is_match(login,) {
        Ok((),)
    } else {
        Err(Error::validation(format!("'{login}' is not a valid GitHub login"),),)
    }
}

/// Checks `name` against the GitHub repository name grammar.
///
/// # Errors
///
/// Returns [`Error::Validation`] for invalid names.
pub fn validate_repository_name(name: &str,) -> Result<(), Error,>
{
    let pattern = Regex::new(REPOSITORY_PATTERN,)
        .map_err(|e| Error::validation(format!("invalid regex: {e}"),),)?;
    if pattern.is_match(name,) && name != "." && name != ".." {
        Ok((),)
    } else {
        Err(Error::validation(format!("'{name}' is not a valid repository name"),),)
    }
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn parse_config_reads_every_section()
    {
        let yaml = r#"
login: octocat
wakatime:
  base_url: https://waka.example.test/api/v1
rss:
  authors:
    "Christian Rocha": meowgorithm
    Bashbunni: bashbunni
"#;
        let config = parse_config(yaml,).expect("valid configuration",);

        assert_eq!(config.login.as_deref(), Some("octocat"));
        assert_eq!(config.wakatime.base_url.as_deref(), Some("https://waka.example.test/api/v1"));
        assert_eq!(config.rss.authors.len(), 2);
    }

    #[test]
    fn parse_config_accepts_empty_document()
    {
        assert_eq!(parse_config("  \n",).expect("empty configuration",), ConfigFile::default());
    }

    #[test]
    fn parse_config_rejects_unknown_fields()
    {
        let error = parse_config("goodreads:\n  user: 1\n",).expect_err("unknown field",);
        assert!(matches!(error, Error::Config { .. }));
    }

    #[test]
    fn parse_config_rejects_invalid_author_login()
    {
        let yaml = "rss:\n  authors:\n    Someone: \"not a login\"\n";
        let error = parse_config(yaml,).expect_err("invalid login",);
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn load_config_reports_missing_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("missing.yaml",);

        let error = load_config(&path,).expect_err("missing file",);
        match error {
            Error::Io {
                path: reported, ..
            } => assert_eq!(reported, path),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn load_config_reads_file_from_disk()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("markscribe.yaml",);
        fs::write(&path, "login: muesli\n",).expect("failed to write config",);

        let config = load_config(&path,).expect("valid configuration",);
        assert_eq!(config.login.as_deref(), Some("muesli"));
    }

    #[test]
    fn command_line_values_take_precedence()
    {
        let config = ConfigFile {
            login:    Some("from-file".to_owned(),),
            wakatime: WakatimeSection {
                base_url: Some("https://file.test".to_owned(),),
            },
            rss:      RssSection::default(),
        };

        assert_eq!(config.resolved_login(Some("from-cli",),).as_deref(), Some("from-cli"));
        assert_eq!(config.resolved_login(Some("  ",),).as_deref(), Some("from-file"));
        assert_eq!(config.resolved_wakatime_url(None,), "https://file.test");
        assert_eq!(config.resolved_wakatime_url(Some("https://env.test",),), "https://env.test");
        assert_eq!(ConfigFile::default().resolved_wakatime_url(None,), DEFAULT_BASE_URL);
    }

    #[test]
    fn login_grammar_is_enforced()
    {
        assert!(validate_login("a").is_ok());
        assert!(validate_login("charm-bracelet").is_ok());
        assert!(validate_login(&"a".repeat(39,)).is_ok());
        assert!(validate_login(&"a".repeat(40,)).is_err());
        assert!(validate_login("").is_err());
        assert!(validate_login("jdoe_acme").is_ok());
        assert!(validate_login("_leading").is_err());
        assert!(validate_login("with space").is_err());
        assert!(validate_login("slash/owner").is_err());
    }

    #[test]
    fn repository_name_grammar_is_enforced()
    {
        assert!(validate_repository_name("glow").is_ok());
        assert!(validate_repository_name("dotfiles.nvim_2").is_ok());
        assert!(validate_repository_name(".github").is_ok());
        assert!(validate_repository_name("..").is_err());
        assert!(validate_repository_name("../etc").is_err());
        assert!(validate_repository_name("").is_err());
    }
}
