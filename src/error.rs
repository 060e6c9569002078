#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the markscribe crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Every aggregation call returns [`Error`] on failure. Transport and decode
//! failures abort the whole document; missing data is never an error and is
//! represented by empty results instead.

use std::path::{Path, PathBuf};

/// Unified error type returned by feeds, transports, configuration and CLI.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors raised while reading templates or writing output.
    #[error("failed to access {path:?}: {source}")]
    Io {
        /// Location of the file being accessed.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors of the configuration file.
    #[error("failed to parse configuration: {source}")]
    Config {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when user supplied values violate invariants.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Connection failures and non-success statuses of remote services.
    #[error("{service} request failed: {message}")]
    Transport {
        /// Remote service that failed (GitHub, RSS, WakaTime).
        service: &'static str,
        /// Human readable description of the failure.
        message: String
    },
    /// GraphQL responses carrying an `errors` array.
    #[error("GitHub GraphQL query failed: {message}")]
    GraphQl {
        /// Joined messages reported by the GraphQL endpoint.
        message: String
    },
    /// Malformed or unexpected response payloads.
    #[error("failed to decode {context}: {source}")]
    Decode {
        /// Payload that was being decoded.
        context: String,
        /// Underlying decoding error.
        source:  serde_json::Error
    },
    /// The top-level deadline elapsed while waiting on a remote service.
    #[error("{service} request exceeded the configured deadline")]
    Timeout {
        /// Remote service that did not answer in time.
        service: &'static str
    },
    /// A feed was requested whose collaborator is not configured.
    #[error("{what} is not configured")]
    NotConfigured {
        /// Name of the missing setting.
        what: &'static str
    },
    /// Template parsing or evaluation failures.
    #[error("failed to render template: {source}")]
    Render {
        /// Underlying template engine error.
        source: minijinja::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a transport error for the named service.
    ///
    /// # Parameters
    ///
    /// * `service` - Remote service that failed.
    /// * `message` - Human-readable description of the failure.
    pub fn transport<M>(service: &'static str, message: M) -> Self
    where
        M: Into<String>
    {
        Self::Transport {
            service,
            message: message.into()
        }
    }

    /// Constructs a decode error describing the payload being decoded.
    pub fn decode<C>(context: C, source: serde_json::Error) -> Self
    where
        C: Into<String>
    {
        Self::Decode {
            context: context.into(),
            source
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// This method is primarily intended for CLI contexts where the variant
    /// name does not add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Config {
            source
        }
    }
}

impl From<minijinja::Error> for Error {
    fn from(source: minijinja::Error) -> Self {
        Self::Render {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn validation_constructor_populates_message() {
        let error = Error::validation("something went wrong");
        match error {
            Error::Validation {
                ref message
            } => {
                assert_eq!(message, "something went wrong");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::transport("GitHub", "connection reset");
        assert_eq!(error.to_string(), error.to_display_string());
        assert_eq!(error.to_string(), "GitHub request failed: connection reset");
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/profile.tpl");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_config_variant() {
        let error = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: Error = error.into();
        assert!(matches!(mapped, Error::Config { .. }));
    }

    #[test]
    fn decode_constructor_keeps_context() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::decode("popular repositories", source);
        assert!(error.to_string().starts_with("failed to decode popular repositories"));
    }

    #[test]
    fn not_configured_names_the_setting() {
        let error = Error::NotConfigured {
            what: "WAKATIME_API_KEY"
        };
        assert_eq!(error.to_string(), "WAKATIME_API_KEY is not configured");
    }
}
