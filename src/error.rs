use std::path::PathBuf;

use thiserror::Error;

use crate::schema::Kind;

#[derive(Debug, Error)]
pub enum OnefigError {
    #[error("Invalid value '{value}' for {field} (expected {kind}): {reason}")]
    MalformedValue {
        field: String,
        value: String,
        kind: Kind,
        reason: String,
    },

    #[error("Failed to read {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in config file: {}", format_keys(.0))]
    UnknownKeys(Vec<OnefigError>),
}

fn format_keys(errors: &[OnefigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Fail-fast sink for configuration errors.
///
/// Loading returns `Result` so embedders can recover; command-line tools that
/// treat malformed configuration as an operator error call `.or_exit()` on the
/// final result, which prints the diagnostic and terminates with status 1.
pub trait OrExit<T> {
    fn or_exit(self) -> T;
}

impl<T> OrExit<T> for Result<T, OnefigError> {
    fn or_exit(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(error = %err, "configuration failed");
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }
}
