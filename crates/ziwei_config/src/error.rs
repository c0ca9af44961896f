//! Error types for configuration and settings stores.

use std::path::PathBuf;

use ziwei_base::{ChartError, ErrorCode};

/// Errors from loading configuration or writing settings.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unknown palace school {0:?}")]
    UnknownPalaceSchool(String),
    #[error("unknown brightness school {0:?}")]
    UnknownBrightnessSchool(String),
    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
    #[error("stem {0} has no alternate interpretations")]
    NotControversial(char),
    #[error("stem {stem} has no interpretation {key:?}")]
    UnknownInterpretation { stem: char, key: String },
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl ConfigError {
    /// Orchestrator code; wrapped chart errors keep their own.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Chart(e) => e.code(),
            Self::UnknownPalaceSchool(_) => ErrorCode::PalacesFailed,
            Self::NotControversial(_) | Self::UnknownInterpretation { .. } => {
                ErrorCode::MutationsFailed
            }
            Self::Io { .. }
            | Self::Parse(_)
            | Self::Serialize(_)
            | Self::UnknownBrightnessSchool(_)
            | Self::InvalidLogLevel(_) => ErrorCode::InputInvalid,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
