//! Error types for chart computation.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Error-code vocabulary exposed to orchestrating layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InputInvalid,
    PalacesFailed,
    SecondaryFailed,
    MutationsFailed,
    ModuleMissing,
    CalculationFailed,
}

impl ErrorCode {
    /// Wire string of the code (`INPUT_INVALID`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputInvalid => "INPUT_INVALID",
            Self::PalacesFailed => "PALACES_FAILED",
            Self::SecondaryFailed => "SECONDARY_FAILED",
            Self::MutationsFailed => "MUTATIONS_FAILED",
            Self::ModuleMissing => "MODULE_MISSING",
            Self::CalculationFailed => "CALCULATION_FAILED",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hard failures of the chart pipeline.
///
/// Soft failures (incomplete birth records) never surface here; they are
/// reported through [`crate::IndexResolution::Degenerate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ChartError {
    /// The naming source has no table for the requested school.
    #[error("no palace naming table for school {0:?}")]
    NamingTableMissing(String),
    /// A Ming/Shen position outside 0..=11 was handed to the palace builder.
    #[error("palace position out of range: {0}")]
    PalacePosition(u8),
    /// A basic index outside its range reached the secondary-star placer.
    #[error("{what} out of range: {value}")]
    SecondaryIndex { what: &'static str, value: u8 },
    /// Branch index not covered by the four fire/bells groups.
    #[error("branch index {0} is not in any fire/bells group")]
    UnmappedBranchGroup(u8),
    /// Character is not one of the ten heavenly stems.
    #[error("unknown heavenly stem {0:?}")]
    UnknownStem(char),
    /// A required collaborator was not wired into the engine.
    #[error("missing collaborator: {0}")]
    ModuleMissing(&'static str),
    /// Strict-input mode rejected a birth record.
    #[error("invalid birth record: {0}")]
    InvalidInput(String),
}

impl ChartError {
    /// Error code reported to the orchestrator.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NamingTableMissing(_) | Self::PalacePosition(_) => ErrorCode::PalacesFailed,
            Self::SecondaryIndex { .. } => ErrorCode::SecondaryFailed,
            Self::UnmappedBranchGroup(_) => ErrorCode::CalculationFailed,
            Self::UnknownStem(_) => ErrorCode::MutationsFailed,
            Self::ModuleMissing(_) => ErrorCode::ModuleMissing,
            Self::InvalidInput(_) => ErrorCode::InputInvalid,
        }
    }
}
