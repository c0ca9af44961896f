//! Basic indices derived from a lunar birth record.
//!
//! Four small integers drive every placement rule of the chart:
//! the month index, the time-of-day index, and the stem and branch of the
//! birth year. Incomplete records do not fail; they resolve to a degenerate
//! index set so a chart can still be drawn, and the caller is told so.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::warn;

use crate::gender::Gender;
use crate::ganzhi::{earthly_branch_index, heavenly_stem_index};

/// A birth date already converted to the lunar calendar.
///
/// Month, day and time index are optional because the upstream converter
/// may leave them unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LunarBirthRecord {
    pub lunar_year: i32,
    /// 1..=12
    pub lunar_month: Option<u8>,
    /// 1..=30
    pub lunar_day: Option<u8>,
    /// Two-hour period, 0 = 子 .. 11 = 亥.
    pub time_index: Option<u8>,
    pub is_leap_month: bool,
    pub gender: Gender,
}

impl LunarBirthRecord {
    /// Record with every field present.
    pub const fn new(
        lunar_year: i32,
        lunar_month: u8,
        lunar_day: u8,
        time_index: u8,
        is_leap_month: bool,
        gender: Gender,
    ) -> Self {
        Self {
            lunar_year,
            lunar_month: Some(lunar_month),
            lunar_day: Some(lunar_day),
            time_index: Some(time_index),
            is_leap_month,
            gender,
        }
    }
}

/// The four indices every placement rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BasicIndices {
    /// 0..=11, leap-adjusted.
    pub month_index: u8,
    /// 0..=11
    pub time_index: u8,
    /// Stem of the birth year, 0..=9.
    pub stem_index: u8,
    /// Branch of the birth year, 0..=11.
    pub branch_index: u8,
}

/// Why a record fell back to degenerate indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DegenerateReason {
    MissingMonth,
    MissingDay,
    MissingTimeIndex,
    MonthOutOfRange(u8),
    DayOutOfRange(u8),
    TimeIndexOutOfRange(u8),
}

impl Display for DegenerateReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMonth => write!(f, "lunar month is missing"),
            Self::MissingDay => write!(f, "lunar day is missing"),
            Self::MissingTimeIndex => write!(f, "time index is missing"),
            Self::MonthOutOfRange(m) => write!(f, "lunar month {m} outside 1..=12"),
            Self::DayOutOfRange(d) => write!(f, "lunar day {d} outside 1..=30"),
            Self::TimeIndexOutOfRange(t) => write!(f, "time index {t} outside 0..=11"),
        }
    }
}

/// Outcome of index resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndexResolution {
    /// Indices computed from a complete record.
    Valid(BasicIndices),
    /// Month and time indices forced to zero; stem and branch still follow the year.
    Degenerate {
        indices: BasicIndices,
        reason: DegenerateReason,
    },
}

impl IndexResolution {
    /// The indices, computed or defaulted.
    pub const fn indices(&self) -> BasicIndices {
        match self {
            Self::Valid(indices) | Self::Degenerate { indices, .. } => *indices,
        }
    }

    /// Whether any index was defaulted.
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate { .. })
    }

    /// Why the indices were defaulted.
    pub const fn reason(&self) -> Option<DegenerateReason> {
        match self {
            Self::Valid(_) => None,
            Self::Degenerate { reason, .. } => Some(*reason),
        }
    }
}

/// Month index with the leap-month convention.
///
/// The base value is `month - 1`. The second half (day >= 15) of a leap month
/// counts as the following month, wrapping past 11 back to 0.
pub fn month_index(month: u8, day: u8, is_leap_month: bool) -> u8 {
    if is_leap_month && day >= 15 {
        if month > 11 { month - 12 } else { month }
    } else {
        month.saturating_sub(1)
    }
}

fn check_record(record: &LunarBirthRecord) -> Result<(u8, u8, u8), DegenerateReason> {
    let month = record.lunar_month.ok_or(DegenerateReason::MissingMonth)?;
    let day = record.lunar_day.ok_or(DegenerateReason::MissingDay)?;
    let time = record.time_index.ok_or(DegenerateReason::MissingTimeIndex)?;
    if !(1..=12).contains(&month) {
        return Err(DegenerateReason::MonthOutOfRange(month));
    }
    if !(1..=30).contains(&day) {
        return Err(DegenerateReason::DayOutOfRange(day));
    }
    if time > 11 {
        return Err(DegenerateReason::TimeIndexOutOfRange(time));
    }
    Ok((month, day, time))
}

/// Resolve the four basic indices of a birth record.
///
/// Never fails: an incomplete or malformed record logs a warning and yields
/// [`IndexResolution::Degenerate`] with month and time index zero.
pub fn basic_indices(record: &LunarBirthRecord) -> IndexResolution {
    let stem_index = heavenly_stem_index(record.lunar_year);
    let branch_index = earthly_branch_index(record.lunar_year);

    match check_record(record) {
        Ok((month, day, time)) => IndexResolution::Valid(BasicIndices {
            month_index: month_index(month, day, record.is_leap_month),
            time_index: time,
            stem_index,
            branch_index,
        }),
        Err(reason) => {
            warn!(year = record.lunar_year, %reason, "incomplete birth record, using zero indices");
            IndexResolution::Degenerate {
                indices: BasicIndices {
                    month_index: 0,
                    time_index: 0,
                    stem_index,
                    branch_index,
                },
                reason,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_month() {
        assert_eq!(month_index(5, 10, false), 4);
        assert_eq!(month_index(12, 29, false), 11);
    }

    #[test]
    fn leap_second_half_moves_forward() {
        assert_eq!(month_index(1, 20, true), 1);
        assert_eq!(month_index(6, 15, true), 6);
    }

    #[test]
    fn leap_twelfth_month_wraps() {
        assert_eq!(month_index(12, 20, true), 0);
    }

    #[test]
    fn leap_first_half_unchanged() {
        assert_eq!(month_index(5, 10, true), 4);
        assert_eq!(month_index(5, 14, true), 4);
    }

    #[test]
    fn complete_record_is_valid() {
        let record = LunarBirthRecord::new(1990, 6, 15, 3, false, Gender::Male);
        let res = basic_indices(&record);
        assert!(!res.is_degenerate());
        assert_eq!(
            res.indices(),
            BasicIndices {
                month_index: 5,
                time_index: 3,
                stem_index: 6,
                branch_index: 6,
            }
        );
    }

    #[test]
    fn missing_time_is_degenerate() {
        let mut record = LunarBirthRecord::new(1990, 6, 15, 3, false, Gender::Female);
        record.time_index = None;
        let res = basic_indices(&record);
        assert_eq!(res.reason(), Some(DegenerateReason::MissingTimeIndex));
        let idx = res.indices();
        assert_eq!((idx.month_index, idx.time_index), (0, 0));
        // Year indices survive the fallback.
        assert_eq!((idx.stem_index, idx.branch_index), (6, 6));
    }

    #[test]
    fn out_of_range_is_degenerate() {
        let record = LunarBirthRecord::new(1990, 13, 1, 0, false, Gender::Male);
        assert_eq!(
            basic_indices(&record).reason(),
            Some(DegenerateReason::MonthOutOfRange(13))
        );
        let record = LunarBirthRecord::new(1990, 1, 1, 12, false, Gender::Male);
        assert_eq!(
            basic_indices(&record).reason(),
            Some(DegenerateReason::TimeIndexOutOfRange(12))
        );
    }

    #[test]
    fn missing_month_reported_first() {
        let record = LunarBirthRecord {
            lunar_year: 2000,
            lunar_month: None,
            lunar_day: None,
            time_index: None,
            is_leap_month: false,
            gender: Gender::Male,
        };
        assert_eq!(
            basic_indices(&record).reason(),
            Some(DegenerateReason::MissingMonth)
        );
    }
}
