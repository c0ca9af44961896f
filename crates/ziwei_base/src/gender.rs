//! Declared gender and its yin-yang classification.

use serde::Serialize;

use crate::ganzhi::earthly_branch_index;

/// Declared gender of the native.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Male,
    Female,
}

/// Birth-year polarity combined with gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GenderClassification {
    YangMale,
    YinMale,
    YangFemale,
    YinFemale,
}

impl GenderClassification {
    /// Chinese label (陽男, 陰男, 陽女, 陰女).
    pub const fn label(self) -> &'static str {
        match self {
            Self::YangMale => "陽男",
            Self::YinMale => "陰男",
            Self::YangFemale => "陽女",
            Self::YinFemale => "陰女",
        }
    }
}

/// 1864 is a 甲子 year; even offsets from it are yang stems.
const POLARITY_EPOCH_YEAR: i32 = 1864;

/// Classify a birth year and gender into one of four yin-yang labels.
pub fn gender_classification(gender: Gender, year: i32) -> GenderClassification {
    let offset = (i64::from(year) - i64::from(POLARITY_EPOCH_YEAR)).rem_euclid(10);
    let yang = offset % 2 == 0;
    match (yang, gender) {
        (true, Gender::Male) => GenderClassification::YangMale,
        (false, Gender::Male) => GenderClassification::YinMale,
        (true, Gender::Female) => GenderClassification::YangFemale,
        (false, Gender::Female) => GenderClassification::YinFemale,
    }
}

/// Direction of the cyclic sequences (life stages, decade cycles).
///
/// Clockwise for a male born in a yang-branch year or a female born in a
/// yin-branch year.
pub fn is_clockwise(gender: Gender, year: i32) -> bool {
    let yang_branch = earthly_branch_index(year) % 2 == 0;
    match gender {
        Gender::Male => yang_branch,
        Gender::Female => !yang_branch,
    }
}
