//! Star brightness (廟旺利平陷) by branch, per school.
//!
//! Only the 斗數全書 table is populated. Stars or branches a school does not
//! rate resolve to [`Brightness::Empty`].

use serde::Serialize;

use crate::star::Star;

use self::Brightness::{
    Beneficial as L, Empty as E, Fallen as X, Level as P, Prosperous as W, Temple as M,
};

/// Brightness rating of a star in a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Brightness {
    /// 廟
    Temple,
    /// 旺
    Prosperous,
    /// 利
    Beneficial,
    /// 平
    Level,
    /// 陷
    Fallen,
    /// No rating.
    Empty,
}

impl Brightness {
    /// Single-character symbol, empty string for [`Brightness::Empty`].
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Temple => "廟",
            Self::Prosperous => "旺",
            Self::Beneficial => "利",
            Self::Level => "平",
            Self::Fallen => "陷",
            Self::Empty => "",
        }
    }
}

/// Brightness tradition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum BrightnessSchool {
    /// 斗數全書
    #[default]
    Quanshu,
}

impl BrightnessSchool {
    /// Canonical school key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Quanshu => "斗數全書",
        }
    }

    /// Parse a school key, traditional or simplified.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "斗數全書" | "斗数全书" | "quanshu" => Some(Self::Quanshu),
            _ => None,
        }
    }

    fn table(self) -> &'static [(Star, [Brightness; 12])] {
        match self {
            Self::Quanshu => QUANSHU_TABLE,
        }
    }
}

// Columns: 子 丑 寅 卯 辰 巳 午 未 申 酉 戌 亥
#[rustfmt::skip]
const QUANSHU_TABLE: &[(Star, [Brightness; 12])] = &[
    (Star::ZiWei,          [P, M, M, W, X, W, M, M, W, P, X, W]),
    (Star::TianJi,         [M, X, W, W, L, P, M, X, P, W, L, P]),
    (Star::TaiYang,        [X, X, W, M, W, W, W, P, P, X, X, X]),
    (Star::WuQu,           [W, M, P, L, M, P, W, M, P, L, M, P]),
    (Star::TianTong,       [W, X, L, P, P, M, X, X, W, P, P, M]),
    (Star::LianZhen,       [P, L, M, P, L, X, P, L, M, P, L, X]),
    (Star::TianFu,         [M, M, M, P, M, P, W, M, P, W, M, W]),
    (Star::TaiYin,         [M, M, W, X, X, X, X, P, L, W, W, M]),
    (Star::TanLang,        [W, M, P, L, M, X, W, M, P, L, M, X]),
    (Star::JuMen,          [W, W, M, M, P, P, W, X, M, M, W, W]),
    (Star::TianXiang,      [M, M, M, X, W, P, W, P, M, X, P, P]),
    (Star::TianLiang,      [M, W, M, M, W, X, M, W, X, P, W, X]),
    (Star::QiSha,          [W, M, M, X, W, P, W, W, M, X, M, P]),
    (Star::PoJun,          [M, W, X, W, W, P, M, W, X, X, W, P]),
    (Star::LiteraryTalent, [W, M, X, L, P, M, X, L, W, M, X, L]),
    (Star::LiteraryCraft,  [M, M, P, W, M, M, X, W, P, M, X, W]),
    (Star::PositivePoison, [X, M, E, X, M, E, P, M, E, X, M, E]),
    (Star::CurvedTrap,     [E, M, X, E, M, X, E, M, X, E, M, X]),
    (Star::Fire,           [P, W, M, L, X, W, M, L, X, P, M, P]),
    (Star::Bells,          [X, X, M, M, W, W, M, W, X, X, M, M]),
];

/// Brightness of `star` in `branch_index` under `school`.
pub fn brightness(star: Star, branch_index: u8, school: BrightnessSchool) -> Brightness {
    school
        .table()
        .iter()
        .find(|(s, _)| *s == star)
        .and_then(|(_, row)| row.get(branch_index as usize).copied())
        .unwrap_or(Brightness::Empty)
}

/// Name-keyed lookup: unknown star, branch or school key all give `Empty`.
pub fn brightness_by_name(star_name: &str, branch_index: u8, school_key: &str) -> Brightness {
    match (Star::from_name(star_name), BrightnessSchool::from_key(school_key)) {
        (Some(star), Some(school)) => brightness(star, branch_index, school),
        _ => Brightness::Empty,
    }
}
