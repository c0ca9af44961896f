//! Heavenly stems (天干) and earthly branches (地支).
//!
//! Both cycles are anchored at CE 4 = 甲子 (stem index 0, branch index 0).
//! Branch indices double as ring positions: 0 = 子 .. 11 = 亥.

use serde::Serialize;

/// The ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[allow(missing_docs)]
pub enum HeavenlyStem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in order (index 0 = 甲).
pub const ALL_STEMS: [HeavenlyStem; 10] = [
    HeavenlyStem::Jia,
    HeavenlyStem::Yi,
    HeavenlyStem::Bing,
    HeavenlyStem::Ding,
    HeavenlyStem::Wu,
    HeavenlyStem::Ji,
    HeavenlyStem::Geng,
    HeavenlyStem::Xin,
    HeavenlyStem::Ren,
    HeavenlyStem::Gui,
];

const STEM_CHARS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

impl HeavenlyStem {
    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem from a 0-based index.
    pub fn from_index(index: u8) -> Option<Self> {
        ALL_STEMS.get(index as usize).copied()
    }

    /// Stem from its character.
    pub fn from_char(c: char) -> Option<Self> {
        STEM_CHARS
            .iter()
            .position(|&s| s == c)
            .map(|i| ALL_STEMS[i])
    }

    /// Chinese character of the stem.
    pub const fn as_char(self) -> char {
        STEM_CHARS[self as usize]
    }

    /// Even-indexed stems (甲 丙 戊 庚 壬) are yang.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }
}

/// The twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[allow(missing_docs)]
pub enum EarthlyBranch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in order (index 0 = 子).
pub const ALL_BRANCHES: [EarthlyBranch; 12] = [
    EarthlyBranch::Zi,
    EarthlyBranch::Chou,
    EarthlyBranch::Yin,
    EarthlyBranch::Mao,
    EarthlyBranch::Chen,
    EarthlyBranch::Si,
    EarthlyBranch::Wu,
    EarthlyBranch::Wei,
    EarthlyBranch::Shen,
    EarthlyBranch::You,
    EarthlyBranch::Xu,
    EarthlyBranch::Hai,
];

const BRANCH_CHARS: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

impl EarthlyBranch {
    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch from a 0-based index.
    pub fn from_index(index: u8) -> Option<Self> {
        ALL_BRANCHES.get(index as usize).copied()
    }

    /// Branch from its character.
    pub fn from_char(c: char) -> Option<Self> {
        BRANCH_CHARS
            .iter()
            .position(|&b| b == c)
            .map(|i| ALL_BRANCHES[i])
    }

    /// Chinese character of the branch.
    pub const fn as_char(self) -> char {
        BRANCH_CHARS[self as usize]
    }

    /// Even-indexed branches (子 寅 辰 午 申 戌) are yang.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }
}

/// Heavenly stem index of a year: `(year - 4 + 10) mod 10`.
///
/// Uses the Euclidean remainder, so years before the epoch stay well-defined.
pub fn heavenly_stem_index(year: i32) -> u8 {
    (i64::from(year) - 4 + 10).rem_euclid(10) as u8
}

/// Earthly branch index of a year: `(year - 4 + 12) mod 12`.
pub fn earthly_branch_index(year: i32) -> u8 {
    (i64::from(year) - 4 + 12).rem_euclid(12) as u8
}

/// Character of the stem at `index`, if in range.
pub fn stem_char(index: u8) -> Option<char> {
    STEM_CHARS.get(index as usize).copied()
}

/// Character of the branch at `index`, if in range.
pub fn branch_char(index: u8) -> Option<char> {
    BRANCH_CHARS.get(index as usize).copied()
}

/// Step `start` by `delta` positions around the twelve-branch ring.
pub fn ring_offset(start: u8, delta: i32) -> u8 {
    (i32::from(start) + delta).rem_euclid(12) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_indices_sequential() {
        for (i, s) in ALL_STEMS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert_eq!(HeavenlyStem::from_char(s.as_char()), Some(*s));
        }
    }

    #[test]
    fn branch_indices_sequential() {
        for (i, b) in ALL_BRANCHES.iter().enumerate() {
            assert_eq!(b.index() as usize, i);
            assert_eq!(EarthlyBranch::from_char(b.as_char()), Some(*b));
        }
    }

    #[test]
    fn year_1984_is_jiazi() {
        assert_eq!(heavenly_stem_index(1984), 0);
        assert_eq!(earthly_branch_index(1984), 0);
    }

    #[test]
    fn year_2024_is_jiachen() {
        assert_eq!(stem_char(heavenly_stem_index(2024)), Some('甲'));
        assert_eq!(branch_char(earthly_branch_index(2024)), Some('辰'));
    }

    #[test]
    fn years_before_epoch() {
        // CE 3 is 癸亥, one step before 甲子.
        assert_eq!(heavenly_stem_index(3), 9);
        assert_eq!(earthly_branch_index(3), 11);
        assert_eq!(heavenly_stem_index(-100), heavenly_stem_index(-90));
        assert_eq!(earthly_branch_index(-100), earthly_branch_index(-88));
    }

    #[test]
    fn unknown_chars_rejected() {
        assert_eq!(HeavenlyStem::from_char('子'), None);
        assert_eq!(EarthlyBranch::from_char('甲'), None);
        assert_eq!(stem_char(10), None);
        assert_eq!(branch_char(12), None);
    }

    #[test]
    fn ring_offset_wraps_both_ways() {
        assert_eq!(ring_offset(11, 1), 0);
        assert_eq!(ring_offset(0, -1), 11);
        assert_eq!(ring_offset(4, -16), 0);
    }
}
