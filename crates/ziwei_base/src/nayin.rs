//! Five-elements locus (五行局) from the Ming palace's stem and branch.
//!
//! Stems pair up into five groups (甲乙, 丙丁, ...) and branches into six
//! (子丑, 寅卯, ...). The locus is read from a fixed 6x5 matrix.

use serde::Serialize;
use tracing::warn;

/// Rows: branch groups 子丑 .. 戌亥. Columns: stem groups 甲乙 .. 壬癸.
const NAYIN_MATRIX: [[u8; 5]; 6] = [
    [4, 2, 6, 5, 3],
    [2, 6, 5, 3, 4],
    [6, 5, 3, 4, 2],
    [4, 2, 6, 5, 3],
    [2, 6, 5, 3, 4],
    [6, 5, 3, 4, 2],
];

/// The five loci, numbered by the age the first decade cycle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FiveElementsLocus {
    Water2,
    Wood3,
    Metal4,
    Earth5,
    Fire6,
}

impl FiveElementsLocus {
    /// Locus for its number, 2..=6.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            2 => Some(Self::Water2),
            3 => Some(Self::Wood3),
            4 => Some(Self::Metal4),
            5 => Some(Self::Earth5),
            6 => Some(Self::Fire6),
            _ => None,
        }
    }

    /// Locus number 2..=6.
    pub const fn number(self) -> u8 {
        match self {
            Self::Water2 => 2,
            Self::Wood3 => 3,
            Self::Metal4 => 4,
            Self::Earth5 => 5,
            Self::Fire6 => 6,
        }
    }

    /// Element name of the locus.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water2 => "水二局",
            Self::Wood3 => "木三局",
            Self::Metal4 => "金四局",
            Self::Earth5 => "土五局",
            Self::Fire6 => "火六局",
        }
    }
}

/// Locus for a palace stem/branch pair.
///
/// Pass the Ming palace's own stem and branch, not the birth year's.
/// Returns `None` (and logs) for indices outside 0..=9 / 0..=11.
pub fn nayin_locus(stem_index: u8, branch_index: u8) -> Option<FiveElementsLocus> {
    let locus = NAYIN_MATRIX
        .get((branch_index / 2) as usize)
        .and_then(|row| row.get((stem_index / 2) as usize))
        .and_then(|&n| FiveElementsLocus::from_number(n));
    if locus.is_none() {
        warn!(stem_index, branch_index, "no five-elements locus for stem/branch");
    }
    locus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jiazi_is_metal() {
        assert_eq!(nayin_locus(0, 0), Some(FiveElementsLocus::Metal4));
        assert_eq!(nayin_locus(0, 0).map(FiveElementsLocus::number), Some(4));
    }

    #[test]
    fn known_pairs() {
        // 丙寅 爐中火
        assert_eq!(nayin_locus(2, 2), Some(FiveElementsLocus::Fire6));
        // 壬戌 大海水
        assert_eq!(nayin_locus(8, 10), Some(FiveElementsLocus::Water2));
        // 戊辰 大林木
        assert_eq!(nayin_locus(4, 4), Some(FiveElementsLocus::Wood3));
        // 庚午 路旁土
        assert_eq!(nayin_locus(6, 6), Some(FiveElementsLocus::Earth5));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(nayin_locus(10, 0), None);
        assert_eq!(nayin_locus(0, 12), None);
    }

    #[test]
    fn every_cell_valid() {
        for s in 0..10u8 {
            for b in 0..12u8 {
                assert!(nayin_locus(s, b).is_some());
            }
        }
    }
}
