//! Ming/Shen palace location and the twelve-palace ring.
//!
//! Month counts forward from 寅 and the birth hour counts back (Ming) or
//! forward (Shen). Palace stems follow the Five-Tiger rule: the year stem
//! fixes the stem of the 寅 palace and the rest run forward from there.

use serde::Serialize;

use crate::error::ChartError;
use crate::ganzhi::{ALL_BRANCHES, heavenly_stem_index, stem_char};
use crate::naming::PalaceNamingSource;

/// Ring position of 寅, where the Five-Tiger count starts.
const YIN_RING_INDEX: u8 = 2;

/// Stem of the 寅 palace by year stem mod 5 (甲己 → 丙, 乙庚 → 戊, ...).
const FIVE_TIGER_YIN_STEM: [u8; 5] = [2, 4, 6, 8, 0];

/// Ring position of the Ming (Life) palace.
pub fn ming_palace_position(month_index: u8, time_index: u8) -> u8 {
    ((14 + i32::from(month_index) - i32::from(time_index)).rem_euclid(12)) as u8
}

/// Ring position of the Shen (Body) palace.
pub fn shen_palace_position(month_index: u8, time_index: u8) -> u8 {
    ((14 + u32::from(month_index) + u32::from(time_index)) % 12) as u8
}

/// Stem index of the palace at `ring_index` for a year with stem `year_stem_index`.
pub fn five_tiger_stem_index(year_stem_index: u8, ring_index: u8) -> u8 {
    let yin_start = FIVE_TIGER_YIN_STEM[(year_stem_index % 5) as usize];
    let offset = (ring_index + 12 - YIN_RING_INDEX) % 12;
    (yin_start + offset) % 10
}

/// One of the twelve palaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palace {
    /// Fixed branch position, 0 = 子 .. 11 = 亥.
    pub ring_index: u8,
    /// Palace name, combined with 身宮 when it hosts Shen.
    pub name: String,
    /// Palace's own stem, 0..=9.
    pub stem_index: u8,
    pub branch_char: char,
    pub is_ming: bool,
    pub is_shen: bool,
}

impl Palace {
    /// Stem character of the palace.
    pub fn stem_char(&self) -> char {
        stem_char(self.stem_index).unwrap_or('?')
    }
}

/// The twelve palaces, indexed by ring position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PalaceRing {
    palaces: [Palace; 12],
}

impl PalaceRing {
    /// Palace at a ring position.
    pub fn get(&self, ring_index: u8) -> Option<&Palace> {
        self.palaces.get(ring_index as usize)
    }

    /// Palaces in ring order from 子.
    pub fn iter(&self) -> impl Iterator<Item = &Palace> {
        self.palaces.iter()
    }

    /// The Ming palace.
    pub fn ming(&self) -> &Palace {
        self.palaces
            .iter()
            .find(|p| p.is_ming)
            .unwrap_or(&self.palaces[0])
    }

    /// The Shen palace.
    pub fn shen(&self) -> &Palace {
        self.palaces
            .iter()
            .find(|p| p.is_shen)
            .unwrap_or(&self.palaces[0])
    }

    /// First palace whose name starts with `name` (matches combined names too).
    pub fn find_by_name(&self, name: &str) -> Option<&Palace> {
        self.palaces.iter().find(|p| p.name.starts_with(name))
    }
}

/// Build the full palace ring.
///
/// `ming_pos` receives the first name of the school's sequence and each
/// following ring position the next name. The palace at `shen_pos` takes the
/// combined name when the table defines one.
pub fn build_palace_ring(
    ming_pos: u8,
    shen_pos: u8,
    school: &str,
    year: i32,
    naming: &dyn PalaceNamingSource,
) -> Result<PalaceRing, ChartError> {
    if ming_pos > 11 {
        return Err(ChartError::PalacePosition(ming_pos));
    }
    if shen_pos > 11 {
        return Err(ChartError::PalacePosition(shen_pos));
    }
    let table = naming
        .naming_table(school)
        .ok_or_else(|| ChartError::NamingTableMissing(school.to_owned()))?;
    let year_stem = heavenly_stem_index(year);

    let palaces = std::array::from_fn(|i| {
        let ring_index = i as u8;
        let base = table.sequence()[((ring_index + 12 - ming_pos) % 12) as usize].as_str();
        let is_shen = ring_index == shen_pos;
        let name = if is_shen {
            table.shen_combined(base).unwrap_or(base)
        } else {
            base
        };
        Palace {
            ring_index,
            name: name.to_owned(),
            stem_index: five_tiger_stem_index(year_stem, ring_index),
            branch_char: ALL_BRANCHES[i].as_char(),
            is_ming: ring_index == ming_pos,
            is_shen,
        }
    });
    Ok(PalaceRing { palaces })
}
