//! Secondary star placement.
//!
//! Each star (or star pair) has an anchor ring position and a signed step
//! taken from one basic index. All arithmetic is on the twelve-branch ring.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ChartError;
use crate::ganzhi::ring_offset;
use crate::indices::BasicIndices;
use crate::star::Star;

/// 天魁 by year stem 甲..癸.
const CELESTIAL_CANOPY: [u8; 10] = [1, 0, 11, 11, 1, 0, 1, 6, 3, 3];
/// 天鉞 by year stem 甲..癸.
const CELESTIAL_SEAL: [u8; 10] = [7, 8, 9, 9, 7, 8, 7, 2, 5, 5];
/// 祿存 by year stem 甲..癸.
const PROSPERITY: [u8; 10] = [2, 3, 5, 6, 5, 6, 8, 9, 11, 0];

/// Fire/bells anchors: (branch group, fire anchor, bells anchor).
///
/// 申子辰, 寅午戌, 巳酉丑, 亥卯未.
const FIRE_BELLS_GROUPS: [([u8; 3], u8, u8); 4] = [
    ([8, 0, 4], 2, 10),
    ([2, 6, 10], 1, 3),
    ([5, 9, 1], 3, 10),
    ([11, 3, 7], 9, 10),
];

/// 左輔 / 右弼: `4 + m` / `10 - m`.
pub fn left_right_assist(month_index: u8) -> (u8, u8) {
    let m = i32::from(month_index);
    (ring_offset(4, m), ring_offset(10, -m))
}

/// 文昌 / 文曲: `10 - t` / `4 + t`.
pub fn literary_stars(time_index: u8) -> (u8, u8) {
    let t = i32::from(time_index);
    (ring_offset(10, -t), ring_offset(4, t))
}

/// 地空 / 地劫: `11 - t` / `11 + t`.
pub fn earthly_emptiness_robbery(time_index: u8) -> (u8, u8) {
    let t = i32::from(time_index);
    (ring_offset(11, -t), ring_offset(11, t))
}

/// 天魁 / 天鉞 from the year stem.
pub fn canopy_seal(stem_index: u8) -> Option<(u8, u8)> {
    let i = stem_index as usize;
    Some((*CELESTIAL_CANOPY.get(i)?, *CELESTIAL_SEAL.get(i)?))
}

/// 祿存 from the year stem.
pub fn prosperity(stem_index: u8) -> Option<u8> {
    PROSPERITY.get(stem_index as usize).copied()
}

/// 擎羊 / 陀羅 flank 祿存 one step either side.
pub fn poison_trap(prosperity: u8) -> (u8, u8) {
    (ring_offset(prosperity, 1), ring_offset(prosperity, -1))
}

/// 火星 / 鈴星 from the year branch group plus the time index.
pub fn fire_bells(time_index: u8, branch_index: u8) -> Result<(u8, u8), ChartError> {
    let (_, fire, bells) = FIRE_BELLS_GROUPS
        .iter()
        .find(|(group, _, _)| group.contains(&branch_index))
        .ok_or(ChartError::UnmappedBranchGroup(branch_index))?;
    let t = i32::from(time_index);
    Ok((ring_offset(*fire, t), ring_offset(*bells, t)))
}

/// Ring positions of all 13 secondary stars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SecondaryStars {
    positions: BTreeMap<Star, u8>,
}

impl SecondaryStars {
    /// Ring position of `star`, if placed.
    pub fn position(&self, star: Star) -> Option<u8> {
        self.positions.get(&star).copied()
    }

    /// Stars with their ring positions, in star order.
    pub fn iter(&self) -> impl Iterator<Item = (Star, u8)> + '_ {
        self.positions.iter().map(|(s, r)| (*s, *r))
    }

    /// Number of placed stars.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no star is placed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn check_index(what: &'static str, value: u8, max: u8) -> Result<(), ChartError> {
    if value > max {
        return Err(ChartError::SecondaryIndex { what, value });
    }
    Ok(())
}

/// Place every secondary star.
pub fn all_secondary_stars(indices: &BasicIndices) -> Result<SecondaryStars, ChartError> {
    check_index("month index", indices.month_index, 11)?;
    check_index("time index", indices.time_index, 11)?;
    check_index("stem index", indices.stem_index, 9)?;

    let (left, right) = left_right_assist(indices.month_index);
    let (talent, craft) = literary_stars(indices.time_index);
    let (emptiness, robbery) = earthly_emptiness_robbery(indices.time_index);
    let (canopy, seal) = canopy_seal(indices.stem_index).ok_or(ChartError::SecondaryIndex {
        what: "stem index",
        value: indices.stem_index,
    })?;
    let lu = prosperity(indices.stem_index).ok_or(ChartError::SecondaryIndex {
        what: "stem index",
        value: indices.stem_index,
    })?;
    let (poison, trap) = poison_trap(lu);
    let (fire, bells) = fire_bells(indices.time_index, indices.branch_index)?;

    let positions = BTreeMap::from([
        (Star::LeftAssistant, left),
        (Star::RightAssist, right),
        (Star::LiteraryTalent, talent),
        (Star::LiteraryCraft, craft),
        (Star::EarthlyEmptiness, emptiness),
        (Star::EarthlyRobbery, robbery),
        (Star::CelestialCanopy, canopy),
        (Star::CelestialSeal, seal),
        (Star::Prosperity, lu),
        (Star::PositivePoison, poison),
        (Star::CurvedTrap, trap),
        (Star::Fire, fire),
        (Star::Bells, bells),
    ]);
    Ok(SecondaryStars { positions })
}

/// Stars sitting at `ring_index`.
pub fn stars_at_palace(ring_index: u8, stars: &SecondaryStars) -> Vec<Star> {
    stars
        .iter()
        .filter(|&(_, r)| r == ring_index)
        .map(|(s, _)| s)
        .collect()
}
