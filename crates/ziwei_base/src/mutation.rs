//! Four mutations (四化) by heavenly stem.
//!
//! Every stem turns four stars into Wealth (祿), Power (權), Status (科) and
//! Taboo (忌). The Zhongzhou table is the default. For six stems the
//! traditions disagree; those stems carry named alternates
//! (`interpretation_1`, `interpretation_2`, ...) and the user's choice is read
//! from the settings store at resolution time.
//!
//! The same resolver serves the birth-year stem and the stems of the decade
//! and annual cycle palaces.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::error::ChartError;
use crate::ganzhi::HeavenlyStem;
use crate::settings::{SettingsProvider, interpretation_key};
use crate::star::Star;
use crate::star::Star::{
    JuMen, LeftAssistant, LianZhen, LiteraryCraft, LiteraryTalent, PoJun, RightAssist, TaiYang,
    TaiYin, TanLang, TianFu, TianJi, TianLiang, TianTong, TianXiang, WuQu, ZiWei,
};

/// Selection used when the store holds none.
pub const DEFAULT_INTERPRETATION: &str = "interpretation_1";

/// One of the four mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Mutation {
    /// 化祿
    Wealth,
    /// 化權
    Power,
    /// 化科
    Status,
    /// 化忌
    Taboo,
}

/// Mutations in table column order.
pub const ALL_MUTATIONS: [Mutation; 4] = [
    Mutation::Wealth,
    Mutation::Power,
    Mutation::Status,
    Mutation::Taboo,
];

impl Mutation {
    /// Single-character name (祿 權 科 忌).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wealth => "祿",
            Self::Power => "權",
            Self::Status => "科",
            Self::Taboo => "忌",
        }
    }
}

/// Zhongzhou school, columns 祿 權 科 忌, rows 甲..癸.
#[rustfmt::skip]
const ZHONGZHOU: [[Star; 4]; 10] = [
    [LianZhen,  PoJun,     WuQu,           TaiYang],        // 甲
    [TianJi,    TianLiang, ZiWei,          TaiYin],         // 乙
    [TianTong,  TianJi,    LiteraryTalent, LianZhen],       // 丙
    [TaiYin,    TianTong,  TianJi,         JuMen],          // 丁
    [TanLang,   TaiYin,    RightAssist,    TianJi],         // 戊
    [WuQu,      TanLang,   TianLiang,      LiteraryCraft],  // 己
    [TaiYang,   WuQu,      TaiYin,         TianTong],       // 庚
    [JuMen,     TaiYang,   LiteraryCraft,  LiteraryTalent], // 辛
    [TianLiang, ZiWei,     LeftAssistant,  WuQu],           // 壬
    [PoJun,     JuMen,     TaiYin,         TanLang],        // 癸
];

type Interpretation = (&'static str, [Star; 4]);

/// Alternates for the disputed stems; `interpretation_1` repeats the default.
#[rustfmt::skip]
const ALTERNATES: [(HeavenlyStem, &[Interpretation]); 6] = [
    (HeavenlyStem::Jia, &[
        ("interpretation_1", ZHONGZHOU[0]),
        ("interpretation_2", [LianZhen, PoJun, TianFu, TaiYang]),
    ]),
    (HeavenlyStem::Wu, &[
        ("interpretation_1", ZHONGZHOU[4]),
        ("interpretation_2", [TanLang, TaiYin, TaiYang, TianJi]),
    ]),
    (HeavenlyStem::Geng, &[
        ("interpretation_1", ZHONGZHOU[6]),
        ("interpretation_2", [TaiYang, WuQu, TianTong, TaiYin]),
        ("interpretation_3", [TaiYang, WuQu, TianFu, TianTong]),
        ("interpretation_4", [TaiYang, WuQu, TianXiang, TianTong]),
    ]),
    (HeavenlyStem::Xin, &[
        ("interpretation_1", ZHONGZHOU[7]),
        ("interpretation_2", [JuMen, TaiYang, TianFu, LiteraryTalent]),
    ]),
    (HeavenlyStem::Ren, &[
        ("interpretation_1", ZHONGZHOU[8]),
        ("interpretation_2", [TianLiang, ZiWei, TianFu, WuQu]),
    ]),
    (HeavenlyStem::Gui, &[
        ("interpretation_1", ZHONGZHOU[9]),
        ("interpretation_2", [PoJun, JuMen, TaiYang, TanLang]),
    ]),
];

/// Mutation-to-star assignment of one stem, with its inverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationAssignment {
    pub by_type: BTreeMap<Mutation, Star>,
    pub by_star: BTreeMap<Star, Mutation>,
}

impl MutationAssignment {
    fn from_row(row: [Star; 4]) -> Self {
        let by_type: BTreeMap<Mutation, Star> = ALL_MUTATIONS.into_iter().zip(row).collect();
        let by_star = by_type.iter().map(|(m, s)| (*s, *m)).collect();
        Self { by_type, by_star }
    }

    /// Star carrying mutation `m`.
    pub fn star(&self, m: Mutation) -> Option<Star> {
        self.by_type.get(&m).copied()
    }

    /// Mutation carried by `star`, if any.
    pub fn mutation_of(&self, star: Star) -> Option<Mutation> {
        self.by_star.get(&star).copied()
    }
}

fn alternates(stem: HeavenlyStem) -> Option<&'static [Interpretation]> {
    ALTERNATES
        .iter()
        .find(|(s, _)| *s == stem)
        .map(|(_, table)| *table)
}

/// Whether `stem` has disputed readings.
pub fn is_controversial(stem: HeavenlyStem) -> bool {
    alternates(stem).is_some()
}

/// Interpretation keys available for `stem`; empty for undisputed stems.
pub fn interpretations(stem: HeavenlyStem) -> Vec<&'static str> {
    alternates(stem)
        .map(|table| table.iter().map(|(k, _)| *k).collect())
        .unwrap_or_default()
}

/// Zhongzhou assignment of `stem`.
pub fn default_mutations(stem: HeavenlyStem) -> MutationAssignment {
    MutationAssignment::from_row(ZHONGZHOU[stem.index() as usize])
}

/// Assignment of `stem` under a named interpretation.
///
/// Undisputed stems accept only [`DEFAULT_INTERPRETATION`].
pub fn mutations_for(stem: HeavenlyStem, interpretation: &str) -> Option<MutationAssignment> {
    match alternates(stem) {
        Some(table) => table
            .iter()
            .find(|(k, _)| *k == interpretation)
            .map(|(_, row)| MutationAssignment::from_row(*row)),
        None => (interpretation == DEFAULT_INTERPRETATION).then(|| default_mutations(stem)),
    }
}

/// Resolve the mutations of a stem, honouring the stored interpretation.
///
/// The store is read on every call. An unknown selection falls back to the
/// default table with a warning.
pub fn resolve_stem_mutations(
    stem: HeavenlyStem,
    settings: &dyn SettingsProvider,
) -> MutationAssignment {
    if !is_controversial(stem) {
        return default_mutations(stem);
    }
    match settings.get(&interpretation_key(stem)) {
        None => default_mutations(stem),
        Some(selected) if selected == DEFAULT_INTERPRETATION => default_mutations(stem),
        Some(selected) => mutations_for(stem, &selected).unwrap_or_else(|| {
            warn!(stem = %stem.as_char(), %selected, "unknown interpretation, using default");
            default_mutations(stem)
        }),
    }
}

/// Resolve the mutations of a stem given as a character.
pub fn resolve_mutations(
    stem_char: char,
    settings: &dyn SettingsProvider,
) -> Result<MutationAssignment, ChartError> {
    let stem = HeavenlyStem::from_char(stem_char).ok_or(ChartError::UnknownStem(stem_char))?;
    Ok(resolve_stem_mutations(stem, settings))
}
