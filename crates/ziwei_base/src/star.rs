//! Star identities: the 14 primary stars and the 13 secondary stars.

use serde::{Serialize, Serializer};

/// A chart star. Serializes as its traditional name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Star {
    // Primary
    ZiWei,
    TianJi,
    TaiYang,
    WuQu,
    TianTong,
    LianZhen,
    TianFu,
    TaiYin,
    TanLang,
    JuMen,
    TianXiang,
    TianLiang,
    QiSha,
    PoJun,
    // Secondary
    LeftAssistant,
    RightAssist,
    LiteraryTalent,
    LiteraryCraft,
    EarthlyEmptiness,
    EarthlyRobbery,
    CelestialCanopy,
    CelestialSeal,
    Prosperity,
    PositivePoison,
    CurvedTrap,
    Fire,
    Bells,
}

/// The 14 primary stars, 紫微 first.
pub const PRIMARY_STARS: [Star; 14] = [
    Star::ZiWei,
    Star::TianJi,
    Star::TaiYang,
    Star::WuQu,
    Star::TianTong,
    Star::LianZhen,
    Star::TianFu,
    Star::TaiYin,
    Star::TanLang,
    Star::JuMen,
    Star::TianXiang,
    Star::TianLiang,
    Star::QiSha,
    Star::PoJun,
];

/// The 13 secondary stars in placement order.
pub const SECONDARY_STARS: [Star; 13] = [
    Star::LeftAssistant,
    Star::RightAssist,
    Star::LiteraryTalent,
    Star::LiteraryCraft,
    Star::EarthlyEmptiness,
    Star::EarthlyRobbery,
    Star::CelestialCanopy,
    Star::CelestialSeal,
    Star::Prosperity,
    Star::PositivePoison,
    Star::CurvedTrap,
    Star::Fire,
    Star::Bells,
];

impl Star {
    /// Traditional Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ZiWei => "紫微",
            Self::TianJi => "天機",
            Self::TaiYang => "太陽",
            Self::WuQu => "武曲",
            Self::TianTong => "天同",
            Self::LianZhen => "廉貞",
            Self::TianFu => "天府",
            Self::TaiYin => "太陰",
            Self::TanLang => "貪狼",
            Self::JuMen => "巨門",
            Self::TianXiang => "天相",
            Self::TianLiang => "天梁",
            Self::QiSha => "七殺",
            Self::PoJun => "破軍",
            Self::LeftAssistant => "左輔",
            Self::RightAssist => "右弼",
            Self::LiteraryTalent => "文昌",
            Self::LiteraryCraft => "文曲",
            Self::EarthlyEmptiness => "地空",
            Self::EarthlyRobbery => "地劫",
            Self::CelestialCanopy => "天魁",
            Self::CelestialSeal => "天鉞",
            Self::Prosperity => "祿存",
            Self::PositivePoison => "擎羊",
            Self::CurvedTrap => "陀羅",
            Self::Fire => "火星",
            Self::Bells => "鈴星",
        }
    }

    /// Simplified Chinese name.
    pub const fn simplified_name(self) -> &'static str {
        match self {
            Self::TianJi => "天机",
            Self::TaiYang => "太阳",
            Self::LianZhen => "廉贞",
            Self::TaiYin => "太阴",
            Self::TanLang => "贪狼",
            Self::JuMen => "巨门",
            Self::QiSha => "七杀",
            Self::PoJun => "破军",
            Self::LeftAssistant => "左辅",
            Self::CelestialSeal => "天钺",
            Self::Prosperity => "禄存",
            Self::CurvedTrap => "陀罗",
            Self::Bells => "铃星",
            other => other.name(),
        }
    }

    /// Parse a traditional or simplified name.
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMARY_STARS
            .iter()
            .chain(SECONDARY_STARS.iter())
            .copied()
            .find(|s| s.name() == name || s.simplified_name() == name)
    }

    /// Whether this is one of the 14 primary stars.
    pub fn is_primary(self) -> bool {
        PRIMARY_STARS.contains(&self)
    }
}

impl Serialize for Star {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
