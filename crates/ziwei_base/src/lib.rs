//! Ziwei Doushu (紫微斗數) natal chart computation.
//!
//! This crate provides:
//! - Basic index resolution from a lunar birth record
//! - Yin-yang gender classification and cycle direction
//! - Ming/Shen palace location and the twelve-palace ring with Five-Tiger stems
//! - Placement of the 13 secondary stars
//! - Four-mutation resolution with selectable interpretations for disputed stems
//! - Five-elements locus, decade cycles, and star brightness
//!
//! Everything here is pure and synchronous. Lunar-calendar conversion and
//! primary-star placement are left to the caller.

pub mod brightness;
pub mod chart;
pub mod decade;
pub mod error;
pub mod ganzhi;
pub mod gender;
pub mod indices;
pub mod mutation;
pub mod naming;
pub mod nayin;
pub mod palace;
pub mod secondary;
pub mod settings;
pub mod star;

pub use brightness::{Brightness, BrightnessSchool, brightness, brightness_by_name};
pub use chart::{Chart, ChartEngine, ChartEngineBuilder, ChartOptions};
pub use decade::{DecadeCycle, annual_palace_index, decade_at_age, decade_cycles};
pub use error::{ChartError, ErrorCode};
pub use ganzhi::{
    ALL_BRANCHES, ALL_STEMS, EarthlyBranch, HeavenlyStem, branch_char, earthly_branch_index,
    heavenly_stem_index, stem_char,
};
pub use gender::{Gender, GenderClassification, gender_classification, is_clockwise};
pub use indices::{
    BasicIndices, DegenerateReason, IndexResolution, LunarBirthRecord, basic_indices, month_index,
};
pub use mutation::{
    ALL_MUTATIONS, DEFAULT_INTERPRETATION, Mutation, MutationAssignment, default_mutations,
    interpretations, is_controversial, mutations_for, resolve_mutations, resolve_stem_mutations,
};
pub use naming::{
    BuiltinNaming, PalaceNamingSource, PalaceNamingTable, QUANSHU_SCHOOL, ZHONGZHOU_SCHOOL,
};
pub use nayin::{FiveElementsLocus, nayin_locus};
pub use palace::{
    Palace, PalaceRing, build_palace_ring, five_tiger_stem_index, ming_palace_position,
    shen_palace_position,
};
pub use secondary::{
    SecondaryStars, all_secondary_stars, canopy_seal, earthly_emptiness_robbery, fire_bells,
    left_right_assist, literary_stars, poison_trap, prosperity, stars_at_palace,
};
pub use settings::{INTERPRETATION_KEY_PREFIX, NoSettings, SettingsProvider, interpretation_key};
pub use star::{PRIMARY_STARS, SECONDARY_STARS, Star};
