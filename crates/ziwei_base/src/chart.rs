//! Chart engine: wires the components into one natal-chart computation.
//!
//! Collaborators (palace naming source, settings store) are handed to the
//! engine once, at construction. A computation reads the settings store but
//! never writes or caches it, so changes apply to the next call.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::brightness::{Brightness, BrightnessSchool, brightness};
use crate::decade::{DecadeCycle, annual_palace_index, decade_at_age, decade_cycles};
use crate::error::ChartError;
use crate::gender::{GenderClassification, gender_classification, is_clockwise};
use crate::ganzhi::HeavenlyStem;
use crate::indices::{IndexResolution, LunarBirthRecord, basic_indices};
use crate::mutation::{MutationAssignment, resolve_mutations, resolve_stem_mutations};
use crate::naming::{BuiltinNaming, PalaceNamingSource, ZHONGZHOU_SCHOOL};
use crate::nayin::{FiveElementsLocus, nayin_locus};
use crate::palace::{
    PalaceRing, build_palace_ring, ming_palace_position, shen_palace_position,
};
use crate::secondary::{SecondaryStars, all_secondary_stars};
use crate::settings::{NoSettings, SettingsProvider};
use crate::star::Star;

/// Per-engine tradition selection and input policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Naming-table school key.
    pub palace_school: String,
    pub brightness_school: BrightnessSchool,
    /// Reject records that would resolve to degenerate indices.
    pub strict_input: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            palace_school: ZHONGZHOU_SCHOOL.to_owned(),
            brightness_school: BrightnessSchool::default(),
            strict_input: false,
        }
    }
}

/// A computed natal chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub record: LunarBirthRecord,
    pub resolution: IndexResolution,
    pub gender_classification: GenderClassification,
    /// Direction of the cyclic sequences.
    pub clockwise: bool,
    pub ming_position: u8,
    pub shen_position: u8,
    pub palaces: PalaceRing,
    pub secondary_stars: SecondaryStars,
    /// Brightness of each placed secondary star; unrated stars are omitted.
    pub secondary_brightness: BTreeMap<Star, Brightness>,
    /// Birth-year mutations.
    pub mutations: MutationAssignment,
    pub five_elements: Option<FiveElementsLocus>,
    /// Empty when no locus could be derived.
    pub decades: Vec<DecadeCycle>,
}

/// Builder for [`ChartEngine`].
#[derive(Default)]
pub struct ChartEngineBuilder {
    naming: Option<Box<dyn PalaceNamingSource + Send + Sync>>,
    settings: Option<Box<dyn SettingsProvider + Send + Sync>>,
    options: ChartOptions,
}

impl ChartEngineBuilder {
    /// Palace naming source. Required.
    pub fn naming(mut self, naming: impl PalaceNamingSource + Send + Sync + 'static) -> Self {
        self.naming = Some(Box::new(naming));
        self
    }

    /// Interpretation settings. Defaults to an empty store.
    pub fn settings(mut self, settings: impl SettingsProvider + Send + Sync + 'static) -> Self {
        self.settings = Some(Box::new(settings));
        self
    }

    /// Tradition selection and input policy.
    pub fn options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the collaborators and build the engine.
    pub fn build(self) -> Result<ChartEngine, ChartError> {
        let naming = self.naming.ok_or(ChartError::ModuleMissing("palace naming source"))?;
        if naming.naming_table(&self.options.palace_school).is_none() {
            return Err(ChartError::NamingTableMissing(self.options.palace_school));
        }
        Ok(ChartEngine {
            naming,
            settings: self.settings.unwrap_or_else(|| Box::new(NoSettings)),
            options: self.options,
        })
    }
}

/// Computes natal charts with a fixed set of collaborators.
pub struct ChartEngine {
    naming: Box<dyn PalaceNamingSource + Send + Sync>,
    settings: Box<dyn SettingsProvider + Send + Sync>,
    options: ChartOptions,
}

impl std::fmt::Debug for ChartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEngine")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ChartEngine {
    /// Start a builder.
    pub fn builder() -> ChartEngineBuilder {
        ChartEngineBuilder::default()
    }

    /// Engine with the built-in naming tables, no stored settings, default options.
    pub fn with_defaults() -> Self {
        Self {
            naming: Box::new(BuiltinNaming::new()),
            settings: Box::new(NoSettings),
            options: ChartOptions::default(),
        }
    }

    /// Options the engine was built with.
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Settings store the engine reads interpretations from.
    pub fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    /// Compute the full chart for a birth record.
    pub fn compute(&self, record: &LunarBirthRecord) -> Result<Chart, ChartError> {
        let resolution = basic_indices(record);
        if self.options.strict_input {
            if let Some(reason) = resolution.reason() {
                return Err(ChartError::InvalidInput(reason.to_string()));
            }
        }
        let indices = resolution.indices();
        let year = record.lunar_year;

        let ming_position = ming_palace_position(indices.month_index, indices.time_index);
        let shen_position = shen_palace_position(indices.month_index, indices.time_index);
        let palaces = build_palace_ring(
            ming_position,
            shen_position,
            &self.options.palace_school,
            year,
            self.naming.as_ref(),
        )?;

        let secondary_stars = all_secondary_stars(&indices)?;
        let secondary_brightness = secondary_stars
            .iter()
            .map(|(star, ring)| (star, brightness(star, ring, self.options.brightness_school)))
            .filter(|(_, b)| *b != Brightness::Empty)
            .collect();

        let year_stem = HeavenlyStem::from_index(indices.stem_index)
            .ok_or(ChartError::UnknownStem('?'))?;
        let mutations = resolve_stem_mutations(year_stem, self.settings.as_ref());

        let ming = palaces.ming();
        let five_elements = nayin_locus(ming.stem_index, ming.ring_index);
        let clockwise = is_clockwise(record.gender, year);
        let decades = match five_elements {
            Some(locus) => decade_cycles(ming.ring_index, locus, clockwise).to_vec(),
            None => {
                warn!(year, "no five-elements locus, decade cycles omitted");
                Vec::new()
            }
        };

        debug!(
            year,
            ming = ming_position,
            shen = shen_position,
            degenerate = resolution.is_degenerate(),
            "chart computed"
        );

        Ok(Chart {
            record: *record,
            resolution,
            gender_classification: gender_classification(record.gender, year),
            clockwise,
            ming_position,
            shen_position,
            palaces,
            secondary_stars,
            secondary_brightness,
            mutations,
            five_elements,
            decades,
        })
    }

    /// Mutations of the decade palace covering `age`.
    pub fn decade_mutations(
        &self,
        chart: &Chart,
        age: u16,
    ) -> Result<Option<MutationAssignment>, ChartError> {
        let Some(cycle) = decade_at_age(&chart.decades, age) else {
            return Ok(None);
        };
        self.palace_mutations(chart, cycle.ring_index).map(Some)
    }

    /// Mutations of the annual palace for `year`.
    pub fn annual_mutations(
        &self,
        chart: &Chart,
        year: i32,
    ) -> Result<MutationAssignment, ChartError> {
        self.palace_mutations(chart, annual_palace_index(year))
    }

    fn palace_mutations(
        &self,
        chart: &Chart,
        ring_index: u8,
    ) -> Result<MutationAssignment, ChartError> {
        let palace = chart
            .palaces
            .get(ring_index)
            .ok_or(ChartError::PalacePosition(ring_index))?;
        resolve_mutations(palace.stem_char(), self.settings.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gender::Gender;
    use crate::mutation::Mutation;

    #[test]
    fn builder_requires_naming() {
        let err = ChartEngine::builder().build().unwrap_err();
        assert_eq!(err, ChartError::ModuleMissing("palace naming source"));
    }

    #[test]
    fn builder_checks_school() {
        let options = ChartOptions {
            palace_school: "missing".into(),
            ..ChartOptions::default()
        };
        let err = ChartEngine::builder()
            .naming(BuiltinNaming::new())
            .options(options)
            .build()
            .unwrap_err();
        assert_eq!(err, ChartError::NamingTableMissing("missing".into()));
    }

    #[test]
    fn jiazi_first_month_zi_hour() {
        let engine = ChartEngine::with_defaults();
        let record = LunarBirthRecord::new(1984, 1, 1, 0, false, Gender::Male);
        let chart = engine.compute(&record).unwrap();

        assert_eq!(chart.ming_position, 2);
        assert_eq!(chart.shen_position, 2);
        let ming = chart.palaces.ming();
        assert_eq!(ming.name, "命宮·身宮");
        // 丙寅 → 爐中火, fire six.
        assert_eq!(ming.stem_char(), '丙');
        assert_eq!(chart.five_elements, Some(FiveElementsLocus::Fire6));
        assert_eq!(chart.gender_classification, GenderClassification::YangMale);
        assert!(chart.clockwise);
        assert_eq!(chart.decades.len(), 12);
        assert_eq!(chart.decades[0].start_age, 6);
        assert_eq!(chart.decades[1].ring_index, 3);
        assert_eq!(chart.mutations.star(Mutation::Taboo), Some(Star::TaiYang));
        assert_eq!(chart.secondary_stars.len(), 13);
    }

    #[test]
    fn degenerate_record_still_charts() {
        let engine = ChartEngine::with_defaults();
        let mut record = LunarBirthRecord::new(1990, 6, 15, 3, false, Gender::Female);
        record.lunar_day = None;
        let chart = engine.compute(&record).unwrap();
        assert!(chart.resolution.is_degenerate());
        assert_eq!(chart.ming_position, 2);
    }

    #[test]
    fn strict_mode_rejects_degenerate() {
        let engine = ChartEngine::builder()
            .naming(BuiltinNaming::new())
            .options(ChartOptions {
                strict_input: true,
                ..ChartOptions::default()
            })
            .build()
            .unwrap();
        let mut record = LunarBirthRecord::new(1990, 6, 15, 3, false, Gender::Female);
        record.time_index = None;
        let err = engine.compute(&record).unwrap_err();
        assert_eq!(err.code(), crate::ErrorCode::InputInvalid);
    }

    #[test]
    fn cycle_mutations_use_palace_stem() {
        let engine = ChartEngine::with_defaults();
        let record = LunarBirthRecord::new(1984, 1, 1, 0, false, Gender::Male);
        let chart = engine.compute(&record).unwrap();

        // First decade runs through 丙寅: 天同 祿.
        let decade = engine.decade_mutations(&chart, 10).unwrap().unwrap();
        assert_eq!(decade.star(Mutation::Wealth), Some(Star::TianTong));
        assert_eq!(engine.decade_mutations(&chart, 1).unwrap(), None);

        // 2024 辰 palace of a 甲 year is 戊辰: 貪狼 祿.
        let annual = engine.annual_mutations(&chart, 2024).unwrap();
        assert_eq!(annual.star(Mutation::Wealth), Some(Star::TanLang));
    }

    #[test]
    fn secondary_brightness_only_rated_stars() {
        let engine = ChartEngine::with_defaults();
        let record = LunarBirthRecord::new(1984, 1, 1, 0, false, Gender::Male);
        let chart = engine.compute(&record).unwrap();
        assert!(!chart.secondary_brightness.contains_key(&Star::LeftAssistant));
        // 文昌 at 戌 (10 - 0) is 陷.
        assert_eq!(
            chart.secondary_brightness.get(&Star::LiteraryTalent),
            Some(&Brightness::Fallen)
        );
    }
}
