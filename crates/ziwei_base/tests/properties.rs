//! Property tests over the index, palace, secondary-star and mutation rules.

use proptest::prelude::*;
use ziwei_base::{
    ALL_MUTATIONS, ALL_STEMS, BasicIndices, BuiltinNaming, DEFAULT_INTERPRETATION,
    ZHONGZHOU_SCHOOL, all_secondary_stars, build_palace_ring, earthly_branch_index,
    heavenly_stem_index, interpretations, is_controversial, ming_palace_position, mutations_for,
    nayin_locus, shen_palace_position,
};

proptest! {
    #[test]
    fn stem_and_branch_are_periodic(year in -100_000i32..100_000) {
        prop_assert_eq!(heavenly_stem_index(year + 10), heavenly_stem_index(year));
        prop_assert_eq!(earthly_branch_index(year + 12), earthly_branch_index(year));
        prop_assert!(heavenly_stem_index(year) < 10);
        prop_assert!(earthly_branch_index(year) < 12);
    }

    #[test]
    fn palace_ring_is_a_permutation(month in 0u8..12, time in 0u8..12, year in 1800i32..2200) {
        let ming = ming_palace_position(month, time);
        let shen = shen_palace_position(month, time);
        let ring = build_palace_ring(ming, shen, ZHONGZHOU_SCHOOL, year, &BuiltinNaming::new())
            .unwrap();

        let mut seen = [false; 12];
        for p in ring.iter() {
            prop_assert!(!seen[p.ring_index as usize]);
            seen[p.ring_index as usize] = true;
            prop_assert!(p.stem_index < 10);
        }
        prop_assert!(seen.iter().all(|s| *s));
        prop_assert_eq!(ring.iter().filter(|p| p.is_ming).count(), 1);
        prop_assert_eq!(ring.iter().filter(|p| p.is_shen).count(), 1);
        prop_assert_eq!(ring.ming().ring_index, ming);
        prop_assert_eq!(ring.shen().ring_index, shen);
        // Shen always sits on a palace that has a combined name.
        prop_assert!(ring.shen().name.ends_with("身宮"));
    }

    #[test]
    fn palace_stems_keep_ganzhi_parity(month in 0u8..12, time in 0u8..12, year in 1800i32..2200) {
        let ming = ming_palace_position(month, time);
        let shen = shen_palace_position(month, time);
        let ring = build_palace_ring(ming, shen, ZHONGZHOU_SCHOOL, year, &BuiltinNaming::new())
            .unwrap();
        // Every palace is a valid sexagenary pair: stem and branch parity agree.
        for p in ring.iter() {
            prop_assert_eq!(p.stem_index % 2, p.ring_index % 2);
        }
        let ming_palace = ring.ming();
        prop_assert!(nayin_locus(ming_palace.stem_index, ming_palace.ring_index).is_some());
    }

    #[test]
    fn secondary_stars_stay_on_ring(
        month in 0u8..12, time in 0u8..12, stem in 0u8..10, branch in 0u8..12
    ) {
        let indices = BasicIndices { month_index: month, time_index: time, stem_index: stem, branch_index: branch };
        let stars = all_secondary_stars(&indices).unwrap();
        prop_assert_eq!(stars.len(), 13);
        for (_, ring) in stars.iter() {
            prop_assert!(ring < 12);
        }
    }
}

#[test]
fn every_interpretation_is_bijective() {
    for stem in ALL_STEMS {
        let keys = if is_controversial(stem) {
            interpretations(stem)
        } else {
            vec![DEFAULT_INTERPRETATION]
        };
        for key in keys {
            let m = mutations_for(stem, key).unwrap();
            for t in ALL_MUTATIONS {
                assert_eq!(m.by_star[&m.by_type[&t]], t, "{} {key}", stem.as_char());
            }
        }
    }
}
