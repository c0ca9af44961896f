//! Decade cycles (大限) and the annual palace (流年).
//!
//! The first decade starts in the Ming palace at the age given by the
//! five-elements locus. Each following decade moves one palace, forward
//! through the branches when the chart runs clockwise and backward otherwise.

use serde::Serialize;

use crate::ganzhi::{earthly_branch_index, ring_offset};
use crate::nayin::FiveElementsLocus;

/// Years covered by one decade cycle.
pub const DECADE_SPAN: u16 = 10;

/// One decade cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecadeCycle {
    /// Palace the decade runs through.
    pub ring_index: u8,
    /// First nominal age, inclusive.
    pub start_age: u16,
    /// Last nominal age, inclusive.
    pub end_age: u16,
}

impl DecadeCycle {
    /// Whether `age` falls inside this decade.
    pub fn contains(&self, age: u16) -> bool {
        (self.start_age..=self.end_age).contains(&age)
    }
}

/// All twelve decade cycles, in age order.
pub fn decade_cycles(
    ming_ring_index: u8,
    locus: FiveElementsLocus,
    clockwise: bool,
) -> [DecadeCycle; 12] {
    let step = if clockwise { 1 } else { -1 };
    std::array::from_fn(|k| {
        let start_age = u16::from(locus.number()) + DECADE_SPAN * k as u16;
        DecadeCycle {
            ring_index: ring_offset(ming_ring_index, step * k as i32),
            start_age,
            end_age: start_age + DECADE_SPAN - 1,
        }
    })
}

/// The decade covering `age`, if the age has reached the first cycle.
pub fn decade_at_age(cycles: &[DecadeCycle], age: u16) -> Option<&DecadeCycle> {
    cycles.iter().find(|c| c.contains(age))
}

/// Ring position of the annual palace for `year`: the palace of the year's branch.
pub fn annual_palace_index(year: i32) -> u8 {
    earthly_branch_index(year)
}
