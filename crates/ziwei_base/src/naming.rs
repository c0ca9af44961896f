//! Palace naming tables, keyed by school.
//!
//! A table lists the twelve palace names in ascending ring order starting at
//! the Ming palace, and the combined name a palace takes when it also hosts the
//! Shen palace. Shen only ever lands an even number of steps from Ming, so only
//! six base names need a combined form.

use std::collections::BTreeMap;

/// Key of the default school.
pub const ZHONGZHOU_SCHOOL: &str = "zhongzhou";
/// Key of the school that uses 奴僕 for the sixth palace.
pub const QUANSHU_SCHOOL: &str = "quanshu";

/// Palace names of one school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalaceNamingTable {
    school: String,
    sequence: [String; 12],
    shen_combined: BTreeMap<String, String>,
}

impl PalaceNamingTable {
    /// Table for `school` with its base sequence and Shen-combined names.
    pub fn new(
        school: impl Into<String>,
        sequence: [String; 12],
        shen_combined: BTreeMap<String, String>,
    ) -> Self {
        Self {
            school: school.into(),
            sequence,
            shen_combined,
        }
    }

    /// School key of this table.
    pub fn school(&self) -> &str {
        &self.school
    }

    /// Names in ring order from the Ming palace.
    pub fn sequence(&self) -> &[String; 12] {
        &self.sequence
    }

    /// Combined name for `base` when it coincides with Shen.
    pub fn shen_combined(&self, base: &str) -> Option<&str> {
        self.shen_combined.get(base).map(String::as_str)
    }
}

/// Supplies naming tables to the palace builder.
pub trait PalaceNamingSource {
    /// Table for `school`, or `None` if the school is unknown.
    fn naming_table(&self, school: &str) -> Option<&PalaceNamingTable>;
}

impl PalaceNamingSource for PalaceNamingTable {
    fn naming_table(&self, school: &str) -> Option<&PalaceNamingTable> {
        (self.school == school).then_some(self)
    }
}

/// Naming tables shipped with the crate.
#[derive(Debug, Clone)]
pub struct BuiltinNaming {
    tables: Vec<PalaceNamingTable>,
}

impl BuiltinNaming {
    /// Source holding the built-in schools.
    pub fn new() -> Self {
        Self {
            tables: vec![
                builtin_table(ZHONGZHOU_SCHOOL, "交友"),
                builtin_table(QUANSHU_SCHOOL, "奴僕"),
            ],
        }
    }

    /// Keys of all built-in schools.
    pub fn schools(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(PalaceNamingTable::school)
    }
}

impl Default for BuiltinNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl PalaceNamingSource for BuiltinNaming {
    fn naming_table(&self, school: &str) -> Option<&PalaceNamingTable> {
        self.tables.iter().find(|t| t.school == school)
    }
}

const COMBINED_SUFFIX: &str = "·身宮";

fn builtin_table(school: &str, friends: &str) -> PalaceNamingTable {
    let names = [
        "命宮", "父母", "福德", "田宅", "官祿", friends, "遷移", "疾厄", "財帛", "子女", "夫妻",
        "兄弟",
    ];
    let sequence = names.map(str::to_owned);
    // Even steps from Ming: 命宮 福德 官祿 遷移 財帛 夫妻.
    let shen_combined = names
        .iter()
        .step_by(2)
        .map(|base| ((*base).to_owned(), format!("{base}{COMBINED_SUFFIX}")))
        .collect();
    PalaceNamingTable::new(school, sequence, shen_combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_schools() {
        let naming = BuiltinNaming::new();
        let schools: Vec<&str> = naming.schools().collect();
        assert_eq!(schools, vec![ZHONGZHOU_SCHOOL, QUANSHU_SCHOOL]);
        assert!(naming.naming_table("unknown").is_none());
    }

    #[test]
    fn sequence_starts_at_ming() {
        let naming = BuiltinNaming::new();
        let table = naming.naming_table(ZHONGZHOU_SCHOOL).unwrap();
        assert_eq!(table.sequence()[0], "命宮");
        assert_eq!(table.sequence()[11], "兄弟");
        assert_eq!(table.sequence()[5], "交友");
    }

    #[test]
    fn quanshu_uses_servants() {
        let naming = BuiltinNaming::new();
        let table = naming.naming_table(QUANSHU_SCHOOL).unwrap();
        assert_eq!(table.sequence()[5], "奴僕");
    }

    #[test]
    fn six_combined_names() {
        let naming = BuiltinNaming::new();
        let table = naming.naming_table(ZHONGZHOU_SCHOOL).unwrap();
        assert_eq!(table.shen_combined("命宮"), Some("命宮·身宮"));
        assert_eq!(table.shen_combined("夫妻"), Some("夫妻·身宮"));
        assert_eq!(table.shen_combined("交友"), None);
        assert_eq!(table.shen_combined("兄弟"), None);
        let combined = table
            .sequence()
            .iter()
            .filter(|n| table.shen_combined(n).is_some())
            .count();
        assert_eq!(combined, 6);
    }

    #[test]
    fn single_table_is_a_source() {
        let table = builtin_table("custom", "交友");
        assert!(table.naming_table("custom").is_some());
        assert!(table.naming_table(ZHONGZHOU_SCHOOL).is_none());
    }
}
