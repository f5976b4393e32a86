//! Fingerprint templates: sorted, deduplicated (distance, type) pairs.

use crate::minutia::MinutiaKind;
use crate::util::RidgeprintError;
use serde::{Deserialize, Serialize};

mod build;
pub mod store;

pub use build::{PairingStrategy, TemplateBuilder};

/// One inter-minutiae distance tagged with the type of the source minutia.
///
/// Entries order by distance, then by type code. On disk an entry is the
/// two-element array `[distance, type]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "(u32, u8)", try_from = "(u32, u8)")]
pub struct TemplateEntry {
    pub distance: u32,
    pub kind: MinutiaKind,
}

impl TemplateEntry {
    pub fn new(distance: u32, kind: MinutiaKind) -> Self {
        Self { distance, kind }
    }
}

impl From<TemplateEntry> for (u32, u8) {
    fn from(entry: TemplateEntry) -> Self {
        (entry.distance, entry.kind.code())
    }
}

impl TryFrom<(u32, u8)> for TemplateEntry {
    type Error = RidgeprintError;

    fn try_from((distance, code): (u32, u8)) -> Result<Self, Self::Error> {
        Ok(Self {
            distance,
            kind: MinutiaKind::try_from(code)?,
        })
    }
}

/// Canonical template: entries strictly increasing, so no two are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Template {
    entries: Vec<TemplateEntry>,
}

impl Template {
    /// Sorts and deduplicates `entries` into a template.
    ///
    /// Use this to re-wrap a comparison intersection or a loaded sequence.
    pub fn from_entries(entries: impl IntoIterator<Item = TemplateEntry>) -> Self {
        let mut entries: Vec<TemplateEntry> = entries.into_iter().collect();
        entries.sort_unstable();
        entries.dedup();
        Self { entries }
    }

    /// Returns the entries in ascending order.
    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemplateEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<TemplateEntry> {
        self.entries
    }
}

impl AsRef<[TemplateEntry]> for Template {
    fn as_ref(&self) -> &[TemplateEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Template {
    type Item = &'a TemplateEntry;
    type IntoIter = std::slice::Iter<'a, TemplateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Template, TemplateEntry};
    use crate::minutia::MinutiaKind::*;

    #[test]
    fn from_entries_sorts_by_distance_then_type() {
        let tpl = Template::from_entries([
            TemplateEntry::new(10, Crossing),
            TemplateEntry::new(3, Bifurcation),
            TemplateEntry::new(10, RidgeEnding),
            TemplateEntry::new(3, Bifurcation),
        ]);
        assert_eq!(
            tpl.entries(),
            &[
                TemplateEntry::new(3, Bifurcation),
                TemplateEntry::new(10, RidgeEnding),
                TemplateEntry::new(10, Crossing),
            ]
        );
    }

    #[test]
    fn entries_serialize_as_pairs() {
        let tpl = Template::from_entries([
            TemplateEntry::new(5, RidgeEnding),
            TemplateEntry::new(12, Bifurcation),
        ]);
        let json = serde_json::to_string(&tpl).unwrap();
        assert_eq!(json, "[[5,1],[12,3]]");

        let back: Vec<TemplateEntry> = serde_json::from_str("[[12, 3], [5, 1]]").unwrap();
        assert_eq!(
            back,
            vec![
                TemplateEntry::new(12, Bifurcation),
                TemplateEntry::new(5, RidgeEnding)
            ]
        );
    }

    #[test]
    fn unknown_type_codes_are_rejected() {
        let err = serde_json::from_str::<Vec<TemplateEntry>>("[[4, 9]]").unwrap_err();
        assert!(err.to_string().contains("unknown minutia type 9"));
    }
}
