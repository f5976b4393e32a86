//! Template comparison.
//!
//! The shorter operand is the probe. Every probe entry found in the reference
//! counts as a raw match and is appended to the intersection; the raw count is
//! halved with integer division and scored as
//! `ceil(halved / |probe| * 100)`. The halving is part of the formula, so a
//! template compared with itself scores at most 50, not 100.

use crate::template::TemplateEntry;
use crate::trace::{trace_event, trace_span};
use crate::util::math::ceil_percent;
use crate::util::{RidgeprintError, RidgeprintResult};
use std::collections::HashSet;

/// Result of comparing two templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Similarity in `[0, 100]`.
    pub score: u32,
    /// Probe entries found in the reference, in probe order, not deduplicated.
    pub intersection: Vec<TemplateEntry>,
}

impl MatchOutcome {
    /// Number of raw matches before halving.
    pub fn raw_matches(&self) -> usize {
        self.intersection.len()
    }
}

/// Compares templates, loaded sequences or earlier intersections.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateMatcher;

impl TemplateMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Scores `a` against `b`.
    ///
    /// When both operands have the same length, `a` is the probe.
    pub fn compare<A, B>(&self, a: &A, b: &B) -> RidgeprintResult<MatchOutcome>
    where
        A: AsRef<[TemplateEntry]> + ?Sized,
        B: AsRef<[TemplateEntry]> + ?Sized,
    {
        let (a, b) = (a.as_ref(), b.as_ref());
        let (probe, reference) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        if probe.is_empty() {
            return Err(RidgeprintError::EmptyTemplate);
        }

        let _span = trace_span!(
            "compare",
            probe = probe.len(),
            reference = reference.len()
        )
        .entered();

        let lookup: HashSet<&TemplateEntry> = reference.iter().collect();
        let intersection: Vec<TemplateEntry> = probe
            .iter()
            .filter(|entry| lookup.contains(entry))
            .copied()
            .collect();

        let halved = intersection.len() / 2;
        let score = ceil_percent(halved, probe.len());
        trace_event!("match", raw = intersection.len(), score = score);
        Ok(MatchOutcome {
            score,
            intersection,
        })
    }

    /// Folds several samples of one subject into an accumulated intersection.
    ///
    /// The running intersection starts as the first sample; each later sample
    /// is compared against it and the new intersection replaces it.
    pub fn accumulate<S>(&self, samples: &[S]) -> RidgeprintResult<Vec<TemplateEntry>>
    where
        S: AsRef<[TemplateEntry]>,
    {
        let (first, rest) = samples.split_first().ok_or(RidgeprintError::EmptyTemplate)?;
        let mut acc = first.as_ref().to_vec();
        for sample in rest {
            acc = self.compare(sample, &acc)?.intersection;
        }
        Ok(acc)
    }

    /// Scores one probe against many references in parallel.
    ///
    /// Results keep the order of `references`.
    #[cfg(feature = "rayon")]
    pub fn compare_many<A, B>(&self, probe: &A, references: &[B]) -> Vec<RidgeprintResult<MatchOutcome>>
    where
        A: AsRef<[TemplateEntry]> + Sync + ?Sized,
        B: AsRef<[TemplateEntry]> + Sync,
    {
        use rayon::prelude::*;
        references
            .par_iter()
            .map(|reference| self.compare(probe, reference))
            .collect()
    }

    /// Scores one probe against many references.
    #[cfg(not(feature = "rayon"))]
    pub fn compare_many<A, B>(&self, probe: &A, references: &[B]) -> Vec<RidgeprintResult<MatchOutcome>>
    where
        A: AsRef<[TemplateEntry]> + ?Sized,
        B: AsRef<[TemplateEntry]>,
    {
        references
            .iter()
            .map(|reference| self.compare(probe, reference))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TemplateMatcher;
    use crate::minutia::MinutiaKind::*;
    use crate::template::TemplateEntry;
    use crate::util::RidgeprintError;

    fn e(distance: u32, code: u8) -> TemplateEntry {
        TemplateEntry::try_from((distance, code)).unwrap()
    }

    #[test]
    fn partial_overlap_scores_34() {
        let a = vec![e(5, 1), e(10, 3), e(15, 2)];
        let b = vec![e(5, 1), e(10, 3), e(20, 4)];
        let out = TemplateMatcher::new().compare(&a, &b).unwrap();
        assert_eq!(out.raw_matches(), 2);
        assert_eq!(out.score, 34);
        assert_eq!(out.intersection, vec![e(5, 1), e(10, 3)]);
    }

    #[test]
    fn empty_probe_is_an_error() {
        let a: Vec<TemplateEntry> = Vec::new();
        let b = vec![e(5, 1)];
        let matcher = TemplateMatcher::new();
        assert_eq!(matcher.compare(&a, &b), Err(RidgeprintError::EmptyTemplate));
        assert_eq!(matcher.compare(&b, &a), Err(RidgeprintError::EmptyTemplate));
    }

    #[test]
    fn shorter_operand_is_the_probe() {
        let short = vec![e(5, 1), e(7, 2)];
        let long = vec![e(1, 1), e(5, 1), e(7, 2), e(9, 4)];
        let matcher = TemplateMatcher::new();
        let out = matcher.compare(&long, &short).unwrap();
        assert_eq!(out.intersection, short);
        assert_eq!(out.score, 50);
        assert_eq!(matcher.compare(&short, &long).unwrap(), out);
    }

    #[test]
    fn raw_probe_duplicates_each_count() {
        let probe = vec![e(3, 3), e(3, 3), e(4, 1)];
        let reference = vec![e(3, 3), e(8, 4), e(9, 4), e(10, 4)];
        let out = TemplateMatcher::new().compare(&probe, &reference).unwrap();
        assert_eq!(out.intersection, vec![e(3, 3), e(3, 3)]);
        assert_eq!(out.score, 34);
    }

    #[test]
    fn self_comparison_is_halved() {
        let t = vec![
            TemplateEntry::new(2, RidgeEnding),
            TemplateEntry::new(4, Bifurcation),
            TemplateEntry::new(6, Crossing),
            TemplateEntry::new(8, Crossing),
        ];
        let out = TemplateMatcher::new().compare(&t, &t).unwrap();
        assert_eq!(out.raw_matches(), 4);
        assert_eq!(out.score, 50);
    }

    #[test]
    fn accumulate_narrows_to_shared_entries() {
        let samples = vec![
            vec![e(3, 1), e(5, 1), e(7, 3), e(9, 4)],
            vec![e(5, 1), e(7, 3), e(9, 4), e(11, 2)],
            vec![e(5, 1), e(7, 3), e(12, 2), e(13, 2)],
        ];
        let acc = TemplateMatcher::new().accumulate(&samples).unwrap();
        assert_eq!(acc, vec![e(5, 1), e(7, 3)]);
    }

    #[test]
    fn accumulate_fails_once_nothing_is_shared() {
        let samples = vec![vec![e(3, 1)], vec![e(4, 1)], vec![e(3, 1)]];
        let err = TemplateMatcher::new().accumulate(&samples).unwrap_err();
        assert_eq!(err, RidgeprintError::EmptyTemplate);
        let none: Vec<Vec<TemplateEntry>> = Vec::new();
        assert!(TemplateMatcher::new().accumulate(&none).is_err());
    }

    #[test]
    fn compare_many_keeps_reference_order() {
        let probe = vec![e(5, 1), e(10, 3)];
        let refs = vec![
            vec![e(5, 1), e(10, 3)],
            vec![e(6, 1)],
            Vec::new(),
        ];
        let results = TemplateMatcher::new().compare_many(&probe, &refs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().score, 50);
        assert_eq!(results[1].as_ref().unwrap().score, 0);
        assert_eq!(results[2], Err(RidgeprintError::EmptyTemplate));
    }
}
