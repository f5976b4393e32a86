//! Template construction from a raster-ordered minutiae set.

use crate::minutia::Minutia;
use crate::template::{Template, TemplateEntry};
use crate::trace::{trace_event, trace_span};
use crate::util::math::trunc_distance;
use crate::util::{RidgeprintError, RidgeprintResult};

/// Which minutiae are paired when measuring distances.
///
/// Each pair contributes `(truncated distance, type of the first minutia)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PairingStrategy {
    /// Consecutive minutiae in raster order, closing the cycle from the last
    /// back to the first.
    #[default]
    RasterAdjacent,
    /// Each minutia with its nearest other minutia.
    NearestNeighbor,
    /// Every unordered pair `i < j`.
    FullyPairwise,
}

impl PairingStrategy {
    /// Returns the unsorted pairs for `minutiae`.
    ///
    /// A single minutia always yields its self pair `(0, kind)`.
    pub fn pairs(self, minutiae: &[Minutia]) -> Vec<TemplateEntry> {
        let n = minutiae.len();
        if n == 1 {
            return vec![TemplateEntry::new(0, minutiae[0].kind)];
        }
        match self {
            Self::RasterAdjacent => minutiae
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    let next = &minutiae[(i + 1) % n];
                    TemplateEntry::new(trunc_distance(m.position(), next.position()), m.kind)
                })
                .collect(),
            Self::NearestNeighbor => minutiae
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    let nearest = minutiae
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, other)| trunc_distance(m.position(), other.position()))
                        .min()
                        .unwrap_or(0);
                    TemplateEntry::new(nearest, m.kind)
                })
                .collect(),
            Self::FullyPairwise => {
                let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
                for (i, m) in minutiae.iter().enumerate() {
                    for other in &minutiae[i + 1..] {
                        out.push(TemplateEntry::new(
                            trunc_distance(m.position(), other.position()),
                            m.kind,
                        ));
                    }
                }
                out
            }
        }
    }
}

/// Builds canonical templates from detected minutiae.
#[derive(Clone, Debug, Default)]
pub struct TemplateBuilder {
    pairing: PairingStrategy,
}

impl TemplateBuilder {
    /// Creates a builder using raster-adjacent pairing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the pairing strategy.
    pub fn with_pairing(mut self, pairing: PairingStrategy) -> Self {
        self.pairing = pairing;
        self
    }

    /// Returns the active pairing strategy.
    pub fn pairing(&self) -> PairingStrategy {
        self.pairing
    }

    /// Pairs, sorts and deduplicates `minutiae` into a template.
    ///
    /// The result depends on the order of `minutiae`: pass them in the raster
    /// order the detector emits.
    pub fn build(&self, minutiae: &[Minutia]) -> RidgeprintResult<Template> {
        if minutiae.is_empty() {
            return Err(RidgeprintError::EmptyMinutiaeSet);
        }
        let _span = trace_span!("build_template", minutiae = minutiae.len()).entered();
        let template = Template::from_entries(self.pairing.pairs(minutiae));
        trace_event!("template", entries = template.len());
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::{PairingStrategy, TemplateBuilder};
    use crate::minutia::Minutia;
    use crate::minutia::MinutiaKind::*;
    use crate::template::TemplateEntry;
    use crate::util::RidgeprintError;

    fn square() -> Vec<Minutia> {
        vec![
            Minutia::new(0, 0, RidgeEnding),
            Minutia::new(3, 0, Bifurcation),
            Minutia::new(0, 4, Bifurcation),
            Minutia::new(3, 4, Crossing),
        ]
    }

    #[test]
    fn empty_set_is_an_error() {
        let err = TemplateBuilder::new().build(&[]).unwrap_err();
        assert_eq!(err, RidgeprintError::EmptyMinutiaeSet);
    }

    #[test]
    fn raster_pairs_close_the_cycle() {
        let pairs = PairingStrategy::RasterAdjacent.pairs(&square());
        assert_eq!(
            pairs,
            vec![
                TemplateEntry::new(3, RidgeEnding),
                TemplateEntry::new(5, Bifurcation),
                TemplateEntry::new(3, Bifurcation),
                TemplateEntry::new(5, Crossing),
            ]
        );
    }

    #[test]
    fn build_sorts_and_deduplicates() {
        let mut minutiae = square();
        minutiae.push(Minutia::new(6, 4, Crossing));
        minutiae.push(Minutia::new(9, 4, Crossing));
        let tpl = TemplateBuilder::new().build(&minutiae).unwrap();
        // (3,4)->(6,4) and (6,4)->(9,4) both give (3, Crossing).
        assert_eq!(
            tpl.entries(),
            &[
                TemplateEntry::new(3, RidgeEnding),
                TemplateEntry::new(3, Bifurcation),
                TemplateEntry::new(3, Crossing),
                TemplateEntry::new(5, Bifurcation),
                TemplateEntry::new(9, Crossing),
            ]
        );
    }

    #[test]
    fn single_minutia_pairs_with_itself() {
        let one = [Minutia::new(7, 7, Bifurcation)];
        for strategy in [
            PairingStrategy::RasterAdjacent,
            PairingStrategy::NearestNeighbor,
            PairingStrategy::FullyPairwise,
        ] {
            let tpl = TemplateBuilder::new()
                .with_pairing(strategy)
                .build(&one)
                .unwrap();
            assert_eq!(tpl.entries(), &[TemplateEntry::new(0, Bifurcation)]);
        }
    }

    #[test]
    fn nearest_neighbor_records_the_shared_distance_on_ties() {
        // (5, 5) is 3 away from both (2, 5) and (8, 5).
        let row = [
            Minutia::new(2, 5, RidgeEnding),
            Minutia::new(5, 5, Crossing),
            Minutia::new(8, 5, Bifurcation),
        ];
        assert_eq!(
            PairingStrategy::NearestNeighbor.pairs(&row),
            vec![
                TemplateEntry::new(3, RidgeEnding),
                TemplateEntry::new(3, Crossing),
                TemplateEntry::new(3, Bifurcation),
            ]
        );
    }

    #[test]
    fn nearest_neighbor_ignores_scan_order() {
        let forward = square();
        let mut reversed = square();
        reversed.reverse();
        let builder = TemplateBuilder::new().with_pairing(PairingStrategy::NearestNeighbor);
        assert_eq!(
            builder.build(&forward).unwrap(),
            builder.build(&reversed).unwrap()
        );
        assert_eq!(
            builder.build(&forward).unwrap().entries(),
            &[
                TemplateEntry::new(3, RidgeEnding),
                TemplateEntry::new(3, Bifurcation),
                TemplateEntry::new(3, Crossing),
            ]
        );
    }

    #[test]
    fn raster_pairing_depends_on_scan_order() {
        let minutiae = vec![
            Minutia::new(0, 0, RidgeEnding),
            Minutia::new(10, 0, Bifurcation),
            Minutia::new(0, 1, Crossing),
        ];
        let mut shuffled = minutiae.clone();
        shuffled.swap(1, 2);
        let builder = TemplateBuilder::new();
        assert_ne!(
            builder.build(&minutiae).unwrap(),
            builder.build(&shuffled).unwrap()
        );
    }

    #[test]
    fn fully_pairwise_covers_every_pair() {
        let pairs = PairingStrategy::FullyPairwise.pairs(&square());
        assert_eq!(pairs.len(), 6);
        assert!(pairs.contains(&TemplateEntry::new(5, RidgeEnding)));
        assert!(pairs.contains(&TemplateEntry::new(4, Bifurcation)));
    }
}
