// Standard Library Imports
use std::collections::{BTreeMap, BTreeSet};

// External Crate Imports
use lipochem::{ChainCombination, ChainError, ChainSymbols, Result};
use tracing::debug;

// Local Crate Imports
use crate::{Detection, PositionTally, VariantCount};

// Public API ==========================================================================================================

impl Detection {
    /// A detection that only one assignment of chains can explain
    #[must_use]
    pub const fn new(combination: ChainCombination, weight: f64) -> Self {
        Self {
            combination,
            weight,
            candidates: None,
        }
    }

    /// A detection that several resolved combinations explain equally well
    #[must_use]
    pub const fn ambiguous(
        combination: ChainCombination,
        weight: f64,
        candidates: Vec<ChainCombination>,
    ) -> Self {
        Self {
            combination,
            weight,
            candidates: Some(candidates),
        }
    }

    #[must_use]
    pub const fn combination(&self) -> &ChainCombination {
        &self.combination
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn candidates(&self) -> Option<&[ChainCombination]> {
        self.candidates.as_deref()
    }

    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        self.candidates.is_some()
    }
}

/// Files every detection under the unresolved key of its combination. Every candidate of an ambiguous detection must
/// have as many slots as the detection itself.
pub fn tally_positions(
    detections: &[Detection],
    symbols: &ChainSymbols,
) -> Result<BTreeMap<String, PositionTally>> {
    let mut tallies: BTreeMap<String, PositionTally> = BTreeMap::new();

    for detection in detections {
        let key = detection.combination.unresolved_key(symbols)?;
        let tally = tallies.entry(key).or_default();
        tally.occurrences += 1;
        tally.weight += detection.weight;

        if let Some(candidates) = &detection.candidates {
            let candidate_keys: BTreeSet<_> = candidates
                .iter()
                .map(|candidate| {
                    ChainError::check_cardinality(detection.combination.len(), candidate.len())?;
                    variant_key(candidate, symbols)
                })
                .collect::<Result<_>>()?;
            tally.ambiguous.push(candidate_keys);
        } else if let Some(variant) = detection.combination.resolved_key(symbols)? {
            let count = tally.variants.entry(variant).or_default();
            count.occurrences += 1;
            count.weight += detection.weight;
        }
    }

    Ok(tallies)
}

impl PositionTally {
    /// Picks the resolved variant to display in place of the unresolved key, but only if it was the only variant
    /// observed and no ambiguous detection rules it out
    #[must_use]
    pub fn decide_promotion(&self) -> Option<&str> {
        let mut variants = self.variants.keys();
        let (Some(variant), None) = (variants.next(), variants.next()) else {
            debug!(
                variants = self.variants.len(),
                "not promoting, since there wasn't exactly one resolved variant"
            );
            return None;
        };

        if let Some(candidates) = self.ambiguous.iter().find(|c| !c.contains(variant)) {
            debug!(
                variant,
                ?candidates,
                "not promoting, since an ambiguous detection excludes the only resolved variant"
            );
            return None;
        }

        debug!(variant, "promoting the only resolved variant");
        Some(variant)
    }

    #[must_use]
    pub const fn occurrences(&self) -> usize {
        self.occurrences
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub const fn variants(&self) -> &BTreeMap<String, VariantCount> {
        &self.variants
    }

    #[must_use]
    pub fn ambiguous(&self) -> &[BTreeSet<String>] {
        &self.ambiguous
    }
}

// Private Functions ===================================================================================================

// NOTE: Candidates should always be resolved, but an unresolved candidate still has to be named somehow. Its
// unresolved key can never match a resolved variant, so it can only ever veto a promotion.
fn variant_key(combination: &ChainCombination, symbols: &ChainSymbols) -> Result<String> {
    match combination.resolved_key(symbols)? {
        Some(key) => Ok(key),
        None => combination.unresolved_key(symbols),
    }
}

// Module Tests ========================================================================================================
