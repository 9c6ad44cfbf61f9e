// Standard Library Imports
use std::collections::BTreeMap;

// External Crate Imports
use itertools::Itertools;
use lipochem::{ChainCombination, ChainError, ChainSymbols, Result};
use tracing::debug;

// Local Crate Imports
use crate::{AccuracyTier, DoubleBondAssignment, DoubleBondHypothesis, RetentionThresholds};

// Public API ==========================================================================================================

impl DoubleBondHypothesis {
    #[must_use]
    pub const fn combination(&self) -> &ChainCombination {
        &self.combination
    }

    #[must_use]
    pub const fn expected_rt(&self) -> f64 {
        self.expected_rt
    }
}

impl DoubleBondAssignment {
    #[must_use]
    pub const fn combination(&self) -> &ChainCombination {
        &self.combination
    }

    #[must_use]
    pub const fn expected_rt(&self) -> f64 {
        self.expected_rt
    }

    #[must_use]
    pub const fn tier(&self) -> AccuracyTier {
        self.tier
    }

    /// The number of hypotheses that were merged into this assignment
    #[must_use]
    pub const fn supporting(&self) -> usize {
        self.supporting
    }
}

/// Groups hypotheses by the unresolved key of their combination, so that each group covers one molecular species
pub fn group_by_species(
    hypotheses: &[DoubleBondHypothesis],
    symbols: &ChainSymbols,
) -> Result<BTreeMap<String, Vec<DoubleBondHypothesis>>> {
    let mut species: BTreeMap<_, Vec<_>> = BTreeMap::new();
    for hypothesis in hypotheses {
        let key = hypothesis.combination.unresolved_key(symbols)?;
        species.entry(key).or_default().push(hypothesis.clone());
    }
    Ok(species)
}

/// Merges the double-bond hypotheses of a single species into (at most) one assignment.
///
/// `High` hypotheses always take precedence: one is returned as-is, and several are merged slot-by-slot, keeping
/// only the omega positions they all agree on. If that consensus leaves every slot unknown, then nothing is returned,
/// even if lower-tier hypotheses exist. Without any `High` hypotheses, `Medium` and `Low` hypotheses are pooled and
/// merged in the same way, but only if at least one of them is `Medium`.
///
/// Hypotheses are compared slot-by-slot in sn-position order when they are all resolved the same way. Otherwise they
/// are aligned by chain, and the merged assignment is unresolved. Assignments are always returned in
/// [`ChainCombination::ordered()`] order.
pub fn merge_hypotheses(
    hypotheses: &[DoubleBondHypothesis],
    observed_rt: f64,
    thresholds: &RetentionThresholds,
) -> Result<Option<DoubleBondAssignment>> {
    let Some(first) = hypotheses.first() else {
        return Ok(None);
    };
    for hypothesis in hypotheses {
        ChainError::check_cardinality(first.combination.len(), hypothesis.combination.len())?;
    }

    let (high, pool): (Vec<_>, Vec<_>) = hypotheses
        .iter()
        .map(|hypothesis| (thresholds.tier(observed_rt, hypothesis.expected_rt), hypothesis))
        .partition(|&(tier, _)| tier == AccuracyTier::High);

    if !high.is_empty() {
        return consensus(&high, observed_rt, AccuracyTier::High);
    }

    if pool.iter().all(|&(tier, _)| tier == AccuracyTier::Low) {
        debug!(
            hypotheses = pool.len(),
            "discarding double-bond hypotheses, since none of them were better than low accuracy"
        );
        return Ok(None);
    }

    consensus(&pool, observed_rt, AccuracyTier::Medium)
}

// Private Functions ===================================================================================================

type TieredHypothesis<'h> = (AccuracyTier, &'h DoubleBondHypothesis);

fn consensus(
    hypotheses: &[TieredHypothesis],
    observed_rt: f64,
    tier: AccuracyTier,
) -> Result<Option<DoubleBondAssignment>> {
    // NOTE: Callers never pass an empty slice, so there is always a template to pick
    let Some(template) = hypotheses
        .iter()
        .map(|&(_, hypothesis)| hypothesis)
        .min_by(|a, b| rt_distance(a, observed_rt).total_cmp(&rt_distance(b, observed_rt)))
    else {
        return Ok(None);
    };

    if let [(_, only)] = hypotheses {
        return Ok(Some(DoubleBondAssignment {
            combination: only.combination.ordered(),
            expected_rt: only.expected_rt,
            tier,
            supporting: 1,
        }));
    }

    // NOTE: Slots can only be compared by sn-position if every hypothesis puts the same chains in the same positions.
    // Otherwise every combination is aligned by chain, and the sn-positions are forgotten.
    let same_positions = hypotheses.iter().all(|(_, h)| {
        h.combination.is_resolved()
            && h.combination.without_omegas() == template.combination.without_omegas()
    });
    let align = |combination: &ChainCombination| {
        if same_positions {
            combination.clone()
        } else {
            combination.aligned()
        }
    };

    let patterns: Vec<_> = hypotheses
        .iter()
        .map(|(_, h)| align(&h.combination).omegas())
        .collect();
    let omegas: Vec<_> = (0..template.combination.len())
        .map(|slot| {
            patterns
                .iter()
                .map(|pattern| pattern[slot])
                .all_equal_value()
                .ok()
                .flatten()
        })
        .collect();

    if omegas.iter().all(Option::is_none) {
        debug!(
            ?tier,
            ?patterns,
            "no chain position had an agreed-upon omega position"
        );
        return Ok(None);
    }

    debug!(
        ?tier,
        ?omegas,
        hypotheses = hypotheses.len(),
        same_positions,
        "merged double-bond hypotheses"
    );
    Ok(Some(DoubleBondAssignment {
        combination: align(&template.combination).with_omegas(&omegas)?.ordered(),
        expected_rt: template.expected_rt,
        tier,
        supporting: hypotheses.len(),
    }))
}

fn rt_distance(hypothesis: &DoubleBondHypothesis, observed_rt: f64) -> f64 {
    (hypothesis.expected_rt - observed_rt).abs()
}

// Module Tests ========================================================================================================
