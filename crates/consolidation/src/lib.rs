//! Consolidates many independent chain identifications of one analyte into a single, evidence-backed name

mod analyte;
mod double_bond_consensus;
mod errors;
mod position_tally;
mod retention_window;

// Standard Library Imports
use std::collections::{BTreeMap, BTreeSet};

// External Crate Imports
use derive_more::Constructor;
use lipochem::ChainCombination;
use serde::Serialize;

pub use analyte::{consolidate_analyte, consolidate_analytes};
pub use double_bond_consensus::{group_by_species, merge_hypotheses};
pub use errors::ConsolidationError;
pub use position_tally::tally_positions;

// Constants ===========================================================================================================

/// The narrowest `High` window (in minutes) that [`ThresholdPolicy::default()`] will derive from a peak
pub const DEFAULT_MINIMUM_HIGH: f64 = 0.1;

// Public API ==========================================================================================================

/// A single identification of an analyte's chains, from one spectrum
#[derive(Clone, PartialEq, Debug)]
pub struct Detection {
    combination: ChainCombination,
    weight: f64,
    // NOTE: `Some` marks a detection as ambiguous, listing every resolved combination that explains it equally well
    candidates: Option<Vec<ChainCombination>>,
}

/// Everything observed for one unresolved combination key
#[derive(Clone, PartialEq, Debug, Default)]
pub struct PositionTally {
    occurrences: usize,
    weight: f64,
    variants: BTreeMap<String, VariantCount>,
    ambiguous: Vec<BTreeSet<String>>,
}

#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct VariantCount {
    pub occurrences: usize,
    pub weight: f64,
}

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Clone, PartialEq, Debug, Constructor)]
pub struct DoubleBondHypothesis {
    combination: ChainCombination,
    expected_rt: f64,
}

#[derive(Clone, PartialEq, Debug)]
pub struct DoubleBondAssignment {
    combination: ChainCombination,
    expected_rt: f64,
    tier: AccuracyTier,
    supporting: usize,
}

// NOTE: Ordered from most to least trustworthy
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum AccuracyTier {
    High,
    Medium,
    Low,
}

// ---------------------------------------------------------------------------------------------------------------------

/// Maximum distances (in minutes) between observed and expected retention times for each accuracy tier
#[derive(Copy, Clone, PartialEq, Debug, Constructor)]
pub struct RetentionThresholds {
    pub high: f64,
    pub medium: f64,
}

/// Retention times (in minutes) outlining a chromatographic peak
#[derive(Copy, Clone, PartialEq, Debug, Constructor)]
pub struct PeakGeometry {
    pub apex: f64,
    pub left_valley: f64,
    pub right_valley: f64,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ThresholdPolicy {
    Fixed(RetentionThresholds),
    /// Scales the windows with the width of each analyte's peak
    PeakShape {
        minimum_high: f64,
        medium_ceiling: Option<f64>,
    },
}

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Clone, PartialEq, Debug, Constructor)]
pub struct Analyte {
    name: String,
    detections: Vec<Detection>,
    hypotheses: Vec<DoubleBondHypothesis>,
    peak: PeakGeometry,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct AnalyteReport {
    pub name: String,
    pub species: Vec<SpeciesReport>,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SpeciesReport {
    pub key: String,
    pub display_name: String,
    pub promoted: bool,
    pub occurrences: usize,
    pub weight: f64,
    pub abundance: f64,
    pub double_bond_name: Option<String>,
    pub double_bond_tier: Option<AccuracyTier>,
    #[serde(skip)]
    pub double_bonds: Option<DoubleBondAssignment>,
}
