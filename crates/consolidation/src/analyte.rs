// External Crate Imports
use lipochem::{ChainSymbols, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

// Local Crate Imports
use crate::{
    Analyte, AnalyteReport, ConsolidationError, Detection, DoubleBondHypothesis, PeakGeometry,
    SpeciesReport, ThresholdPolicy, group_by_species, merge_hypotheses, tally_positions,
};

// Public API ==========================================================================================================

impl Analyte {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    #[must_use]
    pub fn hypotheses(&self) -> &[DoubleBondHypothesis] {
        &self.hypotheses
    }

    #[must_use]
    pub const fn peak(&self) -> &PeakGeometry {
        &self.peak
    }
}

/// Names every species detected for `analyte`, promoting resolved names and merging double-bond hypotheses wherever
/// the evidence allows it
pub fn consolidate_analyte(
    analyte: &Analyte,
    symbols: &ChainSymbols,
    policy: &ThresholdPolicy,
) -> Result<AnalyteReport, ConsolidationError> {
    species_reports(analyte, symbols, policy)
        .map(|species| AnalyteReport {
            name: analyte.name.clone(),
            species,
        })
        .map_err(|e| ConsolidationError::new(&analyte.name, e))
}

/// Consolidates every analyte in parallel. Each analyte gets its own result, so one malformed identification never
/// prevents the rest of the batch from being reported.
pub fn consolidate_analytes(
    analytes: &[Analyte],
    symbols: &ChainSymbols,
    policy: &ThresholdPolicy,
) -> Vec<Result<AnalyteReport, ConsolidationError>> {
    info!(analytes = analytes.len(), "consolidating analytes");
    analytes
        .par_iter()
        .map(|analyte| {
            let report = consolidate_analyte(analyte, symbols, policy);
            if let Err(error) = &report {
                warn!(analyte = analyte.name(), %error, cause = %error.error(), "skipping analyte");
            }
            report
        })
        .collect()
}

// Private Functions ===================================================================================================

fn species_reports(
    analyte: &Analyte,
    symbols: &ChainSymbols,
    policy: &ThresholdPolicy,
) -> Result<Vec<SpeciesReport>> {
    let tallies = tally_positions(&analyte.detections, symbols)?;
    let mut hypotheses = group_by_species(&analyte.hypotheses, symbols)?;
    let thresholds = policy.thresholds(&analyte.peak);
    let total_weight: f64 = tallies.values().map(|tally| tally.weight()).sum();

    let mut species = Vec::with_capacity(tallies.len());
    for (key, tally) in &tallies {
        let promoted = tally.decide_promotion();
        let double_bonds = match hypotheses.remove(key) {
            Some(hypotheses) => merge_hypotheses(&hypotheses, analyte.peak.apex, &thresholds)?,
            None => None,
        };
        let double_bond_name = double_bonds
            .as_ref()
            .map(|assignment| assignment.combination().key(symbols))
            .transpose()?;

        species.push(SpeciesReport {
            key: key.clone(),
            display_name: promoted.unwrap_or(key).to_owned(),
            promoted: promoted.is_some(),
            occurrences: tally.occurrences(),
            weight: tally.weight(),
            abundance: relative_abundance(tally.weight(), total_weight),
            double_bond_name,
            double_bond_tier: double_bonds.as_ref().map(|assignment| assignment.tier()),
            double_bonds,
        });
    }

    for key in hypotheses.keys() {
        debug!(analyte = analyte.name(), key, "ignoring double-bond hypotheses for an undetected species");
    }

    species.sort_by(|a, b| b.weight.total_cmp(&a.weight).then_with(|| a.key.cmp(&b.key)));
    Ok(species)
}

fn relative_abundance(weight: f64, total_weight: f64) -> f64 {
    if total_weight > 0.0 {
        100.0 * weight / total_weight
    } else {
        0.0
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use assert_float_eq::assert_float_absolute_eq;
    use insta::assert_snapshot;
    use lipochem::{ChainCombination, ChainError};

    use crate::{AccuracyTier, RetentionThresholds};

    use super::*;

    static SYMBOLS: LazyLock<ChainSymbols> = LazyLock::new(ChainSymbols::default);

    const PEAK: PeakGeometry = PeakGeometry {
        apex: 10.0,
        left_valley: 9.4,
        right_valley: 10.9,
    };

    fn combination(key: &str) -> ChainCombination {
        ChainCombination::decode(key, &SYMBOLS).unwrap()
    }

    fn pc_34_1(candidates: &[&str]) -> Analyte {
        let detections = vec![
            Detection::new(combination("16:0/18:1"), 100.0),
            Detection::new(combination("16:0/18:1"), 50.0),
            Detection::ambiguous(
                combination("16:0/18:1"),
                10.0,
                candidates.iter().map(|&c| combination(c)).collect(),
            ),
        ];
        Analyte::new("PC 34:1".to_owned(), detections, Vec::new(), PEAK)
    }

    fn display_names(report: &AnalyteReport) -> Vec<&str> {
        report
            .species
            .iter()
            .map(|species| species.display_name.as_str())
            .collect()
    }

    #[test]
    fn pc_34_1_promotes_the_consistent_variant() {
        let analyte = pc_34_1(&["16:0/18:1", "18:1/16:0"]);
        let report = consolidate_analyte(&analyte, &SYMBOLS, &ThresholdPolicy::default()).unwrap();
        assert_eq!(report.name, "PC 34:1");
        assert_eq!(display_names(&report), ["16:0/18:1"]);

        let species = &report.species[0];
        assert_eq!(species.key, "16:0_18:1");
        assert!(species.promoted);
        assert_eq!(species.occurrences, 3);
        assert_float_absolute_eq!(species.weight, 160.0);
        assert_float_absolute_eq!(species.abundance, 100.0);
        assert_eq!(species.double_bonds, None);
    }

    #[test]
    fn pc_34_1_ambiguity_vetoes_promotion() {
        let analyte = pc_34_1(&["18:1/16:0"]);
        let report = consolidate_analyte(&analyte, &SYMBOLS, &ThresholdPolicy::default()).unwrap();
        assert_eq!(display_names(&report), ["16:0_18:1"]);
        assert!(!report.species[0].promoted);
    }

    #[test]
    fn species_are_sorted_by_weight() {
        let detections = vec![
            Detection::new(combination("18:0_18:1"), 25.0),
            Detection::new(combination("16:0/20:1"), 25.0),
            Detection::new(combination("16:0_18:1"), 50.0),
            Detection::new(combination("20:1/16:0"), 5.0),
        ];
        let analyte = Analyte::new("PC 36:1".to_owned(), detections, Vec::new(), PEAK);
        let report = consolidate_analyte(&analyte, &SYMBOLS, &ThresholdPolicy::default()).unwrap();

        assert_eq!(
            display_names(&report),
            ["16:0_18:1", "16:0_20:1", "18:0_18:1"]
        );
        let abundances: Vec<_> = report.species.iter().map(|s| s.abundance).collect();
        assert_float_absolute_eq!(abundances[0], 100.0 * 50.0 / 105.0);
        assert_float_absolute_eq!(abundances[1], 100.0 * 30.0 / 105.0);
        assert_float_absolute_eq!(abundances[2], 100.0 * 25.0 / 105.0);
    }

    #[test]
    fn double_bonds_are_merged_per_species() {
        let detections = vec![
            Detection::new(combination("16:0/18:1"), 100.0),
            Detection::new(combination("18:0_18:2"), 10.0),
        ];
        let hypotheses = vec![
            DoubleBondHypothesis::new(combination("16:0/18:1(n-9)"), 10.1),
            DoubleBondHypothesis::new(combination("16:0/18:1(n-9)"), 9.9),
            DoubleBondHypothesis::new(combination("18:0_18:2(n-6)"), 10.4),
            DoubleBondHypothesis::new(combination("18:2(n-6)_18:0"), 12.0),
            DoubleBondHypothesis::new(combination("20:4_14:0(n-5)"), 10.0),
        ];
        let analyte = Analyte::new("PC 34:1".to_owned(), detections, hypotheses, PEAK);
        let policy = ThresholdPolicy::Fixed(RetentionThresholds::new(0.2, 0.5));
        let report = consolidate_analyte(&analyte, &SYMBOLS, &policy).unwrap();

        let palmitoyl_oleoyl = &report.species[0];
        assert_eq!(palmitoyl_oleoyl.display_name, "16:0/18:1");
        assert_eq!(
            palmitoyl_oleoyl.double_bond_name.as_deref(),
            Some("16:0/18:1(n-9)")
        );
        assert_eq!(palmitoyl_oleoyl.double_bond_tier, Some(AccuracyTier::High));

        let stearoyl_linoleoyl = &report.species[1];
        assert_eq!(
            stearoyl_linoleoyl.double_bond_name.as_deref(),
            Some("18:0_18:2(n-6)")
        );
        assert_eq!(
            stearoyl_linoleoyl.double_bond_tier,
            Some(AccuracyTier::Medium)
        );
        assert_eq!(
            stearoyl_linoleoyl
                .double_bonds
                .as_ref()
                .map(|assignment| assignment.supporting()),
            Some(2)
        );
    }

    #[test]
    fn report_fields() {
        let detections = vec![Detection::new(combination("16:0/18:1"), 100.0)];
        let hypotheses = vec![DoubleBondHypothesis::new(combination("16:0/18:1(n-9)"), 10.0)];
        let analyte = Analyte::new("PC 34:1".to_owned(), detections, hypotheses, PEAK);
        let report = consolidate_analyte(&analyte, &SYMBOLS, &ThresholdPolicy::default()).unwrap();

        let species = &report.species[0];
        let fields = format!(
            "{} | {} | {} | {:?}",
            species.display_name,
            species.key,
            species.double_bond_name.as_deref().unwrap_or("-"),
            species.double_bond_tier
        );
        assert_snapshot!(fields, @"16:0/18:1 | 16:0_18:1 | 16:0/18:1(n-9) | Some(High)");
    }

    #[test]
    fn errors_are_isolated_per_analyte() {
        let good = pc_34_1(&["16:0/18:1"]);
        let bad = Analyte::new(
            "PC 36:2".to_owned(),
            vec![Detection::ambiguous(
                combination("18:1/18:1"),
                1.0,
                vec![combination("18:1/18:1/-")],
            )],
            Vec::new(),
            PEAK,
        );
        let reports = consolidate_analytes(
            &[good, bad.clone(), pc_34_1(&["18:1/16:0"])],
            &SYMBOLS,
            &ThresholdPolicy::default(),
        );

        assert_eq!(reports.len(), 3);
        assert_eq!(display_names(reports[0].as_ref().unwrap()), ["16:0/18:1"]);
        assert_eq!(display_names(reports[2].as_ref().unwrap()), ["16:0_18:1"]);

        let error = reports[1].as_ref().unwrap_err();
        assert_eq!(error.analyte(), "PC 36:2");
        assert_eq!(
            error.error(),
            &ChainError::CardinalityMismatch {
                expected: 2,
                found: 3
            }
        );
        assert_snapshot!(error.to_string(), @r#"failed to consolidate the identifications of "PC 36:2""#);
        assert_eq!(
            consolidate_analyte(&bad, &SYMBOLS, &ThresholdPolicy::default()).unwrap_err(),
            *error
        );
    }
}
