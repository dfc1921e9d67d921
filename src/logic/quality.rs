//! Quality scorer: compresses validator findings and resolver uncertainty
//! into a 0-100 score plus tags downstream consumers can filter on.

use crate::models::{QualityReport, QualityTag, ResolutionCounters, ValidationResult};
use std::collections::BTreeSet;

// Per-occurrence deduction weights. Flat penalties apply once per match;
// the degraded extraction path carries the heaviest one.
const UNKNOWN_WINNER_WEIGHT: f64 = 2.0;
const MISSING_SERVER_WEIGHT: f64 = 4.0;
const ERROR_FINDING_WEIGHT: f64 = 6.0;
const WARNING_FINDING_WEIGHT: f64 = 1.5;
const FALLBACK_MAPPING_PENALTY: f64 = 10.0;
const LEGACY_EXTRACTOR_PENALTY: f64 = 30.0;

// Deductions are normalized by point count (long matches must not score low
// on length alone), then stretched back onto the 0-100 scale.
const DEDUCTION_SCALE: f64 = 60.0;

const HIGH_UNKNOWN_SHARE: f64 = 0.20;
const SOME_UNKNOWN_SHARE: f64 = 0.05;
const HIGH_QUALITY_FLOOR: u8 = 90;
const MEDIUM_QUALITY_FLOOR: u8 = 70;

/// Score one resolution run.
pub fn score_quality(
    validation: &ValidationResult,
    counters: &ResolutionCounters,
) -> QualityReport {
    let mut deduction = 0.0;
    deduction += counters.unknown_winner_points as f64 * UNKNOWN_WINNER_WEIGHT;
    deduction += counters.missing_server_games as f64 * MISSING_SERVER_WEIGHT;
    deduction += validation.errors.len() as f64 * ERROR_FINDING_WEIGHT;
    deduction += validation.warnings.len() as f64 * WARNING_FINDING_WEIGHT;
    if counters.used_fallback_mapping {
        deduction += FALLBACK_MAPPING_PENALTY;
    }
    if counters.legacy_extractor {
        deduction += LEGACY_EXTRACTOR_PENALTY;
    }

    let normalized = deduction / counters.total_points.max(1) as f64 * DEDUCTION_SCALE;
    let score = (100.0 - normalized).round().clamp(0.0, 100.0) as u8;

    let mut tags = BTreeSet::new();
    let unknown_share =
        counters.unknown_winner_points as f64 / counters.total_points.max(1) as f64;
    if unknown_share > HIGH_UNKNOWN_SHARE {
        tags.insert(QualityTag::HighUnknownWinners);
    } else if unknown_share >= SOME_UNKNOWN_SHARE {
        tags.insert(QualityTag::SomeUnknownWinners);
    }
    if counters.used_fallback_mapping {
        tags.insert(QualityTag::UsedAlternationFallback);
    }
    if counters.missing_server_games > 0 {
        tags.insert(QualityTag::MissingServerIcons);
    }
    if counters.legacy_extractor {
        tags.insert(QualityTag::LegacyExtractor);
    }
    tags.insert(if score >= HIGH_QUALITY_FLOOR {
        QualityTag::HighQuality
    } else if score >= MEDIUM_QUALITY_FLOOR {
        QualityTag::MediumQuality
    } else {
        QualityTag::LowQuality
    });

    QualityReport {
        score,
        tags,
        counters: *counters,
    }
}

/// Combine quality reports from repeated extraction attempts of one match:
/// scores average (integer mean, half rounded up), tags union, and the
/// counters of the best-scoring attempt are kept. None for an empty slice.
pub fn merge_reports(reports: &[QualityReport]) -> Option<QualityReport> {
    if reports.is_empty() {
        return None;
    }
    let n = reports.len() as u32;
    let sum: u32 = reports.iter().map(|r| r.score as u32).sum();
    let score = ((sum + n / 2) / n) as u8;

    let tags: BTreeSet<QualityTag> =
        reports.iter().flat_map(|r| r.tags.iter().copied()).collect();

    let best = reports.iter().max_by_key(|r| r.score)?;

    Some(QualityReport {
        score,
        tags,
        counters: best.counters,
    })
}
