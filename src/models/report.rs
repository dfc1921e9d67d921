//! Validation findings, quality scoring output, and the persistence payload.

use crate::models::semantic::{SemanticMatch, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Machine-readable code for one validator check.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    InvalidScoreLabel,
    ServerNotAlternating,
    TiebreakCarryover,
    MissedBreakFlag,
    SpuriousBreakFlag,
    GameNumberingGap,
    SetScoreMismatch,
    UnknownWinnersHigh,
    UnknownWinnersPresent,
    TiebreakScoreAnomaly,
    ImplausibleScoreSequence,
}

/// Where in the match a finding points. `game`/`point` are absent for
/// set-level and match-level findings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub set: Option<u32>,
    pub game: Option<u32>,
    pub point: Option<u32>,
}

impl Location {
    pub fn whole_match() -> Self {
        Self::default()
    }

    pub fn set(set: u32) -> Self {
        Self { set: Some(set), ..Self::default() }
    }

    pub fn game(set: u32, game: u32) -> Self {
        Self { set: Some(set), game: Some(game), point: None }
    }

    pub fn point(set: u32, game: u32, point: u32) -> Self {
        Self { set: Some(set), game: Some(game), point: Some(point) }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.set, self.game, self.point) {
            (Some(s), Some(g), Some(p)) => write!(f, "set {s}, game {g}, point {p}"),
            (Some(s), Some(g), None) => write!(f, "set {s}, game {g}"),
            (Some(s), None, _) => write!(f, "set {s}"),
            _ => write!(f, "match"),
        }
    }
}

/// One validator finding. Severity is carried by which `ValidationResult`
/// vector it lives in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub code: FindingCode,
    pub message: String,
    pub location: Location,
}

impl Finding {
    pub fn new(code: FindingCode, message: impl Into<String>, location: Location) -> Self {
        Self { code, message: message.into(), location }
    }
}

/// Everything the validator found across the whole match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff there are zero error-level findings.
    pub ok: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

/// Resolver-side uncertainty bookkeeping, consumed by the quality scorer and
/// persisted alongside the report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResolutionCounters {
    pub total_points: u32,
    pub unknown_winner_points: u32,
    pub missing_server_games: u32,
    pub used_fallback_mapping: bool,
    pub legacy_extractor: bool,
}

/// Categorical quality tags for downstream filtering.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityTag {
    HighUnknownWinners,
    SomeUnknownWinners,
    UsedAlternationFallback,
    MissingServerIcons,
    LegacyExtractor,
    HighQuality,
    MediumQuality,
    LowQuality,
}

/// Quality score plus tags for one resolution run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// 0-100; 100 = nothing degraded.
    pub score: u8,
    pub tags: BTreeSet<QualityTag>,
    pub counters: ResolutionCounters,
}

impl QualityReport {
    pub fn has_tag(&self, tag: QualityTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// The full persistence payload: canonical match plus the verdicts on it,
/// stored together so consumers can decide trust without re-deriving.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    #[serde(rename = "match")]
    pub semantic: SemanticMatch,
    pub validation: ValidationResult,
    pub quality: QualityReport,
    /// Extraction timestamp passed through from the raw bundle.
    #[serde(default)]
    pub scraped_at: Option<DateTime<Utc>>,
}

/// One row of the denormalized row-per-point projection. A pure re-shaping
/// of the canonical model for flat storage; never authoritative on its own.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointRow {
    pub set_number: u32,
    pub game_number: u32,
    pub point_number: u32,
    pub server: Option<Side>,
    pub game_winner: Option<Side>,
    pub is_tiebreak: bool,
    pub is_break: bool,
    pub server_score: Option<String>,
    pub receiver_score: Option<String>,
    pub point_winner: Option<Side>,
}
