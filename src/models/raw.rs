//! Raw (pre-semantic) match data as handed over by the extraction layer,
//! and the errors that can abort a resolution run.

use crate::models::player::PlayerIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors that abort a resolution run. Everything else degrades a single
/// field to Unknown and the run continues.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// The extractor delivered no game blocks at all.
    EmptyInput,
    /// Neither score row carries a usable identity (no slug, no name).
    UnresolvedIdentities,
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::EmptyInput => write!(f, "No game blocks in extraction output"),
            ResolveError::UnresolvedIdentities => {
                write!(f, "Neither score row has a usable player identity")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// One rendered point: the two rows' score labels plus the opaque style
/// tokens the page uses to mark which row took the point.
///
/// Scores pass through verbatim: `0/15/30/40/A` in a normal game, small
/// integers inside a tiebreak. Telling the two apart is the resolver's job.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub row_a_score: String,
    pub row_b_score: String,
    pub row_a_marker: String,
    pub row_b_marker: String,
}

impl RawPoint {
    pub fn new(
        row_a_score: impl Into<String>,
        row_b_score: impl Into<String>,
        row_a_marker: impl Into<String>,
        row_b_marker: impl Into<String>,
    ) -> Self {
        Self {
            row_a_score: row_a_score.into(),
            row_b_score: row_b_score.into(),
            row_a_marker: row_a_marker.into(),
            row_b_marker: row_b_marker.into(),
        }
    }
}

/// One game's worth of unresolved scraped data.
///
/// Blocks are discovered in reverse chronological order (the page renders
/// newest first); `order_hint` is the within-set discovery position and the
/// resolver re-sorts on it. `server_name_hint` is the player name rendered
/// next to the serve icon, when one was rendered at all.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawGameBlock {
    pub block_index: u32,
    pub order_hint: u32,
    pub set_index: u32,
    pub server_name_hint: Option<String>,
    pub break_indicator_present: bool,
    pub raw_points: Vec<RawPoint>,
}

/// Set header scraped alongside the game blocks (duration line).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetHeader {
    pub set_index: u32,
    pub duration_minutes: Option<u32>,
}

/// Complete raw bundle for one match: the handover contract with the
/// extraction layer.
///
/// `row_a`/`row_b` are the two anonymous score rows in page order;
/// `home_slug`/`away_slug` are identity hints from elsewhere on the page and
/// may be absent. `legacy_extractor` marks output of the degraded fallback
/// extraction path; `scraped_at` is stamped by the extractor and passed
/// through untouched (this core never reads a clock).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMatchInput {
    pub row_a: PlayerIdentity,
    pub row_b: PlayerIdentity,
    pub home_slug: Option<String>,
    pub away_slug: Option<String>,
    #[serde(default)]
    pub set_headers: Vec<SetHeader>,
    pub blocks: Vec<RawGameBlock>,
    #[serde(default)]
    pub legacy_extractor: bool,
    #[serde(default)]
    pub scraped_at: Option<DateTime<Utc>>,
}
