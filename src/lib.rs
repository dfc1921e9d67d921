//! Tennis match detail core: turns raw scraped score fragments into a
//! canonical, validated, quality-scored account of every point and game.

pub mod logic;
pub mod models;

pub use logic::{
    classify_marker, map_rows, merge_reports, pick_tiebreak_row_order, point_rows,
    resolve_and_assess, resolve_match, score_quality, side_of_named_player, validate_match,
    winning_row, write_point_rows, MarkOutcome, Resolution, ResolveOptions, Row, RowOrder,
    RowSideMapping,
};
pub use models::{
    Finding, FindingCode, Location, PlayerIdentity, PointRow, QualityReport, QualityTag,
    RawGameBlock, RawMatchInput, RawPoint, ResolutionCounters, ResolveError, ResolvedRecord,
    SemanticGame, SemanticMatch, SemanticPoint, SemanticSet, SetHeader, Side, SideCount,
    ValidationResult,
};
