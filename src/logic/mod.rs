//! Match-detail logic: row mapping, marker classification, semantic
//! resolution, validation, quality scoring, and the flat projection.

mod mapping;
mod markers;
mod projection;
mod quality;
mod resolver;
mod scores;
mod validator;

pub use mapping::{map_rows, side_of_named_player, Row, RowOrder, RowSideMapping};
pub use markers::{classify_marker, winning_row, MarkOutcome};
pub use projection::{point_rows, write_point_rows};
pub use quality::{merge_reports, score_quality};
pub use resolver::{
    pick_tiebreak_row_order, resolve_and_assess, resolve_match, ResolveOptions, Resolution,
};
pub use validator::validate_match;
