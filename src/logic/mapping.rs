//! Row ↔ side mapping: deciding once which anonymous score row is Home.

use crate::models::{PlayerIdentity, Side};
use serde::{Deserialize, Serialize};

/// One of the two anonymous score rows, in page order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Row {
    A,
    B,
}

/// How the two rows map to tiebreak score columns.
///
/// The source renders tiebreak columns either in the normal row order or
/// (per one reading of the page structure) swapped. Both readings are kept
/// as explicit strategies; `pick_tiebreak_row_order` selects between them
/// empirically against matches with known ground truth.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    #[default]
    SameAsNormal,
    Inverted,
}

/// Result of the one-time row→side decision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RowSideMapping {
    /// Side assigned to the first (top) row; the other row gets the rest.
    pub row_a: Side,
    /// True when no identity hint matched and the fixed default ordering
    /// (RowA=Home, RowB=Away) was applied.
    pub used_fallback: bool,
}

impl RowSideMapping {
    /// Side of the given row under this mapping.
    pub fn side(&self, row: Row) -> Side {
        match row {
            Row::A => self.row_a,
            Row::B => self.row_a.other(),
        }
    }

    /// Row holding the given side under this mapping.
    pub fn row(&self, side: Side) -> Row {
        if self.row_a == side { Row::A } else { Row::B }
    }

    /// Side of the given row inside a tiebreak, honoring the column-order
    /// strategy. Identical to `side` under `SameAsNormal`.
    pub fn tiebreak_side(&self, row: Row, order: RowOrder) -> Side {
        match order {
            RowOrder::SameAsNormal => self.side(row),
            RowOrder::Inverted => self.side(row).other(),
        }
    }
}

/// Map the two anonymous rows to sides from the optional home/away slug
/// hints. Decided once per match; every later attribution reads from the
/// returned mapping instead of re-inferring.
///
/// Hint precedence: home slug first, then away slug. When nothing matches
/// either row, the fixed default ordering applies and `used_fallback` is set
/// so the quality scorer can account for it.
pub fn map_rows(
    row_a: &PlayerIdentity,
    row_b: &PlayerIdentity,
    home_slug: Option<&str>,
    away_slug: Option<&str>,
) -> RowSideMapping {
    if let Some(home) = home_slug {
        if row_a.matches_slug(home) {
            return RowSideMapping { row_a: Side::Home, used_fallback: false };
        }
        if row_b.matches_slug(home) {
            return RowSideMapping { row_a: Side::Away, used_fallback: false };
        }
    }
    if let Some(away) = away_slug {
        if row_a.matches_slug(away) {
            return RowSideMapping { row_a: Side::Away, used_fallback: false };
        }
        if row_b.matches_slug(away) {
            return RowSideMapping { row_a: Side::Home, used_fallback: false };
        }
    }
    RowSideMapping { row_a: Side::Home, used_fallback: true }
}

/// Resolve a rendered player-name hint (serve icon caption) to a side.
/// Returns None when the name matches neither row, or ambiguously matches
/// both (identical names never decide anything).
pub fn side_of_named_player(
    hint: &str,
    row_a: &PlayerIdentity,
    row_b: &PlayerIdentity,
    mapping: &RowSideMapping,
) -> Option<Side> {
    let hits_a = row_a.matches_name_or_slug(hint);
    let hits_b = row_b.matches_name_or_slug(hint);
    match (hits_a, hits_b) {
        (true, false) => Some(mapping.side(Row::A)),
        (false, true) => Some(mapping.side(Row::B)),
        _ => None,
    }
}
