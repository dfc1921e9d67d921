//! Denormalized row-per-point projection for flat storage systems.
//!
//! A pure re-shaping of the canonical model; it carries no authority of its
//! own, and re-aggregating it by (set, game) reproduces the canonical
//! per-game server and winner.

use crate::models::{PointRow, SemanticMatch};
use std::io::Write;

/// Flatten a match to one row per point, game-level fields repeated.
pub fn point_rows(m: &SemanticMatch) -> Vec<PointRow> {
    let mut rows = Vec::with_capacity(m.total_points());
    for set in &m.sets {
        for game in &set.games {
            for point in &game.points {
                rows.push(PointRow {
                    set_number: set.set_number,
                    game_number: game.game_number,
                    point_number: point.point_number,
                    server: game.server,
                    game_winner: game.winner,
                    is_tiebreak: game.is_tiebreak,
                    is_break: game.is_break,
                    server_score: point.server_score.clone(),
                    receiver_score: point.receiver_score.clone(),
                    point_winner: point.point_winner,
                });
            }
        }
    }
    rows
}

/// Write the projection as CSV (headers included).
pub fn write_point_rows<W: Write>(out: W, rows: &[PointRow]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
