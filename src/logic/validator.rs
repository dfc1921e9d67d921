//! Invariant validator: an independent re-check of a finished semantic
//! match. The resolver's own bookkeeping is never the sole witness to its
//! correctness; this walks the whole match, collects every finding, and
//! never mutates or aborts early.

use crate::logic::scores::{is_normal_label, is_valid_transition, normal_rank, parse_int_label};
use crate::models::{
    Finding, FindingCode, Location, SemanticGame, SemanticMatch, SemanticSet, SideCount,
    ValidationResult,
};

/// Tiebreak counts at or above this are treated as corrupt, not just long.
const TIEBREAK_SCORE_CAP: u32 = 100;

/// Share of unknown point winners above which the record is untrustworthy.
const UNKNOWN_WINNER_ERROR_SHARE: f64 = 0.10;

/// Re-check every invariant across the whole match.
pub fn validate_match(m: &SemanticMatch) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for set in &m.sets {
        check_game_numbering(set, &mut errors);
        check_set_score(set, &mut errors);
        check_alternation(set, &mut errors);
        for game in &set.games {
            check_score_labels(game, &mut errors);
            if game.is_tiebreak {
                check_tiebreak_final(game, &mut warnings);
            } else {
                check_break_flag(game, &mut errors, &mut warnings);
                check_score_sequence(game, &mut warnings);
            }
        }
    }
    check_set_boundaries(m, &mut warnings);
    check_winner_coverage(m, &mut errors, &mut warnings);

    ValidationResult {
        ok: errors.is_empty(),
        errors,
        warnings,
    }
}

fn check_game_numbering(set: &SemanticSet, errors: &mut Vec<Finding>) {
    for (i, game) in set.games.iter().enumerate() {
        let expected = i as u32 + 1;
        if game.game_number != expected {
            errors.push(Finding::new(
                FindingCode::GameNumberingGap,
                format!(
                    "game numbered {} at position {} (expected {})",
                    game.game_number, i + 1, expected
                ),
                Location::set(set.set_number),
            ));
        }
    }
}

fn check_set_score(set: &SemanticSet, errors: &mut Vec<Finding>) {
    let mut tally = SideCount::default();
    for game in &set.games {
        if let Some(w) = game.winner {
            tally.add(w);
        }
    }
    if tally != set.final_score {
        errors.push(Finding::new(
            FindingCode::SetScoreMismatch,
            format!(
                "set score {}-{} does not match games won {}-{}",
                set.final_score.home, set.final_score.away, tally.home, tally.away
            ),
            Location::set(set.set_number),
        ));
    }
}

/// Service must alternate between consecutive non-tiebreak games of a set
/// whenever both servers are known. Breaks never perturb the rotation.
fn check_alternation(set: &SemanticSet, errors: &mut Vec<Finding>) {
    for pair in set.games.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.is_tiebreak || next.is_tiebreak {
            continue;
        }
        if let (Some(a), Some(b)) = (prev.server, next.server) {
            if a == b {
                errors.push(Finding::new(
                    FindingCode::ServerNotAlternating,
                    format!("games {} and {} share a server", prev.game_number, next.game_number),
                    Location::game(set.set_number, next.game_number),
                ));
            }
        }
    }
}

/// The side serving a tiebreak's first point must not open the next set.
/// Violations are warnings: they usually reflect an upstream limitation in
/// server attribution rather than bad data.
fn check_set_boundaries(m: &SemanticMatch, warnings: &mut Vec<Finding>) {
    for pair in m.sets.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let Some(last) = prev.games.last() else { continue };
        let Some(first) = next.games.first() else { continue };
        if !last.is_tiebreak {
            continue;
        }
        if let (Some(tb_server), Some(opener)) = (last.server, first.server) {
            if tb_server == opener {
                warnings.push(Finding::new(
                    FindingCode::TiebreakCarryover,
                    format!(
                        "set {} opens with the server of set {}'s tiebreak",
                        next.set_number, prev.set_number
                    ),
                    Location::game(next.set_number, first.game_number),
                ));
            }
        }
    }
}

fn check_score_labels(game: &SemanticGame, errors: &mut Vec<Finding>) {
    for point in &game.points {
        for label in [&point.home_score, &point.away_score] {
            let valid = if game.is_tiebreak {
                parse_int_label(label).is_some_and(|n| n < TIEBREAK_SCORE_CAP)
            } else {
                is_normal_label(label)
            };
            if !valid {
                errors.push(Finding::new(
                    FindingCode::InvalidScoreLabel,
                    format!("score label {label:?} is not valid here"),
                    Location::point(game.set_number, game.game_number, point.point_number),
                ));
            }
        }
    }
}

/// Where server and winner are both known, the break flag must agree with
/// them. A missed flag is informational; a flag on a hold is corrupt.
fn check_break_flag(game: &SemanticGame, errors: &mut Vec<Finding>, warnings: &mut Vec<Finding>) {
    let (Some(server), Some(winner)) = (game.server, game.winner) else {
        return;
    };
    let broke = winner != server;
    if broke && !game.is_break {
        warnings.push(Finding::new(
            FindingCode::MissedBreakFlag,
            format!("game {} won by the receiver but not flagged as a break", game.game_number),
            Location::game(game.set_number, game.game_number),
        ));
    } else if !broke && game.is_break {
        errors.push(Finding::new(
            FindingCode::SpuriousBreakFlag,
            format!("game {} flagged as a break but won by its server", game.game_number),
            Location::game(game.set_number, game.game_number),
        ));
    }
}

/// A finished tiebreak should read at least 7 with a 2-point lead.
fn check_tiebreak_final(game: &SemanticGame, warnings: &mut Vec<Finding>) {
    let Some(last) = game.points.last() else { return };
    let (Some(a), Some(b)) = (
        parse_int_label(&last.home_score),
        parse_int_label(&last.away_score),
    ) else {
        return;
    };
    if a.max(b) < 7 || a.abs_diff(b) < 2 {
        warnings.push(Finding::new(
            FindingCode::TiebreakScoreAnomaly,
            format!("tiebreak ends {a}-{b}, short of 7 with a 2-point lead"),
            Location::game(game.set_number, game.game_number),
        ));
    }
}

/// Point labels in a normal game must walk the 0→15→30→40/deuce→A ladder
/// one step at a time. Deviations are warnings only: they more often point
/// at a rendering quirk than at corrupt data, and label legality alone is
/// deliberately not treated as a strong correctness signal.
fn check_score_sequence(game: &SemanticGame, warnings: &mut Vec<Finding>) {
    let mut prev = (0u8, 0u8);
    for point in &game.points {
        let (Some(h), Some(a)) = (
            normal_rank(&point.home_score),
            normal_rank(&point.away_score),
        ) else {
            // Illegal labels are already errors; sequence checking stops here.
            return;
        };
        let next = (h, a);
        if !is_valid_transition(prev, next) {
            warnings.push(Finding::new(
                FindingCode::ImplausibleScoreSequence,
                format!(
                    "score {}-{} cannot follow {}-{}",
                    point.home_score,
                    point.away_score,
                    rank_label(prev.0),
                    rank_label(prev.1)
                ),
                Location::point(game.set_number, game.game_number, point.point_number),
            ));
        }
        prev = next;
    }
}

fn rank_label(rank: u8) -> &'static str {
    ["0", "15", "30", "40", "A"][rank as usize]
}

fn check_winner_coverage(m: &SemanticMatch, errors: &mut Vec<Finding>, warnings: &mut Vec<Finding>) {
    let total = m.total_points();
    let unknown = m.unknown_winner_points();
    if unknown == 0 {
        return;
    }
    let share = unknown as f64 / total.max(1) as f64;
    let message = format!("{unknown} of {total} points have no determinable winner");
    if share > UNKNOWN_WINNER_ERROR_SHARE {
        errors.push(Finding::new(
            FindingCode::UnknownWinnersHigh,
            message,
            Location::whole_match(),
        ));
    } else {
        warnings.push(Finding::new(
            FindingCode::UnknownWinnersPresent,
            message,
            Location::whole_match(),
        ));
    }
}
