//! Score-label helpers shared by the resolver and the validator.
//!
//! Labels pass through extraction verbatim; everything about telling a
//! normal game label from a tiebreak integer lives here.

/// The five legal labels of a normal (non-tiebreak) game.
pub const NORMAL_LABELS: [&str; 5] = ["0", "15", "30", "40", "A"];

/// True for one of the five normal game labels.
pub fn is_normal_label(label: &str) -> bool {
    NORMAL_LABELS.contains(&label.trim())
}

/// Parse a label as a tiebreak point count.
pub fn parse_int_label(label: &str) -> Option<u32> {
    label.trim().parse::<u32>().ok()
}

/// True when a label can only occur inside a tiebreak: an integer above 4
/// that is not one of 15/30/40. (Integers 0..=4 are ambiguous with nothing —
/// normal games never render 1..=4 — but a tiebreak that short cannot exist,
/// so they are not treated as evidence on their own.)
pub fn is_tiebreak_evidence(label: &str) -> bool {
    match parse_int_label(label) {
        Some(n) => n > 4 && !matches!(n, 15 | 30 | 40),
        None => false,
    }
}

/// Rank of a normal label on the 0→15→30→40→A ladder.
pub fn normal_rank(label: &str) -> Option<u8> {
    match label.trim() {
        "0" => Some(0),
        "15" => Some(1),
        "30" => Some(2),
        "40" => Some(3),
        "A" => Some(4),
        _ => None,
    }
}

/// Whether one rendered score pair can follow another within a normal game.
///
/// Exactly one side moves per point: one step up the ladder, with advantage
/// only reachable from deuce and deuce re-reachable from advantage.
pub fn is_valid_transition(prev: (u8, u8), next: (u8, u8)) -> bool {
    let (moved, other) = if prev.1 == next.1 && prev.0 != next.0 {
        ((prev.0, next.0), next.1)
    } else if prev.0 == next.0 && prev.1 != next.1 {
        ((prev.1, next.1), next.0)
    } else {
        return false;
    };
    match moved {
        // 0→15, 15→30, 30→40
        (from, to) if to == from + 1 && to <= 3 => true,
        // 40→A and A→40, both only at deuce
        (3, 4) | (4, 3) => other == 3,
        _ => false,
    }
}
