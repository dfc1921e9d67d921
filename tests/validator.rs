//! Integration tests for the invariant validator, driven by hand-built
//! semantic matches so each check is exercised in isolation.

use tennis_match_detail::{
    validate_match, FindingCode, PlayerIdentity, SemanticGame, SemanticMatch, SemanticPoint,
    SemanticSet, Side, SideCount,
};

fn spoint(n: u32, home: &str, away: &str) -> SemanticPoint {
    SemanticPoint {
        point_number: n,
        home_score: home.into(),
        away_score: away.into(),
        server_score: None,
        receiver_score: None,
        point_winner: Some(Side::Home),
    }
}

fn hold(set: u32, game: u32, server: Side) -> SemanticGame {
    SemanticGame {
        set_number: set,
        game_number: game,
        server: Some(server),
        is_tiebreak: false,
        is_break: false,
        winner: Some(server),
        points: vec![
            spoint(1, "15", "0"),
            spoint(2, "30", "0"),
            spoint(3, "40", "0"),
        ],
        games_won_before: SideCount::default(),
    }
}

fn match_of(sets: Vec<SemanticSet>) -> SemanticMatch {
    SemanticMatch {
        home_player: PlayerIdentity::new("j-sinner", "1", "J. Sinner"),
        away_player: PlayerIdentity::new("c-alcaraz", "2", "C. Alcaraz"),
        first_server: Some(Side::Home),
        sets,
    }
}

fn set_of(set_number: u32, games: Vec<SemanticGame>) -> SemanticSet {
    let mut final_score = SideCount::default();
    for g in &games {
        if let Some(w) = g.winner {
            final_score.add(w);
        }
    }
    SemanticSet {
        set_number,
        duration_minutes: None,
        games,
        final_score,
    }
}

fn codes(findings: &[tennis_match_detail::Finding]) -> Vec<FindingCode> {
    findings.iter().map(|f| f.code).collect()
}

#[test]
fn clean_match_validates_ok() {
    let m = match_of(vec![set_of(
        1,
        vec![hold(1, 1, Side::Home), hold(1, 2, Side::Away), hold(1, 3, Side::Home)],
    )]);
    let result = validate_match(&m);
    assert!(result.ok, "unexpected findings: {:?}", result.errors);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn repeated_server_is_an_error() {
    let m = match_of(vec![set_of(
        1,
        vec![hold(1, 1, Side::Home), hold(1, 2, Side::Home)],
    )]);
    let result = validate_match(&m);
    assert!(!result.ok);
    assert!(codes(&result.errors).contains(&FindingCode::ServerNotAlternating));
}

#[test]
fn unknown_servers_do_not_trip_alternation() {
    let mut g1 = hold(1, 1, Side::Home);
    let mut g2 = hold(1, 2, Side::Home);
    g1.server = None;
    g1.winner = None;
    g2.server = None;
    g2.winner = None;
    let m = match_of(vec![set_of(1, vec![g1, g2])]);
    let result = validate_match(&m);
    assert!(!codes(&result.errors).contains(&FindingCode::ServerNotAlternating));
}

#[test]
fn break_flag_disagreements_split_by_direction() {
    // Receiver won but no flag: warning. Server won but flagged: error.
    let mut missed = hold(1, 1, Side::Home);
    missed.winner = Some(Side::Away);
    let mut spurious = hold(1, 2, Side::Away);
    spurious.is_break = true;
    let m = match_of(vec![set_of(1, vec![missed, spurious])]);
    let result = validate_match(&m);
    assert!(codes(&result.warnings).contains(&FindingCode::MissedBreakFlag));
    assert!(codes(&result.errors).contains(&FindingCode::SpuriousBreakFlag));
    assert!(!result.ok);
}

#[test]
fn game_numbering_gap_is_an_error() {
    let m = match_of(vec![set_of(
        1,
        vec![hold(1, 1, Side::Home), hold(1, 3, Side::Away)],
    )]);
    let result = validate_match(&m);
    assert!(codes(&result.errors).contains(&FindingCode::GameNumberingGap));
}

#[test]
fn set_score_must_match_games_won() {
    let mut set = set_of(1, vec![hold(1, 1, Side::Home), hold(1, 2, Side::Away)]);
    set.final_score = SideCount::new(2, 0);
    let result = validate_match(&match_of(vec![set]));
    assert!(codes(&result.errors).contains(&FindingCode::SetScoreMismatch));
}

#[test]
fn bad_labels_are_errors_in_both_game_kinds() {
    let mut normal = hold(1, 1, Side::Home);
    normal.points[0].home_score = "45".into();
    let mut tb = hold(1, 2, Side::Away);
    tb.is_tiebreak = true;
    tb.points = vec![spoint(1, "1", "0"), spoint(2, "7", "240")];
    let m = match_of(vec![set_of(1, vec![normal, tb])]);
    let result = validate_match(&m);
    let errs = codes(&result.errors);
    assert_eq!(
        errs.iter().filter(|c| **c == FindingCode::InvalidScoreLabel).count(),
        2
    );
}

#[test]
fn post_tiebreak_carryover_is_a_warning() {
    let mut tb = hold(1, 2, Side::Away);
    tb.is_tiebreak = true;
    tb.points = vec![spoint(1, "7", "5")];
    let set1 = set_of(1, vec![hold(1, 1, Side::Home), tb]);
    // Away served the tiebreak's first point, yet opens set 2.
    let set2 = set_of(2, vec![hold(2, 1, Side::Away)]);
    let result = validate_match(&match_of(vec![set1, set2]));
    assert!(result.ok);
    assert!(codes(&result.warnings).contains(&FindingCode::TiebreakCarryover));
}

#[test]
fn short_tiebreak_final_is_flagged() {
    let mut tb = hold(1, 1, Side::Home);
    tb.is_tiebreak = true;
    tb.points = vec![spoint(1, "1", "0"), spoint(2, "7", "6")];
    let result = validate_match(&match_of(vec![set_of(1, vec![tb])]));
    assert!(codes(&result.warnings).contains(&FindingCode::TiebreakScoreAnomaly));
}

#[test]
fn seven_five_tiebreak_is_not_flagged() {
    let mut tb = hold(1, 1, Side::Home);
    tb.is_tiebreak = true;
    tb.points = vec![spoint(1, "7", "5")];
    let result = validate_match(&match_of(vec![set_of(1, vec![tb])]));
    assert!(!codes(&result.warnings).contains(&FindingCode::TiebreakScoreAnomaly));
}

#[test]
fn skipped_score_steps_are_warned() {
    let mut g = hold(1, 1, Side::Home);
    g.points = vec![spoint(1, "15", "0"), spoint(2, "40", "0")];
    let result = validate_match(&match_of(vec![set_of(1, vec![g])]));
    assert!(result.ok);
    assert!(codes(&result.warnings).contains(&FindingCode::ImplausibleScoreSequence));
}

#[test]
fn deuce_and_advantage_walk_is_accepted() {
    let mut g = hold(1, 1, Side::Home);
    g.points = vec![
        spoint(1, "15", "0"),
        spoint(2, "15", "15"),
        spoint(3, "30", "15"),
        spoint(4, "30", "30"),
        spoint(5, "40", "30"),
        spoint(6, "40", "40"),
        spoint(7, "A", "40"),
        spoint(8, "40", "40"),
        spoint(9, "A", "40"),
    ];
    let result = validate_match(&match_of(vec![set_of(1, vec![g])]));
    assert!(!codes(&result.warnings).contains(&FindingCode::ImplausibleScoreSequence));
}

#[test]
fn unknown_winner_share_splits_warning_and_error() {
    // 1 of 30 unknown: warning tier.
    let mut games: Vec<SemanticGame> = (1..=10)
        .map(|n| hold(1, n, if n % 2 == 1 { Side::Home } else { Side::Away }))
        .collect();
    games[0].points[0].point_winner = None;
    let result = validate_match(&match_of(vec![set_of(1, games.clone())]));
    assert!(result.ok);
    assert!(codes(&result.warnings).contains(&FindingCode::UnknownWinnersPresent));
    assert!(!codes(&result.errors).contains(&FindingCode::UnknownWinnersHigh));

    // 6 of 30 unknown: error tier, and the warning tier stands down.
    for g in games.iter_mut().take(2) {
        for p in &mut g.points {
            p.point_winner = None;
        }
    }
    let result = validate_match(&match_of(vec![set_of(1, games)]));
    assert!(!result.ok);
    assert!(codes(&result.errors).contains(&FindingCode::UnknownWinnersHigh));
    assert!(!codes(&result.warnings).contains(&FindingCode::UnknownWinnersPresent));
}

#[test]
fn validator_reports_every_finding_not_just_the_first() {
    let mut g1 = hold(1, 1, Side::Home);
    g1.points[0].home_score = "99".into();
    let g2 = hold(1, 2, Side::Home); // alternation error
    let mut set = set_of(1, vec![g1, g2]);
    set.final_score = SideCount::new(0, 2); // score mismatch
    let result = validate_match(&match_of(vec![set]));
    let errs = codes(&result.errors);
    assert!(errs.contains(&FindingCode::InvalidScoreLabel));
    assert!(errs.contains(&FindingCode::ServerNotAlternating));
    assert!(errs.contains(&FindingCode::SetScoreMismatch));
}
