//! Canonical, side-attributed representation of a resolved match.
//!
//! Unknown is first-class throughout: any `Option<Side>` that is `None`
//! means the source did not render enough to decide, never that we guessed.

use crate::models::player::PlayerIdentity;
use serde::{Deserialize, Serialize};

/// One of the two competitors.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// The opposing side.
    pub fn other(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// A per-side tally (games in a set, sets in a match).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SideCount {
    pub home: u32,
    pub away: u32,
}

impl SideCount {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Bump the tally for one side.
    pub fn add(&mut self, side: Side) {
        match side {
            Side::Home => self.home += 1,
            Side::Away => self.away += 1,
        }
    }
}

/// One resolved point.
///
/// `home_score`/`away_score` are the verbatim labels after row→side mapping.
/// Server/receiver scores are only present when the game's server is known.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SemanticPoint {
    /// 1-based within the game.
    pub point_number: u32,
    pub home_score: String,
    pub away_score: String,
    pub server_score: Option<String>,
    pub receiver_score: Option<String>,
    pub point_winner: Option<Side>,
}

/// One resolved game.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SemanticGame {
    pub set_number: u32,
    /// 1-based, contiguous within the set.
    pub game_number: u32,
    pub server: Option<Side>,
    pub is_tiebreak: bool,
    pub is_break: bool,
    pub winner: Option<Side>,
    pub points: Vec<SemanticPoint>,
    /// Game score in the set when this game started.
    pub games_won_before: SideCount,
}

/// One resolved set.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SemanticSet {
    pub set_number: u32,
    pub duration_minutes: Option<u32>,
    pub games: Vec<SemanticGame>,
    /// Games won per side within this set.
    pub final_score: SideCount,
}

/// The canonical record for one match: ordered sets of ordered games of
/// ordered points, every attribution side-resolved or explicitly Unknown.
///
/// Built once per extraction run and never patched in place; re-extraction
/// produces a fresh value for comparison.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SemanticMatch {
    pub home_player: PlayerIdentity,
    pub away_player: PlayerIdentity,
    /// Server of set 1, game 1.
    pub first_server: Option<Side>,
    pub sets: Vec<SemanticSet>,
}

impl SemanticMatch {
    /// Total points across all sets and games.
    pub fn total_points(&self) -> usize {
        self.sets
            .iter()
            .flat_map(|s| s.games.iter())
            .map(|g| g.points.len())
            .sum()
    }

    /// Points whose winner could not be determined.
    pub fn unknown_winner_points(&self) -> usize {
        self.sets
            .iter()
            .flat_map(|s| s.games.iter())
            .flat_map(|g| g.points.iter())
            .filter(|p| p.point_winner.is_none())
            .count()
    }
}
