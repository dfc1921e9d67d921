//! Semantic resolver: raw game blocks in, side-attributed match out.
//!
//! Service attribution is positional, never outcome-driven: within a set the
//! serve alternates every game regardless of breaks, the 6-6 game is a
//! tiebreak served first by whoever's turn it was, and the side that served
//! the tiebreak's first point does not open the following set. When the
//! opening server of set 1 cannot be identified, every attribution that
//! depends on it stays Unknown.

use crate::logic::mapping::{map_rows, side_of_named_player, Row, RowOrder, RowSideMapping};
use crate::logic::markers::{classify_marker, winning_row};
use crate::logic::quality::score_quality;
use crate::logic::scores::{is_tiebreak_evidence, parse_int_label};
use crate::logic::validator::validate_match;
use crate::models::{
    RawGameBlock, RawMatchInput, ResolutionCounters, ResolveError, ResolvedRecord, SemanticGame,
    SemanticMatch, SemanticPoint, SemanticSet, Side, SideCount,
};

/// Knobs for a resolution run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResolveOptions {
    /// Tiebreak score-column order strategy (see `RowOrder`).
    pub tiebreak_row_order: RowOrder,
}

/// Resolver output: the canonical match plus the uncertainty bookkeeping the
/// quality scorer consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub semantic: SemanticMatch,
    pub counters: ResolutionCounters,
}

/// Resolve one match. Pure: same input, bit-identical output.
///
/// Fails only on an empty block list or two blank row identities; any other
/// ambiguity degrades the affected field to Unknown and the run continues.
pub fn resolve_match(
    input: &RawMatchInput,
    options: &ResolveOptions,
) -> Result<Resolution, ResolveError> {
    if input.blocks.is_empty() {
        return Err(ResolveError::EmptyInput);
    }
    if input.row_a.is_blank() && input.row_b.is_blank() {
        return Err(ResolveError::UnresolvedIdentities);
    }

    let mapping = map_rows(
        &input.row_a,
        &input.row_b,
        input.home_slug.as_deref(),
        input.away_slug.as_deref(),
    );
    if mapping.used_fallback {
        log::debug!("no identity hint matched either row, using default row order");
    }

    let (home_player, away_player) = match mapping.side(Row::A) {
        Side::Home => (input.row_a.clone(), input.row_b.clone()),
        Side::Away => (input.row_b.clone(), input.row_a.clone()),
    };

    let set_blocks = order_blocks(&input.blocks);

    // Opening server of set 1, from its first game's serve icon. Without a
    // break the named player is the server; with one, the receiver.
    let first_block = set_blocks[0].1[0];
    let first_server = opening_server(first_block, input, &mapping);
    if first_server.is_none() {
        log::debug!("set 1 opening server unidentifiable, server attributions degrade to Unknown");
    }

    let mut counters = ResolutionCounters {
        used_fallback_mapping: mapping.used_fallback,
        legacy_extractor: input.legacy_extractor,
        ..ResolutionCounters::default()
    };

    let mut sets = Vec::with_capacity(set_blocks.len());
    let mut set_opener = first_server;
    for (ordinal, (set_index, blocks)) in set_blocks.iter().enumerate() {
        let set_number = ordinal as u32 + 1;
        let set = resolve_set(
            set_number,
            *set_index,
            blocks,
            set_opener,
            input,
            &mapping,
            options,
            &mut counters,
        );
        set_opener = next_set_opener(&set);
        sets.push(set);
    }

    Ok(Resolution {
        semantic: SemanticMatch {
            home_player,
            away_player,
            first_server,
            sets,
        },
        counters,
    })
}

/// Resolve, validate, and score in one pass: the persistence payload.
pub fn resolve_and_assess(
    input: &RawMatchInput,
    options: &ResolveOptions,
) -> Result<ResolvedRecord, ResolveError> {
    let resolution = resolve_match(input, options)?;
    let validation = validate_match(&resolution.semantic);
    let quality = score_quality(&validation, &resolution.counters);
    Ok(ResolvedRecord {
        semantic: resolution.semantic,
        validation,
        quality,
        scraped_at: input.scraped_at,
    })
}

/// Group blocks by set and order them chronologically.
///
/// The page renders newest-first, so discovery order is reverse
/// chronological: within a set, a higher `order_hint` (discovered later) is
/// an earlier game. Sets come out ascending by their raw index.
fn order_blocks(blocks: &[RawGameBlock]) -> Vec<(u32, Vec<&RawGameBlock>)> {
    let mut set_indices: Vec<u32> = blocks.iter().map(|b| b.set_index).collect();
    set_indices.sort_unstable();
    set_indices.dedup();

    set_indices
        .into_iter()
        .map(|set_index| {
            let mut in_set: Vec<&RawGameBlock> =
                blocks.iter().filter(|b| b.set_index == set_index).collect();
            in_set.sort_by(|a, b| b.order_hint.cmp(&a.order_hint));
            (set_index, in_set)
        })
        .collect()
}

/// Opening server of set 1 from its first game's block.
fn opening_server(
    block: &RawGameBlock,
    input: &RawMatchInput,
    mapping: &RowSideMapping,
) -> Option<Side> {
    let hint = block.server_name_hint.as_deref()?;
    let named = side_of_named_player(hint, &input.row_a, &input.row_b, mapping)?;
    if block.break_indicator_present {
        // The shown player took the game off the other side's serve.
        Some(named.other())
    } else {
        Some(named)
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_set(
    set_number: u32,
    set_index: u32,
    blocks: &[&RawGameBlock],
    set_opener: Option<Side>,
    input: &RawMatchInput,
    mapping: &RowSideMapping,
    options: &ResolveOptions,
    counters: &mut ResolutionCounters,
) -> SemanticSet {
    let duration_minutes = input
        .set_headers
        .iter()
        .find(|h| h.set_index == set_index)
        .and_then(|h| h.duration_minutes);

    let mut games = Vec::with_capacity(blocks.len());
    let mut tally = SideCount::default();
    for (i, block) in blocks.iter().enumerate() {
        let game_number = i as u32 + 1;
        let is_tiebreak = block
            .raw_points
            .iter()
            .any(|p| is_tiebreak_evidence(&p.row_a_score) || is_tiebreak_evidence(&p.row_b_score));

        // Service alternates on game parity alone; a tiebreak is served
        // first by the side whose turn it would have been anyway.
        let server = set_opener.map(|opener| {
            if game_number % 2 == 1 {
                opener
            } else {
                opener.other()
            }
        });
        if server.is_none() {
            counters.missing_server_games += 1;
        }

        let winner = if is_tiebreak {
            tiebreak_winner(block, mapping, options.tiebreak_row_order)
        } else if block.break_indicator_present {
            server.map(Side::other)
        } else {
            server
        };
        let is_break = !is_tiebreak && block.break_indicator_present;

        let points = resolve_points(block, mapping, server, is_tiebreak, options, counters);

        games.push(SemanticGame {
            set_number,
            game_number,
            server,
            is_tiebreak,
            is_break,
            winner,
            points,
            games_won_before: tally,
        });
        if let Some(w) = winner {
            tally.add(w);
        }
    }

    SemanticSet {
        set_number,
        duration_minutes,
        games,
        final_score: tally,
    }
}

/// Server of the first game of the next set.
///
/// After a normal final game the opener is simply the side whose turn is
/// next; after a tiebreak, the side that served its first point is excluded
/// from opening. Both reduce to the other side of the final game's server,
/// and an unknown server propagates as Unknown.
fn next_set_opener(set: &SemanticSet) -> Option<Side> {
    set.games.last()?.server.map(Side::other)
}

/// Winner of a tiebreak from the final rendered point's two counts; the
/// higher count wins. Equal or unparseable counts stay Unknown — the
/// validator separately flags finals that miss the 7-with-2-lead shape.
fn tiebreak_winner(
    block: &RawGameBlock,
    mapping: &RowSideMapping,
    order: RowOrder,
) -> Option<Side> {
    let last = block.raw_points.last()?;
    let a = parse_int_label(&last.row_a_score)?;
    let b = parse_int_label(&last.row_b_score)?;
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => Some(mapping.tiebreak_side(Row::A, order)),
        std::cmp::Ordering::Less => Some(mapping.tiebreak_side(Row::B, order)),
        std::cmp::Ordering::Equal => None,
    }
}

/// Pick the tiebreak column-order strategy that best fits a corpus of
/// matches with known ground truth: resolve every input under both
/// strategies and keep the one drawing fewer break/alternation findings
/// from the validator. Ties keep the default.
pub fn pick_tiebreak_row_order(corpus: &[RawMatchInput]) -> RowOrder {
    let candidates = [RowOrder::SameAsNormal, RowOrder::Inverted];
    let mut misfits = [0usize; 2];
    for (i, order) in candidates.iter().enumerate() {
        let options = ResolveOptions { tiebreak_row_order: *order };
        for input in corpus {
            let Ok(resolution) = resolve_match(input, &options) else {
                continue;
            };
            let validation = validate_match(&resolution.semantic);
            misfits[i] += validation
                .errors
                .iter()
                .chain(validation.warnings.iter())
                .filter(|f| {
                    matches!(
                        f.code,
                        crate::models::FindingCode::ServerNotAlternating
                            | crate::models::FindingCode::SpuriousBreakFlag
                            | crate::models::FindingCode::MissedBreakFlag
                            | crate::models::FindingCode::SetScoreMismatch
                    )
                })
                .count();
        }
    }
    if misfits[1] < misfits[0] {
        RowOrder::Inverted
    } else {
        RowOrder::SameAsNormal
    }
}

fn resolve_points(
    block: &RawGameBlock,
    mapping: &RowSideMapping,
    server: Option<Side>,
    is_tiebreak: bool,
    options: &ResolveOptions,
    counters: &mut ResolutionCounters,
) -> Vec<SemanticPoint> {
    let side_of = |row: Row| -> Side {
        if is_tiebreak {
            mapping.tiebreak_side(row, options.tiebreak_row_order)
        } else {
            mapping.side(row)
        }
    };

    block
        .raw_points
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let (home_score, away_score) = match side_of(Row::A) {
                Side::Home => (raw.row_a_score.clone(), raw.row_b_score.clone()),
                Side::Away => (raw.row_b_score.clone(), raw.row_a_score.clone()),
            };
            let (server_score, receiver_score) = match server {
                Some(Side::Home) => (Some(home_score.clone()), Some(away_score.clone())),
                Some(Side::Away) => (Some(away_score.clone()), Some(home_score.clone())),
                None => (None, None),
            };

            let point_winner = winning_row(
                classify_marker(&raw.row_a_marker),
                classify_marker(&raw.row_b_marker),
            )
            .map(|row| side_of(row));

            counters.total_points += 1;
            if point_winner.is_none() {
                counters.unknown_winner_points += 1;
            }

            SemanticPoint {
                point_number: i as u32 + 1,
                home_score,
                away_score,
                server_score,
                receiver_score,
                point_winner,
            }
        })
        .collect()
}
