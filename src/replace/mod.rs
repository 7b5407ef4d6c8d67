//! Path replacement: collapse short, straight, well covered link chains into
//! single tokens.
//!
//! Three greedy passes run in order over tokens not yet replaced:
//!
//! 1. 3-token paths `A → T → B` with `A` from `T`'s start links and `B` from
//!    its end links,
//! 2. 2-token left paths `A → T`,
//! 3. 2-token right paths `T → B`.
//!
//! A path qualifies when the far endpoints of its neighbours lie within the
//! replace radius of `T`'s midpoint, its [`PathFit`] error is below the
//! straightness threshold and, with the coverage filter on, both coverage
//! figures exceed their minimums. The first qualifying path wins unless
//! `prefer_straightest` is set, in which case the lowest-error path does.
//! Members of an accepted path are flagged `replaced` immediately and are
//! invisible to the rest of the pass, so results depend on token order.
//!
//! The output store holds the synthesized tokens followed by the aged
//! survivors; survivors older than `max_age` are dropped.

mod fit;

pub use fit::{fit_path, principal_axis, PathFit};

use crate::schedule::ReplaceParams;
use crate::sketch::{dist_sq, Token, TokenStore};
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Counters from one replacement pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceSummary {
    /// Tokens not already replaced when the pass started
    pub input: usize,
    pub triples: usize,
    pub left_pairs: usize,
    pub right_pairs: usize,
    /// Tokens carried forward with their age incremented
    pub survivors: usize,
    /// Unreplaced tokens dropped for exceeding the age limit
    pub dropped: usize,
    pub elapsed_ms: f64,
}

impl ReplaceSummary {
    /// Input tokens absorbed into synthesized tokens.
    pub fn consumed(&self) -> usize {
        3 * self.triples + 2 * (self.left_pairs + self.right_pairs)
    }

    pub fn synthesized(&self) -> usize {
        self.triples + self.left_pairs + self.right_pairs
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PathShape {
    Triple,
    Left,
    Right,
}

struct Accepted {
    left: Option<usize>,
    right: Option<usize>,
    fit: PathFit,
}

/// Run the three replacement passes over `store` and return the next
/// round's store. Members of accepted paths are flagged `replaced` in
/// `store`.
pub fn po_replace(store: &mut TokenStore, params: &ReplaceParams) -> (TokenStore, ReplaceSummary) {
    let start = Instant::now();
    let mut summary = ReplaceSummary {
        input: store.iter().filter(|t| !t.replaced).count(),
        ..ReplaceSummary::default()
    };
    let mut synthesized = Vec::new();

    for shape in [PathShape::Triple, PathShape::Left, PathShape::Right] {
        for idx in 0..store.len() {
            if store.tokens()[idx].replaced {
                continue;
            }
            let Some(accepted) = best_path(store.tokens(), idx, shape, params) else {
                continue;
            };
            synthesized.push(synthesize(store.tokens(), idx, &accepted));

            let tokens = store.tokens_mut();
            for member in [accepted.left, Some(idx), accepted.right].into_iter().flatten() {
                tokens[member].replaced = true;
            }
            match shape {
                PathShape::Triple => summary.triples += 1,
                PathShape::Left => summary.left_pairs += 1,
                PathShape::Right => summary.right_pairs += 1,
            }
        }
    }

    let mut survivors = Vec::new();
    for token in store.iter().filter(|t| !t.replaced) {
        if token.age > params.max_age {
            summary.dropped += 1;
        } else {
            survivors.push(token.aged_copy());
        }
    }
    summary.survivors = survivors.len();

    let mut next = store.empty_like();
    next.extend(synthesized);
    next.extend(survivors);

    summary.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "po_replace r={:.1}: {} in, {} triples, {}+{} pairs, {} survivors, {} dropped in {:.3} ms",
        params.replace_radius,
        summary.input,
        summary.triples,
        summary.left_pairs,
        summary.right_pairs,
        summary.survivors,
        summary.dropped,
        summary.elapsed_ms
    );
    (next, summary)
}

fn best_path(tokens: &[Token], idx: usize, shape: PathShape, params: &ReplaceParams) -> Option<Accepted> {
    let center = &tokens[idx];
    let mid = center.midpoint();
    let rr = params.replace_radius * params.replace_radius;
    let usable = |i: usize, far: fn(&Token) -> [f64; 2]| {
        i != idx && !tokens[i].replaced && dist_sq(mid, far(&tokens[i])) <= rr
    };

    let lefts: Vec<Option<usize>> = match shape {
        PathShape::Triple | PathShape::Left => center
            .links_at_start
            .iter()
            .copied()
            .filter(|&a| usable(a, |t| t.p0))
            .map(Some)
            .collect(),
        PathShape::Right => vec![None],
    };
    let rights: Vec<Option<usize>> = match shape {
        PathShape::Triple | PathShape::Right => center
            .links_at_end
            .iter()
            .copied()
            .filter(|&b| usable(b, |t| t.p1))
            .map(Some)
            .collect(),
        PathShape::Left => vec![None],
    };

    let mut best: Option<Accepted> = None;
    'search: for &left in &lefts {
        for &right in &rights {
            if left.is_some() && left == right {
                continue;
            }
            let Some(fit) = fit_path(left.map(|i| &tokens[i]), center, right.map(|i| &tokens[i]))
            else {
                continue;
            };
            let best_error = best.as_ref().map_or(f64::INFINITY, |b| b.fit.error);
            if !(fit.error < best_error && fit.error < params.straightness_max) {
                continue;
            }
            if params.coverage_filter
                && !(fit.cumulative_coverage > params.min_cumulative_coverage
                    && fit.coverage > params.min_coverage)
            {
                continue;
            }
            best = Some(Accepted { left, right, fit });
            if !params.prefer_straightest {
                break 'search;
            }
        }
    }
    best
}

fn synthesize(tokens: &[Token], idx: usize, accepted: &Accepted) -> Token {
    let members: Vec<&Token> = [accepted.left, Some(idx), accepted.right]
        .into_iter()
        .flatten()
        .map(|i| &tokens[i])
        .collect();
    let total_len: f64 = members.iter().map(|t| t.length()).sum();
    let contrast = if total_len > 0.0 {
        members.iter().map(|t| t.contrast * t.length()).sum::<f64>() / total_len
    } else {
        members.iter().map(|t| t.contrast).sum::<f64>() / members.len() as f64
    };
    Token::new(accepted.fit.start, accepted.fit.end, contrast)
        .with_coverage(accepted.fit.cumulative_coverage)
}
