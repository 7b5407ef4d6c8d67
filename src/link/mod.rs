//! Perceptual-organization linking: endpoint adjacency between compatible
//! tokens.
//!
//! A pass indexes the store with a bixel grid sized by the link radius, then
//! queries a circle around each endpoint of each token. Candidates that pass
//! the compatibility filters (see [`filters`]) become that endpoint's link
//! list: queries at a token's end fill `links_at_end`, queries at its start
//! fill `links_at_start`.
//!
//! With [`GridMode::Endpoints`] a query at a token's end considers only
//! candidates whose *start* lies inside the circle and vice versa, which is
//! the head-to-tail adjacency the replacer walks. With
//! [`GridMode::WholeSegment`] any candidate whose body meets the circle is
//! considered.
//!
//! Links are arena indices and are recomputed from scratch on every pass.

mod filters;

use crate::bixel::GridMode;
use crate::schedule::LinkParams;
use crate::sketch::{Endpoint, Token, TokenStore};
use filters::LinkFilter;
use log::debug;
use serde::Serialize;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Counters from one linking pass.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub tokens: usize,
    /// Candidates returned by grid queries before filtering
    pub candidates: usize,
    /// Directed links written, both endpoints
    pub links: usize,
    pub elapsed_ms: f64,
}

/// Rebuild the link graph of `store` with the thresholds of `params`.
pub fn po_link(store: &mut TokenStore, params: &LinkParams) -> LinkSummary {
    let start = Instant::now();
    store.build_grid(params.link_radius, params.grid_mode);

    let mut summary = LinkSummary {
        tokens: store.len(),
        ..LinkSummary::default()
    };
    let mut adjacency: Vec<[Vec<usize>; 2]> = Vec::with_capacity(store.len());
    for idx in 0..store.len() {
        let token = &store.tokens()[idx];
        let per_end = Endpoint::BOTH.map(|which| {
            let candidates = query_endpoint(store, token, which, params);
            summary.candidates += candidates.len();
            let filter = LinkFilter {
                token_idx: idx,
                token,
                which,
                params,
            };
            filter_candidates(store.tokens(), &filter, &candidates)
        });
        adjacency.push(per_end);
    }

    for (token, [at_start, at_end]) in store.tokens_mut().iter_mut().zip(adjacency) {
        summary.links += at_start.len() + at_end.len();
        token.set_links(Endpoint::Start, at_start);
        token.set_links(Endpoint::End, at_end);
    }

    summary.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "po_link r={:.2}: {} tokens, {} candidates, {} links in {:.3} ms",
        params.link_radius, summary.tokens, summary.candidates, summary.links, summary.elapsed_ms
    );
    summary
}

fn query_endpoint(store: &TokenStore, token: &Token, which: Endpoint, params: &LinkParams) -> Vec<usize> {
    let [x, y] = token.endpoint(which);
    match params.grid_mode {
        GridMode::WholeSegment => store.tokens_in_circle(x, y, params.link_radius),
        GridMode::Endpoints => store.endpoints_in_circle(x, y, params.link_radius, which.opposite()),
    }
}

fn filter_candidates(tokens: &[Token], filter: &LinkFilter<'_>, candidates: &[usize]) -> Vec<usize> {
    #[cfg(feature = "parallel")]
    {
        candidates
            .par_iter()
            .copied()
            .filter(|&idx| filter.accepts(idx, &tokens[idx]))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        candidates
            .iter()
            .copied()
            .filter(|&idx| filter.accepts(idx, &tokens[idx]))
            .collect()
    }
}
