//! Combining token stores from several rounds.
use super::store::TokenStore;
use super::token::{Token, TokenId};
use crate::error::{Result, SketchError};
use log::debug;
use std::collections::{HashMap, HashSet};

fn check_dims(stores: &[TokenStore]) -> Result<(usize, usize)> {
    let first = stores.first().ok_or(SketchError::EmptyInput)?;
    let expected = first.dims();
    for store in &stores[1..] {
        if store.dims() != expected {
            return Err(SketchError::DimensionMismatch {
                expected,
                found: store.dims(),
            });
        }
    }
    Ok(expected)
}

fn detached(token: &Token) -> Token {
    let mut copy = token.clone();
    copy.links_at_start.clear();
    copy.links_at_end.clear();
    copy
}

/// Collect the tokens no round has replaced or already merged.
///
/// A token carried through several rounds appears once, as its most recent
/// copy, at the position of its first appearance. Every copy of an emitted
/// token is flagged `merged` in the inputs, so merging the same stores again
/// yields nothing. The result takes its canvas and grid resolution from the
/// first store.
pub fn po_merge(stores: &mut [TokenStore]) -> Result<TokenStore> {
    check_dims(stores)?;

    let excluded: HashSet<TokenId> = stores
        .iter()
        .flat_map(|s| s.iter())
        .filter(|t| t.replaced || t.merged)
        .map(|t| t.id)
        .collect();

    let mut out = stores[0].empty_like();
    let mut merged: Vec<Token> = Vec::new();
    let mut position: HashMap<TokenId, usize> = HashMap::new();
    for store in stores.iter() {
        for token in store.iter() {
            if excluded.contains(&token.id) {
                continue;
            }
            match position.get(&token.id) {
                Some(&at) => merged[at] = detached(token),
                None => {
                    position.insert(token.id, merged.len());
                    merged.push(detached(token));
                }
            }
        }
    }

    for store in stores.iter_mut() {
        for token in store.tokens_mut() {
            if position.contains_key(&token.id) {
                token.merged = true;
            }
        }
    }
    for token in &mut merged {
        token.merged = true;
    }

    debug!(
        "po_merge: {} stores, {} excluded ids, {} merged tokens",
        stores.len(),
        excluded.len(),
        merged.len()
    );
    out.extend(merged);
    Ok(out)
}

/// Concatenate stores, keeping the first copy of each token id. Flags are
/// left as they are.
pub fn union(stores: &[TokenStore]) -> Result<TokenStore> {
    check_dims(stores)?;
    let mut out = stores[0].empty_like();
    let mut seen: HashSet<TokenId> = HashSet::new();
    let tokens: Vec<Token> = stores
        .iter()
        .flat_map(|s| s.iter())
        .filter(|t| seen.insert(t.id))
        .map(detached)
        .collect();
    out.extend(tokens);
    Ok(out)
}
