mod common;

use boldt_sketch::image::{ImageF64, ImageU8};
use boldt_sketch::stages::{
    extract_zero_crossings, po_link, po_replace, CrossingMethod, GeometryFields, GridMode,
    LinkParams, Schedule,
};
use boldt_sketch::{Endpoint, TokenStore};
use common::synthetic_image::vertical_step_u8;

fn step_crossings(width: usize, height: usize) -> TokenStore {
    let buffer = vertical_step_u8(width, height, width / 2, 20, 180);
    let gray = ImageU8::packed(width, height, &buffer).unwrap();
    let fields = GeometryFields::from_intensity(&ImageF64::from_u8(&gray));
    extract_zero_crossings(&fields, CrossingMethod::One).unwrap()
}

#[test]
fn step_crossings_link_into_one_chain() {
    for grid_mode in [GridMode::Endpoints, GridMode::WholeSegment] {
        let mut store = step_crossings(32, 12);
        assert_eq!(store.len(), 11);
        let params = LinkParams {
            grid_mode,
            ..LinkParams::default()
        };
        let summary = po_link(&mut store, &params);
        assert_eq!(summary.links, 20, "{grid_mode:?}");

        let heads = store.iter().filter(|t| t.links(Endpoint::Start).is_empty()).count();
        let tails = store.iter().filter(|t| t.links(Endpoint::End).is_empty()).count();
        assert_eq!((heads, tails), (1, 1), "{grid_mode:?}");
        for (idx, token) in store.iter().enumerate() {
            for &next in token.links(Endpoint::End) {
                assert_eq!(store.tokens()[next].links(Endpoint::Start), &[idx]);
            }
        }
    }
}

#[test]
fn contrast_window_excluding_equal_tokens_blocks_links() {
    let mut store = step_crossings(32, 12);
    let params = LinkParams {
        contrast_ratio_min: 1.5,
        ..LinkParams::default()
    };
    assert_eq!(po_link(&mut store, &params).links, 0);
}

#[test]
fn standard_rounds_shorten_the_token_list() {
    let schedule = Schedule::standard();
    let mut store = step_crossings(32, 24);
    let initial = store.len();
    for round in 0..4 {
        let (link, replace) = schedule.round(round).unwrap();
        po_link(&mut store, link);
        let (next, summary) = po_replace(&mut store, replace);
        assert_eq!(
            summary.input,
            summary.survivors + summary.dropped + summary.consumed()
        );
        store = next;
    }
    assert!(store.len() < initial, "{} tokens left of {initial}", store.len());
}
