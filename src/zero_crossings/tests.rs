use super::cell::{chord, crossing_at, interpolate, sign_code, Corners};
use super::*;
use crate::error::SketchError;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn approx_pt(a: [f64; 2], b: [f64; 2]) -> bool {
    approx(a[0], b[0]) && approx(a[1], b[1])
}

fn uniform_gradient(lapl: [f64; 4], gx: f64, gy: f64) -> Corners {
    Corners {
        lapl,
        gx: [gx; 4],
        gy: [gy; 4],
    }
}

fn vertical_step_fields(w: usize, h: usize, split_x: usize) -> GeometryFields {
    let img = ImageF64::from_fn(w, h, |x, _| if x < split_x { 0.0 } else { 1.0 });
    GeometryFields::from_intensity(&img)
}

#[test]
fn sign_code_sets_one_bit_per_positive_corner() {
    assert_eq!(sign_code([1.0, -1.0, -1.0, -1.0]), 1);
    assert_eq!(sign_code([-1.0, 1.0, -1.0, 1.0]), 10);
    assert_eq!(sign_code([1.0, 1.0, 1.0, 1.0]), 15);
    assert_eq!(sign_code([-1.0, -1.0, -1.0, -1.0]), 0);
    // Any exact zero forces "no crossing".
    assert_eq!(sign_code([1.0, 0.0, -1.0, -1.0]), 0);
}

#[test]
fn uniform_and_saddle_cells_emit_nothing() {
    for lapl in [
        [-1.0, -1.0, -1.0, -1.0],
        [1.0, 1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0, -1.0],
        [1.0, -1.0, -1.0, 1.0],
        [0.0, 1.0, -1.0, 1.0],
    ] {
        let corners = uniform_gradient(lapl, 1.0, 0.0);
        assert!(crossing_at(0, 0, &corners, CrossingMethod::One).is_none(), "{lapl:?}");
    }
}

#[test]
fn code_one_runs_from_top_to_left_edge() {
    // Only the top-left corner is positive.
    let lapl = [1.0, -3.0, -1.0, -1.0];
    let (p0, p1) = chord(1, 2, 5, lapl).expect("code 1 has a chord");
    assert!(approx_pt(p0, [5.25, 2.0]), "{p0:?}");
    assert!(approx_pt(p1, [5.0, 2.5]), "{p1:?}");
}

#[test]
fn every_single_chord_code_produces_a_chord() {
    for code in (0u8..16).filter(|c| ![0, 6, 9, 15].contains(c)) {
        let lapl: [f64; 4] =
            std::array::from_fn(|bit| if code & (1 << bit) != 0 { 1.0 } else { -1.0 });
        assert_eq!(sign_code(lapl), code);
        let (p0, p1) = chord(code, 0, 0, lapl).expect("chord");
        for p in [p0, p1] {
            assert!((0.0..=1.0).contains(&p[0]) && (0.0..=1.0).contains(&p[1]));
        }
        assert!(!approx_pt(p0, p1), "code {code} chord collapsed");
    }
}

#[test]
fn bilinear_interpolation_hits_corners_and_center() {
    let f = [1.0, 2.0, 3.0, 8.0];
    assert!(approx(interpolate(f, 0.0, 0.0), 1.0));
    assert!(approx(interpolate(f, 1.0, 0.0), 2.0));
    assert!(approx(interpolate(f, 0.0, 1.0), 3.0));
    assert!(approx(interpolate(f, 1.0, 1.0), 8.0));
    assert!(approx(interpolate(f, 0.5, 0.5), 3.5));
}

#[test]
fn mode_one_keeps_chord_and_caches_its_geometry() {
    let corners = uniform_gradient([-1.0, 1.0, -1.0, 1.0], 3.0, 4.0);
    let c = crossing_at(4, 7, &corners, CrossingMethod::One).expect("crossing");
    assert!(approx_pt(c.p0, [7.5, 5.0]));
    assert!(approx_pt(c.p1, [7.5, 4.0]));
    assert!(approx(c.length, 1.0));
    assert!(approx(c.theta, -std::f64::consts::FRAC_PI_2));
    assert!(approx(c.contrast, 5.0));
}

#[test]
fn unit_modes_are_perpendicular_to_gradient() {
    let corners = uniform_gradient([-1.0, 1.0, -1.0, 1.0], 0.0, 2.0);
    let two = crossing_at(0, 0, &corners, CrossingMethod::Two).expect("mode two");
    let three = crossing_at(0, 0, &corners, CrossingMethod::Three).expect("mode three");
    // Gradient along +y gives theta = atan2(0, 2) = 0.
    assert!(approx(two.theta, 0.0));
    assert!(approx(two.length, 1.0));
    assert!(approx_pt(two.p0, [0.0, 0.5]));
    assert!(approx_pt(two.p1, [1.0, 0.5]));
    // Centred on the chord's first crossing (0.5, 1.0).
    assert!(approx_pt(three.p0, [0.0, 1.0]));
    assert!(approx_pt(three.p1, [1.0, 1.0]));
}

#[test]
fn zero_gradient_cells_are_skipped() {
    let corners = uniform_gradient([-1.0, 1.0, -1.0, 1.0], 0.0, 0.0);
    assert!(crossing_at(0, 0, &corners, CrossingMethod::One).is_none());
}

#[test]
fn step_edge_yields_a_head_to_tail_vertical_chain() {
    let fields = vertical_step_fields(32, 12, 16);
    let store = extract_zero_crossings(&fields, CrossingMethod::One).unwrap();
    assert_eq!(store.dims(), (32, 12));
    assert_eq!(store.len(), 11, "one token per cell row along the step");

    for (i, t) in store.iter().enumerate() {
        assert!(approx_pt(t.p0, [15.5, i as f64 + 1.0]), "token {i}: {:?}", t.p0);
        assert!(approx_pt(t.p1, [15.5, i as f64]), "token {i}: {:?}", t.p1);
        assert!(approx(t.contrast, 1.0));
        assert_eq!(t.age, 0);
        assert!(!t.replaced && !t.merged);
    }
    for pair in store.tokens().windows(2) {
        assert_eq!(pair[0].p0, pair[1].p1);
        assert_eq!(pair[1].id.0, pair[0].id.0 + 1);
    }
}

#[test]
fn mode_two_matches_chord_on_straight_step() {
    let fields = vertical_step_fields(32, 8, 16);
    let one = extract_zero_crossings(&fields, CrossingMethod::One).unwrap();
    let two = extract_zero_crossings(&fields, CrossingMethod::Two).unwrap();
    assert_eq!(one.len(), two.len());
    for (a, b) in one.iter().zip(two.iter()) {
        assert!(approx_pt(a.p0, b.p0) && approx_pt(a.p1, b.p1));
    }
}

#[test]
fn flat_field_has_no_crossings() {
    let img = ImageF64::from_fn(16, 16, |_, _| 7.0);
    let store =
        extract_zero_crossings(&GeometryFields::from_intensity(&img), CrossingMethod::One).unwrap();
    assert!(store.is_empty());
}

#[test]
fn mismatched_fields_are_rejected() {
    let mut fields = vertical_step_fields(8, 8, 4);
    fields.gy = ImageF64::new(8, 9);
    assert!(matches!(
        extract_zero_crossings(&fields, CrossingMethod::One),
        Err(SketchError::DimensionMismatch { .. })
    ));
}
