mod common;

use boldt_sketch::image::{ImageF64, ImageU8};
use boldt_sketch::{run_cycle, SketchParams, Sketcher};
use common::synthetic_image::{rectangle_u8, vertical_step_u8};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn step_edge_collapses_into_longer_tokens() {
    init_logging();
    let (width, height) = (32usize, 24usize);
    let buffer = vertical_step_u8(width, height, 16, 32, 220);
    let image = ImageU8::packed(width, height, &buffer).unwrap();

    let result = Sketcher::new(SketchParams::default())
        .process_u8(image)
        .unwrap();
    let report = &result.report;
    assert_eq!(report.zero_crossings, height - 1);
    assert!(
        report.total_replacements() > 0,
        "a straight edge must be replaced by longer tokens"
    );
    assert!(!result.sketch.is_empty());

    let longest = result.sketch.iter().map(|t| t.length()).fold(0.0, f64::max);
    assert!(longest > 2.0, "longest token only {longest:.3} px");
    for token in result.sketch.iter() {
        for p in [token.p0, token.p1] {
            assert!((p[0] - 15.5).abs() < 1e-6, "token off the edge: {p:?}");
        }
    }
}

#[test]
fn rectangle_tokens_stay_on_its_outline() {
    init_logging();
    let (width, height) = (96usize, 64usize);
    let buffer = rectangle_u8(width, height, (24, 72), (16, 48));
    let image = ImageU8::packed(width, height, &buffer).unwrap();

    let result = Sketcher::new(SketchParams::default())
        .process_u8(image)
        .unwrap();
    assert!(result.report.total_replacements() > 0);
    assert!(!result.sketch.is_empty());

    let outer = |p: [f64; 2]| (19.0..=77.0).contains(&p[0]) && (11.0..=53.0).contains(&p[1]);
    let inner = |p: [f64; 2]| (29.0..=67.0).contains(&p[0]) && (21.0..=43.0).contains(&p[1]);
    for token in result.sketch.iter() {
        let mid = token.midpoint();
        assert!(outer(mid) && !inner(mid), "token midpoint {mid:?} is off the outline");
    }
}

#[test]
fn report_serializes_with_camel_case_keys() {
    let intensity = ImageF64::from_fn(24, 16, |x, _| if x < 12 { 0.0 } else { 1.0 });
    let params = SketchParams {
        rounds: 2,
        ..SketchParams::default()
    };
    let result = Sketcher::new(params).process(&intensity).unwrap();
    let json = serde_json::to_value(&result.report).unwrap();
    assert_eq!(json["zeroCrossings"], 15);
    assert_eq!(json["rounds"].as_array().map(Vec::len), Some(2));
    assert!(json["timings"]["totalMs"].is_number());

    let sketch = serde_json::to_value(&result.sketch).unwrap();
    assert_eq!(sketch["tokens"].as_array().map(Vec::len), Some(result.sketch.len()));
}

#[test]
fn run_cycle_matches_default_sketcher() {
    let intensity = ImageF64::from_fn(32, 20, |x, _| if x < 16 { 0.0 } else { 1.0 });
    let sketch = run_cycle(&intensity, 5).unwrap();
    let params = SketchParams {
        rounds: 5,
        ..SketchParams::default()
    };
    let result = Sketcher::new(params).process(&intensity).unwrap();
    assert_eq!(sketch.len(), result.sketch.len());
    for (a, b) in sketch.iter().zip(result.sketch.iter()) {
        assert_eq!((a.p0, a.p1), (b.p0, b.p1));
    }
}
