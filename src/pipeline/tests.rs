use super::*;
use crate::error::SketchError;
use crate::image::ImageU8;
use crate::sketch::TokenId;
use std::collections::HashSet;

fn vertical_step(w: usize, h: usize, split_x: usize) -> ImageF64 {
    ImageF64::from_fn(w, h, |x, _| if x < split_x { 0.0 } else { 1.0 })
}

fn step_crossings() -> TokenStore {
    let fields = GeometryFields::from_intensity(&vertical_step(32, 12, 16));
    extract_zero_crossings(&fields, CrossingMethod::One).unwrap()
}

#[test]
fn cycle_rejects_more_rounds_than_scheduled() {
    let schedule = Schedule::standard();
    let err = link_replace_cycle(step_crossings(), &schedule, schedule.len() + 1).unwrap_err();
    assert!(matches!(
        err,
        SketchError::ScheduleExhausted { requested, available }
            if requested == schedule.len() + 1 && available == schedule.len()
    ));
}

#[test]
fn zero_rounds_merge_to_the_input() {
    let initial = step_crossings();
    let ids: Vec<TokenId> = initial.iter().map(|t| t.id).collect();
    let mut cycle = link_replace_cycle(initial, &Schedule::standard(), 0).unwrap();
    assert_eq!(cycle.stores.len(), 1);
    assert!(cycle.reports.is_empty());

    let merged = cycle.merge().unwrap();
    assert_eq!(merged.iter().map(|t| t.id).collect::<Vec<_>>(), ids);
    assert!(merged.iter().all(|t| t.merged));
}

#[test]
fn rounds_chain_stores_and_reports() {
    let rounds = 4;
    let cycle = link_replace_cycle(step_crossings(), &Schedule::standard(), rounds).unwrap();
    assert_eq!(cycle.stores.len(), rounds + 1);
    assert_eq!(cycle.reports.len(), rounds);
    for (i, report) in cycle.reports.iter().enumerate() {
        assert_eq!(report.round, i);
        assert_eq!(report.input_tokens, cycle.stores[i].len());
        assert_eq!(report.output_tokens, cycle.stores[i + 1].len());
        assert_eq!(
            report.replace.input,
            report.replace.survivors + report.replace.dropped + report.replace.consumed()
        );
    }
    assert!(cycle.last_store().is_some_and(|s| s.iter().all(|t| !t.replaced)));
}

#[test]
fn merged_sketch_accounts_for_every_zero_crossing() {
    let initial = step_crossings();
    let zero_ids: Vec<TokenId> = initial.iter().map(|t| t.id).collect();
    let mut cycle = link_replace_cycle(initial, &Schedule::standard(), 6).unwrap();
    let replaced: HashSet<TokenId> = cycle
        .stores
        .iter()
        .flat_map(|s| s.iter())
        .filter(|t| t.replaced)
        .map(|t| t.id)
        .collect();
    let sketch = cycle.merge().unwrap();

    let kept: HashSet<TokenId> = sketch.iter().map(|t| t.id).collect();
    assert_eq!(kept.len(), sketch.len(), "merged ids are unique");
    for id in zero_ids {
        assert!(kept.contains(&id) ^ replaced.contains(&id));
    }
    assert!(sketch.iter().all(|t| !t.replaced && t.merged));
    assert!(sketch.iter().all(|t| t.links_at_start.is_empty() && t.links_at_end.is_empty()));
}

#[test]
fn sketcher_reports_each_stage() {
    let params = SketchParams {
        rounds: 3,
        ..SketchParams::default()
    };
    let result = Sketcher::new(params).process(&vertical_step(32, 12, 16)).unwrap();
    let report = &result.report;
    assert_eq!((report.input.width, report.input.height), (32, 12));
    assert_eq!(report.zero_crossings, 11);
    assert_eq!(report.rounds.len(), 3);
    assert_eq!(report.merged_tokens, result.sketch.len());
    assert!(!result.sketch.is_empty());
    for stage in ["fields", "zero_crossings", "cycle", "merge"] {
        assert!(report.timings.stage_ms(stage).is_some(), "missing stage {stage}");
    }
    assert!(report.timings.staged_ms() <= report.timings.total_ms + 1e-9);
}

#[test]
fn run_cycle_without_rounds_returns_zero_crossings() {
    let sketch = run_cycle(&vertical_step(32, 12, 16), 0).unwrap();
    assert_eq!(sketch.len(), 11);
    assert_eq!(sketch.dims(), (32, 12));
}

#[test]
fn u8_input_matches_promoted_intensity() {
    let data: Vec<u8> = (0..32 * 12)
        .map(|i| if i % 32 < 16 { 10 } else { 200 })
        .collect();
    let gray = ImageU8::packed(32, 12, &data).unwrap();
    let sketcher = Sketcher::new(SketchParams {
        rounds: 2,
        ..SketchParams::default()
    });
    let from_u8 = sketcher.process_u8(gray.clone()).unwrap();
    let from_f64 = sketcher.process(&ImageF64::from_u8(&gray)).unwrap();
    assert_eq!(from_u8.sketch.len(), from_f64.sketch.len());
    assert_eq!(from_u8.report.zero_crossings, 11);
}

#[test]
fn params_fill_missing_fields_with_defaults() {
    let params: SketchParams = serde_json::from_str(r#"{ "rounds": 5, "crossing_method": "two" }"#).unwrap();
    assert_eq!(params.rounds, 5);
    assert_eq!(params.crossing_method, CrossingMethod::Two);
    assert_eq!(params.schedule, Schedule::standard());
}
