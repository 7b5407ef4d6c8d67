use boldt_sketch::config::sketch::load_config;
use boldt_sketch::image::io::{load_intensity_field, write_json_file};
use boldt_sketch::Sketcher;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let intensity = load_intensity_field(&config.input).map_err(|e| e.to_string())?;
    let sketcher = Sketcher::new(config.sketch_params());
    let result = sketcher.process(&intensity).map_err(|e| e.to_string())?;

    let sketch = match config.contrast_filter {
        Some([lower, upper]) => result.sketch.filter_on_contrast(lower, upper),
        None => result.sketch,
    };
    let report = result.report;

    print!("{}", report.round_table());
    println!(
        "{} zero crossings, {} replacements, {} tokens in {:.3} ms",
        report.zero_crossings,
        report.total_replacements(),
        sketch.len(),
        report.timings.total_ms
    );

    sketch
        .write_json(&config.output.sketch_json)
        .map_err(|e| e.to_string())?;
    println!("Saved sketch to {}", config.output.sketch_json.display());
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
        println!("Saved report to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: sketch_demo <config.json>".to_string()
}
