use boldt_sketch::image::ImageU8;
use boldt_sketch::{SketchParams, Sketcher};

fn main() {
    // Demo stub: sketches a synthetic bright square on a dark background
    let w = 96usize;
    let h = 64usize;
    let gray: Vec<u8> = (0..w * h)
        .map(|i| {
            let (x, y) = (i % w, i / w);
            if (24..72).contains(&x) && (16..48).contains(&y) {
                200
            } else {
                40
            }
        })
        .collect();
    let Some(img) = ImageU8::packed(w, h, &gray) else {
        eprintln!("buffer too short");
        return;
    };

    let sketcher = Sketcher::new(SketchParams::default());
    match sketcher.process_u8(img) {
        Ok(res) => println!(
            "zero_crossings={} tokens={} latency_ms={:.3}",
            res.report.zero_crossings,
            res.sketch.len(),
            res.report.timings.total_ms
        ),
        Err(err) => eprintln!("sketch failed: {err}"),
    }
}
