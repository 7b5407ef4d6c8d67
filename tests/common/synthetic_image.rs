/// Two-level image whose intensity jumps from `dark` to `bright` at column
/// `split_x`.
#[allow(dead_code)]
pub fn vertical_step_u8(width: usize, height: usize, split_x: usize, dark: u8, bright: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = vec![dark; width * height];
    for y in 0..height {
        for x in split_x.min(width)..width {
            img[y * width + x] = bright;
        }
    }
    img
}

/// Bright axis-aligned rectangle `[x0, x1) × [y0, y1)` on a dark background.
#[allow(dead_code)]
pub fn rectangle_u8(width: usize, height: usize, x: (usize, usize), y: (usize, usize)) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(x.0 < x.1 && y.0 < y.1, "rectangle must be non-empty");

    let mut img = vec![40u8; width * height];
    for row in y.0..y.1.min(height) {
        for col in x.0..x.1.min(width) {
            img[row * width + col] = 200;
        }
    }
    img
}
