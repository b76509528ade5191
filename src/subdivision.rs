// Corner-anchored subdivision, built with a loop rather than recursion.

use log::{debug, trace};
use rand::Rng;

use crate::error::{Error, Result};
use crate::point2d::Point2D;
use crate::rectangle::{Corner, Rect};
use crate::style::{Style, PALETTE, WHITE};

/// Stroke width multiplier between two neighbouring steps.
pub const STROKE_GROWTH: f64 = 1.1;
pub const MAX_ITERATIONS: i64 = 4096;

/// Bounds of the random extent, as fractions of the previous rectangle.
pub const MIN_FRACTION: f64 = 0.6;
pub const MAX_FRACTION: f64 = 0.9;

/// Chance that a step picks a palette colour instead of white.
pub const COLOR_PROBABILITY: f64 = 0.5;

/// Signed (width, height) of the rectangle grown from `corner` of `last`.
pub fn extension(corner: Corner, last: &Rect, rw: f64, rh: f64) -> (f64, f64) {
    match corner {
        Corner::TopLeft => (rw, last.height),
        Corner::TopRight => (-last.width, rh),
        Corner::BottomLeft => (last.width, -rh),
        Corner::BottomRight => (-rw, -last.height),
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_input(format!("{name} must be a finite number, got {value}")))
    }
}

fn validate(n: i64, origin: Point2D, width: f64, height: f64, base_stroke_width: f64) -> Result<()> {
    if n > MAX_ITERATIONS {
        return Err(Error::TooManyIterations { requested: n, max: MAX_ITERATIONS });
    }
    if !origin.is_finite() {
        return Err(Error::invalid_input(format!("origin must be finite, got ({}, {})", origin.x, origin.y)));
    }
    check_finite("width", width)?;
    check_finite("height", height)?;
    check_finite("stroke width", base_stroke_width)?;
    if base_stroke_width <= 0.0 {
        return Err(Error::invalid_input(format!("stroke width must be positive, got {base_stroke_width}")));
    }
    let thickest = base_stroke_width * STROKE_GROWTH.powi(n.max(0) as i32);
    if !thickest.is_finite() {
        return Err(Error::invalid_input(format!(
            "stroke width {base_stroke_width} grown over {n} steps is not finite"
        )));
    }
    Ok(())
}

// Stroke width for every sequence index. Index `n` gets the base width and each
// step back multiplies by the growth factor, in the same order a recursive
// definition would, so results match it bit for bit.
fn stroke_widths(steps: usize, base_stroke_width: f64) -> Vec<f64> {
    let mut widths = vec![base_stroke_width; steps + 1];
    for k in (0..steps).rev() {
        widths[k] = widths[k + 1] * STROKE_GROWTH;
    }
    widths
}

fn pick_fill<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    if rng.gen_bool(COLOR_PROBABILITY) {
        PALETTE[rng.gen_range(0..PALETTE.len())]
    } else {
        WHITE
    }
}

/// Builds `max(n, 0) + 1` rectangles, the seed first; the last one gets `base_stroke_width`.
pub fn subdivide<R: Rng + ?Sized>(
    n: i64,
    origin: Point2D,
    width: f64,
    height: f64,
    base_style: &Style,
    base_stroke_width: f64,
    rng: &mut R,
) -> Result<Vec<Rect>> {
    validate(n, origin, width, height, base_stroke_width)?;

    let steps = n.max(0) as usize;
    let strokes = stroke_widths(steps, base_stroke_width);
    debug!(
        "subdividing {width}x{height} at ({}, {}) with {steps} steps, stroke {base_stroke_width}",
        origin.x, origin.y
    );

    let mut rects: Vec<Rect> = Vec::with_capacity(steps + 1);
    rects.push(Rect::new(origin, width, height, base_style.clone().with_stroke_width(strokes[0])));

    for k in 1..=steps {
        let last = &rects[k - 1];

        let style = base_style.clone().with_stroke_width(strokes[k]).with_fill(pick_fill(rng));

        let corner = Corner::ALL[rng.gen_range(0..Corner::ALL.len())];
        let rw = rng.gen_range(last.width * MIN_FRACTION..=last.width * MAX_FRACTION);
        let rh = rng.gen_range(last.height * MIN_FRACTION..=last.height * MAX_FRACTION);
        let (w, h) = extension(corner, last, rw, rh);

        let rect = Rect::new(last.corner(corner), w, h, style);
        trace!(
            "step {k}: {corner:?} -> ({}, {}) {}x{} fill {:?}",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            rect.style.fill()
        );
        rects.push(rect);
    }

    Ok(rects)
}
