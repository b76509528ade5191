//! SVG output for hosts that want a vector document.

use std::io::Write;

use crate::error::Result;
use crate::rectangle::Rect;

/// Attributes of the `<rect>` element for `rect`, in document order.
pub fn rect_attributes(rect: &Rect) -> [(&'static str, String); 5] {
    [
        ("x", rect.x.to_string()),
        ("y", rect.y.to_string()),
        ("width", rect.width.to_string()),
        ("height", rect.height.to_string()),
        ("style", rect.style.to_css()),
    ]
}

/// Smallest box covering every rectangle and half of its stroke, as
/// `(min_x, min_y, width, height)`.
pub fn bounds(rects: &[Rect]) -> (f64, f64, f64, f64) {
    if rects.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for rect in rects {
        let half = rect.stroke_width() / 2.0;
        min_x = min_x.min(rect.x - half);
        min_y = min_y.min(rect.y - half);
        max_x = max_x.max(rect.right() + half);
        max_y = max_y.max(rect.bottom() + half);
    }
    (min_x, min_y, max_x - min_x, max_y - min_y)
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}

/// Writes a standalone SVG document with one `<rect>` per entry, in sequence
/// order so later rectangles paint over earlier ones.
pub fn write_svg<W: Write>(rects: &[Rect], mut out: W) -> Result<()> {
    let (x, y, w, h) = bounds(rects);
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">"#
    )?;
    for rect in rects {
        write!(out, "  <rect")?;
        for (name, value) in rect_attributes(rect) {
            write!(out, r#" {name}="{}""#, escape_attr(&value))?;
        }
        writeln!(out, " />")?;
    }
    writeln!(out, "</svg>")?;
    out.flush()?;
    Ok(())
}
