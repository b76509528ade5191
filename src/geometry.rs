use csscolorparser::Color;
use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::point2d::Point2D;
use crate::rectangle::Rect;
use crate::screen::ScreenSpace;
use crate::style::WHITE;
use crate::svg::bounds;

/// Pixel-space rectangle, half-open on the max side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

// helper methods
impl Tile {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }
}

// Compute minimum depth to get at least n tiles for # of CPU cores
pub fn compute_subdivisions(n: usize) -> u32 {
    let mut depth = 0;
    let mut count = 1;
    while count < n {
        depth += 1;
        count *= 2;
    }
    depth
}

/// Split a `width` x `height` image into `2^depth` tiles
pub fn split_tiles(width: u32, height: u32, depth: u32) -> Vec<Tile> {
    let mut tiles = Vec::new();

    let root = Tile { min_x: 0, min_y: 0, max_x: width, max_y: height };

    // Alternate splitting vertically and horizontally
    fn recurse(t: Tile, vertical: bool, depth: u32, tiles: &mut Vec<Tile>) {
        if depth == 0 {
            tiles.push(t);
            return;
        }

        if vertical {
            let mid = t.min_x + t.width() / 2;
            let left = Tile { max_x: mid, ..t };
            let right = Tile { min_x: mid, ..t };
            recurse(left, !vertical, depth - 1, tiles);
            recurse(right, !vertical, depth - 1, tiles);
        } else {
            let mid = t.min_y + t.height() / 2;
            let top = Tile { max_y: mid, ..t };
            let bottom = Tile { min_y: mid, ..t };
            recurse(top, !vertical, depth - 1, tiles);
            recurse(bottom, !vertical, depth - 1, tiles);
        }
    }

    recurse(root, true, depth, &mut tiles);
    tiles
}

/// Parse any CSS colour into RGB plus its own alpha.
pub fn parse_color(color: &str) -> Result<([u8; 3], f64)> {
    let parsed: Color = color.trim().parse().map_err(|_| Error::UnknownColor(color.to_string()))?;
    let [r, g, b, _] = parsed.to_rgba8();
    Ok(([r, g, b], f64::from(parsed.a).clamp(0.0, 1.0)))
}

/// Largest preview `rasterize` will allocate.
pub const MAX_PIXELS: u64 = 1 << 28;

/// Maps composition coordinates onto a pixel grid of a given width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: Point2D,
    pub scale: f64,
    pub width_px: u32,
    pub height_px: u32,
}

impl Viewport {
    /// Fit every rectangle, strokes included, into `width_px` columns.
    pub fn fit(rects: &[Rect], width_px: u32) -> Result<Self> {
        if width_px == 0 {
            return Err(Error::invalid_input("image width must be at least one pixel"));
        }
        let (x, y, w, h) = bounds(rects);
        let scale = if w > 0.0 { f64::from(width_px) / w } else { 1.0 };
        let height_px = (h * scale).ceil().max(1.0);
        if !height_px.is_finite() || height_px > f64::from(u16::MAX) {
            return Err(Error::invalid_input(format!("composition too tall to rasterize ({height_px} px)")));
        }
        let pixels = u64::from(width_px) * height_px as u64;
        if pixels > MAX_PIXELS {
            return Err(Error::invalid_input(format!(
                "{width_px}x{height_px} px preview exceeds {MAX_PIXELS} pixels"
            )));
        }
        Ok(Self { min: Point2D::new(x, y), scale, width_px, height_px: height_px as u32 })
    }

    /// Centre of pixel `(px, py)` in composition space.
    pub fn pixel_center(&self, px: u32, py: u32) -> Point2D {
        self.min + Point2D::new(f64::from(px) + 0.5, f64::from(py) + 0.5) * (1.0 / self.scale)
    }
}

// A rectangle resolved for painting: stroke band between `outer` and `inner`,
// fill inside `inner`. Colours carry their opacity.
struct Paint {
    outer: [f64; 4],
    inner: [f64; 4],
    fill: Option<([u8; 3], f64)>,
    stroke: Option<([u8; 3], f64)>,
}

fn resolve_color(value: Option<&str>, opacity: f64) -> Result<Option<([u8; 3], f64)>> {
    match value {
        None | Some("none") => Ok(None),
        Some(color) => {
            let (rgb, alpha) = parse_color(color)?;
            Ok(Some((rgb, alpha * opacity)))
        }
    }
}

impl Paint {
    fn new(rect: &Rect) -> Result<Self> {
        let half = rect.stroke_width() / 2.0;
        let style = &rect.style;
        Ok(Self {
            outer: [rect.x - half, rect.y - half, rect.right() + half, rect.bottom() + half],
            inner: [rect.x + half, rect.y + half, rect.right() - half, rect.bottom() - half],
            fill: resolve_color(style.fill(), style.opacity("fill-opacity"))?,
            stroke: if half > 0.0 {
                resolve_color(style.stroke(), style.opacity("stroke-opacity"))?
            } else {
                None
            },
        })
    }

    fn color_at(&self, p: Point2D) -> Option<([u8; 3], f64)> {
        let [ox0, oy0, ox1, oy1] = self.outer;
        if p.x < ox0 || p.x >= ox1 || p.y < oy0 || p.y >= oy1 {
            return None;
        }
        let [ix0, iy0, ix1, iy1] = self.inner;
        if p.x >= ix0 && p.x < ix1 && p.y >= iy0 && p.y < iy1 {
            self.fill
        } else {
            self.stroke.or(self.fill)
        }
    }
}

fn blend(dst: [u8; 3], (src, alpha): ([u8; 3], f64)) -> [u8; 3] {
    let mix = |s: u8, d: u8| (f64::from(s) * alpha + f64::from(d) * (1.0 - alpha)).round() as u8;
    [mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2])]
}

/// Paints `rects` in sequence order onto a white canvas `width_px` wide.
pub fn rasterize(rects: &[Rect], width_px: u32) -> Result<ScreenSpace> {
    let viewport = Viewport::fit(rects, width_px)?;
    let paints = rects.iter().map(Paint::new).collect::<Result<Vec<_>>>()?;
    let (background, _) = parse_color(WHITE)?;

    let depth = compute_subdivisions(num_cpus::get());
    // Additional depth so threads can steal work from tiles with more rectangles
    let tiles = split_tiles(viewport.width_px, viewport.height_px, depth + 1);
    debug!(
        "rasterizing {} rects into {}x{} px over {} tiles",
        rects.len(),
        viewport.width_px,
        viewport.height_px,
        tiles.len()
    );

    let mut buffers: Vec<ScreenSpace> = tiles.iter().map(|t| ScreenSpace::for_tile(*t)).collect();
    buffers.par_iter_mut().for_each(|tile| {
        for y in 0..tile.height {
            for x in 0..tile.width {
                let p = viewport.pixel_center(tile.rect.min_x + x, tile.rect.min_y + y);
                let [r, g, b] = paints
                    .iter()
                    .filter_map(|paint| paint.color_at(p))
                    .fold(background, blend);
                tile.set_pixel(x, y, r, g, b, 255);
            }
        }
    });

    let mut screen = ScreenSpace::new(viewport.width_px, viewport.height_px);
    for tile in &buffers {
        screen.blit(tile);
    }
    Ok(screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    #[test]
    fn subdivisions_cover_core_count() {
        assert_eq!(compute_subdivisions(1), 0);
        assert_eq!(compute_subdivisions(2), 1);
        assert_eq!(compute_subdivisions(3), 2);
        assert_eq!(compute_subdivisions(8), 3);
    }

    #[test]
    fn tiles_partition_the_image() {
        let tiles = split_tiles(101, 37, 3);
        assert_eq!(tiles.len(), 8);
        let area: u32 = tiles.iter().map(|t| t.width() * t.height()).sum();
        assert_eq!(area, 101 * 37);
    }

    #[test]
    fn css_colors() {
        assert_eq!(parse_color("#ff0000").unwrap(), ([255, 0, 0], 1.0));
        assert_eq!(parse_color("#0000FF").unwrap(), ([0, 0, 255], 1.0));
        assert_eq!(parse_color("#fff").unwrap(), ([255, 255, 255], 1.0));
        assert_eq!(parse_color("tomato").unwrap(), ([255, 99, 71], 1.0));
        assert_eq!(parse_color("rgb(0, 128, 0)").unwrap().0, [0, 128, 0]);
        assert_eq!(parse_color("rgba(0, 0, 0, 0)").unwrap().1, 0.0);
        assert!(matches!(parse_color("#12345"), Err(Error::UnknownColor(_))));
        assert!(matches!(parse_color("#zzzzzz"), Err(Error::UnknownColor(_))));
        assert!(matches!(parse_color("not-a-colour"), Err(Error::UnknownColor(_))));
    }

    #[test]
    fn viewport_fits_width() {
        let style = Style::base().with_stroke_width(2.0);
        let rects = [Rect::new(Point2D::new(1.0, 1.0), 98.0, 48.0, style)];
        let vp = Viewport::fit(&rects, 200).unwrap();
        assert_eq!(vp.min, Point2D::ORIGIN);
        assert_eq!(vp.scale, 2.0);
        assert_eq!(vp.height_px, 100);
        assert_eq!(vp.pixel_center(0, 0), Point2D::new(0.25, 0.25));
        assert!(Viewport::fit(&rects, 0).is_err());
    }

    #[test]
    fn paints_fill_inside_and_stroke_on_the_edge() {
        let style = Style::base().with_stroke_width(2.0).with_fill("#ff0000");
        let rects = [Rect::new(Point2D::new(1.0, 1.0), 98.0, 98.0, style)];
        let screen = rasterize(&rects, 100).unwrap();
        assert_eq!((screen.width, screen.height), (100, 100));
        assert_eq!(screen.get_pixel(50, 50), Some((255, 0, 0, 255)));
        assert_eq!(screen.get_pixel(0, 50), Some((0, 0, 0, 255)));
        assert_eq!(screen.get_pixel(99, 99), Some((0, 0, 0, 255)));
    }

    #[test]
    fn later_rectangles_paint_over_earlier_ones() {
        let base = Style::base().with_stroke_width(1.0);
        let rects = [
            Rect::new(Point2D::ORIGIN, 100.0, 100.0, base.clone().with_fill("#0000ff")),
            Rect::new(Point2D::new(10.0, 10.0), 40.0, 40.0, base.with_fill("#ffff00")),
        ];
        let screen = rasterize(&rects, 101).unwrap();
        assert_eq!(screen.get_pixel(30, 30), Some((255, 255, 0, 255)));
        assert_eq!(screen.get_pixel(80, 80), Some((0, 0, 255, 255)));
    }

    #[test]
    fn named_colours_are_painted() {
        let style = Style::base().with_stroke_width(1.0).with_fill("tomato");
        let rects = [Rect::new(Point2D::ORIGIN, 10.0, 10.0, style)];
        let screen = rasterize(&rects, 11).unwrap();
        assert_eq!(screen.get_pixel(5, 5), Some((255, 99, 71, 255)));
    }

    #[test]
    fn oversized_preview_is_rejected() {
        let style = Style::base().with_stroke_width(1.0);
        let rects = [Rect::new(Point2D::ORIGIN, 70_000.0, 20_000.0, style)];
        assert!(matches!(Viewport::fit(&rects, 70_001), Err(Error::InvalidInput { .. })));
        assert!(matches!(rasterize(&rects, 70_001), Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn unknown_colour_is_reported() {
        let style = Style::base().with_fill("not-a-colour");
        let rects = [Rect::new(Point2D::ORIGIN, 10.0, 10.0, style)];
        assert!(matches!(rasterize(&rects, 10), Err(Error::UnknownColor(_))));
    }
}
