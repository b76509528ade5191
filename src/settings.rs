//! Host-facing configuration for a single composition.

use rand::Rng;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::point2d::Point2D;
use crate::rectangle::Rect;
use crate::style::{Style, DEFAULT_STROKE_WIDTH};
use crate::subdivision::subdivide;

pub const DEFAULT_ITERATIONS: i64 = 20;
pub const DEFAULT_WIDTH: f64 = 300.0;
pub const DEFAULT_HEIGHT: f64 = 300.0;

/// An existing rectangle the composition should start from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Seed {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

fn parse_numbers(s: &str, expected: usize, what: &str) -> Result<Vec<f64>> {
    let numbers = s
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| Error::InvalidSeed(format!("{what} `{s}`: `{part}` is not a number")))
        })
        .collect::<Result<Vec<f64>>>()?;
    if numbers.len() != expected {
        return Err(Error::InvalidSeed(format!(
            "{what} `{s}`: expected {expected} comma-separated numbers, got {}",
            numbers.len()
        )));
    }
    if let Some(bad) = numbers.iter().find(|v| !v.is_finite()) {
        return Err(Error::InvalidSeed(format!("{what} `{s}`: {bad} is not finite")));
    }
    Ok(numbers)
}

/// Parses an `x,y` pair.
pub fn parse_point(s: &str) -> Result<Point2D> {
    let v = parse_numbers(s, 2, "point")?;
    Ok(Point2D::new(v[0], v[1]))
}

impl FromStr for Seed {
    type Err = Error;

    /// Parses `x,y,width,height`.
    fn from_str(s: &str) -> Result<Self> {
        let v = parse_numbers(s, 4, "seed rectangle")?;
        let seed = Seed { x: v[0], y: v[1], width: v[2], height: v[3] };
        if seed.width < 0.0 || seed.height < 0.0 {
            return Err(Error::InvalidSeed(format!("seed rectangle `{s}` has a negative extent")));
        }
        Ok(seed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub iterations: i64,
    pub width: f64,
    pub height: f64,
    pub stroke_width: f64,
    /// Used when no seed rectangle is given.
    pub origin: Point2D,
    pub seed: Option<Seed>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            stroke_width: DEFAULT_STROKE_WIDTH,
            origin: Point2D::ORIGIN,
            seed: None,
        }
    }
}

impl Settings {
    /// Origin and extents of the first rectangle. A seed rectangle takes
    /// precedence over the configured origin and size.
    pub fn seed_geometry(&self) -> (Point2D, f64, f64) {
        match self.seed {
            Some(seed) => (Point2D::new(seed.x, seed.y), seed.width, seed.height),
            None => (self.origin, self.width, self.height),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (origin, width, height) = self.seed_geometry();
        if !origin.is_finite() || !width.is_finite() || !height.is_finite() {
            return Err(Error::invalid_input("seed geometry must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(Error::invalid_input(format!("size must not be negative, got {width}x{height}")));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(Error::invalid_input(format!(
                "stroke width must be a positive number, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }

    /// The base style hosts start from, with this configuration's stroke.
    pub fn base_style(&self) -> Style {
        Style::base().with_stroke_width(self.stroke_width)
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Rect>> {
        self.validate()?;
        let (origin, width, height) = self.seed_geometry();
        subdivide(self.iterations, origin, width, height, &self.base_style(), self.stroke_width, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn defaults_match_host_options() {
        let s = Settings::default();
        assert_eq!(s.iterations, 20);
        assert_eq!(s.width, 300.0);
        assert_eq!(s.height, 300.0);
        assert_eq!(s.stroke_width, 8.0);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn parses_points_and_seeds() {
        assert_eq!(parse_point(" 1.5, -2 ").unwrap(), Point2D::new(1.5, -2.0));
        let seed: Seed = "10,20,30,40".parse().unwrap();
        assert_eq!(seed, Seed { x: 10.0, y: 20.0, width: 30.0, height: 40.0 });
    }

    #[test]
    fn rejects_malformed_seeds() {
        assert!(matches!("1,2,3".parse::<Seed>(), Err(Error::InvalidSeed(_))));
        assert!(matches!("1,2,3,4,5".parse::<Seed>(), Err(Error::InvalidSeed(_))));
        assert!(matches!("1,2,x,4".parse::<Seed>(), Err(Error::InvalidSeed(_))));
        assert!(matches!("1,2,-3,4".parse::<Seed>(), Err(Error::InvalidSeed(_))));
        assert!(matches!("1,2,inf,4".parse::<Seed>(), Err(Error::InvalidSeed(_))));
        assert!(matches!(parse_point("1"), Err(Error::InvalidSeed(_))));
    }

    #[test]
    fn seed_rectangle_wins_over_origin() {
        let settings = Settings {
            origin: Point2D::new(5.0, 5.0),
            seed: Some(Seed { x: 1.0, y: 2.0, width: 3.0, height: 4.0 }),
            ..Settings::default()
        };
        assert_eq!(settings.seed_geometry(), (Point2D::new(1.0, 2.0), 3.0, 4.0));
        assert_eq!(Settings::default().seed_geometry(), (Point2D::ORIGIN, 300.0, 300.0));
    }

    #[test]
    fn generate_uses_configured_stroke() {
        let settings = Settings { iterations: 3, stroke_width: 2.0, ..Settings::default() };
        let mut rng = StdRng::seed_from_u64(1);
        let rects = settings.generate(&mut rng).unwrap();
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[3].stroke_width(), 2.0);
        assert_eq!(rects[0].style.fill(), Some("#ffffff"));
    }

    #[test]
    fn invalid_settings_fail_before_generating() {
        let mut rng = StdRng::seed_from_u64(1);
        let settings = Settings { stroke_width: -1.0, ..Settings::default() };
        assert!(settings.generate(&mut rng).is_err());
        let settings = Settings { width: f64::NAN, ..Settings::default() };
        assert!(settings.generate(&mut rng).is_err());
        let settings = Settings { height: -4.0, ..Settings::default() };
        assert!(settings.generate(&mut rng).is_err());
    }
}
