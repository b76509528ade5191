//! De Stijl style compositions built by recursive rectangle subdivision.
//!
//! [`subdivide`] is the whole core: given a seed rectangle, a base style and
//! an iteration count it returns the ordered rectangles of a composition.
//! Everything else here is host-side plumbing for turning that sequence into
//! an SVG document, JSON, or a PNG preview.
//!
//! ```
//! use destijl::{subdivide, Point2D, Style};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let rects = subdivide(10, Point2D::ORIGIN, 300.0, 300.0, &Style::base(), 8.0, &mut rng).unwrap();
//! assert_eq!(rects.len(), 11);
//! ```

// Internal modules
pub mod error;
pub mod geometry;
pub mod point2d;
pub mod rectangle;
pub mod screen;
pub mod settings;
pub mod style;
pub mod subdivision;
pub mod svg;

pub use crate::error::{Error, Result};
pub use crate::geometry::rasterize;
pub use crate::point2d::Point2D;
pub use crate::rectangle::{Corner, Rect};
pub use crate::settings::{Seed, Settings};
pub use crate::style::Style;
pub use crate::subdivision::subdivide;
pub use crate::svg::write_svg;
