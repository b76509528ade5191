//! destijl command-line host
//!
//! Generates a composition and writes it as SVG, JSON or a PNG preview.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use destijl::settings::{DEFAULT_HEIGHT, DEFAULT_ITERATIONS, DEFAULT_WIDTH, parse_point};
use destijl::style::DEFAULT_STROKE_WIDTH;
use destijl::{Point2D, Rect, Seed, Settings, rasterize, write_svg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Json,
    Png,
}

/// Generate De Stijl style compositions by recursive rectangle subdivision
#[derive(Parser, Debug)]
#[command(name = "destijl")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # 20 subdivisions of a 300x300 square as SVG on stdout
    destijl > art.svg

    # Reproducible run from an existing rectangle
    destijl --seed-rect 10,10,400,250 --rng-seed 42 -o art.svg

    # PNG preview
    destijl -i 30 -f png -o art.png --png-width 1200
"#)]
struct Cli {
    /// Number of subdivision steps
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS, allow_hyphen_values = true)]
    iterations: i64,

    /// Width of the first rectangle
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: f64,

    /// Height of the first rectangle
    #[arg(short = 'e', long, default_value_t = DEFAULT_HEIGHT)]
    height: f64,

    /// Stroke width of the last rectangle; earlier ones are thicker
    #[arg(short, long, default_value_t = DEFAULT_STROKE_WIDTH)]
    stroke_width: f64,

    /// Top-left corner of the first rectangle
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    origin: Option<Point2D>,

    /// Start from an existing rectangle instead of --origin/--width/--height
    #[arg(long, value_name = "X,Y,W,H", allow_hyphen_values = true)]
    seed_rect: Option<Seed>,

    /// Seed for the random number generator
    #[arg(long, value_name = "N")]
    rng_seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Width of the PNG preview in pixels
    #[arg(long, default_value_t = 800)]
    png_width: u32,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            iterations: self.iterations,
            width: self.width,
            height: self.height,
            stroke_width: self.stroke_width,
            origin: self.origin.unwrap_or(Point2D::ORIGIN),
            seed: self.seed_rect,
        }
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn write_output(cli: &Cli, rects: &[Rect]) -> Result<()> {
    match cli.format {
        Format::Svg => {
            write_svg(rects, open_output(cli.output.as_ref())?).context("failed to write SVG")?;
        }
        Format::Json => {
            let mut out = open_output(cli.output.as_ref())?;
            serde_json::to_writer_pretty(&mut out, rects).context("failed to write JSON")?;
            writeln!(out)?;
            out.flush()?;
        }
        Format::Png => {
            let Some(path) = cli.output.as_ref() else {
                bail!("--output is required for PNG output");
            };
            let screen = rasterize(rects, cli.png_width).context("failed to rasterize composition")?;
            screen
                .save_png(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("saved {}", path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut rng = match cli.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let rects = cli.settings().generate(&mut rng).context("failed to generate composition")?;
    info!("generated {} rectangles", rects.len());

    write_output(&cli, &rects)
}
