use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use zenpalette::{PaletteConfig, RGB8, image_source};

/// Extract color palettes from images with modified median cut quantization.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of palette colors to aim for (2-256)
    #[arg(short = 'k', long, default_value_t = 10)]
    color_count: u32,

    /// Sampling stride: 1 samples every pixel, higher is faster and coarser
    #[arg(short, long, default_value_t = 10)]
    quality: u32,

    /// Keep near-white pixels
    #[arg(long)]
    allow_white: bool,

    /// Print only the dominant color
    #[arg(short, long)]
    dominant: bool,

    /// Emit JSON instead of hex lines
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl From<RGB8> for Rgb {
    fn from(c: RGB8) -> Self {
        Self {
            red: c.r,
            green: c.g,
            blue: c.b,
        }
    }
}

#[derive(Serialize)]
struct Report {
    file: String,
    palette: Vec<Rgb>,
}

fn hex(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = PaletteConfig::new()
        .color_count(args.color_count)
        .quality(args.quality)
        .allow_white(args.allow_white);

    let mut reports = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let palette = if args.dominant {
            vec![image_source::color_from_path(input, &config)
                .with_context(|| format!("dominant color of {}", input.display()))?]
        } else {
            image_source::palette_from_path(input, &config)
                .with_context(|| format!("palette of {}", input.display()))?
        };

        if args.json {
            reports.push(Report {
                file: input.display().to_string(),
                palette: palette.into_iter().map(Rgb::from).collect(),
            });
        } else {
            println!("{}", input.display());
            for c in palette {
                println!("  {}", hex(c));
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
