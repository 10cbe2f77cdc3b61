use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pixvec::{PolygonOptions, RasterSettings};

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// Hide the progress bar
    #[arg(short, long, global = true, env = "PIXVEC_QUIET")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tile the foreground with rectangles, one per solid pixel block
    Rects(ConvertCommand),
    /// Outline every foreground region with its traced contour
    Contours(ConvertCommand),
    /// Outline every foreground region with a smoothed, simplified polygon
    Smart(SmartCommand),
    /// Export only the binarized mask as a PNG
    Mask(MaskCommand),
}

#[derive(Args, Debug)]
pub struct ConvertCommand {
    #[command(flatten)]
    pub raster: RasterArgs,
}

#[derive(Args, Debug)]
pub struct SmartCommand {
    #[command(flatten)]
    pub raster: RasterArgs,
    #[command(flatten)]
    pub polygon: PolygonArgs,
}

#[derive(Args, Debug)]
pub struct MaskCommand {
    #[command(flatten)]
    pub raster: RasterArgs,
}

#[derive(Args, Debug)]
pub struct RasterArgs {
    /// Input image path
    pub input: PathBuf,
    /// Output path (defaults to the input name with `.svg`, or `<name>-mask.png` for masks)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Pixels brighter than this after inversion are foreground (1-255)
    #[arg(short, long, default_value_t = 128, value_parser = clap::value_parser!(u8).range(1..=255))]
    pub threshold: u8,
    /// Resize factor in fifths: 5 keeps the size, 10 doubles it (1-10)
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub scale: u32,
    /// Output size in percent of the mask size (100-1000, steps of 100)
    #[arg(short, long, default_value_t = 100, value_parser = parse_resolution)]
    pub resolution: u32,
    /// Treat light pixels as foreground instead of dark ones
    #[arg(long = "no-negative")]
    pub no_negative: bool,
}

impl From<&RasterArgs> for RasterSettings {
    fn from(args: &RasterArgs) -> Self {
        Self {
            threshold: args.threshold,
            scale: args.scale,
            negative: !args.no_negative,
            resolution: args.resolution,
        }
    }
}

#[derive(Args, Debug)]
pub struct PolygonArgs {
    /// Douglas-Peucker tolerance in pixels; 0 disables decimation
    #[arg(long, default_value_t = 2.5)]
    pub epsilon: f64,
    /// Drop points closer than this to the previously kept point
    #[arg(long = "merge-threshold", default_value_t = 2.0)]
    pub merge_threshold: f64,
}

impl From<&PolygonArgs> for PolygonOptions {
    fn from(args: &PolygonArgs) -> Self {
        PolygonOptions::default()
            .with_epsilon(args.epsilon)
            .with_merge_threshold(args.merge_threshold)
    }
}

fn parse_resolution(value: &str) -> Result<u32, String> {
    let resolution = value
        .trim_end_matches('%')
        .parse::<u32>()
        .map_err(|_| format!("resolution must be a whole percentage, got `{value}`"))?;

    if (100..=1000).contains(&resolution) && resolution % 100 == 0 {
        Ok(resolution)
    } else {
        Err(format!(
            "resolution {value} is out of range; expected 100, 200, ... 1000"
        ))
    }
}
