//! Command-line arguments using Clap v4

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// quadglyph - inspect the GPU text pipeline's textures from the command line
#[derive(Parser, Debug)]
#[command(name = "quadglyph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show font facts and which vertical metrics layout will use
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Build the curve atlas of a font
    #[command(alias = "a")]
    Atlas(AtlasArgs),

    /// Lay out text and print the glyph and line records
    #[command(alias = "l")]
    Layout(LayoutArgs),
}

/// Font selection shared by every command
#[derive(Args, Debug)]
pub struct FontArgs {
    /// Font file path (.ttf, .otf, .ttc, .otc)
    pub font_file: PathBuf,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub font: FontArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AtlasArgs {
    #[command(flatten)]
    pub font: FontArgs,

    /// Write raw little-endian f32 texels here
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// What goes into the curve metadata slots
    #[arg(long = "meta", default_value = "zero")]
    pub meta: MetaArg,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub font: FontArgs,

    /// Text to lay out; `\n` splits lines
    #[arg(short = 't', long = "text")]
    pub text: String,

    /// Font size in pixels per em
    #[arg(short = 's', long = "px", default_value = "16")]
    pub px_per_em: f32,

    /// Shaping backend
    #[arg(long = "shaper", default_value = "none")]
    pub shaper: ShaperArg,

    /// Font feature settings, e.g. `kern=0,liga`
    #[arg(short = 'F', long = "features")]
    pub features: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShaperArg {
    /// Advances from the font's hmtx table
    None,
    /// harfrust shaping
    Hr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetaArg {
    Zero,
    Contour,
}
