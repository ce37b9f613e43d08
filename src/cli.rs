use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::harmony::Scheme;

/// Generate outfit color palettes from clothing photos.
#[derive(Parser, Debug)]
#[command(name = "huefit", version, about)]
pub struct Args {
    /// Path to the clothing image (omit with --synthetic or --list)
    #[arg(required_unless_present_any = ["synthetic", "list"])]
    pub image: Option<PathBuf>,

    /// Index of the extracted dominant color to use as the base
    #[arg(short, long, default_value_t = 0)]
    pub base: usize,

    /// Formula for the third harmony group
    #[arg(short, long, value_enum, default_value_t = Scheme::Triadic)]
    pub scheme: Scheme,

    /// Maximum number of dominant colors to extract
    #[arg(short = 'k', long = "colors", default_value_t = 5)]
    pub colors: usize,

    /// Euclidean RGB distance below which extracted colors count as duplicates
    #[arg(long, default_value_t = 50.0)]
    pub threshold: f32,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Print colored swatches to the terminal
    #[arg(long, conflicts_with = "json")]
    pub preview: bool,

    /// Use the synthetic sample palette instead of analyzing pixels
    #[arg(long)]
    pub synthetic: bool,

    /// Save the generated palette under this name
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,

    /// User identifier namespacing the palette store
    #[arg(long, default_value = "default")]
    pub user: String,

    /// List saved palettes for the user and exit
    #[arg(long, conflicts_with = "save")]
    pub list: bool,

    /// Override the palette store directory
    #[arg(long, value_name = "PATH")]
    pub store_dir: Option<PathBuf>,
}
