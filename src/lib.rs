//! # huefit
//!
//! Generate color-theory matching palettes from clothing photos.
//!
//! The pipeline: decode and downscale an image, sample its pixels to find
//! the dominant colors, then derive complementary, analogous, triadic and
//! neutral palette groups from a chosen base color via HSV rotations.
//! Generated palettes can be persisted per user through a pluggable
//! key-value store.
//!
//! ## Example
//!
//! ```rust,no_run
//! use huefit::color::Rgb;
//! use huefit::pipeline::extract::{ColorSource, PixelSampler};
//! use huefit::pipeline::harmony::{generate_matches, Scheme};
//! use huefit::pipeline::load::load_and_prepare;
//! use std::path::Path;
//!
//! let img = load_and_prepare(Path::new("shirt.jpg"))?;
//! let dominant = PixelSampler::new(img.as_raw()).dominant_colors();
//! if let Some(&base) = dominant.first() {
//!     let matches = generate_matches(base, Scheme::Triadic);
//!     println!("wear it with {}", matches.complementary[0].hex);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod color;
pub mod error;
pub mod pipeline;
pub mod preview;
pub mod store;

pub use color::{Hsv, Rgb};
pub use error::{PaletteError, Result};
