use serde::{Deserialize, Serialize};

use crate::color::{Hsv, Rgb};

/// Formula for the third palette group.
///
/// The color-theory literature (and the app this replaces) knows two
/// variants: true triadic (+120/+240/+120 degrees) and a split-complementary
/// "contrasting" spread (+150/+210/+180). Triadic is the canonical default;
/// the contrasting variant stays available as an explicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Scheme {
    #[default]
    Triadic,
    Contrasting,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::Triadic => f.write_str("triadic"),
            Scheme::Contrasting => f.write_str("contrasting"),
        }
    }
}

/// One palette entry: exact RGB plus its derived hex code and name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub hex: String,
    pub name: String,
}

impl Swatch {
    fn from_rgb(rgb: Rgb) -> Self {
        Self {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            hex: rgb.to_hex(),
            name: rgb.name().to_string(),
        }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// The four harmony groups generated for one base color.
/// Built fresh per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub complementary: Vec<Swatch>,
    pub analogous: Vec<Swatch>,
    pub triadic: Vec<Swatch>,
    pub neutral: Vec<Swatch>,
}

/// Grayscale palette shared by every result, independent of the base color.
const NEUTRALS: [Rgb; 6] = [
    Rgb { r: 255, g: 255, b: 255 }, // white
    Rgb { r: 240, g: 240, b: 240 }, // light gray
    Rgb { r: 160, g: 160, b: 160 }, // medium gray
    Rgb { r: 80, g: 80, b: 80 },    // dark gray
    Rgb { r: 30, g: 30, b: 30 },    // charcoal
    Rgb { r: 0, g: 0, b: 0 },       // black
];

/// Derive the matching palette groups for a base color.
///
/// Pure and deterministic: the same base and scheme always produce the same
/// result. Hue offsets rotate around the wheel (wrapping mod 360);
/// saturation/value tweaks are clamped into [0, 1] before converting back.
pub fn generate_matches(base: Rgb, scheme: Scheme) -> MatchResult {
    let hsv = base.to_hsv();

    MatchResult {
        complementary: complementary(hsv),
        analogous: analogous(hsv),
        triadic: third_group(hsv, scheme),
        neutral: NEUTRALS.iter().copied().map(Swatch::from_rgb).collect(),
    }
}

fn derive(hsv: Hsv, offset: f32, s: f32, v: f32) -> Swatch {
    Swatch::from_rgb(Rgb::from_hsv(Hsv {
        h: (hsv.h + offset).rem_euclid(360.0),
        s,
        v,
    }))
}

/// Opposite side of the color wheel, in three saturation/value variations.
fn complementary(hsv: Hsv) -> Vec<Swatch> {
    vec![
        derive(hsv, 180.0, hsv.s, hsv.v),
        derive(hsv, 180.0, (hsv.s - 0.2).max(0.2), hsv.v),
        derive(hsv, 180.0, (hsv.s + 0.2).min(1.0), hsv.v * 0.8),
    ]
}

/// Neighboring hues at 30 and 60 degrees on either side.
fn analogous(hsv: Hsv) -> Vec<Swatch> {
    vec![
        derive(hsv, 30.0, hsv.s, hsv.v),
        derive(hsv, -30.0, hsv.s, hsv.v),
        derive(hsv, 60.0, hsv.s * 0.8, hsv.v),
        derive(hsv, -60.0, hsv.s * 0.8, hsv.v),
    ]
}

fn third_group(hsv: Hsv, scheme: Scheme) -> Vec<Swatch> {
    match scheme {
        Scheme::Triadic => vec![
            derive(hsv, 120.0, hsv.s, hsv.v),
            derive(hsv, 240.0, hsv.s, hsv.v),
            derive(hsv, 120.0, hsv.s * 0.7, hsv.v * 0.9),
        ],
        Scheme::Contrasting => vec![
            derive(hsv, 150.0, hsv.s, hsv.v),
            derive(hsv, 210.0, hsv.s, hsv.v),
            derive(hsv, 180.0, (hsv.s * 0.9).max(0.2), hsv.v * 0.85),
        ],
    }
}
