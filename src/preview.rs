//! Inline terminal swatch rendering for extracted and generated palettes.

use std::io::Write;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::color::Rgb;
use crate::pipeline::harmony::MatchResult;

fn term_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// One colored cell: the swatch label on its own background, with black or
/// white text picked for readability.
fn swatch_cell(out: &mut impl Write, rgb: Rgb, label: &str) -> std::io::Result<()> {
    queue!(
        out,
        SetBackgroundColor(term_color(rgb)),
        SetForegroundColor(term_color(rgb.contrasting_text())),
        Print(format!(" {label} ")),
        ResetColor,
        Print(" "),
    )
}

fn swatch_row(out: &mut impl Write, heading: &str, colors: &[(Rgb, String)]) -> std::io::Result<()> {
    queue!(out, Print(format!("{heading}\n  ")))?;
    for (rgb, label) in colors {
        swatch_cell(out, *rgb, label)?;
    }
    queue!(out, Print("\n"))?;
    Ok(())
}

/// Print the extracted dominant colors as one row of swatches.
pub fn print_dominant(out: &mut impl Write, colors: &[Rgb]) -> std::io::Result<()> {
    let cells: Vec<(Rgb, String)> = colors.iter().map(|c| (*c, c.to_hex())).collect();
    swatch_row(out, "Dominant colors", &cells)?;
    out.flush()
}

/// Print the base color and all four harmony groups as swatch rows.
pub fn print_result(out: &mut impl Write, base: Rgb, result: &MatchResult) -> std::io::Result<()> {
    swatch_row(
        out,
        "Base",
        &[(base, format!("{} {}", base.name(), base.to_hex()))],
    )?;
    for (heading, group) in [
        ("Complementary", &result.complementary),
        ("Analogous", &result.analogous),
        ("Triadic", &result.triadic),
        ("Neutral", &result.neutral),
    ] {
        let cells: Vec<(Rgb, String)> = group
            .iter()
            .map(|s| (s.rgb(), format!("{} {}", s.name, s.hex)))
            .collect();
        swatch_row(out, heading, &cells)?;
    }
    out.flush()
}
