use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Core color type used throughout the pipeline.
/// Exact sRGB u8 components; everything else (hex, name, HSV) is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSV representation used as an intermediate for deriving related hues.
/// `h` in [0, 360) degrees, `s` and `v` in [0, 1]. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            bail!(
                "invalid hex color: expected 6 hex digits, got {}",
                hex.len()
            );
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSV using the standard max/min/delta formulation.
    /// A fully achromatic color (delta == 0) gets h = 0.
    pub fn to_hsv(self) -> Hsv {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let v = max;
        let s = if max == 0.0 { 0.0 } else { delta / max };

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            // Wrap the negative sector so hue stays in [0, 6)
            let mut sector = (g - b) / delta;
            if sector < 0.0 {
                sector += 6.0;
            }
            sector
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsv { h: h * 60.0, s, v }
    }

    /// Convert from HSV via the sector-based inverse transform.
    /// Hue is wrapped modulo 360; s and v are clamped into [0, 1].
    /// Channels are rounded (not truncated) back to u8.
    pub fn from_hsv(hsv: Hsv) -> Self {
        let h = hsv.h.rem_euclid(360.0) / 360.0;
        let s = hsv.s.clamp(0.0, 1.0);
        let v = hsv.v.clamp(0.0, 1.0);

        let i = (h * 6.0).floor();
        let f = h * 6.0 - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match i as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self {
            r: (r * 255.0).round() as u8,
            g: (g * 255.0).round() as u8,
            b: (b * 255.0).round() as u8,
        }
    }

    /// Euclidean distance in RGB space, unweighted.
    pub fn distance(self, other: Rgb) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Perceptual brightness in [0, 1] using luma weights.
    pub fn brightness(self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    /// True if the color reads as light (brightness above 0.5).
    pub fn is_light(self) -> bool {
        self.brightness() > 0.5
    }

    /// Pure black or pure white, whichever is readable on this background.
    pub fn contrasting_text(self) -> Rgb {
        if self.is_light() {
            Rgb::new(0, 0, 0)
        } else {
            Rgb::new(255, 255, 255)
        }
    }

    /// Lighten by raising HSV value by `percent` (clamped to 1.0).
    pub fn lighten(self, percent: f32) -> Rgb {
        let mut hsv = self.to_hsv();
        hsv.v = (hsv.v + percent).min(1.0);
        Rgb::from_hsv(hsv)
    }

    /// Darken by lowering HSV value by `percent` (clamped to 0.0).
    pub fn darken(self, percent: f32) -> Rgb {
        let mut hsv = self.to_hsv();
        hsv.v = (hsv.v - percent).max(0.0);
        Rgb::from_hsv(hsv)
    }

    /// Approximate human color name, recomputed from the components.
    ///
    /// Near-gray colors (saturation < 0.1) are classified by value alone;
    /// everything else falls into one of eight hue families, each split
    /// into a bright and a dark name.
    pub fn name(self) -> &'static str {
        let hsv = self.to_hsv();

        if hsv.s < 0.1 {
            return if hsv.v > 0.9 {
                "White"
            } else if hsv.v > 0.7 {
                "Light Gray"
            } else if hsv.v > 0.3 {
                "Gray"
            } else if hsv.v > 0.15 {
                "Dark Gray"
            } else {
                "Black"
            };
        }

        let hue = hsv.h;
        let bright = hsv.v > 0.5;
        if !(15.0..345.0).contains(&hue) {
            if bright {
                "Red"
            } else {
                "Dark Red"
            }
        } else if hue < 45.0 {
            if hsv.v > 0.6 {
                "Orange"
            } else {
                "Brown"
            }
        } else if hue < 75.0 {
            if bright {
                "Yellow"
            } else {
                "Olive"
            }
        } else if hue < 155.0 {
            if bright {
                "Green"
            } else {
                "Dark Green"
            }
        } else if hue < 185.0 {
            if bright {
                "Cyan"
            } else {
                "Teal"
            }
        } else if hue < 255.0 {
            if bright {
                "Blue"
            } else {
                "Navy"
            }
        } else if hue < 285.0 {
            if bright {
                "Purple"
            } else {
                "Violet"
            }
        } else if bright {
            "Magenta"
        } else {
            "Maroon"
        }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
