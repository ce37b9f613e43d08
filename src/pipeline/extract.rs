use std::collections::HashMap;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::color::Rgb;

/// Sample every Nth pixel of the buffer instead of every pixel.
pub const SAMPLE_STRIDE: usize = 5;
/// Samples below this alpha are treated as not visually present.
pub const ALPHA_CUTOFF: u8 = 125;
/// Colors closer than this (Euclidean RGB) are considered the same tone.
pub const SIMILARITY_THRESHOLD: f32 = 50.0;
/// Number of top frequency buckets considered before similarity filtering.
const TOP_BUCKETS: usize = 6;
/// Maximum number of dominant colors returned.
pub const MAX_COLORS: usize = 5;

/// A source of dominant colors for one garment image.
///
/// Two strategies exist: real pixel analysis ([`PixelSampler`]) and a
/// synthetic stand-in ([`SyntheticSampler`]) for environments with no pixel
/// access. Callers pick one explicitly; they are never mixed.
pub trait ColorSource {
    fn dominant_colors(&mut self) -> Vec<Rgb>;
}

/// Frequency-based dominant color extraction over a decoded RGBA buffer.
///
/// The buffer is row-major, 4 bytes per pixel, already resized by the
/// caller so the longer side is at most ~200 pixels.
pub struct PixelSampler<'a> {
    rgba: &'a [u8],
    max_colors: usize,
    threshold: f32,
}

impl<'a> PixelSampler<'a> {
    pub fn new(rgba: &'a [u8]) -> Self {
        Self {
            rgba,
            max_colors: MAX_COLORS,
            threshold: SIMILARITY_THRESHOLD,
        }
    }

    /// Override the result cap and similarity threshold.
    pub fn with_limits(mut self, max_colors: usize, threshold: f32) -> Self {
        self.max_colors = max_colors;
        self.threshold = threshold;
        self
    }
}

impl ColorSource for PixelSampler<'_> {
    fn dominant_colors(&mut self) -> Vec<Rgb> {
        extract_colors(self.rgba, self.max_colors, self.threshold)
    }
}

/// Round a channel to the nearest multiple of 10, capped at 250 so the
/// bucket stays a valid channel value.
fn quantize(c: u8) -> u8 {
    (((c as u32 + 5) / 10) * 10).min(250) as u8
}

/// Extract up to `max_colors` dominant colors from an RGBA buffer.
///
/// Samples every 5th pixel, drops near-transparent samples, quantizes each
/// channel to a 10-step grid, ranks buckets by frequency, and filters out
/// near-identical tones. An empty or fully transparent buffer yields an
/// empty result; that is a valid degenerate outcome, not an error.
pub fn extract_colors(rgba: &[u8], max_colors: usize, threshold: f32) -> Vec<Rgb> {
    let mut counts: HashMap<Rgb, u32> = HashMap::new();
    let mut retained = 0usize;

    for px in rgba.chunks_exact(4).step_by(SAMPLE_STRIDE) {
        if px[3] < ALPHA_CUTOFF {
            continue;
        }
        retained += 1;
        let bucket = Rgb::new(quantize(px[0]), quantize(px[1]), quantize(px[2]));
        *counts.entry(bucket).or_insert(0) += 1;
    }

    // Rank by frequency; ties break on the bucket value so hash iteration
    // order never leaks into the result.
    let mut ranked: Vec<(Rgb, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| (a.0.r, a.0.g, a.0.b).cmp(&(b.0.r, b.0.g, b.0.b))));

    let candidates: Vec<Rgb> = ranked.into_iter().take(TOP_BUCKETS).map(|(c, _)| c).collect();
    debug!(
        "extraction: {} samples retained, {} candidate buckets",
        retained,
        candidates.len()
    );

    let mut dominant = filter_similar_colors(&candidates, threshold);
    dominant.truncate(max_colors);
    dominant
}

/// Drop candidates that sit within `threshold` (Euclidean RGB distance) of
/// an already accepted color. The first candidate is always kept; the rest
/// are walked in order, so result ordering follows the input ranking.
pub fn filter_similar_colors(colors: &[Rgb], threshold: f32) -> Vec<Rgb> {
    let mut filtered: Vec<Rgb> = Vec::with_capacity(colors.len());
    for &candidate in colors {
        if filtered
            .iter()
            .all(|&kept| candidate.distance(kept) >= threshold)
        {
            filtered.push(candidate);
        }
    }
    filtered
}

/// Fixed palette of common garment colors backing the synthetic strategy.
pub const GARMENT_COLORS: [Rgb; 8] = [
    Rgb { r: 74, g: 144, b: 226 },  // blue
    Rgb { r: 46, g: 125, b: 50 },   // green
    Rgb { r: 211, g: 47, b: 47 },   // red
    Rgb { r: 251, g: 192, b: 45 },  // yellow
    Rgb { r: 123, g: 31, b: 162 },  // purple
    Rgb { r: 255, g: 255, b: 255 }, // white
    Rgb { r: 33, g: 33, b: 33 },    // black
    Rgb { r: 158, g: 158, b: 158 }, // gray
];

/// Synthetic stand-in for pixel analysis.
///
/// Draws 3-5 colors at random from [`GARMENT_COLORS`]. This is NOT image
/// analysis; it exists for environments where no real pixel buffer can be
/// obtained, and must be selected explicitly by the caller.
pub struct SyntheticSampler<R: Rng> {
    rng: R,
}

impl SyntheticSampler<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for SyntheticSampler<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SyntheticSampler<R> {
    /// Use a caller-supplied RNG (deterministic in tests).
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ColorSource for SyntheticSampler<R> {
    fn dominant_colors(&mut self) -> Vec<Rgb> {
        let n = self.rng.gen_range(3..=5);
        GARMENT_COLORS
            .choose_multiple(&mut self.rng, n)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Build an RGBA buffer of `n` pixels, all the same color/alpha.
    fn solid_buffer(n: usize, rgb: [u8; 3], alpha: u8) -> Vec<u8> {
        let mut buf = Vec::with_capacity(n * 4);
        for _ in 0..n {
            buf.extend_from_slice(&[rgb[0], rgb[1], rgb[2], alpha]);
        }
        buf
    }

    #[test]
    fn quantize_rounds_to_tens() {
        assert_eq!(quantize(0), 0);
        assert_eq!(quantize(4), 0);
        assert_eq!(quantize(5), 10);
        assert_eq!(quantize(123), 120);
        assert_eq!(quantize(128), 130);
        assert_eq!(quantize(244), 240);
        assert_eq!(quantize(245), 250);
        assert_eq!(quantize(255), 250);
    }

    #[test]
    fn uniform_buffer_yields_one_color() {
        let buf = solid_buffer(400, [123, 45, 200], 255);
        let colors = extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD);
        assert_eq!(colors, vec![Rgb::new(120, 50, 200)]);
    }

    #[test]
    fn empty_buffer_yields_nothing() {
        let colors = extract_colors(&[], MAX_COLORS, SIMILARITY_THRESHOLD);
        assert!(colors.is_empty());
    }

    #[test]
    fn transparent_buffer_yields_nothing() {
        let buf = solid_buffer(400, [200, 10, 10], 0);
        let colors = extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD);
        assert!(colors.is_empty());
    }

    #[test]
    fn alpha_cutoff_is_honored() {
        // 124 is below the cutoff, 125 is at it
        let mut buf = solid_buffer(400, [200, 10, 10], 124);
        buf.extend(solid_buffer(400, [10, 10, 200], 125));
        let colors = extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD);
        assert_eq!(colors, vec![Rgb::new(10, 10, 200)]);
    }

    #[test]
    fn most_frequent_color_comes_first() {
        let mut buf = solid_buffer(200, [0, 0, 250], 255);
        buf.extend(solid_buffer(600, [250, 0, 0], 255));
        let colors = extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD);
        assert_eq!(colors[0], Rgb::new(250, 0, 0));
        assert_eq!(colors[1], Rgb::new(0, 0, 250));
    }

    #[test]
    fn near_duplicate_shades_collapse() {
        // Shades within one quantization bucket of each other: one survives
        let mut buf = solid_buffer(300, [100, 100, 100], 255);
        buf.extend(solid_buffer(300, [102, 99, 101], 255));
        buf.extend(solid_buffer(300, [98, 101, 100], 255));
        let colors = extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD);
        assert_eq!(colors, vec![Rgb::new(100, 100, 100)]);
    }

    #[test]
    fn similar_but_distinct_buckets_are_filtered() {
        // Distinct buckets but Euclidean distance < 50: only the more
        // frequent one survives the similarity filter.
        let mut buf = solid_buffer(600, [100, 100, 100], 255);
        buf.extend(solid_buffer(300, [130, 100, 100], 255));
        let colors = extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD);
        assert_eq!(colors, vec![Rgb::new(100, 100, 100)]);
    }

    #[test]
    fn result_capped_at_five() {
        // Seven well-separated colors; only six buckets are even considered
        let palette = [
            [250, 0, 0],
            [0, 250, 0],
            [0, 0, 250],
            [250, 250, 0],
            [250, 0, 250],
            [0, 250, 250],
            [250, 250, 250],
        ];
        let mut buf = Vec::new();
        for (i, rgb) in palette.iter().enumerate() {
            // Distinct counts to force a stable ranking
            buf.extend(solid_buffer(700 - i * 50, *rgb, 255));
        }
        let colors = extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], Rgb::new(250, 0, 0));
    }

    #[test]
    fn extraction_is_deterministic() {
        let mut buf = Vec::new();
        for i in 0..2000u32 {
            let c = [(i % 7 * 37) as u8, (i % 5 * 49) as u8, (i % 3 * 80) as u8];
            buf.extend(solid_buffer(1, c, 255));
        }
        let first = extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD);
        for _ in 0..10 {
            assert_eq!(extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD), first);
        }
    }

    #[test]
    fn stride_skips_pixels() {
        // One red pixel placed off-stride between blue pixels never shows up
        let mut buf = solid_buffer(1, [0, 0, 250], 255);
        buf.extend(solid_buffer(1, [250, 0, 0], 255));
        buf.extend(solid_buffer(8, [0, 0, 250], 255));
        let colors = extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD);
        assert_eq!(colors, vec![Rgb::new(0, 0, 250)]);
    }

    #[test]
    fn filter_keeps_seed_and_spacing() {
        let colors = [
            Rgb::new(100, 100, 100),
            Rgb::new(110, 110, 110), // within 50 of seed
            Rgb::new(200, 200, 200),
            Rgb::new(210, 210, 210), // within 50 of previous keeper
        ];
        let filtered = filter_similar_colors(&colors, 50.0);
        assert_eq!(
            filtered,
            vec![Rgb::new(100, 100, 100), Rgb::new(200, 200, 200)]
        );
    }

    #[test]
    fn filter_pairwise_distance_holds() {
        let colors: Vec<Rgb> = (0..=25)
            .map(|i| Rgb::new(i * 10, 255 - i * 10, (i * 7) % 255))
            .collect();
        let filtered = filter_similar_colors(&colors, 50.0);
        for (i, a) in filtered.iter().enumerate() {
            for b in &filtered[i + 1..] {
                assert!(
                    a.distance(*b) >= 50.0,
                    "{a:?} and {b:?} closer than threshold"
                );
            }
        }
    }

    #[test]
    fn filter_empty_input() {
        assert!(filter_similar_colors(&[], 50.0).is_empty());
    }

    #[test]
    fn pixel_sampler_matches_free_function() {
        let buf = solid_buffer(400, [123, 45, 200], 255);
        let via_trait = PixelSampler::new(&buf).dominant_colors();
        assert_eq!(via_trait, extract_colors(&buf, MAX_COLORS, SIMILARITY_THRESHOLD));
    }

    #[test]
    fn synthetic_sampler_draws_from_fixed_palette() {
        let mut sampler = SyntheticSampler::with_rng(StdRng::seed_from_u64(7));
        for _ in 0..50 {
            let colors = sampler.dominant_colors();
            assert!((3..=5).contains(&colors.len()));
            for c in &colors {
                assert!(GARMENT_COLORS.contains(c), "{c:?} not in fixed palette");
            }
            // No repeats within one draw
            for (i, a) in colors.iter().enumerate() {
                assert!(!colors[i + 1..].contains(a));
            }
        }
    }
}
