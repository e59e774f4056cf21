// Copyright (c) 2026 glyphrain contributors

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::palette::ColorScheme;

/// Inclusive Unicode code-point range, parsed from `HEX-HEX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRange {
    pub low: u32,
    pub high: u32,
}

impl FromStr for GlyphRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hint = format!("invalid glyph range: {} (expected format: 13000-1342F)", s);
        let (a, b) = s.split_once('-').ok_or_else(|| hint.clone())?;
        let low = u32::from_str_radix(a.trim(), 16).map_err(|_| hint.clone())?;
        let high = u32::from_str_radix(b.trim(), 16).map_err(|_| hint.clone())?;
        if low > high {
            return Err(hint);
        }
        Ok(Self { low, high })
    }
}

/// Expands the range into the drawable glyph pool, skipping code points that
/// are not valid scalar values.
pub fn build_glyphs(range: GlyphRange) -> Vec<char> {
    (range.low..=range.high).filter_map(char::from_u32).collect()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphrain", version, about = "Depth-layered digital rain for the terminal")]
pub struct Args {
    #[arg(
        short = 'c',
        long = "color",
        value_enum,
        default_value = "blue",
        help_heading = "APPEARANCE",
        help = "Color theme for the rain"
    )]
    pub color: ColorScheme,

    #[arg(
        short = 'g',
        long = "glyph-range",
        default_value = "13000-1342F",
        help_heading = "APPEARANCE",
        help = "Unicode range for rain glyphs, e.g. 13000-1342F"
    )]
    pub glyph_range: GlyphRange,

    #[arg(
        long = "min-font",
        default_value_t = 12,
        help_heading = "DEPTH",
        help = "Virtual font size of the farthest row (min 4 max 72)"
    )]
    pub min_font: u16,

    #[arg(
        long = "max-font",
        default_value_t = 36,
        help_heading = "DEPTH",
        help = "Virtual font size of the nearest row (min 4 max 72)"
    )]
    pub max_font: u16,

    #[arg(
        short = 'r',
        long = "rows",
        default_value_t = 6,
        help_heading = "DEPTH",
        help = "Number of depth layers front to back (min 1 max 16)"
    )]
    pub rows: u16,

    #[arg(
        short = 'S',
        long = "rain-speed",
        default_value_t = 3.0,
        help_heading = "MOTION",
        help = "Rain speed multiplier (min 0.1 max 100)"
    )]
    pub rain_speed: f32,

    #[arg(
        long = "no-midway",
        help_heading = "MOTION",
        help = "Disable midway starts (streaks always enter from above the screen)"
    )]
    pub no_midway: bool,

    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 30.0,
        help_heading = "MOTION",
        help = "Target frames per second (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(
        short = 'w',
        long = "watermark",
        help_heading = "WATERMARK",
        help = "Text-art file overlaid bottom right (load failure is non-fatal)"
    )]
    pub watermark: Option<PathBuf>,

    #[arg(
        long = "watermark-bounce",
        help_heading = "WATERMARK",
        help = "Bounce the watermark around the screen instead of pinning it"
    )]
    pub watermark_bounce: bool,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color depth (allowed: 0,8,24). Default: detected from COLORTERM/TERM"
    )]
    pub colormode: Option<u8>,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed the random generator for a reproducible run"
    )]
    pub seed: Option<u64>,

    #[arg(
        short = 'd',
        long = "debug",
        help_heading = "GENERAL",
        help = "Draw a guideline at each active column"
    )]
    pub debug: bool,
}

pub fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

pub fn require_f32_range(name: &str, v: f32, min: f32, max: f32) -> f32 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

pub fn require_u16_range(name: &str, v: u16, min: u16, max: u16) -> u16 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hieroglyph_range_parses_to_expected_bounds() {
        let r: GlyphRange = "13000-1342F".parse().unwrap();
        assert_eq!(r, GlyphRange { low: 0x13000, high: 0x1342F });
    }

    #[test]
    fn malformed_ranges_fail_with_the_format_hint() {
        for bad in ["zz-aa", "13000", "1342F-13000", "-", ""] {
            let err = bad.parse::<GlyphRange>().unwrap_err();
            assert!(err.contains("expected format: 13000-1342F"), "{bad}: {err}");
        }
    }

    #[test]
    fn glyph_pool_skips_invalid_scalar_values() {
        // surrogate block is not valid char territory
        let pool = build_glyphs(GlyphRange { low: 0xD7FF, high: 0xE000 });
        assert_eq!(pool, vec!['\u{D7FF}', '\u{E000}']);
    }

    #[test]
    fn glyph_pool_covers_the_whole_inclusive_range() {
        let pool = build_glyphs(GlyphRange { low: 0x30, high: 0x39 });
        assert_eq!(pool.len(), 10);
        assert_eq!(pool[0], '0');
        assert_eq!(pool[9], '9');
    }
}
