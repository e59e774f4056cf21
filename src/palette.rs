// Copyright (c) 2026 glyphrain contributors

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color16,
    Color256,
    TrueColor,
}

pub type Rgb = (u8, u8, u8);

/// Head/trail color pair for one theme. Head is used at full intensity for
/// the newest symbol of an active column, trail fades with symbol age.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub head: Rgb,
    pub trail: Rgb,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Green,
    Blue,
}

pub fn build_theme(scheme: ColorScheme) -> Theme {
    match scheme {
        ColorScheme::Green => Theme {
            head: (180, 255, 180),
            trail: (0, 255, 70),
        },
        ColorScheme::Blue => Theme {
            head: (80, 240, 255),
            trail: (0, 180, 255),
        },
    }
}

/// Composites an alpha value over the black background by scaling the
/// channels. alpha 255 keeps the color, alpha 0 is black.
pub fn shade(rgb: Rgb, alpha: u8) -> Rgb {
    let a = alpha as u16;
    (
        ((rgb.0 as u16 * a) / 255) as u8,
        ((rgb.1 as u16 * a) / 255) as u8,
        ((rgb.2 as u16 * a) / 255) as u8,
    )
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let r6 = ((r as u16 * 5) + 127) / 255;
    let g6 = ((g as u16 * 5) + 127) / 255;
    let b6 = ((b as u16 * 5) + 127) / 255;

    let cr = CUBE_LEVELS[r6 as usize];
    let cg = CUBE_LEVELS[g6 as usize];
    let cb = CUBE_LEVELS[b6 as usize];
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(r, g, b, cr, cg, cb);

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_idx = if avg < 8 {
        16
    } else if avg > 238 {
        231
    } else {
        232 + ((avg - 8) / 10)
    };
    let (gr, gg, gb) = if gray_idx == 16 {
        (0, 0, 0)
    } else if gray_idx == 231 {
        (255, 255, 255)
    } else {
        let v = 8 + 10 * (gray_idx - 232);
        (v, v, v)
    };
    let gray_dist = dist2(r, g, b, gr, gg, gb);

    if gray_dist < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

fn rgb_to_color16(r: u8, g: u8, b: u8) -> Color {
    const TABLE: [(Color, (u8, u8, u8)); 16] = [
        (Color::Black, (0, 0, 0)),
        (Color::DarkGrey, (128, 128, 128)),
        (Color::Grey, (192, 192, 192)),
        (Color::White, (255, 255, 255)),
        (Color::DarkRed, (128, 0, 0)),
        (Color::Red, (255, 0, 0)),
        (Color::DarkGreen, (0, 128, 0)),
        (Color::Green, (0, 255, 0)),
        (Color::DarkBlue, (0, 0, 128)),
        (Color::Blue, (0, 0, 255)),
        (Color::DarkCyan, (0, 128, 128)),
        (Color::Cyan, (0, 255, 255)),
        (Color::DarkMagenta, (128, 0, 128)),
        (Color::Magenta, (255, 0, 255)),
        (Color::DarkYellow, (128, 128, 0)),
        (Color::Yellow, (255, 255, 0)),
    ];

    let mut best = Color::White;
    let mut best_d = i32::MAX;
    for (c, (cr, cg, cb)) in TABLE {
        let d = dist2(r, g, b, cr, cg, cb);
        if d < best_d {
            best_d = d;
            best = c;
        }
    }
    best
}

/// Maps an RGB value onto what the terminal can actually show. Mono gets no
/// color at all (default foreground).
pub fn to_color(mode: ColorMode, rgb: Rgb) -> Option<Color> {
    let (r, g, b) = rgb;
    match mode {
        ColorMode::Mono => None,
        ColorMode::TrueColor => Some(Color::Rgb { r, g, b }),
        ColorMode::Color256 => Some(Color::AnsiValue(rgb_to_ansi256(r, g, b))),
        ColorMode::Color16 => Some(rgb_to_color16(r, g, b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_full_alpha_is_identity() {
        assert_eq!(shade((0, 180, 255), 255), (0, 180, 255));
    }

    #[test]
    fn shade_zero_alpha_is_black() {
        assert_eq!(shade((180, 255, 180), 0), (0, 0, 0));
    }

    #[test]
    fn shade_is_monotone_per_channel() {
        let mut prev = shade((0, 255, 70), 255);
        for a in (0..255).rev() {
            let cur = shade((0, 255, 70), a);
            assert!(cur.1 <= prev.1);
            assert!(cur.2 <= prev.2);
            prev = cur;
        }
    }

    #[test]
    fn ansi256_maps_extremes_to_cube_corners() {
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
    }

    #[test]
    fn mono_mode_yields_no_color() {
        assert_eq!(to_color(ColorMode::Mono, (1, 2, 3)), None);
    }
}
