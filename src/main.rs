// Copyright (c) 2026 glyphrain contributors

mod cell;
mod column;
mod config;
mod frame;
mod grid;
mod painter;
mod palette;
mod symbol;
mod terminal;
mod watermark;

use std::env;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyEventKind, MouseEventKind};
use crossterm::style::Color;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{
    build_glyphs, require_f32_range, require_f64_range, require_u16_range, Args,
};
use crate::frame::Frame;
use crate::grid::{Grid, GridConfig};
use crate::painter::Painter;
use crate::palette::{build_theme, ColorMode};
use crate::terminal::{restore_terminal_best_effort, Terminal};
use crate::watermark::Watermark;

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    if term.contains("256color") {
        return ColorMode::Color256;
    }

    ColorMode::Color16
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 => ColorMode::Color256,
            16 => ColorMode::Color16,
            24 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8,16,24)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

fn background_for(mode: ColorMode) -> Option<Color> {
    match mode {
        ColorMode::Mono => None,
        ColorMode::TrueColor => Some(Color::Rgb { r: 0, g: 0, b: 0 }),
        ColorMode::Color16 => Some(Color::Black),
        ColorMode::Color256 => Some(Color::AnsiValue(16)),
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let cmd = Args::command().styles(clap_styles());
    let args = Args::from_arg_matches(&cmd.get_matches()).unwrap_or_else(|e| e.exit());

    let target_fps = require_f64_range("--fps", args.fps, 1.0, 240.0);
    let rain_speed = require_f32_range("--rain-speed", args.rain_speed, 0.1, 100.0);
    let rows = require_u16_range("--rows", args.rows, 1, 16);
    let min_font = require_u16_range("--min-font", args.min_font, 4, 72);
    let max_font = require_u16_range("--max-font", args.max_font, 4, 72);
    if min_font > max_font {
        eprintln!(
            "failed to apply --min-font {} (must not exceed --max-font {})",
            min_font, max_font
        );
        std::process::exit(1);
    }

    let glyphs = build_glyphs(args.glyph_range);
    if glyphs.is_empty() {
        eprintln!(
            "glyph range {:X}-{:X} contains no valid characters",
            args.glyph_range.low, args.glyph_range.high
        );
        std::process::exit(1);
    }

    let color_mode = detect_color_mode(&args);
    let theme = build_theme(args.color);

    let mut watermark = match &args.watermark {
        Some(path) => match Watermark::from_path(path, args.watermark_bounce) {
            Ok(wm) if !wm.is_empty() => Some(wm),
            Ok(_) => None,
            Err(e) => {
                eprintln!("failed to load watermark {}: {}", path.display(), e);
                None
            }
        },
        None => None,
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut term = Terminal::new(background_for(color_mode))?;
    let (mut cols, mut lines) = term.size()?;

    // One terminal cell spans max_font virtual pixels in each direction, so
    // the nearest depth layer lands roughly one glyph per cell.
    let cell_px = max_font as f32;

    let grid_cfg = GridConfig {
        rows,
        min_font,
        max_font,
        rain_speed,
        allow_midway: !args.no_midway,
        initial_active_pct: 0.3,
    };
    let mut grid = Grid::new(
        grid_cfg,
        cols as f32 * cell_px,
        lines as f32 * cell_px,
        glyphs,
        rng,
    );
    let mut frame = Frame::new(cols, lines);
    if let Some(wm) = watermark.as_mut() {
        wm.place(cols, lines);
    }

    let target_period = Duration::from_secs_f64(1.0 / target_fps);
    let mut next_frame = Instant::now();
    let mut running = true;

    while running {
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                match Terminal::read_event()? {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        running = false;
                    }
                    Event::Mouse(m) if matches!(m.kind, MouseEventKind::Down(_)) => {
                        running = false;
                    }
                    _ => {}
                }
            }

            if !running || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if now >= next_frame {
                break;
            }
            let _ = Terminal::poll_event(next_frame - now)?;
        }

        if !running {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            cols = nw;
            lines = nh;
            grid.rebuild(cols as f32 * cell_px, lines as f32 * cell_px);
            frame = Frame::new(cols, lines);
            if let Some(wm) = watermark.as_mut() {
                wm.place(cols, lines);
            }
        }

        frame.clear();
        if let Some(wm) = watermark.as_mut() {
            wm.tick(cols, lines);
            wm.draw(&mut frame, color_mode, theme.trail);
        }

        grid.update();
        let mut painter = Painter::new(&mut frame, cell_px, color_mode);
        grid.draw(&mut painter, &theme, args.debug);

        term.draw(&frame)?;

        next_frame += target_period;
        let now = Instant::now();
        if now > next_frame {
            next_frame = now;
        }
    }

    Ok(())
}
