// Copyright (c) 2026 glyphrain contributors

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::Frame;

/// Raw-mode terminal session plus the last presented frame for diffing.
/// Mouse capture is enabled so a click can end the screensaver.
pub struct Terminal {
    stdout: Stdout,
    bg: Option<Color>,
    last: Option<Frame>,
    run_buf: String,
}

impl Terminal {
    pub fn new(bg: Option<Color>) -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(event::EnableMouseCapture)?;
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            if let Some(bg) = bg {
                out.execute(SetBackgroundColor(bg))?;
            }
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            bg,
            last: None,
            run_buf: String::with_capacity(128),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Presents a frame, emitting only the cells that changed since the last
    /// presented frame. Changed cells within a row are coalesced into runs
    /// sharing one style to keep escape traffic low.
    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let size_changed = self
            .last
            .as_ref()
            .map(|l| l.width != frame.width || l.height != frame.height)
            .unwrap_or(true);

        if size_changed {
            self.stdout.queue(SetAttribute(Attribute::Reset))?;
            if let Some(bg) = self.bg {
                self.stdout.queue(SetBackgroundColor(bg))?;
            }
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
            self.last = Some(Frame::new(frame.width, frame.height));
        }

        let last = self.last.as_mut().expect("set above");
        let width = frame.width as usize;

        let mut cur_fg: Option<Color> = None;
        let mut cur_bold = false;
        let mut styled = false;

        for y in 0..frame.height {
            let row_start = y as usize * width;
            let mut x = 0usize;
            while x < width {
                let idx = row_start + x;
                let cell = frame.cell_at_index(idx);
                if last.cell_at_index(idx) == cell {
                    x += 1;
                    continue;
                }

                // start of a changed run with uniform style
                let fg = cell.fg;
                let bold = cell.bold;
                self.run_buf.clear();
                let run_x = x as u16;
                while x < width {
                    let idx = row_start + x;
                    let c = frame.cell_at_index(idx);
                    if last.cell_at_index(idx) == c || c.fg != fg || c.bold != bold {
                        break;
                    }
                    self.run_buf.push(c.ch);
                    last.set(x as u16, y, c);
                    x += 1;
                }

                self.stdout.queue(cursor::MoveTo(run_x, y))?;
                if !styled || fg != cur_fg {
                    self.stdout
                        .queue(SetForegroundColor(fg.unwrap_or(Color::Reset)))?;
                    cur_fg = fg;
                }
                if !styled || bold != cur_bold {
                    self.stdout.queue(SetAttribute(if bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    }))?;
                    cur_bold = bold;
                }
                styled = true;
                self.stdout.queue(Print(self.run_buf.as_str()))?;
            }
        }

        if styled {
            self.stdout.queue(SetAttribute(Attribute::NormalIntensity))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(event::DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
