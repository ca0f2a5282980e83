//! Renderers: turn a game state into pixels (well, terminal cells).
//!
//! [`Renderer`] is the seam the run loop talks to. [`TerminalRenderer`] flushes
//! frames to a real terminal, diffing against the previous frame so that only
//! changed runs of cells are rewritten. [`OffscreenRenderer`] keeps the last
//! frame in memory for headless runs and tests.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::camera::OrbitCamera;
use crate::core::GameState;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport};

/// Rendering backend used by the run loop
pub trait Renderer {
    /// Called once before the first frame
    fn initialize(&mut self, _state: &GameState) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, state: &GameState, camera: &OrbitCamera) -> Result<()>;

    /// Output size in terminal cells
    fn set_framebuffer_size(&mut self, width: u16, height: u16);
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    view: GameView,
    viewport: Viewport,
    frame: FrameBuffer,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalRenderer {
    pub fn new(view: GameView) -> Self {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        Self {
            stdout: io::stdout(),
            view,
            viewport: Viewport::new(w, h),
            frame: FrameBuffer::new(w, h),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    /// Switch the terminal to raw mode on the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    /// Restore the terminal. Safe to call when `enter` never ran.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// The renderer diffs against the previous frame and then swaps buffers so
    /// the caller can reuse the old one without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let mut prev = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(0, 0));
        let needs_full = prev.width() != fb.width() || prev.height() != fb.height();

        self.buf.clear();
        if needs_full {
            encode_full_into(fb, &mut self.buf)?;
            prev.resize(fb.width(), fb.height());
        } else {
            encode_diff_into(&prev, fb, &mut self.buf)?;
        }
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn initialize(&mut self, state: &GameState) -> Result<()> {
        let board = state.board();
        log::info!(
            "terminal renderer {}x{} for a {}x{}x{} board",
            self.viewport.width,
            self.viewport.height,
            board.width(),
            board.depth(),
            board.height()
        );
        self.invalidate();
        Ok(())
    }

    fn render(&mut self, state: &GameState, camera: &OrbitCamera) -> Result<()> {
        let mut frame = std::mem::replace(&mut self.frame, FrameBuffer::new(0, 0));
        self.view
            .render_into(state, camera.forward(), self.viewport, &mut frame);
        let result = self.draw_swap(&mut frame);
        self.frame = frame;
        result
    }

    fn set_framebuffer_size(&mut self, width: u16, height: u16) {
        if self.viewport != Viewport::new(width, height) {
            log::debug!("terminal resized to {width}x{height}");
            self.viewport = Viewport::new(width, height);
            self.invalidate();
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Renders into memory; the last frame stays readable
pub struct OffscreenRenderer {
    view: GameView,
    viewport: Viewport,
    frame: FrameBuffer,
    frames: u64,
}

impl OffscreenRenderer {
    pub fn new(view: GameView, width: u16, height: u16) -> Self {
        Self {
            view,
            viewport: Viewport::new(width, height),
            frame: FrameBuffer::new(width, height),
            frames: 0,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Renderer for OffscreenRenderer {
    fn render(&mut self, state: &GameState, camera: &OrbitCamera) -> Result<()> {
        self.view
            .render_into(state, camera.forward(), self.viewport, &mut self.frame);
        self.frames += 1;
        Ok(())
    }

    fn set_framebuffer_size(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current_style: Option<CellStyle> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
