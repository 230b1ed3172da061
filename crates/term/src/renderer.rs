//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; after that only changed runs of cells are written. Runs
//! separated by at most [`MERGE_GAP`] unchanged cells are merged into one.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Unchanged cells tolerated inside one run before it is split.
const MERGE_GAP: u16 = 2;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
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

    /// Force the next draw to be a full redraw (terminal resized or scribbled on).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb` and keep it as the diff base for the next frame.
    ///
    /// The previous frame is swapped back into `fb`; the caller must fully
    /// redraw it before the next call.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if same_size(&prev, fb) => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            Some(mut prev) => {
                encode_full_into(fb, &mut self.buf)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Queues glyphs into a byte buffer, emitting style changes only when needed.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn paint(&mut self, cell: Cell) -> Result<()> {
        let prev = self.style.replace(cell.style);
        let next = cell.style;
        let attrs_changed = prev.map_or(true, |p| p.bold != next.bold || p.dim != next.dim);

        // An attribute reset also drops colours, so they must follow it.
        if attrs_changed {
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if next.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if next.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(next.fg) {
            self.out.queue(SetForegroundColor(rgb_to_color(next.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(next.bg) {
            self.out.queue(SetBackgroundColor(rgb_to_color(next.bg)))?;
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            self.out.queue(ResetColor)?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        painter.move_to(0, y)?;
        for x in 0..fb.width() {
            painter.paint(fb.get(x, y).unwrap_or_default())?;
        }
    }
    painter.finish()
}

/// Encode only the cells that differ between `prev` and `next` into `out`.
///
/// Frames of different sizes are redrawn row by row.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    for run in changed_runs(prev, next) {
        painter.move_to(run.x, run.y)?;
        for x in run.x..run.x + run.len {
            painter.paint(next.get(x, run.y).unwrap_or_default())?;
        }
    }
    painter.finish()
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Horizontal span of cells to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let w = next.width();
    if !same_size(prev, next) {
        return (0..next.height()).map(|y| Run { x: 0, y, len: w }).collect();
    }
    if w == 0 {
        return Vec::new();
    }

    let mut runs = Vec::new();
    let rows = prev.cells().chunks(w as usize).zip(next.cells().chunks(w as usize));
    for (y, (old, new)) in rows.enumerate() {
        let y = y as u16;
        let mut open: Option<Run> = None;
        for (x, (a, b)) in old.iter().zip(new).enumerate() {
            if a == b {
                continue;
            }
            let x = x as u16;
            match open.as_mut() {
                Some(run) if x - (run.x + run.len) <= MERGE_GAP => run.len = x - run.x + 1,
                _ => {
                    if let Some(done) = open.take() {
                        runs.push(done);
                    }
                    open = Some(Run { x, y, len: 1 });
                }
            }
        }
        runs.extend(open);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::Command;

    fn peg() -> Cell {
        CellStyle::default().bold().cell('●')
    }

    fn runs(a: &FrameBuffer, b: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        changed_runs(a, b).iter().map(|r| (r.x, r.y, r.len)).collect()
    }

    #[test]
    fn test_full_redraw_contains_every_glyph() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.set(0, 0, peg());
        fb.set(1, 0, CellStyle::default().cell('○'));
        fb.set(2, 1, peg());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches('●').count(), 2);
        assert_eq!(text.matches('○').count(), 1);
    }

    #[test]
    fn test_identical_frames_encode_nothing() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "PEGS", CellStyle::default());

        let mut out = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_diff_prints_only_changed_cells() {
        let a = FrameBuffer::new(6, 1);
        let mut b = a.clone();
        b.set(4, 0, peg());

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches('●').count(), 1);
        assert_eq!(text.matches(' ').count(), 0);
    }

    #[test]
    fn test_style_is_not_repeated_for_same_style_cells() {
        let mut fb = FrameBuffer::new(3, 1);
        for x in 0..3 {
            fb.set(x, 0, peg());
        }
        let mut out = Vec::new();
        encode_diff_into(&FrameBuffer::new(3, 1), &fb, &mut out).unwrap();

        let mut single = String::new();
        SetForegroundColor(rgb_to_color(peg().style.fg))
            .write_ansi(&mut single)
            .unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches(single.as_str()).count(), 1);
    }

    #[test]
    fn test_adjacent_changes_coalesce_into_one_run() {
        let a = FrameBuffer::new(5, 1);
        let mut b = a.clone();
        for x in 1..=3 {
            b.set(x, 0, peg());
        }
        assert_eq!(runs(&a, &b), vec![(1, 0, 3)]);
    }

    #[test]
    fn test_short_gaps_merge_and_long_gaps_split() {
        let a = FrameBuffer::new(12, 1);
        let mut b = a.clone();
        // gap of 2 between 0 and 3 merges, gap of 5 between 3 and 9 splits
        for x in [0, 3, 9] {
            b.set(x, 0, peg());
        }
        assert_eq!(runs(&a, &b), vec![(0, 0, 4), (9, 0, 1)]);
    }

    #[test]
    fn test_runs_do_not_cross_rows() {
        let a = FrameBuffer::new(3, 2);
        let mut b = a.clone();
        b.set(2, 0, peg());
        b.set(0, 1, peg());
        assert_eq!(runs(&a, &b), vec![(2, 0, 1), (0, 1, 1)]);
    }

    #[test]
    fn test_size_change_repaints_every_row() {
        let a = FrameBuffer::new(3, 2);
        let b = FrameBuffer::new(4, 3);
        assert_eq!(runs(&a, &b), vec![(0, 0, 4), (0, 1, 4), (0, 2, 4)]);
    }
}
