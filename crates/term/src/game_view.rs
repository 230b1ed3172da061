//! GameView: maps a `GameSnapshot` plus front-end marks into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{DestinationList, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, GameStatus, Jump, Position, BOARD_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the front end draws on top of the board itself.
#[derive(Debug, Clone, Default)]
pub struct ViewState<'a> {
    pub layout_name: &'a str,
    pub layout_index: usize,
    pub layout_count: usize,
    pub cursor: Position,
    pub selected: Option<Position>,
    /// Highlighted destinations for the selected peg.
    pub targets: DestinationList,
    /// A jump accepted but not yet applied to the board.
    pub pending: Option<Jump>,
    pub hints: bool,
    pub elapsed_secs: u64,
}

/// A lightweight terminal renderer for the peg board.
pub struct GameView {
    /// Board cell width in terminal columns (3 or more shows the cursor brackets).
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

const BOARD_BG: Rgb = Rgb::new(40, 28, 20);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const PEG: CellStyle = CellStyle::new(Rgb::new(235, 180, 90), BOARD_BG).bold();
const HOLE: CellStyle = CellStyle::new(Rgb::new(130, 110, 95), BOARD_BG).dim();
const SELECTED: CellStyle = CellStyle::new(Rgb::new(120, 230, 120), BOARD_BG).bold();
const TARGET: CellStyle = CellStyle::new(Rgb::new(90, 200, 230), BOARD_BG).bold();
const LEAVING: CellStyle = CellStyle::new(Rgb::new(220, 90, 80), BOARD_BG).bold();
const CURSOR: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), BOARD_BG).bold();
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

const GLYPH_PEG: char = '●';
const GLYPH_HOLE: char = '○';
const GLYPH_TARGET: char = '◎';

impl Default for GameView {
    fn default() -> Self {
        // 3x1 leaves room for cursor brackets and roughly squares the grid.
        Self {
            cell_w: 3,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        view: &ViewState<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let n = BOARD_SIZE as u16;
        let board_px_w = n * self.cell_w;
        let board_px_h = n * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, BORDER);

        let playing = snap.status == GameStatus::Playing;
        for row in 0..BOARD_SIZE as usize {
            for col in 0..BOARD_SIZE as usize {
                let pos = Position::new(row as i8, col as i8);
                let (glyph, style) = match snap.cell(row, col) {
                    Cell::Invalid => continue,
                    Cell::Occupied => (GLYPH_PEG, self.peg_style(view, pos)),
                    Cell::Empty => {
                        let is_target = view.hints && view.targets.contains(&pos);
                        let is_landing = view.pending.is_some_and(|j| j.to == pos);
                        if is_target || is_landing {
                            (GLYPH_TARGET, TARGET)
                        } else {
                            (GLYPH_HOLE, HOLE)
                        }
                    }
                };
                self.draw_cell(fb, start_x, start_y, row as u16, col as u16, glyph, style);
            }
        }

        if playing && view.cursor.in_bounds() {
            self.draw_cursor(fb, start_x, start_y, view.cursor);
        }

        self.draw_side_panel(fb, snap, view, viewport, start_x + frame_w + 2, start_y);

        match snap.status {
            GameStatus::Won => self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "SOLVED!"),
            GameStatus::Lost => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "NO MOVES LEFT")
            }
            GameStatus::Idle => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "R TO DEAL")
            }
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, view: &ViewState<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, view, viewport, &mut fb);
        fb
    }

    fn peg_style(&self, view: &ViewState<'_>, pos: Position) -> CellStyle {
        if let Some(jump) = view.pending {
            if jump.from == pos || jump.mid() == pos {
                return LEAVING;
            }
        }
        if view.selected == Some(pos) {
            SELECTED
        } else {
            PEG
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Top-left terminal cell of board cell `(row, col)`.
    fn cell_origin(&self, start_x: u16, start_y: u16, row: u16, col: u16) -> (u16, u16) {
        (
            start_x + 1 + col * self.cell_w,
            start_y + 1 + row * self.cell_h,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        glyph: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, row, col);
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, glyph, style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, cursor: Position) {
        if self.cell_w < 3 {
            return;
        }
        let (px, py) = self.cell_origin(start_x, start_y, cursor.row as u16, cursor.col as u16);
        let mid_x = px + self.cell_w / 2;
        let y = py + self.cell_h / 2;
        fb.put_char(mid_x - 1, y, '[', CURSOR);
        fb.put_char(mid_x + 1, y, ']', CURSOR);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        view: &ViewState<'_>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let value_x = panel_x + 8;
        let mut y = start_y;
        fb.put_str(panel_x, y, view.layout_name, LABEL);
        y = y.saturating_add(1);
        if view.layout_count > 1 {
            let dim = VALUE.dim();
            let cx = fb.put_u32(panel_x, y, (view.layout_index + 1) as u32, dim);
            fb.put_char(cx, y, '/', dim);
            fb.put_u32(cx.saturating_add(1), y, view.layout_count as u32, dim);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PEGS", LABEL);
        fb.put_u32(value_x, y, snap.pegs, VALUE);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "JUMPS", LABEL);
        fb.put_u32(value_x, y, snap.jumps, VALUE);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "TIME", LABEL);
        fb.put_clock(value_x, y, view.elapsed_secs, VALUE);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "MOVES", LABEL);
        if view.hints {
            fb.put_u32(value_x, y, snap.legal_moves, VALUE);
        } else {
            fb.put_char(value_x, y, '-', VALUE);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "STATUS", LABEL);
        fb.put_str(value_x, y, status_label(snap.status), VALUE);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Width reserved to the right of the board for the side panel.
const PANEL_W: u16 = 18;

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle => "IDLE",
        GameStatus::Playing => "PLAYING",
        GameStatus::Won => "WON",
        GameStatus::Lost => "LOST",
    }
}
