//! BoardView: maps a [`GameSnapshot`] into a terminal frame.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{mask_cells, GameSnapshot, PieceSnapshot};
use crate::frame::{Frame, Glyph, Style};
use crate::palette::{self, shades};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, TEMPLATE_SIZE};

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

const PANEL_GAP: u16 = 3;
const MIN_PANEL_WIDTH: u16 = 12;

/// Draws the board, the side panel and the overlays.
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 makes cells roughly square in most terminal fonts.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Top-left terminal position of board cell (0, 0).
    pub fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let panel_w = MIN_PANEL_WIDTH + PANEL_GAP;
        let start_x = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        (start_x + 1, start_y + 1)
    }

    /// Render into a fresh frame.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let mut frame = Frame::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut frame);
        frame
    }

    /// Render into an existing frame, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, frame: &mut Frame) {
        frame.resize(viewport.width, viewport.height);
        frame.fill(Glyph::new(' ', palette::text_style()));

        let (origin_x, origin_y) = self.board_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();
        draw_border(frame, origin_x - 1, origin_y - 1, frame_w, frame_h);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (px, py) = self.cell_position(origin_x, origin_y, x as u16, y as u16);
                match cell {
                    Some(color) => self.draw_block(frame, px, py, *color),
                    None => self.draw_empty(frame, px, py),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost = PieceSnapshot { y: ghost_y, ..active };
            let (_, light) = shades(active.color);
            let style = Style::new(light, palette::BACKGROUND).dim();
            for (x, y) in visible_cells(&ghost) {
                if snap.cell(x as usize, y as usize).is_none() {
                    let (px, py) = self.cell_position(origin_x, origin_y, x, y);
                    frame.fill_rect(px, py, self.cell_w, 1, Glyph::new('░', style));
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in visible_cells(&active) {
                let (px, py) = self.cell_position(origin_x, origin_y, x, y);
                self.draw_block(frame, px, py, active.color);
            }
        }

        let panel_x = origin_x + frame_w + PANEL_GAP - 1;
        self.draw_side_panel(frame, snap, viewport, panel_x, origin_y - 1);

        let (left, top) = (origin_x - 1, origin_y - 1);
        if snap.game_over {
            let lines = ["GAME OVER", "any key: again", "esc: quit"];
            draw_overlay(frame, left, top, frame_w, frame_h, &lines);
        } else if snap.paused {
            let lines = ["PAUSED", "any key: resume"];
            draw_overlay(frame, left, top, frame_w, frame_h, &lines);
        }
    }

    /// Empty board under the start screen shown before the first game.
    pub fn render_title_into(&self, viewport: Viewport, frame: &mut Frame) {
        self.render_into(&GameSnapshot::default(), viewport, frame);
        let (origin_x, origin_y) = self.board_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();
        let lines = ["BLOCKFALL", "", "press any key", "to continue"];
        draw_overlay(frame, origin_x - 1, origin_y - 1, frame_w, frame_h, &lines);
    }

    fn cell_position(&self, origin_x: u16, origin_y: u16, x: u16, y: u16) -> (u16, u16) {
        (origin_x + x * self.cell_w, origin_y + y)
    }

    /// Dark left half, light right half.
    fn draw_block(&self, frame: &mut Frame, px: u16, py: u16, color: u8) {
        let (dark, light) = shades(color);
        frame.put_char(px, py, '█', Style::new(dark, palette::BACKGROUND));
        for dx in 1..self.cell_w {
            frame.put_char(px + dx, py, '█', Style::new(light, palette::BACKGROUND));
        }
    }

    fn draw_empty(&self, frame: &mut Frame, px: u16, py: u16) {
        frame.fill_rect(px, py, self.cell_w, 1, Glyph::new(' ', palette::empty_style()));
    }

    fn draw_side_panel(
        &self,
        frame: &mut Frame,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) {
        if x >= viewport.width || viewport.width - x < MIN_PANEL_WIDTH {
            return;
        }
        let label = palette::text_style().bold();
        let value = palette::text_style();

        frame.put_str(x, y, "SCORE", label);
        frame.put_u32(x, y + 1, snap.score, value);
        frame.put_str(x, y + 3, "DIFFICULTY", label);
        frame.put_u32(x, y + 4, snap.tier, value);
        frame.put_str(x, y + 6, "NEXT", label);

        if let Some(next) = snap.next {
            frame.put_str(x + 5, y + 6, next.kind.as_str(), value);
            for (dx, dy) in mask_cells(next.mask) {
                let px = x + dx as u16 * self.cell_w;
                let py = y + 7 + dy as u16;
                self.draw_block(frame, px, py, next.color);
            }
        }

        let help_y = y + 8 + TEMPLATE_SIZE as u16;
        let help = ["←→ move", "↓ soft drop", "↑ / e rotate", "space drop", "p pause"];
        for (i, line) in help.iter().enumerate() {
            frame.put_str(x, help_y + i as u16, line, value.dim());
        }
    }
}

/// Cells of `piece` that lie on the visible board.
fn visible_cells(piece: &PieceSnapshot) -> impl Iterator<Item = (u16, u16)> + '_ {
    piece.cells().filter_map(|(x, y)| {
        let on_board =
            (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y);
        on_board.then_some((x as u16, y as u16))
    })
}

fn draw_border(frame: &mut Frame, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = palette::border_style();
    frame.put_char(x, y, '┏', style);
    frame.put_char(x + w - 1, y, '┓', style);
    frame.put_char(x, y + h - 1, '┗', style);
    frame.put_char(x + w - 1, y + h - 1, '┛', style);
    for dx in 1..w - 1 {
        frame.put_char(x + dx, y, '━', style);
        frame.put_char(x + dx, y + h - 1, '━', style);
    }
    for dy in 1..h - 1 {
        frame.put_char(x, y + dy, '┃', style);
        frame.put_char(x + w - 1, y + dy, '┃', style);
    }
}

fn draw_overlay(frame: &mut Frame, x: u16, y: u16, w: u16, h: u16, lines: &[&str]) {
    let style = palette::text_style().bold();
    let top = y + h.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let text_w = line.chars().count() as u16;
        let lx = x + w.saturating_sub(text_w) / 2;
        frame.put_str(lx, top + i as u16, line, style);
    }
}
