//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{get_shape, shape_matrix, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

pub const TITLE: &str = "MR. TET";

const BACKDROP: Rgb = Rgb::from_hex(0x0d0d2b);
const GRID: Rgb = Rgb::from_hex(0x2a2a5a);
const BORDER: Rgb = Rgb::from_hex(0x4444aa);
const LABEL: Rgb = Rgb::from_hex(0x8888ff);
const TEXT: Rgb = Rgb::new(220, 220, 235);
const SCREEN: Rgb = Rgb::new(0, 0, 0);

/// Neon color of a piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::from_hex(0x00ffff),
        PieceKind::O => Rgb::from_hex(0xffff00),
        PieceKind::T => Rgb::from_hex(0xff00ff),
        PieceKind::S => Rgb::from_hex(0x00ff88),
        PieceKind::Z => Rgb::from_hex(0xff0044),
        PieceKind::J => Rgb::from_hex(0x4444ff),
        PieceKind::L => Rgb::from_hex(0xff8800),
    }
}

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

/// Data shown next to the playfield that the engine does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    /// Best recorded score, if any.
    pub best: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the playfield frame landed in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Renders the playfield, HUD panel and state overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, SCREEN).cell(' '));

        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        self.draw_border(fb, frame);
        self.draw_cells(fb, frame, snap);
        self.draw_panel(fb, frame, snap, hud, viewport);

        match snap.state {
            SessionState::Idle => match hud.best {
                Some(best) => {
                    self.draw_overlay(fb, frame, &[TITLE, "BEST", "press ENTER"], Some((1, best)))
                }
                None => self.draw_overlay(fb, frame, &[TITLE, "press ENTER"], None),
            },
            SessionState::Paused => {
                self.draw_overlay(fb, frame, &["PAUSED", "press P"], None);
            }
            SessionState::GameOver => {
                self.draw_overlay(
                    fb,
                    frame,
                    &["GAME OVER", "SCORE", "press ENTER"],
                    Some((1, snap.score)),
                );
            }
            SessionState::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = CellStyle::new(BORDER, SCREEN).bold();
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

        fb.put_char(f.x, f.y, '╔', style);
        fb.put_char(right, f.y, '╗', style);
        fb.put_char(f.x, bottom, '╚', style);
        fb.put_char(right, bottom, '╝', style);
        for x in f.x + 1..right {
            fb.put_char(x, f.y, '═', style);
            fb.put_char(x, bottom, '═', style);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '║', style);
            fb.put_char(right, y, '║', style);
        }
    }

    fn draw_cells(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot) {
        let grid = CellStyle::new(GRID, BACKDROP).dim();
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                match PieceKind::from_id(id) {
                    Some(kind) => self.fill_cell(fb, f, x as i8, y as i8, '█', block_style(kind)),
                    None => self.fill_cell(fb, f, x as i8, y as i8, '·', grid),
                }
            }
        }

        let Some(active) = snap.active else {
            return;
        };
        let shape = get_shape(active.kind, active.rotation);

        if let Some(ghost_y) = snap.ghost_y {
            let ghost = CellStyle::new(piece_color(active.kind).darken(110), BACKDROP);
            for &(dx, dy) in shape.iter() {
                self.fill_cell(fb, f, active.x + dx, ghost_y + dy, '░', ghost);
            }
        }
        for &(dx, dy) in shape.iter() {
            self.fill_cell(fb, f, active.x + dx, active.y + dy, '█', block_style(active.kind));
        }
    }

    /// Fill one board cell; cells off the board (e.g. above row 0) are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = f.x + 1 + x as u16 * self.cell_w;
        let py = f.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot, hud: &Hud, viewport: Viewport) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::new(LABEL, SCREEN).bold();
        let value = CellStyle::new(TEXT, SCREEN);

        let mut y = f.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        let matrix = shape_matrix(snap.next, crate::types::Rotation::North);
        let style = block_style(snap.next);
        for (row, cells) in matrix.rows().enumerate() {
            for (col, &filled) in cells.iter().enumerate() {
                if filled {
                    let cx = panel_x + col as u16 * self.cell_w;
                    fb.fill_rect(cx, y + row as u16, self.cell_w, 1, '█', style);
                }
            }
        }
        y += matrix.size() as u16 + 1;

        fb.put_str(panel_x, y, "BEST", label);
        match hud.best {
            Some(best) => fb.put_u32(panel_x, y + 1, best, value),
            None => fb.put_str(panel_x, y + 1, "-", value.dim()),
        };
    }

    /// Centered text block over the playfield. `number` puts a value on the
    /// given line, after its text.
    fn draw_overlay(&self, fb: &mut FrameBuffer, f: Frame, lines: &[&str], number: Option<(usize, u32)>) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), BACKDROP).bold();
        let hint = CellStyle::new(TEXT, BACKDROP).dim();

        let top = (f.y + f.h / 2).saturating_sub(lines.len() as u16 / 2);
        let inner_x = f.x + 1;
        let inner_w = f.w.saturating_sub(2);
        fb.fill_rect(inner_x, top, inner_w, lines.len() as u16, ' ', style);

        for (i, text) in lines.iter().enumerate() {
            let y = top + i as u16;
            let line_style = if i + 1 == lines.len() && lines.len() > 1 { hint } else { style };
            match number {
                Some((line, n)) if line == i => {
                    let digits = count_digits(n);
                    let gap = u16::from(!text.is_empty());
                    let len = text.chars().count() as u16 + gap + digits;
                    let x = inner_x + inner_w.saturating_sub(len) / 2;
                    let cx = fb.put_str(x, y, text, line_style) + gap;
                    fb.put_u32(cx, y, n, line_style);
                }
                _ => fb.put_str_centered(inner_x, inner_w, y, text, line_style),
            }
        }
    }
}

fn block_style(kind: PieceKind) -> CellStyle {
    CellStyle::new(piece_color(kind), BACKDROP).bold()
}

fn count_digits(mut n: u32) -> u16 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits() {
        assert_eq!(count_digits(0), 1);
        assert_eq!(count_digits(9), 1);
        assert_eq!(count_digits(10), 2);
        assert_eq!(count_digits(u32::MAX), 10);
    }

    #[test]
    fn every_kind_has_a_distinct_color() {
        let colors: Vec<_> = PieceKind::ALL.iter().map(|&k| piece_color(k)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
