//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The camera preset picks how cells are drawn:
//! `Front` uses solid double-width blocks, `Tilted` uses lower half blocks
//! shaded darker toward the top of the well, and `Side` squeezes every cell
//! into a single column.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, ViewAngle, GRID_COLS, GRID_ROWS};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// How one grid cell is drawn under a camera preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLook {
    pub width: u16,
    pub glyph: char,
    /// Shade the top row down to this fraction of 256; bottom row is full color.
    pub depth_shade: u16,
}

impl CellLook {
    pub fn for_view(view: ViewAngle) -> Self {
        match view {
            ViewAngle::Front => Self {
                width: 2,
                glyph: '█',
                depth_shade: 256,
            },
            ViewAngle::Tilted => Self {
                width: 2,
                glyph: '▄',
                depth_shade: 150,
            },
            ViewAngle::Side => Self {
                width: 1,
                glyph: '▐',
                depth_shade: 256,
            },
        }
    }

    fn shade_for_row(&self, row: u16) -> u16 {
        let span = 256 - self.depth_shade;
        self.depth_shade + span * row / (GRID_ROWS as u16 - 1)
    }
}

/// Terminal renderer for the column well and its side panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    anchor_y: AnchorY,
    show_help: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
            show_help: true,
        }
    }
}

/// Top-left corner and size of the bordered well.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    look: CellLook,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    /// Render a snapshot into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let look = CellLook::for_view(snap.view);
        let w = GRID_COLS as u16 * look.width + 2;
        let h = GRID_ROWS as u16 + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
            look,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            w - 2,
            h - 2,
            ' ',
            CellStyle::plain(WELL_BG, WELL_BG),
        );
        draw_border(fb, &frame);

        for row in 0..GRID_ROWS as u16 {
            for col in 0..GRID_COLS as u16 {
                let color = snap.cell(row as usize, col as usize);
                draw_cell(fb, &frame, row, col, color, false);
            }
        }

        if let Some(cells) = snap.active {
            for cell in cells {
                // Cells above the well are not drawn.
                if cell.row >= 0 && cell.col >= 0 {
                    draw_cell(fb, &frame, cell.row as u16, cell.col as u16, cell.color, true);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, &frame);

        if snap.paused {
            draw_overlay_text(fb, &frame, "PAUSED");
        } else if snap.game_over {
            draw_overlay_text(fb, &frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: &Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.display_score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.display_lines, value);
        y += 3;

        fb.put_str(panel_x, y, "SPEED", label);
        match snap.speed {
            Some(speed) => fb.put_u32(panel_x, y + 1, speed as u32, value),
            None => fb.put_str(panel_x, y + 1, "-", value),
        };
        y += 3;

        fb.put_str(panel_x, y, "VIEW", label);
        fb.put_str(panel_x, y + 1, snap.view.as_str(), value);
        y += 3;

        if !self.show_help {
            return;
        }
        let hint = value.dim();
        for line in [
            "<- -> move",
            "down  drop",
            "up    colors",
            "p     pause",
            "h d v view",
            "r     restart",
            "q     quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: &Frame) {
    let style = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
    let (x, y, w, h) = (frame.x, frame.y, frame.w, frame.h);

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

fn draw_cell(fb: &mut FrameBuffer, frame: &Frame, row: u16, col: u16, color: Color, active: bool) {
    if row >= GRID_ROWS as u16 || col >= GRID_COLS as u16 {
        return;
    }
    let look = frame.look;
    let px = frame.x + 1 + col * look.width;
    let py = frame.y + 1 + row;

    if color.is_empty() {
        let dot = CellStyle::plain(Rgb::new(90, 90, 100), WELL_BG).dim();
        fb.fill_rect(px, py, look.width, 1, '·', dot);
        return;
    }

    let fg = Rgb::from(color.rgb()).shade(look.shade_for_row(row));
    let mut style = CellStyle::plain(fg, WELL_BG);
    if active {
        style = style.bold();
    }
    fb.fill_rect(px, py, look.width, 1, look.glyph, style);
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: &Frame, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = frame.x + frame.w.saturating_sub(text_w) / 2;
    let y = frame.y + frame.h / 2;
    let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceCell;

    fn find_text(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        let needle: Vec<char> = needle.chars().collect();
        (0..fb.height()).find_map(|y| {
            let row: Vec<char> = fb.row_text(y).chars().collect();
            row.windows(needle.len())
                .position(|w| w == needle.as_slice())
                .map(|x| (x as u16, y))
        })
    }

    fn text_at(fb: &FrameBuffer, x: u16, y: u16, len: u16) -> String {
        (x..x + len).filter_map(|cx| fb.get(cx, y)).map(|c| c.ch).collect()
    }

    #[test]
    fn side_panel_shows_display_values() {
        let snap = GameSnapshot {
            score: 40,
            lines: 6,
            display_score: 12,
            display_lines: 2,
            ..GameSnapshot::default()
        };
        let fb = GameView::new().render(&snap, Viewport::new(60, 24));

        let (x, y) = find_text(&fb, "SCORE").unwrap();
        assert_eq!(text_at(&fb, x, y + 1, 3), "12 ");
        let (x, y) = find_text(&fb, "LINES").unwrap();
        assert_eq!(text_at(&fb, x, y + 1, 2), "2 ");
        let (x, y) = find_text(&fb, "VIEW").unwrap();
        assert_eq!(text_at(&fb, x, y + 1, 6), "tilted");
    }

    #[test]
    fn active_piece_uses_its_colors() {
        let cells = [
            PieceCell { row: 0, col: 3, color: Color::Red },
            PieceCell { row: 1, col: 3, color: Color::Green },
            PieceCell { row: 2, col: 3, color: Color::Blue },
        ];
        let snap = GameSnapshot {
            active: Some(cells),
            view: ViewAngle::Front,
            ..GameSnapshot::default()
        };
        let view = GameView::new().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, Viewport::new(18, 19));

        // 8 cells of width 2 plus the border fill the whole width.
        let top = fb.get(1 + 3 * 2, 1).unwrap();
        assert_eq!(top.ch, '█');
        assert_eq!(top.style.fg, Rgb::new(255, 0, 0));
        assert!(top.style.bold);
        assert_eq!(fb.get(1 + 3 * 2, 3).unwrap().style.fg, Rgb::new(0, 0, 255));
    }

    #[test]
    fn side_view_is_narrower() {
        let view = GameView::new().with_anchor_y(AnchorY::Top).with_help(false);
        let snap = GameSnapshot {
            view: ViewAngle::Side,
            ..GameSnapshot::default()
        };
        let fb = view.render(&snap, Viewport::new(10, 19));
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(9, 0).unwrap().ch, '┐');
    }

    #[test]
    fn tilted_view_darkens_far_rows() {
        let mut snap = GameSnapshot::default();
        snap.grid[0][0] = Color::White.code();
        snap.grid[16][0] = Color::White.code();
        let view = GameView::new().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, Viewport::new(18, 19));

        let far = fb.get(1, 1).unwrap();
        let near = fb.get(1, 17).unwrap();
        assert_eq!(far.ch, '▄');
        assert!(far.style.fg.r < near.style.fg.r);
        assert_eq!(near.style.fg, Rgb::new(255, 255, 255));
    }

    #[test]
    fn overlays_prefer_paused() {
        let snap = GameSnapshot {
            paused: true,
            game_over: true,
            ..GameSnapshot::default()
        };
        let fb = GameView::new().render(&snap, Viewport::new(60, 24));
        assert!(find_text(&fb, "PAUSED").is_some());
        assert!(find_text(&fb, "GAME OVER").is_none());
    }
}
