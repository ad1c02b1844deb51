//! GameView: maps a [`MatchSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: player one's panel, the shared grid, player two's
//! panel. Each panel sits on the side its player's pieces enter from.

use crate::core::shapes::{bounds, spawn_blocks};
use crate::core::MatchSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{MatchPhase, PlayerId, ShapeKind};

/// Player one's color.
pub const P1_COLOR: Rgb = Rgb::hex(0x3498db);
/// Player two's color.
pub const P2_COLOR: Rgb = Rgb::hex(0xe74c3c);

const PLAY_BG: Rgb = Rgb::hex(0x1e1e28);
const PANEL_W: u16 = 12;
const PANEL_GAP: u16 = 2;

pub fn player_color(player: PlayerId) -> Rgb {
    match player {
        PlayerId::One => P1_COLOR,
        PlayerId::Two => P2_COLOR,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the duel.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
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

    /// Terminal size needed to show the grid and both panels.
    pub fn preferred_size(&self, snap: &MatchSnapshot) -> Viewport {
        let frame_w = snap.width as u16 * self.cell_w + 2;
        let frame_h = snap.height as u16 * self.cell_h + 2;
        Viewport::new(frame_w + 2 * (PANEL_W + PANEL_GAP), frame_h)
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(&self, snap: &MatchSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let w = snap.width as u16 * self.cell_w;
        let h = snap.height as u16 * self.cell_h;
        let frame = Rect::new(
            viewport.width.saturating_sub(w + 2) / 2,
            match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h + 2) / 2,
                AnchorY::Top => 0,
            },
            w + 2,
            h + 2,
        );

        fb.fill(frame.inner(), ' ', CellStyle::fg(Rgb::new(80, 80, 90)).on(PLAY_BG));
        fb.draw_box(frame, CellStyle::fg(Rgb::new(200, 200, 200)));

        for y in 0..snap.height as i8 {
            for x in 0..snap.width as i8 {
                match PlayerId::from_token(snap.token(x, y)) {
                    Some(owner) => self.draw_block(fb, frame, x, y, owner, false),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        for piece in snap.pieces.iter().flatten() {
            for &(x, y) in &piece.blocks {
                if x >= 0 && y >= 0 && (x as u8) < snap.width && (y as u8) < snap.height {
                    self.draw_block(fb, frame, x, y, piece.owner, true);
                }
            }
        }

        self.draw_panels(fb, snap, viewport, frame);

        match snap.phase {
            MatchPhase::Paused => self.draw_overlay(fb, frame, &["PAUSED", "P TO RESUME"]),
            MatchPhase::GameOver => {
                let banner = match snap.winner {
                    Some(PlayerId::One) => "P1 WINS",
                    Some(PlayerId::Two) => "P2 WINS",
                    None => "GAME OVER",
                };
                self.draw_overlay(fb, frame, &[banner, "R TO RESTART"]);
            }
            MatchPhase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &MatchSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, f: Rect, x: i8, y: i8) {
        let style = CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAY_BG).dimmed();
        fb.fill(self.cell_rect(f, x, y), '·', style);
    }

    /// Locked blocks are drawn solid; active blocks bold.
    fn draw_block(&self, fb: &mut FrameBuffer, f: Rect, x: i8, y: i8, owner: PlayerId, active: bool) {
        let mut style = CellStyle::fg(player_color(owner)).on(PLAY_BG);
        if active {
            style = style.bolded();
        }
        let ch = if active { '▓' } else { '█' };
        fb.fill(self.cell_rect(f, x, y), ch, style);
    }

    /// Screen area of grid cell (x, y) inside the frame.
    fn cell_rect(&self, f: Rect, x: i8, y: i8) -> Rect {
        let inner = f.inner();
        Rect::new(
            inner.x + x as u16 * self.cell_w,
            inner.y + y as u16 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    fn draw_panels(&self, fb: &mut FrameBuffer, snap: &MatchSnapshot, viewport: Viewport, f: Rect) {
        if let Some(left) = f.x.checked_sub(PANEL_GAP + PANEL_W) {
            self.draw_player_panel(fb, snap, PlayerId::One, left, f.y);
        }
        let right = f.right().saturating_add(PANEL_GAP);
        if right.saturating_add(PANEL_W) <= viewport.width {
            self.draw_player_panel(fb, snap, PlayerId::Two, right, f.y);
        }
    }

    fn draw_player_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &MatchSnapshot,
        player: PlayerId,
        x: u16,
        top: u16,
    ) {
        let title = CellStyle::fg(player_color(player)).bolded();
        let label = CellStyle::default().bolded();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = top;
        let n = fb.put_str(x, y, player.label(), title);
        if snap.winner == Some(player) {
            fb.put_str(x + n + 1, y, "WINNER", label);
        }
        y = y.saturating_add(2);

        fb.put_str(x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(x, y, snap.score(player), value);
        y = y.saturating_add(2);

        fb.put_str(x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, snap.next_shape(player), player, x, y);
        y = y.saturating_add(3);

        // Shared match info under player one's panel only.
        if player == PlayerId::One {
            fb.put_str(x, y, "SPEED", label);
            y = y.saturating_add(1);
            let digits = fb.put_u32(x, y, snap.interval_ms, value);
            fb.put_str(x + digits, y, "ms", value);
            y = y.saturating_add(2);

            fb.put_str(x, y, "ROUND", label);
            y = y.saturating_add(1);
            fb.put_u32(x, y, snap.round + 1, value);
        }
    }

    /// Mini drawing of a shape in its spawn orientation, two columns per block.
    fn draw_preview(&self, fb: &mut FrameBuffer, shape: ShapeKind, player: PlayerId, x: u16, y: u16) {
        let blocks = spawn_blocks(shape);
        let (min_x, _, min_y, _) = bounds(&blocks);
        let style = CellStyle::fg(player_color(player));
        for (dx, dy) in blocks {
            let px = x + 2 * (dx - min_x) as u16;
            let py = y + (dy - min_y) as u16;
            fb.put_str(px, py, "██", style);
        }
        fb.put_str(x + 9, y, shape.as_str(), CellStyle::default().dimmed());
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, f: Rect, lines: &[&str]) {
        let style = CellStyle::fg(Rgb::hex(0xffffff)).bolded();
        let mid_y = f.y.saturating_add(f.h / 2);
        let first_y = mid_y.saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            fb.put_centered(f, first_y + i as u16, text, style);
        }
    }
}
