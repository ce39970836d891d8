//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! World pixels map onto terminal cells at a fixed scale of
//! [`CELL_PX_W`] × [`CELL_PX_H`], so the 700×400 screen becomes a 70×20 cell
//! field drawn inside a one-cell border. A 20×15 px block is two cells wide
//! and one row tall.

use crate::core::{BlockSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockKind, BLOCK_HEIGHT, BLOCK_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};

/// World pixels per terminal column.
pub const CELL_PX_W: i32 = 10;
/// World pixels per terminal row.
pub const CELL_PX_H: i32 = 20;

pub const FIELD_COLS: u16 = (SCREEN_WIDTH / CELL_PX_W) as u16;
pub const FIELD_ROWS: u16 = (SCREEN_HEIGHT / CELL_PX_H) as u16;

const BLOCK_COLS: i32 = BLOCK_WIDTH / CELL_PX_W;
// Vertical offset that centers a block inside its row.
const BLOCK_ROW_INSET: i32 = (CELL_PX_H - BLOCK_HEIGHT) / 2;

const PANEL_MIN_WIDTH: u16 = 12;

const FIELD_BG: Rgb = Rgb::new(250, 250, 245);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const SCORE_BLUE: Rgb = Rgb::new(30, 60, 220);
const HIGH_GOLD: Rgb = Rgb::new(212, 170, 30);

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

/// Where the bordered field sits in a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Top-left corner of the border.
    pub frame_x: u16,
    pub frame_y: u16,
}

impl FieldLayout {
    pub const FRAME_W: u16 = FIELD_COLS + 2;
    pub const FRAME_H: u16 = FIELD_ROWS + 2;

    /// Top-left terminal cell of the field interior.
    pub fn origin(&self) -> (u16, u16) {
        (self.frame_x + 1, self.frame_y + 1)
    }
}

/// Field cell (column, row) covered by the block whose top-left is at `(x, y)`.
///
/// The block occupies that cell and the one to its right. Coordinates can be
/// negative or beyond the field for off-screen blocks.
///
/// Rows are 20 px but blocks are 15 px tall, so two blocks that overlap
/// vertically can still land on adjacent rows.
pub fn world_to_cell(x: i32, y: i32) -> (i32, i32) {
    let col = (x + CELL_PX_W / 2).div_euclid(CELL_PX_W);
    let row = (y + BLOCK_HEIGHT / 2).div_euclid(CELL_PX_H);
    (col, row)
}

/// Top-left world position of a block drawn at field cell `(col, row)`.
pub fn cell_to_world(col: i32, row: i32) -> (i32, i32) {
    (col * CELL_PX_W, row * CELL_PX_H + BLOCK_ROW_INSET)
}

/// Keep the player fully on screen.
pub fn clamp_player(x: i32, y: i32) -> (i32, i32) {
    (
        x.clamp(0, SCREEN_WIDTH - BLOCK_WIDTH),
        y.clamp(0, SCREEN_HEIGHT - BLOCK_HEIGHT),
    )
}

/// Move a player position by whole cells.
pub fn nudge(from: (i32, i32), dx: i32, dy: i32) -> (i32, i32) {
    let (col, row) = world_to_cell(from.0, from.1);
    let (x, y) = cell_to_world(col + dx, row + dy);
    clamp_player(x, y)
}

fn block_color(kind: BlockKind) -> Rgb {
    match kind {
        BlockKind::Black => Rgb::new(25, 25, 25),
        BlockKind::Gold => Rgb::new(230, 180, 20),
        BlockKind::Red => Rgb::new(210, 30, 30),
        BlockKind::Player => Rgb::new(40, 170, 60),
    }
}

/// Renders the falling-block field.
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> FieldLayout {
        let frame_x = viewport.width.saturating_sub(FieldLayout::FRAME_W) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(FieldLayout::FRAME_H) / 2,
            AnchorY::Top => 0,
        };
        FieldLayout { frame_x, frame_y }
    }

    /// World position for a pointer at terminal cell `(col, row)`, clamped to
    /// the screen. Positions outside the field snap to its nearest edge.
    pub fn pointer_to_world(&self, viewport: Viewport, col: u16, row: u16) -> (i32, i32) {
        let (ox, oy) = self.layout(viewport).origin();
        let (x, y) = cell_to_world(col as i32 - ox as i32, row as i32 - oy as i32);
        clamp_player(x, y)
    }

    /// Render into an existing framebuffer. This is the allocation-free hot
    /// path: callers reuse one framebuffer across frames.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG).into_cell(' '));

        let layout = self.layout(viewport);
        let (ox, oy) = layout.origin();
        let field = CellStyle::new(Rgb::new(60, 60, 60), FIELD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(ox, oy, FIELD_COLS, FIELD_ROWS, ' ', field);
        draw_border(
            fb,
            layout.frame_x,
            layout.frame_y,
            FieldLayout::FRAME_W,
            FieldLayout::FRAME_H,
            border,
        );

        for block in snap.visible_blocks() {
            draw_block(fb, (ox, oy), block);
        }
        draw_block(fb, (ox, oy), &snap.player);

        // High score above score, both right-aligned in the field corner.
        let right = ox + FIELD_COLS - 2;
        fb.put_u32_right(
            right,
            oy,
            snap.high_score,
            CellStyle::new(HIGH_GOLD, FIELD_BG).bold(),
        );
        fb.put_u32_right(
            right,
            oy + 1,
            snap.score,
            CellStyle::new(SCORE_BLUE, FIELD_BG).bold(),
        );

        self.draw_side_panel(fb, snap, viewport, layout);
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
        layout: FieldLayout,
    ) {
        let panel_x = layout
            .frame_x
            .saturating_add(FieldLayout::FRAME_W)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let hint = CellStyle::new(Rgb::new(120, 120, 120), SCREEN_BG);

        let mut y = layout.frame_y;
        for (name, n, style) in [
            ("SCORE", snap.score, CellStyle::new(SCORE_BLUE, SCREEN_BG)),
            ("HIGH", snap.high_score, CellStyle::new(HIGH_GOLD, SCREEN_BG)),
            ("SPEED", snap.speed, value),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, style);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "mouse  move", hint);
        fb.put_str(panel_x, y + 1, "q/esc  quit", hint);
    }
}

fn draw_block(fb: &mut FrameBuffer, origin: (u16, u16), block: &BlockSnapshot) {
    let (col, row) = world_to_cell(block.x, block.y);
    if row < 0 || row >= FIELD_ROWS as i32 {
        return;
    }
    let c0 = col.max(0);
    let c1 = (col + BLOCK_COLS).min(FIELD_COLS as i32);
    if c0 >= c1 {
        return;
    }

    let style = CellStyle::new(block_color(block.kind), FIELD_BG);
    fb.fill_rect(
        origin.0 + c0 as u16,
        origin.1 + row as u16,
        (c1 - c0) as u16,
        1,
        '█',
        style,
    );
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::Rect;

    const WIDE: Viewport = Viewport {
        width: 100,
        height: 24,
    };

    fn snap_with(blocks: &[(BlockKind, i32, i32)], player: (i32, i32)) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        snap.player.x = player.0;
        snap.player.y = player.1;
        snap.blocks = blocks
            .iter()
            .map(|&(kind, x, y)| BlockSnapshot { kind, x, y })
            .collect();
        snap
    }

    fn field_cell(view: &GameView, fb: &FrameBuffer, col: u16, row: u16) -> (char, Rgb) {
        let (ox, oy) = view.layout(Viewport::new(fb.width(), fb.height())).origin();
        let cell = fb.get(ox + col, oy + row).unwrap();
        (cell.ch, cell.style.fg)
    }

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width()).map(|x| fb.get(x, y).unwrap().ch).collect()
    }

    #[test]
    fn test_field_dimensions() {
        assert_eq!(FIELD_COLS, 70);
        assert_eq!(FIELD_ROWS, 20);
        assert_eq!(BLOCK_COLS, 2);
    }

    #[test]
    fn test_layout_centers_frame() {
        let view = GameView::default();
        let layout = view.layout(WIDE);
        assert_eq!(layout, FieldLayout { frame_x: 14, frame_y: 1 });
        assert_eq!(layout.origin(), (15, 2));

        let top = GameView::new().with_anchor_y(AnchorY::Top).layout(WIDE);
        assert_eq!(top.frame_y, 0);

        let tiny = view.layout(Viewport::new(10, 5));
        assert_eq!(tiny, FieldLayout { frame_x: 0, frame_y: 0 });
    }

    #[test]
    fn test_world_cell_round_trip() {
        for col in 0..FIELD_COLS as i32 - 1 {
            for row in 0..FIELD_ROWS as i32 {
                let (x, y) = cell_to_world(col, row);
                assert_eq!(world_to_cell(x, y), (col, row));
            }
        }
    }

    #[test]
    fn test_world_to_cell_within_one_cell() {
        for x in 0..=SCREEN_WIDTH - BLOCK_WIDTH {
            let (col, _) = world_to_cell(x, 0);
            let (back, _) = cell_to_world(col, 0);
            assert!((back - x).abs() <= CELL_PX_W / 2, "x={x}");
        }
        for y in 0..=SCREEN_HEIGHT - BLOCK_HEIGHT {
            let (_, row) = world_to_cell(0, y);
            let (_, back) = cell_to_world(0, row);
            assert!((back - y).abs() <= CELL_PX_H / 2, "y={y}");
        }
    }

    #[test]
    fn test_overlapping_blocks_may_sit_on_adjacent_rows() {
        let upper = Rect::block(0, 12);
        let lower = Rect::block(0, 22);
        assert!(upper.overlaps(&lower));
        assert_eq!(world_to_cell(0, 12).1, 0);
        assert_eq!(world_to_cell(0, 22).1, 1);
    }

    #[test]
    fn test_pointer_to_world_clamps() {
        let view = GameView::default();
        let (ox, oy) = view.layout(WIDE).origin();

        assert_eq!(view.pointer_to_world(WIDE, ox + 10, oy + 5), (100, 102));
        assert_eq!(view.pointer_to_world(WIDE, 0, 0), (0, 0));
        assert_eq!(view.pointer_to_world(WIDE, 99, 23), (680, 385));
        assert_eq!(view.pointer_to_world(WIDE, ox + 69, oy + 19), (680, 383));
    }

    #[test]
    fn test_nudge() {
        assert_eq!(nudge((100, 102), 1, 0), (110, 102));
        assert_eq!(nudge((100, 102), 0, -1), (100, 82));
        assert_eq!(nudge((100, 107), 0, 0), (100, 102));
        assert_eq!(nudge((0, 0), -3, -3), (0, 0));
        assert_eq!(nudge((680, 385), 5, 5), (680, 385));
    }

    #[test]
    fn test_blocks_drawn_by_kind() {
        let view = GameView::default();
        let snap = snap_with(
            &[
                (BlockKind::Black, 0, 3),
                (BlockKind::Gold, 300, 103),
                (BlockKind::Red, 680, 383),
            ],
            (500, 203),
        );
        let fb = view.render(&snap, WIDE);

        assert_eq!(field_cell(&view, &fb, 0, 0), ('█', block_color(BlockKind::Black)));
        assert_eq!(field_cell(&view, &fb, 1, 0), ('█', block_color(BlockKind::Black)));
        assert_eq!(field_cell(&view, &fb, 30, 5), ('█', block_color(BlockKind::Gold)));
        assert_eq!(field_cell(&view, &fb, 69, 19), ('█', block_color(BlockKind::Red)));
        assert_eq!(field_cell(&view, &fb, 50, 10), ('█', block_color(BlockKind::Player)));
        assert_eq!(field_cell(&view, &fb, 52, 10).0, ' ');
    }

    #[test]
    fn test_offscreen_blocks_not_drawn() {
        let view = GameView::default();
        let snap = snap_with(
            &[
                (BlockKind::Black, 100, -300),
                (BlockKind::Gold, 100, -90_000),
                (BlockKind::Red, 100, 405),
            ],
            (0, 385),
        );
        let fb = view.render(&snap, WIDE);
        let (ox, oy) = view.layout(WIDE).origin();

        // Border rows stay intact.
        assert_eq!(fb.get(ox + 10, oy - 1).unwrap().ch, '─');
        assert_eq!(fb.get(ox + 10, oy + FIELD_ROWS).unwrap().ch, '─');
        for row in 0..FIELD_ROWS {
            assert_eq!(field_cell(&view, &fb, 10, row).0, ' ');
        }
    }

    #[test]
    fn test_partially_visible_block_is_clipped() {
        let view = GameView::default();
        let snap = snap_with(&[(BlockKind::Black, -10, 3)], (300, 300));
        let fb = view.render(&snap, WIDE);
        assert_eq!(field_cell(&view, &fb, 0, 0).0, '█');
        assert_eq!(field_cell(&view, &fb, 1, 0).0, ' ');
        let (ox, oy) = view.layout(WIDE).origin();
        assert_eq!(fb.get(ox - 1, oy).unwrap().ch, '│');
    }

    #[test]
    fn test_scores_in_top_right() {
        let view = GameView::default();
        let mut snap = snap_with(&[], (0, 385));
        snap.score = 12;
        snap.high_score = 345;
        let fb = view.render(&snap, WIDE);
        let (ox, oy) = view.layout(WIDE).origin();
        let right = ox + FIELD_COLS - 2;

        let high = fb.get(right - 3, oy).unwrap();
        assert_eq!(high.ch, '3');
        assert_eq!(high.style.fg, HIGH_GOLD);
        let score = fb.get(right - 2, oy + 1).unwrap();
        assert_eq!(score.ch, '1');
        assert_eq!(score.style.fg, SCORE_BLUE);
        assert!(row_text(&fb, oy).contains("345"));
        assert!(row_text(&fb, oy + 1).contains("12"));
    }

    #[test]
    fn test_side_panel_only_when_wide() {
        let view = GameView::default();
        let mut snap = snap_with(&[], (0, 385));
        snap.speed = 7;

        let fb = view.render(&snap, WIDE);
        let text: String = (0..fb.height()).map(|y| row_text(&fb, y)).collect();
        assert!(text.contains("SCORE"));
        assert!(text.contains("HIGH"));
        assert!(text.contains("SPEED"));

        let narrow = Viewport::new(80, 24);
        let fb = view.render(&snap, narrow);
        let text: String = (0..fb.height()).map(|y| row_text(&fb, y)).collect();
        assert!(!text.contains("SPEED"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let state = GameState::new(5, 10);
        let snap = state.snapshot();
        for (w, h) in [(0, 0), (1, 1), (10, 4), (72, 22)] {
            let fb = view.render(&snap, Viewport::new(w, h));
            assert_eq!((fb.width(), fb.height()), (w, h));
        }
    }

    #[test]
    fn test_render_into_reuses_buffer() {
        let view = GameView::default();
        let snap = GameState::new(5, 0).snapshot();
        let mut fb = FrameBuffer::new(1, 1);
        view.render_into(&snap, WIDE, &mut fb);
        let first = fb.clone();
        view.render_into(&snap, WIDE, &mut fb);
        assert_eq!(fb, first);
    }
}
