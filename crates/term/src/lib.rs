//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and instead renders into a framebuffer that is
//! diffed and flushed to the terminal.
//!
//! - [`GameView`]: snapshot to framebuffer, plus the cell/world mapping used
//!   for mouse input
//! - [`TerminalRenderer`]: raw mode, mouse capture, diff flushing
//! - [`BellAudio`]: hit cues as terminal bells

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use bell::BellAudio;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{
    cell_to_world, clamp_player, nudge, world_to_cell, AnchorY, FieldLayout, GameView, Viewport,
    CELL_PX_H, CELL_PX_W, FIELD_COLS, FIELD_ROWS,
};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
