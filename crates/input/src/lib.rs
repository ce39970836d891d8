//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` mouse and key events into [`InputEvent`]s in terminal cell
//! coordinates and drains them once per tick. Converting cells to world
//! pixels is the view's job, since only it knows the layout.

pub mod map;
pub mod pump;

pub use tui_blocks_types as types;

pub use map::{handle_key_event, handle_mouse_event, map_event, should_quit, InputEvent};
pub use pump::{push_event, BatchSummary, EventBatch, EventPump, MAX_EVENTS_PER_TICK};
