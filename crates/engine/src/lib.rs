//! Session engine (frontend-agnostic).
//!
//! Glues the pure game core to the outside world:
//! - [`SessionConfig`]: environment-driven settings
//! - [`Session`]: high score load, fixed-step loop, high score save
//! - [`InputSource`] / [`RenderSink`]: the seams a frontend implements

pub mod config;
pub mod session;

pub use tui_blocks_core as core;
pub use tui_blocks_store as store;

pub use config::SessionConfig;
pub use session::{Flow, InputSource, RenderSink, Session, SessionSummary};
