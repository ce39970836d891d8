//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, entity model and per-tick simulation.
//! It has **zero dependencies** on terminal, audio backends or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical block layouts
//! - **Testable**: Every scoring rule and lifecycle transition is unit tested
//! - **Portable**: Can run behind any frontend (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`block`]: Falling block entity with its reset / despawn lifecycle
//! - [`spawner`]: Initial population and penalty (red) block creation
//! - [`scoring`]: Collision detection and the score/speed transition rules
//! - [`game_state`]: Aggregate state and one simulation tick
//! - [`rng`]: Seeded placement RNG
//! - [`snapshot`]: Render-facing copy of the state
//! - [`audio`]: Audio sink capability
//!
//! # Game Rules
//!
//! - **Black**: +1 score; +1 speed when the new score lands on `score % 3 == 1`
//!   (at most once per tick)
//! - **Gold**: +6 score, +2 speed; respawns between 5000 and 90000 px above the screen
//! - **Red**: -3 score (floored at 0), -1 speed (floored at 1)
//! - Every point gained in a tick spawns one red block
//! - When the score drops below the number of red blocks, the oldest reds stop
//!   respawning and disappear once they leave the screen
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{GameState, NullAudio};
//! use tui_blocks_types::TickInput;
//!
//! let mut game = GameState::new(12345, 0);
//! let outcome = game.tick(&TickInput::pointer(340, 380), &mut NullAudio);
//!
//! assert!(game.speed() >= 1);
//! assert!(game.high_score() >= game.score());
//! assert_eq!(outcome.spawned_red, game.score());
//! ```

pub mod audio;
pub mod block;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spawner;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use audio::{AudioSink, CueLog, NullAudio};
pub use block::{Block, BlockId, ResetOutcome};
pub use game_state::{GameState, TickOutcome};
pub use rng::SpawnRng;
pub use scoring::{apply_hit, find_hits, HitResult};
pub use snapshot::{BlockSnapshot, GameSnapshot};
pub use spawner::Spawner;
