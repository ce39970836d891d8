//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, tests).
//!
//! # Screen Geometry
//!
//! The game world is measured in pixels, independent of how it is displayed:
//!
//! - **Width**: 700 px
//! - **Height**: 400 px
//! - **Block size**: 20 x 15 px (player and falling blocks alike)
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCORE_FROM_BLACK_BLOCK` | 1 | Score for touching a black block |
//! | `SPEED_FROM_BLACK_BLOCK` | 1 | Speed bonus on a black hit landing on `score % 3 == 1` |
//! | `SCORE_FROM_GOLD_BLOCK` | 6 | Score for touching the gold block |
//! | `SPEED_FROM_GOLD_BLOCK` | 2 | Speed gained from the gold block |
//! | `PENALTY_SCORE_RED_BLOCK` | 3 | Score lost on a red hit (floored at 0) |
//! | `PENALTY_SPEED_RED_BLOCK` | 1 | Speed lost on a red hit (floored at 1) |
//!
//! # Spawn Bands
//!
//! Vertical ranges are half-open `[lo, hi)` and lie above the visible screen:
//!
//! | Band | Range |
//! |------|-------|
//! | Initial black | `[-75, 0)` |
//! | Initial gold | `[-2500, -220)` |
//! | Penalty red | `[-500, -25)` |
//! | Respawn | `[-300, -20)` |
//! | Gold respawn | `[-90000, -5000)` |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{BlockKind, Rect, BLOCK_HEIGHT, BLOCK_WIDTH};
//!
//! assert_ne!(BlockKind::Gold, BlockKind::Red);
//!
//! let a = Rect::block(0, 0);
//! let b = Rect::block(BLOCK_WIDTH - 1, BLOCK_HEIGHT - 1);
//! assert!(a.overlaps(&b));
//! assert!(!a.overlaps(&Rect::block(BLOCK_WIDTH, 0)));
//! ```

/// World width in pixels.
pub const SCREEN_WIDTH: i32 = 700;

/// World height in pixels.
pub const SCREEN_HEIGHT: i32 = 400;

/// Width of every block (player included).
pub const BLOCK_WIDTH: i32 = 20;

/// Height of every block (player included).
pub const BLOCK_HEIGHT: i32 = 15;

/// A falling block whose `y` exceeds this is reset (screen height plus margin).
pub const DESPAWN_Y: i32 = 410;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Number of black blocks created at game start.
pub const STARTING_BLOCK_AMOUNT: usize = 5;

/// Fall speed at game start (pixels per tick).
pub const STARTING_SPEED: u32 = 1;

/// Lowest reachable fall speed.
pub const MIN_SPEED: u32 = 1;

/// Black hits landing on `score % SCORE_TO_SPEED_RATIO == 1` grant a speed bonus.
pub const SCORE_TO_SPEED_RATIO: u32 = 3;

pub const SCORE_FROM_BLACK_BLOCK: u32 = 1;
pub const SPEED_FROM_BLACK_BLOCK: u32 = 1;
pub const SCORE_FROM_GOLD_BLOCK: u32 = 6;
pub const SPEED_FROM_GOLD_BLOCK: u32 = 2;
pub const PENALTY_SCORE_RED_BLOCK: u32 = 3;
pub const PENALTY_SPEED_RED_BLOCK: u32 = 1;

/// Half-open `[lo, hi)` range of pixel coordinates.
pub type Band = (i32, i32);

/// Horizontal placement range for every spawn and respawn.
///
/// Keeps the whole block inside the screen.
pub const SPAWN_X: Band = (0, SCREEN_WIDTH - BLOCK_WIDTH);

pub const INITIAL_BLACK_Y: Band = (-75, 0);
pub const INITIAL_GOLD_Y: Band = (-2500, -220);
pub const RED_SPAWN_Y: Band = (-500, -25);
pub const RESPAWN_Y: Band = (-300, -20);

/// The gold block waits a long way above the screen before it comes back.
pub const SNITCH_RESPAWN_Y: Band = (-90000, -5000);


/// Kind of a block. Determines its color and which hit rule applies.
///
/// - **Player**: Green, follows the pointer, never collides with itself
/// - **Black**: +1 score, occasional speed bonus
/// - **Gold**: The "snitch": +6 score, +2 speed, respawns far above the screen
/// - **Red**: Penalty: -3 score, -1 speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Player,
    Black,
    Gold,
    Red,
}

/// Axis-aligned rectangle in world pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A block-sized rectangle at `(x, y)`.
    pub const fn block(x: i32, y: i32) -> Self {
        Self::new(x, y, BLOCK_WIDTH, BLOCK_HEIGHT)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap test: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Discrete audio events emitted by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player touched a black or the gold block.
    BlackOrGoldHit,
    /// Player touched a red block.
    RedHit,
}

/// Per-tick input delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    /// Latest pointer position in world pixels; `None` keeps the player where it is.
    pub pointer: Option<(i32, i32)>,
    /// Quit / escape was requested.
    pub quit: bool,
}

impl TickInput {
    pub fn pointer(x: i32, y: i32) -> Self {
        Self {
            pointer: Some((x, y)),
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            pointer: None,
            quit: true,
        }
    }
}
