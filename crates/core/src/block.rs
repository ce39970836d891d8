//! Block entity - one falling (or player-controlled) rectangle.
//!
//! A block is plain data. Whether it comes back to the top or disappears after
//! leaving the screen is decided by two flags:
//!
//! - `is_snitch`: the gold block, always respawns far above the screen
//! - `active_for_update`: every other block respawns near the top while set,
//!   and is despawned once cleared (see red-block culling in [`crate::scoring`])

use crate::rng::SpawnRng;
use crate::types::{BlockKind, Rect, DESPAWN_Y, RESPAWN_Y, SNITCH_RESPAWN_Y};

/// Stable block identifier. Ids grow monotonically, so ordering by id is
/// insertion order.
pub type BlockId = u32;

/// What happened to a block that was reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Moved back above the screen.
    Respawned,
    /// Must be removed from every collection.
    Despawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub x: i32,
    pub y: i32,
    pub active_for_update: bool,
    pub is_snitch: bool,
}

impl Block {
    /// Create an active block. Gold blocks are always snitches.
    pub fn new(id: BlockId, kind: BlockKind, x: i32, y: i32) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            active_for_update: true,
            is_snitch: kind == BlockKind::Gold,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::block(self.x, self.y)
    }

    pub fn overlaps(&self, other: &Block) -> bool {
        self.rect().overlaps(&other.rect())
    }

    /// Send the block back above the screen, or report that it must go.
    ///
    /// - snitch: `x` anywhere, `y` in `[-90000, -5000)`
    /// - active: `x` anywhere, `y` in `[-300, -20)`
    /// - otherwise: [`ResetOutcome::Despawn`], position untouched
    pub fn reset_or_deactivate(&mut self, rng: &mut SpawnRng) -> ResetOutcome {
        let band = if self.is_snitch {
            SNITCH_RESPAWN_Y
        } else if self.active_for_update {
            RESPAWN_Y
        } else {
            return ResetOutcome::Despawn;
        };

        let (x, y) = rng.position(band);
        self.x = x;
        self.y = y;
        ResetOutcome::Respawned
    }

    /// Fall by `speed` pixels; reset once past the bottom margin.
    ///
    /// Returns `None` while the block is still above [`DESPAWN_Y`].
    pub fn advance(&mut self, speed: u32, rng: &mut SpawnRng) -> Option<ResetOutcome> {
        let step = i32::try_from(speed).unwrap_or(i32::MAX);
        self.y = self.y.saturating_add(step);
        if self.y > DESPAWN_Y {
            Some(self.reset_or_deactivate(rng))
        } else {
            None
        }
    }
}
