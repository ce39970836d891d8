//! Spawner - creates blocks and hands them to the game state.
//!
//! The spawner owns the id counter so every block ever created has a unique,
//! increasing id. It never keeps the blocks it makes.

use crate::block::{Block, BlockId};
use crate::rng::SpawnRng;
use crate::types::{BlockKind, INITIAL_BLACK_Y, INITIAL_GOLD_Y, RED_SPAWN_Y};

/// Id reserved for the player block.
pub const PLAYER_ID: BlockId = 0;

#[derive(Debug, Clone)]
pub struct Spawner {
    next_id: BlockId,
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            next_id: PLAYER_ID + 1,
        }
    }

    fn allocate_id(&mut self) -> BlockId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The player block. It starts at the origin and follows the pointer.
    pub fn player(&self) -> Block {
        Block::new(PLAYER_ID, BlockKind::Player, 0, 0)
    }

    /// Build a block of `kind` at an explicit position.
    pub fn make(&mut self, kind: BlockKind, x: i32, y: i32) -> Block {
        let id = self.allocate_id();
        Block::new(id, kind, x, y)
    }

    /// `n` black blocks just above the screen plus the single gold block.
    pub fn populate_initial(&mut self, n: usize, rng: &mut SpawnRng, out: &mut Vec<Block>) {
        out.reserve(n + 1);
        for _ in 0..n {
            let (x, y) = rng.position(INITIAL_BLACK_Y);
            out.push(self.make(BlockKind::Black, x, y));
        }

        let (x, y) = rng.position(INITIAL_GOLD_Y);
        out.push(self.make(BlockKind::Gold, x, y));
    }

    /// Append `count` red penalty blocks to `out`.
    pub fn spawn_red(&mut self, count: u32, rng: &mut SpawnRng, out: &mut Vec<Block>) {
        out.reserve(count as usize);
        for _ in 0..count {
            let (x, y) = rng.position(RED_SPAWN_Y);
            out.push(self.make(BlockKind::Red, x, y));
        }
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}
