//! Game state module - manages the complete game state
//!
//! This module ties together all core components: blocks, spawner, RNG, and
//! scoring. It owns every block and runs one simulation tick at a time.
//!
//! One tick:
//!
//! 1. move the player to the latest pointer position
//! 2. remember the score the tick started with
//! 3. raise the high score to the current score
//! 4. apply the hit rule to every block overlapping the player, culling red
//!    blocks and resetting each hit block
//! 5. spawn one red block per point gained this tick
//! 6. let every block fall by the current speed
//! 7. raise the high score again so it covers this tick's gains

use crate::audio::AudioSink;
use crate::block::{Block, BlockId, ResetOutcome};
use crate::rng::SpawnRng;
use crate::scoring::{apply_hit, find_hits, red_cull_count, red_spawn_count};
use crate::snapshot::{BlockSnapshot, GameSnapshot};
use crate::spawner::Spawner;
use crate::types::*;

/// What a single tick did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Blocks the player touched.
    pub hits: u32,
    /// Red blocks created this tick.
    pub spawned_red: u32,
    /// Red blocks newly told to stop respawning.
    pub culled: u32,
    /// Blocks removed for good.
    pub despawned: u32,
    /// The high score went up during this tick.
    pub new_high_score: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    player: Block,
    /// Every collidable block, sorted by id (insertion order).
    blocks: Vec<Block>,
    /// Ids of penalty red blocks, oldest first.
    red_blocks: Vec<BlockId>,
    spawner: Spawner,
    rng: SpawnRng,
    score: u32,
    speed: u32,
    high_score: u32,
    previous_score: u32,
    tick: u64,
    // Scratch buffers reused across ticks.
    hit_buf: Vec<BlockId>,
    despawn_buf: Vec<BlockId>,
}

impl GameState {
    /// Create a new game: 5 black blocks, the gold block, score 0, speed 1.
    pub fn new(seed: u64, high_score: u32) -> Self {
        let mut state = Self::empty(seed, high_score);
        state
            .spawner
            .populate_initial(STARTING_BLOCK_AMOUNT, &mut state.rng, &mut state.blocks);
        state
    }

    /// A game with no falling blocks yet.
    pub fn empty(seed: u64, high_score: u32) -> Self {
        let spawner = Spawner::new();
        Self {
            player: spawner.player(),
            blocks: Vec::new(),
            red_blocks: Vec::new(),
            spawner,
            rng: SpawnRng::new(seed),
            score: 0,
            speed: STARTING_SPEED,
            high_score,
            previous_score: 0,
            tick: 0,
            hit_buf: Vec::new(),
            despawn_buf: Vec::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn previous_score(&self) -> u32 {
        self.previous_score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn player(&self) -> &Block {
        &self.player
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn red_blocks(&self) -> &[BlockId] {
        &self.red_blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.index_of(id).map(|i| &self.blocks[i])
    }

    fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.binary_search_by_key(&id, |b| b.id).ok()
    }

    pub fn move_player(&mut self, x: i32, y: i32) {
        self.player.x = x;
        self.player.y = y;
    }

    /// Place a block by hand. Red blocks also join the penalty list.
    pub fn insert_block(&mut self, kind: BlockKind, x: i32, y: i32) -> BlockId {
        debug_assert!(kind != BlockKind::Player, "the player is not collidable");
        let block = self.spawner.make(kind, x, y);
        let id = block.id;
        self.blocks.push(block);
        if kind == BlockKind::Red {
            self.red_blocks.push(id);
        }
        id
    }

    /// Overwrite score and speed (speed is floored at 1).
    pub fn set_progress(&mut self, score: u32, speed: u32) {
        self.score = score;
        self.speed = speed.max(MIN_SPEED);
        self.high_score = self.high_score.max(score);
    }

    /// Create `count` red blocks and add them to both collections.
    pub fn spawn_red(&mut self, count: u32) -> u32 {
        let start = self.blocks.len();
        self.spawner.spawn_red(count, &mut self.rng, &mut self.blocks);
        self.red_blocks.extend(self.blocks[start..].iter().map(|b| b.id));
        count
    }

    /// Stop the oldest red blocks from respawning while the score is lower
    /// than the number of red blocks. Returns how many were newly marked.
    pub fn cull_red_blocks(&mut self) -> u32 {
        let n = red_cull_count(self.score, self.red_blocks.len());
        let mut marked = 0;
        for i in 0..n {
            let id = self.red_blocks[i];
            if let Some(idx) = self.index_of(id) {
                let block = &mut self.blocks[idx];
                if block.active_for_update {
                    block.active_for_update = false;
                    marked += 1;
                }
            }
        }
        marked
    }

    /// Reset the block with `id`, removing it if it despawns.
    ///
    /// Returns `None` when no such block exists (e.g. it was already removed).
    pub fn reset_block(&mut self, id: BlockId) -> Option<ResetOutcome> {
        let idx = self.index_of(id)?;
        let outcome = self.blocks[idx].reset_or_deactivate(&mut self.rng);
        if outcome == ResetOutcome::Despawn {
            self.remove_at(idx);
        }
        Some(outcome)
    }

    fn remove_at(&mut self, idx: usize) {
        let id = self.blocks.remove(idx).id;
        if let Some(pos) = self.red_blocks.iter().position(|&r| r == id) {
            self.red_blocks.remove(pos);
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// `input.quit` is ignored here; stopping is the caller's decision.
    pub fn tick<A: AudioSink + ?Sized>(&mut self, input: &TickInput, audio: &mut A) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let high_before = self.high_score;
        self.tick += 1;

        if let Some((x, y)) = input.pointer {
            self.move_player(x, y);
        }
        self.previous_score = self.score;
        self.high_score = self.high_score.max(self.score);

        // Hits are collected before any block moves.
        let mut hits = std::mem::take(&mut self.hit_buf);
        find_hits(&self.player.rect(), &self.blocks, &mut hits);
        for &id in &hits {
            self.process_hit(id, audio, &mut outcome);
        }
        self.hit_buf = hits;
        outcome.culled += self.cull_red_blocks();

        outcome.spawned_red = self.spawn_red(red_spawn_count(self.score, self.previous_score));
        outcome.despawned += self.advance_blocks();

        self.high_score = self.high_score.max(self.score);
        outcome.new_high_score = self.high_score > high_before;
        outcome
    }

    fn process_hit<A: AudioSink + ?Sized>(
        &mut self,
        id: BlockId,
        audio: &mut A,
        outcome: &mut TickOutcome,
    ) {
        let Some(idx) = self.index_of(id) else {
            return;
        };

        let result = apply_hit(
            self.blocks[idx].kind,
            self.score,
            self.speed,
            self.previous_score,
        );
        self.score = result.score;
        self.speed = result.speed;
        if let Some(cue) = result.cue {
            audio.play(cue);
        }
        outcome.hits += 1;
        outcome.culled += self.cull_red_blocks();

        if self.reset_block(id) == Some(ResetOutcome::Despawn) {
            outcome.despawned += 1;
        }
    }

    fn advance_blocks(&mut self) -> u32 {
        let speed = self.speed;
        let mut gone = std::mem::take(&mut self.despawn_buf);
        gone.clear();

        for block in self.blocks.iter_mut() {
            if block.advance(speed, &mut self.rng) == Some(ResetOutcome::Despawn) {
                gone.push(block.id);
            }
        }

        if !gone.is_empty() {
            self.blocks.retain(|b| !gone.contains(&b.id));
            self.red_blocks.retain(|id| !gone.contains(id));
        }

        let n = gone.len() as u32;
        self.despawn_buf = gone;
        n
    }

    /// Copy the render-facing state into `out`, reusing its allocation.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.player = BlockSnapshot::from(self.player);
        out.blocks.clear();
        out.blocks.extend(self.blocks.iter().copied().map(BlockSnapshot::from));
        out.score = self.score;
        out.high_score = self.high_score;
        out.speed = self.speed;
        out.tick = self.tick;
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, 0)
    }
}
