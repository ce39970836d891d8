//! Scoring module - collision detection and score/speed transitions
//!
//! The rule set is disjoint: a hit block matches exactly one of the Gold, Red
//! or Black rules. Floors are explicit (score never below 0, speed never
//! below 1).
//!
//! The black-block speed bonus is edge-triggered against the score at the
//! start of the tick, not the score after the previous hit of the same tick.

use crate::block::{Block, BlockId};
use crate::types::{
    BlockKind, Rect, SoundCue, MIN_SPEED, PENALTY_SCORE_RED_BLOCK, PENALTY_SPEED_RED_BLOCK,
    SCORE_FROM_BLACK_BLOCK, SCORE_FROM_GOLD_BLOCK, SCORE_TO_SPEED_RATIO, SPEED_FROM_BLACK_BLOCK,
    SPEED_FROM_GOLD_BLOCK,
};

/// Score/speed after a single hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitResult {
    pub score: u32,
    pub speed: u32,
    /// Audio event for this hit (`None` only for a player "hit").
    pub cue: Option<SoundCue>,
}

/// Collect the ids of every block overlapping `player`, in slice order.
///
/// `out` is cleared first so callers can reuse one buffer across ticks.
pub fn find_hits(player: &Rect, blocks: &[Block], out: &mut Vec<BlockId>) {
    out.clear();
    out.extend(
        blocks
            .iter()
            .filter(|b| b.kind != BlockKind::Player && b.rect().overlaps(player))
            .map(|b| b.id),
    );
}

/// Whether a black hit that produced `score` earns the speed bonus.
pub fn black_hit_grants_speed(score: u32, previous_score: u32) -> bool {
    score % SCORE_TO_SPEED_RATIO == 1 && score != previous_score
}

/// Apply the hit rule for `kind`.
///
/// `previous_score` is the score at the start of the tick.
pub fn apply_hit(kind: BlockKind, score: u32, speed: u32, previous_score: u32) -> HitResult {
    match kind {
        BlockKind::Gold => HitResult {
            score: score.saturating_add(SCORE_FROM_GOLD_BLOCK),
            speed: speed.saturating_add(SPEED_FROM_GOLD_BLOCK),
            cue: Some(SoundCue::BlackOrGoldHit),
        },
        BlockKind::Red => HitResult {
            score: score.saturating_sub(PENALTY_SCORE_RED_BLOCK),
            speed: speed.saturating_sub(PENALTY_SPEED_RED_BLOCK).max(MIN_SPEED),
            cue: Some(SoundCue::RedHit),
        },
        BlockKind::Black => {
            let score = score.saturating_add(SCORE_FROM_BLACK_BLOCK);
            let speed = if black_hit_grants_speed(score, previous_score) {
                speed.saturating_add(SPEED_FROM_BLACK_BLOCK)
            } else {
                speed
            };
            HitResult {
                score,
                speed,
                cue: Some(SoundCue::BlackOrGoldHit),
            }
        }
        BlockKind::Player => HitResult {
            score,
            speed,
            cue: None,
        },
    }
}

/// How many of the oldest red blocks must stop respawning.
pub fn red_cull_count(score: u32, red_count: usize) -> usize {
    red_count.saturating_sub(score as usize)
}

/// Red blocks to spawn for a tick that started at `previous_score`.
///
/// Score losses never spawn anything.
pub fn red_spawn_count(score: u32, previous_score: u32) -> u32 {
    score.saturating_sub(previous_score)
}
