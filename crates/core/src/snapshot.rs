use crate::block::Block;
use crate::types::{BlockKind, Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSnapshot {
    pub kind: BlockKind,
    pub x: i32,
    pub y: i32,
}

impl From<Block> for BlockSnapshot {
    fn from(value: Block) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
        }
    }
}

impl BlockSnapshot {
    pub fn rect(&self) -> Rect {
        Rect::block(self.x, self.y)
    }

    /// Whether any part of the block is inside the screen.
    pub fn visible(&self) -> bool {
        self.rect().overlaps(&Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub player: BlockSnapshot,
    pub blocks: Vec<BlockSnapshot>,
    pub score: u32,
    pub high_score: u32,
    pub speed: u32,
    pub tick: u64,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn visible_blocks(&self) -> impl Iterator<Item = &BlockSnapshot> {
        self.blocks.iter().filter(|b| b.visible())
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            player: BlockSnapshot {
                kind: BlockKind::Player,
                x: 0,
                y: 0,
            },
            blocks: Vec::new(),
            score: 0,
            high_score: 0,
            speed: 1,
            tick: 0,
            seed: 0,
        }
    }
}
