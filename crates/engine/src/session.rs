//! Session: one play-through from high score load to high score save.
//!
//! A [`Session`] owns the [`GameState`] and the high score store. Input,
//! rendering and audio are injected per call so the same loop drives the
//! terminal frontend and the scripted fakes used in tests.

use std::time::{Duration, Instant};

use anyhow::Result;

use tui_blocks_core::{AudioSink, GameSnapshot, GameState};
use tui_blocks_store::{load_high_score, save_high_score, HighScoreStore};
use tui_blocks_types::{TickInput, TICK_MS};

/// Source of per-tick input.
pub trait InputSource {
    /// Wait up to `timeout` and return the latest pointer position and quit
    /// flag. May return early once quit is seen.
    fn poll(&mut self, timeout: Duration) -> Result<TickInput>;
}

/// Anything that can show a frame.
pub trait RenderSink {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll(&mut self, timeout: Duration) -> Result<TickInput> {
        (**self).poll(timeout)
    }
}

impl<T: RenderSink + ?Sized> RenderSink for &mut T {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        (**self).present(snapshot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub score: u32,
    pub high_score: u32,
    /// Whether the high score reached the store.
    pub saved: bool,
}

pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
    snapshot: GameSnapshot,
    tick_duration: Duration,
}

impl<S: HighScoreStore> Session<S> {
    /// Load the high score from `store` and set up a fresh game.
    pub fn start(seed: u64, store: S) -> Self {
        let high_score = load_high_score(&store);
        log::info!("session start: seed={} high_score={}", seed, high_score);
        Self::with_state(GameState::new(seed, high_score), store)
    }

    /// Wrap an already prepared game. The store is only used on `finish`.
    pub fn with_state(state: GameState, store: S) -> Self {
        let mut snapshot = GameSnapshot::default();
        state.snapshot_into(&mut snapshot);
        Self {
            state,
            store,
            snapshot,
            tick_duration: Duration::from_millis(TICK_MS as u64),
        }
    }

    pub fn with_tick_duration(mut self, tick_duration: Duration) -> Self {
        self.tick_duration = tick_duration;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the state after the last step.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Advance one tick, or stop if `input` asks to quit.
    pub fn step<A: AudioSink + ?Sized>(&mut self, input: &TickInput, audio: &mut A) -> Flow {
        if input.quit {
            log::info!("quit requested after {} ticks", self.state.tick_count());
            return Flow::Quit;
        }

        let outcome = self.state.tick(input, audio);
        if outcome.new_high_score {
            log::debug!("new high score {}", self.state.high_score());
        }
        if outcome.culled > 0 || outcome.spawned_red > 0 {
            log::trace!(
                "tick {}: spawned {} red, culled {}, {} reds tracked",
                self.state.tick_count(),
                outcome.spawned_red,
                outcome.culled,
                self.state.red_blocks().len()
            );
        }

        self.state.snapshot_into(&mut self.snapshot);
        Flow::Continue
    }

    pub fn present<R: RenderSink + ?Sized>(&self, render: &mut R) -> Result<()> {
        render.present(&self.snapshot)
    }

    /// Fixed-step loop: present, wait for input until the next tick, step.
    /// Returns once the input source reports quit.
    pub fn run<I, R, A>(&mut self, input: &mut I, render: &mut R, audio: &mut A) -> Result<()>
    where
        I: InputSource + ?Sized,
        R: RenderSink + ?Sized,
        A: AudioSink + ?Sized,
    {
        let mut last_tick = Instant::now();
        loop {
            self.present(render)?;

            let timeout = self
                .tick_duration
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);
            let tick_input = input.poll(timeout)?;
            last_tick = Instant::now();

            if self.step(&tick_input, audio) == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Persist the high score. Never fails; a failed save is logged and
    /// reported in the summary.
    pub fn finish(&mut self) -> SessionSummary {
        let high_score = self.state.high_score();
        let saved = save_high_score(&mut self.store, high_score);
        let summary = SessionSummary {
            ticks: self.state.tick_count(),
            score: self.state.score(),
            high_score,
            saved,
        };
        log::info!(
            "session end: ticks={} score={} high_score={}",
            summary.ticks,
            summary.score,
            summary.high_score
        );
        summary
    }
}
