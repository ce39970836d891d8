//! Per-tick event draining.
//!
//! Terminals can deliver many mouse-move events between two ticks. Only the
//! latest pointer position matters, so consecutive pointer events collapse
//! into one and the batch stays bounded.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use arrayvec::ArrayVec;
use crossterm::event;

use crate::map::{map_event, InputEvent};

pub const MAX_EVENTS_PER_TICK: usize = 32;

pub type EventBatch = ArrayVec<InputEvent, MAX_EVENTS_PER_TICK>;

/// Append `ev`, merging it into the previous event where only the last one counts.
///
/// When the batch is full, `Quit` still overwrites the last slot; anything
/// else is dropped.
pub fn push_event(batch: &mut EventBatch, ev: InputEvent) {
    match (batch.last_mut(), ev) {
        (Some(last @ InputEvent::Pointer { .. }), InputEvent::Pointer { .. })
        | (Some(last @ InputEvent::Resize { .. }), InputEvent::Resize { .. }) => {
            *last = ev;
            return;
        }
        _ => {}
    }

    if batch.try_push(ev).is_err() && ev == InputEvent::Quit {
        if let Some(last) = batch.last_mut() {
            *last = InputEvent::Quit;
        }
    }
}

/// What a batch amounts to for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Latest absolute pointer cell.
    pub pointer: Option<(u16, u16)>,
    /// Summed keyboard steps after the latest absolute pointer.
    pub nudge: (i32, i32),
    pub resize: Option<(u16, u16)>,
    pub quit: bool,
}

impl BatchSummary {
    pub fn from_events(events: &[InputEvent]) -> Self {
        let mut summary = Self::default();
        for ev in events {
            match *ev {
                InputEvent::Pointer { col, row } => {
                    summary.pointer = Some((col, row));
                    summary.nudge = (0, 0);
                }
                InputEvent::Nudge { dx, dy } => {
                    summary.nudge.0 += dx as i32;
                    summary.nudge.1 += dy as i32;
                }
                InputEvent::Resize { width, height } => summary.resize = Some((width, height)),
                InputEvent::Quit => summary.quit = true,
            }
        }
        summary
    }
}

/// Reads crossterm events.
#[derive(Debug, Default)]
pub struct EventPump {
    batch: EventBatch,
}

impl EventPump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect events for up to `timeout`, stopping early on quit.
    pub fn drain(&mut self, timeout: Duration) -> Result<&[InputEvent]> {
        self.batch.clear();
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining).context("poll terminal events")? {
                break;
            }
            let ev = event::read().context("read terminal event")?;
            if let Some(mapped) = map_event(&ev) {
                push_event(&mut self.batch, mapped);
                if mapped == InputEvent::Quit {
                    break;
                }
            }
            if remaining.is_zero() {
                break;
            }
        }

        Ok(self.batch.as_slice())
    }
}
