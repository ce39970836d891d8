//! Terminal block-catching runner (default binary).
//!
//! The mouse drives the green player block; falling blocks are scored on
//! contact. Uses crossterm for input and the framebuffer renderer from
//! `tui_blocks::term`.

use std::fs::File;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::terminal;

use tui_blocks::core::GameSnapshot;
use tui_blocks::engine::{InputSource, RenderSink, Session, SessionConfig};
use tui_blocks::input::{BatchSummary, EventPump};
use tui_blocks::store::FileStore;
use tui_blocks::term::{nudge, BellAudio, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blocks::types::TickInput;

fn terminal_viewport() -> Viewport {
    let (w, h) = terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

/// Mouse and keyboard, converted to world pixels through the view layout.
struct TerminalInput {
    pump: EventPump,
    view: GameView,
    viewport: Viewport,
    pointer: (i32, i32),
}

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> Result<TickInput> {
        let summary = BatchSummary::from_events(self.pump.drain(timeout)?);

        if let Some((w, h)) = summary.resize {
            self.viewport = Viewport::new(w, h);
        }

        let mut moved = false;
        if let Some((col, row)) = summary.pointer {
            self.pointer = self.view.pointer_to_world(self.viewport, col, row);
            moved = true;
        }
        if summary.nudge != (0, 0) {
            self.pointer = nudge(self.pointer, summary.nudge.0, summary.nudge.1);
            moved = true;
        }

        Ok(TickInput {
            pointer: moved.then_some(self.pointer),
            quit: summary.quit,
        })
    }
}

/// Renders snapshots to the real terminal.
struct TerminalFrame {
    term: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    viewport: Viewport,
}

impl RenderSink for TerminalFrame {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let viewport = terminal_viewport();
        if viewport != self.viewport {
            log::debug!("resize to {}x{}", viewport.width, viewport.height);
            self.term.invalidate();
            self.viewport = viewport;
        }
        self.view.render_into(snapshot, viewport, &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }
}

/// Logs go to `BLOCKS_LOG_PATH` when set; otherwise only an explicit
/// `RUST_LOG` enables them (on stderr).
fn init_logging(config: &SessionConfig) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    match &config.log_path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create log file {}", path))?;
            env_logger::Builder::from_env(env)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None if std::env::var_os("RUST_LOG").is_some() => {
            env_logger::Builder::from_env(env).init();
        }
        None => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    init_logging(&config)?;

    let seed = config.seed_or_clock();
    let mut session = Session::start(seed, FileStore::new(&config.score_path));

    let view = GameView::default();
    let viewport = terminal_viewport();
    let mut frame = TerminalFrame {
        term: TerminalRenderer::new(),
        view: GameView::default(),
        fb: FrameBuffer::new(viewport.width, viewport.height),
        viewport,
    };
    let player = session.state().player();
    let mut input = TerminalInput {
        pump: EventPump::new(),
        view,
        viewport,
        pointer: (player.x, player.y),
    };
    let mut audio = BellAudio::stdout(config.bell);

    frame.term.enter()?;
    log::debug!("terminal {}x{}, bell {}", viewport.width, viewport.height, config.bell);
    let result = session.run(&mut input, &mut frame, &mut audio);

    // Always try to restore terminal state.
    let restored = frame.term.exit();

    session.finish();
    result?;
    restored
}
