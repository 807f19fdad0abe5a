use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::audio::{Audio, SoundEffect};
use crate::game::{Action, Direction, FrameEvents, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

// Target frame rate; movement only advances every `frames_per_tick` frames
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: Audio,
    should_quit: bool,
    pending_direction: Option<Direction>,
    frame_counter: u32,
}

impl PlayMode {
    pub fn new(config: GameConfig, audio: Audio) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            should_quit: false,
            pending_direction: None,
            frame_counter: 0,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // One frame: collision checks, maybe a movement tick, redraw
                _ = frame_timer.tick() => {
                    self.advance_frame();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Per-frame work. Wall and flower checks run every frame against the
    /// current head; movement runs once the frame counter fills.
    fn advance_frame(&mut self) {
        self.frame_counter += 1;

        let events = self.engine.frame(&mut self.state);
        self.react(events);

        if self.frame_counter >= self.engine.config().frames_per_tick {
            self.frame_counter = 0;

            let action = self
                .pending_direction
                .take()
                .map(Action::Move)
                .unwrap_or(Action::Continue);

            let events = self.engine.tick(&mut self.state, action);
            self.react(events);
        }

        self.metrics.update();
    }

    fn react(&mut self, events: FrameEvents) {
        if events.ate_flower {
            self.audio.play(SoundEffect::Pickup);
        }
        if events.died.is_some() {
            self.audio.play(SoundEffect::Crash);
            self.metrics.on_game_over();
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);

            match action {
                KeyAction::GameAction(Action::Move(dir)) => {
                    // Last-pressed-wins; applied at the next tick
                    self.pending_direction = Some(dir);
                }
                KeyAction::GameAction(Action::Continue) => {}
                KeyAction::Restart => {
                    // Restart only means something once the snake is dead
                    if !self.state.is_alive {
                        self.reset_game();
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.frame_counter = 0;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
