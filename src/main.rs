//! Terminal Brainvita runner (default binary).
//!
//! It uses crossterm for input and the framebuffer-based renderer from
//! `brainvita-term`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use brainvita::app::App;
use brainvita::cli::Cli;
use brainvita::config::AppConfig;
use brainvita::core::GameSnapshot;
use brainvita::input::{handle_key_event, should_quit};
use brainvita::logging;
use brainvita::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    cli.apply_to(&mut config);
    config.validate()?;

    if cli.list_layouts {
        let catalog = config.catalog()?;
        for layout in catalog.iter() {
            println!(
                "{:<16} {:>2} pegs  {}",
                layout.name(),
                layout.peg_count(),
                layout.description()
            );
        }
        return Ok(());
    }

    let mut app = App::from_config(&config)?;
    info!(layout = app.layout_name(), "starting brainvita");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, config.tick_ms);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting brainvita");
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App, tick_ms: u32) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(tick_ms as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.snapshot_into(&mut snap);
        view.render_into(&snap, &app.view_state(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        app.handle(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(tick_ms);
        }
    }
}
