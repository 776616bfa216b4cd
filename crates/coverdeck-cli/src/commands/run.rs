use std::io;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use coverdeck_core::deck::{DeckSource, JsonFileSource};
use coverdeck_core::scheduler::TimerFired;
use coverdeck_core::AppConfig;
use coverdeck_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets, App,
};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run(config: AppConfig) -> Result<()> {
    // Load before touching the terminal so errors print normally
    let source = JsonFileSource::new(config.deck_path());
    let deck = source
        .load_deck()
        .with_context(|| format!("Failed to load deck from {}", source.path().display()))?;
    info!("Loaded {} items from {}", deck.len(), source.path().display());

    let (mut app, mut timers) = App::new(deck, &config).context("Invalid configuration")?;
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    enable_raw_mode()?;
    // Whatever happens after raw mode is on, the terminal gets restored
    let result = setup_terminal().and_then(|mut terminal| {
        app.resize(terminal.size()?.width);
        main_loop(&mut terminal, &mut app, &mut timers, &event_handler)
    });
    restore_terminal()?;

    result
}

fn setup_terminal() -> Result<Term> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Coverdeck"))?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
    Ok(())
}

fn main_loop(
    terminal: &mut Term,
    app: &mut App,
    timers: &mut mpsc::UnboundedReceiver<TimerFired>,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Deliver overlay timers that fired since the last pass
        while let Ok(fired) = timers.try_recv() {
            app.handle_timer(fired);
        }

        terminal.draw(|frame| {
            let hits = widgets::draw(frame, app);
            app.hits = hits;
        })?;
        app.on_frame();

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app.keymap);
                    app.apply_action(action);
                }
                AppEvent::Mouse(mouse) => {
                    if let Some(input) =
                        handle_mouse_event(mouse, &app.hits, app.ui.cell_width_px, app.ui.wheel_step)
                    {
                        app.handle_pointer(input);
                    }
                }
                AppEvent::Resize(width, _) => app.resize(width),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }
    }
}
