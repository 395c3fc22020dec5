use {
    super::app::{App, AppAction},
    crate::{config::SentinelConfig, sink::AlertWriter},
    crossterm::event::{Event, KeyEventKind},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::{
        io::Stdout,
        time::{Duration, Instant},
    },
};

/// Longest we block on keyboard input before re-checking the tick deadline
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Run the dashboard event loop
///
/// Ticks the stream every `app.refresh_interval`, writes new alerts to the
/// sinks and handles keyboard controls until the user quits.
pub async fn run_ui(
    mut app: App,
    config: &SentinelConfig,
    writer: AlertWriter,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;

    // Alternate screen keeps stderr logs from tearing the dashboard
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;

    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut app, config, writer).await;

    // Cleanup - restore terminal state even if the loop failed
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    config: &SentinelConfig,
    mut writer: AlertWriter,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut next_tick = Instant::now();

    loop {
        if Instant::now() >= next_tick {
            let alerts = app.on_tick();
            if let Err(e) = writer.write_alerts(&alerts).await {
                log::error!("Failed to write alerts: {}", e);
            }
            next_tick = Instant::now() + app.refresh_interval;
        }

        terminal.draw(|f| {
            let area = f.size();
            crate::ui::layout::render_layout(f, area, app);
        })?;

        let timeout = next_tick.saturating_duration_since(Instant::now()).min(INPUT_POLL);
        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.handle_key(key.code) {
                    AppAction::Quit => break,
                    AppAction::Reset => {
                        // New run: truncate the logs and start revealing immediately
                        writer.flush().await.ok();
                        writer = AlertWriter::from_config(config)?;
                        next_tick = Instant::now();
                    }
                    AppAction::Continue => {}
                }
            }
        }
    }

    writer.flush().await?;
    log::info!("Dashboard closed after {} alerts", app.total_alerts);

    Ok(())
}
