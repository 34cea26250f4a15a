use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};

use crate::activity::Registry;
use crate::relay::Relay;
use crate::runner::Launch;
use crate::shutdown;

use super::app::LauncherApp;
use super::render::draw_ui;

/// Run the launcher window until the user exits.
///
/// The relay is drained every `poll_interval`; key and mouse events are
/// handled as they arrive in between.
pub fn run_ui<L: Launch>(
    registry: Registry,
    relay: Relay,
    launcher: L,
    poll_interval: Duration,
) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;

    let mut app = LauncherApp::new(registry, relay, launcher);
    let result = event_loop(&mut terminal, &mut app, poll_interval);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend, L: Launch>(
    terminal: &mut Terminal<B>,
    app: &mut LauncherApp<L>,
    poll_interval: Duration,
) -> io::Result<()> {
    let mut last_drain = Instant::now();

    loop {
        terminal.draw(|f| {
            draw_ui(f, app);
        })?;

        let timeout = poll_interval.saturating_sub(last_drain.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    app.handle_key(key.code, key.modifiers);
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.handle_mouse_scroll(true);
                    }
                    MouseEventKind::ScrollDown => {
                        app.handle_mouse_scroll(false);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        if last_drain.elapsed() >= poll_interval {
            app.drain_relay();
            last_drain = Instant::now();
        }

        if app.should_quit() || shutdown::requested() {
            tracing::info!(active_runs = app.active_runs(), "launcher window closing");
            return Ok(());
        }
    }
}
