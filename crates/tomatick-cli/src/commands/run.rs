use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::prelude::*;
use tomatick_core::storage::data_dir;
use tomatick_core::Config;
use tracing::info;

use crate::logging;
use crate::tui::{input, view, App};

/// Poll timeout while no tick is pending; keeps notices expiring on time.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Switch `out` to the alternate screen with mouse and focus reporting.
/// On failure raw mode is undone through `leave_raw` before returning.
fn enter_screen<W: io::Write>(
    out: &mut W,
    leave_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    if let Err(e) = execute!(out, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange) {
        leave_raw()?;
        return Err(e);
    }
    Ok(())
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_file(&data_dir()?.join("tomatick.log"))?;
    let config = Config::load()?;
    let mut app = App::new(&config)?;
    info!(steps = app.engine.step_list().len(), "starting interactive session");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    enter_screen(&mut stdout, disable_raw_mode)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);
    app.shutdown(Instant::now());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;
    info!("interactive session closed");

    result
}

fn run_app<B: Backend + io::Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Some(title) = app.sink.take_pending_title() {
            execute!(terminal.backend_mut(), SetTitle(title))?;
        }
        terminal.draw(|f| view::render(f, app, Instant::now()))?;

        let timeout = app
            .ticker
            .timeout(Instant::now())
            .map_or(IDLE_POLL, |t| t.min(IDLE_POLL));
        if event::poll(timeout)? {
            let action = input::event_action(
                event::read()?,
                &app.layout,
                app.editor.steps(),
                app.scroll_offset(),
                app.editor.drag().is_active(),
            );
            if let Some(action) = action {
                app.dispatch(action, Instant::now());
            }
        }

        app.on_timer(Instant::now());
        if app.should_quit {
            return Ok(());
        }
    }
}
