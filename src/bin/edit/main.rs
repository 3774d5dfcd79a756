//! Terminal UI editor built on the modefmt engine
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

mod app;
mod ui;

use app::App;

#[derive(Parser)]
#[command(name = "modefmt-edit")]
#[command(about = "A terminal editor with mode-aware reformatting")]
struct Args {
    /// Path to the file to open
    file: PathBuf,
    /// Mode name; inferred from the file extension when omitted
    #[arg(long)]
    mode: Option<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let mut app = App::open(&args.file, args.mode).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("{}", e))
    })?;

    // Setup terminal
    enable_raw_mode()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(key, app) {
                    return Ok(());
                }
            }
        }
    }
}

fn handle_key_event(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        _ => {
            app.handle_key(key);
            false
        }
    }
}
