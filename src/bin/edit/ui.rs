//! UI rendering logic
//!
//! Handles layout and rendering of the editor using Ratatui.
//! Layout structure:
//! - Title bar (1 line, fixed)
//! - Editor pane (responsive height), with an optional line-number gutter
//! - Status line (1 line, fixed)

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Minimum terminal width required for the UI
const MIN_TERMINAL_WIDTH: u16 = 40;
/// Height of the status line
const STATUS_LINE_HEIGHT: u16 = 1;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    if size.width < MIN_TERMINAL_WIDTH {
        render_error_too_narrow(frame, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Title bar
            Constraint::Min(3),                     // Editor pane
            Constraint::Length(STATUS_LINE_HEIGHT), // Status line
        ])
        .split(size);

    render_title_bar(frame, chunks[0], app);
    render_editor(frame, chunks[1], app);
    render_status_line(frame, chunks[2], app);
}

fn render_error_too_narrow(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too narrow: {} < {} chars",
        area.width, MIN_TERMINAL_WIDTH
    );
    let paragraph = Paragraph::new(msg).style(Style::default().fg(Color::Red));
    frame.render_widget(paragraph, area);
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let dirty = if app.dirty { " [+]" } else { "" };
    let title = format!(
        "modefmt-edit:: {}{}  ({})",
        app.file_name,
        dirty,
        app.editor.options().mode
    );
    let paragraph =
        Paragraph::new(title).style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(paragraph, area);
}

fn render_editor(frame: &mut Frame, area: Rect, app: &mut App) {
    app.clamp_scroll(area.height as usize);

    let buffer = app.editor.buffer();
    let line_numbers = app.editor.options().line_numbers;
    let gutter_width = if line_numbers {
        buffer.line_count().to_string().len() + 1
    } else {
        0
    };

    let mut lines = Vec::new();
    let last = (app.scroll + area.height as usize).min(buffer.line_count());
    for index in app.scroll..last {
        let text = buffer.line(index).unwrap_or("");
        let mut spans = Vec::new();
        if line_numbers {
            spans.push(Span::styled(
                format!("{:>width$} ", index + 1, width = gutter_width - 1),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::raw(text.to_string()));
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);

    // Place the terminal cursor on the buffer cursor.
    let cursor = buffer.cursor();
    if cursor.line >= app.scroll && cursor.line < last {
        let x = area.x + gutter_width as u16 + cursor.ch.min(u16::MAX as usize) as u16;
        let y = area.y + (cursor.line - app.scroll) as u16;
        if x < area.x + area.width {
            frame.set_cursor_position((x, y));
        }
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let cursor = app.editor.buffer().cursor();
    let mut status_text = format!("{}:{}  {}", cursor.line + 1, cursor.ch + 1, app.status);

    let max_width = area.width as usize;
    if status_text.len() > max_width {
        status_text.truncate(max_width.saturating_sub(3));
        status_text.push_str("...");
    }

    let paragraph = Paragraph::new(status_text)
        .style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(paragraph, area);
}
