//! Top-level frame layout.
//!
//! Pure view of `AppState`: transcript on top, input box, then a one-line
//! status bar. Toasts and overlays are painted over the transcript.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::features::{input, transcript};
use crate::state::{AppState, TuiState};
use crate::toast::{Toast, ToastSeverity};

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

/// Width and height available to transcript content for a given terminal
/// size. `update` uses this to keep scroll clamping in sync with the layout.
pub fn transcript_geometry(width: u16, height: u16) -> (u16, u16) {
    (width, height.saturating_sub(INPUT_HEIGHT + STATUS_HEIGHT))
}

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let [transcript_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    transcript::render::render(
        frame,
        transcript_area,
        &app.tui.store.conversation.messages,
        &app.tui.transcript,
    );
    input::render::render(frame, input_area, &app.tui.input, app.tui.is_loading());
    render_status_line(frame, status_area, &app.tui);

    if let Some(toast) = &app.tui.toast {
        render_toast(frame, area, toast);
    }
    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area, &app.tui);
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let line = if tui.is_loading() {
        let spinner = SPINNER_FRAMES[tui.spinner_frame % SPINNER_FRAMES.len()];
        let mut spans = vec![
            Span::styled(
                format!(" {spinner} Searching…"),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if let Some(started_at) = tui.search_started_at {
            spans.push(Span::styled(
                format!(" ({}s)", started_at.elapsed().as_secs()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    } else {
        Line::from(Span::styled(
            " Enter send · Ctrl+H history · Ctrl+N new search · Ctrl+C quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let width = area.width.saturating_sub(4).min(44);
    if width < 10 || area.height < 4 {
        return;
    }
    let rect = Rect {
        x: area.x + area.width - width - 1,
        y: area.y,
        width,
        height: 4,
    };

    let accent = match toast.severity {
        ToastSeverity::Info => Color::Blue,
        ToastSeverity::Error => Color::Red,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(format!(" {} ", toast.title));
    let body = Paragraph::new(toast.description.as_str())
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    frame.render_widget(Clear, rect);
    frame.render_widget(body, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_reserves_input_and_status_rows() {
        assert_eq!(transcript_geometry(80, 24), (80, 20));
    }

    #[test]
    fn geometry_survives_tiny_terminals() {
        assert_eq!(transcript_geometry(10, 2), (10, 0));
    }
}
