//! Builds and draws the transcript lines.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use synapse_core::chat::{Message, Role};
use unicode_width::UnicodeWidthChar;

use crate::common::text::sanitize_for_display;

use super::state::TranscriptState;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    messages: &[Message],
    transcript: &TranscriptState,
) {
    let lines = build_lines(messages, area.width as usize);
    let total = lines.len();
    let viewport = area.height as usize;

    let offset = transcript
        .offset_from_bottom()
        .min(total.saturating_sub(viewport));
    let end = total - offset;
    let start = end.saturating_sub(viewport);

    let visible: Vec<Line> = lines[start..end].to_vec();
    frame.render_widget(Paragraph::new(visible), area);
}

/// Line count for the current width, used to clamp the scroll anchor. Must
/// agree with what `render` draws.
pub fn line_count(messages: &[Message], width: u16) -> usize {
    build_lines(messages, width as usize).len()
}

fn build_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for message in messages {
        lines.push(header_line(message));
        for wrapped in wrap_text(&sanitize_for_display(&message.content), width) {
            lines.push(Line::from(wrapped));
        }
        lines.push(Line::default());
    }
    lines
}

fn header_line(message: &Message) -> Line<'static> {
    let (label, color) = match message.role {
        Role::User => ("You", Color::Cyan),
        Role::Assistant => ("Synapse", Color::Green),
    };
    Line::from(vec![
        Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" · {}", message.timestamp.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Greedy word wrap by display width. Words longer than the width are broken
/// mid-word rather than overflowing.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    for raw_line in text.split('\n') {
        if raw_line.is_empty() {
            wrapped.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut current_width = 0;
        for word in raw_line.split(' ') {
            let word_width = display_width(word);
            let separator = usize::from(!current.is_empty());
            if current_width + separator + word_width <= width {
                if separator == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += separator + word_width;
                continue;
            }
            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
            } else {
                current_width = break_long_word(word, width, &mut wrapped, &mut current);
            }
        }
        wrapped.push(current);
    }
    wrapped
}

fn break_long_word(
    word: &str,
    width: usize,
    wrapped: &mut Vec<String>,
    current: &mut String,
) -> usize {
    let mut current_width = 0;
    for c in word.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if current_width + w > width {
            wrapped.push(std::mem::take(current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    current_width
}

fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .sum()
}
