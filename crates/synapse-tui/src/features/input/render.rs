//! Renders the input box and positions the terminal cursor.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use super::state::InputState;

pub fn render(frame: &mut Frame, area: Rect, input: &InputState, is_loading: bool) {
    let border_style = if is_loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Blue)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Describe the role ");

    let inner = block.inner(area);
    let inner_width = inner.width as usize;

    let cursor_column = column_of(input.text(), input.cursor());
    // Scroll the buffer horizontally so the cursor stays visible.
    let scroll = cursor_column.saturating_sub(inner_width.saturating_sub(1));

    let paragraph = Paragraph::new(Line::from(input.text()))
        .block(block)
        .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)));
    frame.render_widget(paragraph, area);

    if !is_loading {
        let x = inner.x + u16::try_from(cursor_column - scroll).unwrap_or(0);
        frame.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

fn column_of(text: &str, cursor: usize) -> usize {
    text.chars()
        .take(cursor)
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .sum()
}
