//! Archived-search picker.
//!
//! Lists archived sessions newest first with a type-to-filter line. Enter
//! loads the selected session, Delete (or Ctrl+D) removes it, Esc closes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use synapse_core::session::Session;

use crate::common::text::{format_relative, truncate_with_ellipsis};
use crate::state::TuiState;
use crate::toast::Toast;

use super::OverlayUpdate;

const MAX_VISIBLE_SESSIONS: usize = 10;

#[derive(Debug, Default)]
pub struct HistoryState {
    selected: usize,
    offset: usize,
    filter: String,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered<'a>(&self, sessions: &'a [Session]) -> Vec<&'a Session> {
        if self.filter.is_empty() {
            return sessions.iter().collect();
        }
        let needle = self.filter.to_lowercase();
        sessions
            .iter()
            .filter(|session| {
                session.title.to_lowercase().contains(&needle)
                    || session.last_message.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
            return;
        }
        self.selected = self.selected.min(len - 1);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        if self.selected >= self.offset + MAX_VISIBLE_SESSIONS {
            self.offset = self.selected + 1 - MAX_VISIBLE_SESSIONS;
        }
    }

    fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    fn move_down(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
            if self.selected >= self.offset + MAX_VISIBLE_SESSIONS {
                self.offset = self.selected + 1 - MAX_VISIBLE_SESSIONS;
            }
        }
    }

    pub fn handle_key(&mut self, tui: &mut TuiState, key: &KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let len = self.filtered(&tui.store.history).len();

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Up => {
                self.move_up();
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                self.move_down(len);
                OverlayUpdate::stay()
            }
            KeyCode::Enter => self.load_selected(tui),
            KeyCode::Delete => self.delete_selected(tui),
            KeyCode::Char('d') if ctrl => self.delete_selected(tui),
            KeyCode::Char('u') if ctrl => {
                self.filter.clear();
                self.clamp_selection(self.filtered(&tui.store.history).len());
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.clamp_selection(self.filtered(&tui.store.history).len());
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.filter.push(c);
                self.selected = 0;
                self.offset = 0;
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    fn selected_id(&self, tui: &TuiState) -> Option<String> {
        self.filtered(&tui.store.history)
            .get(self.selected)
            .map(|session| session.id.clone())
    }

    fn load_selected(&self, tui: &mut TuiState) -> OverlayUpdate {
        let Some(id) = self.selected_id(tui) else {
            return OverlayUpdate::stay();
        };
        if tui.is_loading() {
            tui.toast = Some(Toast::info(
                "Search in progress",
                "Wait for the current search to finish first",
            ));
            return OverlayUpdate::stay();
        }
        if tui.store.load_session(&id) {
            tui.input.clear();
            tui.transcript.scroll_to_bottom();
        }
        OverlayUpdate::close()
    }

    fn delete_selected(&mut self, tui: &mut TuiState) -> OverlayUpdate {
        let Some(id) = self.selected_id(tui) else {
            return OverlayUpdate::stay();
        };
        if tui.store.delete_session(&id) {
            tracing::debug!(session_id = %id, "session deleted from picker");
        }
        self.clamp_selection(self.filtered(&tui.store.history).len());
        OverlayUpdate::stay()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let sessions = self.filtered(&tui.store.history);
        let visible = sessions.len().min(MAX_VISIBLE_SESSIONS);

        let width = area.width.saturating_sub(8).min(72).max(30);
        // Rows plus borders, filter line, and an empty-state line.
        let height = u16::try_from(visible.max(1))
            .unwrap_or(u16::MAX)
            .saturating_add(3)
            .min(area.height.saturating_sub(2));
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        let mut lines: Vec<Line> = Vec::new();
        if sessions.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No archived searches",
                Style::default().fg(Color::DarkGray),
            )));
        }
        let row_width = popup.width.saturating_sub(4) as usize;
        for (row, session) in sessions
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(MAX_VISIBLE_SESSIONS)
        {
            lines.push(session_row(session, row == self.selected, row_width));
        }
        lines.push(filter_line(&self.filter));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Previous searches ");
        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn session_row(session: &Session, selected: bool, width: usize) -> Line<'static> {
    let marker = if selected { "› " } else { "  " };
    let meta = format!(
        " · {} · {} · {} msgs",
        session.status.label(),
        format_relative(session.timestamp),
        session.message_count,
    );
    let title_budget = width.saturating_sub(meta.len() + marker.len()).max(8);
    let title = truncate_with_ellipsis(&session.title, title_budget);

    let title_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(marker.to_string(), title_style),
        Span::styled(title, title_style),
        Span::styled(meta, Style::default().fg(Color::DarkGray)),
    ])
}

fn filter_line(filter: &str) -> Line<'static> {
    if filter.is_empty() {
        Line::from(Span::styled(
            "  type to filter · Enter load · Del delete · Esc close",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled("  filter: ", Style::default().fg(Color::DarkGray)),
            Span::styled(filter.to_string(), Style::default().fg(Color::Yellow)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use synapse_core::session::SessionStore;

    use crate::overlays::OverlayTransition;
    use crate::state::TuiState;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with_history(titles: &[&str]) -> TuiState {
        let mut store = SessionStore::new("Hello");
        for title in titles {
            store.append_user_message(title);
            store.complete_with_assistant_reply("done");
            store.start_new_search();
        }
        TuiState::new(store)
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut picker = HistoryState::new();

        picker.move_up();
        assert_eq!(picker.selected, 0);
        picker.move_down(3);
        picker.move_down(3);
        picker.move_down(3);
        assert_eq!(picker.selected, 2);
    }

    #[test]
    fn filter_narrows_by_title() {
        let tui = state_with_history(&["rust backend", "python data", "rust embedded"]);
        let mut picker = HistoryState::new();
        picker.filter = "rust".to_string();
        let filtered = picker.filtered(&tui.store.history);
        assert_eq!(filtered.len(), 2);
        picker.clamp_selection(filtered.len());
    }

    #[test]
    fn enter_loads_selected_session_and_closes() {
        let mut tui = state_with_history(&["alpha", "beta"]);
        let mut picker = HistoryState::new();

        let update = picker.handle_key(&mut tui, &key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Close));
        // Newest first, so the top row is the most recent archive.
        assert_eq!(tui.store.conversation.messages[1].content, "beta");
    }

    #[test]
    fn enter_while_loading_keeps_overlay_and_warns() {
        let mut tui = state_with_history(&["alpha"]);
        tui.store.append_user_message("in flight");
        let mut picker = HistoryState::new();

        let update = picker.handle_key(&mut tui, &key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert!(tui.toast.is_some());
        assert!(tui.is_loading());
    }

    #[test]
    fn delete_removes_selected_and_reclamps() {
        let mut tui = state_with_history(&["alpha", "beta"]);
        let mut picker = HistoryState::new();
        picker.move_down(2);

        let update = picker.handle_key(&mut tui, &key(KeyCode::Delete));
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert_eq!(tui.store.history.len(), 1);
        assert_eq!(picker.selected, 0);
    }

    #[test]
    fn typed_characters_build_the_filter() {
        let mut tui = state_with_history(&["alpha", "beta"]);
        let mut picker = HistoryState::new();
        picker.handle_key(&mut tui, &key(KeyCode::Char('b')));
        picker.handle_key(&mut tui, &key(KeyCode::Char('e')));
        assert_eq!(picker.filter, "be");
        assert_eq!(picker.filtered(&tui.store.history).len(), 1);

        picker.handle_key(&mut tui, &key(KeyCode::Backspace));
        assert_eq!(picker.filter, "b");
    }

    #[test]
    fn esc_closes_without_touching_state() {
        let mut tui = state_with_history(&["alpha"]);
        let mut picker = HistoryState::new();
        let update = picker.handle_key(&mut tui, &key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert_eq!(tui.store.history.len(), 1);
    }
}
