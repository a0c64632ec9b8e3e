//! The reducer: every state change funnels through `update`.
//!
//! `update` mutates `AppState` and returns the effects the runtime should
//! execute. It never performs IO itself, which keeps the whole keymap
//! testable without a terminal.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use synapse_core::search::SearchRequest;

use crate::effects::UiEffect;
use crate::events::{SearchUiEvent, UiEvent};
use crate::features::input;
use crate::features::transcript::render as transcript_render;
use crate::overlays::{Overlay, OverlayTransition, history::HistoryState};
use crate::render;
use crate::state::{AppState, TuiState};
use crate::toast::Toast;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            handle_tick(&mut app.tui);
            Vec::new()
        }
        UiEvent::Frame { width, height } => {
            handle_frame(&mut app.tui, width, height);
            Vec::new()
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, &event),
        UiEvent::Search(event) => handle_search_event(&mut app.tui, event),
    }
}

fn handle_tick(tui: &mut TuiState) {
    tui.spinner_frame = tui.spinner_frame.wrapping_add(1);
    if tui.toast.as_ref().is_some_and(Toast::is_expired) {
        tui.toast = None;
    }
}

fn handle_frame(tui: &mut TuiState, width: u16, height: u16) {
    let (content_width, viewport_height) = render::transcript_geometry(width, height);
    let total = transcript_render::line_count(&tui.store.conversation.messages, content_width);
    tui.transcript
        .set_geometry(total, viewport_height as usize);
}

fn handle_search_event(tui: &mut TuiState, event: SearchUiEvent) -> Vec<UiEffect> {
    // A reply can land after the user started a new search or loaded another
    // session. The loading flag is only set for the conversation that asked.
    if !tui.is_loading() {
        tracing::debug!("dropping search result for an abandoned conversation");
        return Vec::new();
    }
    tui.search_started_at = None;
    match event {
        SearchUiEvent::Completed { reply, candidates } => {
            tracing::debug!(candidates = candidates.len(), "search completed");
            tui.store.complete_with_assistant_reply(&reply);
        }
        SearchUiEvent::Failed { error } => {
            tracing::warn!(error = %error, "search failed");
            tui.store.fail_request();
            tui.toast = Some(Toast::error("Search failed", error));
        }
    }
    Vec::new()
}

fn handle_terminal_event(app: &mut AppState, event: &Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if app.overlay.is_none() {
                // Keep pasted text on one line.
                let flattened = text.replace(['\n', '\r'], " ");
                app.tui.input.insert_str(&flattened);
                sync_draft(&mut app.tui);
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_key(app: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    if app.overlay.is_some() {
        return route_overlay_key(app, key);
    }
    let effects = handle_main_key(&mut app.tui, key)
        .or_else(|| handle_overlay_shortcuts(app, key))
        .unwrap_or_default();
    sync_draft(&mut app.tui);
    effects
}

fn route_overlay_key(app: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    let Some(overlay) = app.overlay.as_mut() else {
        return Vec::new();
    };
    let update = overlay.handle_key(&mut app.tui, key);
    if matches!(update.transition, OverlayTransition::Close) {
        app.overlay = None;
    }
    update.effects
}

fn handle_main_key(tui: &mut TuiState, key: &KeyEvent) -> Option<Vec<UiEffect>> {
    handle_control_keys(tui, key)
        .or_else(|| handle_scroll_keys(tui, key))
        .or_else(|| handle_submission(tui, key))
        .or_else(|| input::update::handle_key(&mut tui.input, key).then(Vec::new))
}

fn handle_control_keys(tui: &mut TuiState, key: &KeyEvent) -> Option<Vec<UiEffect>> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => {
            // First press clears the draft, second quits.
            if tui.input.is_empty() {
                Some(vec![UiEffect::Quit])
            } else {
                tui.input.clear();
                Some(Vec::new())
            }
        }
        KeyCode::Char('n') if ctrl => {
            tui.store.start_new_search();
            tui.input.clear();
            tui.transcript.scroll_to_bottom();
            tui.search_started_at = None;
            Some(Vec::new())
        }
        KeyCode::Char('l') if ctrl => {
            tui.store.clear_search();
            tui.input.clear();
            tui.transcript.scroll_to_bottom();
            tui.search_started_at = None;
            Some(Vec::new())
        }
        KeyCode::Esc => {
            if tui.toast.is_some() {
                tui.toast = None;
            } else {
                tui.input.clear();
            }
            Some(Vec::new())
        }
        _ => None,
    }
}

fn handle_overlay_shortcuts(app: &mut AppState, key: &KeyEvent) -> Option<Vec<UiEffect>> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('h') if ctrl => {
            app.overlay = Some(Overlay::History(HistoryState::new()));
            Some(Vec::new())
        }
        _ => None,
    }
}

fn handle_scroll_keys(tui: &mut TuiState, key: &KeyEvent) -> Option<Vec<UiEffect>> {
    match key.code {
        KeyCode::PageUp => {
            tui.transcript.page_up();
            Some(Vec::new())
        }
        KeyCode::PageDown => {
            tui.transcript.page_down();
            Some(Vec::new())
        }
        KeyCode::Home if key.modifiers.contains(KeyModifiers::CONTROL) => {
            tui.transcript.scroll_to_top();
            Some(Vec::new())
        }
        KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => {
            tui.transcript.scroll_to_bottom();
            Some(Vec::new())
        }
        _ => None,
    }
}

fn handle_submission(tui: &mut TuiState, key: &KeyEvent) -> Option<Vec<UiEffect>> {
    if key.code != KeyCode::Enter || !key.modifiers.is_empty() {
        return None;
    }
    let text = tui.input.text().to_string();
    if !tui.store.append_user_message(&text) {
        // Blank drafts and submissions during an in-flight search are
        // ignored without feedback.
        return Some(Vec::new());
    }
    tui.input.push_history(text.trim());
    tui.input.clear();
    tui.transcript.scroll_to_bottom();
    tui.search_started_at = Some(Instant::now());

    let request = SearchRequest {
        messages: tui.store.conversation.messages.clone(),
        query: text.trim().to_string(),
    };
    Some(vec![UiEffect::StartSearch { request }])
}

fn sync_draft(tui: &mut TuiState) {
    tui.store.conversation.input = tui.input.text().to_string();
}

#[cfg(test)]
mod tests {
    use synapse_core::chat::Role;
    use synapse_core::session::SessionStore;

    use super::*;

    fn app() -> AppState {
        AppState::new(SessionStore::new("How can I help with your search?"))
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_submits_and_starts_a_search() {
        let mut app = app();
        type_text(&mut app, "senior rust engineers");

        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::StartSearch { request }] if request.query == "senior rust engineers"
        ));
        assert!(app.tui.is_loading());
        assert_eq!(app.tui.store.conversation.messages.len(), 2);
        assert!(app.tui.input.is_empty());
    }

    #[test]
    fn enter_with_blank_draft_does_nothing() {
        let mut app = app();
        type_text(&mut app, "   ");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.tui.store.conversation.messages.len(), 1);
    }

    #[test]
    fn enter_during_inflight_search_is_ignored() {
        let mut app = app();
        type_text(&mut app, "first");
        update(&mut app, key(KeyCode::Enter));

        type_text(&mut app, "second");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.tui.store.conversation.messages.len(), 2);
        // The draft is kept so nothing typed is lost.
        assert_eq!(app.tui.input.text(), "second");
    }

    #[test]
    fn completed_search_appends_assistant_reply() {
        let mut app = app();
        type_text(&mut app, "find devops folks");
        update(&mut app, key(KeyCode::Enter));

        update(
            &mut app,
            UiEvent::Search(SearchUiEvent::Completed {
                reply: "Found 3 candidates".to_string(),
                candidates: Vec::new(),
            }),
        );
        assert!(!app.tui.is_loading());
        let last = app.tui.store.conversation.messages.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "Found 3 candidates");
    }

    #[test]
    fn failed_search_clears_loading_and_raises_toast() {
        let mut app = app();
        type_text(&mut app, "find devops folks");
        update(&mut app, key(KeyCode::Enter));

        update(
            &mut app,
            UiEvent::Search(SearchUiEvent::Failed {
                error: "connection refused".to_string(),
            }),
        );
        assert!(!app.tui.is_loading());
        assert!(app.tui.toast.is_some());
        // The user message stays so the query can be retried.
        assert_eq!(app.tui.store.conversation.messages.len(), 2);
    }

    #[test]
    fn stale_search_result_is_dropped() {
        let mut app = app();
        type_text(&mut app, "query");
        update(&mut app, key(KeyCode::Enter));
        update(&mut app, ctrl('n'));

        update(
            &mut app,
            UiEvent::Search(SearchUiEvent::Completed {
                reply: "late reply".to_string(),
                candidates: Vec::new(),
            }),
        );
        assert_eq!(app.tui.store.conversation.messages.len(), 1);
    }

    #[test]
    fn ctrl_n_archives_and_resets() {
        let mut app = app();
        type_text(&mut app, "query one");
        update(&mut app, key(KeyCode::Enter));
        update(
            &mut app,
            UiEvent::Search(SearchUiEvent::Completed {
                reply: "reply".to_string(),
                candidates: Vec::new(),
            }),
        );

        update(&mut app, ctrl('n'));
        assert_eq!(app.tui.store.history.len(), 1);
        assert_eq!(app.tui.store.conversation.messages.len(), 1);
    }

    #[test]
    fn ctrl_l_resets_without_archiving() {
        let mut app = app();
        type_text(&mut app, "query one");
        update(&mut app, key(KeyCode::Enter));
        update(
            &mut app,
            UiEvent::Search(SearchUiEvent::Completed {
                reply: "reply".to_string(),
                candidates: Vec::new(),
            }),
        );

        update(&mut app, ctrl('l'));
        assert!(app.tui.store.history.is_empty());
        assert_eq!(app.tui.store.conversation.messages.len(), 1);
    }

    #[test]
    fn ctrl_c_clears_draft_then_quits() {
        let mut app = app();
        type_text(&mut app, "half a thought");

        let effects = update(&mut app, ctrl('c'));
        assert!(effects.is_empty());
        assert!(app.tui.input.is_empty());

        let effects = update(&mut app, ctrl('c'));
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn ctrl_h_opens_history_overlay_and_esc_closes_it() {
        let mut app = app();
        update(&mut app, ctrl('h'));
        assert!(app.overlay.is_some());

        update(&mut app, key(KeyCode::Esc));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn esc_dismisses_toast_before_clearing_input() {
        let mut app = app();
        type_text(&mut app, "draft");
        app.tui.toast = Some(Toast::error("Search failed", "boom"));

        update(&mut app, key(KeyCode::Esc));
        assert!(app.tui.toast.is_none());
        assert_eq!(app.tui.input.text(), "draft");

        update(&mut app, key(KeyCode::Esc));
        assert!(app.tui.input.is_empty());
    }

    #[test]
    fn typed_keys_mirror_into_the_conversation_draft() {
        let mut app = app();
        type_text(&mut app, "abc");
        assert_eq!(app.tui.store.conversation.input, "abc");
    }

    #[test]
    fn tick_expires_nothing_while_toast_is_fresh() {
        let mut app = app();
        app.tui.toast = Some(Toast::info("hi", "there"));
        update(&mut app, UiEvent::Tick);
        assert!(app.tui.toast.is_some());
        assert_eq!(app.tui.spinner_frame, 1);
    }

    #[test]
    fn submission_is_recorded_in_input_history() {
        let mut app = app();
        type_text(&mut app, "kotlin devs");
        update(&mut app, key(KeyCode::Enter));
        update(
            &mut app,
            UiEvent::Search(SearchUiEvent::Completed {
                reply: "reply".to_string(),
                candidates: Vec::new(),
            }),
        );

        update(&mut app, key(KeyCode::Up));
        assert_eq!(app.tui.input.text(), "kotlin devs");
    }
}
