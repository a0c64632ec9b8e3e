//! Key handling for the input editor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::InputState;

struct Modifiers {
    ctrl: bool,
    alt: bool,
    shift: bool,
}

impl Modifiers {
    fn from_key(key: &KeyEvent) -> Self {
        Self {
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            alt: key.modifiers.contains(KeyModifiers::ALT),
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
        }
    }

    fn none(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }

    fn only_ctrl(&self) -> bool {
        self.ctrl && !self.alt && !self.shift
    }

    fn only_alt(&self) -> bool {
        self.alt && !self.ctrl && !self.shift
    }
}

/// Applies an editing key to the input buffer. Returns `false` when the key
/// is not an editing key so the caller can fall through to other handlers.
pub fn handle_key(input: &mut InputState, key: &KeyEvent) -> bool {
    let mods = Modifiers::from_key(key);
    match key.code {
        KeyCode::Char(c) if mods.none() || (mods.shift && !mods.ctrl && !mods.alt) => {
            input.insert_char(c);
            true
        }
        KeyCode::Char('a') if mods.only_ctrl() => {
            input.move_to_start();
            true
        }
        KeyCode::Char('e') if mods.only_ctrl() => {
            input.move_to_end();
            true
        }
        KeyCode::Char('u') if mods.only_ctrl() => {
            input.delete_to_start();
            true
        }
        KeyCode::Char('k') if mods.only_ctrl() => {
            input.delete_to_end();
            true
        }
        KeyCode::Char('w') if mods.only_ctrl() => {
            input.delete_word_left();
            true
        }
        KeyCode::Char('b') if mods.only_alt() => {
            input.move_word_left();
            true
        }
        KeyCode::Char('f') if mods.only_alt() => {
            input.move_word_right();
            true
        }
        KeyCode::Backspace if mods.only_ctrl() || mods.only_alt() => {
            input.delete_word_left();
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left if mods.only_ctrl() || mods.only_alt() => {
            input.move_word_left();
            true
        }
        KeyCode::Right if mods.only_ctrl() || mods.only_alt() => {
            input.move_word_right();
            true
        }
        KeyCode::Left => {
            input.move_left();
            true
        }
        KeyCode::Right => {
            input.move_right();
            true
        }
        KeyCode::Home => {
            input.move_to_start();
            true
        }
        KeyCode::End => {
            input.move_to_end();
            true
        }
        KeyCode::Up if mods.none() => input.navigate_history_up(),
        KeyCode::Down if mods.none() => input.navigate_history_down(),
        _ => false,
    }
}
