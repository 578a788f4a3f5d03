//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Text typed into the search input or an open prompt never reaches these
/// bindings, except for [`KeyAction::is_global_priority`] actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Terminals disagree on whether shifted symbols such as `?` or `{`
    /// carry the SHIFT modifier, so those are also tried without it.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let key = KeyEvent::new(key.code, key.modifiers);
        if let Some(action) = self.bindings.get(&key) {
            return Some(*action);
        }
        match key.code {
            KeyCode::Char(c)
                if !c.is_ascii_alphabetic() && key.modifiers.contains(KeyModifiers::SHIFT) =>
            {
                let unshifted = KeyEvent::new(key.code, key.modifiers - KeyModifiers::SHIFT);
                self.bindings.get(&unshifted).copied()
            }
            _ => None,
        }
    }
}

fn bind(
    bindings: &mut HashMap<KeyEvent, KeyAction>,
    code: KeyCode,
    modifiers: KeyModifiers,
    action: KeyAction,
) {
    bindings.insert(KeyEvent::new(code, modifiers), action);
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut b = HashMap::new();
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        // Focus
        bind(&mut b, KeyCode::Char('b'), ctrl, KeyAction::FocusSearch);
        bind(&mut b, KeyCode::Tab, none, KeyAction::CycleFocus);
        bind(&mut b, KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::CycleFocusBack);

        // Directional
        bind(&mut b, KeyCode::Up, none, KeyAction::MoveUp);
        bind(&mut b, KeyCode::Char('k'), none, KeyAction::MoveUp);
        bind(&mut b, KeyCode::Down, none, KeyAction::MoveDown);
        bind(&mut b, KeyCode::Char('j'), none, KeyAction::MoveDown);
        bind(&mut b, KeyCode::Left, none, KeyAction::MoveLeft);
        bind(&mut b, KeyCode::Char('h'), none, KeyAction::MoveLeft);
        bind(&mut b, KeyCode::Right, none, KeyAction::MoveRight);
        bind(&mut b, KeyCode::Char('l'), none, KeyAction::MoveRight);
        bind(&mut b, KeyCode::Enter, none, KeyAction::Activate);
        bind(&mut b, KeyCode::Char('d'), none, KeyAction::Delete);
        bind(&mut b, KeyCode::Delete, none, KeyAction::Delete);

        // Pagination
        bind(&mut b, KeyCode::Home, none, KeyAction::FirstPage);
        bind(&mut b, KeyCode::Char('{'), none, KeyAction::FirstPage);
        bind(&mut b, KeyCode::PageUp, none, KeyAction::PrevPage);
        bind(&mut b, KeyCode::Char('['), none, KeyAction::PrevPage);
        bind(&mut b, KeyCode::PageDown, none, KeyAction::NextPage);
        bind(&mut b, KeyCode::Char(']'), none, KeyAction::NextPage);
        bind(&mut b, KeyCode::End, none, KeyAction::LastPage);
        bind(&mut b, KeyCode::Char('}'), none, KeyAction::LastPage);

        // Capture and export. Legacy terminals report Ctrl+Shift+S as Ctrl+S.
        bind(&mut b, KeyCode::Char('c'), none, KeyAction::CaptureColumn);
        bind(
            &mut b,
            KeyCode::Char('S'),
            ctrl | KeyModifiers::SHIFT,
            KeyAction::ExportSession,
        );
        bind(&mut b, KeyCode::Char('s'), ctrl, KeyAction::ExportSession);
        bind(&mut b, KeyCode::Char('s'), none, KeyAction::SaveFavorite);

        // Application controls
        bind(&mut b, KeyCode::Char('r'), none, KeyAction::Refresh);
        bind(&mut b, KeyCode::Char('?'), none, KeyAction::Help);
        bind(&mut b, KeyCode::Char('q'), none, KeyAction::Quit);
        bind(&mut b, KeyCode::Char('c'), ctrl, KeyAction::Quit);

        Self { bindings: b }
    }
}
