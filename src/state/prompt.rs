//! Modal text prompt.
//!
//! The prompt exists as `Option<PromptState>` on [`AppState`]: while `Some`
//! it owns keyboard input, and resolving it drops it, which ends that
//! ownership on both the confirm and the cancel path.
//!
//! [`AppState`]: crate::state::AppState

use crate::state::search_input::SearchInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the prompt's answer will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    /// Name for a new favorite.
    NameFavorite,
}

impl PromptPurpose {
    /// Title shown on the overlay.
    pub fn title(&self) -> &'static str {
        match self {
            PromptPurpose::NameFavorite => "Nombre del favorito",
        }
    }
}

/// How a prompt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Enter with non-blank input.
    Confirmed(String),
    /// Esc.
    Cancelled,
}

/// Result of feeding one key to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStep {
    /// Still open.
    Pending,
    /// Closed with an outcome; the caller must drop the prompt.
    Resolved(PromptOutcome),
}

/// An open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    purpose: PromptPurpose,
    input: SearchInput,
    invalid: bool,
}

impl PromptState {
    /// Empty prompt for `purpose`.
    pub fn new(purpose: PromptPurpose) -> Self {
        Self {
            purpose,
            input: SearchInput::default(),
            invalid: false,
        }
    }

    /// Purpose.
    pub fn purpose(&self) -> PromptPurpose {
        self.purpose
    }

    /// Entered text.
    pub fn input(&self) -> &SearchInput {
        &self.input
    }

    /// Whether the last confirm was rejected for blank input.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Feed a key.
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptStep {
        match key.code {
            KeyCode::Esc => PromptStep::Resolved(PromptOutcome::Cancelled),
            KeyCode::Enter => self.confirm(),
            KeyCode::Backspace => {
                self.input.backspace();
                PromptStep::Pending
            }
            KeyCode::Left => {
                self.input.cursor_left();
                PromptStep::Pending
            }
            KeyCode::Right => {
                self.input.cursor_right();
                PromptStep::Pending
            }
            KeyCode::Home => {
                self.input.cursor_home();
                PromptStep::Pending
            }
            KeyCode::End => {
                self.input.cursor_end();
                PromptStep::Pending
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert(ch);
                self.invalid = false;
                PromptStep::Pending
            }
            _ => PromptStep::Pending,
        }
    }

    /// Confirm action (Enter or the "Aceptar" button).
    ///
    /// Blank input flags the prompt and keeps it open.
    pub fn confirm(&mut self) -> PromptStep {
        if self.input.has_content() {
            PromptStep::Resolved(PromptOutcome::Confirmed(self.input.text().to_string()))
        } else {
            self.invalid = true;
            PromptStep::Pending
        }
    }
}
