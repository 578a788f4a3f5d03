//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod capture;
pub mod form;
pub mod mouse_handler;
pub mod pagination;
pub mod prompt;
pub mod remote_list;
pub mod search_input;
pub mod table_events;

// Re-export for convenience
pub use app_state::{AppState, Effect, FocusPane, StatusKind, StatusMessage};
pub use capture::{CaptureBuffer, CaptureOutcome, CapturedSet, HeldColumn, HoldState};
pub use form::{FieldVisibility, FormField, FormFilterState, FormSnapshot, WeightSlider};
pub use mouse_handler::{detect_click, HitMap, ListGeometry, MouseTarget};
pub use pagination::{PageControl, PaginationController, PaginationState};
pub use prompt::{PromptOutcome, PromptPurpose, PromptState, PromptStep};
pub use remote_list::{FavoritesPanel, HistoryPanel, ListStatus, RemoteList};
pub use search_input::SearchInput;
pub use table_events::{TableGeneration, TableReplaced, TableSubscriber};
