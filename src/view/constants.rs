//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the search input widget in lines (border + content).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage of the left column (form, history, favorites).
pub const SIDEBAR_WIDTH_PERCENT: u16 = 35;

/// Narrowest a results column is drawn.
pub const COLUMN_MIN_WIDTH: u16 = 3;

/// Widest a results column is drawn; longer cells are cut.
pub const COLUMN_MAX_WIDTH: u16 = 30;

/// Blank columns between results columns.
pub const COLUMN_SPACING: u16 = 1;

/// Lines below the results rows: pagination bar and capture summary.
pub const RESULTS_FOOTER_HEIGHT: u16 = 2;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Width of the naming prompt in columns.
pub const PROMPT_WIDTH: u16 = 50;

/// Height of the naming prompt in lines.
pub const PROMPT_HEIGHT: u16 = 6;
