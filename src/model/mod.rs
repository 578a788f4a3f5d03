//! Domain model types (pure).
//!
//! Wire shapes exchanged with the search backend, plus the error taxonomy.

pub mod error;
pub mod favorite;
pub mod history;
pub mod key_action;
pub mod table;

// Re-export for convenience
pub use error::{AppError, ExportError, PayloadError, RequestError};
pub use favorite::{
    sanitize_favorite_name, Favorite, FavoritesResponse, SaveFavoriteRequest,
    FALLBACK_FAVORITE_NAME,
};
pub use history::{HistoryEntry, SearchStrategy, Sex, UnknownStrategy};
pub use key_action::KeyAction;
pub use table::{ResultTable, SearchResponse};
