//! buscador
//!
//! Terminal client for a hybrid full-text/semantic search backend. Runs
//! searches with a filter form, keeps server-side query history and named
//! favorites, paginates results client-side, captures whole result columns
//! by holding their header and exports captures to CSV.
//!
//! Pure Core / Impure Shell: [`state`] holds every transition and returns
//! effects; [`client`], [`export`] and [`view`] perform them.

pub mod client;
pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;
