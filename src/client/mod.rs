//! Backend client (impure shell).
//!
//! [`AppState`](crate::state::AppState) never performs I/O: it returns
//! [`Request`]s, the [`Dispatcher`] runs each one against a
//! [`SearchBackend`] on a short-lived worker thread, and the resulting
//! [`Completion`] is delivered back to the event loop over a channel.

use crate::model::{
    Favorite, FavoritesResponse, HistoryEntry, RequestError, SaveFavoriteRequest, SearchResponse,
};
use reqwest::blocking::{Client, Response};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Query parameters of a search request.
pub type SearchParams = Vec<(&'static str, String)>;

/// Operations offered by the search backend.
pub trait SearchBackend: Send + Sync {
    /// `GET /historial`.
    fn fetch_history(&self) -> Result<Vec<HistoryEntry>, RequestError>;
    /// `DELETE /historial?query=<query>`.
    fn delete_history(&self, query: &str) -> Result<(), RequestError>;
    /// `GET /favoritos`.
    fn fetch_favorites(&self) -> Result<Vec<Favorite>, RequestError>;
    /// `POST /favoritos`.
    fn save_favorite(&self, request: &SaveFavoriteRequest) -> Result<(), RequestError>;
    /// `DELETE /favoritos?nombre=<nombre>`.
    fn delete_favorite(&self, nombre: &str) -> Result<(), RequestError>;
    /// `GET /search`.
    fn search(&self, params: &SearchParams) -> Result<SearchResponse, RequestError>;
}

/// A unit of backend work requested by the state core.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Refresh the history panel.
    FetchHistory,
    /// Delete every history entry with this exact query.
    DeleteHistory {
        /// Delete key.
        query: String,
    },
    /// Refresh the favorites panel.
    FetchFavorites,
    /// Store a favorite.
    SaveFavorite(SaveFavoriteRequest),
    /// Delete a favorite by name.
    DeleteFavorite {
        /// Delete key.
        nombre: String,
    },
    /// Run a search.
    Search(SearchParams),
}

impl Request {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Request::FetchHistory => "fetch_history",
            Request::DeleteHistory { .. } => "delete_history",
            Request::FetchFavorites => "fetch_favorites",
            Request::SaveFavorite(_) => "save_favorite",
            Request::DeleteFavorite { .. } => "delete_favorite",
            Request::Search(_) => "search",
        }
    }
}

/// Outcome of a [`Request`], delivered back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// History fetched.
    History(Result<Vec<HistoryEntry>, RequestError>),
    /// History delete finished.
    HistoryDeleted {
        /// Key that was sent.
        query: String,
        /// Outcome.
        result: Result<(), RequestError>,
    },
    /// Favorites fetched.
    Favorites(Result<Vec<Favorite>, RequestError>),
    /// Favorite save finished.
    FavoriteSaved(Result<(), RequestError>),
    /// Favorite delete finished.
    FavoriteDeleted {
        /// Key that was sent.
        nombre: String,
        /// Outcome.
        result: Result<(), RequestError>,
    },
    /// Search finished.
    Search(Result<SearchResponse, RequestError>),
}

/// Run `request` against `backend`, blocking.
pub fn execute(backend: &dyn SearchBackend, request: Request) -> Completion {
    match request {
        Request::FetchHistory => Completion::History(backend.fetch_history()),
        Request::DeleteHistory { query } => {
            let result = backend.delete_history(&query);
            Completion::HistoryDeleted { query, result }
        }
        Request::FetchFavorites => Completion::Favorites(backend.fetch_favorites()),
        Request::SaveFavorite(body) => Completion::FavoriteSaved(backend.save_favorite(&body)),
        Request::DeleteFavorite { nombre } => {
            let result = backend.delete_favorite(&nombre);
            Completion::FavoriteDeleted { nombre, result }
        }
        Request::Search(params) => Completion::Search(backend.search(&params)),
    }
}

/// How the dispatcher runs requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// One worker thread per request.
    Threaded,
    /// On the caller's thread; completions are still queued and only seen on
    /// the next [`Dispatcher::drain`].
    Inline,
}

/// Runs requests and collects their completions.
pub struct Dispatcher {
    backend: Arc<dyn SearchBackend>,
    mode: DispatchMode,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    in_flight: usize,
}

impl Dispatcher {
    /// Dispatcher over `backend`.
    pub fn new(backend: Arc<dyn SearchBackend>, mode: DispatchMode) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend,
            mode,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Start `request`.
    pub fn dispatch(&mut self, request: Request) {
        debug!(request = request.name(), "dispatching");
        self.in_flight += 1;
        match self.mode {
            DispatchMode::Threaded => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                std::thread::spawn(move || {
                    let completion = execute(backend.as_ref(), request);
                    let _ = tx.send(completion);
                });
            }
            DispatchMode::Inline => {
                let completion = execute(self.backend.as_ref(), request);
                let _ = self.tx.send(completion);
            }
        }
    }

    /// Start every request, in order.
    pub fn dispatch_all(&mut self, requests: impl IntoIterator<Item = Request>) {
        for request in requests {
            self.dispatch(request);
        }
    }

    /// Completions that arrived since the last call, without blocking.
    pub fn drain(&mut self) -> Vec<Completion> {
        let completions: Vec<Completion> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(completions.len());
        completions
    }

    /// Requests started and not yet drained.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// [`SearchBackend`] speaking HTTP via a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Backend rooted at `server_url`, each request bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// [`RequestError::Network`] if the URL is invalid or the client cannot
    /// be built.
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let mut base = Url::parse(server_url)
            .map_err(|e| RequestError::Network(format!("invalid server url {server_url:?}: {e}")))?;
        // Endpoints are joined relative to the root, which needs a trailing slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("buscador/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base })
    }

    /// Server root.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        self.base
            .join(path)
            .map_err(|e| RequestError::Network(format!("invalid endpoint {path}: {e}")))
    }
}

fn check_status(response: Response) -> Result<Response, RequestError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(status = status.as_u16(), url = %response.url(), "backend returned error status");
        Err(RequestError::Server {
            status: status.as_u16(),
        })
    }
}

impl SearchBackend for HttpBackend {
    fn fetch_history(&self) -> Result<Vec<HistoryEntry>, RequestError> {
        let response = self.client.get(self.endpoint("historial")?).send()?;
        Ok(check_status(response)?.json()?)
    }

    fn delete_history(&self, query: &str) -> Result<(), RequestError> {
        let response = self
            .client
            .delete(self.endpoint("historial")?)
            .query(&[("query", query)])
            .send()?;
        check_status(response).map(drop)
    }

    fn fetch_favorites(&self) -> Result<Vec<Favorite>, RequestError> {
        let response = self.client.get(self.endpoint("favoritos")?).send()?;
        let body: FavoritesResponse = check_status(response)?.json()?;
        Ok(body.favoritos)
    }

    fn save_favorite(&self, request: &SaveFavoriteRequest) -> Result<(), RequestError> {
        let response = self
            .client
            .post(self.endpoint("favoritos")?)
            .json(request)
            .send()?;
        check_status(response).map(drop)
    }

    fn delete_favorite(&self, nombre: &str) -> Result<(), RequestError> {
        let response = self
            .client
            .delete(self.endpoint("favoritos")?)
            .query(&[("nombre", nombre)])
            .send()?;
        check_status(response).map(drop)
    }

    fn search(&self, params: &SearchParams) -> Result<SearchResponse, RequestError> {
        let response = self
            .client
            .get(self.endpoint("search")?)
            .query(params)
            .send()?;
        Ok(check_status(response)?.json()?)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
