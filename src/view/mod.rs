//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod form;
mod help;
mod layout;
mod lists;
mod prompt;
mod results;
mod search_input;
mod styles;

pub use help::render_help_overlay;
pub use layout::{calculate_areas, render_layout, ScreenAreas};
pub use search_input::SearchBar;
pub use styles::{ColorConfig, Palette};

use crate::client::{DispatchMode, Dispatcher, HttpBackend, SearchBackend};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::export::Exporter;
use crate::model::{AppError, RequestError};
use crate::state::{detect_click, AppState, Effect, FocusPane, HitMap};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Backend could not be built
    #[error("Backend error: {0}")]
    Backend(#[from] RequestError),
}

impl From<TuiError> for AppError {
    fn from(error: TuiError) -> Self {
        match error {
            TuiError::Io(e) => AppError::Terminal(e),
            TuiError::Backend(e) => AppError::Client(e),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    dispatcher: Dispatcher,
    exporter: Exporter,
    palette: Palette,
    /// Where clickable things were drawn last frame
    hit_map: HitMap,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    /// `params` is an optional `--params` query string restoring the form.
    pub fn new(
        config: &ResolvedConfig,
        backend: Arc<dyn SearchBackend>,
        params: Option<&str>,
        palette: Palette,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::assemble(
            terminal,
            config,
            Dispatcher::new(backend, DispatchMode::Threaded),
            params,
            palette,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C)
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Tick for collecting backend completions
        const TICK_INTERVAL: Duration = Duration::from_millis(100);

        self.draw()?;

        loop {
            let mut dirty = false;

            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => dirty = self.handle_mouse(mouse),
                    Event::Resize(..) => dirty = true,
                    _ => {}
                }
            }

            let (changed, quit) = self.pump_completions();
            if quit {
                return Ok(());
            }

            if dirty || changed {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn assemble(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        mut dispatcher: Dispatcher,
        params: Option<&str>,
        palette: Palette,
    ) -> Self {
        let mut app_state = AppState::new(config.page_size, config.document.clone());
        if let Some(params) = params {
            if !app_state.apply_params(params) {
                debug!(params, "ignoring incomplete --params");
            }
        }
        dispatcher.dispatch_all(
            app_state
                .startup_effects()
                .into_iter()
                .filter_map(|effect| match effect {
                    Effect::Request(request) => Some(request),
                    _ => None,
                }),
        );

        let exporter = Exporter::new(config.download_dir.clone(), config.session_export_format);
        info!(
            download_dir = %exporter.download_dir().display(),
            format = ?exporter.format(),
            "exports configured"
        );

        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            dispatcher,
            exporter,
            palette,
            hit_map: HitMap::default(),
        }
    }

    /// Deliver finished requests to the state.
    ///
    /// Returns whether anything arrived and whether an effect asked to quit.
    fn pump_completions(&mut self) -> (bool, bool) {
        let completions = self.dispatcher.drain();
        let changed = !completions.is_empty();
        if changed {
            debug!(
                delivered = completions.len(),
                in_flight = self.dispatcher.in_flight(),
                "completions drained"
            );
        }
        let mut quit = false;
        for completion in completions {
            let effects = self.app_state.apply_completion(completion);
            quit |= self.run_effects(effects);
        }
        (changed, quit)
    }

    /// Execute effects returned by the state. Returns true on quit.
    fn run_effects(&mut self, effects: Vec<Effect>) -> bool {
        for effect in effects {
            match effect {
                Effect::Request(request) => self.dispatcher.dispatch(request),
                Effect::ExportSession => {
                    let result = self.exporter.export_session(&mut self.app_state.capture);
                    self.app_state.on_session_exported(result);
                }
                Effect::ExportFavorite(favorite) => {
                    let result = self.exporter.export_favorite(&favorite);
                    self.app_state.on_favorite_exported(result);
                }
                Effect::Quit => {
                    info!("quit requested");
                    return true;
                }
            }
        }
        false
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let action = self.key_bindings.get(key);

        // Export works from anywhere, even over the prompt or while typing
        if let Some(action) = action.filter(|a| a.is_global_priority()) {
            let effects = self.app_state.handle_action(action);
            return self.run_effects(effects);
        }

        if self.app_state.prompt.is_some() {
            let effects = self.app_state.handle_prompt_key(key);
            return self.run_effects(effects);
        }

        if key.code == KeyCode::Esc && self.app_state.help_visible {
            self.app_state.help_visible = false;
            return false;
        }

        let consumed = match self.app_state.focus {
            FocusPane::Search => self.app_state.edit_search(key),
            FocusPane::Form => self.app_state.edit_form(key),
            _ => false,
        };
        if consumed {
            return false;
        }

        match action {
            Some(action) => {
                let effects = self.app_state.handle_action(action);
                self.run_effects(effects)
            }
            None => false,
        }
    }

    /// Handle a single mouse event. Returns whether a redraw is needed.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.app_state.prompt.is_some() {
                    return false;
                }
                let target = detect_click(&self.hit_map, mouse.column, mouse.row);
                let effects = self.app_state.handle_mouse_down(target);
                self.run_effects(effects);
                true
            }
            MouseEventKind::Up(MouseButton::Left) => self.app_state.release_pointer(),
            _ => false,
        }
    }

    /// Render the current frame and remember the click geometry.
    fn draw(&mut self) -> Result<(), TuiError> {
        let palette = self.palette;
        let state = &self.app_state;
        let mut hit_map = HitMap::default();
        self.terminal.draw(|frame| {
            hit_map = render_layout(frame, state, palette);
        })?;
        self.hit_map = hit_map;
        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// App over `terminal` whose requests run inline against `backend`.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        backend: Arc<dyn SearchBackend>,
        params: Option<&str>,
    ) -> Self {
        Self::assemble(
            terminal,
            config,
            Dispatcher::new(backend, DispatchMode::Inline),
            params,
            Palette::new(ColorConfig::enabled()),
        )
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_app(
    config: &ResolvedConfig,
    params: Option<&str>,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let backend = HttpBackend::new(
        &config.server_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    info!(server = %backend.base_url(), "starting");

    let mut app = TuiApp::new(config, Arc::new(backend), params, Palette::new(colors))?;
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
