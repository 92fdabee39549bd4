use std::sync::Arc;

use newswall_core::poll::{PanelEvent, PanelState, ResyncHandle};
use newswall_core::{AppConfig, ArticleSummary, PanelConfig};

use crate::theme::Theme;

/// One dashboard panel: immutable binding plus its fetch-cycle state.
pub struct PanelView {
    pub config: PanelConfig,
    pub state: PanelState,
    /// Cursor within the article list (focused panel only)
    pub selected: usize,
}

impl PanelView {
    fn new(config: PanelConfig) -> Self {
        Self {
            config,
            state: PanelState::new(),
            selected: 0,
        }
    }

    pub fn articles(&self) -> &[ArticleSummary] {
        self.state.phase().articles()
    }

    fn clamp_selection(&mut self) {
        let len = self.articles().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Fixed panel set, in display order
    pub panels: Vec<PanelView>,
    /// Index of the focused panel
    pub focus: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message shown in the status bar
    pub status_message: Option<String>,
    /// Trigger for forcing all panels to re-fetch
    pub resync: ResyncHandle,
    /// Color palette
    pub theme: Theme,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        panels: Vec<PanelConfig>,
        resync: ResyncHandle,
        theme: Theme,
    ) -> Self {
        Self {
            config,
            panels: panels.into_iter().map(PanelView::new).collect(),
            focus: 0,
            should_quit: false,
            status_message: None,
            resync,
            theme,
        }
    }

    /// Apply a poller event to the owning panel's state machine. Stale
    /// completions are discarded by the state layer; the cursor is clamped
    /// whenever a new article list lands.
    pub fn handle_panel_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::CycleStarted { panel, seq } => {
                if let Some(view) = self.panels.get_mut(panel) {
                    view.state.begin(seq);
                }
            }
            PanelEvent::CycleFinished {
                panel,
                seq,
                outcome,
            } => {
                if let Some(view) = self.panels.get_mut(panel) {
                    let applied = view
                        .state
                        .complete(seq, outcome.map_err(|e| e.to_string()));
                    if applied {
                        view.clamp_selection();
                    }
                }
            }
        }
    }

    pub fn focused_panel(&self) -> Option<&PanelView> {
        self.panels.get(self.focus)
    }

    fn focused_panel_mut(&mut self) -> Option<&mut PanelView> {
        self.panels.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.panels.is_empty() {
            self.focus = (self.focus + 1) % self.panels.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.panels.is_empty() {
            self.focus = (self.focus + self.panels.len() - 1) % self.panels.len();
        }
    }

    pub fn move_down(&mut self) {
        if let Some(view) = self.focused_panel_mut() {
            let len = view.articles().len();
            if len > 0 && view.selected + 1 < len {
                view.selected += 1;
            }
        }
    }

    pub fn move_up(&mut self) {
        if let Some(view) = self.focused_panel_mut() {
            view.selected = view.selected.saturating_sub(1);
        }
    }

    /// The focused panel's selected article, if any is shown
    pub fn selected_article(&self) -> Option<&ArticleSummary> {
        let view = self.focused_panel()?;
        view.articles().get(view.selected)
    }

    /// Open the selected article in the system browser
    pub fn open_selected(&mut self) {
        let Some(article) = self.selected_article() else {
            return;
        };
        let link = article.link.clone();
        let title = article.title.clone();

        match open::that(&link) {
            Ok(()) => {
                tracing::info!("Opened article in browser: {}", link);
                self.status_message = Some(format!("Opened: {}", title));
            }
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", link, e);
                self.status_message = Some(format!("Failed to open browser: {}", e));
            }
        }
    }

    /// Force an immediate fetch cycle on every panel
    pub fn refresh_all(&mut self) {
        self.resync.trigger();
        self.status_message = Some("Refreshing all panels...".to_string());
    }
}
