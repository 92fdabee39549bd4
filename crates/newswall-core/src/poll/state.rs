use crate::feed::ArticleSummary;

/// Observable phase of one panel.
///
/// Articles live inside `Ready`, so a panel can only show articles when its
/// most recent applied cycle succeeded. `Ready` with an empty list is the
/// distinct "no articles" outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPhase {
    Loading,
    Ready(Vec<ArticleSummary>),
    Failed(String),
}

impl FeedPhase {
    pub fn articles(&self) -> &[ArticleSummary] {
        match self {
            FeedPhase::Ready(articles) => articles,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FeedPhase::Loading)
    }
}

/// Per-panel fetch-cycle state machine.
///
/// Every cycle is tagged with a sequence number at issue time. Completions
/// are applied last-issued-wins: a completion is discarded when a newer
/// cycle has been issued since, so overlapping requests that resolve out of
/// issue order can never leave stale data on screen.
#[derive(Debug)]
pub struct PanelState {
    phase: FeedPhase,
    issued: u64,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            phase: FeedPhase::Loading,
            issued: 0,
        }
    }

    pub fn phase(&self) -> &FeedPhase {
        &self.phase
    }

    /// A cycle with sequence number `seq` was issued: re-enter `Loading`
    /// (articles cleared, error cleared). Stale start notifications that
    /// arrive after a newer cycle are ignored.
    pub fn begin(&mut self, seq: u64) {
        if seq <= self.issued {
            return;
        }
        self.issued = seq;
        self.phase = FeedPhase::Loading;
    }

    /// A cycle resolved. Returns whether the outcome was applied; `false`
    /// means it lost the last-issued-wins race and the phase is unchanged.
    pub fn complete(
        &mut self,
        seq: u64,
        outcome: Result<Vec<ArticleSummary>, String>,
    ) -> bool {
        if seq < self.issued {
            return false;
        }
        self.issued = seq;
        self.phase = match outcome {
            Ok(articles) => FeedPhase::Ready(articles),
            Err(message) => FeedPhase::Failed(message),
        };
        true
    }
}
