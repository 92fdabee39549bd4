mod service;
mod state;

pub use service::{spawn_resync_timer, PanelEvent, PollerService, ResyncHandle};
pub use state::{FeedPhase, PanelState};
