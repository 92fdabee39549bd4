pub mod config;
pub mod error;
pub mod feed;
pub mod poll;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use feed::{ArticleSummary, HeadlineFetcher, PanelConfig};
pub use poll::{FeedPhase, PanelEvent, PanelState, PollerService, ResyncHandle};
