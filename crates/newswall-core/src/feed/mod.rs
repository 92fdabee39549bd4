mod fetcher;
mod models;

pub use fetcher::HeadlineFetcher;
pub use models::{ArticleSummary, HeadlineResponse, PanelConfig};
