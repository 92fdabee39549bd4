mod embed;
mod feed_panel;
mod status_bar;

pub use embed::{EmbedRenderer, TimelinePlaceholder};
pub use feed_panel::FeedPanelWidget;
pub use status_bar::StatusBarWidget;
