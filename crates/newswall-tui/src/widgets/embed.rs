use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// External timeline embeds are a capability of the hosting environment,
/// not of the dashboard. The composition layer injects a renderer; the
/// dashboard only reserves space for it and never depends on its success.
pub trait EmbedRenderer {
    fn render(&self, frame: &mut Frame, area: Rect, handle: &str);
}

/// Inert stand-in used when no real embed integration is wired up.
pub struct TimelinePlaceholder {
    theme: Theme,
}

impl TimelinePlaceholder {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl EmbedRenderer for TimelinePlaceholder {
    fn render(&self, frame: &mut Frame, area: Rect, handle: &str) {
        let block = Block::default()
            .title(format!(" @{} ", handle))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.grey))
            .style(Style::default().bg(self.theme.bg0));

        let text = Paragraph::new(vec![
            Line::from(format!("Timeline of @{}", handle)),
            Line::from("Rendered by an external widget when available."),
        ])
        .style(Style::default().fg(self.theme.grey))
        .block(block);

        frame.render_widget(text, area);
    }
}
