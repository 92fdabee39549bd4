use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let focus_label = app
            .focused_panel()
            .map(|p| p.config.label.as_str())
            .unwrap_or("-");
        let total_articles: usize = app.panels.iter().map(|p| p.articles().len()).sum();

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | Panels: {} | Headlines: {}",
                focus_label,
                app.panels.len(),
                total_articles
            )
        };

        let help_hint = " q:quit tab:panels j/k:move o:open r:refresh ";

        let status_span = Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg1));
        let hint_span = Span::styled(help_hint, Style::default().fg(theme.grey).bg(theme.bg1));

        // Pad by rendered width, not byte length; article titles flowing
        // into status messages can be non-ASCII.
        let padding_len =
            (area.width as usize).saturating_sub(status_span.width() + hint_span.width());

        let line = Line::from(vec![
            status_span,
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg1)),
            hint_span,
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
