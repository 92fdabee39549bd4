use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use newswall_core::poll::FeedPhase;

use crate::app::App;

pub struct FeedPanelWidget;

impl FeedPanelWidget {
    /// Render one panel. The output is a pure function of the panel's
    /// current phase.
    pub fn render(frame: &mut Frame, area: Rect, app: &App, index: usize) {
        let Some(panel) = app.panels.get(index) else {
            return;
        };
        let is_focused = app.focus == index;
        let theme = &app.theme;
        let label = &panel.config.label;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey)
        };

        match panel.state.phase() {
            FeedPhase::Loading => {
                let block = Self::block(label, border_style, theme.bg0);
                let text = Paragraph::new(Self::loading_line(label))
                    .style(Style::default().fg(theme.warning))
                    .block(block);
                frame.render_widget(text, area);
            }
            FeedPhase::Failed(error) => {
                let block = Self::block(label, border_style, theme.bg0);
                let text = Paragraph::new(Self::error_line(label, error))
                    .style(Style::default().fg(theme.error))
                    .wrap(Wrap { trim: true })
                    .block(block);
                frame.render_widget(text, area);
            }
            FeedPhase::Ready(articles) if articles.is_empty() => {
                let block = Self::block(label, border_style, theme.bg0);
                let text = Paragraph::new(Self::empty_line(label))
                    .style(Style::default().fg(theme.grey))
                    .block(block);
                frame.render_widget(text, area);
            }
            FeedPhase::Ready(articles) => {
                let block = Self::block(&Self::heading(label), border_style, theme.bg0);

                let items: Vec<ListItem> = articles
                    .iter()
                    .enumerate()
                    .map(|(i, article)| {
                        let style = if is_focused && i == panel.selected {
                            Style::default().fg(theme.fg0).bg(theme.selection)
                        } else {
                            Style::default().fg(theme.fg1)
                        };

                        let mut spans = vec![Span::styled(article.title.clone(), style)];
                        if let Some(time) = article.published_label() {
                            spans.push(Span::styled(
                                format!("  {}", time),
                                Style::default().fg(theme.grey),
                            ));
                        }
                        ListItem::new(Line::from(spans))
                    })
                    .collect();

                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().bg(theme.selection));

                let mut state = ListState::default();
                if is_focused {
                    state.select(Some(panel.selected));
                }

                frame.render_stateful_widget(list, area, &mut state);
            }
        }
    }

    fn block(title: &str, border_style: Style, bg: ratatui::style::Color) -> Block<'static> {
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(bg))
    }

    pub fn heading(label: &str) -> String {
        format!("{} Latest News", label)
    }

    pub fn loading_line(label: &str) -> String {
        format!("Loading {} news...", label)
    }

    pub fn error_line(label: &str, error: &str) -> String {
        format!("Error loading {} news: {}", label, error)
    }

    pub fn empty_line(label: &str) -> String {
        format!("No {} news found.", label)
    }
}
