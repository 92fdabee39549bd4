use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use tokio::sync::{mpsc, watch};

use newswall_core::poll::{spawn_resync_timer, PanelEvent, PollerService, ResyncHandle};
use newswall_core::AppConfig;
use newswall_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    widgets::{EmbedRenderer, FeedPanelWidget, StatusBarWidget, TimelinePlaceholder},
    Theme,
};

/// Panels per grid row
const PANELS_PER_ROW: usize = 3;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let panels = config.panel_configs()?;

    // Wiring: poller events in, shutdown and resync triggers out.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<PanelEvent>();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (resync, resync_rx) = ResyncHandle::new();

    let poller = PollerService::new(&config, panels.clone(), event_tx)?;
    let poller_handles = poller.spawn(shutdown_rx.clone(), resync_rx);

    // Optional synchronized refresh of every panel on top of the
    // independent per-panel schedules.
    let resync_timer = if config.sync.full_resync_interval_secs > 0 {
        Some(spawn_resync_timer(
            resync.clone(),
            Duration::from_secs(config.sync.full_resync_interval_secs),
            shutdown_rx.clone(),
        ))
    } else {
        None
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Newswall"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let embed: Box<dyn EmbedRenderer> = Box::new(TimelinePlaceholder::new(theme.clone()));
    let mut app = App::new(Arc::clone(&config), panels, resync, theme);
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    let result = main_loop(
        &mut terminal,
        &mut app,
        &event_handler,
        &mut event_rx,
        embed.as_ref(),
    );

    // Deactivation: stop the schedules first so no state transition can
    // land on a torn-down UI, then restore the terminal.
    let _ = shutdown_tx.send(true);
    if let Some(timer) = resync_timer {
        let _ = timer.await;
    }
    for handle in poller_handles {
        let _ = handle.await;
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    panel_events: &mut mpsc::UnboundedReceiver<PanelEvent>,
    embed: &dyn EmbedRenderer,
) -> Result<()> {
    loop {
        // Drain completed fetch cycles (non-blocking)
        while let Ok(event) = panel_events.try_recv() {
            app.handle_panel_event(event);
        }

        terminal.draw(|frame| draw(frame, app, embed))?;

        match event_handler.next()? {
            Some(AppEvent::Key(key)) => match handle_key_event(key) {
                Action::Quit => app.should_quit = true,
                Action::FocusNext => app.focus_next(),
                Action::FocusPrev => app.focus_prev(),
                Action::MoveDown => app.move_down(),
                Action::MoveUp => app.move_up(),
                Action::OpenInBrowser => app.open_selected(),
                Action::RefreshAll => app.refresh_all(),
                Action::None => {}
            },
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) | None => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &App, embed: &dyn EmbedRenderer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let show_embeds = app.config.embed.enabled && !app.config.embed.handles.is_empty();
    let (panel_area, embed_area) = if show_embeds {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(chunks[0]);
        (columns[0], Some(columns[1]))
    } else {
        (chunks[0], None)
    };

    draw_panel_grid(frame, panel_area, app);

    if let Some(area) = embed_area {
        draw_embeds(frame, area, app, embed);
    }

    StatusBarWidget::render(frame, chunks[1], app);
}

/// Static grid of panels, rows of up to three
fn draw_panel_grid(frame: &mut Frame, area: Rect, app: &App) {
    if app.panels.is_empty() {
        return;
    }

    let row_count = app.panels.len().div_ceil(PANELS_PER_ROW);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
        .split(area);

    let mut index = 0;
    for row in rows.iter() {
        let remaining = app.panels.len() - index;
        if remaining == 0 {
            break;
        }
        let count = remaining.min(PANELS_PER_ROW);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count as u32); count])
            .split(*row);
        for column in columns.iter() {
            FeedPanelWidget::render(frame, *column, app, index);
            index += 1;
        }
    }
}

fn draw_embeds(frame: &mut Frame, area: Rect, app: &App, embed: &dyn EmbedRenderer) {
    let handles = &app.config.embed.handles;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, handles.len() as u32); handles.len()])
        .split(area);

    for (handle, row) in handles.iter().zip(rows.iter()) {
        embed.render(frame, *row, handle);
    }
}
