use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::feed::{ArticleSummary, HeadlineFetcher, PanelConfig};
use crate::Result;

/// Events emitted by the poller to notify the UI of panel transitions
#[derive(Debug)]
pub enum PanelEvent {
    /// A fetch cycle was issued; the panel re-enters Loading
    CycleStarted { panel: usize, seq: u64 },
    /// A fetch cycle resolved, successfully or not
    CycleFinished {
        panel: usize,
        seq: u64,
        outcome: Result<Vec<ArticleSummary>>,
    },
}

/// Shared trigger that forces every panel to start a fresh cycle now.
///
/// This replaces whole-host reloads as the "resynchronize everything"
/// mechanism: the composition layer bumps the generation counter and each
/// panel task reacts with an immediate fetch cycle on its own schedule.
#[derive(Clone)]
pub struct ResyncHandle {
    tx: Arc<watch::Sender<u64>>,
}

impl ResyncHandle {
    pub fn new() -> (Self, watch::Receiver<u64>) {
        let (tx, rx) = watch::channel(0);
        (Self { tx: Arc::new(tx) }, rx)
    }

    pub fn trigger(&self) {
        self.tx.send_modify(|generation| *generation += 1);
    }
}

/// Periodic full resynchronization of all panels.
///
/// Disabled unless configured; panels already poll independently, this only
/// adds a synchronized "refresh everything together" cadence on top.
pub fn spawn_resync_timer(
    handle: ResyncHandle,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick fires immediately; skip it, panels already fetch
        // on activation.
        interval.tick().await;

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    debug!("Scheduled full resync");
                    handle.trigger();
                }
            }
        }
    })
}

/// Background service that runs one polling task per panel.
///
/// Each panel owns an independent timer: a fetch cycle on activation, then
/// one per tick. Cycles are issued without awaiting the previous one, so a
/// slow response never delays the schedule; the sequence numbers carried on
/// events let the state layer apply completions last-issued-wins.
pub struct PollerService {
    panels: Vec<PanelConfig>,
    fetcher: Arc<HeadlineFetcher>,
    poll_interval: Duration,
    event_tx: mpsc::UnboundedSender<PanelEvent>,
}

impl PollerService {
    pub fn new(
        config: &AppConfig,
        panels: Vec<PanelConfig>,
        event_tx: mpsc::UnboundedSender<PanelEvent>,
    ) -> Result<Self> {
        Ok(Self {
            panels,
            fetcher: Arc::new(HeadlineFetcher::new(config)?),
            poll_interval: Duration::from_secs(config.sync.poll_interval_secs.max(1)),
            event_tx,
        })
    }

    /// Spawn the per-panel polling tasks. Tasks exit on shutdown; in-flight
    /// requests are aborted at that point, so no event is emitted after
    /// deactivation.
    pub fn spawn(
        self,
        shutdown: watch::Receiver<bool>,
        resync: watch::Receiver<u64>,
    ) -> Vec<JoinHandle<()>> {
        info!(
            "Poller started: {} panels, interval {}s",
            self.panels.len(),
            self.poll_interval.as_secs()
        );

        self.panels
            .into_iter()
            .enumerate()
            .map(|(index, panel)| {
                tokio::spawn(poll_panel(
                    index,
                    panel,
                    Arc::clone(&self.fetcher),
                    self.poll_interval,
                    self.event_tx.clone(),
                    shutdown.clone(),
                    resync.clone(),
                ))
            })
            .collect()
    }
}

async fn poll_panel(
    index: usize,
    panel: PanelConfig,
    fetcher: Arc<HeadlineFetcher>,
    period: Duration,
    event_tx: mpsc::UnboundedSender<PanelEvent>,
    mut shutdown: watch::Receiver<bool>,
    mut resync: watch::Receiver<u64>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    // Sequence numbers are per panel and allocated at issue time.
    let mut seq: u64 = 0;

    loop {
        tokio::select! {
            result = shutdown.changed() => {
                if result.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            result = resync.changed() => {
                if result.is_err() {
                    break;
                }
                debug!("Panel '{}': resync requested", panel.label);
                // The forced cycle replaces this period's scheduled tick.
                interval.reset();
                seq += 1;
                issue_cycle(index, seq, &panel, &fetcher, &event_tx, &shutdown);
            }
            // The first tick fires immediately: the activation-time cycle.
            _ = interval.tick() => {
                seq += 1;
                issue_cycle(index, seq, &panel, &fetcher, &event_tx, &shutdown);
            }
        }
    }

    debug!("Panel '{}': polling stopped", panel.label);
}

/// Issue one fetch cycle without blocking the panel's timer loop.
fn issue_cycle(
    index: usize,
    seq: u64,
    panel: &PanelConfig,
    fetcher: &Arc<HeadlineFetcher>,
    event_tx: &mpsc::UnboundedSender<PanelEvent>,
    shutdown: &watch::Receiver<bool>,
) {
    if event_tx
        .send(PanelEvent::CycleStarted { panel: index, seq })
        .is_err()
    {
        return;
    }

    let fetcher = Arc::clone(fetcher);
    let endpoint = panel.endpoint.clone();
    let label = panel.label.clone();
    let event_tx = event_tx.clone();
    let mut shutdown = shutdown.clone();

    tokio::spawn(async move {
        tokio::select! {
            // Shutdown races the request: dropping the future aborts the
            // in-flight HTTP call and suppresses the completion event.
            _ = shutdown.changed() => {
                debug!("Panel '{}': cycle {} aborted by shutdown", label, seq);
            }
            outcome = fetcher.fetch(&endpoint) => {
                if let Err(ref e) = outcome {
                    debug!("Panel '{}': cycle {} failed: {}", label, seq, e);
                }
                let _ = event_tx.send(PanelEvent::CycleFinished {
                    panel: index,
                    seq,
                    outcome,
                });
            }
        }
    });
}
