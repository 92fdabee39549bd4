use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;

use newswall_core::config::{AppConfig, OutletConfig};
use newswall_core::poll::{PanelEvent, PollerService, ResyncHandle};
use newswall_core::HeadlineFetcher;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Minimal HTTP stub: answers every connection with a canned response,
/// optionally after a delay.
async fn spawn_stub(status_line: &'static str, body: &'static str, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn test_config(addr: SocketAddr) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = format!("http://{}", addr);
    config.sync.poll_interval_secs = 1;
    config.sync.request_timeout_secs = 2;
    config.outlets = vec![OutletConfig {
        label: "CNN".to_string(),
        path: "cnn-news".to_string(),
    }];
    config
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<PanelEvent>) -> PanelEvent {
    timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for panel event")
        .expect("event channel closed unexpectedly")
}

#[tokio::test]
async fn fetcher_returns_articles_in_server_order() {
    let addr = spawn_stub(
        "200 OK",
        r#"{"news":[{"title":"first","link":"http://x/1"},{"title":"second","link":"http://x/2"}]}"#,
        Duration::ZERO,
    )
    .await;

    let config = test_config(addr);
    let fetcher = HeadlineFetcher::new(&config).unwrap();
    let endpoint = config.panel_configs().unwrap()[0].endpoint.clone();

    let articles = fetcher.fetch(&endpoint).await.unwrap();
    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second"]);
}

#[tokio::test]
async fn activation_cycle_reaches_ready() {
    let addr = spawn_stub(
        "200 OK",
        r#"{"news":[{"title":"A","link":"http://x"}]}"#,
        Duration::ZERO,
    )
    .await;
    let config = test_config(addr);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (_resync, resync_rx) = ResyncHandle::new();

    let panels = config.panel_configs().unwrap();
    let handles = PollerService::new(&config, panels, event_tx)
        .unwrap()
        .spawn(shutdown_rx, resync_rx);

    match next_event(&mut event_rx).await {
        PanelEvent::CycleStarted { panel: 0, seq: 1 } => {}
        other => panic!("expected first cycle start, got {:?}", other),
    }

    match next_event(&mut event_rx).await {
        PanelEvent::CycleFinished {
            panel: 0,
            seq: 1,
            outcome,
        } => {
            let articles = outcome.expect("cycle should succeed");
            assert_eq!(articles.len(), 1);
            assert_eq!(articles[0].title, "A");
            assert_eq!(articles[0].link, "http://x");
        }
        other => panic!("expected cycle completion, got {:?}", other),
    }

    shutdown_tx.send(true).unwrap();
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn non_success_status_fails_the_cycle() {
    let addr = spawn_stub("500 Internal Server Error", "oops", Duration::ZERO).await;
    let config = test_config(addr);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (_resync, resync_rx) = ResyncHandle::new();

    let panels = config.panel_configs().unwrap();
    let handles = PollerService::new(&config, panels, event_tx)
        .unwrap()
        .spawn(shutdown_rx, resync_rx);

    loop {
        match next_event(&mut event_rx).await {
            PanelEvent::CycleStarted { .. } => continue,
            PanelEvent::CycleFinished { outcome, .. } => {
                let message = outcome.unwrap_err().to_string();
                assert!(!message.is_empty());
                assert!(message.contains("Failed to fetch"), "got: {}", message);
                break;
            }
        }
    }

    shutdown_tx.send(true).unwrap();
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn transport_failure_fails_the_cycle() {
    // Bind then drop to get an address with nothing listening.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let config = test_config(addr);

    let fetcher = HeadlineFetcher::new(&config).unwrap();
    let endpoint = config.panel_configs().unwrap()[0].endpoint.clone();

    let err = fetcher.fetch(&endpoint).await.unwrap_err();
    assert!(err.to_string().contains("Failed to fetch"));
}

#[tokio::test]
async fn timed_out_request_fails_the_cycle() {
    // The stub stalls longer than the client timeout allows.
    let addr = spawn_stub("200 OK", r#"{"news":[]}"#, Duration::from_secs(5)).await;
    let mut config = test_config(addr);
    config.sync.request_timeout_secs = 1;

    let fetcher = HeadlineFetcher::new(&config).unwrap();
    let endpoint = config.panel_configs().unwrap()[0].endpoint.clone();

    let err = fetcher.fetch(&endpoint).await.unwrap_err();
    assert!(err.to_string().contains("Failed to fetch"));
}

#[tokio::test]
async fn body_without_news_field_fails_the_cycle() {
    let addr = spawn_stub("200 OK", r#"{"articles":[]}"#, Duration::ZERO).await;
    let config = test_config(addr);

    let fetcher = HeadlineFetcher::new(&config).unwrap();
    let endpoint = config.panel_configs().unwrap()[0].endpoint.clone();

    let err = fetcher.fetch(&endpoint).await.unwrap_err();
    assert!(err.to_string().contains("news"));
}

#[tokio::test]
async fn resync_forces_an_immediate_cycle() {
    let addr = spawn_stub("200 OK", r#"{"news":[]}"#, Duration::ZERO).await;
    let mut config = test_config(addr);
    // Long enough that only the activation tick fires on its own.
    config.sync.poll_interval_secs = 3600;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (resync, resync_rx) = ResyncHandle::new();

    let panels = config.panel_configs().unwrap();
    let handles = PollerService::new(&config, panels, event_tx)
        .unwrap()
        .spawn(shutdown_rx, resync_rx);

    // Drain the activation cycle.
    loop {
        if let PanelEvent::CycleFinished { seq: 1, .. } = next_event(&mut event_rx).await {
            break;
        }
    }

    resync.trigger();

    match next_event(&mut event_rx).await {
        PanelEvent::CycleStarted { panel: 0, seq: 2 } => {}
        other => panic!("expected resync cycle start, got {:?}", other),
    }

    shutdown_tx.send(true).unwrap();
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn shutdown_aborts_in_flight_cycles() {
    // The stub stalls longer than the test waits, so the activation cycle
    // is still in flight when shutdown arrives.
    let addr = spawn_stub("200 OK", r#"{"news":[]}"#, Duration::from_secs(30)).await;
    let mut config = test_config(addr);
    config.sync.poll_interval_secs = 3600;
    config.sync.request_timeout_secs = 0;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (_resync, resync_rx) = ResyncHandle::new();

    let panels = config.panel_configs().unwrap();
    let handles = PollerService::new(&config, panels, event_tx)
        .unwrap()
        .spawn(shutdown_rx, resync_rx);

    match next_event(&mut event_rx).await {
        PanelEvent::CycleStarted { seq: 1, .. } => {}
        other => panic!("expected cycle start, got {:?}", other),
    }

    shutdown_tx.send(true).unwrap();
    for handle in handles {
        handle.await.unwrap();
    }

    // Give the aborted request task a moment, then verify no completion was
    // ever observed: the channel drains empty and closes.
    tokio::time::sleep(Duration::from_millis(200)).await;
    match event_rx.try_recv() {
        Err(_) => {}
        Ok(event) => panic!("no event expected after shutdown, got {:?}", event),
    }
}
