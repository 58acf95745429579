use crate::events::AppEvent;
use crate::gui::app::App;
use crate::timer::Millis;
use async_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;
use tokio::time::{Duration, Instant};

/// Socket server and config watcher, on their own thread and runtime.
pub fn start_background_services(tx: Sender<AppEvent>, socket_path: PathBuf) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx, &socket_path).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}

/// Drives the page: the virtual clock follows wall time since startup and
/// timers fire as their deadlines pass. Returns once every sender is gone.
pub fn run_event_loop(mut app: App, rx: Receiver<AppEvent>) -> std::io::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    rt.block_on(async move {
        let origin = Instant::now();
        let elapsed = || origin.elapsed().as_millis() as Millis;

        loop {
            let deadline = app
                .next_due()
                .and_then(|due| origin.checked_add(Duration::from_millis(due)));

            tokio::select! {
                event = rx.recv() => match event {
                    Ok(event) => {
                        app.advance_to(elapsed());
                        app.dispatch(event);
                    }
                    Err(_) => {
                        log::info!("Event channel closed");
                        break;
                    }
                },
                _ = sleep_until(deadline) => app.advance_to(elapsed()),
            }
        }
    });

    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
