use crate::events::AppEvent;
use async_channel::Sender;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub const SOCKET_PATH: &str = "/tmp/clinic-ui.sock";

pub fn default_socket_path() -> PathBuf {
    PathBuf::from(SOCKET_PATH)
}

/// Accepts host connections and forwards one event per line. Every line
/// gets a one-line reply: `ok` or `error: <reason>`.
pub async fn run_server(tx: Sender<AppEvent>, socket_path: &Path) {
    // Cleanup old socket if it exists
    if fs_err::metadata(socket_path).is_ok() {
        let _ = fs_err::remove_file(socket_path);
    }

    let listener = match UnixListener::bind(socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = serve(stream, tx).await {
                        log::warn!("Connection error: {}", e);
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn serve(stream: UnixStream, tx: Sender<AppEvent>) -> std::io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = match line.parse::<AppEvent>() {
            Ok(event) => {
                log::debug!("Received {:?}", event);
                match tx.send(event).await {
                    Ok(()) => "ok".to_string(),
                    Err(_) => "error: page is shutting down".to_string(),
                }
            }
            Err(e) => {
                log::warn!("Rejected '{}': {}", line.trim(), e);
                format!("error: {}", e)
            }
        };
        write.write_all(reply.as_bytes()).await?;
        write.write_all(b"\n").await?;
    }
    Ok(())
}
