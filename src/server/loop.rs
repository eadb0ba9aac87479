// Server loop module
// Accepts connections until a shutdown signal, then drains

use std::future::Future;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How often the drain phase re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop until `shutdown` resolves
///
/// After the signal the listener is dropped, open connections are told to
/// finish, and the loop waits up to `performance.shutdown_grace_period`
/// seconds for them to close.
pub async fn run<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F)
where
    F: Future<Output = &'static str>,
{
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, stop_rx.clone());
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            signal = &mut shutdown => {
                logger::log_shutdown_requested(signal);
                break;
            }
        }
    }

    drop(listener);
    // Receivers may all be gone already; nothing to notify then
    let _ = stop_tx.send(true);

    let grace = Duration::from_secs(state.config.performance.shutdown_grace_period);
    let drained = tokio::time::timeout(grace, async {
        while state.active_connections.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }
    })
    .await;

    let remaining = if drained.is_ok() {
        0
    } else {
        state.active_connections.load(Ordering::SeqCst)
    };
    logger::log_shutdown_complete(remaining);
}
