//! Stop switch for the HTTP server.
//!
//! The flag lives in a `tokio::sync::watch` channel, so a waiter created after
//! the switch flipped still sees it.

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

/// Shared stop flag. Clones observe and flip the same flag.
#[derive(Clone)]
pub struct ShutdownController {
    stopped: watch::Sender<bool>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (stopped, _) = watch::channel(false);
        Self { stopped }
    }

    /// Resolves once the flag is set. Hand this to `with_graceful_shutdown`.
    pub fn signalled(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut rx = self.stopped.subscribe();
        async move {
            // a closed channel means every controller is gone; treat it as stop
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }

    pub fn shutdown(&self) {
        self.stopped.send_replace(true);
    }

    /// Block until the process gets Ctrl-C or SIGTERM, then flip the flag.
    pub async fn wait_for_signal(&self) {
        let name = os_signal().await;
        info!(signal = name, "stopping server");
        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

async fn os_signal() -> &'static str {
    #[cfg(unix)]
    {
        let mut term = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(term) => term,
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable, only Ctrl-C stops the server");
                let _ = signal::ctrl_c().await;
                return "SIGINT";
            }
        };
        tokio::select! {
            _ = signal::ctrl_c() => "SIGINT",
            _ = term.recv() => "SIGTERM",
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
        "SIGINT"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn server_future_completes_once_stopped() {
        let stop = ShutdownController::new();
        let server_exit = tokio::spawn(stop.signalled());
        stop.shutdown();
        server_exit.await.unwrap();
    }

    #[tokio::test]
    async fn late_waiter_sees_earlier_stop() {
        let stop = ShutdownController::new();
        stop.clone().shutdown();
        tokio::time::timeout(std::time::Duration::from_secs(1), stop.signalled())
            .await
            .unwrap();
    }
}
