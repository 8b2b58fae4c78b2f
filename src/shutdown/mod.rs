//! Graceful shutdown signal
//!
//! A single process-wide cancellation token with a monotonic false→true
//! transition. The OS signal handling lives only here; the executor and
//! coordinator just observe the token they were handed.

use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cooperative shutdown flag shared by the coordinator and every executor.
#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token handed to workers; all clones observe the same transition.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Flip the flag. Idempotent.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Spawn a background task that flips the flag on SIGINT or SIGTERM.
    pub fn listen_for_signals(&self) {
        let token = self.token.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            info!("📋 received shutdown signal, initiating graceful shutdown...");
            token.cancel();
        });
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(_) => {
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
