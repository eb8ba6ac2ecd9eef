use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

/// Coordinates graceful shutdown across the server and cleanup tasks.
///
/// Handles signal reception (SIGTERM, SIGINT), broadcasts shutdown to
/// subscribers, and tracks whether shutdown has begun.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a new coordinator and a receiver for shutdown signals.
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (tx, rx) = broadcast::channel(1);
        let coordinator = Self {
            tx,
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, rx)
    }

    /// Subscribe to shutdown notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Relaxed)
    }

    /// Initiate shutdown and notify all subscribers. Idempotent.
    pub fn shutdown(&self) {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
        }
    }

    /// Block until SIGTERM or SIGINT arrives, then initiate shutdown.
    pub async fn wait_for_signal(&self) {
        wait_for_os_signal().await;
        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new().0
    }
}

async fn wait_for_os_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}

/// Simple shutdown future for `axum::serve().with_graceful_shutdown()`.
///
/// Does not coordinate cleanup. For production use prefer
/// `create_production_app` which drives a [`ShutdownCoordinator`].
pub async fn shutdown_signal() {
    wait_for_os_signal().await;
}

/// Future that resolves when the coordinator observes a signal.
pub(crate) async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    coordinator.wait_for_signal().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shutdown_notifies_subscribers() {
        let (coordinator, mut rx) = ShutdownCoordinator::new();
        assert!(!coordinator.is_shutting_down());

        coordinator.shutdown();
        assert!(coordinator.is_shutting_down());
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (coordinator, _rx) = ShutdownCoordinator::new();
        coordinator.shutdown();
        coordinator.shutdown();
        assert!(coordinator.is_shutting_down());
    }

    #[tokio::test]
    async fn late_subscribers_see_no_replay() {
        let (coordinator, _rx) = ShutdownCoordinator::new();
        coordinator.shutdown();

        // Broadcast channels do not replay; late subscribers rely on
        // is_shutting_down instead.
        let mut late = coordinator.subscribe();
        assert!(late.try_recv().is_err());
        assert!(coordinator.is_shutting_down());
    }
}
