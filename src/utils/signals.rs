//! Signal handling for graceful shutdown

use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM};
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::info;

/// Register SIGTERM, SIGINT and SIGQUIT handlers
pub fn shutdown_signals() -> std::io::Result<Signals> {
    Signals::new([SIGTERM, SIGINT, SIGQUIT])
}

/// Wait for the first shutdown signal and return its name
pub async fn shutdown_signal(mut signals: Signals) -> &'static str {
    let name = match signals.next().await {
        Some(SIGTERM) => "SIGTERM",
        Some(SIGINT) => "SIGINT",
        Some(SIGQUIT) => "SIGQUIT",
        Some(_) => "unknown signal",
        None => "signal stream closed",
    };
    info!("Received {}", name);
    signals.handle().close();
    name
}
