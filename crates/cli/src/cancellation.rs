//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Wire Ctrl+C/SIGINT to the provider's `CancellationToken`.
//! - Centralize cancellation message and Unix-standard SIGINT exit code (130).
//!
//! Does NOT handle:
//! - Deciding *when* to check for cancellation; the data source read races
//!   its remote call against the token.

use atracker_provider::CancellationToken;

/// Standard Unix exit code for SIGINT: 128 + 2.
pub const SIGINT_EXIT_CODE: u8 = 130;

/// Spawn a task that cancels `cancel` on the first Ctrl+C.
pub fn install_ctrl_c_handler(cancel: &CancellationToken) {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::debug!("Received Ctrl+C, cancelling read");
        cancel.cancel();
    });
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}
