//! TCP listener binding for the exposition endpoint.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::error::StartupError;

/// Bind the exposition listener.
///
/// A port already in use surfaces as `StartupError::Bind`, which the entry
/// point turns into its own exit code.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, StartupError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    let local_addr = listener
        .local_addr()
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!(address = %local_addr, "Listener bound");
    Ok(listener)
}
