// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! SSH front end.
//!
//! [`Server`] owns the listener and accepts connections until the shutdown future resolves.
//! Each connection runs the russh protocol with a [`ConnectionHandler`]; each interactive
//! channel gets its own session task.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::model::CampusTable;
use crate::tui::Theme;

mod connection;
mod handler;
mod hostkey;
mod terminal;

pub use connection::ESC_TIMEOUT;
pub use handler::{ConnectionHandler, NO_PTY_MESSAGE};
pub use hostkey::load_or_create_host_key;

/// Listener and SSH protocol settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub host_key: PathBuf,
    pub idle_timeout: Option<Duration>,
    pub shutdown_grace: Duration,
}

/// What every session shares.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub campuses: Arc<CampusTable>,
    pub fetcher: Fetcher,
    pub theme: Theme,
    pub clock: Clock,
}

impl AppContext {
    pub fn new(campuses: Arc<CampusTable>, fetcher: Fetcher, theme: Theme, clock: Clock) -> Self {
        Self { campuses, fetcher, theme, clock }
    }
}

pub struct Server {
    listener: TcpListener,
    ssh: Arc<russh::server::Config>,
    context: Arc<AppContext>,
    shutdown_grace: Duration,
}

impl Server {
    /// Loads the host key and binds the listener.
    pub async fn bind(config: &ServerConfig, context: AppContext) -> Result<Self> {
        let key = load_or_create_host_key(&config.host_key)?;
        let ssh = russh::server::Config {
            inactivity_timeout: config.idle_timeout,
            auth_rejection_time: Duration::from_secs(1),
            auth_rejection_time_initial: Some(Duration::ZERO),
            keys: vec![key],
            ..Default::default()
        };
        let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
        Ok(Self {
            listener,
            ssh: Arc::new(ssh),
            context: Arc::new(context),
            shutdown_grace: config.shutdown_grace,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until `shutdown` resolves, then asks open sessions to close and waits up to the
    /// grace period before dropping the remaining connections.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let Self { listener, ssh, context, shutdown_grace } = self;
        info!(addr = %listener.local_addr()?, "SSH server listening");

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!(%peer, "connection accepted");
                        let handler =
                            ConnectionHandler::new(Arc::clone(&context), Some(peer), stop_rx.clone());
                        let ssh = Arc::clone(&ssh);
                        connections.spawn(async move {
                            let running = match russh::server::run_stream(ssh, stream, handler).await {
                                Ok(running) => running,
                                Err(error) => {
                                    debug!(%peer, %error, "SSH handshake failed");
                                    return;
                                }
                            };
                            match running.await {
                                Ok(()) => debug!(%peer, "connection closed"),
                                Err(error) => debug!(%peer, %error, "connection ended with error"),
                            }
                        });
                    }
                    Err(error) => warn!(%error, "accept failed"),
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        info!(open = connections.len(), "shutting down");
        drop(listener);
        let _ = stop_tx.send(true);
        let drained = tokio::time::timeout(shutdown_grace, async {
            while connections.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            warn!(open = connections.len(), "grace period elapsed; dropping connections");
            connections.abort_all();
        }
        info!("SSH server stopped");
        Ok(())
    }
}
