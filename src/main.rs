// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Unari CLI entrypoint.
//!
//! Serves the menu dashboard over SSH until SIGINT or SIGTERM. Connect with `ssh -p <port> host`.

use std::error::Error;

use clap::Parser;
use tracing::{error, info};

use unari::config::Config;
use unari::logging::init_logging;
use unari::server::Server;

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let config = Config::parse();
        init_logging(&config.log_config())?;

        let context = config.app_context()?;
        let campuses = context.campuses.len();
        let server_config = config.server_config();
        let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

        runtime.block_on(async move {
            let server = Server::bind(&server_config, context).await?;
            info!(
                version = env!("CARGO_PKG_VERSION"),
                campuses,
                "unari ready"
            );
            server.run(shutdown_signal()).await
        })?;
        Ok(())
    })();

    if let Err(err) = result {
        error!(%err, "unari stopped");
        eprintln!("unari: {err}");
        std::process::exit(1);
    }
}

/// Resolves on the first SIGINT or SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("received SIGINT"),
        _ = terminate => info!("received SIGTERM"),
    }
}
