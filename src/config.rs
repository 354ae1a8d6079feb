// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command line and environment configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::clock::Clock;
use crate::error::{Result, ServerError};
use crate::fetch::{Fetcher, FileSource, MenuCache, MenuSource, UnicafeSource, UNICAFE_API};
use crate::logging::{LogConfig, DEFAULT_FILTER};
use crate::model::CampusTable;
use crate::server::{AppContext, ServerConfig};
use crate::tui::Theme;

pub const DEFAULT_PORT: u16 = 23234;
pub const DEFAULT_HOST_KEY: &str = ".ssh/id_ed25519";

/// Campus cafeteria menus over SSH
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "unari")]
#[command(about = "Serve Unicafe lunch menus as a terminal dashboard over SSH")]
#[command(version)]
pub struct Config {
    /// Interface to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// OpenSSH private key used as the server host key
    ///
    /// When the file does not exist an Ed25519 key is generated and written there
    /// (mode 0600), so the fingerprint stays stable across restarts.
    #[arg(long, env = "UNARI_HOST_KEY", default_value = DEFAULT_HOST_KEY)]
    pub host_key: PathBuf,

    /// Upstream restaurant API
    #[arg(long, env = "UNARI_API_URL", default_value = UNICAFE_API)]
    pub api_url: String,

    /// Read menus from a JSON dump instead of the upstream API
    #[arg(long, env = "UNARI_MENU_FILE")]
    pub menu_file: Option<PathBuf>,

    /// TOML file replacing the built-in campus table
    #[arg(long, env = "UNARI_CAMPUS_TABLE")]
    pub campus_table: Option<PathBuf>,

    /// Seconds a fetched dataset is reused across sessions (0 disables)
    #[arg(long, env = "UNARI_CACHE_TTL_SECS", default_value_t = 0)]
    pub cache_ttl_secs: u64,

    /// Upstream request timeout in seconds
    #[arg(
        long,
        env = "UNARI_FETCH_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub fetch_timeout_secs: u64,

    /// Disconnect sessions without client traffic for this many seconds (0 disables)
    #[arg(long, env = "UNARI_IDLE_TIMEOUT_SECS", default_value_t = 1800)]
    pub idle_timeout_secs: u64,

    /// Seconds to wait for open sessions after a shutdown signal
    #[arg(long, env = "UNARI_SHUTDOWN_GRACE_SECS", default_value_t = 30)]
    pub shutdown_grace_secs: u64,

    /// Log filter directives, e.g. `info` or `unari=debug,russh=warn`
    #[arg(long = "log", env = "UNARI_LOG", default_value = DEFAULT_FILTER)]
    pub log_filter: String,

    /// Include source file and line in log records
    #[arg(long, env = "UNARI_LOG_FILE_LINE")]
    pub log_file_line: bool,
}

impl Config {
    pub fn log_config(&self) -> LogConfig {
        LogConfig { file_line: self.log_file_line, ..LogConfig::with_filter(&self.log_filter) }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            host_key: self.host_key.clone(),
            idle_timeout: (self.idle_timeout_secs > 0)
                .then(|| Duration::from_secs(self.idle_timeout_secs)),
            shutdown_grace: Duration::from_secs(self.shutdown_grace_secs),
        }
    }

    pub fn load_campus_table(&self) -> Result<CampusTable> {
        match &self.campus_table {
            Some(path) => CampusTable::load(path).map_err(|e| ServerError::config(e.to_string())),
            None => Ok(CampusTable::builtin()),
        }
    }

    pub fn fetcher(&self) -> Result<Fetcher> {
        let source: Arc<dyn MenuSource> = match &self.menu_file {
            Some(path) => Arc::new(FileSource::new(path)),
            None => Arc::new(
                UnicafeSource::new(
                    self.api_url.clone(),
                    Duration::from_secs(self.fetch_timeout_secs),
                )
                .map_err(|e| ServerError::config(e.to_string()))?,
            ),
        };
        let cache = (self.cache_ttl_secs > 0)
            .then(|| Arc::new(MenuCache::new(Duration::from_secs(self.cache_ttl_secs))));
        Ok(Fetcher::new(source, cache))
    }

    /// Everything sessions share: campus table, data source, theme, and the wall clock.
    pub fn app_context(&self) -> Result<AppContext> {
        let campuses = Arc::new(self.load_campus_table()?);
        let theme = Theme::from_env().map_err(|e| ServerError::config(e.to_string()))?;
        Ok(AppContext::new(campuses, self.fetcher()?, theme, Clock::system()))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use clap::Parser;
    use rstest::rstest;

    use super::{Config, DEFAULT_HOST_KEY};
    use crate::error::ServerError;
    use crate::fetch::UNICAFE_API;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["unari", "--host", "127.0.0.1", "--port", "2222"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn defaults_match_the_upstream_service() {
        let config = parse(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 2222);
        assert_eq!(config.host_key, PathBuf::from(DEFAULT_HOST_KEY));
        assert_eq!(config.api_url, UNICAFE_API);
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.shutdown_grace_secs, 30);
        assert!(config.menu_file.is_none());
    }

    #[test]
    fn server_config_converts_durations() {
        let config = parse(&["--idle-timeout-secs", "0", "--shutdown-grace-secs", "5"]);
        let server = config.server_config();
        assert_eq!(server.idle_timeout, None);
        assert_eq!(server.shutdown_grace, Duration::from_secs(5));
        assert_eq!(server.port, 2222);

        let server = parse(&["--idle-timeout-secs", "60"]).server_config();
        assert_eq!(server.idle_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn log_flags_flow_into_log_config() {
        let log = parse(&["--log", "unari=debug", "--log-file-line"]).log_config();
        assert_eq!(log.filter, "unari=debug");
        assert!(log.file_line);
    }

    #[rstest]
    #[case(&["--port", "not-a-port"])]
    #[case(&["--port", "70000"])]
    #[case(&["--fetch-timeout-secs", "0"])]
    fn invalid_values_are_rejected(#[case] args: &[&str]) {
        let mut argv = vec!["unari"];
        argv.extend_from_slice(args);
        assert!(Config::try_parse_from(argv).is_err());
    }

    #[test]
    fn missing_campus_table_is_a_config_error() {
        let config = parse(&["--campus-table", "/nonexistent/unari/campuses.toml"]);
        let err = config.load_campus_table().unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn builtin_campus_table_without_override() {
        let table = parse(&[]).load_campus_table().expect("builtin table");
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn menu_file_replaces_the_upstream_source() {
        let fetcher = parse(&["--menu-file", "/srv/menus.json"]).fetcher().expect("fetcher");
        assert!(format!("{fetcher:?}").contains("/srv/menus.json"));

        let fetcher = parse(&["--cache-ttl-secs", "60"]).fetcher().expect("fetcher");
        let debug = format!("{fetcher:?}");
        assert!(debug.contains(UNICAFE_API));
        assert!(debug.contains("ttl: 60s"));
    }
}
