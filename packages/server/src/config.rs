//! Server configuration parsed from the command line and `GEARBOOK_*`
//! environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::network::NetworkConfig;

/// Which [`SheetStore`](crate::storage::SheetStore) implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// In-memory sheet, seeded with the reserved region. Data does not
    /// survive a restart; intended for local development.
    Memory,
    /// The production Google Sheets document.
    Google,
}

/// Gearbook server configuration.
#[derive(Debug, Parser)]
#[command(
    name = "gearbook-server",
    about = "Device sign-out register over a sheet-backed store",
    version
)]
pub struct ServerConfig {
    /// Bind address.
    #[arg(long, env = "GEARBOOK_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (0 for OS-assigned).
    #[arg(long, env = "GEARBOOK_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Allowed CORS origin; repeat or comma-separate for several. `*`
    /// allows any origin.
    #[arg(
        long = "cors-origin",
        env = "GEARBOOK_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_origins: Vec<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "GEARBOOK_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Store backend.
    #[arg(long, env = "GEARBOOK_STORE", value_enum, default_value = "memory")]
    pub store: StoreBackend,

    /// Spreadsheet id of the backing document (google store).
    #[arg(long, env = "GEARBOOK_SPREADSHEET_ID")]
    pub spreadsheet_id: Option<String>,

    /// Sheet title within the document. The production document uses its
    /// first sheet.
    #[arg(long, env = "GEARBOOK_SHEET_TITLE", default_value = "Sheet1")]
    pub sheet_title: String,

    /// Numeric grid id of the sheet (the first sheet is 0). Used by row
    /// deletion.
    #[arg(long, env = "GEARBOOK_SHEET_GRID_ID", default_value_t = 0)]
    pub sheet_grid_id: i64,

    /// Path to the service-account credential file (google store).
    #[arg(
        long,
        env = "GEARBOOK_CREDENTIALS",
        default_value = "gearbook-credentials.json"
    )]
    pub credentials_path: PathBuf,

    /// Holder name offered by the display layer's person selector; repeat
    /// or comma-separate for several.
    #[arg(long = "holder", env = "GEARBOOK_ROSTER", value_delimiter = ',')]
    pub roster: Vec<String>,

    /// Prometheus exporter listen address (exporter disabled when absent).
    #[arg(long, env = "GEARBOOK_METRICS_ADDR")]
    pub metrics_addr: Option<SocketAddr>,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, env = "GEARBOOK_LOG_JSON")]
    pub log_json: bool,
}

impl ServerConfig {
    /// The network-layer slice of this configuration.
    #[must_use]
    pub fn network(&self) -> NetworkConfig {
        NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..NetworkConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        ServerConfig::command().debug_assert();
    }

    #[test]
    fn defaults_select_memory_store() {
        let config = ServerConfig::parse_from(["gearbook-server"]);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.port, 8080);
        assert_eq!(config.sheet_title, "Sheet1");
        assert_eq!(config.sheet_grid_id, 0);
        assert!(config.roster.is_empty());
        assert!(config.metrics_addr.is_none());
        assert!(!config.log_json);
    }

    #[test]
    fn roster_accepts_comma_separated_names() {
        let config = ServerConfig::parse_from([
            "gearbook-server",
            "--holder",
            "Ann,Bo",
            "--holder",
            "Cleo",
        ]);
        assert_eq!(config.roster, vec!["Ann", "Bo", "Cleo"]);
    }

    #[test]
    fn network_slice_carries_timeout() {
        let config = ServerConfig::parse_from([
            "gearbook-server",
            "--request-timeout-secs",
            "5",
            "--port",
            "9999",
        ]);
        let network = config.network();
        assert_eq!(network.port, 9999);
        assert_eq!(network.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn google_store_is_selectable() {
        let config = ServerConfig::parse_from([
            "gearbook-server",
            "--store",
            "google",
            "--spreadsheet-id",
            "abc123",
        ]);
        assert_eq!(config.store, StoreBackend::Google);
        assert_eq!(config.spreadsheet_id.as_deref(), Some("abc123"));
    }
}
