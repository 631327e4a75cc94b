//! Access to the dashboard's vaccination statistics
//!
//! The assistant reads, never writes, during a conversation. Seeding the
//! table (`save_records`) exists for the CLI and tests.

pub mod repository;

pub use repository::{
    create_mock_gateway, create_sqlite_gateway, GatewayResult, MockStatsGateway,
    SharedStatsGateway, SqliteStatsGateway, StatsGateway,
};

use std::time::Duration;

use crate::config::DatabaseConfig;

/// Open the SQLite store described by `config`
pub fn open_gateway(config: &DatabaseConfig) -> GatewayResult<SharedStatsGateway> {
    create_sqlite_gateway(
        &config.sqlite_path,
        Duration::from_millis(config.busy_timeout_ms),
    )
}
