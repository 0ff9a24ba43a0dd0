//! Server configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SERVICE_NAME: &str = "larder-server";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// OTLP collector; console logging only when unset.
    pub otel_endpoint: Option<String>,
    pub service_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`: Postgres connection string
    ///
    /// Optional:
    /// - `LARDER_BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP gRPC collector
    /// - `OTEL_SERVICE_NAME`: service name for exported telemetry (default: "larder-server")
    pub fn load() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = var_or("LARDER_BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .context("LARDER_BIND_ADDR is not a valid socket address")?;

        Ok(Self {
            database_url,
            bind_addr,
            otel_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .ok()
                .filter(|e| !e.trim().is_empty()),
            service_name: var_or("OTEL_SERVICE_NAME", DEFAULT_SERVICE_NAME),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
