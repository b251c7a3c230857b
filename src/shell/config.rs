// Runtime configuration read from the environment.
//
// Purpose
// - Give the binary one typed place for the database location, bind address and pool size.
//
// Boundaries
// - `.env` is loaded by the caller (`dotenvy`) before `from_env` runs.

use anyhow::{Context, bail};
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./database/timeo.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("TIMEO_DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = lookup("TIMEO_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("TIMEO_BIND_ADDR is not a socket address: {bind_addr}"))?;

        let max_connections = match lookup("TIMEO_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("TIMEO_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            bail!("TIMEO_MAX_CONNECTIONS must be greater than 0");
        }

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}
