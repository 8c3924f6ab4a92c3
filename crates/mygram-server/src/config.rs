use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use mygram_api::token::TokenKeys;

#[derive(Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr = var("SERVER_ADDRESS", "0.0.0.0:8080")
            .parse()
            .context("SERVER_ADDRESS must be a host:port socket address")?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must be set");
        }

        Ok(Self {
            listen_addr,
            db_path: PathBuf::from(var("DB_PATH", "mygram.db")),
            jwt_secret,
            jwt_issuer: var("JWT_ISSUER", "mygram"),
            jwt_audience: var("JWT_AUDIENCE", "mygram"),
        })
    }

    pub fn token_keys(&self) -> TokenKeys {
        TokenKeys::new(&self.jwt_secret, &self.jwt_issuer, &self.jwt_audience)
    }
}
