use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::auth::AuthConfig;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/school-health.db";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_TOKEN_TTL_MINUTES: u64 = 24 * 60;
const SECRET_KEY_LEN: usize = 32;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// `None` disables authentication.
    pub auth: Option<AuthConfig>,
    /// Load the demo students on startup when the database has none.
    pub seed_sample_data: bool,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_flag(key: &str) -> bool {
    env_opt(key).is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// HS256 key from `SH_SECRET_KEY`: base64 of 32 bytes, or 32 raw ASCII characters.
pub fn parse_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("secret key is empty");
    }
    if let Ok(bytes) = BASE64.decode(raw) {
        if bytes.len() == SECRET_KEY_LEN {
            return Ok(bytes);
        }
    }
    if raw.len() == SECRET_KEY_LEN && raw.is_ascii() {
        return Ok(raw.as_bytes().to_vec());
    }
    bail!("secret key must be {SECRET_KEY_LEN} bytes, raw or base64 encoded")
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = env_or("SH_LISTEN_ADDR", DEFAULT_LISTEN_ADDR)
            .parse()
            .context("Invalid SH_LISTEN_ADDR")?;
        let db_path = env_or("SH_DB_PATH", DEFAULT_DB_PATH);
        let cors_allow = env_or("SH_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("SH_REQUEST_TIMEOUT_MS", &DEFAULT_TIMEOUT_MS.to_string())
            .parse()
            .context("Invalid SH_REQUEST_TIMEOUT_MS")?;
        let static_dir = env_or("SH_STATIC_DIR", "dist");

        let auth = match env_opt("SH_AUTH_PASSWORD_HASH") {
            Some(password_hash) => {
                let secret = env_opt("SH_SECRET_KEY")
                    .context("SH_SECRET_KEY is required when SH_AUTH_PASSWORD_HASH is set")?;
                let ttl_minutes: u64 = env_or(
                    "SH_AUTH_TOKEN_TTL_MINUTES",
                    &DEFAULT_TOKEN_TTL_MINUTES.to_string(),
                )
                .parse()
                .context("Invalid SH_AUTH_TOKEN_TTL_MINUTES")?;
                Some(AuthConfig {
                    username: env_or("SH_AUTH_USERNAME", DEFAULT_USERNAME),
                    password_hash,
                    jwt_secret: parse_secret_key(&secret).context("Invalid SH_SECRET_KEY")?,
                    access_token_ttl: Duration::from_secs(ttl_minutes * 60),
                })
            }
            None => None,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            auth,
            seed_sample_data: env_flag("SH_SEED_SAMPLE_DATA"),
        })
    }
}
