use std::io;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LogConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_log_format() -> String { "compact".to_string() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file at `CONFIG_PATH` first; only when that file does not exist,
    /// build from env vars.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_with(&config_path(), |key| std::env::var(key).ok())
    }

    /// Same as `load_and_validate` with an explicit path and variable lookup.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_and_validate_with<F>(path: &str, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => parse(&content).with_context(|| format!("invalid config file {path}"))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::from_vars(var)?,
            Err(e) => return Err(anyhow!("cannot read config file {path}: {e}")),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`, `LOG_FORMAT` from
    /// a variable lookup; unset keys take defaults, unparsable numbers are errors.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("SERVER_HOST").unwrap_or_else(default_host);
        let port = match var("SERVER_PORT") {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("SERVER_PORT {p:?} is not a port: {e}"))?,
            None => DEFAULT_PORT,
        };
        let worker_threads = match var("TOKIO_WORKER_THREADS") {
            Some(v) => Some(
                v.trim()
                    .parse::<usize>()
                    .map_err(|e| anyhow!("TOKIO_WORKER_THREADS {v:?} is not a number: {e}"))?,
            ),
            None => None,
        };
        let format = var("LOG_FORMAT").unwrap_or_else(default_log_format);
        Ok(Self {
            server: ServerConfig { host, port, worker_threads },
            log: LogConfig { format },
        })
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.log.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }

    /// `host:port` as a string suitable for `SocketAddr` parsing.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LogConfig {
    fn normalize(&mut self) {
        let f = self.format.trim().to_ascii_lowercase();
        self.format = if f == "json" { f } else { default_log_format() };
    }
}
