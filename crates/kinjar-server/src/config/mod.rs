//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use kinjar_core::error::{KinjarError, Result};

pub use schema::{
    AccessSection, AuthSection, DevSession, ServerConfig, ServerSection, TenancySection,
};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "KINJAR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "kinjar.yaml";

/// Path from `$KINJAR_CONFIG`, falling back to `kinjar.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| KinjarError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| KinjarError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
