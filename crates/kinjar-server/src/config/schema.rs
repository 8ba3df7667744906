use std::collections::HashSet;
use std::net::SocketAddr;

use serde::Deserialize;

use kinjar_core::error::{KinjarError, Result};
use kinjar_core::slug::is_dns_label;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    pub server: ServerSection,

    #[serde(default)]
    pub tenancy: TenancySection,

    #[serde(default)]
    pub access: AccessSection,

    #[serde(default)]
    pub auth: AuthSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(KinjarError::BadRequest(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }

        self.server.validate()?;
        self.tenancy.validate()?;
        self.auth.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Apex domain; families live at `<slug>.<base_domain>`.
    pub base_domain: String,
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            KinjarError::BadRequest(format!(
                "server.listen must be a valid socket address, got {:?}",
                self.listen
            ))
        })?;

        let base = self.base_domain.trim().to_ascii_lowercase();
        if base.is_empty() || !base.split('.').all(is_dns_label) {
            return Err(KinjarError::BadRequest(format!(
                "server.base_domain must be a dotted list of DNS labels, got {:?}",
                self.base_domain
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| KinjarError::BadRequest(format!("server.listen: {e}")))
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TenancySection {
    /// Extra subdomain labels that never name a family (on top of
    /// `www`, `app`, `kinjar`, `localhost`).
    #[serde(default)]
    pub reserved_labels: Vec<String>,
}

impl TenancySection {
    pub fn validate(&self) -> Result<()> {
        for label in &self.reserved_labels {
            let l = label.trim().to_ascii_lowercase();
            if !is_dns_label(&l) {
                return Err(KinjarError::BadRequest(format!(
                    "tenancy.reserved_labels entry {label:?} is not a DNS label"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AccessSection {
    /// Emails granted the ROOT role regardless of the persisted flag.
    #[serde(default)]
    pub root_emails: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// Pre-issued sessions for local development. Real sessions come from the
    /// identity provider.
    #[serde(default)]
    pub dev_sessions: Vec<DevSession>,
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for s in &self.dev_sessions {
            if s.token.trim().is_empty() {
                return Err(KinjarError::BadRequest(
                    "auth.dev_sessions token must not be empty".into(),
                ));
            }
            if !s.email.contains('@') {
                return Err(KinjarError::BadRequest(format!(
                    "auth.dev_sessions email {:?} is invalid",
                    s.email
                )));
            }
            if !seen.insert(s.token.as_str()) {
                return Err(KinjarError::BadRequest(
                    "auth.dev_sessions tokens must be unique".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevSession {
    pub token: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}
