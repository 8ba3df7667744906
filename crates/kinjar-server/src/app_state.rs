//! Shared application state for the Kinjar server.
//!
//! Holds the validated config, the compiled host resolver, the injected root
//! allowlist, the store, and the metrics registry. Cheap to clone; handlers
//! receive it through axum's `State`.

use std::sync::Arc;

use kinjar_core::access::RootAllowlist;
use kinjar_core::error::Result;
use kinjar_core::HostResolver;

use crate::config::ServerConfig;
use crate::obs::KinjarMetrics;
use crate::store::{MemoryStore, Store};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<dyn Store>,
    metrics: Arc<KinjarMetrics>,
}

struct AppStateInner {
    cfg: ServerConfig,
    resolver: HostResolver,
    roots: RootAllowlist,
}

impl AppState {
    /// Build state over an empty in-memory store.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_store(cfg, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(cfg: ServerConfig, store: Arc<dyn Store>) -> Result<Self> {
        cfg.validate()?;

        let resolver =
            HostResolver::new(&cfg.server.base_domain).with_reserved(&cfg.tenancy.reserved_labels);
        let roots = RootAllowlist::new(&cfg.access.root_emails);
        if roots.is_empty() {
            tracing::warn!(
                "access.root_emails is empty; only persisted ROOT users can approve signups"
            );
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, resolver, roots }),
            store,
            metrics: Arc::new(KinjarMetrics::default()),
        })
    }

    /// Register the configured development sessions with the store.
    pub async fn seed_dev_sessions(&self) -> Result<usize> {
        let sessions = &self.inner.cfg.auth.dev_sessions;
        for s in sessions {
            let name = s.name.as_deref().unwrap_or(&s.email);
            let user = self.store.find_or_create_user(&s.email, name).await?;
            self.store.insert_session(&s.token, user.id).await?;
            tracing::info!(user = %user.id, email = %user.email, "dev session seeded");
        }
        Ok(sessions.len())
    }

    pub fn resolver(&self) -> &HostResolver {
        &self.inner.resolver
    }

    pub fn roots(&self) -> &RootAllowlist {
        &self.inner.roots
    }

    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> Arc<KinjarMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }
}
