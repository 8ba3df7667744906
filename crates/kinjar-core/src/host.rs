//! Hostname -> tenant resolution.
//!
//! Rules, in order:
//! 1. lowercase, strip the port (including bracketed IPv6 hosts) and one
//!    trailing dot;
//! 2. hosts outside the base domain resolve to nothing;
//! 3. the base domain itself is the apex/marketing site ([`TenantHost::Root`]);
//! 4. otherwise the leftmost label is the candidate slug, unless reserved.
//!
//! Deeper nesting (`a.b.<base>`) resolves to the leftmost label `a`.
//! Existence is not checked here; the caller looks the slug up.

use crate::slug;

/// Outcome of resolving a request host inside the base domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantHost {
    /// Apex domain: marketing site, no tenant context.
    Root,
    /// Candidate tenant slug (lowercase).
    Family(String),
}

impl TenantHost {
    pub fn slug(&self) -> Option<&str> {
        match self {
            TenantHost::Root => None,
            TenantHost::Family(s) => Some(s),
        }
    }
}

/// Resolve with the built-in reserved labels.
pub fn resolve_tenant(hostname: &str, base_domain: &str) -> Option<TenantHost> {
    let base = normalize_host(base_domain);
    resolve_with(hostname, &base, slug::is_reserved)
}

/// Configured resolver: base domain normalized once, plus extra reserved labels.
#[derive(Debug, Clone)]
pub struct HostResolver {
    base_domain: String,
    extra_reserved: Vec<String>,
}

impl HostResolver {
    pub fn new(base_domain: &str) -> Self {
        Self {
            base_domain: normalize_host(base_domain),
            extra_reserved: Vec::new(),
        }
    }

    /// Additional labels (e.g. `api`, `admin`) that never name a tenant.
    pub fn with_reserved<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_reserved
            .extend(labels.into_iter().map(|s| s.as_ref().trim().to_ascii_lowercase()));
        self
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    pub fn is_reserved(&self, label: &str) -> bool {
        slug::is_reserved(label) || self.extra_reserved.iter().any(|r| r == label)
    }

    pub fn resolve(&self, hostname: &str) -> Option<TenantHost> {
        resolve_with(hostname, &self.base_domain, |label| self.is_reserved(label))
    }
}

fn resolve_with(hostname: &str, base: &str, reserved: impl Fn(&str) -> bool) -> Option<TenantHost> {
    if base.is_empty() {
        return None;
    }
    let host = normalize_host(hostname);

    if host == base {
        return Some(TenantHost::Root);
    }

    let prefix = host.strip_suffix(base)?.strip_suffix('.')?;

    // Leftmost label; `split` always yields at least one item.
    let label = prefix.split('.').next().unwrap_or_default();
    if reserved(label) {
        return None;
    }
    Some(TenantHost::Family(label.to_string()))
}

/// Lowercase, strip `:port` and a single trailing dot.
pub fn normalize_host(raw: &str) -> String {
    let raw = raw.trim();
    let without_port = if let Some(rest) = raw.strip_prefix('[') {
        // [v6]:port
        rest.split_once(']').map(|(h, _)| h).unwrap_or(rest)
    } else {
        match raw.rsplit_once(':') {
            Some((h, port)) if port.bytes().all(|b| b.is_ascii_digit()) => h,
            _ => raw,
        }
    };
    let trimmed = without_port.strip_suffix('.').unwrap_or(without_port);
    trimmed.to_ascii_lowercase()
}
