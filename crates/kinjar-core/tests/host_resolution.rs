#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use kinjar_core::host::normalize_host;
use kinjar_core::{resolve_tenant, HostResolver, TenantHost};

const BASE: &str = "kinjar.com";

fn family(s: &str) -> Option<TenantHost> {
    Some(TenantHost::Family(s.to_string()))
}

#[test]
fn foreign_hosts_resolve_to_nothing() {
    for h in [
        "example.com",
        "evilkinjar.com",
        "kinjar.com.evil.net",
        "preview-123.vercel.app",
        "localhost:3000",
        "",
    ] {
        assert_eq!(resolve_tenant(h, BASE), None, "{h}");
    }
}

#[test]
fn reserved_labels_resolve_to_nothing() {
    for r in ["www", "app", "kinjar", "localhost"] {
        assert_eq!(resolve_tenant(&format!("{r}.{BASE}"), BASE), None, "{r}");
    }
    assert_eq!(resolve_tenant(".kinjar.com", BASE), None);
}

#[test]
fn apex_is_root_sentinel() {
    assert_eq!(resolve_tenant("kinjar.com", BASE), Some(TenantHost::Root));
    assert_eq!(resolve_tenant("KINJAR.com:443", BASE), Some(TenantHost::Root));
    assert_eq!(TenantHost::Root.slug(), None);
}

#[test]
fn case_folds_and_strips_port() {
    assert_eq!(resolve_tenant("Slug.kinjar.com", BASE), family("slug"));
    assert_eq!(resolve_tenant("slug.kinjar.com:8080", BASE), family("slug"));
    assert_eq!(resolve_tenant("slug.kinjar.com.", BASE), family("slug"));
}

#[test]
fn nested_subdomain_takes_leftmost_label() {
    assert_eq!(resolve_tenant("a.b.kinjar.com", BASE), family("a"));
}

#[test]
fn base_domain_is_normalized_too() {
    assert_eq!(resolve_tenant("smith.kinjar.com", " Kinjar.COM "), family("smith"));
}

#[test]
fn resolver_honours_extra_reserved_labels() {
    let r = HostResolver::new("kinjar.com").with_reserved(["api", "Admin"]);
    assert_eq!(r.resolve("api.kinjar.com"), None);
    assert_eq!(r.resolve("admin.kinjar.com"), None);
    assert_eq!(r.resolve("www.kinjar.com"), None);
    assert_eq!(r.resolve("smith.kinjar.com"), family("smith"));
    assert!(r.is_reserved("api"));
}

#[test]
fn empty_base_domain_never_matches() {
    let r = HostResolver::new("");
    assert_eq!(r.resolve("smith.kinjar.com"), None);
    assert_eq!(r.resolve(""), None);
}

#[test]
fn normalize_handles_ipv6_literals() {
    assert_eq!(normalize_host("[::1]:8080"), "::1");
    assert_eq!(normalize_host("Host.Example"), "host.example");
}
