#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use kinjar_server::app_state::AppState;
use kinjar_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  base_domain: "kinjar.com"
  listne: "0.0.0.0:8080" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
server:
  base_domain: "kinjar.com"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert!(cfg.access.root_emails.is_empty());
}

#[test]
fn rejects_unsupported_version() {
    let bad = r#"
version: 2
server:
  base_domain: "kinjar.com"
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_bad_base_domain_and_listen() {
    let cases = [
        ("0.0.0.0:8080", "kinjar..com"),
        ("0.0.0.0:8080", ""),
        ("nope", "kinjar.com"),
    ];
    for (listen, base) in cases {
        let yaml = format!(
            "version: 1\nserver:\n  listen: \"{listen}\"\n  base_domain: \"{base}\"\n"
        );
        assert!(config::load_from_str(&yaml).is_err(), "{listen} {base}");
    }
}

#[test]
fn rejects_duplicate_dev_tokens() {
    let bad = r#"
version: 1
server:
  base_domain: "kinjar.com"
auth:
  dev_sessions:
    - { token: "dev", email: "a@example.com" }
    - { token: "dev", email: "b@example.com" }
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[tokio::test]
async fn dev_sessions_seed_users() {
    let yaml = r#"
version: 1
server:
  base_domain: "kinjar.com"
access:
  root_emails: ["root@kinjar.com"]
auth:
  dev_sessions:
    - { token: "dev-root", email: "Root@Kinjar.com", name: "Root" }
"#;
    let state = AppState::new(config::load_from_str(yaml).unwrap()).unwrap();
    assert_eq!(state.seed_dev_sessions().await.unwrap(), 1);

    let ctx = kinjar_server::context::resolve_context(&state, "kinjar.com", Some("dev-root"))
        .await
        .unwrap();
    assert!(ctx.viewer.is_root());
    assert_eq!(ctx.user.unwrap().email, "root@kinjar.com");
}
