#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use axum::http::StatusCode;

use common::{Fixture, BASE, FAMILY_HOST};

#[tokio::test]
async fn readiness_flips_when_draining() {
    let f = Fixture::new().await;

    let (status, body) = f.get(BASE, "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    f.state.metrics().set_draining();

    let (status, body) = f.get(FAMILY_HOST, "/readyz", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "draining");

    // liveness is unaffected
    let (status, body) = f.get(BASE, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (_, body) = f.get(BASE, "/metrics", None).await;
    assert!(body.as_str().unwrap().contains("kinjar_draining 1"));
}

#[tokio::test]
async fn error_responses_are_counted_by_code() {
    let f = Fixture::new().await;

    // apex host has no tenant
    f.get(BASE, "/api/posts", None).await;
    f.get(FAMILY_HOST, "/api/posts", Some("forged")).await;
    f.get(FAMILY_HOST, "/api/posts", Some("forged")).await;
    // successes are not errors
    f.get(FAMILY_HOST, "/api/posts", None).await;

    let m = f.state.metrics();
    assert_eq!(m.api_errors.get(&[("code", "NOT_FOUND")]), 1);
    assert_eq!(m.api_errors.get(&[("code", "UNAUTHENTICATED")]), 2);
    assert_eq!(m.api_errors.get(&[("code", "INTERNAL")]), 0);

    let (_, body) = f.get(BASE, "/metrics", None).await;
    let text = body.as_str().unwrap();
    assert!(text.contains("kinjar_api_errors_total{code=\"UNAUTHENTICATED\"} 2"));
}
