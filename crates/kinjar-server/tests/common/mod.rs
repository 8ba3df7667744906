//! Fixture shared by the server integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use kinjar_core::model::{
    Audience, CreateTenant, GlobalRole, MemberRole, Post, PostKind, Tenant, User,
};
use kinjar_server::app_state::AppState;
use kinjar_server::config;
use kinjar_server::router::build_router;
use kinjar_server::store::{MemoryStore, Store};

pub const BASE: &str = "kinjar.com";
pub const FAMILY_HOST: &str = "slaughterbecks.kinjar.com";

pub const CONFIG: &str = r#"
version: 1
server:
  listen: "127.0.0.1:0"
  base_domain: "kinjar.com"
tenancy:
  reserved_labels: ["api"]
access:
  root_emails: ["root@kinjar.com"]
"#;

pub struct Fixture {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub app: Router,
    pub tenant: Tenant,
    pub root: User,
    pub owner: User,
    pub admin: User,
    pub viewer: User,
    pub outsider: User,
    /// public + unlocked
    pub public_post: Post,
    /// private + unlocked
    pub private_post: Post,
    /// public + locked until 2040
    pub capsule_post: Post,
}

fn post(
    tenant_id: Uuid,
    author_id: Uuid,
    is_public: bool,
    capsule: bool,
    minutes_ago: i64,
) -> Post {
    Post {
        id: Uuid::new_v4(),
        tenant_id,
        author_id,
        kind: PostKind::Text,
        title: Some(format!("post {minutes_ago}")),
        body: None,
        media_key: None,
        media_type: None,
        is_public,
        audience: Audience::Everyone,
        unlock_at: capsule.then(|| Utc.with_ymd_and_hms(2040, 1, 1, 0, 0, 0).unwrap()),
        published_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
    }
}

impl Fixture {
    pub async fn new() -> Self {
        let cfg = config::load_from_str(CONFIG).unwrap();
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_store(cfg, store.clone()).unwrap();

        // allowlisted email, persisted role stays USER
        let root = store.seed_user("root@kinjar.com", "Root", GlobalRole::User);
        let owner = store.seed_user("owner@example.com", "Owner", GlobalRole::User);
        let admin = store.seed_user("admin@example.com", "Admin", GlobalRole::User);
        let viewer = store.seed_user("viewer@example.com", "Viewer", GlobalRole::User);
        let outsider = store.seed_user("outsider@example.com", "Outsider", GlobalRole::User);
        for (token, u) in [
            ("root", &root),
            ("owner", &owner),
            ("admin", &admin),
            ("viewer", &viewer),
            ("outsider", &outsider),
        ] {
            store.insert_session(token, u.id).await.unwrap();
        }

        let tenant = store
            .provision_tenant(
                CreateTenant {
                    name: "The Slaughterbecks".into(),
                    slug: "slaughterbecks".into(),
                },
                owner.id,
            )
            .await
            .unwrap();
        store.add_member(tenant.id, admin.id, MemberRole::Admin).await.unwrap();
        store.add_member(tenant.id, viewer.id, MemberRole::Viewer).await.unwrap();

        let public_post = post(tenant.id, owner.id, true, false, 30);
        let private_post = post(tenant.id, admin.id, false, false, 20);
        let capsule_post = post(tenant.id, owner.id, true, true, 10);
        let public_post = store.insert_post(public_post).await.unwrap();
        let private_post = store.insert_post(private_post).await.unwrap();
        let capsule_post = store.insert_post(capsule_post).await.unwrap();

        let app = build_router(state.clone());
        Self {
            state,
            store,
            app,
            tenant,
            root,
            owner,
            admin,
            viewer,
            outsider,
            public_post,
            private_post,
            capsule_post,
        }
    }

    pub async fn call(
        &self,
        method: Method,
        host: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri).header(header::HOST, host);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(v) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, host: &str, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.call(Method::GET, host, uri, token, None).await
    }
}

pub fn ids(v: &Value) -> Vec<String> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}
