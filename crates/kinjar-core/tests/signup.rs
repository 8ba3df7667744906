#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::Utc;
use uuid::Uuid;

use kinjar_core::error::ClientCode;
use kinjar_core::model::GlobalRole;
use kinjar_core::signup::{Decider, Decision, SignupStatus, SubmitSignup};

fn submit(slug: &str) -> SubmitSignup {
    SubmitSignup {
        email: "Pat@Example.com".into(),
        name: "Pat".into(),
        family_name: "The Slaughterbecks".into(),
        slug: slug.into(),
    }
}

fn root() -> Decider {
    Decider {
        user_id: Uuid::new_v4(),
        global_role: GlobalRole::Root,
    }
}

#[test]
fn submission_normalizes_fields() {
    let req = submit("Slaughterbecks").into_request(Utc::now()).unwrap();
    assert_eq!(req.status, SignupStatus::Pending);
    assert_eq!(req.email, "pat@example.com");
    assert_eq!(req.desired_slug, "slaughterbecks");
}

#[test]
fn submission_rejects_reserved_slug() {
    let err = submit("www").into_request(Utc::now()).unwrap_err();
    assert_eq!(err.client_code(), ClientCode::BadRequest);
}

#[test]
fn non_root_cannot_decide() {
    let mut req = submit("smiths").into_request(Utc::now()).unwrap();
    let user = Decider {
        user_id: Uuid::new_v4(),
        global_role: GlobalRole::User,
    };
    let err = req
        .apply(&user, Decision::Reject { reason: None }, Utc::now())
        .unwrap_err();
    assert_eq!(err.client_code(), ClientCode::Unauthorized);
    assert_eq!(req.status, SignupStatus::Pending);
}

#[test]
fn approval_is_terminal() {
    let mut req = submit("smiths").into_request(Utc::now()).unwrap();
    let tenant_id = Uuid::new_v4();
    req.apply(&root(), Decision::Approve { tenant_id }, Utc::now())
        .unwrap();
    assert_eq!(req.status, SignupStatus::Approved);
    assert_eq!(req.tenant_id, Some(tenant_id));
    assert!(req.decided_at.is_some());

    let err = req
        .apply(&root(), Decision::Reject { reason: None }, Utc::now())
        .unwrap_err();
    assert_eq!(err.client_code(), ClientCode::Conflict);
    assert_eq!(req.status, SignupStatus::Approved);
}

#[test]
fn rejection_keeps_trimmed_reason() {
    let mut req = submit("smiths").into_request(Utc::now()).unwrap();
    req.apply(
        &root(),
        Decision::Reject {
            reason: Some("  duplicate family  ".into()),
        },
        Utc::now(),
    )
    .unwrap();
    assert_eq!(req.status, SignupStatus::Rejected);
    assert_eq!(req.reason.as_deref(), Some("duplicate family"));
}
