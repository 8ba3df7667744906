//! Read-time post visibility.
//!
//! Two independent predicates decide whether a viewer may see a post:
//!
//! - **lock check**: the post is not time-locked (`unlock_at > now`), or the
//!   viewer is ROOT, or an OWNER/ADMIN of the tenant;
//! - **audience check**: the viewer is a member of the tenant (any role), or
//!   the post is public. ROOT passes as well.
//!
//! A post is visible when both pass. Anonymous viewers have neither a global
//! role nor a membership, which is the most restrictive case.

use chrono::{DateTime, Utc};

use crate::model::{GlobalRole, MemberRole, Post};

/// Who is asking, relative to the tenant the posts belong to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer {
    pub global_role: Option<GlobalRole>,
    /// Role in *this* tenant; `None` for non-members.
    pub membership: Option<MemberRole>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn member(role: MemberRole) -> Self {
        Self {
            global_role: Some(GlobalRole::User),
            membership: Some(role),
        }
    }

    pub fn root() -> Self {
        Self {
            global_role: Some(GlobalRole::Root),
            membership: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.global_role.is_some_and(GlobalRole::is_root)
    }

    pub fn is_member(&self) -> bool {
        self.membership.is_some()
    }

    /// ROOT, OWNER or ADMIN.
    pub fn is_privileged(&self) -> bool {
        self.is_root() || self.membership.is_some_and(MemberRole::is_privileged)
    }
}

pub fn is_time_locked(post: &Post, now: DateTime<Utc>) -> bool {
    post.unlock_at.is_some_and(|at| at > now)
}

pub fn passes_lock_check(post: &Post, viewer: &Viewer, now: DateTime<Utc>) -> bool {
    !is_time_locked(post, now) || viewer.is_privileged()
}

pub fn passes_audience_check(post: &Post, viewer: &Viewer) -> bool {
    viewer.is_root() || viewer.is_member() || post.is_public
}

pub fn can_view(post: &Post, viewer: Option<&Viewer>, now: DateTime<Utc>) -> bool {
    let anon = Viewer::anonymous();
    let viewer = viewer.unwrap_or(&anon);
    passes_lock_check(post, viewer, now) && passes_audience_check(post, viewer)
}

/// Keep the posts `viewer` may see, preserving input order.
pub fn filter_visible(posts: Vec<Post>, viewer: Option<&Viewer>, now: DateTime<Utc>) -> Vec<Post> {
    let before = posts.len();
    let visible: Vec<Post> = posts
        .into_iter()
        .filter(|p| can_view(p, viewer, now))
        .collect();
    tracing::trace!(before, after = visible.len(), "visibility filter applied");
    visible
}
