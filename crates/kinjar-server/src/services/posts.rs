use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use kinjar_core::error::{KinjarError, Result};
use kinjar_core::model::{CreatePost, Post};
use kinjar_core::visibility::can_view;
use kinjar_core::filter_visible;

use crate::app_state::AppState;
use crate::context::RequestContext;
use crate::obs::KinjarMetrics;
use crate::store::Store;

pub struct PostService {
    store: Arc<dyn Store>,
    metrics: Arc<KinjarMetrics>,
}

impl PostService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store(),
            metrics: state.metrics(),
        }
    }

    /// Newest first, filtered for the viewer.
    pub async fn list(&self, ctx: &RequestContext, now: DateTime<Utc>) -> Result<Vec<Post>> {
        let tenant = ctx.tenant()?;
        let all = self.store.posts(tenant.id).await?;
        let total = all.len();
        let visible = filter_visible(all, Some(&ctx.viewer), now);

        let hidden = (total - visible.len()) as u64;
        self.metrics
            .posts_served
            .add(&[("tenant", tenant.slug.as_str())], visible.len() as u64);
        if hidden > 0 {
            self.metrics.posts_hidden.add(&[("tenant", tenant.slug.as_str())], hidden);
        }
        Ok(visible)
    }

    /// A post the viewer may not see is reported as missing.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid, now: DateTime<Utc>) -> Result<Post> {
        let tenant = ctx.tenant()?;
        let post = self
            .store
            .post(tenant.id, id)
            .await?
            .filter(|p| can_view(p, Some(&ctx.viewer), now))
            .ok_or_else(|| KinjarError::NotFound(format!("post {id}")))?;
        Ok(post)
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreatePost,
        now: DateTime<Utc>,
    ) -> Result<Post> {
        let tenant = ctx.tenant()?;
        let user = ctx.user()?;
        if !ctx.viewer.is_member() {
            return Err(KinjarError::Unauthorized(format!(
                "only members of {} may post",
                tenant.slug
            )));
        }

        let post = input.into_post(tenant.id, user.id, now)?;
        let post = self.store.insert_post(post).await?;
        tracing::info!(
            tenant = %tenant.slug,
            post = %post.id,
            author = %user.id,
            locked_until = ?post.unlock_at,
            public = post.is_public,
            "post created"
        );
        Ok(post)
    }

    /// Author, OWNER/ADMIN, or ROOT.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<()> {
        let tenant = ctx.tenant()?;
        let user = ctx.user()?;
        let post = self
            .store
            .post(tenant.id, id)
            .await?
            .ok_or_else(|| KinjarError::NotFound(format!("post {id}")))?;

        let is_author = post.author_id == user.id && ctx.viewer.is_member();
        if !is_author && !ctx.viewer.is_privileged() {
            return Err(KinjarError::Unauthorized(
                "only the author or a family admin may delete this post".into(),
            ));
        }

        self.store.delete_post(tenant.id, id).await?;
        tracing::info!(tenant = %tenant.slug, post = %id, by = %user.id, "post deleted");
        Ok(())
    }
}
