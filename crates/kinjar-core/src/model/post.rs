//! Post record and creation input.
//!
//! `is_public` and `unlock_at` are independent axes: a public post can still
//! be time-locked. Unlocking is never written back; it is evaluated at read
//! time by [`crate::visibility`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{KinjarError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostKind {
    Text,
    Photo,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Audience {
    #[default]
    Everyone,
    AdultsOnly,
    Kids,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub author_id: Uuid,
    pub kind: PostKind,
    pub title: Option<String>,
    pub body: Option<String>,
    /// Object-store key of the uploaded media.
    pub media_key: Option<String>,
    pub media_type: Option<String>,
    pub is_public: bool,
    pub audience: Audience,
    pub unlock_at: Option<DateTime<Utc>>,
    pub published_at: DateTime<Utc>,
}

/// Client input for a new post. The media itself was already uploaded through
/// the presigned flow; only its key travels here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePost {
    pub kind: PostKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub media_key: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub unlock_at: Option<DateTime<Utc>>,
}

const MAX_TITLE_CHARS: usize = 200;

impl CreatePost {
    pub fn validate(&self) -> Result<()> {
        let title = non_blank(&self.title);
        let body = non_blank(&self.body);

        if let Some(t) = title {
            if t.chars().count() > MAX_TITLE_CHARS {
                return Err(KinjarError::BadRequest(format!(
                    "title must be at most {MAX_TITLE_CHARS} characters"
                )));
            }
        }

        match self.kind {
            PostKind::Text => {
                if title.is_none() && body.is_none() {
                    return Err(KinjarError::BadRequest(
                        "text post requires a title or a body".into(),
                    ));
                }
                if self.media_key.is_some() {
                    return Err(KinjarError::BadRequest(
                        "text post must not carry media".into(),
                    ));
                }
            }
            PostKind::Photo => check_media(&self.media_key, &self.media_type, "image/")?,
            PostKind::Video => check_media(&self.media_key, &self.media_type, "video/")?,
        }
        Ok(())
    }

    /// Validate and stamp the input into a stored post.
    pub fn into_post(self, tenant_id: Uuid, author_id: Uuid, now: DateTime<Utc>) -> Result<Post> {
        self.validate()?;
        Ok(Post {
            id: Uuid::new_v4(),
            tenant_id,
            author_id,
            kind: self.kind,
            title: self.title.filter(|s| !s.trim().is_empty()),
            body: self.body.filter(|s| !s.trim().is_empty()),
            media_key: self.media_key,
            media_type: self.media_type,
            is_public: self.is_public,
            audience: self.audience,
            unlock_at: self.unlock_at,
            published_at: now,
        })
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn check_media(key: &Option<String>, media_type: &Option<String>, prefix: &str) -> Result<()> {
    if non_blank(key).is_none() {
        return Err(KinjarError::BadRequest("media post requires mediaKey".into()));
    }
    if let Some(mt) = media_type {
        if !mt.starts_with(prefix) {
            return Err(KinjarError::BadRequest(format!(
                "mediaType {mt} does not match post kind (expected {prefix}*)"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    fn text(title: Option<&str>, body: Option<&str>) -> CreatePost {
        CreatePost {
            kind: PostKind::Text,
            title: title.map(str::to_string),
            body: body.map(str::to_string),
            media_key: None,
            media_type: None,
            is_public: false,
            audience: Audience::Everyone,
            unlock_at: None,
        }
    }

    #[test]
    fn text_post_needs_content() {
        assert!(text(None, None).validate().is_err());
        assert!(text(Some("   "), None).validate().is_err());
        assert!(text(None, Some("hello")).validate().is_ok());
    }

    #[test]
    fn photo_post_needs_image_media() {
        let mut p = text(None, None);
        p.kind = PostKind::Photo;
        assert!(p.validate().is_err());

        p.media_key = Some("uploads/fam/cat.jpg".into());
        p.media_type = Some("video/mp4".into());
        assert!(p.validate().is_err());

        p.media_type = Some("image/jpeg".into());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn into_post_drops_blank_fields() {
        let post = text(Some("Hi"), Some("  "))
            .into_post(Uuid::new_v4(), Uuid::new_v4(), Utc::now())
            .expect("valid");
        assert_eq!(post.title.as_deref(), Some("Hi"));
        assert!(post.body.is_none());
    }
}
