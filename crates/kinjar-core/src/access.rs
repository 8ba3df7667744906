//! Effective global role.
//!
//! ROOT is granted by the persisted flag on the user record or by a
//! configured email allowlist. The allowlist is injected at startup and
//! passed around by value; nothing reads it from the environment at call
//! sites.

use std::collections::HashSet;

use crate::model::{GlobalRole, User};

#[derive(Debug, Clone, Default)]
pub struct RootAllowlist {
    emails: HashSet<String>,
}

impl RootAllowlist {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|e| normalize_email(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&normalize_email(email))
    }

    pub fn global_role_for(&self, user: &User) -> GlobalRole {
        if user.global_role.is_root() || self.contains(&user.email) {
            GlobalRole::Root
        } else {
            GlobalRole::User
        }
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn user(email: &str, role: GlobalRole) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.into(),
            name: "Test".into(),
            global_role: role,
        }
    }

    #[test]
    fn allowlist_is_case_insensitive() {
        let list = RootAllowlist::new(["Admin@Kinjar.com "]);
        assert_eq!(
            list.global_role_for(&user("admin@kinjar.com", GlobalRole::User)),
            GlobalRole::Root
        );
    }

    #[test]
    fn persisted_flag_grants_root_without_allowlist() {
        let list = RootAllowlist::default();
        assert_eq!(
            list.global_role_for(&user("ops@example.com", GlobalRole::Root)),
            GlobalRole::Root
        );
        assert_eq!(
            list.global_role_for(&user("kid@example.com", GlobalRole::User)),
            GlobalRole::User
        );
    }
}
