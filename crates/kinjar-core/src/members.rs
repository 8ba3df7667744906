//! Membership management rules.
//!
//! OWNER and ADMIN manage members; ROOT may act in any tenant. Only an OWNER
//! (or ROOT) may grant the OWNER role or change an existing OWNER's role.

use crate::error::{KinjarError, Result};
use crate::model::MemberRole;
use crate::visibility::Viewer;

fn acts_as_owner(actor: &Viewer) -> bool {
    actor.is_root() || actor.membership == Some(MemberRole::Owner)
}

/// May `actor` add a member with `role`?
pub fn check_add(actor: &Viewer, role: MemberRole) -> Result<()> {
    if !actor.is_privileged() {
        return Err(KinjarError::Unauthorized(
            "only an owner or admin may add members".into(),
        ));
    }
    if role == MemberRole::Owner && !acts_as_owner(actor) {
        return Err(KinjarError::Unauthorized(
            "only an owner may grant the OWNER role".into(),
        ));
    }
    Ok(())
}

/// May `actor` move a member from `current` to `next`?
pub fn check_role_change(actor: &Viewer, current: MemberRole, next: MemberRole) -> Result<()> {
    if !actor.is_privileged() {
        return Err(KinjarError::Unauthorized(
            "only an owner or admin may change roles".into(),
        ));
    }
    if (current == MemberRole::Owner || next == MemberRole::Owner) && !acts_as_owner(actor) {
        return Err(KinjarError::Unauthorized(
            "only an owner may change OWNER roles".into(),
        ));
    }
    Ok(())
}

/// Store-side invariant: a tenant keeps at least one OWNER.
pub fn ensure_owner_remains(owners_after: usize) -> Result<()> {
    if owners_after == 0 {
        return Err(KinjarError::Conflict(
            "a family must keep at least one owner".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_cannot_touch_owners() {
        let admin = Viewer::member(MemberRole::Admin);
        assert!(check_add(&admin, MemberRole::Adult).is_ok());
        assert!(check_add(&admin, MemberRole::Owner).is_err());
        assert!(check_role_change(&admin, MemberRole::Child, MemberRole::Adult).is_ok());
        assert!(check_role_change(&admin, MemberRole::Owner, MemberRole::Admin).is_err());
    }

    #[test]
    fn plain_members_cannot_manage() {
        let adult = Viewer::member(MemberRole::Adult);
        assert!(check_add(&adult, MemberRole::Viewer).is_err());
        assert!(check_role_change(&adult, MemberRole::Child, MemberRole::Viewer).is_err());
    }

    #[test]
    fn root_acts_as_owner() {
        assert!(check_add(&Viewer::root(), MemberRole::Owner).is_ok());
    }

    #[test]
    fn last_owner_is_kept() {
        assert!(ensure_owner_remains(0).is_err());
        assert!(ensure_owner_remains(1).is_ok());
    }
}
