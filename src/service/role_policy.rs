//! Who may act on which admin, and which roles they may hand out.
//!
//! | actor        | acts on             | assigns                       |
//! |--------------|---------------------|-------------------------------|
//! | super_admin  | any admin           | volunteer, admin, super_admin |
//! | admin        | volunteer, admin    | volunteer, admin              |
//! | volunteer    | nobody              | nothing                       |
//!
//! On top of the table an actor never modifies their own admin record, and an
//! inactive actor holds no rights at all.

use crate::model::admin::{Admin, AdminRole};
use crate::util::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    InactiveActor,
    InsufficientTier { actor: AdminRole, target: AdminRole },
    CannotAssign { actor: AdminRole, role: AdminRole },
    SelfModification,
}

impl std::fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyViolation::InactiveActor => write!(f, "Inactive admins have no privileges"),
            PolicyViolation::InsufficientTier { actor, target } => {
                write!(f, "A {} may not manage a {}", actor, target)
            }
            PolicyViolation::CannotAssign { actor, role } => {
                write!(f, "A {} may not assign the {} role", actor, role)
            }
            PolicyViolation::SelfModification => {
                write!(f, "Admins may not modify their own admin record")
            }
        }
    }
}

impl From<PolicyViolation> for ServiceError {
    fn from(violation: PolicyViolation) -> Self {
        ServiceError::Forbidden(violation.to_string())
    }
}

/// Whether `actor` may modify an admin currently holding `target`.
pub fn can_manage(actor: AdminRole, target: AdminRole) -> bool {
    actor >= AdminRole::Admin && target <= actor
}

/// Whether `actor` may grant `role` to anyone.
pub fn can_assign(actor: AdminRole, role: AdminRole) -> bool {
    actor >= AdminRole::Admin && role <= actor
}

fn ensure_active(actor: &Admin) -> Result<(), PolicyViolation> {
    if actor.is_active() {
        Ok(())
    } else {
        Err(PolicyViolation::InactiveActor)
    }
}

/// Creating an admin or promoting a participant into `role`.
pub fn check_grant(actor: &Admin, role: AdminRole) -> Result<(), PolicyViolation> {
    ensure_active(actor)?;
    if !can_assign(actor.role, role) {
        return Err(PolicyViolation::CannotAssign { actor: actor.role, role });
    }
    Ok(())
}

/// Changing the status of, or removing, an existing admin.
pub fn check_target(actor: &Admin, target: &Admin) -> Result<(), PolicyViolation> {
    ensure_active(actor)?;
    if actor.id == target.id {
        return Err(PolicyViolation::SelfModification);
    }
    if !can_manage(actor.role, target.role) {
        return Err(PolicyViolation::InsufficientTier { actor: actor.role, target: target.role });
    }
    Ok(())
}

/// Moving `target` to `new_role`: the current and the new role must both be within reach.
pub fn check_role_change(actor: &Admin, target: &Admin, new_role: AdminRole) -> Result<(), PolicyViolation> {
    check_target(actor, target)?;
    if !can_assign(actor.role, new_role) {
        return Err(PolicyViolation::CannotAssign { actor: actor.role, role: new_role });
    }
    Ok(())
}
