use chrono::Utc;
use uuid::Uuid;

use hackathon_backend::model::admin::{Admin, AdminRole, AdminStatus};
use hackathon_backend::service::role_policy::*;
use hackathon_backend::util::error::ServiceError;

const ALL_ROLES: [AdminRole; 3] = [AdminRole::Volunteer, AdminRole::Admin, AdminRole::SuperAdmin];

fn admin(role: AdminRole) -> Admin {
    Admin {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", role),
        role,
        status: AdminStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_role_ordering() {
    assert!(AdminRole::Volunteer < AdminRole::Admin);
    assert!(AdminRole::Admin < AdminRole::SuperAdmin);
}

#[test]
fn test_super_admin_manages_and_assigns_everything() {
    for role in ALL_ROLES {
        assert!(can_manage(AdminRole::SuperAdmin, role));
        assert!(can_assign(AdminRole::SuperAdmin, role));
    }
}

#[test]
fn test_admin_table_row() {
    assert!(can_manage(AdminRole::Admin, AdminRole::Volunteer));
    assert!(can_manage(AdminRole::Admin, AdminRole::Admin));
    assert!(!can_manage(AdminRole::Admin, AdminRole::SuperAdmin));

    assert!(can_assign(AdminRole::Admin, AdminRole::Volunteer));
    assert!(can_assign(AdminRole::Admin, AdminRole::Admin));
    assert!(!can_assign(AdminRole::Admin, AdminRole::SuperAdmin));
}

#[test]
fn test_volunteer_has_no_rights() {
    for role in ALL_ROLES {
        assert!(!can_manage(AdminRole::Volunteer, role));
        assert!(!can_assign(AdminRole::Volunteer, role));
    }
}

#[test]
fn test_admin_cannot_grant_super_admin() {
    let actor = admin(AdminRole::Admin);
    assert_eq!(
        check_grant(&actor, AdminRole::SuperAdmin),
        Err(PolicyViolation::CannotAssign { actor: AdminRole::Admin, role: AdminRole::SuperAdmin })
    );
    assert!(check_grant(&actor, AdminRole::Volunteer).is_ok());
}

#[test]
fn test_self_modification_is_blocked_for_every_tier() {
    for role in ALL_ROLES {
        let actor = admin(role);
        assert_eq!(check_target(&actor, &actor), Err(PolicyViolation::SelfModification));
        assert_eq!(
            check_role_change(&actor, &actor, AdminRole::Volunteer),
            Err(PolicyViolation::SelfModification)
        );
    }
}

#[test]
fn test_admin_cannot_demote_super_admin() {
    let actor = admin(AdminRole::Admin);
    let target = admin(AdminRole::SuperAdmin);
    assert!(matches!(
        check_role_change(&actor, &target, AdminRole::Volunteer),
        Err(PolicyViolation::InsufficientTier { .. })
    ));
    assert!(check_target(&actor, &target).is_err());
}

#[test]
fn test_admin_cannot_raise_peer_to_super_admin() {
    let actor = admin(AdminRole::Admin);
    let target = admin(AdminRole::Volunteer);
    assert!(matches!(
        check_role_change(&actor, &target, AdminRole::SuperAdmin),
        Err(PolicyViolation::CannotAssign { .. })
    ));
    assert!(check_role_change(&actor, &target, AdminRole::Admin).is_ok());
}

#[test]
fn test_inactive_actor_has_no_privileges() {
    let mut actor = admin(AdminRole::SuperAdmin);
    actor.status = AdminStatus::Inactive;
    let target = admin(AdminRole::Volunteer);

    assert_eq!(check_grant(&actor, AdminRole::Volunteer), Err(PolicyViolation::InactiveActor));
    assert_eq!(check_target(&actor, &target), Err(PolicyViolation::InactiveActor));
}

#[test]
fn test_violation_maps_to_forbidden() {
    let err: ServiceError = PolicyViolation::SelfModification.into();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}
