mod common;

use uuid::Uuid;

use common::{admin_service, seed_admin, seed_participant, InMemoryStore};
use hackathon_backend::model::admin::{AdminRole, AdminStatus};
use hackathon_backend::service::admin_service::AdminService;
use hackathon_backend::util::error::ServiceError;

#[tokio::test]
async fn test_admin_cannot_assign_super_admin() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);
    let actor = seed_admin(&store, "admin@example.com", AdminRole::Admin).await;
    let volunteer = seed_admin(&store, "vol@example.com", AdminRole::Volunteer).await;
    let participant = seed_participant(&store, "p@example.com").await;

    let created = service.create_admin(&actor, "new@example.com", AdminRole::SuperAdmin).await;
    assert!(matches!(created, Err(ServiceError::Forbidden(_))));

    let promoted = service.promote_participant(&actor, participant.id, AdminRole::SuperAdmin).await;
    assert!(matches!(promoted, Err(ServiceError::Forbidden(_))));

    let changed = service.change_role(&actor, volunteer.id, AdminRole::SuperAdmin).await;
    assert!(matches!(changed, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_super_admin_can_assign_any_role() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);
    let actor = seed_admin(&store, "root@example.com", AdminRole::SuperAdmin).await;
    let participant = seed_participant(&store, "p@example.com").await;

    let promoted = service.promote_participant(&actor, participant.id, AdminRole::SuperAdmin).await.unwrap();
    assert_eq!(promoted.role, AdminRole::SuperAdmin);
    assert_eq!(promoted.email, "p@example.com");

    let demoted = service.change_role(&actor, promoted.id, AdminRole::Volunteer).await.unwrap();
    assert_eq!(demoted.role, AdminRole::Volunteer);
}

#[tokio::test]
async fn test_admin_cannot_remove_own_privileges() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);

    for role in [AdminRole::Admin, AdminRole::SuperAdmin] {
        let actor = seed_admin(&store, &format!("self-{}@example.com", role), role).await;

        assert!(matches!(service.remove_admin(&actor, actor.id).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(
            service.change_role(&actor, actor.id, AdminRole::Volunteer).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            service.set_status(&actor, actor.id, AdminStatus::Inactive).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(service.find_active_by_email(&actor.email).await.unwrap().is_some());
    }
}

#[tokio::test]
async fn test_admin_cannot_touch_super_admin() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);
    let actor = seed_admin(&store, "admin@example.com", AdminRole::Admin).await;
    let root = seed_admin(&store, "root@example.com", AdminRole::SuperAdmin).await;

    assert!(service.remove_admin(&actor, root.id).await.is_err());
    assert!(service.set_status(&actor, root.id, AdminStatus::Inactive).await.is_err());
    assert!(service.change_role(&actor, root.id, AdminRole::Admin).await.is_err());
}

#[tokio::test]
async fn test_admin_manages_lower_and_equal_tiers() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);
    let actor = seed_admin(&store, "admin@example.com", AdminRole::Admin).await;
    let peer = seed_admin(&store, "peer@example.com", AdminRole::Admin).await;

    let demoted = service.change_role(&actor, peer.id, AdminRole::Volunteer).await.unwrap();
    assert_eq!(demoted.role, AdminRole::Volunteer);

    let inactive = service.set_status(&actor, peer.id, AdminStatus::Inactive).await.unwrap();
    assert_eq!(inactive.status, AdminStatus::Inactive);
    assert!(service.find_active_by_email("peer@example.com").await.unwrap().is_none());

    service.remove_admin(&actor, peer.id).await.unwrap();
    assert!(matches!(service.remove_admin(&actor, peer.id).await, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_volunteer_cannot_manage_anyone() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);
    let actor = seed_admin(&store, "vol@example.com", AdminRole::Volunteer).await;
    let other = seed_admin(&store, "vol2@example.com", AdminRole::Volunteer).await;

    assert!(service.create_admin(&actor, "x@example.com", AdminRole::Volunteer).await.is_err());
    assert!(service.remove_admin(&actor, other.id).await.is_err());
}

#[tokio::test]
async fn test_inactive_actor_has_no_privileges() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);
    let mut actor = seed_admin(&store, "root@example.com", AdminRole::SuperAdmin).await;
    actor.status = AdminStatus::Inactive;

    let result = service.create_admin(&actor, "x@example.com", AdminRole::Volunteer).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_promoting_existing_admin_is_conflict() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);
    let actor = seed_admin(&store, "root@example.com", AdminRole::SuperAdmin).await;
    let participant = seed_participant(&store, "p@example.com").await;

    service.promote_participant(&actor, participant.id, AdminRole::Volunteer).await.unwrap();
    let again = service.promote_participant(&actor, participant.id, AdminRole::Admin).await;
    assert!(matches!(again, Err(ServiceError::Conflict(_))));

    let direct = service.create_admin(&actor, "P@Example.com", AdminRole::Admin).await;
    assert!(matches!(direct, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn test_promoting_unknown_participant_is_not_found() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);
    let actor = seed_admin(&store, "root@example.com", AdminRole::SuperAdmin).await;

    let result = service.promote_participant(&actor, Uuid::new_v4(), AdminRole::Volunteer).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_bootstrap_super_admin_is_idempotent() {
    let store = InMemoryStore::new();
    let service = admin_service(&store);

    let created = service.ensure_bootstrap_super_admin(" Root@Example.com ").await.unwrap();
    let created = created.expect("first run creates the admin");
    assert_eq!(created.role, AdminRole::SuperAdmin);
    assert_eq!(created.email, "root@example.com");

    assert!(service.ensure_bootstrap_super_admin("root@example.com").await.unwrap().is_none());
    assert_eq!(service.list_admins().await.unwrap().len(), 1);
}
