//! Integration tests for a full share dialog: aggregate, edit, check, save.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use vaultshare_core::config::AppConfig;
use vaultshare_core::error::{AppError, ErrorKind};
use vaultshare_core::result::AppResult;
use vaultshare_core::types::{AcoId, AroId, PermissionId};
use vaultshare_entity::{AccessControlObject, AccessLevel, AcoKind, Grantee, Permission};
use vaultshare_share::{
    GrantLevel, JsonFileStore, PermissionStore, SaveRequest, SessionState, ShareSession,
    StaticDirectory, aggregate,
};

fn user(name: &str) -> Grantee {
    Grantee::User {
        id: AroId::new(),
        username: name.to_lowercase(),
        first_name: name.to_string(),
        last_name: String::new(),
    }
}

fn object(kind: AcoKind, name: &str, grants: &[(&Grantee, AccessLevel)]) -> AccessControlObject {
    let id = AcoId::new();
    AccessControlObject {
        id,
        kind,
        name: name.to_string(),
        permissions: grants
            .iter()
            .map(|(aro, level)| Permission {
                id: Some(PermissionId::new()),
                aco_id: id,
                aco_kind: kind,
                aro: (*aro).clone(),
                level: *level,
            })
            .collect(),
    }
}

/// Store that never answers, used to cancel a save mid-flight.
#[derive(Debug)]
struct HangingStore;

#[async_trait]
impl PermissionStore for HangingStore {
    async fn simulate(&self, _request: &SaveRequest) -> AppResult<()> {
        Ok(())
    }

    async fn update_permissions(&self, _request: &SaveRequest) -> AppResult<()> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

/// Store that fails the first commit and accepts the next.
#[derive(Debug, Default)]
struct FlakyStore {
    attempts: Mutex<u32>,
}

#[async_trait]
impl PermissionStore for FlakyStore {
    async fn simulate(&self, _request: &SaveRequest) -> AppResult<()> {
        Ok(())
    }

    async fn update_permissions(&self, _request: &SaveRequest) -> AppResult<()> {
        let mut attempts = self.attempts.lock().unwrap();
        *attempts += 1;
        if *attempts == 1 {
            Err(AppError::external_service("Service unavailable"))
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_owner_invariant_round_trip() {
    let u1 = user("Una");
    let u2 = user("Duo");
    let acos = vec![object(
        AcoKind::Resource,
        "R1",
        &[(&u1, AccessLevel::Owner), (&u2, AccessLevel::Owner)],
    )];
    let mut session = ShareSession::new(acos, &AppConfig::default()).unwrap();

    session.remove_grantee(u1.id()).unwrap();
    session.remove_grantee(u2.id()).unwrap();
    assert_eq!(session.ownerless_object_names(), vec!["R1"]);
    assert!(session.begin_save().unwrap_err().is(ErrorKind::Validation));

    session.add_grantee(u1.clone()).unwrap();
    session.set_level(u1.id(), AccessLevel::Owner).unwrap();
    assert!(session.ownerless_object_names().is_empty());

    let row = session.grants().into_iter().find(|g| g.aro.id() == u1.id()).unwrap();
    assert_eq!(row.level, GrantLevel::Uniform(AccessLevel::Owner));
}

#[test]
fn test_initial_view_matches_persisted_state() {
    let u1 = user("Una");
    let acos = vec![
        object(AcoKind::Resource, "R1", &[(&u1, AccessLevel::Read)]),
        object(AcoKind::Resource, "R2", &[]),
    ];

    let session = ShareSession::new(acos.clone(), &AppConfig::default()).unwrap();
    assert_eq!(session.grants(), aggregate::build(&acos));
    assert_eq!(session.grants()[0].level, GrantLevel::Varies);
}

#[tokio::test]
async fn test_failed_save_can_be_retried() {
    let owner = user("Owen");
    let acos = vec![
        object(AcoKind::Resource, "R1", &[(&owner, AccessLevel::Owner)]),
        object(AcoKind::Folder, "F1", &[(&owner, AccessLevel::Owner)]),
    ];
    let mut session = ShareSession::new(acos, &AppConfig::default()).unwrap();
    let newcomer = user("Nia");
    session.add_grantee(newcomer.clone()).unwrap();
    let pending = session.engine().diff();

    let store = FlakyStore::default();
    let err = session.save(&store).await.unwrap_err();
    assert_eq!(err.message, "Service unavailable");
    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.engine().diff(), pending);

    let summary = session.save(&store).await.unwrap();
    assert_eq!((summary.resources, summary.folders), (1, 1));
    assert_eq!(session.state(), SessionState::Saved);
}

#[tokio::test]
async fn test_cancelled_save_returns_to_editing() {
    let owner = user("Owen");
    let acos = vec![object(AcoKind::Resource, "R1", &[(&owner, AccessLevel::Owner)])];
    let mut session = ShareSession::new(acos, &AppConfig::default()).unwrap();
    let newcomer = user("Nia");
    session.add_grantee(newcomer.clone()).unwrap();

    let timed_out = tokio::time::timeout(Duration::from_millis(20), session.save(&HangingStore)).await;
    assert!(timed_out.is_err());

    assert_eq!(session.state(), SessionState::Editing);
    assert!(session.engine().has_pending_change(newcomer.id()));
    session.set_level(newcomer.id(), AccessLevel::Update).unwrap();
}

#[tokio::test]
async fn test_search_then_save_to_file() {
    let owner = user("Owen");
    let olga = user("Olga");
    let acos = vec![object(AcoKind::Folder, "Shared", &[(&owner, AccessLevel::Owner)])];
    let directory = StaticDirectory::new(vec![owner.clone(), olga.clone()]);
    let mut session = ShareSession::new(acos, &AppConfig::default()).unwrap();

    let found = session.search_grantees(&directory, "olg").await.unwrap();
    assert_eq!(found, vec![olga.clone()]);
    session.add_grantee(found[0].clone()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    session.save(&JsonFileStore::new(&path)).await.unwrap();

    let written: SaveRequest = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert!(written.resources.is_empty());
    assert_eq!(written.folders.len(), 1);
    assert_eq!(written.folders[0].aro_foreign_key, olga.id());
    assert_eq!(written.folders[0].level, AccessLevel::Read);
    assert!(written.folders[0].is_new);
}
