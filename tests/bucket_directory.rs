mod common;

use async_trait::async_trait;
use bucket_service::{
    models::bucket::{AclMode, BucketInfo, BucketSummary},
    repository::{BucketRepository, SqliteStore, StoreError, StoreResult},
    services::{
        bucket_service::{BucketError, BucketService},
        id_generator::RandomIdGenerator,
    },
};
use common::{bucket_rows, new_caller, setup_service};
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn create_then_name_is_unavailable() {
    let (service, _) = setup_service().await;
    let caller = new_caller();

    assert!(service.bucket_name_available("photos").await.unwrap());
    let bucket = service
        .create(&caller, "photos", "us-west-2", AclMode::PublicRead)
        .await
        .unwrap();

    assert_eq!(bucket.name, "photos");
    assert_eq!(bucket.user_id, caller.id);
    assert_eq!(bucket.acl, AclMode::PublicRead);
    assert!(!service.bucket_name_available("photos").await.unwrap());
}

#[tokio::test]
async fn duplicate_name_is_rejected_without_write() {
    let (service, store) = setup_service().await;
    let owner = new_caller();
    let other = new_caller();

    service
        .create(&owner, "shared-name", "local", AclMode::Private)
        .await
        .unwrap();
    let before = bucket_rows(&store.db).await;

    // Names are global, so a different user cannot take it either.
    let err = service
        .create(&other, "shared-name", "eu-west-1", AclMode::Private)
        .await
        .unwrap_err();
    assert!(matches!(err, BucketError::BucketNameTaken(name) if name == "shared-name"));
    assert_eq!(bucket_rows(&store.db).await, before);
}

#[tokio::test]
async fn unknown_region_is_rejected_without_write() {
    let (service, store) = setup_service().await;

    let err = service
        .create(&new_caller(), "orphan", "mars-north-1", AclMode::Private)
        .await
        .unwrap_err();
    assert!(matches!(err, BucketError::RegionNotFound(code) if code == "mars-north-1"));
    assert_eq!(bucket_rows(&store.db).await, 0);
}

#[tokio::test]
async fn blank_name_is_rejected_without_write() {
    let (service, store) = setup_service().await;

    let err = service
        .create(&new_caller(), "   ", "local", AclMode::Private)
        .await
        .unwrap_err();
    assert!(matches!(err, BucketError::InvalidBucketName { .. }));
    assert_eq!(bucket_rows(&store.db).await, 0);
}

#[tokio::test]
async fn names_outside_dns_rules_are_accepted() {
    let (service, _) = setup_service().await;
    let caller = new_caller();

    for name in ["MyBucket", "under_score", "ab"] {
        let bucket = service
            .create(&caller, name, "local", AclMode::Private)
            .await
            .unwrap();
        assert_eq!(bucket.name, name);
        assert!(!service.bucket_name_available(name).await.unwrap());
    }
}

#[tokio::test]
async fn ownership_checks() {
    let (service, _) = setup_service().await;
    let owner = new_caller();
    let stranger = new_caller();
    let created = service
        .create(&owner, "owned", "local", AclMode::Private)
        .await
        .unwrap();

    let found = service.require_owned_bucket(&owner, "owned").await.unwrap();
    assert_eq!(found.id, created.id);

    let err = service
        .require_owned_bucket(&stranger, "owned")
        .await
        .unwrap_err();
    assert!(matches!(err, BucketError::BucketNotFound(_)));

    assert!(service.caller_owns_bucket(owner.id, "owned").await.unwrap());
    assert!(!service.caller_owns_bucket(stranger.id, "owned").await.unwrap());
    assert!(!service.caller_owns_bucket(owner.id, "missing").await.unwrap());
}

#[tokio::test]
async fn list_is_scoped_to_owner_and_filtered_by_name() {
    let (service, _) = setup_service().await;
    let owner = new_caller();
    for name in ["logs-prod", "logs-dev", "assets"] {
        service
            .create(&owner, name, "us-east-1", AclMode::Private)
            .await
            .unwrap();
    }
    service
        .create(&new_caller(), "logs-other", "us-east-1", AclMode::Private)
        .await
        .unwrap();

    let all = service.list_bucket(owner.id, None).await.unwrap();
    let names: Vec<&str> = all.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["assets", "logs-dev", "logs-prod"]);
    assert!(all.iter().all(|b| b.region_code == "us-east-1"));

    let logs: Vec<BucketSummary> = service.list_bucket(owner.id, Some("logs")).await.unwrap();
    assert_eq!(logs.len(), 2);

    let none = service.list_bucket(owner.id, Some("zzz")).await.unwrap();
    assert!(none.is_empty());
}

/// Reports every name as free, like a concurrent creator that passed the
/// check before the other insert landed.
struct StaleCount(SqliteStore);

#[async_trait]
impl BucketRepository for StaleCount {
    async fn list_by_owner(
        &self,
        owner: Uuid,
        name_filter: Option<&str>,
    ) -> StoreResult<Vec<BucketSummary>> {
        self.0.list_by_owner(owner, name_filter).await
    }

    async fn find_by_name_and_owner(
        &self,
        name: &str,
        owner: Uuid,
    ) -> StoreResult<Option<BucketInfo>> {
        self.0.find_by_name_and_owner(name, owner).await
    }

    async fn count_by_name(&self, _name: &str) -> StoreResult<i64> {
        Ok(0)
    }

    async fn count_by_name_and_owner(&self, name: &str, owner: Uuid) -> StoreResult<i64> {
        self.0.count_by_name_and_owner(name, owner).await
    }

    async fn insert(&self, bucket: &BucketInfo) -> StoreResult<()> {
        self.0.insert(bucket).await
    }
}

#[tokio::test]
async fn unique_constraint_backs_the_name_check() {
    let (service, store) = setup_service().await;
    service
        .create(&new_caller(), "contested", "local", AclMode::Private)
        .await
        .unwrap();

    let store = Arc::new(store);
    let racing = BucketService::new(
        store.clone(),
        Arc::new(StaleCount((*store).clone())),
        store.clone(),
        store.clone(),
        Arc::new(RandomIdGenerator),
    );

    let err = racing
        .create(&new_caller(), "contested", "local", AclMode::Private)
        .await
        .unwrap_err();
    assert!(matches!(err, BucketError::BucketNameTaken(_)));
    assert_eq!(bucket_rows(&store.db).await, 1);
}

#[tokio::test]
async fn repository_insert_reports_conflict() {
    let (service, store) = setup_service().await;
    let bucket = service
        .create(&new_caller(), "dup", "local", AclMode::Private)
        .await
        .unwrap();

    let copy = BucketInfo {
        id: Uuid::new_v4(),
        ..bucket
    };
    let err = store.insert(&copy).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn regions_are_listed_by_code() {
    let (service, _) = setup_service().await;
    let regions = service.list_regions().await.unwrap();
    assert_eq!(regions.len(), bucket_service::db::DEFAULT_REGIONS.len());
    assert!(regions.windows(2).all(|w| w[0].code <= w[1].code));
}
