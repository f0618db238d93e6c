//! Startup provisioning scenarios against the mock platform.

mod common;

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use mintgate::config::schema::ProvisionerConfig;
use mintgate::config::CollectionStore;
use mintgate::platform::types::CollectionId;
use mintgate::platform::PlatformClient;
use mintgate::provisioner::{ProvisionError, Provisioner};

use common::{
    failed, finalized_success, finalized_with_collection, pending, platform_url,
    start_mock_platform, PlatformState,
};

fn temp_state_path() -> PathBuf {
    std::env::temp_dir().join(format!("mintgate-test-{}.toml", uuid::Uuid::new_v4()))
}

fn fast_config(state_path: &Path) -> ProvisionerConfig {
    ProvisionerConfig {
        state_path: state_path.to_string_lossy().into_owned(),
        poll_interval_ms: 1,
        settle_delay_ms: 1,
        ..ProvisionerConfig::default()
    }
}

async fn provisioner_for(
    state: &Arc<PlatformState>,
    store: CollectionStore,
    config: ProvisionerConfig,
) -> Provisioner {
    let addr = start_mock_platform(state.clone()).await;
    let client = Arc::new(
        PlatformClient::new(platform_url(addr), "test-key", Duration::from_secs(5)).unwrap(),
    );
    Provisioner::new(client, store, config)
}

#[tokio::test]
async fn test_existing_tokens_are_not_recreated() {
    let state = PlatformState::new();
    state.add_token(1);
    state.add_token(2);
    state.add_token(3);

    let path = temp_state_path();
    let mut store = CollectionStore::load(&path).unwrap();
    store.record(&CollectionId::from("42")).unwrap();

    let provisioner = provisioner_for(&state, store, fast_config(&path)).await;
    let collection = provisioner.ensure_ready().await.unwrap();

    assert_eq!(collection.0, "42");
    assert_eq!(state.create_collection_calls.load(Ordering::SeqCst), 0);
    assert_eq!(state.get_token_calls.load(Ordering::SeqCst), 3);
    assert_eq!(state.create_token_calls.load(Ordering::SeqCst), 0);

    std::fs::remove_file(path).unwrap_or_default();
}

#[tokio::test]
async fn test_bootstrap_from_empty_deployment() {
    let state = PlatformState::new();
    state.script_collection_creation(vec![
        pending(),
        pending(),
        finalized_with_collection("42"),
    ]);

    let path = temp_state_path();
    let store = CollectionStore::load(&path).unwrap();

    let provisioner = provisioner_for(&state, store, fast_config(&path)).await;
    let collection = provisioner.ensure_ready().await.unwrap();

    assert_eq!(collection.0, "42");
    assert_eq!(state.create_collection_calls.load(Ordering::SeqCst), 1);
    // All three catalogue tokens were checked and created.
    assert_eq!(state.get_token_calls.load(Ordering::SeqCst), 3);
    assert_eq!(state.create_token_calls.load(Ordering::SeqCst), 3);

    // The id survives a restart.
    let reloaded = CollectionStore::load(&path).unwrap();
    assert_eq!(reloaded.current().unwrap().0, "42");

    std::fs::remove_file(path).unwrap_or_default();
}

#[tokio::test]
async fn test_only_missing_tokens_are_created() {
    let state = PlatformState::new();
    state.add_token(1);
    state.add_token(3);

    let path = temp_state_path();
    let mut store = CollectionStore::load(&path).unwrap();
    store.record(&CollectionId::from("42")).unwrap();

    let provisioner = provisioner_for(&state, store, fast_config(&path)).await;
    provisioner.ensure_ready().await.unwrap();

    assert_eq!(state.create_token_calls.load(Ordering::SeqCst), 1);

    std::fs::remove_file(path).unwrap_or_default();
}

#[tokio::test]
async fn test_one_failed_creation_fails_the_whole_pass() {
    let state = PlatformState::new();
    state.add_token(1);
    state.add_token(2);
    state.fail_token_creation(3);

    let path = temp_state_path();
    let mut store = CollectionStore::load(&path).unwrap();
    store.record(&CollectionId::from("42")).unwrap();

    let provisioner = provisioner_for(&state, store, fast_config(&path)).await;
    let error = provisioner.ensure_ready().await.unwrap_err();

    assert!(matches!(
        error,
        ProvisionError::TokenCreation { name: "Green Gem", .. }
    ));

    std::fs::remove_file(path).unwrap_or_default();
}

#[tokio::test]
async fn test_existence_check_errors_are_not_treated_as_missing() {
    let state = PlatformState::new();
    state.fail_token_lookups();

    let path = temp_state_path();
    let mut store = CollectionStore::load(&path).unwrap();
    store.record(&CollectionId::from("42")).unwrap();

    let provisioner = provisioner_for(&state, store, fast_config(&path)).await;
    let error = provisioner.ensure_ready().await.unwrap_err();

    assert!(matches!(error, ProvisionError::Platform(_)));
    assert_eq!(state.create_token_calls.load(Ordering::SeqCst), 0);

    std::fs::remove_file(path).unwrap_or_default();
}

#[tokio::test]
async fn test_finalization_without_collection_id_event_is_fatal() {
    let state = PlatformState::new();
    state.script_collection_creation(vec![finalized_success()]);

    let path = temp_state_path();
    let store = CollectionStore::load(&path).unwrap();

    let provisioner = provisioner_for(&state, store, fast_config(&path)).await;
    let error = provisioner.ensure_ready().await.unwrap_err();

    assert!(matches!(error, ProvisionError::MissingCollectionId));

    std::fs::remove_file(path).unwrap_or_default();
}

#[tokio::test]
async fn test_failed_collection_creation_is_fatal() {
    let state = PlatformState::new();
    state.script_collection_creation(vec![pending(), failed()]);

    let path = temp_state_path();
    let store = CollectionStore::load(&path).unwrap();

    let provisioner = provisioner_for(&state, store, fast_config(&path)).await;
    let error = provisioner.ensure_ready().await.unwrap_err();

    assert!(matches!(error, ProvisionError::Operation(_)));

    std::fs::remove_file(path).unwrap_or_default();
}
