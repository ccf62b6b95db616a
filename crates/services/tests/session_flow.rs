use std::sync::Arc;

use fitness_core::model::{ProfileName, TaskId, WeekId};
use fitness_core::time::fixed_clock;
use services::{
    FitnessServices, HttpExerciseGuideService, Landing, SessionError, SessionManager, SessionState,
};
use storage::{InMemoryStore, KeyValueStore, Storage};

fn services_over(store: &InMemoryStore) -> FitnessServices {
    FitnessServices::with_storage(
        Storage::new(Arc::new(store.clone())),
        fixed_clock(),
        Arc::new(HttpExerciseGuideService::new(None)),
    )
}

fn week() -> WeekId {
    WeekId::new("2025-12-w2")
}

fn toggle(manager: &mut SessionManager, task: &str) {
    manager
        .progress_mut()
        .expect("logged in")
        .toggle(&week(), &TaskId::new(task));
}

#[tokio::test]
async fn fresh_install_starts_logged_out_on_profile_creation() {
    let services = services_over(&InMemoryStore::new());
    let manager = services.session_manager().await;

    assert_eq!(manager.state(), SessionState::LoggedOut);
    assert_eq!(manager.landing(), Landing::CreateProfile);
    assert!(manager.profiles().is_empty());
}

#[tokio::test]
async fn login_registers_profile_and_starts_as_novice() {
    let store = InMemoryStore::new();
    let services = services_over(&store);
    let mut manager = services.session_manager().await;

    let progress = manager.login("  Ana ").await.unwrap();
    assert_eq!(progress.profile().as_str(), "Ana");
    assert_eq!(progress.lifetime_total(), 0);
    assert_eq!(progress.achievement().current.title, "Novice Starter");

    manager.login("Ben").await.unwrap();
    services.shutdown().await;

    assert_eq!(
        store.get("fitness_users_list").await.unwrap().as_deref(),
        Some(r#"["Ana","Ben"]"#)
    );
    assert_eq!(
        store.get("fitness_active_user").await.unwrap().as_deref(),
        Some("Ben")
    );
    assert_eq!(manager.landing(), Landing::SelectProfile);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let services = services_over(&InMemoryStore::new());
    let mut manager = services.session_manager().await;

    assert!(matches!(
        manager.login("   ").await,
        Err(SessionError::Profile(_))
    ));
    assert_eq!(manager.state(), SessionState::LoggedOut);
    assert!(manager.profiles().is_empty());
}

#[tokio::test]
async fn profiles_keep_independent_progress() {
    let services = services_over(&InMemoryStore::new());
    let mut manager = services.session_manager().await;

    manager.login("ana").await.unwrap();
    toggle(&mut manager, "m-l-1");
    toggle(&mut manager, "m-w-1");

    let ben = manager.login("ben").await.unwrap();
    assert_eq!(ben.lifetime_total(), 0);
    assert!(!ben.is_complete(&week(), &TaskId::new("m-l-1")));
    toggle(&mut manager, "f-w-1");

    let ana = manager.login("ana").await.unwrap();
    assert_eq!(ana.lifetime_total(), 2);
    assert!(ana.is_complete(&week(), &TaskId::new("m-w-1")));
    assert!(!ana.is_complete(&week(), &TaskId::new("f-w-1")));
}

#[tokio::test]
async fn relogin_to_active_profile_keeps_state() {
    let services = services_over(&InMemoryStore::new());
    let mut manager = services.session_manager().await;

    manager.login("ana").await.unwrap();
    toggle(&mut manager, "m-l-1");
    let again = manager.login("ana").await.unwrap();

    assert_eq!(again.lifetime_total(), 1);
    assert_eq!(manager.profiles().len(), 1);
}

#[tokio::test]
async fn restart_restores_active_profile_and_progress() {
    let store = InMemoryStore::new();
    {
        let services = services_over(&store);
        let mut manager = services.session_manager().await;
        manager.login("ana").await.unwrap();
        toggle(&mut manager, "m-l-1");
        toggle(&mut manager, "m-l-1");
        toggle(&mut manager, "w-w-2");
        services.shutdown().await;
    }

    let services = services_over(&store);
    let manager = services.session_manager().await;
    assert_eq!(
        manager.state(),
        SessionState::LoggedIn(ProfileName::new("ana").unwrap())
    );
    let progress = manager.progress().unwrap();
    assert!(!progress.is_complete(&week(), &TaskId::new("m-l-1")));
    assert!(progress.is_complete(&week(), &TaskId::new("w-w-2")));
    assert_eq!(progress.lifetime_total(), 1);
}

#[tokio::test]
async fn logout_clears_pointer_but_keeps_data() {
    let store = InMemoryStore::new();
    let services = services_over(&store);
    let mut manager = services.session_manager().await;

    manager.login("ana").await.unwrap();
    toggle(&mut manager, "m-l-1");
    manager.logout();
    services.shutdown().await;

    assert_eq!(manager.state(), SessionState::LoggedOut);
    assert_eq!(manager.landing(), Landing::SelectProfile);
    assert_eq!(store.get("fitness_active_user").await.unwrap(), None);
    assert!(store.get("fitness_progress_ana").await.unwrap().is_some());

    let restarted = services_over(&store).session_manager().await;
    assert_eq!(restarted.state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn deleting_active_profile_logs_out_and_spares_others() {
    let store = InMemoryStore::new();
    let services = services_over(&store);
    let mut manager = services.session_manager().await;

    manager.login("ben").await.unwrap();
    toggle(&mut manager, "t-w-1");
    manager.login("ana").await.unwrap();
    toggle(&mut manager, "m-l-1");

    manager.delete_profile("ana");
    services.shutdown().await;

    assert_eq!(manager.state(), SessionState::LoggedOut);
    assert_eq!(manager.profiles().len(), 1);
    assert_eq!(store.get("fitness_progress_ana").await.unwrap(), None);
    assert_eq!(store.get("fitness_active_user").await.unwrap(), None);
    assert!(store.get("fitness_progress_ben").await.unwrap().is_some());

    let ben = manager.login("ben").await.unwrap();
    assert_eq!(ben.lifetime_total(), 1);
}

#[tokio::test]
async fn deleting_last_profile_returns_to_creation() {
    let services = services_over(&InMemoryStore::new());
    let mut manager = services.session_manager().await;

    manager.login("ana").await.unwrap();
    manager.logout();
    manager.delete_profile("nobody");
    assert_eq!(manager.landing(), Landing::SelectProfile);

    manager.delete_profile("ana");
    assert_eq!(manager.landing(), Landing::CreateProfile);
    assert_eq!(manager.state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn recreated_profile_starts_empty() {
    let services = services_over(&InMemoryStore::new());
    let mut manager = services.session_manager().await;

    manager.login("ana").await.unwrap();
    toggle(&mut manager, "m-l-1");
    manager.delete_profile("ana");

    let ana = manager.login("ana").await.unwrap();
    assert_eq!(ana.lifetime_total(), 0);
}

#[tokio::test]
async fn malformed_progress_blob_recovers_to_empty() {
    let store = InMemoryStore::new();
    store.set("fitness_users_list", r#"["ana"]"#).await.unwrap();
    store.set("fitness_active_user", "ana").await.unwrap();
    store
        .set("fitness_progress_ana", "{\"2025-12-w1\": [true")
        .await
        .unwrap();

    let manager = services_over(&store).session_manager().await;
    let progress = manager.progress().expect("restored");
    assert_eq!(progress.lifetime_total(), 0);
    assert!(progress.record().is_empty());
    assert_eq!(progress.achievement().current.title, "Novice Starter");
}

#[tokio::test]
async fn malformed_registry_and_dangling_pointer_start_logged_out() {
    let store = InMemoryStore::new();
    store.set("fitness_users_list", "not json").await.unwrap();
    store.set("fitness_active_user", "ana").await.unwrap();

    let manager = services_over(&store).session_manager().await;
    assert_eq!(manager.state(), SessionState::LoggedOut);
    assert_eq!(manager.landing(), Landing::CreateProfile);

    let store = InMemoryStore::new();
    store.set("fitness_users_list", r#"["ben"]"#).await.unwrap();
    store.set("fitness_active_user", "ana").await.unwrap();

    let manager = services_over(&store).session_manager().await;
    assert_eq!(manager.state(), SessionState::LoggedOut);
    assert_eq!(manager.landing(), Landing::SelectProfile);
}

#[tokio::test]
async fn overview_reports_each_profile_from_its_own_blob() {
    let services = services_over(&InMemoryStore::new());
    let mut manager = services.session_manager().await;

    manager.login("ana").await.unwrap();
    let tasks: Vec<TaskId> = services
        .catalog()
        .weekly_template()
        .countable_tasks()
        .take(15)
        .map(|task| task.id().clone())
        .collect();
    for task in &tasks {
        manager.progress_mut().unwrap().toggle(&week(), task);
    }
    manager.login("ben").await.unwrap();

    let overview = manager.profile_overview().await;
    assert_eq!(overview.len(), 2);
    assert_eq!(overview[0].name.as_str(), "ana");
    assert_eq!(overview[0].lifetime_total, 15);
    assert_eq!(overview[0].tier_title, "Momentum Builder");
    assert_eq!(overview[1].lifetime_total, 0);
    assert_eq!(overview[1].tier_title, "Novice Starter");
}

#[tokio::test]
async fn default_month_follows_the_clock() {
    let services = services_over(&InMemoryStore::new());
    let month = services.default_month().unwrap();
    assert_eq!(month.title(), "December 2025");
    assert!(services.clock().is_fixed());
}
