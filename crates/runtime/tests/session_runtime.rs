use std::io::Write as _;

use chrono::NaiveDate;
use planner_core::{
    Attribute, CharacterState, IncreaseAttribute, Intent, IntentRequest, RejectionKind, Skill,
    TagSkill, Trait, ToggleTrait,
};
use planner_runtime::{
    Runtime, RuntimeError, SessionConfig, SessionEvent, render_export, write_export,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn increase(attribute: Attribute) -> Intent {
    Intent::IncreaseAttribute(IncreaseAttribute(attribute))
}

#[tokio::test]
async fn queued_dispatch_and_events() {
    init_tracing();
    let runtime = Runtime::builder().build().unwrap();
    let handle = runtime.handle();
    let mut events = runtime.subscribe_events();

    let outcome = handle.dispatch(increase(Attribute::Agility)).await.unwrap();
    assert_eq!(outcome.levels_gained, 0);
    match events.recv().await.unwrap() {
        SessionEvent::Applied { intent, level, .. } => {
            assert_eq!(intent, increase(Attribute::Agility));
            assert_eq!(level, 1);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let err = handle.dispatch(Intent::LevelUp).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Rejected(_)));
    assert_eq!(err.rejection_kind(), Some(RejectionKind::PrerequisiteNotMet));
    assert!(events.recv().await.unwrap().is_rejection());

    let state = handle.state().await.unwrap();
    assert_eq!(state.primary().get(Attribute::Agility), 6);
    assert_eq!(state.primary().unspent_points, 4);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn concurrent_callers_are_serialized() {
    init_tracing();
    let runtime = Runtime::builder().build().unwrap();

    let mut tasks = Vec::new();
    for attribute in Attribute::ALL {
        let handle = runtime.handle();
        tasks.push(tokio::spawn(async move {
            handle.dispatch(increase(attribute)).await.is_ok()
        }));
    }

    let mut accepted = 0;
    for task in tasks {
        if task.await.unwrap() {
            accepted += 1;
        }
    }
    // Five unspent points: exactly five of the seven increases land.
    assert_eq!(accepted, 5);

    let state = runtime.handle().state().await.unwrap();
    assert_eq!(state.primary().unspent_points, 0);
    let total: i32 = state.primary().iter().map(|(_, value)| value).sum();
    assert_eq!(total, 40);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn undo_redo_through_handle() {
    init_tracing();
    let runtime = Runtime::builder().build().unwrap();
    let handle = runtime.handle();

    handle
        .dispatch(Intent::ToggleTrait(ToggleTrait(Trait::Gifted)))
        .await
        .unwrap();
    handle
        .dispatch(Intent::TagSkill(TagSkill(Skill::Speech)))
        .await
        .unwrap();

    assert!(handle.undo().await.unwrap());
    let state = handle.state().await.unwrap();
    assert!(!state.is_tagged(Skill::Speech));
    assert!(state.has_trait(Trait::Gifted));

    assert!(handle.redo().await.unwrap());
    assert!(handle.state().await.unwrap().is_tagged(Skill::Speech));
    assert!(!handle.redo().await.unwrap());

    handle.reset().await.unwrap();
    assert!(handle.state().await.unwrap().traits().is_empty());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn untyped_requests_reject_unknown_names() {
    init_tracing();
    let runtime = Runtime::builder().build().unwrap();
    let handle = runtime.handle();

    handle
        .dispatch_request(&IntentRequest::new("tagSkill", "first aid"))
        .await
        .unwrap();
    let err = handle
        .dispatch_request(&IntentRequest::new("tagSkill", "Pilot"))
        .await
        .unwrap_err();
    assert_eq!(err.rejection_kind(), Some(RejectionKind::UnknownReference));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn config_file_drives_the_session() {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        history_limit = 1

        [rules]
        starting_unspent_points = 2
        tag_bonus = 10
        "#
    )
    .unwrap();

    let config = SessionConfig::load(file.path()).unwrap();
    assert_eq!(config.rules.starting_unspent_points, 2);

    let runtime = Runtime::builder().config(config).build().unwrap();
    let handle = runtime.handle();

    handle.dispatch(increase(Attribute::Luck)).await.unwrap();
    handle.dispatch(increase(Attribute::Luck)).await.unwrap();
    assert!(handle.dispatch(increase(Attribute::Luck)).await.is_err());

    // Only one snapshot is kept.
    assert!(handle.undo().await.unwrap());
    assert!(!handle.undo().await.unwrap());
    assert_eq!(handle.state().await.unwrap().primary().get(Attribute::Luck), 6);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn resumed_snapshot_rebuilds_caches() {
    init_tracing();
    let runtime = Runtime::builder().build().unwrap();
    let handle = runtime.handle();
    for _ in 0..5 {
        handle.dispatch(increase(Attribute::Intelligence)).await.unwrap();
    }
    for skill in [Skill::SmallGuns, Skill::Unarmed, Skill::Speech] {
        handle.dispatch(Intent::TagSkill(TagSkill(skill))).await.unwrap();
    }
    let saved = handle.state().await.unwrap();
    drop(handle);
    runtime.shutdown().await.unwrap();

    let mut json = serde_json::to_value(&saved).unwrap();
    json["derived"]["skill_rate"] = serde_json::json!(999);
    let resumed: CharacterState = serde_json::from_value(json).unwrap();

    let runtime = Runtime::builder().state(resumed).build().unwrap();
    let handle = runtime.handle();
    assert_eq!(handle.state().await.unwrap().derived().skill_rate, 25);

    handle.dispatch(Intent::LevelUp).await.unwrap();
    let state = handle.state().await.unwrap();
    assert_eq!(state.level(), 2);
    assert_eq!(state.skill_points(), 5 + 2 * 10);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[test]
fn invalid_config_file_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "command_buffer = 0").unwrap();
    let err = SessionConfig::load(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("command_buffer"));

    assert!(SessionConfig::load("/nonexistent/planner.toml").is_err());
}

#[tokio::test]
async fn export_lists_stats_traits_and_perks() {
    init_tracing();
    let runtime = Runtime::builder().build().unwrap();
    let handle = runtime.handle();

    handle
        .dispatch(Intent::ToggleTrait(ToggleTrait(Trait::Bruiser)))
        .await
        .unwrap();
    for _ in 0..2 {
        handle.dispatch(increase(Attribute::Strength)).await.unwrap();
    }

    let sheet = handle.export().await.unwrap();
    assert!(sheet.contains("Strength: 09 (Excellent)\n"));
    assert!(sheet.contains("Traits\nBruiser\n"));

    let state = handle.state().await.unwrap();
    assert_eq!(render_export(&state), sheet);

    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let path = write_export(dir.path(), &state, date).unwrap();
    assert!(path.ends_with("character-2025-01-31.txt"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), sheet);

    drop(handle);
    runtime.shutdown().await.unwrap();
}
