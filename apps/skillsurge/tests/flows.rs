mod common;

use std::sync::Arc;

use serde_json::json;

use skillsurge::dashboard::{self, Source};
use skillsurge::models::{Profile, Roadmap, Role, Task, Week};
use skillsurge::onboarding::OnboardingWizard;
use skillsurge::roadmap::RoadmapTracker;
use skillsurge::state::AppState;
use skillsurge::{ClientError, SessionStore};

use common::{client, spawn, Backend, USER_ID};

fn signed_in() -> Arc<SessionStore> {
    let session = SessionStore::in_memory();
    session
        .set_tokens("access-0".to_string(), "refresh-0".to_string())
        .unwrap();
    session.set_user_id(USER_ID.to_string()).unwrap();
    Arc::new(session)
}

fn task(id: &str) -> Task {
    Task {
        id: id.to_string(),
        title: id.to_uppercase(),
        ..Default::default()
    }
}

fn roadmap() -> Roadmap {
    Roadmap {
        weeks: vec![
            Week {
                id: "w1".to_string(),
                number: 1,
                tasks: vec![task("w1-t1"), task("w1-t2")],
                ..Default::default()
            },
            Week {
                id: "w2".to_string(),
                number: 2,
                tasks: vec![task("w2-t1")],
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

/// A wizard at the timeline step with an "ML Engineer" target.
fn wizard_at_timeline() -> OnboardingWizard {
    let profile: Profile = serde_json::from_value(json!({
        "id": "p-1",
        "userId": USER_ID,
        "skills": ["Python", "PyTorch"],
    }))
    .unwrap();
    let mut wizard = OnboardingWizard::new(AppState::new(Some(USER_ID.to_string())));
    wizard.ingest_profile(profile);
    wizard.advance().unwrap();
    wizard.select_role(Role {
        id: "r1".to_string(),
        title: "ML Engineer".to_string(),
        ..Default::default()
    });
    wizard.advance().unwrap();
    wizard
}

#[tokio::test]
async fn onboarding_sends_chosen_timeline() {
    let (base, backend) = spawn(Backend::default()).await;
    let api = client(&base, signed_in());
    let mut wizard = wizard_at_timeline();
    wizard.set_weeks(4).unwrap();
    wizard.set_hours_per_day(6.0);

    let plan = wizard.generate(&api).await.unwrap().unwrap();
    assert_eq!(plan.weeks.len(), 4);
    assert_eq!(plan.target_role.as_deref(), Some("ML Engineer"));

    let backend = backend.lock().unwrap();
    assert_eq!(
        backend.generate_requests,
        vec![(
            "generate-comprehensive".to_string(),
            json!({"userId": USER_ID, "targetRole": "ML Engineer", "weeks": 4, "hoursPerDay": 6.0}),
        )]
    );
}

#[tokio::test]
async fn onboarding_falls_back_to_plain_generation() {
    let (base, backend) = spawn(Backend {
        comprehensive_missing: true,
        ..Default::default()
    })
    .await;
    let api = client(&base, signed_in());
    let mut wizard = wizard_at_timeline();

    let plan = wizard.generate(&api).await.unwrap().unwrap();
    assert_eq!(plan.weeks.len(), 1);
    assert_eq!(
        backend.lock().unwrap().generate_requests,
        vec![(
            "generate".to_string(),
            json!({"userId": USER_ID, "targetRole": "ML Engineer"}),
        )]
    );
}

#[tokio::test]
async fn toggle_persists_and_merges_bonus_tasks_once() {
    let (base, backend) = spawn(Backend::default()).await;
    let api = client(&base, signed_in());
    let mut tracker = RoadmapTracker::new(USER_ID, roadmap());

    let result = tracker.toggle(&api, "w1-t2").await.unwrap();
    assert!(result.completed);
    assert_eq!(result.progress.percentage, 70);
    assert_eq!(result.bonus_added, 2);
    assert_eq!(result.bonus_message.as_deref(), Some("Ahead of schedule!"));

    let week = tracker.roadmap().week("w1").unwrap();
    let ids: Vec<&str> = week.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["w1-t1", "w1-t2", "w1_bonus_0", "w1_bonus_1"]);
    assert!(week.tasks[2].is_bonus && !week.tasks[2].completed);

    // Same bonus answer again: nothing new appended.
    let result = tracker.toggle_task(&api, "w1", "w1-t2").await.unwrap();
    assert!(!result.completed);
    assert_eq!(result.bonus_added, 0);
    assert_eq!(tracker.roadmap().week("w1").unwrap().tasks.len(), 4);

    let backend = backend.lock().unwrap();
    assert_eq!(
        backend.task_updates,
        vec![
            ("w1-t2".to_string(), json!({"completed": true, "weekId": "w1"})),
            ("w1-t2".to_string(), json!({"completed": false, "weekId": "w1"})),
        ]
    );
}

#[tokio::test]
async fn roadmap_update_keeps_unmodelled_fields() {
    let (base, _backend) = spawn(Backend::default()).await;
    let api = client(&base, signed_in());

    let mut plan: Roadmap = serde_json::from_value(json!({
        "weeks": [{"id": "w1", "number": 1, "tasks": [{"id": "t1", "title": "SQL joins"}]}],
        "targetRole": "Data Engineer",
        "generatedBy": "planner-v2",
        "milestones": [{"week": 4, "goal": "first pipeline"}],
    }))
    .unwrap();
    plan.weeks[0].tasks[0].completed = true;

    let saved = api.update_roadmap(USER_ID, &plan).await.unwrap();
    assert_eq!(saved, plan);
    assert_eq!(saved.extra["generatedBy"], "planner-v2");
    assert_eq!(saved.progress().percentage, 100);
}

#[tokio::test]
async fn toggle_unknown_task_sends_nothing() {
    let (base, backend) = spawn(Backend::default()).await;
    let api = client(&base, signed_in());
    let mut tracker = RoadmapTracker::new(USER_ID, roadmap());

    let err = tracker.toggle(&api, "nope").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert!(backend.lock().unwrap().task_updates.is_empty());
}

#[tokio::test]
async fn dashboard_loads_summary_and_daily_problem() {
    let (base, _backend) = spawn(Backend::default()).await;
    let api = client(&base, signed_in());

    let view = dashboard::load(&api, USER_ID, false, true).await.unwrap();
    assert_eq!(view.source, Source::Live);
    assert_eq!(view.streak, 4);
    assert_eq!(view.stats.skill_match, 81);
    assert_eq!(view.daily_problem.title, "Merge Intervals");
    assert_eq!(view.target_role.as_deref(), Some("Data Engineer"));
    assert_eq!(view.progress[0].skills, 40);
}

#[tokio::test]
async fn dashboard_falls_back_only_when_allowed() {
    let (base, _backend) = spawn(Backend {
        dashboard_down: true,
        ..Default::default()
    })
    .await;
    let api = client(&base, signed_in());

    let view = dashboard::load(&api, USER_ID, false, true).await.unwrap();
    assert_eq!(view.source, Source::Fallback);
    assert_eq!(view.daily_problem.title, "Two Sum");

    let err = dashboard::load(&api, USER_ID, false, false).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }), "got {err:?}");
}

#[tokio::test]
async fn dashboard_does_not_mask_auth_failures() {
    let (base, _backend) = spawn(Backend::default()).await;
    let api = client(&base, Arc::new(SessionStore::in_memory()));

    let err = dashboard::load(&api, USER_ID, false, true).await.unwrap_err();
    assert!(err.requires_login());
}
