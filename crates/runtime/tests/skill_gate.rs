//! Skill gate integration: requirements, overrides, and persisted progress.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

use client_chain_core::MockWorldClient;
use nav_core::{Direction, HazardFlags, SCAN_RANGE, ScanSummary, StepInfo};
use runtime::{
    Event, FileProgressRepository, MarchSkill, Navigator, ProgressRepository, SkillDescriptor,
    SkillEvent, SkillOutcome, SkillRequirement, SurveySkill, TableScanSource, Topic,
};

const FLAT_TABLE: &str = "\
+2: Air Air Air Air Air
+1: Air Air Air Air Air
0: Air Air Air Air Air
-1: Stone Stone Stone Stone Stone
-2: Stone Stone Stone Stone Stone
-3: Stone Stone Stone Stone Stone";

fn level_summary(direction: Direction, safe: usize) -> ScanSummary {
    let mut steps = [StepInfo::default(); SCAN_RANGE];
    for step in steps.iter_mut().take(safe) {
        *step = StepInfo {
            dy: Some(0),
            hazards: HazardFlags::empty(),
        };
    }
    ScanSummary::from_steps(direction, steps)
}

async fn next_event(rx: &mut broadcast::Receiver<Event>) -> Event {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

fn march_descriptor(requirement: Option<SkillRequirement>) -> SkillDescriptor {
    SkillDescriptor::new(
        "march",
        "advance along a scanned direction",
        requirement,
        Arc::new(MarchSkill),
    )
}

#[tokio::test]
async fn gated_march_reports_locked_until_requirements_met() {
    let navigator = Navigator::builder()
        .transport(MockWorldClient::new())
        .scan_source(TableScanSource::new())
        .register_skill(march_descriptor(Some(SkillRequirement::level(5))))
        .build()
        .await
        .unwrap();
    let mut skill_events = navigator.subscribe(Topic::Skill);

    let outcome = navigator
        .dispatch_skill("march", &["east".to_string()])
        .await;
    assert_eq!(outcome, SkillOutcome::Locked("requires level 5".into()));
    assert_eq!(outcome.as_str(), "locked");

    let rejected = next_event(&mut skill_events).await;
    assert_eq!(
        rejected,
        Event::Skill(SkillEvent::Rejected {
            name: "march".into(),
            reason: "requires level 5".into(),
        })
    );
}

#[tokio::test]
async fn explicit_unlock_passes_the_gate_regardless_of_level() {
    let navigator = Navigator::builder()
        .transport(MockWorldClient::new())
        .scan_source(TableScanSource::new())
        .register_skill(march_descriptor(Some(SkillRequirement::level_and_flag(
            99, "veteran",
        ))))
        .build()
        .await
        .unwrap();

    navigator.update_progress(|progress| progress.unlock("march")).unwrap();
    navigator.cache_summary(level_summary(Direction::East, 2));

    let outcome = navigator
        .dispatch_skill("march", &["east".to_string()])
        .await;
    assert_eq!(outcome, SkillOutcome::Done);
}

#[tokio::test]
async fn unknown_skill_is_locked_with_unknown_reason() {
    let navigator = Navigator::builder()
        .transport(MockWorldClient::new())
        .scan_source(TableScanSource::new())
        .build()
        .await
        .unwrap();

    let outcome = navigator.dispatch_skill("burrow", &[]).await;
    assert_eq!(outcome, SkillOutcome::Locked("unknown".into()));
}

#[tokio::test]
async fn march_without_scan_data_comes_back_blocked() {
    let navigator = Navigator::builder()
        .transport(MockWorldClient::new())
        .scan_source(TableScanSource::new())
        .register_skill(march_descriptor(None))
        .build()
        .await
        .unwrap();

    let outcome = navigator
        .dispatch_skill("march", &["north".to_string()])
        .await;
    let SkillOutcome::Blocked(reason) = outcome else {
        panic!("expected blocked outcome");
    };
    assert!(reason.contains("no scan data"));
}

#[tokio::test]
async fn survey_skill_fills_the_cache() {
    let source = TableScanSource::new();
    source.insert(Direction::West, FLAT_TABLE);
    let navigator = Navigator::builder()
        .transport(MockWorldClient::new())
        .scan_source(source)
        .register_skill(SkillDescriptor::new(
            "survey",
            "force a fresh scan of a direction",
            Some(SkillRequirement::level_and_flag(1, "scout")),
            Arc::new(SurveySkill),
        ))
        .build()
        .await
        .unwrap();

    // Flag unset: locked with the flag named.
    let locked = navigator
        .dispatch_skill("survey", &["west".to_string()])
        .await;
    assert_eq!(locked, SkillOutcome::Locked("requires scout".into()));

    navigator
        .update_progress(|progress| progress.set_flag("scout", true))
        .unwrap();
    let outcome = navigator
        .dispatch_skill("survey", &["west".to_string()])
        .await;
    assert_eq!(outcome, SkillOutcome::Done);
    assert_eq!(navigator.cached(Direction::West).unwrap().safe_len, 5);
}

#[tokio::test]
async fn marched_distance_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let transport = MockWorldClient::new();

    let navigator = Navigator::builder()
        .actor("walker")
        .transport(transport.clone())
        .scan_source(TableScanSource::new())
        .progress_repository(FileProgressRepository::new(dir.path()).unwrap())
        .build()
        .await
        .unwrap();
    let mut movement = navigator.subscribe(Topic::Movement);

    navigator.cache_summary(level_summary(Direction::East, 4));
    navigator.plan(Direction::East).await.unwrap();

    // Planned, then Submitted once the queue task has saved progress.
    let _planned = next_event(&mut movement).await;
    let _submitted = next_event(&mut movement).await;
    navigator.shutdown().await.unwrap();

    let reloaded = FileProgressRepository::new(dir.path())
        .unwrap()
        .load("walker")
        .unwrap()
        .expect("progress file should exist");
    assert_eq!(reloaded.distance_moved, 4);
}
