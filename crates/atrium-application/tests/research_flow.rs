//! End-to-end flows across the orchestrator, the durable store, the
//! poller, and the roleplay service.

use async_trait::async_trait;
use atrium_application::{PollEvent, ResearchOrchestrator, RoleplayService, StatusPoller};
use atrium_core::config::PollerConfig;
use atrium_core::error::{AtriumError, Result};
use atrium_core::research::{
    AssetCatalog, AssetKind, AssetOutcome, CatalogEntry, ProcessingJob, ProcessingWorker,
    SessionStatus,
};
use atrium_core::roleplay::{DialogueEngine, Scenario, TranscriptTurn};
use atrium_infrastructure::{StaticScenarioCatalog, TomlResearchSessionRepository};
use std::sync::Arc;
use std::sync::Mutex;
use tempfile::TempDir;

struct FixedCatalog {
    entries: Vec<CatalogEntry>,
}

impl FixedCatalog {
    fn with(entries: Vec<CatalogEntry>) -> Arc<Self> {
        Arc::new(Self { entries })
    }
}

#[async_trait]
impl AssetCatalog for FixedCatalog {
    async fn search(&self, _query: &str) -> Result<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}

#[derive(Default)]
struct RecordingWorker {
    jobs: Mutex<Vec<ProcessingJob>>,
}

impl RecordingWorker {
    fn job_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }
}

#[async_trait]
impl ProcessingWorker for RecordingWorker {
    async fn submit(&self, job: ProcessingJob) -> Result<()> {
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

fn entry(id: &str, name: &str, kind: AssetKind) -> CatalogEntry {
    CatalogEntry {
        asset_id: id.to_string(),
        name: name.to_string(),
        kind,
        source_url: Some(format!("https://media.example.com/{}", id)),
    }
}

fn orchestrator_over(
    dir: &TempDir,
    catalog: Arc<dyn AssetCatalog>,
    worker: Arc<dyn ProcessingWorker>,
) -> ResearchOrchestrator {
    let repository = Arc::new(TomlResearchSessionRepository::new(dir.path()).unwrap());
    ResearchOrchestrator::new(repository, catalog, worker)
}

#[tokio::test]
async fn full_session_lifecycle_survives_restart() {
    let dir = TempDir::new().unwrap();
    let catalog = FixedCatalog::with(vec![
        entry("bf-1", "Sermon on serving", AssetKind::Video),
        entry("bf-2", "Volunteer handbook", AssetKind::Document),
    ]);
    let worker = Arc::new(RecordingWorker::default());

    let session_id = {
        let orchestrator = orchestrator_over(&dir, catalog.clone(), worker.clone());
        let session = orchestrator
            .propose("volunteer recruitment", "user-1")
            .await
            .unwrap();
        assert_eq!(session.status, SessionStatus::Proposed);
        assert_eq!(
            session.summary,
            "Found 2 assets related to 'volunteer recruitment'."
        );
        orchestrator.execute(&session.id, "user-1").await.unwrap();
        session.id
    };

    // A fresh orchestrator over the same directory simulates a process
    // restart; the executing session is still there and still advances.
    let orchestrator = orchestrator_over(&dir, catalog, worker.clone());
    let resumed = orchestrator.get_status(&session_id, "user-1").await.unwrap();
    assert_eq!(resumed.status, SessionStatus::Executing);
    assert_eq!(worker.job_count(), 2);

    orchestrator
        .on_asset_outcome(&session_id, "bf-1", AssetOutcome::Indexed)
        .await
        .unwrap();
    orchestrator
        .on_asset_outcome(&session_id, "bf-2", AssetOutcome::Indexed)
        .await
        .unwrap();

    let done = orchestrator.get_status(&session_id, "user-1").await.unwrap();
    assert_eq!(done.status, SessionStatus::Completed);

    let history = orchestrator.list_history("user-1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, session_id);
}

#[tokio::test]
async fn empty_proposal_is_persisted_but_not_executable() {
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator_over(
        &dir,
        FixedCatalog::with(Vec::new()),
        Arc::new(RecordingWorker::default()),
    );

    let session = orchestrator
        .propose("a topic nobody preached on", "user-1")
        .await
        .unwrap();
    assert!(session.assets.is_empty());
    assert!(session.summary.contains("No matching assets were found"));

    let err = orchestrator
        .execute(&session.id, "user-1")
        .await
        .unwrap_err();
    assert!(err.is_invalid_state());

    // The record stays visible in history as an empty, proposed session
    let history = orchestrator.list_history("user-1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, SessionStatus::Proposed);
}

#[tokio::test]
async fn concurrent_execute_requests_dispatch_once() {
    let dir = TempDir::new().unwrap();
    let catalog = FixedCatalog::with(vec![entry("bf-1", "Sermon", AssetKind::Audio)]);
    let worker = Arc::new(RecordingWorker::default());
    let orchestrator = Arc::new(orchestrator_over(&dir, catalog, worker.clone()));

    let session = orchestrator.propose("sermons", "user-1").await.unwrap();

    let a = {
        let orchestrator = orchestrator.clone();
        let id = session.id.clone();
        tokio::spawn(async move { orchestrator.execute(&id, "user-1").await })
    };
    let b = {
        let orchestrator = orchestrator.clone();
        let id = session.id.clone();
        tokio::spawn(async move { orchestrator.execute(&id, "user-1").await })
    };

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    // One of the two racing requests wins; the other is a no-op.
    assert_eq!(worker.job_count(), 1);
}

#[tokio::test]
async fn sessions_are_owner_scoped() {
    let dir = TempDir::new().unwrap();
    let catalog = FixedCatalog::with(vec![entry("bf-1", "Sermon", AssetKind::Video)]);
    let orchestrator = orchestrator_over(&dir, catalog, Arc::new(RecordingWorker::default()));

    let session = orchestrator.propose("sermons", "user-1").await.unwrap();

    let err = orchestrator
        .get_status(&session.id, "user-2")
        .await
        .unwrap_err();
    assert!(err.is_forbidden());

    let err = orchestrator
        .execute(&session.id, "user-2")
        .await
        .unwrap_err();
    assert!(err.is_forbidden());

    assert!(orchestrator.list_history("user-2").await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn poller_observes_session_to_completion() {
    let dir = TempDir::new().unwrap();
    let catalog = FixedCatalog::with(vec![
        entry("bf-1", "Sermon", AssetKind::Video),
        entry("bf-2", "Notes", AssetKind::Document),
    ]);
    let orchestrator = Arc::new(orchestrator_over(
        &dir,
        catalog,
        Arc::new(RecordingWorker::default()),
    ));

    let session = orchestrator.propose("sermons", "user-1").await.unwrap();
    orchestrator.execute(&session.id, "user-1").await.unwrap();

    let poller = StatusPoller::new(PollerConfig::default());
    let mut handle = {
        let orchestrator = orchestrator.clone();
        let session_id = session.id.clone();
        poller.spawn(
            move || {
                let orchestrator = orchestrator.clone();
                let session_id = session_id.clone();
                async move { orchestrator.get_status(&session_id, "user-1").await }
            },
            |snapshot| snapshot.status.is_terminal(),
        )
    };

    // First observation: still executing.
    match handle.recv().await.unwrap() {
        PollEvent::Snapshot(snapshot) => assert_eq!(snapshot.status, SessionStatus::Executing),
        other => panic!("expected snapshot, got {:?}", other),
    }

    // Outcomes land while the poller is between ticks.
    orchestrator
        .on_asset_outcome(&session.id, "bf-1", AssetOutcome::Indexed)
        .await
        .unwrap();
    orchestrator
        .on_asset_outcome(&session.id, "bf-2", AssetOutcome::Error)
        .await
        .unwrap();

    // The poller ends itself on the terminal snapshot.
    loop {
        match handle.recv().await.unwrap() {
            PollEvent::Snapshot(_) => continue,
            PollEvent::Terminal(snapshot) => {
                assert_eq!(snapshot.status, SessionStatus::Completed);
                break;
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
    assert!(handle.recv().await.is_none());
}

struct ScriptedEngine;

#[async_trait]
impl DialogueEngine for ScriptedEngine {
    async fn synthesize_scenario(&self, description: &str) -> Result<Scenario> {
        Ok(Scenario {
            id: String::new(),
            name: "Custom".to_string(),
            description: description.to_string(),
            context: "An improvised conversation.".to_string(),
            goal: "Hold your ground kindly.".to_string(),
            tone: "Guarded".to_string(),
            behavior_definition: format!("Play this persona: {}", description),
            opening_line: "Alright, I'm listening.".to_string(),
        })
    }

    async fn reply(
        &self,
        behavior_definition: &str,
        _transcript: &[TranscriptTurn],
        _message: &str,
    ) -> Result<String> {
        if behavior_definition.trim().is_empty() {
            return Err(AtriumError::internal("reply without a persona"));
        }
        Ok("I hear you, but I'm not convinced yet.".to_string())
    }

    async fn evaluate(
        &self,
        _behavior_definition: &str,
        transcript: &[TranscriptTurn],
    ) -> Result<String> {
        Ok(format!("You handled {} turns with patience.", transcript.len()))
    }
}

#[tokio::test]
async fn custom_context_lives_only_with_the_caller() {
    let service = RoleplayService::new(
        Arc::new(StaticScenarioCatalog::with_builtin()),
        Arc::new(ScriptedEngine),
    );

    let context = service
        .create_custom("A board member opposed to the building plan", "user-1")
        .await
        .unwrap();
    assert!(context.is_custom());

    let mut transcript = vec![TranscriptTurn::counterpart(&context.opening_line)];

    // The caller keeps the definition and resends it each turn.
    let reply = service
        .advance(
            &context.context_id,
            &context.behavior_definition,
            &transcript,
            "Walk me through your concerns.",
        )
        .await
        .unwrap();
    transcript.push(TranscriptTurn::user("Walk me through your concerns."));
    transcript.push(TranscriptTurn::counterpart(&reply));

    // A "restart": a brand-new service instance. The caller-held context
    // still works because it carries the definition.
    let fresh = RoleplayService::new(
        Arc::new(StaticScenarioCatalog::with_builtin()),
        Arc::new(ScriptedEngine),
    );
    fresh
        .advance(
            &context.context_id,
            &context.behavior_definition,
            &transcript,
            "What would change your mind?",
        )
        .await
        .unwrap();

    // But a caller that lost the definition cannot recover it anywhere.
    let err = fresh
        .advance(&context.context_id, "", &transcript, "Hello again?")
        .await
        .unwrap_err();
    assert!(err.is_invalid_state());
    let err = fresh
        .create_from_catalog(&context.context_id, "user-1")
        .unwrap_err();
    assert!(err.is_not_found());

    // Evaluation works from the caller-held state alone, repeatedly.
    let verdict = fresh
        .evaluate(&context.context_id, &context.behavior_definition, &transcript)
        .await
        .unwrap();
    assert!(verdict.contains("3 turns"));
}
