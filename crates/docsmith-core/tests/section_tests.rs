//! Section generation and refinement against the scripted engine

use std::sync::Arc;

use async_trait::async_trait;
use docsmith_core::api::{ContentEngine, ProjectStore};
use docsmith_core::error::ApiError;
use docsmith_core::harness::scripted_collaborators;
use docsmith_core::{SectionActivity, SectionError, SectionOrchestrator};
use docsmith_model::{DocumentType, Project, ProjectDraft, ProjectId, SectionDraft, SectionId};
use pretty_assertions::assert_eq;
use tokio::sync::{mpsc, Notify};

async fn seeded_project(store: &Arc<docsmith_core::harness::InMemoryProjectStore>) -> Project {
    let draft = ProjectDraft::new(
        "Energy Report",
        DocumentType::Docx,
        "Renewable energy",
        vec![
            SectionDraft::titled("Introduction", 1),
            SectionDraft::titled("Solar", 2),
            SectionDraft::titled("Wind", 3),
        ],
    );
    store.create_project(draft).await.unwrap()
}

#[tokio::test]
async fn test_generated_content_matches_store() {
    let (store, engine, _) = scripted_collaborators();
    let project = seeded_project(&store).await;
    let orch = SectionOrchestrator::new(store.clone(), engine);

    let section = project.sections_in_order()[0].id;
    let updated = orch.generate(&project, section).await.unwrap();

    // The returned snapshot is the store's view, not a local guess
    let authoritative = store.get_project(project.id).await.unwrap();
    assert_eq!(
        updated.section(section).unwrap().content,
        authoritative.section(section).unwrap().content,
    );
    assert!(updated.section(section).unwrap().has_content());
    assert!(!orch.is_busy(section));
}

#[tokio::test]
async fn test_generate_rejected_once_content_exists() {
    let (store, engine, _) = scripted_collaborators();
    let project = seeded_project(&store).await;
    let orch = SectionOrchestrator::new(store.clone(), engine);

    let section = project.sections_in_order()[0].id;
    let updated = orch.generate(&project, section).await.unwrap();

    let err = orch.generate(&updated, section).await.unwrap_err();
    assert!(matches!(err, SectionError::AlreadyGenerated(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_refine_replaces_content_wholesale() {
    let (store, engine, _) = scripted_collaborators();
    let project = seeded_project(&store).await;
    let orch = SectionOrchestrator::new(store.clone(), engine);

    let section = project.sections_in_order()[1].id;
    let generated = orch.generate(&project, section).await.unwrap();
    let before = generated.section(section).unwrap().content.clone().unwrap();

    let refined = orch
        .refine(&generated, section, "Tighten the wording")
        .await
        .unwrap();
    let after = refined.section(section).unwrap().content.clone().unwrap();

    assert_ne!(before, after);
    assert!(after.contains("Tighten the wording"));
}

#[tokio::test]
async fn test_blank_instruction_never_reaches_engine() {
    let (store, engine, _) = scripted_collaborators();
    let project = seeded_project(&store).await;
    let orch = SectionOrchestrator::new(store.clone(), Arc::clone(&engine) as _);

    let section = project.sections_in_order()[0].id;
    let generated = orch.generate(&project, section).await.unwrap();

    let err = orch.refine(&generated, section, "   ").await.unwrap_err();
    assert!(matches!(err, SectionError::Validation(_)));
    assert_eq!(engine.refine_calls(), 0);
}

#[tokio::test]
async fn test_refine_requires_existing_content() {
    let (store, engine, _) = scripted_collaborators();
    let project = seeded_project(&store).await;
    let orch = SectionOrchestrator::new(store.clone(), Arc::clone(&engine) as _);

    let section = project.sections_in_order()[2].id;
    let err = orch.refine(&project, section, "Expand").await.unwrap_err();
    assert!(matches!(err, SectionError::NoContent(_)));
    assert_eq!(engine.refine_calls(), 0);
}

/// Engine whose calls block until released, for observing in-flight state.
struct GatedEngine {
    started: mpsc::UnboundedSender<()>,
    release: Notify,
}

#[async_trait]
impl ContentEngine for GatedEngine {
    async fn generate_outline(
        &self,
        _topic: &str,
        _document_type: DocumentType,
        _count: usize,
    ) -> Result<Vec<String>, ApiError> {
        Err(ApiError::call("generate_outline", "not scripted"))
    }

    async fn generate_section_content(
        &self,
        _project: ProjectId,
        _section: SectionId,
    ) -> Result<(), ApiError> {
        let _ = self.started.send(());
        self.release.notified().await;
        Ok(())
    }

    async fn refine_content(&self, _section: SectionId, _instruction: &str) -> Result<(), ApiError> {
        let _ = self.started.send(());
        self.release.notified().await;
        Ok(())
    }
}

#[tokio::test]
async fn test_second_request_on_busy_section_rejected() {
    let (store, _, _) = scripted_collaborators();
    let project = seeded_project(&store).await;

    let (started_tx, mut started_rx) = mpsc::unbounded_channel();
    let engine = Arc::new(GatedEngine {
        started: started_tx,
        release: Notify::new(),
    });
    let orch = Arc::new(SectionOrchestrator::new(store, Arc::clone(&engine) as _));

    let section = project.sections_in_order()[0].id;
    let first = {
        let orch = Arc::clone(&orch);
        let project = project.clone();
        tokio::spawn(async move { orch.generate(&project, section).await })
    };
    started_rx.recv().await.unwrap();
    assert_eq!(orch.activity(section), Some(SectionActivity::Generating));

    // Both generate and refine must bounce off the marker
    let err = orch.generate(&project, section).await.unwrap_err();
    assert!(matches!(err, SectionError::Busy { .. }));
    assert!(err.is_retryable());
    let err = orch.refine(&project, section, "Shorten").await.unwrap_err();
    assert!(matches!(err, SectionError::Busy { .. }));

    engine.release.notify_waiters();
    first.await.unwrap().unwrap();
    assert!(!orch.is_busy(section));
}

#[tokio::test]
async fn test_distinct_sections_run_concurrently() {
    let (store, _, _) = scripted_collaborators();
    let project = seeded_project(&store).await;

    let (started_tx, mut started_rx) = mpsc::unbounded_channel();
    let engine = Arc::new(GatedEngine {
        started: started_tx,
        release: Notify::new(),
    });
    let orch = Arc::new(SectionOrchestrator::new(store, Arc::clone(&engine) as _));

    let sections: Vec<SectionId> = project
        .sections_in_order()
        .iter()
        .take(2)
        .map(|s| s.id)
        .collect();
    let handles: Vec<_> = sections
        .iter()
        .map(|&section| {
            let orch = Arc::clone(&orch);
            let project = project.clone();
            tokio::spawn(async move { orch.generate(&project, section).await })
        })
        .collect();

    started_rx.recv().await.unwrap();
    started_rx.recv().await.unwrap();
    assert_eq!(orch.in_flight(), 2);

    engine.release.notify_waiters();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(orch.in_flight(), 0);
}
