//! Export coordinator
//!
//! Requests the finished binary artifact for a project and exposes it
//! for client-side retrieval. MIME type and filename are inferred from
//! the project's document type. One outstanding request at a time: the
//! busy latch serializes callers the way a disabled trigger would.

use crate::api::DocumentRenderer;
use crate::error::ExportError;
use docsmith_model::Project;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Finished artifact ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `{project.name}.{extension}`
    pub filename: String,
    /// MIME type matching the document type
    pub mime_type: &'static str,
    /// Raw document bytes
    pub bytes: Vec<u8>,
}

/// Releases the busy latch when the request settles
struct LatchGuard<'a>(&'a AtomicBool);

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Single-flight export driver
pub struct ExportCoordinator {
    renderer: Arc<dyn DocumentRenderer>,
    busy: AtomicBool,
}

impl ExportCoordinator {
    /// New coordinator, idle
    #[must_use]
    pub fn new(renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            renderer,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether an export request is outstanding
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Request the artifact for a project
    ///
    /// Rejects with `ExportError::Busy` while another request is in
    /// flight. The latch releases when the call settles, success or
    /// failure.
    pub async fn export(&self, project: &Project) -> Result<ExportArtifact, ExportError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(ExportError::Busy);
        }
        let _latch = LatchGuard(&self.busy);

        tracing::info!(project = %project.id, document_type = %project.document_type, "exporting document");
        let bytes = self.renderer.render(project.id).await?;
        tracing::debug!(project = %project.id, size = bytes.len(), "export artifact ready");

        Ok(ExportArtifact {
            filename: project.export_filename(),
            mime_type: project.document_type.mime_type(),
            bytes,
        })
    }
}

impl std::fmt::Debug for ExportCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportCoordinator")
            .field("busy", &self.is_busy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockDocumentRenderer;
    use crate::error::ApiError;
    use chrono::Utc;
    use docsmith_model::{DocumentType, ProjectId, ProjectStatus};
    use uuid::Uuid;

    fn project(document_type: DocumentType) -> Project {
        let now = Utc::now();
        Project {
            id: ProjectId(Uuid::new_v4()),
            name: "Energy Report".to_string(),
            document_type,
            main_topic: "Renewable energy".to_string(),
            status: ProjectStatus::from("completed"),
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn export_derives_filename_and_mime() {
        let mut renderer = MockDocumentRenderer::new();
        renderer
            .expect_render()
            .times(1)
            .returning(|_| Ok(vec![1, 2, 3]));
        let coordinator = ExportCoordinator::new(Arc::new(renderer));

        let artifact = coordinator.export(&project(DocumentType::Docx)).await.unwrap();
        assert_eq!(artifact.filename, "Energy Report.docx");
        assert_eq!(
            artifact.mime_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(artifact.bytes, vec![1, 2, 3]);
        assert!(!coordinator.is_busy());
    }

    #[tokio::test]
    async fn pptx_export_uses_presentation_mime() {
        let mut renderer = MockDocumentRenderer::new();
        renderer.expect_render().returning(|_| Ok(Vec::new()));
        let coordinator = ExportCoordinator::new(Arc::new(renderer));

        let artifact = coordinator.export(&project(DocumentType::Pptx)).await.unwrap();
        assert_eq!(artifact.filename, "Energy Report.pptx");
        assert_eq!(
            artifact.mime_type,
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        );
    }

    #[tokio::test]
    async fn latch_releases_after_renderer_failure() {
        let mut renderer = MockDocumentRenderer::new();
        renderer
            .expect_render()
            .times(2)
            .returning(|_| Err(ApiError::call("export_document", "renderer down")));
        let coordinator = ExportCoordinator::new(Arc::new(renderer));

        let p = project(DocumentType::Docx);
        assert!(coordinator.export(&p).await.is_err());
        assert!(!coordinator.is_busy());
        // Retry reaches the renderer again rather than tripping the latch
        assert!(matches!(
            coordinator.export(&p).await.unwrap_err(),
            ExportError::Api(_)
        ));
    }
}
