//! End-to-end pipeline walkthrough
//!
//! Drives the whole staged pipeline over the scripted collaborators:
//! wizard -> atomic create -> concurrent per-section generation -> one
//! refinement -> export. Used by the `docsmith walkthrough` binary and
//! the pipeline integration suite.

use crate::export::ExportCoordinator;
use crate::harness::scripted_collaborators;
use crate::outline::OutlineStrategy;
use crate::sections::SectionOrchestrator;
use crate::wizard::ProjectWizard;
use crate::workspace::ProjectWorkspace;
use docsmith_model::{DocumentType, ProjectId, SectionId};
use futures::future::try_join_all;
use serde::Serialize;
use std::sync::Arc;

/// Walkthrough parameters
#[derive(Debug, Clone)]
pub struct WalkthroughConfig {
    /// Project name
    pub name: String,
    /// Generation prompt seed
    pub topic: String,
    /// Target format
    pub document_type: DocumentType,
    /// Outline length
    pub section_count: usize,
    /// Use the manual strategy and fill titles by hand
    pub manual_outline: bool,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            name: "Energy Report".to_string(),
            topic: "Renewable energy".to_string(),
            document_type: DocumentType::Docx,
            section_count: 3,
            manual_outline: false,
        }
    }
}

/// What the walkthrough did
#[derive(Debug, Clone, Serialize)]
pub struct WalkthroughReport {
    /// Store-assigned project id
    pub project_id: ProjectId,
    /// Refined section
    pub refined_section: SectionId,
    /// Target format
    pub document_type: DocumentType,
    /// Sections that received generated content
    pub sections_generated: usize,
    /// Server-assigned status after the run
    pub status: String,
    /// Export artifact filename
    pub artifact_filename: String,
    /// Export artifact MIME type
    pub mime_type: String,
    /// Export artifact size
    pub artifact_bytes: usize,
}

impl WalkthroughReport {
    /// Human-readable report
    #[must_use]
    pub fn generate_text(&self) -> String {
        format!(
            "Walkthrough Report\n\
             ==================\n\
             Project: {}\n\
             Format: {}\n\
             Sections generated: {}\n\
             Refined section: {}\n\
             Status: {}\n\
             Artifact: {} ({}, {} bytes)\n",
            self.project_id,
            self.document_type,
            self.sections_generated,
            self.refined_section,
            self.status,
            self.artifact_filename,
            self.mime_type,
            self.artifact_bytes,
        )
    }
}

/// Run the full pipeline once over scripted collaborators
pub async fn run_walkthrough(config: WalkthroughConfig) -> anyhow::Result<WalkthroughReport> {
    let (store, engine, renderer) = scripted_collaborators();

    // Wizard: details -> outline -> review -> atomic commit
    let mut wizard = ProjectWizard::new(engine.clone(), store.clone());
    wizard.set_name(&config.name)?;
    wizard.set_document_type(config.document_type)?;
    wizard.set_main_topic(&config.topic)?;
    wizard.proceed_to_outline()?;
    wizard.set_section_count(config.section_count)?;

    if config.manual_outline {
        wizard.acquire_outline(OutlineStrategy::Manual).await?;
        for position in 1..=config.section_count {
            wizard.edit_section_title(
                position as u32,
                format!("Part {position}: {}", config.topic),
            )?;
        }
    } else {
        wizard.acquire_outline(OutlineStrategy::AiGenerated).await?;
    }
    let project = wizard.commit().await?;

    // Orchestrator: all sections generated concurrently, one per marker
    let orchestrator = SectionOrchestrator::new(store.clone(), engine.clone());
    let section_ids: Vec<SectionId> = project.sections.iter().map(|s| s.id).collect();
    try_join_all(
        section_ids
            .iter()
            .map(|id| orchestrator.generate(&project, *id)),
    )
    .await?;

    // Re-read canonical state through the workspace
    let workspace = ProjectWorkspace::new(store.clone());
    workspace.refresh().await?;
    let project = workspace.open(project.id).await?;
    let generated = project.sections.iter().filter(|s| s.has_content()).count();

    // One refinement pass over the opening section
    let first = project.sections_in_order()[0].id;
    let project = orchestrator
        .refine(&project, first, "Tighten the wording")
        .await?;

    // Export the finished artifact
    let coordinator = ExportCoordinator::new(renderer);
    let artifact = coordinator.export(&project).await?;

    Ok(WalkthroughReport {
        project_id: project.id,
        refined_section: first,
        document_type: project.document_type,
        sections_generated: generated,
        status: project.status.as_str().to_string(),
        artifact_filename: artifact.filename,
        mime_type: artifact.mime_type.to_string(),
        artifact_bytes: artifact.bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_walkthrough_completes() {
        let report = run_walkthrough(WalkthroughConfig::default()).await.unwrap();
        assert_eq!(report.sections_generated, 3);
        assert_eq!(report.artifact_filename, "Energy Report.docx");
        assert!(report.artifact_bytes > 0);
    }

    #[tokio::test]
    async fn manual_walkthrough_completes() {
        let config = WalkthroughConfig {
            manual_outline: true,
            document_type: DocumentType::Pptx,
            section_count: 2,
            ..Default::default()
        };
        let report = run_walkthrough(config).await.unwrap();
        assert_eq!(report.sections_generated, 2);
        assert_eq!(report.artifact_filename, "Energy Report.pptx");
        assert_eq!(
            report.mime_type,
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        );
    }
}
