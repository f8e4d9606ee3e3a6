//! Collaborator interfaces
//!
//! The pipeline talks to three external collaborators, each specified
//! only by the operations it exposes:
//! - `ProjectStore`: the authoritative project/section store
//! - `ContentEngine`: the opaque AI text-generation service
//! - `DocumentRenderer`: the document-binary renderer
//!
//! Mutating calls carry no usable response payload: callers re-fetch the
//! project wholesale afterwards instead of merging a locally predicted
//! value with server state.

use crate::error::ApiError;
use async_trait::async_trait;
use docsmith_model::{DocumentType, Project, ProjectDraft, ProjectId, SectionId};

/// Authoritative project/section store, reachable by id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Create a project and its sections in one atomic call
    ///
    /// The store assigns `id`, `status` and timestamps. A failed create
    /// persists nothing.
    async fn create_project(&self, draft: ProjectDraft) -> Result<Project, ApiError>;

    /// List all projects
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    /// Fetch one project with its sections
    async fn get_project(&self, id: ProjectId) -> Result<Project, ApiError>;

    /// Remove a project and its sections
    async fn delete_project(&self, id: ProjectId) -> Result<(), ApiError>;
}

/// Opaque AI text-generation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentEngine: Send + Sync {
    /// Produce an ordered list of `count` section titles for a topic
    async fn generate_outline(
        &self,
        topic: &str,
        document_type: DocumentType,
        count: usize,
    ) -> Result<Vec<String>, ApiError>;

    /// Generate content for one section; written server-side
    async fn generate_section_content(
        &self,
        project: ProjectId,
        section: SectionId,
    ) -> Result<(), ApiError>;

    /// Rewrite a section's content per the instruction; written server-side
    async fn refine_content(&self, section: SectionId, instruction: &str)
        -> Result<(), ApiError>;
}

/// Document-binary renderer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Render the project into a finished binary artifact
    async fn render(&self, project: ProjectId) -> Result<Vec<u8>, ApiError>;
}
