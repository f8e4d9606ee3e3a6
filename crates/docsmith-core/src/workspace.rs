//! Project workspace
//!
//! The project-list surface: list what exists, open one project, delete
//! one behind an explicit confirmation gate. The cached list is only
//! ever replaced by a wholesale re-fetch from the store; a delete is
//! never optimistically pruned before the store confirms it.

use crate::api::ProjectStore;
use crate::error::ApiError;
use docsmith_model::{Project, ProjectId};
use parking_lot::RwLock;
use std::sync::Arc;

/// User's answer to the destructive-delete prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Proceed with the delete
    Confirmed,
    /// Abort; nothing is sent to the store
    Cancelled,
}

/// What a delete request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The store removed the project and the list was refreshed
    Deleted,
    /// The user declined; no call was issued
    Cancelled,
}

/// Cached view over the store's project list
pub struct ProjectWorkspace {
    store: Arc<dyn ProjectStore>,
    projects: RwLock<Vec<Project>>,
}

impl ProjectWorkspace {
    /// New workspace with an empty cache; call `refresh` to populate
    #[must_use]
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self {
            store,
            projects: RwLock::new(Vec::new()),
        }
    }

    /// Replace the cached list with the store's current one
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let list = self.store.list_projects().await?;
        tracing::debug!(count = list.len(), "project list refreshed");
        *self.projects.write() = list;
        Ok(())
    }

    /// Snapshot of the cached list
    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.projects.read().clone()
    }

    /// Fetch one project with its sections
    pub async fn open(&self, id: ProjectId) -> Result<Project, ApiError> {
        self.store.get_project(id).await
    }

    /// Delete a project behind the confirmation gate
    ///
    /// A cancelled confirmation is a local no-op. On a confirmed delete
    /// the list is re-fetched after the store acknowledges; a store
    /// failure leaves the cached list unchanged and surfaces the error.
    pub async fn delete(
        &self,
        id: ProjectId,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, ApiError> {
        if confirmation == Confirmation::Cancelled {
            tracing::debug!(project = %id, "delete cancelled before any call");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.store.delete_project(id).await?;
        tracing::info!(project = %id, "project deleted");
        self.refresh().await?;
        Ok(DeleteOutcome::Deleted)
    }
}

impl std::fmt::Debug for ProjectWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectWorkspace")
            .field("cached", &self.projects.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockProjectStore;
    use docsmith_model::ProjectId;
    use uuid::Uuid;

    #[tokio::test]
    async fn cancelled_delete_issues_no_call() {
        let mut store = MockProjectStore::new();
        store.expect_delete_project().times(0);
        store.expect_list_projects().times(0);
        let workspace = ProjectWorkspace::new(Arc::new(store));

        let outcome = workspace
            .delete(ProjectId(Uuid::new_v4()), Confirmation::Cancelled)
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
    }

    #[tokio::test]
    async fn confirmed_delete_refreshes_from_store() {
        let mut store = MockProjectStore::new();
        store
            .expect_delete_project()
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_list_projects()
            .times(1)
            .returning(|| Ok(Vec::new()));
        let workspace = ProjectWorkspace::new(Arc::new(store));

        let outcome = workspace
            .delete(ProjectId(Uuid::new_v4()), Confirmation::Confirmed)
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(workspace.projects().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_leaves_cache_untouched() {
        let mut store = MockProjectStore::new();
        store
            .expect_delete_project()
            .times(1)
            .returning(|_| Err(ApiError::not_found("project")));
        store.expect_list_projects().times(0);
        let workspace = ProjectWorkspace::new(Arc::new(store));

        let err = workspace
            .delete(ProjectId(Uuid::new_v4()), Confirmation::Confirmed)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::not_found("project"));
    }
}
