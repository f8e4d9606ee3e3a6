//! Section content orchestrator
//!
//! Drives per-section generate and refine operations against the store,
//! tracking an in-flight marker per section id. The marker map is keyed
//! by section id, never a single global flag, so independent sections
//! progress concurrently; a section with an active marker rejects new
//! operations until it clears.
//!
//! A marker is inserted before the remote call and removed by a guard
//! when the operation settles, success or failure. After every mutating
//! call the project is re-fetched wholesale so the caller's view equals
//! server state; nothing is merged locally.

use crate::api::{ContentEngine, ProjectStore};
use crate::error::SectionError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use docsmith_model::{Project, SectionId, ValidationError};
use std::sync::Arc;

/// In-flight operation marker for one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionActivity {
    /// First-time content generation in flight
    Generating,
    /// Content rewrite in flight
    Refining,
}

impl std::fmt::Display for SectionActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SectionActivity::Generating => "generating",
            SectionActivity::Refining => "refining",
        })
    }
}

/// Clears the section's marker when the operation settles
#[derive(Debug)]
struct ActivityGuard {
    active: Arc<DashMap<SectionId, SectionActivity>>,
    section: SectionId,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.active.remove(&self.section);
    }
}

/// Per-section generate/refine driver
pub struct SectionOrchestrator {
    store: Arc<dyn ProjectStore>,
    engine: Arc<dyn ContentEngine>,
    active: Arc<DashMap<SectionId, SectionActivity>>,
}

impl SectionOrchestrator {
    /// New orchestrator with all markers clear
    #[must_use]
    pub fn new(store: Arc<dyn ProjectStore>, engine: Arc<dyn ContentEngine>) -> Self {
        Self {
            store,
            engine,
            active: Arc::new(DashMap::new()),
        }
    }

    /// Current marker for a section, if any
    #[must_use]
    pub fn activity(&self, section: SectionId) -> Option<SectionActivity> {
        self.active.get(&section).map(|entry| *entry.value())
    }

    /// Whether an operation is in flight for this section
    #[inline]
    #[must_use]
    pub fn is_busy(&self, section: SectionId) -> bool {
        self.active.contains_key(&section)
    }

    /// Number of sections with an active marker
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.active.len()
    }

    /// Insert the marker, or reject if one is already active
    fn claim(
        &self,
        section: SectionId,
        activity: SectionActivity,
    ) -> Result<ActivityGuard, SectionError> {
        match self.active.entry(section) {
            Entry::Occupied(entry) => Err(SectionError::Busy {
                section,
                activity: *entry.get(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(activity);
                Ok(ActivityGuard {
                    active: Arc::clone(&self.active),
                    section,
                })
            }
        }
    }

    /// Generate first-time content for a section
    ///
    /// Allowed only while the section's marker is clear and its content
    /// is unset; regenerating existing content is not a path, refinement
    /// is. On success the project is re-fetched from the store and the
    /// authoritative snapshot returned. The marker clears in all cases.
    pub async fn generate(
        &self,
        project: &Project,
        section: SectionId,
    ) -> Result<Project, SectionError> {
        let target = project
            .section(section)
            .ok_or(SectionError::UnknownSection(section))?;
        if target.has_content() {
            return Err(SectionError::AlreadyGenerated(section));
        }

        let _marker = self.claim(section, SectionActivity::Generating)?;
        tracing::info!(project = %project.id, %section, "generating section content");

        self.engine
            .generate_section_content(project.id, section)
            .await?;
        let refreshed = self.store.get_project(project.id).await?;
        tracing::debug!(project = %project.id, %section, "section content generated");
        Ok(refreshed)
    }

    /// Rewrite a section's content per a refinement instruction
    ///
    /// The instruction must be non-empty after trimming and the section
    /// must already have content; both are checked before any
    /// collaborator is contacted. Refinement fully replaces the content.
    pub async fn refine(
        &self,
        project: &Project,
        section: SectionId,
        instruction: &str,
    ) -> Result<Project, SectionError> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(ValidationError::EmptyInstruction.into());
        }
        let target = project
            .section(section)
            .ok_or(SectionError::UnknownSection(section))?;
        if !target.has_content() {
            return Err(SectionError::NoContent(section));
        }

        let _marker = self.claim(section, SectionActivity::Refining)?;
        tracing::info!(project = %project.id, %section, "refining section content");

        self.engine.refine_content(section, instruction).await?;
        let refreshed = self.store.get_project(project.id).await?;
        tracing::debug!(project = %project.id, %section, "section content refined");
        Ok(refreshed)
    }
}

impl std::fmt::Debug for SectionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionOrchestrator")
            .field("in_flight", &self.active.len())
            .finish()
    }
}
