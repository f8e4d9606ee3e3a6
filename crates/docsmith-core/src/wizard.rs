//! Project wizard
//!
//! A three-state forward/backward flow that accumulates project fields
//! and commits them as one atomic creation call. The step is an explicit
//! enum with validated transition functions, so an illegal move is an
//! error value rather than a reachable state.
//!
//! Backward transitions preserve everything already entered; switching
//! the outline strategy or section count replaces any previously edited
//! titles with a fresh outline.

use crate::api::{ContentEngine, ProjectStore};
use crate::error::WizardError;
use crate::outline::{OutlineSource, OutlineStrategy};
use docsmith_model::{DocumentType, Project, ProjectDraft, SectionDraft};
use std::sync::Arc;

/// Wizard flow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Collecting name, document type and main topic
    Details,
    /// Picking section count and outline strategy
    OutlineChoice,
    /// Editing acquired section titles; commit happens here
    OutlineReview,
    /// Terminal: the project has been created
    Submitted,
}

impl WizardStep {
    /// Steps reachable from this one
    #[must_use]
    pub fn allowed_transitions(self) -> Vec<WizardStep> {
        use WizardStep::*;
        match self {
            Details => vec![OutlineChoice],
            OutlineChoice => vec![OutlineReview, Details],
            OutlineReview => vec![OutlineChoice, Submitted],
            Submitted => vec![],
        }
    }
}

/// Default outline length offered to the user
pub const DEFAULT_SECTION_COUNT: usize = 5;

/// Finite-state flow building one valid project definition
pub struct ProjectWizard {
    engine: Arc<dyn ContentEngine>,
    store: Arc<dyn ProjectStore>,
    step: WizardStep,
    name: String,
    document_type: DocumentType,
    main_topic: String,
    section_count: usize,
    sections: Vec<SectionDraft>,
}

impl ProjectWizard {
    /// Fresh wizard at the `Details` step
    #[must_use]
    pub fn new(engine: Arc<dyn ContentEngine>, store: Arc<dyn ProjectStore>) -> Self {
        Self {
            engine,
            store,
            step: WizardStep::Details,
            name: String::new(),
            document_type: DocumentType::Docx,
            main_topic: String::new(),
            section_count: DEFAULT_SECTION_COUNT,
            sections: Vec::new(),
        }
    }

    /// Current step
    #[inline]
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Project name entered so far
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chosen document type
    #[inline]
    #[must_use]
    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Main topic entered so far
    #[inline]
    #[must_use]
    pub fn main_topic(&self) -> &str {
        &self.main_topic
    }

    /// Requested outline length
    #[inline]
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Acquired outline, empty until an acquisition succeeds
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[SectionDraft] {
        &self.sections
    }

    fn require_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    /// Set the project name (Details step)
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), WizardError> {
        self.require_step(WizardStep::Details)?;
        self.name = name.into();
        Ok(())
    }

    /// Set the document type (Details step)
    pub fn set_document_type(&mut self, document_type: DocumentType) -> Result<(), WizardError> {
        self.require_step(WizardStep::Details)?;
        self.document_type = document_type;
        Ok(())
    }

    /// Set the main topic (Details step)
    pub fn set_main_topic(&mut self, topic: impl Into<String>) -> Result<(), WizardError> {
        self.require_step(WizardStep::Details)?;
        self.main_topic = topic.into();
        Ok(())
    }

    /// `Details -> OutlineChoice`, allowed unconditionally
    ///
    /// Fields may still be blank here; the final commit validates them.
    pub fn proceed_to_outline(&mut self) -> Result<(), WizardError> {
        self.require_step(WizardStep::Details)?;
        self.step = WizardStep::OutlineChoice;
        tracing::debug!(step = ?self.step, "wizard advanced");
        Ok(())
    }

    /// Set the outline length (OutlineChoice step)
    ///
    /// A changed count discards any previously acquired titles: a fresh
    /// outline replaces the prior one.
    pub fn set_section_count(&mut self, count: usize) -> Result<(), WizardError> {
        self.require_step(WizardStep::OutlineChoice)?;
        docsmith_model::check_section_count(count)?;
        if count != self.section_count {
            self.sections.clear();
        }
        self.section_count = count;
        Ok(())
    }

    /// Invoke one outline strategy (OutlineChoice step)
    ///
    /// On success the wizard moves to `OutlineReview` with a fresh
    /// outline replacing any prior one; on failure it stays here so the
    /// user may retry or switch strategy.
    pub async fn acquire_outline(&mut self, strategy: OutlineStrategy) -> Result<(), WizardError> {
        self.require_step(WizardStep::OutlineChoice)?;

        let source = match strategy {
            OutlineStrategy::AiGenerated => OutlineSource::AiGenerated {
                topic: self.main_topic.clone(),
                document_type: self.document_type,
                count: self.section_count,
            },
            OutlineStrategy::Manual => OutlineSource::Manual {
                count: self.section_count,
            },
        };

        match source.acquire(self.engine.as_ref()).await {
            Ok(drafts) => {
                self.sections = drafts;
                self.step = WizardStep::OutlineReview;
                tracing::info!(
                    count = self.sections.len(),
                    ?strategy,
                    "outline acquired"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, ?strategy, "outline acquisition failed");
                Err(e.into())
            }
        }
    }

    /// Edit one section title in place (OutlineReview step)
    ///
    /// Position and count are fixed once the outline is acquired.
    pub fn edit_section_title(
        &mut self,
        position: u32,
        title: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.require_step(WizardStep::OutlineReview)?;
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.position == position)
            .ok_or(WizardError::UnknownPosition { position })?;
        section.title = title.into();
        Ok(())
    }

    /// Walk one step backward, preserving entered values
    pub fn back(&mut self) -> Result<(), WizardError> {
        self.step = match self.step {
            WizardStep::OutlineReview => WizardStep::OutlineChoice,
            WizardStep::OutlineChoice => WizardStep::Details,
            from => return Err(WizardError::IllegalTransition { from }),
        };
        tracing::debug!(step = ?self.step, "wizard stepped back");
        Ok(())
    }

    /// The draft the commit call would send
    #[must_use]
    pub fn draft(&self) -> ProjectDraft {
        ProjectDraft::new(
            self.name.clone(),
            self.document_type,
            self.main_topic.clone(),
            self.sections.clone(),
        )
    }

    /// Whether the commit validation would pass right now
    #[must_use]
    pub fn can_commit(&self) -> bool {
        self.step == WizardStep::OutlineReview && self.draft().is_valid()
    }

    /// Commit the accumulated draft as one atomic creation call
    ///
    /// Validation failures block the call locally. A store failure
    /// leaves the wizard at `OutlineReview` with all data intact, so the
    /// user can retry without re-entering anything. Success is terminal.
    pub async fn commit(&mut self) -> Result<Project, WizardError> {
        self.require_step(WizardStep::OutlineReview)?;

        let draft = self.draft();
        draft.validate()?;

        match self.store.create_project(draft).await {
            Ok(project) => {
                self.step = WizardStep::Submitted;
                tracing::info!(project = %project.id, sections = project.sections.len(), "project created");
                Ok(project)
            }
            Err(e) => {
                tracing::warn!(error = %e, "project creation failed");
                Err(WizardError::Creation(e))
            }
        }
    }
}

impl std::fmt::Debug for ProjectWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectWizard")
            .field("step", &self.step)
            .field("name", &self.name)
            .field("document_type", &self.document_type)
            .field("main_topic", &self.main_topic)
            .field("section_count", &self.section_count)
            .field("sections", &self.sections.len())
            .finish()
    }
}
