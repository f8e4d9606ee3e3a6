//! Error types for the orchestration layer
//!
//! Two families, mirroring the system's error handling design:
//! - validation errors: detected locally, before any collaborator call;
//!   nothing is mutated and nothing goes over the wire
//! - collaborator errors: a remote call failed; the flow stays at its
//!   pre-call step so the action is retryable

use crate::sections::SectionActivity;
use crate::wizard::WizardStep;
use docsmith_model::{SectionId, ValidationError};

/// Generic failure signal from a collaborator call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The remote call itself failed
    #[error("{operation} call failed: {message}")]
    Call {
        /// Boundary operation name
        operation: &'static str,
        /// Collaborator-supplied detail
        message: String,
    },

    /// The addressed entity does not exist in the store
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
}

impl ApiError {
    /// Failed call to the named boundary operation
    #[inline]
    pub fn call(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Call {
            operation,
            message: message.into(),
        }
    }

    /// Missing entity of the named kind
    #[inline]
    #[must_use]
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}

/// Outline acquisition errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    /// Request rejected locally, no collaborator contacted
    #[error("invalid outline request: {0}")]
    Validation(#[from] ValidationError),

    /// The outline collaborator failed
    #[error("outline generation failed: {0}")]
    Generation(#[from] ApiError),

    /// The collaborator broke its contract on the number of titles
    #[error("outline collaborator returned {returned} titles, expected {expected}")]
    TitleCountMismatch { expected: usize, returned: usize },
}

/// Project wizard errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// Operation is not valid at the current step
    #[error("operation requires step {expected:?}, wizard is at {actual:?}")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    /// No backward transition exists from this step
    #[error("no backward transition from {from:?}")]
    IllegalTransition { from: WizardStep },

    /// Commit blocked by local validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Outline acquisition failed; wizard stays at the choice step
    #[error(transparent)]
    Outline(#[from] OutlineError),

    /// The store rejected the atomic create; no partial project persisted
    #[error("project creation failed: {0}")]
    Creation(ApiError),

    /// No section draft at the addressed position
    #[error("no section at position {position}")]
    UnknownPosition { position: u32 },
}

impl WizardError {
    /// Whether retrying the same action can succeed without edits
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WizardError::Creation(_) | WizardError::Outline(OutlineError::Generation(_))
        )
    }
}

/// Section generate/refine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    /// Rejected locally, no collaborator contacted
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An operation on this section is already in flight
    #[error("section {section} is busy ({activity})")]
    Busy {
        section: SectionId,
        activity: SectionActivity,
    },

    /// Content exists; regeneration is not a path, refinement is
    #[error("section {0} already has content; refine it instead")]
    AlreadyGenerated(SectionId),

    /// Nothing to refine yet
    #[error("section {0} has no content to refine")]
    NoContent(SectionId),

    /// The section does not belong to the project in view
    #[error("section {0} not found in project")]
    UnknownSection(SectionId),

    /// Collaborator call or reload failed; local content is unchanged
    #[error("content operation failed: {0}")]
    Api(#[from] ApiError),
}

impl SectionError {
    /// Whether retrying the same action can succeed without edits
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, SectionError::Api(_) | SectionError::Busy { .. })
    }
}

/// Export coordinator errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// One export at a time per coordinator
    #[error("an export is already in flight")]
    Busy,

    /// The renderer failed; nothing was produced
    #[error("export failed: {0}")]
    Api(#[from] ApiError),
}

impl ExportError {
    /// Whether retrying the same action can succeed without edits
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        // Busy clears when the in-flight export settles
        matches!(self, ExportError::Busy | ExportError::Api(_))
    }
}
