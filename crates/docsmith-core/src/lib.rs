//! Docsmith Core - Staged document pipeline orchestration
//!
//! Turns a topic into a structured, AI-assisted document through a
//! staged pipeline:
//! - Acquire an outline (AI-suggested or user-entered blanks)
//! - Build a valid project definition through the wizard and commit it
//!   as one atomic creation call
//! - Generate and refine content per section, with independent
//!   per-section in-flight markers
//! - Export the finished binary artifact
//!
//! The client view is kept consistent with the authoritative remote
//! store by re-fetching the project wholesale after every mutation;
//! nothing is merged or predicted locally.
//!
//! # Example
//!
//! ```rust,ignore
//! use docsmith_core::harness::{run_walkthrough, WalkthroughConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let report = run_walkthrough(WalkthroughConfig::default()).await?;
//! println!("{}", report.generate_text());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod api;
pub mod error;
pub mod export;
pub mod harness;
pub mod outline;
pub mod sections;
pub mod wizard;
pub mod workspace;

// Re-exports for convenience
pub use api::{ContentEngine, DocumentRenderer, ProjectStore};
pub use error::{ApiError, ExportError, OutlineError, SectionError, WizardError};
pub use export::{ExportArtifact, ExportCoordinator};
pub use outline::{OutlineSource, OutlineStrategy};
pub use sections::{SectionActivity, SectionOrchestrator};
pub use wizard::{ProjectWizard, WizardStep, DEFAULT_SECTION_COUNT};
pub use workspace::{Confirmation, DeleteOutcome, ProjectWorkspace};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the pipeline
    pub use crate::{
        Confirmation, ContentEngine, DocumentRenderer, ExportCoordinator, OutlineStrategy,
        ProjectStore, ProjectWizard, ProjectWorkspace, SectionOrchestrator, WizardStep,
    };
    pub use docsmith_model::{DocumentType, Project, ProjectDraft, Section, SectionDraft};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
