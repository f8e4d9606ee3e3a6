//! Docsmith Model - Domain types for the document pipeline
//!
//! Defines the entities shared between the wizard, the section
//! orchestrator and the export coordinator:
//! - Projects and their ordered sections
//! - Document types (Word vs. PowerPoint) and the facts derived from them
//! - Draft types accumulated before creation, with local validation

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod draft;
pub mod error;
pub mod project;

// Re-exports for convenience
pub use draft::{
    check_section_count, ProjectDraft, SectionDraft, MAX_SECTION_COUNT, MIN_SECTION_COUNT,
};
pub use error::ValidationError;
pub use project::{
    DocumentType, Project, ProjectId, ProjectStatus, Section, SectionId, UnknownDocumentType,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
