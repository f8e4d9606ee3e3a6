//! Local validation errors
//!
//! Everything here is detected before any remote call is issued: the
//! attempted operation is blocked and no state is mutated.

use crate::draft::{MAX_SECTION_COUNT, MIN_SECTION_COUNT};

/// A locally detectable validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Project name is empty
    #[error("project name must not be empty")]
    EmptyName,

    /// Main topic is empty
    #[error("main topic must not be empty")]
    EmptyTopic,

    /// A section title is empty
    #[error("section title at position {position} must not be empty")]
    EmptyTitle { position: u32 },

    /// Refinement instruction is empty after trimming
    #[error("refinement instruction must not be empty")]
    EmptyInstruction,

    /// A project needs at least one section
    #[error("project must have at least one section")]
    NoSections,

    /// Requested section count outside the accepted range
    #[error(
        "section count {requested} outside allowed range \
         {MIN_SECTION_COUNT}..={MAX_SECTION_COUNT}"
    )]
    SectionCountOutOfRange { requested: usize },

    /// Section positions are not exactly 1..=N
    #[error("section positions must be dense 1..=N")]
    NonDensePositions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ValidationError::EmptyTitle { position: 3 };
        assert!(err.to_string().contains("position 3"));

        let err = ValidationError::SectionCountOutOfRange { requested: 40 };
        assert!(err.to_string().contains("40"));
        assert!(err.to_string().contains("1..=20"));
    }
}
