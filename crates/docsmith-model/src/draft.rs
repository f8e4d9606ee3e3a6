//! Draft types accumulated before project creation
//!
//! The wizard builds a `ProjectDraft` field by field; `validate` is the
//! local gate run before the atomic create call ever leaves the client.

use crate::error::ValidationError;
use crate::project::DocumentType;
use serde::{Deserialize, Serialize};

/// Smallest accepted outline length
pub const MIN_SECTION_COUNT: usize = 1;
/// Largest accepted outline length
pub const MAX_SECTION_COUNT: usize = 20;

/// A section as entered or generated before the project exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDraft {
    /// Section title, filled by the user or the outline collaborator
    pub title: String,
    /// 1-based position within the outline
    pub position: u32,
    /// Always `None` at creation time; content comes later
    pub content: Option<String>,
}

impl SectionDraft {
    /// Draft with an empty title at the given position
    #[inline]
    #[must_use]
    pub fn blank(position: u32) -> Self {
        Self {
            title: String::new(),
            position,
            content: None,
        }
    }

    /// Draft with a title at the given position
    #[inline]
    #[must_use]
    pub fn titled(title: impl Into<String>, position: u32) -> Self {
        Self {
            title: title.into(),
            position,
            content: None,
        }
    }
}

/// Everything needed for one atomic project creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    /// User-supplied project name
    pub name: String,
    /// Target format
    pub document_type: DocumentType,
    /// Generation prompt seed
    pub main_topic: String,
    /// Ordered outline
    pub sections: Vec<SectionDraft>,
}

impl ProjectDraft {
    /// Build a draft from its parts
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        document_type: DocumentType,
        main_topic: impl Into<String>,
        sections: Vec<SectionDraft>,
    ) -> Self {
        Self {
            name: name.into(),
            document_type,
            main_topic: main_topic.into(),
            sections,
        }
    }

    /// Validate the draft without contacting any collaborator
    ///
    /// # Errors
    /// - `EmptyName` / `EmptyTopic` when the corresponding field is blank
    /// - `NoSections` when the outline is empty
    /// - `EmptyTitle` for the first blank section title
    /// - `NonDensePositions` unless positions are exactly 1..=N
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.main_topic.trim().is_empty() {
            return Err(ValidationError::EmptyTopic);
        }
        if self.sections.is_empty() {
            return Err(ValidationError::NoSections);
        }
        for section in &self.sections {
            if section.title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle {
                    position: section.position,
                });
            }
        }
        let mut positions: Vec<u32> = self.sections.iter().map(|s| s.position).collect();
        positions.sort_unstable();
        let dense = positions
            .iter()
            .enumerate()
            .all(|(i, p)| *p == (i as u32) + 1);
        if !dense {
            return Err(ValidationError::NonDensePositions);
        }
        Ok(())
    }

    /// Whether `validate` would pass
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Check a requested outline length against the accepted range
///
/// # Errors
/// `SectionCountOutOfRange` outside `MIN_SECTION_COUNT..=MAX_SECTION_COUNT`.
pub fn check_section_count(requested: usize) -> Result<(), ValidationError> {
    if (MIN_SECTION_COUNT..=MAX_SECTION_COUNT).contains(&requested) {
        Ok(())
    } else {
        Err(ValidationError::SectionCountOutOfRange { requested })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled_sections(count: u32) -> Vec<SectionDraft> {
        (1..=count)
            .map(|p| SectionDraft::titled(format!("Part {p}"), p))
            .collect()
    }

    fn valid_draft() -> ProjectDraft {
        ProjectDraft::new(
            "Energy Report",
            DocumentType::Docx,
            "Renewable energy",
            titled_sections(3),
        )
    }

    #[test]
    fn valid_draft_passes() {
        assert!(valid_draft().validate().is_ok());
        assert!(valid_draft().is_valid());
    }

    #[test]
    fn empty_name_rejected() {
        let mut draft = valid_draft();
        draft.name = "   ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn empty_topic_rejected() {
        let mut draft = valid_draft();
        draft.main_topic = String::new();
        assert_eq!(draft.validate(), Err(ValidationError::EmptyTopic));
    }

    #[test]
    fn no_sections_rejected() {
        let mut draft = valid_draft();
        draft.sections.clear();
        assert_eq!(draft.validate(), Err(ValidationError::NoSections));
    }

    #[test]
    fn blank_title_rejected() {
        let mut draft = valid_draft();
        draft.sections[1].title = String::new();
        assert_eq!(
            draft.validate(),
            Err(ValidationError::EmptyTitle { position: 2 })
        );
    }

    #[test]
    fn positions_must_be_dense() {
        let mut draft = valid_draft();
        draft.sections[2].position = 5;
        assert_eq!(draft.validate(), Err(ValidationError::NonDensePositions));

        // Duplicates are just as invalid as gaps
        let mut draft = valid_draft();
        draft.sections[2].position = 1;
        assert_eq!(draft.validate(), Err(ValidationError::NonDensePositions));
    }

    #[test]
    fn section_count_bounds() {
        assert!(check_section_count(1).is_ok());
        assert!(check_section_count(20).is_ok());
        assert_eq!(
            check_section_count(0),
            Err(ValidationError::SectionCountOutOfRange { requested: 0 })
        );
        assert_eq!(
            check_section_count(21),
            Err(ValidationError::SectionCountOutOfRange { requested: 21 })
        );
    }
}
