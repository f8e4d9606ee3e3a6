//! Outline acquisition
//!
//! Two interchangeable strategies produce the same shape: an ordered
//! sequence of titled (or blank) section drafts of the requested length,
//! all with `content = None`. Modelled as a single tagged union so the
//! acquisition step is one exhaustive match.

use crate::api::ContentEngine;
use crate::error::OutlineError;
use docsmith_model::{check_section_count, DocumentType, SectionDraft, ValidationError};

/// Which outline strategy the user picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineStrategy {
    /// Titles suggested by the outline collaborator
    AiGenerated,
    /// Blank titles for the user to fill in
    Manual,
}

/// A fully specified outline request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineSource {
    /// AI strategy: collaborator titles for `(topic, document_type, count)`
    AiGenerated {
        topic: String,
        document_type: DocumentType,
        count: usize,
    },
    /// Manual strategy: `count` blank entries; never fails remotely
    Manual { count: usize },
}

impl OutlineSource {
    /// Requested outline length
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            OutlineSource::AiGenerated { count, .. } | OutlineSource::Manual { count } => *count,
        }
    }

    /// Acquire the outline
    ///
    /// Always yields exactly `count` drafts at positions `1..=count` on
    /// success. Local validation (count range, empty topic for the AI
    /// strategy) is checked before the collaborator is contacted.
    ///
    /// # Errors
    /// - `OutlineError::Validation` for local failures, no call issued
    /// - `OutlineError::Generation` when the collaborator errors
    /// - `OutlineError::TitleCountMismatch` when it breaks its contract
    pub async fn acquire(
        &self,
        engine: &dyn ContentEngine,
    ) -> Result<Vec<SectionDraft>, OutlineError> {
        check_section_count(self.count())?;

        match self {
            OutlineSource::Manual { count } => {
                tracing::debug!(count, "building manual outline");
                Ok((1..=*count).map(|p| SectionDraft::blank(p as u32)).collect())
            }
            OutlineSource::AiGenerated {
                topic,
                document_type,
                count,
            } => {
                if topic.trim().is_empty() {
                    return Err(ValidationError::EmptyTopic.into());
                }

                tracing::debug!(%document_type, count, "requesting AI outline");
                let titles = engine
                    .generate_outline(topic, *document_type, *count)
                    .await?;
                if titles.len() != *count {
                    return Err(OutlineError::TitleCountMismatch {
                        expected: *count,
                        returned: titles.len(),
                    });
                }

                Ok(titles
                    .into_iter()
                    .enumerate()
                    .map(|(i, title)| SectionDraft::titled(title, (i as u32) + 1))
                    .collect())
            }
        }
    }
}
