//! Projects and sections
//!
//! The store is the authority for everything here: ids, status and
//! timestamps are assigned server-side and the client never fabricates
//! them. A `Project` value is always a wholesale snapshot of what the
//! store returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique project identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique section identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(pub Uuid);

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target document format, fixed at project creation
///
/// Drives terminology ("section" vs. "slide"), the export MIME type and
/// the artifact file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Word-processing document
    Docx,
    /// Slide-deck presentation
    Pptx,
}

impl DocumentType {
    /// Artifact file extension
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentType::Docx => "docx",
            DocumentType::Pptx => "pptx",
        }
    }

    /// MIME type of the exported artifact
    #[inline]
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentType::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    /// What one content unit is called for this format
    #[inline]
    #[must_use]
    pub fn unit_noun(&self) -> &'static str {
        match self {
            DocumentType::Docx => "section",
            DocumentType::Pptx => "slide",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error for an unrecognised document type string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document type: {0:?} (expected \"docx\" or \"pptx\")")]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docx" => Ok(DocumentType::Docx),
            "pptx" => Ok(DocumentType::Pptx),
            other => Err(UnknownDocumentType(other.to_string())),
        }
    }
}

/// Server-assigned lifecycle label, opaque to the client beyond display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectStatus(pub String);

impl ProjectStatus {
    /// Label as a plain string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectStatus {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One addressable unit of document content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Store-assigned identifier
    pub id: SectionId,
    /// Section title, never empty once persisted
    pub title: String,
    /// 1-based position, dense within a project at creation time
    pub position: u32,
    /// Generated content; `None` means "not yet generated"
    pub content: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Section {
    /// Whether AI content has been written for this section
    #[inline]
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

/// A document project with its ordered sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned identifier
    pub id: ProjectId,
    /// User-supplied project name
    pub name: String,
    /// Target format, fixed at creation
    pub document_type: DocumentType,
    /// Generation prompt seed
    pub main_topic: String,
    /// Server-assigned lifecycle label
    pub status: ProjectStatus,
    /// Sections, created atomically with the project
    pub sections: Vec<Section>,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Look up a section by id
    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Sections sorted by position
    #[must_use]
    pub fn sections_in_order(&self) -> Vec<&Section> {
        let mut ordered: Vec<&Section> = self.sections.iter().collect();
        ordered.sort_by_key(|s| s.position);
        ordered
    }

    /// Filename of the export artifact for this project
    #[must_use]
    pub fn export_filename(&self) -> String {
        format!("{}.{}", self.name, self.document_type.extension())
    }
}
