//! Deterministic in-process collaborators
//!
//! Stand-ins for the three external collaborators, shared by the demo
//! binary and the integration suites: an in-memory store, a scripted
//! content engine that writes server-side the way the real one does,
//! and a stub renderer. All behavior is deterministic given the same
//! inputs; failure switches let tests exercise the error paths.

pub mod walkthrough;

pub use walkthrough::{run_walkthrough, WalkthroughConfig, WalkthroughReport};

use crate::api::{ContentEngine, DocumentRenderer, ProjectStore};
use crate::error::ApiError;
use async_trait::async_trait;
use chrono::Utc;
use docsmith_model::{
    DocumentType, Project, ProjectDraft, ProjectId, ProjectStatus, Section, SectionId,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// In-memory authoritative store
///
/// Assigns ids, status and timestamps the way the remote store would,
/// and counts calls so tests can assert that validation failures never
/// went over the wire.
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    projects: RwLock<Vec<Project>>,
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_next_create: AtomicBool,
}

impl InMemoryProjectStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many create calls reached the store
    #[inline]
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::Relaxed)
    }

    /// How many delete calls reached the store
    #[inline]
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::Relaxed)
    }

    /// Make the next create call fail, then behave normally again
    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::Relaxed);
    }

    /// Server-side content write, used by the scripted engine
    pub fn write_section_content(
        &self,
        section: SectionId,
        content: impl Into<String>,
    ) -> Result<(), ApiError> {
        let mut projects = self.projects.write();
        let target = projects
            .iter_mut()
            .flat_map(|p| p.sections.iter_mut())
            .find(|s| s.id == section)
            .ok_or_else(|| ApiError::not_found("section"))?;
        target.content = Some(content.into());
        target.updated_at = Utc::now();
        Ok(())
    }

    /// Locate a section and the project owning it
    pub fn find_section(&self, section: SectionId) -> Result<(Project, Section), ApiError> {
        let projects = self.projects.read();
        for project in projects.iter() {
            if let Some(s) = project.section(section) {
                return Ok((project.clone(), s.clone()));
            }
        }
        Err(ApiError::not_found("section"))
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn create_project(&self, draft: ProjectDraft) -> Result<Project, ApiError> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_next_create.swap(false, Ordering::Relaxed) {
            return Err(ApiError::call("create_project", "store rejected the request"));
        }

        let now = Utc::now();
        let sections = draft
            .sections
            .iter()
            .map(|s| Section {
                id: SectionId(Uuid::new_v4()),
                title: s.title.clone(),
                position: s.position,
                content: s.content.clone(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        let project = Project {
            id: ProjectId(Uuid::new_v4()),
            name: draft.name,
            document_type: draft.document_type,
            main_topic: draft.main_topic,
            status: ProjectStatus::from("draft"),
            sections,
            created_at: now,
            updated_at: now,
        };

        self.projects.write().push(project.clone());
        Ok(project)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        Ok(self.projects.read().clone())
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, ApiError> {
        self.projects
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("project"))
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::Relaxed);
        let mut projects = self.projects.write();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Err(ApiError::not_found("project"));
        }
        Ok(())
    }
}

/// Scripted AI collaborator writing into an `InMemoryProjectStore`
#[derive(Debug)]
pub struct ScriptedContentEngine {
    store: Arc<InMemoryProjectStore>,
    fail_outline: AtomicBool,
    fail_generation: AtomicBool,
    fail_refinement: AtomicBool,
    refine_calls: AtomicUsize,
}

impl ScriptedContentEngine {
    /// Engine writing server-side into the given store
    #[must_use]
    pub fn new(store: Arc<InMemoryProjectStore>) -> Self {
        Self {
            store,
            fail_outline: AtomicBool::new(false),
            fail_generation: AtomicBool::new(false),
            fail_refinement: AtomicBool::new(false),
            refine_calls: AtomicUsize::new(0),
        }
    }

    /// Toggle outline failures
    pub fn set_fail_outline(&self, fail: bool) {
        self.fail_outline.store(fail, Ordering::Relaxed);
    }

    /// Toggle generation failures
    pub fn set_fail_generation(&self, fail: bool) {
        self.fail_generation.store(fail, Ordering::Relaxed);
    }

    /// Toggle refinement failures
    pub fn set_fail_refinement(&self, fail: bool) {
        self.fail_refinement.store(fail, Ordering::Relaxed);
    }

    /// How many refine calls reached the engine
    #[inline]
    #[must_use]
    pub fn refine_calls(&self) -> usize {
        self.refine_calls.load(Ordering::Relaxed)
    }

    fn scripted_title(topic: &str, position: usize, count: usize) -> String {
        if position == 1 {
            format!("Introduction to {topic}")
        } else if position == count {
            "Conclusion and Next Steps".to_string()
        } else {
            format!("Key Aspect {} of {topic}", position - 1)
        }
    }

    fn scripted_content(project: &Project, section: &Section) -> String {
        match project.document_type {
            DocumentType::Docx => format!(
                "{title}: a professional discussion of {topic}. \
                 This section covers the essentials in two short paragraphs.\n\n\
                 Further detail on {topic} as it relates to {title}.",
                title = section.title,
                topic = project.main_topic,
            ),
            DocumentType::Pptx => format!(
                "• {title} at a glance\n\
                 • How {topic} shapes this slide\n\
                 • Takeaway for the audience",
                title = section.title,
                topic = project.main_topic,
            ),
        }
    }
}

#[async_trait]
impl ContentEngine for ScriptedContentEngine {
    async fn generate_outline(
        &self,
        topic: &str,
        _document_type: DocumentType,
        count: usize,
    ) -> Result<Vec<String>, ApiError> {
        if self.fail_outline.load(Ordering::Relaxed) {
            return Err(ApiError::call("generate_outline", "scripted failure"));
        }
        Ok((1..=count)
            .map(|p| Self::scripted_title(topic, p, count))
            .collect())
    }

    async fn generate_section_content(
        &self,
        project: ProjectId,
        section: SectionId,
    ) -> Result<(), ApiError> {
        if self.fail_generation.load(Ordering::Relaxed) {
            return Err(ApiError::call("generate_section_content", "scripted failure"));
        }
        let snapshot = self.store.get_project(project).await?;
        let target = snapshot
            .section(section)
            .ok_or_else(|| ApiError::not_found("section"))?;
        let content = Self::scripted_content(&snapshot, target);
        self.store.write_section_content(section, content)
    }

    async fn refine_content(
        &self,
        section: SectionId,
        instruction: &str,
    ) -> Result<(), ApiError> {
        self.refine_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_refinement.load(Ordering::Relaxed) {
            return Err(ApiError::call("refine_content", "scripted failure"));
        }
        let (_, target) = self.store.find_section(section)?;
        let original = target.content.ok_or_else(|| {
            ApiError::call("refine_content", "section has no content to refine")
        })?;
        // Full rewrite, not a diff
        let refined = format!("[per \"{instruction}\"] {original}");
        self.store.write_section_content(section, refined)
    }
}

/// Renderer producing a plain-text layout of the project
#[derive(Debug)]
pub struct StubRenderer {
    store: Arc<InMemoryProjectStore>,
}

impl StubRenderer {
    /// Renderer reading from the given store
    #[must_use]
    pub fn new(store: Arc<InMemoryProjectStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DocumentRenderer for StubRenderer {
    async fn render(&self, project: ProjectId) -> Result<Vec<u8>, ApiError> {
        let snapshot = self.store.get_project(project).await?;
        let mut out = format!("{}\nTopic: {}\n", snapshot.name, snapshot.main_topic);
        for section in snapshot.sections_in_order() {
            out.push_str(&format!(
                "\n{}. {}\n{}\n",
                section.position,
                section.title,
                section.content.as_deref().unwrap_or("[Content not yet generated]"),
            ));
        }
        Ok(out.into_bytes())
    }
}

/// Store, engine and renderer wired together over one in-memory state
#[must_use]
pub fn scripted_collaborators() -> (
    Arc<InMemoryProjectStore>,
    Arc<ScriptedContentEngine>,
    Arc<StubRenderer>,
) {
    let store = Arc::new(InMemoryProjectStore::new());
    let engine = Arc::new(ScriptedContentEngine::new(Arc::clone(&store)));
    let renderer = Arc::new(StubRenderer::new(Arc::clone(&store)));
    (store, engine, renderer)
}
