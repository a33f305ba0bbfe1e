//! repo
//!
//! The catalogue repository: every query and mutation of the
//! Subject → Section → Topic tree.
//!
//! # Architecture
//!
//! Every mutation follows the same cycle:
//! 1. Load the whole document (strictly; a corrupt file is an error)
//! 2. Locate the target by linear scan
//! 3. Validate against the loaded snapshot
//! 4. Mutate the in-memory copy
//! 5. Write the whole document atomically
//! 6. Invalidate the read cache
//!
//! Validation finishes before the write starts, so a rejected mutation
//! never touches the file. Names, descriptions, text and code are trimmed
//! on the way in, so `" Math "` and `"Math"` are the same sibling name.
//!
//! # Concurrency
//!
//! Mutations take `&mut self`. The store lock serializes only the
//! write-and-rename step: two processes that load the same version and
//! both write will keep only the second writer's snapshot.
//!
//! # Example
//!
//! ```ignore
//! use coursetree::repo::CatalogRepository;
//!
//! let mut repo = CatalogRepository::open("data/subjects.json");
//! let math = repo.create_subject("Math", "Numbers and shapes")?;
//! let algebra = repo.create_section(math.id, "Algebra")?;
//! repo.create_topic(algebra.id, "Linear Eq", "ax+b=0", "")?;
//!
//! assert_eq!(repo.list_subjects().len(), 1);
//! ```

pub mod cache;
mod error;

pub use cache::{Snapshot, SubjectCache};
pub use error::{CatalogError, SECTION_HAS_TOPICS, SUBJECT_HAS_SECTIONS};

use std::path::PathBuf;

use tracing::info;

use crate::core::schema::{empty_to_none, Document, Section, Subject, Topic};
use crate::core::types::{EntityKind, SectionId, SubjectId, TopicId};
use crate::core::validate::{self, can_delete, unique_among_siblings};
use crate::store::DocumentStore;

/// Result alias for repository operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Owns the document store and the read cache.
#[derive(Debug)]
pub struct CatalogRepository {
    store: DocumentStore,
    cache: SubjectCache,
}

impl CatalogRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            cache: SubjectCache::new(),
        }
    }

    /// Repository over the given data file.
    pub fn open(data_file: impl Into<PathBuf>) -> Self {
        Self::new(DocumentStore::at(data_file))
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    // =========================================================================
    // Reads (served from the cache)
    // =========================================================================

    /// All subjects with their full trees.
    ///
    /// Never fails: an unreadable document reads as an empty catalogue.
    pub fn list_subjects(&self) -> Snapshot {
        self.cache.get_or_load(|| self.store.read().subjects)
    }

    pub fn find_subject(&self, id: SubjectId) -> Option<Subject> {
        self.list_subjects().iter().find(|s| s.id == id).cloned()
    }

    /// Find a subject by its exact name.
    pub fn find_subject_by_name(&self, name: &str) -> Option<Subject> {
        self.list_subjects()
            .iter()
            .find(|s| s.name == name)
            .cloned()
    }

    pub fn find_section(&self, id: SectionId) -> Option<Section> {
        self.list_subjects()
            .iter()
            .flat_map(|s| s.sections.iter())
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn find_topic(&self, id: TopicId) -> Option<Topic> {
        self.list_subjects()
            .iter()
            .flat_map(|s| s.sections.iter())
            .flat_map(|s| s.topics.iter())
            .find(|t| t.id == id)
            .cloned()
    }

    /// True if the subject exists and has at least one section.
    pub fn subject_has_sections(&self, id: SubjectId) -> bool {
        self.list_subjects()
            .iter()
            .find(|s| s.id == id)
            .is_some_and(|s| !can_delete(s))
    }

    /// True if the section exists and has at least one topic.
    pub fn section_has_topics(&self, id: SectionId) -> bool {
        self.list_subjects()
            .iter()
            .flat_map(|s| s.sections.iter())
            .find(|s| s.id == id)
            .is_some_and(|s| !can_delete(s))
    }

    // =========================================================================
    // Creates
    // =========================================================================

    pub fn create_subject(&mut self, name: &str, description: &str) -> Result<Subject> {
        let (name, description) = (name.trim(), description.trim());
        validate::check_subject_fields(name, description)?;

        let mut doc = self.store.load()?;
        if !unique_among_siblings(name, &doc.subjects, None) {
            return Err(CatalogError::duplicate_name(EntityKind::Subject, None));
        }

        let id = doc
            .next_subject_id()
            .ok_or(CatalogError::IdsExhausted(EntityKind::Subject))?;
        let subject = Subject::new(id, name, description);
        doc.subjects.push(subject.clone());
        self.commit(&doc)?;

        info!(id = %subject.id, name = %subject.name, "subject created");
        Ok(subject)
    }

    pub fn create_section(&mut self, subject_id: SubjectId, name: &str) -> Result<Section> {
        let name = name.trim();
        validate::check_name(EntityKind::Section, name)?;

        let mut doc = self.store.load()?;
        let next_id = doc.next_section_id();
        let subject = doc
            .subject_mut(subject_id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Subject, subject_id))?;

        if !unique_among_siblings(name, &subject.sections, None) {
            return Err(CatalogError::duplicate_name(
                EntityKind::Section,
                Some(EntityKind::Subject),
            ));
        }

        let id = next_id.ok_or(CatalogError::IdsExhausted(EntityKind::Section))?;
        let section = Section::new(id, subject_id, name);
        subject.sections.push(section.clone());
        self.commit(&doc)?;

        info!(id = %section.id, subject_id = %subject_id, "section created");
        Ok(section)
    }

    pub fn create_topic(
        &mut self,
        section_id: SectionId,
        name: &str,
        text: &str,
        code: &str,
    ) -> Result<Topic> {
        let (name, text, code) = (name.trim(), text.trim(), code.trim());
        validate::check_name(EntityKind::Topic, name)?;

        let mut doc = self.store.load()?;
        let next_id = doc.next_topic_id();
        let section = doc
            .section_mut(section_id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Section, section_id))?;

        if !unique_among_siblings(name, &section.topics, None) {
            return Err(CatalogError::duplicate_name(
                EntityKind::Topic,
                Some(EntityKind::Section),
            ));
        }

        let id = next_id.ok_or(CatalogError::IdsExhausted(EntityKind::Topic))?;
        let topic = Topic::new(id, section_id, name, text, code);
        section.topics.push(topic.clone());
        self.commit(&doc)?;

        info!(id = %topic.id, section_id = %section_id, "topic created");
        Ok(topic)
    }

    // =========================================================================
    // Updates
    // =========================================================================

    pub fn update_subject(
        &mut self,
        id: SubjectId,
        name: &str,
        description: &str,
    ) -> Result<Subject> {
        let (name, description) = (name.trim(), description.trim());
        validate::check_subject_fields(name, description)?;

        let mut doc = self.store.load()?;
        if doc.subject(id).is_none() {
            return Err(CatalogError::not_found(EntityKind::Subject, id));
        }
        if !unique_among_siblings(name, &doc.subjects, Some(id)) {
            return Err(CatalogError::duplicate_name(EntityKind::Subject, None));
        }

        let subject = doc
            .subject_mut(id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Subject, id))?;
        subject.name = name.to_string();
        subject.description = description.to_string();
        let updated = subject.clone();
        self.commit(&doc)?;

        info!(id = %id, "subject updated");
        Ok(updated)
    }

    pub fn update_section(&mut self, id: SectionId, name: &str) -> Result<Section> {
        let name = name.trim();
        validate::check_name(EntityKind::Section, name)?;

        let mut doc = self.store.load()?;
        let owner = doc
            .section_owner_mut(id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Section, id))?;

        if !unique_among_siblings(name, &owner.sections, Some(id)) {
            return Err(CatalogError::duplicate_name(
                EntityKind::Section,
                Some(EntityKind::Subject),
            ));
        }

        let section = owner
            .sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Section, id))?;
        section.name = name.to_string();
        let updated = section.clone();
        self.commit(&doc)?;

        info!(id = %id, "section updated");
        Ok(updated)
    }

    pub fn update_topic(
        &mut self,
        id: TopicId,
        name: &str,
        text: &str,
        code: &str,
    ) -> Result<Topic> {
        let (name, text, code) = (name.trim(), text.trim(), code.trim());
        validate::check_name(EntityKind::Topic, name)?;

        let mut doc = self.store.load()?;
        let owner = doc
            .topic_owner_mut(id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Topic, id))?;

        if !unique_among_siblings(name, &owner.topics, Some(id)) {
            return Err(CatalogError::duplicate_name(
                EntityKind::Topic,
                Some(EntityKind::Section),
            ));
        }

        let topic = owner
            .topics
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Topic, id))?;
        topic.name = name.to_string();
        topic.details.text = empty_to_none(text);
        topic.details.code = empty_to_none(code);
        let updated = topic.clone();
        self.commit(&doc)?;

        info!(id = %id, "topic updated");
        Ok(updated)
    }

    // =========================================================================
    // Deletes
    // =========================================================================

    /// Delete an empty subject.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if the subject does not exist
    /// - [`CatalogError::Conflict`] if it still has sections
    pub fn delete_subject(&mut self, id: SubjectId) -> Result<Subject> {
        let mut doc = self.store.load()?;
        let index = doc
            .subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Subject, id))?;

        if !can_delete(&doc.subjects[index]) {
            return Err(CatalogError::Conflict(SUBJECT_HAS_SECTIONS.to_string()));
        }

        let removed = doc.subjects.remove(index);
        self.commit(&doc)?;

        info!(id = %id, "subject deleted");
        Ok(removed)
    }

    /// Delete an empty section.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if the section does not exist
    /// - [`CatalogError::Conflict`] if it still has topics
    pub fn delete_section(&mut self, id: SectionId) -> Result<Section> {
        let mut doc = self.store.load()?;
        let owner = doc
            .section_owner_mut(id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Section, id))?;

        let index = owner
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Section, id))?;
        if !can_delete(&owner.sections[index]) {
            return Err(CatalogError::Conflict(SECTION_HAS_TOPICS.to_string()));
        }

        let removed = owner.sections.remove(index);
        self.commit(&doc)?;

        info!(id = %id, "section deleted");
        Ok(removed)
    }

    /// Delete a topic. Topics are leaves, so this never conflicts.
    pub fn delete_topic(&mut self, id: TopicId) -> Result<Topic> {
        let mut doc = self.store.load()?;
        let owner = doc
            .topic_owner_mut(id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Topic, id))?;

        let index = owner
            .topics
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Topic, id))?;
        let removed = owner.topics.remove(index);
        self.commit(&doc)?;

        info!(id = %id, "topic deleted");
        Ok(removed)
    }

    /// Persist the document and drop the cached snapshot.
    fn commit(&mut self, doc: &Document) -> Result<()> {
        let result = self.store.write(doc);
        self.cache.invalidate();
        result.map_err(CatalogError::from)
    }
}
