//! core::schema
//!
//! The catalogue document: one JSON value holding the whole
//! Subject → Section → Topic tree.
//!
//! # Schema Design
//!
//! - The top-level object has a single `subjects` array
//! - Sections carry their owning `subject_id`, topics their `section_id`
//! - Topic details mirror the topic id in both `id` and `topic_id`
//! - `text` and `code` are `null` rather than empty strings
//!
//! Parent linkage is redundant with containment. [`Document::relink`]
//! re-derives it from containment so documents written by older tools
//! (which omitted `subject_id`/`section_id`) load into a consistent tree.
//!
//! # Example
//!
//! ```
//! use coursetree::core::schema::{Document, Subject};
//! use coursetree::core::types::SubjectId;
//!
//! let mut doc = Document::default();
//! doc.subjects.push(Subject::new(SubjectId::new(1), "Math", "desc"));
//!
//! let json = doc.to_pretty_json().unwrap();
//! let parsed = Document::parse(&json).unwrap();
//! assert_eq!(parsed, doc);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::types::{SectionId, SubjectId, TopicId};

/// The whole persisted catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// A subject: the root of one catalogue tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A section inside a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    #[serde(default)]
    pub subject_id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// A topic inside a section. Topics are leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    #[serde(default)]
    pub section_id: SectionId,
    pub name: String,
    pub details: TopicDetails,
}

/// The body of a topic.
///
/// `table` and `image` are reserved slots that are always written as
/// `null` by this crate but preserved if a document carries values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDetails {
    #[serde(default)]
    pub id: TopicId,
    #[serde(default)]
    pub topic_id: TopicId,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub table: Option<serde_json::Value>,
    #[serde(default)]
    pub image: Option<serde_json::Value>,
}

/// Map an empty string to `None`.
pub fn empty_to_none(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Subject {
    pub fn new(id: SubjectId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            sections: Vec::new(),
        }
    }
}

impl Section {
    pub fn new(id: SectionId, subject_id: SubjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            subject_id,
            name: name.into(),
            topics: Vec::new(),
        }
    }
}

impl Topic {
    /// Create a topic. Empty `text`/`code` are stored as `None`.
    pub fn new(
        id: TopicId,
        section_id: SectionId,
        name: impl Into<String>,
        text: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            id,
            section_id,
            name: name.into(),
            details: TopicDetails::new(id, text, code),
        }
    }
}

impl TopicDetails {
    pub fn new(topic_id: TopicId, text: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: topic_id,
            topic_id,
            text: empty_to_none(text),
            code: empty_to_none(code),
            table: None,
            image: None,
        }
    }
}

impl Document {
    /// Parse a document and re-derive parent linkage.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Document = serde_json::from_str(json)?;
        doc.relink();
        Ok(doc)
    }

    /// Serialize as JSON with four-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Make every parent id and details id agree with containment.
    pub fn relink(&mut self) {
        for subject in &mut self.subjects {
            for section in &mut subject.sections {
                section.subject_id = subject.id;
                for topic in &mut section.topics {
                    topic.section_id = section.id;
                    topic.details.id = topic.id;
                    topic.details.topic_id = topic.id;
                }
            }
        }
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn subject_mut(&mut self, id: SubjectId) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == id)
    }

    /// Every section of every subject, in document order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.subjects.iter().flat_map(|s| s.sections.iter())
    }

    /// Every topic of every section, in document order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.sections().flat_map(|s| s.topics.iter())
    }

    /// Find a section by id. Section ids are globally unique, so the first
    /// match is definitive.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.subjects
            .iter_mut()
            .flat_map(|s| s.sections.iter_mut())
            .find(|s| s.id == id)
    }

    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.topics().find(|t| t.id == id)
    }

    /// The subject owning the given section.
    pub fn section_owner_mut(&mut self, id: SectionId) -> Option<&mut Subject> {
        self.subjects
            .iter_mut()
            .find(|s| s.sections.iter().any(|sec| sec.id == id))
    }

    /// The section owning the given topic.
    pub fn topic_owner_mut(&mut self, id: TopicId) -> Option<&mut Section> {
        self.subjects
            .iter_mut()
            .flat_map(|s| s.sections.iter_mut())
            .find(|sec| sec.topics.iter().any(|t| t.id == id))
    }

    /// Next free subject id; `None` when the id space is used up.
    pub fn next_subject_id(&self) -> Option<SubjectId> {
        SubjectId::next_after(self.subjects.iter().map(|s| s.id))
    }

    pub fn next_section_id(&self) -> Option<SectionId> {
        SectionId::next_after(self.sections().map(|s| s.id))
    }

    pub fn next_topic_id(&self) -> Option<TopicId> {
        TopicId::next_after(self.topics().map(|t| t.id))
    }
}
