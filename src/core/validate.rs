//! core::validate
//!
//! Validation rules shared by every mutation path.
//!
//! All rules are pure functions over in-memory values. The repository runs
//! them against its loaded snapshot before anything is written, so a
//! rejected mutation never touches the backing file.

use thiserror::Error;

use crate::core::schema::{Section, Subject, Topic};
use crate::core::types::{EntityKind, SectionId, SubjectId, TopicId};

/// Maximum length of a subject name, in characters.
pub const MAX_SUBJECT_NAME_LEN: usize = 100;

/// Maximum length of a subject description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Field-level input errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} name cannot be empty")]
    EmptyName(EntityKind),

    #[error("{kind} name cannot exceed {max} characters")]
    NameTooLong { kind: EntityKind, max: usize },

    #[error("description cannot exceed {max} characters")]
    DescriptionTooLong { max: usize },
}

/// An entity that competes for a name among its siblings.
pub trait Sibling {
    type Id: Copy + PartialEq;

    fn sibling_id(&self) -> Self::Id;
    fn sibling_name(&self) -> &str;
}

/// An entity that owns a child collection.
pub trait Parent {
    fn child_count(&self) -> usize;
}

impl Sibling for Subject {
    type Id = SubjectId;

    fn sibling_id(&self) -> SubjectId {
        self.id
    }

    fn sibling_name(&self) -> &str {
        &self.name
    }
}

impl Sibling for Section {
    type Id = SectionId;

    fn sibling_id(&self) -> SectionId {
        self.id
    }

    fn sibling_name(&self) -> &str {
        &self.name
    }
}

impl Sibling for Topic {
    type Id = TopicId;

    fn sibling_id(&self) -> TopicId {
        self.id
    }

    fn sibling_name(&self) -> &str {
        &self.name
    }
}

impl Parent for Subject {
    fn child_count(&self) -> usize {
        self.sections.len()
    }
}

impl Parent for Section {
    fn child_count(&self) -> usize {
        self.topics.len()
    }
}

/// True if `s` has something other than whitespace.
pub fn non_empty_trimmed(s: &str) -> bool {
    !s.trim().is_empty()
}

/// True if `s` is at most `n` characters long.
pub fn max_length(s: &str, n: usize) -> bool {
    s.chars().count() <= n
}

/// Case-insensitive name equality.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// True if no sibling (other than `exclude`) already uses `name`,
/// compared case-insensitively.
///
/// # Example
///
/// ```
/// use coursetree::core::schema::Subject;
/// use coursetree::core::types::SubjectId;
/// use coursetree::core::validate::unique_among_siblings;
///
/// let subjects = vec![Subject::new(SubjectId::new(1), "Math", "")];
///
/// assert!(!unique_among_siblings("MATH", &subjects, None));
/// assert!(unique_among_siblings("math", &subjects, Some(SubjectId::new(1))));
/// assert!(unique_among_siblings("Physics", &subjects, None));
/// ```
pub fn unique_among_siblings<'a, T>(
    name: &str,
    siblings: impl IntoIterator<Item = &'a T>,
    exclude: Option<T::Id>,
) -> bool
where
    T: Sibling + 'a,
{
    !siblings
        .into_iter()
        .filter(|s| Some(s.sibling_id()) != exclude)
        .any(|s| names_match(s.sibling_name(), name))
}

/// True iff the entity has no children.
pub fn can_delete(entity: &impl Parent) -> bool {
    entity.child_count() == 0
}

/// Check a subject's name and description.
pub fn check_subject_fields(name: &str, description: &str) -> Result<(), ValidationError> {
    check_name(EntityKind::Subject, name)?;
    if !max_length(name, MAX_SUBJECT_NAME_LEN) {
        return Err(ValidationError::NameTooLong {
            kind: EntityKind::Subject,
            max: MAX_SUBJECT_NAME_LEN,
        });
    }
    if !max_length(description, MAX_DESCRIPTION_LEN) {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

/// Check that an entity name is present.
pub fn check_name(kind: EntityKind, name: &str) -> Result<(), ValidationError> {
    if non_empty_trimmed(name) {
        Ok(())
    } else {
        Err(ValidationError::EmptyName(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_trimmed_rejects_whitespace() {
        assert!(non_empty_trimmed("Math"));
        assert!(non_empty_trimmed("  a "));
        assert!(!non_empty_trimmed(""));
        assert!(!non_empty_trimmed(" \t\n"));
    }

    #[test]
    fn max_length_counts_characters_not_bytes() {
        assert!(max_length("ééé", 3));
        assert!(!max_length("éééé", 3));
        assert!(max_length("", 0));
    }

    #[test]
    fn unique_among_siblings_is_case_insensitive() {
        let sections = vec![
            Section::new(SectionId::new(1), SubjectId::new(1), "Algebra"),
            Section::new(SectionId::new(2), SubjectId::new(1), "Geometry"),
        ];

        assert!(!unique_among_siblings("algebra", &sections, None));
        assert!(!unique_among_siblings("GEOMETRY", &sections, None));
        assert!(unique_among_siblings("Calculus", &sections, None));
    }

    #[test]
    fn unique_among_siblings_excludes_self() {
        let sections = vec![
            Section::new(SectionId::new(1), SubjectId::new(1), "Algebra"),
            Section::new(SectionId::new(2), SubjectId::new(1), "Geometry"),
        ];

        // Renaming a section to a different case of its own name is fine
        assert!(unique_among_siblings(
            "ALGEBRA",
            &sections,
            Some(SectionId::new(1))
        ));
        // Excluding self does not hide other siblings
        assert!(!unique_among_siblings(
            "geometry",
            &sections,
            Some(SectionId::new(1))
        ));
    }

    #[test]
    fn can_delete_requires_no_children() {
        let mut subject = Subject::new(SubjectId::new(1), "Math", "");
        assert!(can_delete(&subject));

        subject
            .sections
            .push(Section::new(SectionId::new(1), SubjectId::new(1), "Algebra"));
        assert!(!can_delete(&subject));
        assert!(can_delete(&subject.sections[0]));
    }

    #[test]
    fn subject_field_bounds() {
        assert!(check_subject_fields("Math", "desc").is_ok());
        assert_eq!(
            check_subject_fields("   ", ""),
            Err(ValidationError::EmptyName(EntityKind::Subject))
        );
        assert_eq!(
            check_subject_fields(&"x".repeat(101), ""),
            Err(ValidationError::NameTooLong {
                kind: EntityKind::Subject,
                max: MAX_SUBJECT_NAME_LEN
            })
        );
        assert!(check_subject_fields(&"x".repeat(100), &"d".repeat(1000)).is_ok());
        assert_eq!(
            check_subject_fields("Math", &"d".repeat(1001)),
            Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN
            })
        );
    }

    #[test]
    fn error_messages_name_the_entity() {
        assert_eq!(
            ValidationError::EmptyName(EntityKind::Topic).to_string(),
            "topic name cannot be empty"
        );
    }
}
