//! core::types
//!
//! Strong types for catalogue identifiers.
//!
//! # Types
//!
//! - [`SubjectId`] - Identifier of a subject
//! - [`SectionId`] - Identifier of a section (unique across all subjects)
//! - [`TopicId`] - Identifier of a topic (unique across all sections)
//!
//! Each id is a distinct type so a section id can never be passed where a
//! subject id is expected. On disk they serialize as plain integers.
//!
//! # Examples
//!
//! ```
//! use coursetree::core::types::{SectionId, SubjectId};
//!
//! let subject = SubjectId::new(1);
//! assert_eq!(subject.get(), 1);
//! assert_eq!(subject.to_string(), "1");
//!
//! // Next id after the largest live id
//! let next = SectionId::next_after([SectionId::new(3), SectionId::new(7)]);
//! assert_eq!(next, Some(SectionId::new(8)));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw integer id.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw integer value.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Compute the id for a new entity: one past the largest live id,
            /// or 1 when there are none. `None` once `u64::MAX` is taken.
            pub fn next_after(live: impl IntoIterator<Item = Self>) -> Option<Self> {
                live.into_iter()
                    .map(|id| id.0)
                    .max()
                    .unwrap_or(0)
                    .checked_add(1)
                    .map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a subject. Unique among subjects.
    SubjectId
);

entity_id!(
    /// Identifier of a section. Unique across every subject's sections.
    SectionId
);

entity_id!(
    /// Identifier of a topic. Unique across every section's topics.
    TopicId
);

/// The kind of catalogue entity, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Subject,
    Section,
    Topic,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Subject => "subject",
            EntityKind::Section => "section",
            EntityKind::Topic => "topic",
        };
        f.write_str(name)
    }
}
