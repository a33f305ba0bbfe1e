//! Property-based tests for catalogue invariants.
//!
//! These tests use proptest to run random sequences of operations and
//! check that ids stay ahead of every live id and sibling names stay
//! unique.

use std::collections::HashSet;

use proptest::prelude::*;
use tempfile::TempDir;

use coursetree::core::schema::{Document, Subject};
use coursetree::core::types::{SectionId, SubjectId, TopicId};
use coursetree::repo::CatalogRepository;

/// One step against the repository. Indices pick an existing entity
/// modulo the current count.
#[derive(Debug, Clone)]
enum Op {
    CreateSubject(String),
    CreateSection(usize, String),
    CreateTopic(usize, String),
    RenameSection(usize, String),
    DeleteTopic(usize),
    DeleteSection(usize),
    DeleteSubject(usize),
}

/// Short names from a tiny alphabet so duplicates (and case clashes) are
/// common. Optional padding checks that stored names come out trimmed.
fn name() -> impl Strategy<Value = String> {
    " ?[aAbB]{1,2} ?"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        name().prop_map(Op::CreateSubject),
        (any::<usize>(), name()).prop_map(|(i, n)| Op::CreateSection(i, n)),
        (any::<usize>(), name()).prop_map(|(i, n)| Op::CreateTopic(i, n)),
        (any::<usize>(), name()).prop_map(|(i, n)| Op::RenameSection(i, n)),
        any::<usize>().prop_map(Op::DeleteTopic),
        any::<usize>().prop_map(Op::DeleteSection),
        any::<usize>().prop_map(Op::DeleteSubject),
    ]
}

fn pick<T: Copy>(ids: &[T], index: usize) -> Option<T> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

fn snapshot(repo: &CatalogRepository) -> Document {
    Document {
        subjects: (*repo.list_subjects()).clone(),
    }
}

fn apply(repo: &mut CatalogRepository, op: &Op) {
    let doc = snapshot(repo);
    let subjects: Vec<SubjectId> = doc.subjects.iter().map(|s| s.id).collect();
    let sections: Vec<SectionId> = doc.sections().map(|s| s.id).collect();
    let topics: Vec<TopicId> = doc.topics().map(|t| t.id).collect();

    // Rejected operations are expected; only the invariants matter.
    let _ = match op {
        Op::CreateSubject(n) => repo.create_subject(n, "").map(|_| ()),
        Op::CreateSection(i, n) => match pick(&subjects, *i) {
            Some(id) => repo.create_section(id, n).map(|_| ()),
            None => Ok(()),
        },
        Op::CreateTopic(i, n) => match pick(&sections, *i) {
            Some(id) => repo.create_topic(id, n, "", "").map(|_| ()),
            None => Ok(()),
        },
        Op::RenameSection(i, n) => match pick(&sections, *i) {
            Some(id) => repo.update_section(id, n).map(|_| ()),
            None => Ok(()),
        },
        Op::DeleteTopic(i) => match pick(&topics, *i) {
            Some(id) => repo.delete_topic(id).map(|_| ()),
            None => Ok(()),
        },
        Op::DeleteSection(i) => match pick(&sections, *i) {
            Some(id) => repo.delete_section(id).map(|_| ()),
            None => Ok(()),
        },
        Op::DeleteSubject(i) => match pick(&subjects, *i) {
            Some(id) => repo.delete_subject(id).map(|_| ()),
            None => Ok(()),
        },
    };
}

fn names_unique<'a>(names: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    names.map(str::to_lowercase).all(|n| seen.insert(n))
}

fn siblings_unique(subjects: &[Subject]) -> bool {
    names_unique(subjects.iter().map(|s| s.name.as_str()))
        && subjects.iter().all(|s| {
            names_unique(s.sections.iter().map(|c| c.name.as_str()))
                && s.sections
                    .iter()
                    .all(|c| names_unique(c.topics.iter().map(|t| t.name.as_str())))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn sibling_names_stay_unique(ops in prop::collection::vec(op(), 1..30)) {
        let dir = TempDir::new().expect("temp dir");
        let mut repo = CatalogRepository::open(dir.path().join("subjects.json"));

        for op in &ops {
            apply(&mut repo, op);
            let subjects = repo.list_subjects();
            prop_assert!(siblings_unique(&subjects));
            let doc = Document { subjects: (*subjects).clone() };
            prop_assert!(doc.subjects.iter().all(|s| s.name == s.name.trim()));
            prop_assert!(doc.sections().all(|c| c.name == c.name.trim()));
            prop_assert!(doc.topics().all(|t| t.name == t.name.trim()));
        }
    }

    #[test]
    fn new_ids_exceed_every_live_id(ops in prop::collection::vec(op(), 1..30)) {
        let dir = TempDir::new().expect("temp dir");
        let mut repo = CatalogRepository::open(dir.path().join("subjects.json"));

        for op in &ops {
            apply(&mut repo, op);
        }

        let doc = snapshot(&repo);
        let max_subject = doc.subjects.iter().map(|s| s.id.get()).max().unwrap_or(0);
        let created = repo.create_subject("fresh-subject", "").expect("fresh subject");
        prop_assert!(created.id.get() > max_subject);

        let max_section = doc.sections().map(|s| s.id.get()).max().unwrap_or(0);
        let section = repo.create_section(created.id, "fresh-section").expect("fresh section");
        prop_assert!(section.id.get() > max_section);

        let max_topic = doc.topics().map(|t| t.id.get()).max().unwrap_or(0);
        let topic = repo.create_topic(section.id, "fresh-topic", "", "").expect("fresh topic");
        prop_assert!(topic.id.get() > max_topic);
    }

    #[test]
    fn parent_links_match_containment(ops in prop::collection::vec(op(), 1..30)) {
        let dir = TempDir::new().expect("temp dir");
        let mut repo = CatalogRepository::open(dir.path().join("subjects.json"));

        for op in &ops {
            apply(&mut repo, op);
        }

        for subject in repo.list_subjects().iter() {
            for section in &subject.sections {
                prop_assert_eq!(section.subject_id, subject.id);
                for topic in &section.topics {
                    prop_assert_eq!(topic.section_id, section.id);
                }
            }
        }
    }
}
