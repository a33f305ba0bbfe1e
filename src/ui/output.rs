//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, output is the persisted document shape.

use std::fmt::{Display, Write as _};

use serde::Serialize;

use crate::core::schema::{Section, Subject, Topic};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

#[derive(Serialize)]
struct SubjectsEnvelope<'a> {
    subjects: &'a [Subject],
}

/// Render subjects as `{"subjects": [...]}`.
pub fn subjects_json(subjects: &[Subject]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SubjectsEnvelope { subjects })
}

/// Render the whole catalogue as an indented tree.
pub fn format_catalogue(subjects: &[Subject]) -> String {
    if subjects.is_empty() {
        return "No subjects yet.".to_string();
    }

    subjects
        .iter()
        .map(format_subject)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one subject with its sections and topics.
pub fn format_subject(subject: &Subject) -> String {
    let mut out = format!("[{}] {}\n", subject.id, subject.name);
    if !subject.description.is_empty() {
        let _ = writeln!(out, "    {}", subject.description);
    }
    for section in &subject.sections {
        out.push_str(&format_section(section));
    }
    out
}

fn format_section(section: &Section) -> String {
    let mut out = format!("  [{}] {}\n", section.id, section.name);
    for topic in &section.topics {
        let _ = writeln!(out, "{}", format_topic_line(topic));
    }
    out
}

fn format_topic_line(topic: &Topic) -> String {
    let mut markers = Vec::new();
    if topic.details.text.is_some() {
        markers.push("text");
    }
    if topic.details.code.is_some() {
        markers.push("code");
    }

    if markers.is_empty() {
        format!("    [{}] {}", topic.id, topic.name)
    } else {
        format!("    [{}] {} ({})", topic.id, topic.name, markers.join(", "))
    }
}

/// Render a topic's full details.
pub fn format_topic(topic: &Topic) -> String {
    let mut out = format!("[{}] {}\n", topic.id, topic.name);
    if let Some(text) = &topic.details.text {
        let _ = writeln!(out, "\n{}", text);
    }
    if let Some(code) = &topic.details.code {
        let _ = writeln!(out, "\n```\n{}\n```", code);
    }
    out
}
