use thiserror::Error;

/// Violations of the markup contract detected while building a [`crate::Document`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("section at position {index} has an empty id")]
    EmptySectionId { index: usize },
    #[error("duplicate section id '{id}'")]
    DuplicateSectionId { id: String },
    #[error("no section is marked active")]
    NoActiveSection,
    #[error("several sections are marked active: {}", ids.join(", "))]
    MultipleActiveSections { ids: Vec<String> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypingConfigError {
    #[error("typing widget needs at least one string")]
    NoStrings,
    #[error("{field} must be greater than zero")]
    ZeroSpeed { field: &'static str },
}

#[derive(Debug, Error)]
pub enum BootError {
    #[error("invalid page layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("invalid typing configuration: {0}")]
    Typing(#[from] TypingConfigError),
}
