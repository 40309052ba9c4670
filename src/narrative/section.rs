//! Sections of the narrative page and the scene object each one focuses

use std::collections::HashSet;
use std::fmt;

use super::error::NarrativeError;

/// Identifier reserved for the overview pose
pub const HOME: &str = "home";

/// What a section points the camera at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The overview vantage point; nothing is focused
    Home,
    /// A registered scene object, by identifier
    Object(String),
}

impl FocusTarget {
    /// Parses a configuration string, mapping [`HOME`] to [`FocusTarget::Home`]
    pub fn parse(identifier: &str) -> Self {
        if identifier == HOME {
            FocusTarget::Home
        } else {
            FocusTarget::Object(identifier.to_string())
        }
    }

    pub fn object_id(&self) -> Option<&str> {
        match self {
            FocusTarget::Home => None,
            FocusTarget::Object(id) => Some(id),
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, FocusTarget::Home)
    }
}

impl fmt::Display for FocusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusTarget::Home => f.write_str(HOME),
            FocusTarget::Object(id) => f.write_str(id),
        }
    }
}

impl From<&str> for FocusTarget {
    fn from(identifier: &str) -> Self {
        FocusTarget::parse(identifier)
    }
}

/// A scrollable content unit bound to one focus target
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub identifier: String,
    /// Document position, top to bottom, starting at zero
    pub order: usize,
    pub focus_target: FocusTarget,
}

/// Immutable, document-ordered list of sections
///
/// The position of a section in the list always equals its `order`, so an active
/// section index can be used directly for lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionList {
    sections: Vec<Section>,
}

impl SectionList {
    /// Builds the list from `(identifier, focus target)` pairs in document order
    pub fn new<I, S, T>(entries: I) -> Result<Self, NarrativeError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<FocusTarget>,
    {
        let mut seen = HashSet::new();
        let mut sections = Vec::new();

        for (order, (identifier, target)) in entries.into_iter().enumerate() {
            let identifier = identifier.into();
            if identifier.is_empty() {
                return Err(NarrativeError::EmptySectionId);
            }
            if !seen.insert(identifier.clone()) {
                return Err(NarrativeError::DuplicateSection(identifier));
            }
            sections.push(Section {
                identifier,
                order,
                focus_target: target.into(),
            });
        }

        Ok(Self { sections })
    }

    /// Looks up a section by raw index; negative and out-of-range values yield `None`
    pub fn get(&self, index: i64) -> Option<&Section> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.sections.get(index))
    }

    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.identifier == identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
