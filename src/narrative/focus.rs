//! Mapping from the active section index to a focus target

use super::registry::SceneObjectRegistry;
use super::section::{FocusTarget, SectionList};

/// Resolved focus for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focus {
    pub target: FocusTarget,
    pub is_focused: bool,
}

impl Focus {
    pub fn home() -> Self {
        Self {
            target: FocusTarget::Home,
            is_focused: false,
        }
    }

    /// Identifier of the focused object, if any
    pub fn object_id(&self) -> Option<&str> {
        if self.is_focused {
            self.target.object_id()
        } else {
            None
        }
    }
}

/// Stateless resolver; identical inputs always give identical output
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusResolver;

impl FocusResolver {
    /// Resolves a raw section index against the section list
    ///
    /// The sentinel and any out-of-range index fall back to home.
    pub fn resolve(active_index: i64, sections: &SectionList) -> Focus {
        match sections.get(active_index) {
            Some(section) => Focus {
                is_focused: !section.focus_target.is_home(),
                target: section.focus_target.clone(),
            },
            None => Focus::home(),
        }
    }

    /// Like [`FocusResolver::resolve`], additionally degrading targets that are not in
    /// the registry to home
    pub fn resolve_known(
        active_index: i64,
        sections: &SectionList,
        registry: &SceneObjectRegistry,
    ) -> Focus {
        let focus = Self::resolve(active_index, sections);
        match focus.target.object_id() {
            Some(id) if !registry.contains(id) => Focus::home(),
            _ => focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::tracker::SECTION_NONE;
    use cgmath::Vector3;

    fn sections() -> SectionList {
        SectionList::new([
            ("hero", "home"),
            ("about", "coruscant"),
            ("broken", "alderaan"),
        ])
        .unwrap()
    }

    #[test]
    fn test_sentinel_and_out_of_range_resolve_home() {
        let sections = sections();
        for index in [SECTION_NONE, -7, 3, 4, 1_000, i64::MAX, i64::MIN] {
            assert_eq!(FocusResolver::resolve(index, &sections), Focus::home());
        }
    }

    #[test]
    fn test_home_section_is_not_focused() {
        let focus = FocusResolver::resolve(0, &sections());
        assert_eq!(focus.target, FocusTarget::Home);
        assert!(!focus.is_focused);
        assert_eq!(focus.object_id(), None);
    }

    #[test]
    fn test_object_section_is_focused_and_deterministic() {
        let sections = sections();
        let first = FocusResolver::resolve(1, &sections);
        assert_eq!(first.target, FocusTarget::Object("coruscant".into()));
        assert!(first.is_focused);
        for _ in 0..5 {
            assert_eq!(FocusResolver::resolve(1, &sections), first);
        }
    }

    #[test]
    fn test_unknown_object_degrades_to_home() {
        let mut registry = SceneObjectRegistry::new();
        registry
            .register_object("coruscant", Vector3::new(1.0, 0.0, 0.0), 0.1)
            .unwrap();

        let sections = sections();
        assert!(FocusResolver::resolve_known(1, &sections, &registry).is_focused);
        assert_eq!(
            FocusResolver::resolve_known(2, &sections, &registry),
            Focus::home()
        );
    }
}
