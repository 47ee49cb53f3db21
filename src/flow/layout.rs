//! Page arrangement derived from the session flag: hero visibility, nav
//! buttons, user menu and where the core features section sits.

use crate::flow::{session::SessionState, FlowError};
use std::fmt;
use tracing::{debug, error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    ComingSoon,
    CoreFeatures,
    Features,
    Technology,
    Modules,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hero => "hero",
            Self::ComingSoon => "coming-soon",
            Self::CoreFeatures => "core-features",
            Self::Features => "features",
            Self::Technology => "technology",
            Self::Modules => "modules",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLayout {
    sections: Vec<Section>,
    pub hero_visible: bool,
    pub nav_buttons_visible: bool,
    pub user_menu_visible: bool,
    pub user_name: Option<String>,
    pub dropdown_open: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::landing()
    }
}

impl PageLayout {
    /// The page as served: hero first, core features after coming soon.
    #[must_use]
    pub fn landing() -> Self {
        Self::with_sections(vec![
            Section::Hero,
            Section::ComingSoon,
            Section::CoreFeatures,
            Section::Features,
            Section::Technology,
            Section::Modules,
        ])
    }

    #[must_use]
    pub fn with_sections(sections: Vec<Section>) -> Self {
        Self {
            sections,
            hero_visible: true,
            nav_buttons_visible: true,
            user_menu_visible: false,
            user_name: None,
            dropdown_open: false,
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn position(&self, section: Section) -> Option<usize> {
        self.sections.iter().position(|current| *current == section)
    }

    /// Name shown in the user menu; empty when none is stored.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or_default()
    }

    /// Move `section` so it sits immediately before `anchor`.
    ///
    /// # Errors
    /// Returns `MissingElement` if either section is absent.
    pub fn move_before(&mut self, section: Section, anchor: Section) -> Result<(), FlowError> {
        let from = self
            .position(section)
            .ok_or_else(|| missing(section))?;
        self.position(anchor).ok_or_else(|| missing(anchor))?;

        let moved = self.sections.remove(from);
        let to = self.position(anchor).ok_or_else(|| missing(anchor))?;
        self.sections.insert(to, moved);
        Ok(())
    }
}

const fn missing(section: Section) -> FlowError {
    match section {
        Section::Hero => FlowError::MissingElement("hero section"),
        Section::ComingSoon => FlowError::MissingElement("coming soon section"),
        Section::CoreFeatures => FlowError::MissingElement("core features section"),
        Section::Features => FlowError::MissingElement("features section"),
        Section::Technology => FlowError::MissingElement("technology section"),
        Section::Modules => FlowError::MissingElement("modules section"),
    }
}

/// Applies the session flag to the page. The reordered flag keeps the
/// logged-in move from running twice within one logged-in session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutReconciler {
    reordered: bool,
}

impl LayoutReconciler {
    #[must_use]
    pub const fn is_reordered(&self) -> bool {
        self.reordered
    }

    pub fn reconcile(&mut self, layout: &mut PageLayout, session: &SessionState) {
        if session.is_logged_in {
            layout.nav_buttons_visible = false;
            layout.user_menu_visible = true;
            layout.user_name.clone_from(&session.user_name);
            layout.hero_visible = false;
            self.core_features_to_top(layout);
        } else {
            layout.nav_buttons_visible = true;
            layout.user_menu_visible = false;
            layout.user_name = None;
            layout.hero_visible = true;
            self.core_features_to_original(layout);
        }
    }

    fn core_features_to_top(&mut self, layout: &mut PageLayout) {
        if self.reordered {
            debug!("sections already reordered, skipping");
            return;
        }

        let (Some(core), Some(hero)) = (
            layout.position(Section::CoreFeatures),
            layout.position(Section::Hero),
        ) else {
            let err = if layout.position(Section::CoreFeatures).is_none() {
                missing(Section::CoreFeatures)
            } else {
                missing(Section::Hero)
            };
            error!("{err}");
            return;
        };

        if core < hero {
            debug!("core features already before hero");
            self.reordered = true;
            return;
        }

        debug!("moving core features before hero");
        match layout.move_before(Section::CoreFeatures, Section::Hero) {
            Ok(()) => self.reordered = true,
            Err(err) => error!("{err}"),
        }
    }

    fn core_features_to_original(&mut self, layout: &mut PageLayout) {
        self.reordered = false;

        debug!("moving core features back before features");
        if let Err(err) = layout.move_before(Section::CoreFeatures, Section::Features) {
            error!("required sections not found for moving back: {err}");
        }
    }
}
