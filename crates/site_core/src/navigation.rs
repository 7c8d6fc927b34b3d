//! Section navigation and the mobile aside drawer.

use shared::domain::{AsideClosePolicy, LinkIndex, SectionIndex};
use tracing::{debug, warn};

use crate::{config::SiteSettings, document::Document};

pub struct NavigationController<'a> {
    doc: &'a mut Document,
    settings: &'a SiteSettings,
}

impl<'a> NavigationController<'a> {
    pub fn new(doc: &'a mut Document, settings: &'a SiteSettings) -> Self {
        Self { doc, settings }
    }

    /// Nav-link path: highlight follows the link's position, the back-section
    /// marker follows the same position.
    pub fn select_section(&mut self, target: Option<&str>, source: LinkIndex) {
        for (index, link) in self.doc.nav_links.iter_mut().enumerate() {
            link.active = index == source.0;
        }
        self.show_section(target);
        self.mark_back_section(Some(SectionIndex(source.0)));

        if self.doc.viewport_width < self.settings.breakpoint_px {
            debug!(
                width = self.doc.viewport_width,
                breakpoint = self.settings.breakpoint_px,
                "narrow viewport; closing aside after navigation"
            );
            self.close_aside_menu();
        }
    }

    /// Hire-me path: back-section comes from the caller, highlight is
    /// recomputed by matching each link's href fragment against `target`.
    /// With no target, links whose href has no fragment match.
    pub fn select_section_by_target_only(
        &mut self,
        target: Option<&str>,
        back: Option<SectionIndex>,
    ) {
        self.show_section(target);
        self.mark_back_section(back);
        for link in &mut self.doc.nav_links {
            link.active = link.target() == target;
        }
    }

    /// Flips the drawer, the toggler and every section's open flag.
    pub fn toggle_aside_menu(&mut self) {
        if let Some(aside) = self.doc.aside.as_mut() {
            aside.open = !aside.open;
        }
        self.doc.toggler.switched = !self.doc.toggler.switched;
        for section in &mut self.doc.sections {
            section.open = !section.open;
        }
        debug!(
            aside_open = ?self.doc.aside.map(|a| a.open),
            "aside toggled"
        );
    }

    pub fn close_aside_menu(&mut self) {
        match self.settings.aside_close_policy {
            AsideClosePolicy::Toggle => self.toggle_aside_menu(),
            AsideClosePolicy::Close => {
                if self.doc.aside.is_some_and(|a| a.open) {
                    self.toggle_aside_menu();
                } else {
                    debug!("aside already closed; nothing to close");
                }
            }
        }
    }

    /// Activates the section named by `target`. An unresolvable target
    /// leaves the current section active.
    fn show_section(&mut self, target: Option<&str>) -> bool {
        let Some(target) = target else {
            warn!("navigation target has no fragment; section unchanged");
            return false;
        };
        if self.doc.section_position(target).is_none() {
            warn!(target, "navigation target matches no section; section unchanged");
            return false;
        }
        for section in &mut self.doc.sections {
            section.active = section.id.as_str() == target;
        }
        true
    }

    fn mark_back_section(&mut self, back: Option<SectionIndex>) {
        if back.is_none() {
            warn!("back-section index missing or not a number; clearing marker");
        }
        for (index, section) in self.doc.sections.iter_mut().enumerate() {
            section.back_section = back.is_some_and(|b| b.0 == index);
        }
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
