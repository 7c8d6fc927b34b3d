//! Interaction layer for a single-page portfolio: section navigation, the
//! mobile aside drawer, and the project preview modal, driven by host events
//! against an injectable [`Document`].

use crossbeam_channel::Receiver;
use shared::{
    domain::{ButtonIndex, LinkIndex, SectionId, SectionIndex},
    protocol::{Command, UiEvent},
};
use tracing::{debug, info, warn};

pub mod config;
pub mod document;
pub mod error;
pub mod navigation;
pub mod orchestration;
pub mod preview;
pub mod stacking;
pub mod typing;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{load_settings, load_settings_from, SiteSettings};
pub use document::{href_fragment, parse_int, Document, DocumentSnapshot, PageLayout};
pub use error::{BootError, LayoutError, TypingConfigError};
pub use navigation::NavigationController;
pub use preview::{PreviewBindings, PreviewController};
pub use typing::{TypingConfig, TypingWidget, TYPING_SELECTOR};

/// Page state plus the listeners wired onto it.
pub struct Site {
    doc: Document,
    settings: SiteSettings,
    /// `None` when the page has no card grid; preview events are then ignored.
    preview: Option<PreviewBindings>,
}

impl Site {
    pub fn new(
        layout: &PageLayout,
        settings: SiteSettings,
        viewport_width: u32,
    ) -> Result<Self, LayoutError> {
        let mut doc = Document::from_layout(layout, viewport_width)?;
        let preview = doc.grid.is_some().then(|| {
            let mut bindings = PreviewBindings::default();
            let mut controller = PreviewController::new(&mut doc, &mut bindings, &settings);
            controller.register_grid_handlers();
            controller.register_reveal_observer();
            controller.register_card_keyboard_open();
            bindings
        });
        info!(
            sections = doc.sections.len(),
            links = doc.nav_links.len(),
            preview = preview.is_some(),
            "site initialised"
        );
        Ok(Self {
            doc,
            settings,
            preview,
        })
    }

    /// Validates the typing configuration, mounts the widget, then builds the site.
    pub fn boot(
        layout: &PageLayout,
        settings: SiteSettings,
        viewport_width: u32,
        widget: &mut dyn TypingWidget,
    ) -> Result<Self, BootError> {
        settings.typing.validate()?;
        let site = Self::new(layout, settings, viewport_width)?;
        widget.mount(TYPING_SELECTOR, &site.settings.typing);
        Ok(site)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn preview_bindings(&self) -> Option<&PreviewBindings> {
        self.preview.as_ref()
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.doc.snapshot()
    }

    pub fn navigation(&mut self) -> NavigationController<'_> {
        NavigationController::new(&mut self.doc, &self.settings)
    }

    pub fn preview(&mut self) -> Option<PreviewController<'_>> {
        let bindings = self.preview.as_mut()?;
        Some(PreviewController::new(&mut self.doc, bindings, &self.settings))
    }

    /// Routes one host event and applies the resulting command, if any.
    pub fn handle_event(&mut self, event: UiEvent) -> Option<Command> {
        let command = self.route(&event)?;
        self.apply(command.clone());
        Some(command)
    }

    /// Translates a host event into at most one command.
    pub fn route(&mut self, event: &UiEvent) -> Option<Command> {
        match event {
            UiEvent::NavLinkClicked { link } => self.route_nav_link(*link),
            UiEvent::ButtonContainerClicked { button } => self.route_button(*button),
            UiEvent::TogglerClicked => Some(Command::ToggleAside),
            UiEvent::GridClicked { target } => self.preview()?.route_grid_click(*target),
            UiEvent::ModalClicked { target } => self.preview()?.route_modal_click(*target),
            UiEvent::KeyDown { key } => self.preview()?.route_key_down(key),
            UiEvent::FocusChanged { target } => Some(Command::Focus { target: *target }),
            UiEvent::Intersection { card, ratio } => {
                self.preview.as_ref()?;
                Some(Command::RevealCard {
                    card: *card,
                    ratio: *ratio,
                })
            }
            UiEvent::ViewportResized { width } => Some(Command::ResizeViewport { width: *width }),
        }
    }

    /// Single command-processing entry point.
    pub fn apply(&mut self, command: Command) {
        debug!(command = command.name(), "applying command");
        match command {
            Command::SelectSection { target, source } => self
                .navigation()
                .select_section(target.as_ref().map(SectionId::as_str), source),
            Command::SelectSectionByTarget { target, back } => self
                .navigation()
                .select_section_by_target_only(target.as_ref().map(SectionId::as_str), back),
            Command::ToggleAside => self.navigation().toggle_aside_menu(),
            Command::OpenPreview { card } => {
                if let Some(mut preview) = self.preview() {
                    preview.open(card);
                }
            }
            Command::ClosePreview => {
                if let Some(mut preview) = self.preview() {
                    preview.close();
                }
            }
            Command::RevealCard { card, ratio } => {
                if let Some(mut preview) = self.preview() {
                    preview.reveal(card, ratio);
                }
            }
            Command::Focus { target } => self.doc.focus = target,
            Command::ResizeViewport { width } => self.doc.viewport_width = width,
        }
    }

    /// Handles every queued event in delivery order; returns how many were handled.
    pub fn drain(&mut self, rx: &Receiver<UiEvent>) -> usize {
        let mut handled = 0;
        for event in rx.try_iter() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    fn route_nav_link(&self, link: LinkIndex) -> Option<Command> {
        let Some(nav_link) = self.doc.nav_links.get(link.0) else {
            warn!(link = link.0, "click on unknown nav link");
            return None;
        };
        Some(Command::SelectSection {
            target: nav_link.target().map(SectionId::from),
            source: link,
        })
    }

    fn route_button(&self, button: Option<ButtonIndex>) -> Option<Command> {
        let button = self.doc.buttons.get(button?.0)?;
        if !button.hire_me {
            return None;
        }
        let target = button
            .href
            .as_deref()
            .and_then(href_fragment)
            .map(SectionId::from);
        let back = button
            .section_index
            .as_deref()
            .and_then(parse_int)
            .and_then(|index| usize::try_from(index).ok())
            .map(SectionIndex);
        Some(Command::SelectSectionByTarget { target, back })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
