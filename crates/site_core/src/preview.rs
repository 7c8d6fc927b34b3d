//! Project preview modal, grid click delegation and reveal-on-scroll.

use std::collections::BTreeSet;

use shared::{
    domain::{CardIndex, FocusTarget, StackingOwner},
    protocol::{Command, GridClickTarget, ModalClickTarget},
};
use tracing::{debug, info, warn};

use crate::{config::SiteSettings, document::Document};

pub const ESCAPE_KEY: &str = "Escape";
pub const ENTER_KEY: &str = "Enter";
pub const LIVE_LINK_TEXT: &str = "Open Live";

/// One-shot visibility watches, one per card.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealObserver {
    threshold: f64,
    watched: BTreeSet<CardIndex>,
}

impl RevealObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            watched: BTreeSet::new(),
        }
    }

    pub fn observe(&mut self, card: CardIndex) {
        self.watched.insert(card);
    }

    pub fn unobserve(&mut self, card: CardIndex) {
        self.watched.remove(&card);
    }

    pub fn is_observing(&self, card: CardIndex) -> bool {
        self.watched.contains(&card)
    }

    pub fn observed_count(&self) -> usize {
        self.watched.len()
    }

    /// True when this report crosses the threshold for a watched card.
    pub fn crosses(&self, card: CardIndex, ratio: f64) -> bool {
        self.is_observing(card) && ratio >= self.threshold
    }
}

/// Which listeners the preview controller has attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewBindings {
    pub grid_handlers: bool,
    pub card_keyboard_open: bool,
    pub reveal: Option<RevealObserver>,
}

pub struct PreviewController<'a> {
    doc: &'a mut Document,
    bindings: &'a mut PreviewBindings,
    settings: &'a SiteSettings,
}

impl<'a> PreviewController<'a> {
    pub fn new(
        doc: &'a mut Document,
        bindings: &'a mut PreviewBindings,
        settings: &'a SiteSettings,
    ) -> Self {
        Self {
            doc,
            bindings,
            settings,
        }
    }

    pub fn register_grid_handlers(&mut self) {
        self.bindings.grid_handlers = true;
    }

    pub fn register_reveal_observer(&mut self) {
        let mut observer = RevealObserver::new(self.settings.reveal_threshold);
        let cards = self.doc.grid.as_ref().map_or(0, |g| g.cards.len());
        for index in 0..cards {
            observer.observe(CardIndex(index));
        }
        debug!(cards, threshold = self.settings.reveal_threshold, "reveal observer registered");
        self.bindings.reveal = Some(observer);
    }

    pub fn register_card_keyboard_open(&mut self) {
        self.bindings.card_keyboard_open = true;
    }

    pub fn open(&mut self, card: CardIndex) {
        let Some(grid) = self.doc.grid.as_mut() else {
            return;
        };
        let Some(source) = grid.cards.get(card.0) else {
            warn!(card = card.0, "preview requested for unknown card");
            return;
        };

        let title = source
            .heading
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(&self.settings.fallback_title)
            .to_string();
        let image = source.image_url.clone();
        let live = source.live_url.clone();

        let modal = &mut grid.modal;
        modal.image_alt = Some(format!("{title} screenshot"));
        modal.image_src = Some(image);
        modal.title = Some(title);
        modal.live_href = Some(live);
        modal.live_text = Some(LIVE_LINK_TEXT.to_string());
        modal.aria_hidden = false;
        let focus_close = modal.has_close_control;

        self.doc.body.scroll_locked = true;
        self.doc.stacking.raise(StackingOwner::PreviewModal);
        if focus_close {
            self.doc.focus = Some(FocusTarget::PreviewClose);
        }
        info!(card = card.0, title = ?self.doc.modal().and_then(|m| m.title.as_deref()), "preview opened");
    }

    /// Idempotent; repeated calls re-apply the same clears.
    pub fn close(&mut self) {
        let Some(grid) = self.doc.grid.as_mut() else {
            return;
        };
        let modal = &mut grid.modal;
        modal.aria_hidden = true;
        modal.image_src = None;
        modal.image_alt = None;
        modal.title = None;
        modal.live_href = None;
        modal.live_text = None;

        self.doc.body.scroll_locked = false;
        self.doc.stacking.release(StackingOwner::PreviewModal);
        if self.doc.focus == Some(FocusTarget::PreviewClose) {
            self.doc.focus = None;
        }
        debug!("preview closed");
    }

    /// Flips `entered_view` once and retires the watch.
    pub fn reveal(&mut self, card: CardIndex, ratio: f64) {
        let Some(observer) = self.bindings.reveal.as_mut() else {
            return;
        };
        if !observer.crosses(card, ratio) {
            return;
        }
        observer.unobserve(card);
        if let Some(entry) = self.doc.grid.as_mut().and_then(|g| g.cards.get_mut(card.0)) {
            entry.entered_view = true;
            debug!(card = card.0, ratio, "card entered view");
        }
    }

    pub fn route_grid_click(&self, target: GridClickTarget) -> Option<Command> {
        if !self.bindings.grid_handlers {
            return None;
        }
        let card = target.card?;
        if target.in_preview_button || !target.in_anchor {
            Some(Command::OpenPreview { card })
        } else {
            debug!(card = card.0, "anchor click left to native navigation");
            None
        }
    }

    pub fn route_modal_click(&self, target: ModalClickTarget) -> Option<Command> {
        if !self.bindings.grid_handlers {
            return None;
        }
        match target {
            ModalClickTarget::Backdrop
            | ModalClickTarget::DataClose
            | ModalClickTarget::CloseControl => Some(Command::ClosePreview),
            ModalClickTarget::Content => None,
        }
    }

    pub fn route_key_down(&self, key: &str) -> Option<Command> {
        let visible = self.doc.modal().is_some_and(|m| m.is_visible());
        if key == ESCAPE_KEY && self.bindings.grid_handlers {
            if visible {
                return Some(Command::ClosePreview);
            }
            debug!("escape ignored; preview already hidden");
            return None;
        }
        if key == ENTER_KEY && self.bindings.card_keyboard_open {
            if let Some(FocusTarget::Card(card)) = self.doc.focus {
                return Some(Command::OpenPreview { card });
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/preview_tests.rs"]
mod tests;
