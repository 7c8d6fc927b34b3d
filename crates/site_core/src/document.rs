//! Injectable page state: the markup contract a host page satisfies and the
//! mutable flags both controllers operate on.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shared::domain::{CardIndex, FocusTarget, SectionId, SectionIndex};

use crate::{error::LayoutError, stacking::StackingArbiter};

/// Declarative description of the host markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default)]
    pub nav_links: Vec<NavLinkSpec>,
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
    #[serde(default = "default_true")]
    pub aside: bool,
    #[serde(default)]
    pub grid: Option<GridSpec>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLinkSpec {
    pub href: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonSpec {
    #[serde(default)]
    pub href: Option<String>,
    /// Raw `data-section-index` attribute.
    #[serde(default)]
    pub section_index: Option<String>,
    /// Carries the `hire-me` marker class.
    #[serde(default)]
    pub hire_me: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSpec {
    #[serde(default)]
    pub cards: Vec<CardSpec>,
    #[serde(default)]
    pub modal: ModalSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSpec {
    pub live: String,
    pub img: String,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub preview_button: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalSpec {
    #[serde(default = "default_true")]
    pub close_control: bool,
}

impl Default for ModalSpec {
    fn default() -> Self {
        Self {
            close_control: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub active: bool,
    pub back_section: bool,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub active: bool,
}

impl NavLink {
    pub fn target(&self) -> Option<&str> {
        href_fragment(&self.href)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HireMeButton {
    pub href: Option<String>,
    pub section_index: Option<String>,
    pub hire_me: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AsideMenu {
    pub open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toggler {
    pub switched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Body {
    pub scroll_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCard {
    pub live_url: String,
    pub image_url: String,
    pub heading: Option<String>,
    pub has_preview_button: bool,
    pub entered_view: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewModal {
    /// Mirrors `aria-hidden`; the only open/closed flag.
    pub aria_hidden: bool,
    pub image_src: Option<String>,
    pub image_alt: Option<String>,
    pub title: Option<String>,
    pub live_href: Option<String>,
    pub live_text: Option<String>,
    pub has_close_control: bool,
}

impl PreviewModal {
    fn hidden(has_close_control: bool) -> Self {
        Self {
            aria_hidden: true,
            image_src: None,
            image_alt: None,
            title: None,
            live_href: None,
            live_text: None,
            has_close_control,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.aria_hidden
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewGrid {
    pub cards: Vec<PreviewCard>,
    pub modal: PreviewModal,
}

impl PreviewGrid {
    pub fn card(&self, card: CardIndex) -> Option<&PreviewCard> {
        self.cards.get(card.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub sections: Vec<Section>,
    pub nav_links: Vec<NavLink>,
    pub buttons: Vec<HireMeButton>,
    pub aside: Option<AsideMenu>,
    pub toggler: Toggler,
    pub grid: Option<PreviewGrid>,
    pub body: Body,
    pub focus: Option<FocusTarget>,
    pub viewport_width: u32,
    pub stacking: StackingArbiter,
}

impl Document {
    pub fn from_layout(layout: &PageLayout, viewport_width: u32) -> Result<Self, LayoutError> {
        let mut seen = HashSet::new();
        for (index, section) in layout.sections.iter().enumerate() {
            if section.id.is_empty() {
                return Err(LayoutError::EmptySectionId { index });
            }
            if !seen.insert(section.id.as_str()) {
                return Err(LayoutError::DuplicateSectionId {
                    id: section.id.clone(),
                });
            }
        }

        let active: Vec<String> = layout
            .sections
            .iter()
            .filter(|s| s.active)
            .map(|s| s.id.clone())
            .collect();
        match active.len() {
            0 => return Err(LayoutError::NoActiveSection),
            1 => {}
            _ => return Err(LayoutError::MultipleActiveSections { ids: active }),
        }

        let grid = layout.grid.as_ref().map(|grid| PreviewGrid {
            cards: grid
                .cards
                .iter()
                .map(|card| PreviewCard {
                    live_url: card.live.clone(),
                    image_url: card.img.clone(),
                    heading: card.heading.clone(),
                    has_preview_button: card.preview_button,
                    entered_view: false,
                })
                .collect(),
            modal: PreviewModal::hidden(grid.modal.close_control),
        });

        Ok(Self {
            sections: layout
                .sections
                .iter()
                .map(|s| Section {
                    id: SectionId::new(s.id.clone()),
                    active: s.active,
                    back_section: false,
                    open: false,
                })
                .collect(),
            nav_links: layout
                .nav_links
                .iter()
                .map(|l| NavLink {
                    href: l.href.clone(),
                    active: l.active,
                })
                .collect(),
            buttons: layout
                .buttons
                .iter()
                .map(|b| HireMeButton {
                    href: b.href.clone(),
                    section_index: b.section_index.clone(),
                    hire_me: b.hire_me,
                })
                .collect(),
            aside: layout.aside.then(AsideMenu::default),
            toggler: Toggler::default(),
            grid,
            body: Body::default(),
            focus: None,
            viewport_width,
            stacking: StackingArbiter::new(layout.aside),
        })
    }

    pub fn active_section(&self) -> Option<&SectionId> {
        self.sections.iter().find(|s| s.active).map(|s| &s.id)
    }

    pub fn back_section(&self) -> Option<SectionIndex> {
        self.sections
            .iter()
            .position(|s| s.back_section)
            .map(SectionIndex)
    }

    pub fn section_position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id.as_str() == id)
    }

    pub fn modal(&self) -> Option<&PreviewModal> {
        self.grid.as_ref().map(|g| &g.modal)
    }

    pub fn aside_z_index(&self) -> Option<i32> {
        self.stacking.aside_z_index()
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            active_section: self.active_section().map(|id| id.to_string()),
            back_section: self.back_section().map(|i| i.0),
            active_links: self
                .nav_links
                .iter()
                .enumerate()
                .filter(|(_, l)| l.active)
                .map(|(i, _)| i)
                .collect(),
            aside_open: self.aside.map(|a| a.open),
            aside_z_index: self.aside_z_index(),
            toggler_switched: self.toggler.switched,
            open_sections: self
                .sections
                .iter()
                .filter(|s| s.open)
                .map(|s| s.id.to_string())
                .collect(),
            body_scroll_locked: self.body.scroll_locked,
            focus: self.focus,
            modal: self.modal().map(|m| ModalSnapshot {
                visible: m.is_visible(),
                image_src: m.image_src.clone(),
                image_alt: m.image_alt.clone(),
                title: m.title.clone(),
                live_href: m.live_href.clone(),
                live_text: m.live_text.clone(),
            }),
            revealed_cards: self
                .grid
                .iter()
                .flat_map(|g| g.cards.iter().enumerate())
                .filter(|(_, c)| c.entered_view)
                .map(|(i, _)| i)
                .collect(),
            viewport_width: self.viewport_width,
        }
    }
}

/// Read model of a [`Document`] for tooling output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub active_section: Option<String>,
    pub back_section: Option<usize>,
    pub active_links: Vec<usize>,
    pub aside_open: Option<bool>,
    pub aside_z_index: Option<i32>,
    pub toggler_switched: bool,
    pub open_sections: Vec<String>,
    pub body_scroll_locked: bool,
    pub focus: Option<FocusTarget>,
    pub modal: Option<ModalSnapshot>,
    pub revealed_cards: Vec<usize>,
    pub viewport_width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalSnapshot {
    pub visible: bool,
    pub image_src: Option<String>,
    pub image_alt: Option<String>,
    pub title: Option<String>,
    pub live_href: Option<String>,
    pub live_text: Option<String>,
}

/// Text after the first `#` and before any second one, like `href.split("#")[1]`.
pub fn href_fragment(href: &str) -> Option<&str> {
    href.split('#').nth(1)
}

/// Base-10 `parseInt`: optional leading whitespace and sign, then the
/// longest digit run. `None` stands in for `NaN`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
