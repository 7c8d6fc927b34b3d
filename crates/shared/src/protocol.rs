use serde::{Deserialize, Serialize};

use crate::domain::{ButtonIndex, CardIndex, FocusTarget, LinkIndex, SectionId, SectionIndex};

/// Raw gestures delivered by the host page, in delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum UiEvent {
    NavLinkClicked {
        link: LinkIndex,
    },
    /// Click anywhere inside the hire-me button container. `button` is the
    /// clicked descendant, `None` when the container itself was hit.
    ButtonContainerClicked {
        button: Option<ButtonIndex>,
    },
    TogglerClicked,
    GridClicked {
        target: GridClickTarget,
    },
    ModalClicked {
        target: ModalClickTarget,
    },
    /// Window-level key-down; routed with the currently focused element.
    KeyDown {
        key: String,
    },
    FocusChanged {
        target: Option<FocusTarget>,
    },
    Intersection {
        card: CardIndex,
        ratio: f64,
    },
    ViewportResized {
        width: u32,
    },
}

/// Ancestry of a click target inside the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridClickTarget {
    /// Closest enclosing card, if any.
    #[serde(default)]
    pub card: Option<CardIndex>,
    /// Target sits inside a dedicated preview trigger.
    #[serde(default)]
    pub in_preview_button: bool,
    /// Target sits inside an anchor element.
    #[serde(default)]
    pub in_anchor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalClickTarget {
    Backdrop,
    /// Any element flagged with `data-close`.
    DataClose,
    CloseControl,
    Content,
}

/// Named state transitions processed by the site dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Command {
    SelectSection {
        target: Option<SectionId>,
        source: LinkIndex,
    },
    SelectSectionByTarget {
        target: Option<SectionId>,
        back: Option<SectionIndex>,
    },
    ToggleAside,
    OpenPreview {
        card: CardIndex,
    },
    ClosePreview,
    RevealCard {
        card: CardIndex,
        ratio: f64,
    },
    Focus {
        target: Option<FocusTarget>,
    },
    ResizeViewport {
        width: u32,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectSection { .. } => "select_section",
            Command::SelectSectionByTarget { .. } => "select_section_by_target",
            Command::ToggleAside => "toggle_aside",
            Command::OpenPreview { .. } => "open_preview",
            Command::ClosePreview => "close_preview",
            Command::RevealCard { .. } => "reveal_card",
            Command::Focus { .. } => "focus",
            Command::ResizeViewport { .. } => "resize_viewport",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_event_uses_tagged_wire_shape() {
        let raw = r#"{"type":"nav_link_clicked","payload":{"link":2}}"#;
        let event: UiEvent = serde_json::from_str(raw).expect("decode");
        assert_eq!(event, UiEvent::NavLinkClicked { link: LinkIndex(2) });
    }

    #[test]
    fn unit_variant_decodes_without_payload() {
        let event: UiEvent = serde_json::from_str(r#"{"type":"toggler_clicked"}"#).expect("decode");
        assert_eq!(event, UiEvent::TogglerClicked);
    }

    #[test]
    fn grid_target_fields_default_to_outside() {
        let raw = r#"{"type":"grid_clicked","payload":{"target":{"card":1}}}"#;
        let event: UiEvent = serde_json::from_str(raw).expect("decode");
        assert_eq!(
            event,
            UiEvent::GridClicked {
                target: GridClickTarget {
                    card: Some(CardIndex(1)),
                    in_preview_button: false,
                    in_anchor: false,
                }
            }
        );
    }

    #[test]
    fn focus_target_card_round_trips_through_json() {
        let cmd = Command::Focus {
            target: Some(FocusTarget::Card(CardIndex(3))),
        };
        let json = serde_json::to_string(&cmd).expect("encode");
        assert_eq!(serde_json::from_str::<Command>(&json).expect("decode"), cmd);
        assert_eq!(cmd.name(), "focus");
    }
}
