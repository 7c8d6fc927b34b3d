use super::*;
use crate::test_support::{portfolio, WIDE};

fn setup() -> (Document, PreviewBindings, SiteSettings) {
    let settings = SiteSettings::default();
    let mut doc = Document::from_layout(&portfolio(), WIDE).expect("layout");
    let mut bindings = PreviewBindings::default();
    let mut controller = PreviewController::new(&mut doc, &mut bindings, &settings);
    controller.register_grid_handlers();
    controller.register_reveal_observer();
    controller.register_card_keyboard_open();
    (doc, bindings, settings)
}

fn modal(doc: &Document) -> &crate::document::PreviewModal {
    doc.modal().expect("modal")
}

#[test]
fn open_populates_modal_and_locks_scroll() {
    let (mut doc, mut bindings, settings) = setup();
    PreviewController::new(&mut doc, &mut bindings, &settings).open(CardIndex(0));

    let m = modal(&doc);
    assert!(m.is_visible());
    assert!(!m.aria_hidden);
    assert_eq!(m.image_src.as_deref(), Some("/img/x.png"));
    assert_eq!(m.image_alt.as_deref(), Some("Project X screenshot"));
    assert_eq!(m.title.as_deref(), Some("Project X"));
    assert_eq!(m.live_href.as_deref(), Some("https://x.example"));
    assert_eq!(m.live_text.as_deref(), Some(LIVE_LINK_TEXT));
    assert!(doc.body.scroll_locked);
    assert_eq!(doc.focus, Some(FocusTarget::PreviewClose));
    assert_eq!(doc.aside_z_index(), Some(crate::stacking::ASIDE_LOWERED_Z_INDEX));
}

#[test]
fn missing_or_empty_heading_uses_fallback_title() {
    let (mut doc, mut bindings, settings) = setup();
    PreviewController::new(&mut doc, &mut bindings, &settings).open(CardIndex(1));
    assert_eq!(modal(&doc).title.as_deref(), Some("Project Preview"));

    PreviewController::new(&mut doc, &mut bindings, &settings).open(CardIndex(2));
    assert_eq!(modal(&doc).title.as_deref(), Some("Project Preview"));
    assert_eq!(
        modal(&doc).image_alt.as_deref(),
        Some("Project Preview screenshot")
    );
}

#[test]
fn close_clears_content_and_restores_page() {
    let (mut doc, mut bindings, settings) = setup();
    let mut controller = PreviewController::new(&mut doc, &mut bindings, &settings);
    controller.open(CardIndex(0));
    controller.close();

    let m = modal(&doc);
    assert!(m.aria_hidden);
    assert_eq!(m.image_src, None);
    assert_eq!(m.title, None);
    assert_eq!(m.live_href, None);
    assert!(!doc.body.scroll_locked);
    assert_eq!(doc.aside_z_index(), None);
    assert_eq!(doc.focus, None);
}

#[test]
fn close_twice_equals_close_once() {
    let (mut doc, mut bindings, settings) = setup();
    let mut controller = PreviewController::new(&mut doc, &mut bindings, &settings);
    controller.open(CardIndex(0));
    controller.close();
    let once = doc.clone();

    PreviewController::new(&mut doc, &mut bindings, &settings).close();
    assert_eq!(doc, once);
}

#[test]
fn open_without_aside_or_close_control_skips_those_steps() {
    let settings = SiteSettings::default();
    let mut layout = portfolio();
    layout.aside = false;
    if let Some(grid) = layout.grid.as_mut() {
        grid.modal.close_control = false;
    }
    let mut doc = Document::from_layout(&layout, WIDE).expect("layout");
    let mut bindings = PreviewBindings::default();
    PreviewController::new(&mut doc, &mut bindings, &settings).open(CardIndex(0));

    assert!(modal(&doc).is_visible());
    assert_eq!(doc.aside_z_index(), None);
    assert_eq!(doc.focus, None);
}

#[test]
fn unknown_card_is_ignored() {
    let (mut doc, mut bindings, settings) = setup();
    let before = doc.clone();
    PreviewController::new(&mut doc, &mut bindings, &settings).open(CardIndex(9));
    assert_eq!(doc, before);
}

#[test]
fn grid_click_routing_respects_anchors_and_preview_buttons() {
    let (mut doc, mut bindings, settings) = setup();
    let controller = PreviewController::new(&mut doc, &mut bindings, &settings);

    let on_card = GridClickTarget {
        card: Some(CardIndex(1)),
        ..GridClickTarget::default()
    };
    assert_eq!(
        controller.route_grid_click(on_card),
        Some(Command::OpenPreview { card: CardIndex(1) })
    );

    let on_anchor = GridClickTarget {
        in_anchor: true,
        ..on_card
    };
    assert_eq!(controller.route_grid_click(on_anchor), None);

    let on_preview_link = GridClickTarget {
        in_preview_button: true,
        ..on_anchor
    };
    assert_eq!(
        controller.route_grid_click(on_preview_link),
        Some(Command::OpenPreview { card: CardIndex(1) })
    );

    assert_eq!(controller.route_grid_click(GridClickTarget::default()), None);
}

#[test]
fn modal_click_closes_only_on_close_affordances() {
    let (mut doc, mut bindings, settings) = setup();
    let controller = PreviewController::new(&mut doc, &mut bindings, &settings);
    for target in [
        ModalClickTarget::Backdrop,
        ModalClickTarget::DataClose,
        ModalClickTarget::CloseControl,
    ] {
        assert_eq!(controller.route_modal_click(target), Some(Command::ClosePreview));
    }
    assert_eq!(controller.route_modal_click(ModalClickTarget::Content), None);
}

#[test]
fn escape_closes_only_visible_modal() {
    let (mut doc, mut bindings, settings) = setup();
    assert_eq!(
        PreviewController::new(&mut doc, &mut bindings, &settings).route_key_down(ESCAPE_KEY),
        None
    );

    PreviewController::new(&mut doc, &mut bindings, &settings).open(CardIndex(0));
    assert_eq!(
        PreviewController::new(&mut doc, &mut bindings, &settings).route_key_down(ESCAPE_KEY),
        Some(Command::ClosePreview)
    );
}

#[test]
fn enter_opens_focused_card() {
    let (mut doc, mut bindings, settings) = setup();
    assert_eq!(
        PreviewController::new(&mut doc, &mut bindings, &settings).route_key_down(ENTER_KEY),
        None
    );

    doc.focus = Some(FocusTarget::Card(CardIndex(2)));
    let controller = PreviewController::new(&mut doc, &mut bindings, &settings);
    assert_eq!(
        controller.route_key_down(ENTER_KEY),
        Some(Command::OpenPreview { card: CardIndex(2) })
    );
    assert_eq!(controller.route_key_down("a"), None);
}

#[test]
fn unregistered_handlers_route_nothing() {
    let settings = SiteSettings::default();
    let mut doc = Document::from_layout(&portfolio(), WIDE).expect("layout");
    doc.focus = Some(FocusTarget::Card(CardIndex(0)));
    let mut bindings = PreviewBindings::default();
    let controller = PreviewController::new(&mut doc, &mut bindings, &settings);
    assert_eq!(
        controller.route_grid_click(GridClickTarget {
            card: Some(CardIndex(0)),
            ..GridClickTarget::default()
        }),
        None
    );
    assert_eq!(controller.route_key_down(ENTER_KEY), None);
}

#[test]
fn reveal_is_one_shot_at_threshold() {
    let (mut doc, mut bindings, settings) = setup();
    assert_eq!(bindings.reveal.as_ref().map(RevealObserver::observed_count), Some(3));

    let mut controller = PreviewController::new(&mut doc, &mut bindings, &settings);
    controller.reveal(CardIndex(0), 0.10);
    controller.reveal(CardIndex(0), 0.15);
    controller.reveal(CardIndex(0), 0.90);

    let grid = doc.grid.as_ref().expect("grid");
    assert!(grid.cards[0].entered_view);
    assert!(!grid.cards[1].entered_view);

    let observer = bindings.reveal.as_ref().expect("observer");
    assert!(!observer.is_observing(CardIndex(0)));
    assert!(observer.is_observing(CardIndex(1)));
    assert_eq!(observer.observed_count(), 2);
}

#[test]
fn revealed_card_stays_revealed() {
    let (mut doc, mut bindings, settings) = setup();
    let mut controller = PreviewController::new(&mut doc, &mut bindings, &settings);
    controller.reveal(CardIndex(1), 0.5);
    controller.reveal(CardIndex(1), 0.0);
    assert!(doc.grid.as_ref().expect("grid").cards[1].entered_view);
}
