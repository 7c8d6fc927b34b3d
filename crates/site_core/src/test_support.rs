//! Layout fixtures shared by the unit tests.

use crate::document::{
    ButtonSpec, CardSpec, GridSpec, ModalSpec, NavLinkSpec, PageLayout, SectionSpec,
};

pub const NARROW: u32 = 800;
pub const WIDE: u32 = 1440;

/// `home`/`about`/`contact` with `home` and its nav link active.
pub fn three_sections() -> PageLayout {
    PageLayout {
        nav_links: ["#home", "#about", "#contact"]
            .into_iter()
            .enumerate()
            .map(|(index, href)| NavLinkSpec {
                href: href.into(),
                active: index == 0,
            })
            .collect(),
        sections: [("home", true), ("about", false), ("contact", false)]
            .into_iter()
            .map(|(id, active)| SectionSpec {
                id: id.into(),
                active,
            })
            .collect(),
        buttons: vec![
            ButtonSpec {
                href: Some("#contact".into()),
                section_index: Some("1".into()),
                hire_me: true,
            },
            ButtonSpec {
                href: Some("#about".into()),
                section_index: None,
                hire_me: false,
            },
            ButtonSpec {
                href: Some("#contact".into()),
                section_index: Some("soon".into()),
                hire_me: true,
            },
        ],
        aside: true,
        grid: None,
    }
}

/// [`three_sections`] plus a card grid: card 0 titled, card 1 without a
/// heading, card 2 with an empty heading and a preview button.
pub fn portfolio() -> PageLayout {
    let mut layout = three_sections();
    layout.grid = Some(GridSpec {
        cards: vec![
            CardSpec {
                live: "https://x.example".into(),
                img: "/img/x.png".into(),
                heading: Some("Project X".into()),
                preview_button: false,
            },
            CardSpec {
                live: "https://y.example".into(),
                img: "/img/y.png".into(),
                heading: None,
                preview_button: false,
            },
            CardSpec {
                live: "https://z.example".into(),
                img: "/img/z.png".into(),
                heading: Some(String::new()),
                preview_button: true,
            },
        ],
        modal: ModalSpec::default(),
    });
    layout
}
