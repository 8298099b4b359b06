//! End-to-end behavior of a mounted landing page on an in-memory DOM.

use pagefx::prelude::*;
use pagefx_core::{MemoryDom, PointerEvent, ScrollBehavior};
use pretty_assertions::assert_eq;

struct Landing {
    dom: MemoryDom,
    nav: NodeId,
    nav_links: Vec<NodeId>,
    logo: NodeId,
    scroll_btn: NodeId,
    sections: Vec<NodeId>,
    lazy: NodeId,
    tabs: Vec<NodeId>,
    panels: Vec<NodeId>,
    slides: Vec<NodeId>,
    slider_right: NodeId,
    dots: NodeId,
    modal: NodeId,
    overlay: NodeId,
    open_modal: NodeId,
}

fn landing() -> Landing {
    let dom = MemoryDom::new();
    let body = dom.body();

    let header = dom.append(body, "header.header");
    dom.set_rect(header, Rect::new(0.0, 0.0, 1280.0, 800.0));
    let nav = dom.append(header, "nav.nav");
    dom.set_rect(nav, Rect::new(0.0, 0.0, 1280.0, 90.0));
    let logo = dom.append(nav, "img.nav__logo");
    let links = dom.append(nav, "ul.nav__links");
    let mut nav_links = Vec::new();
    for href in ["#section--1", "#section--2", "#section--3"] {
        let item = dom.append(links, "li.nav__item");
        nav_links.push(dom.append(item, &format!("a.nav__link[href=\"{href}\"]")));
    }
    let open_modal = {
        let item = dom.append(links, "li.nav__item");
        dom.append(item, "a.nav__link.nav__link--btn.btn--show-modal[href=\"#\"]")
    };
    let scroll_btn = dom.append(header, "button.btn--text.btn--scroll-to");

    let mut sections = Vec::new();
    for n in 1..=3 {
        let section = dom.append(body, &format!("section#section--{n}.section"));
        dom.set_rect(
            section,
            Rect::new(0.0, 800.0 + 1000.0 * (n as f64 - 1.0), 1280.0, 1000.0),
        );
        sections.push(section);
    }

    let lazy = dom.append(
        sections[0],
        "img.features__img.lazy-img[src=\"img/digital-lazy.jpg\"][data-src=\"img/digital.jpg\"]",
    );
    dom.set_rect(lazy, Rect::new(100.0, 1100.0, 400.0, 300.0));

    let ops = dom.append(sections[1], ".operations");
    let container = dom.append(ops, ".operations__tab-container");
    let mut tabs = Vec::new();
    let mut panels = Vec::new();
    for n in 1..=3 {
        let active = if n == 1 { ".operations__tab--active" } else { "" };
        tabs.push(dom.append(
            container,
            &format!("button.operations__tab{active}[data-tab=\"{n}\"]"),
        ));
    }
    for n in 1..=3 {
        let active = if n == 1 { ".operations__content--active" } else { "" };
        panels.push(dom.append(
            ops,
            &format!(".operations__content.operations__content--{n}{active}"),
        ));
    }

    let slider = dom.append(sections[2], ".slider");
    let slides = (0..4).map(|_| dom.append(slider, ".slide")).collect();
    dom.append(slider, "button.slider__btn.slider__btn--left");
    let slider_right = dom.append(slider, "button.slider__btn.slider__btn--right");
    let dots = dom.append(slider, ".dots");

    let modal = dom.append(body, ".modal.hidden");
    dom.append(modal, "button.btn--close-modal");
    let overlay = dom.append(body, ".overlay.hidden");

    Landing {
        dom,
        nav,
        nav_links,
        logo,
        scroll_btn,
        sections,
        lazy,
        tabs,
        panels,
        slides,
        slider_right,
        dots,
        modal,
        overlay,
        open_modal,
    }
}

fn mount(l: &Landing) -> Page<MemoryDom> {
    let config = PageConfig {
        strict: true,
        ..PageConfig::default()
    };
    Page::mount(l.dom.clone(), &config).unwrap()
}

fn scroll(l: &Landing, page: &mut Page<MemoryDom>, dy: f64) -> Outcome {
    l.dom.scroll_by(dy);
    page.dispatch(&Event::Scroll(l.dom.viewport()))
}

#[test]
fn every_behavior_mounts_in_order() {
    let l = landing();
    let page = mount(&l);
    assert_eq!(
        page.behavior_names(),
        vec![
            "modal",
            "scroll",
            "tabs",
            "nav_fade",
            "sticky_nav",
            "reveal",
            "lazy_image",
            "slider"
        ]
    );
}

#[test]
fn initial_state_matches_page_load() {
    let l = landing();
    let page = mount(&l);

    assert!(!l.dom.has_class(l.nav, "sticky"));
    for section in &l.sections {
        assert!(l.dom.has_class(*section, "section--hidden"));
    }
    assert_eq!(l.dom.children(l.dots).len(), 4);
    assert_eq!(page.slider().unwrap().slider().current_slide(), 0);
    assert_eq!(
        l.dom.style(l.slides[3], "transform").as_deref(),
        Some("translateX(300%)")
    );
}

#[test]
fn opening_the_modal_from_a_nav_link_prevents_default() {
    let l = landing();
    let mut page = mount(&l);

    let outcome = page.dispatch(&Event::click(l.open_modal));
    assert!(outcome.prevents_default());
    assert!(!l.dom.has_class(l.modal, "hidden"));
    assert!(!l.dom.has_class(l.overlay, "hidden"));
    // The "#" link has no destination.
    assert!(l.dom.scroll_log().is_empty());

    page.dispatch(&Event::key(KeyCode::Escape));
    assert!(l.dom.has_class(l.modal, "hidden"));
}

#[test]
fn hero_button_and_nav_links_scroll_smoothly() {
    let l = landing();
    let mut page = mount(&l);

    page.dispatch(&Event::click(l.scroll_btn));
    page.dispatch(&Event::click(l.nav_links[2]));
    assert_eq!(
        l.dom.scroll_log(),
        vec![
            (l.sections[0], ScrollBehavior::Smooth),
            (l.sections[2], ScrollBehavior::Smooth)
        ]
    );
}

#[test]
fn hovering_a_link_fades_the_rest() {
    let l = landing();
    let mut page = mount(&l);

    page.dispatch(&Event::PointerOver(PointerEvent {
        target: l.nav_links[0],
    }));
    assert_eq!(l.dom.style(l.nav_links[1], "opacity").as_deref(), Some("0.5"));
    assert_eq!(l.dom.style(l.logo, "opacity").as_deref(), Some("0.5"));
    assert_eq!(l.dom.style(l.nav_links[0], "opacity"), None);

    page.dispatch(&Event::PointerOut(PointerEvent {
        target: l.nav_links[0],
    }));
    assert_eq!(l.dom.style(l.nav_links[1], "opacity").as_deref(), Some("1"));
}

#[test]
fn tabs_switch_panels() {
    let l = landing();
    let mut page = mount(&l);
    page.dispatch(&Event::click(l.tabs[1]));
    assert!(l.dom.has_class(l.tabs[1], "operations__tab--active"));
    assert!(!l.dom.has_class(l.tabs[0], "operations__tab--active"));
    assert!(l.dom.has_class(l.panels[1], "operations__content--active"));
    assert!(!l.dom.has_class(l.panels[0], "operations__content--active"));
}

#[test]
fn scrolling_drives_sticky_nav_reveal_and_lazy_images() {
    let l = landing();
    let mut page = mount(&l);

    // Lazy image is 300px below the fold: inside the 200px margin only
    // after scrolling 150px.
    assert_eq!(l.dom.attribute(l.lazy, "src").as_deref(), Some("img/digital-lazy.jpg"));
    scroll(&l, &mut page, 150.0);
    assert_eq!(l.dom.attribute(l.lazy, "src").as_deref(), Some("img/digital.jpg"));
    assert!(l.dom.has_class(l.lazy, "lazy-img"));
    page.dispatch(&Event::Load(l.lazy));
    assert!(!l.dom.has_class(l.lazy, "lazy-img"));

    // Section 1 crossed the 15% threshold on the way.
    scroll(&l, &mut page, 150.0);
    assert!(!l.dom.has_class(l.sections[0], "section--hidden"));
    assert!(l.dom.has_class(l.sections[1], "section--hidden"));

    // Past the header: sticky.
    scroll(&l, &mut page, 500.0);
    assert!(l.dom.has_class(l.nav, "sticky"));

    // Back to the top: not sticky, section stays revealed.
    scroll(&l, &mut page, -800.0);
    assert!(!l.dom.has_class(l.nav, "sticky"));
    assert!(!l.dom.has_class(l.sections[0], "section--hidden"));
}

#[test]
fn slider_follows_buttons_keys_and_dots() {
    let l = landing();
    let mut page = mount(&l);

    page.dispatch(&Event::click(l.slider_right));
    page.dispatch(&Event::key(KeyCode::ArrowRight));
    page.dispatch(&Event::key(KeyCode::ArrowLeft));
    assert_eq!(page.slider().unwrap().slider().current_slide(), 1);

    let dot = l.dom.children(l.dots)[3];
    page.dispatch(&Event::click(dot));
    assert_eq!(page.slider().unwrap().slider().current_slide(), 3);
    let active: Vec<_> = l
        .dom
        .children(l.dots)
        .into_iter()
        .map(|d| l.dom.has_class(d, "dots__dot--active"))
        .collect();
    assert_eq!(active, vec![false, false, false, true]);
}

#[test]
fn slider_failure_does_not_block_modal() {
    let l = landing();
    let config = PageConfig::from_toml_str(
        "strict = true\n[slider]\nkeys = { prev = \"Escape\", next = \"ArrowRight\" }",
    )
    .unwrap();
    let mut page = Page::mount(l.dom.clone(), &config).unwrap();
    page.dispatch(&Event::click(l.open_modal));

    // Break the dot for slide 3 so stepping back from 0 fails.
    let last = l.dom.children(l.dots)[3];
    l.dom.set_attribute(last, "data-slide", "lost");

    let outcome = page.dispatch(&Event::key(KeyCode::Escape));
    assert!(outcome.is_handled());
    assert!(l.dom.has_class(l.modal, "hidden"));
    assert_eq!(page.slider().unwrap().slider().current_slide(), 0);

    page.dispatch(&Event::key(KeyCode::ArrowRight));
    assert_eq!(page.slider().unwrap().slider().current_slide(), 1);
}
