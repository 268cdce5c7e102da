//! End-to-end behavior of a full page driven through the virtual host

use std::time::Duration;

use site_behaviors::app::{Site, VirtualHost};
use site_behaviors::dom::{Dom, ElementId, ElementSpec, MemoryDom, ScrollBehavior, Selector};
use site_behaviors::domain::config::SiteConfig;
use site_behaviors::storage::MemoryStore;
use site_behaviors::theme::{STYLE_MARKER, inject_styles};

const TICK: Duration = Duration::from_millis(16);

fn bilingual(tag: &str, zh: &str, en: &str) -> ElementSpec {
    ElementSpec::new(tag)
        .with_attr("data-zh", zh)
        .with_attr("data-en", en)
        .with_text(zh)
}

fn page() -> Vec<ElementSpec> {
    vec![
        ElementSpec::new("nav")
            .with_class("navbar")
            .at(0.0, 70.0)
            .child(
                ElementSpec::new("div")
                    .with_class("hamburger")
                    .child(ElementSpec::new("span").with_class("bar"))
                    .child(ElementSpec::new("span").with_class("bar")),
            )
            .child(
                ElementSpec::new("ul")
                    .with_class("nav-menu")
                    .child(
                        ElementSpec::new("a")
                            .with_class("nav-link")
                            .with_id("featuresLink")
                            .with_attr("href", "#features")
                            .with_text("Features"),
                    )
                    .child(
                        ElementSpec::new("a")
                            .with_class("nav-link")
                            .with_id("missingLink")
                            .with_attr("href", "#nowhere")
                            .with_text("Nowhere"),
                    ),
            )
            .child(
                ElementSpec::new("button")
                    .with_id("langBtn")
                    .child(ElementSpec::new("span").with_id("currentLang").with_text("EN")),
            ),
        bilingual("h1", "智能硬件", "Smart Hardware")
            .with_id("hero")
            .at(120.0, 80.0),
        bilingual("p", "更快交付", "Ship faster").at(220.0, 40.0),
        ElementSpec::new("a")
            .with_id("topLink")
            .with_attr("href", "#")
            .at(300.0, 20.0),
        ElementSpec::new("section")
            .with_id("features")
            .at(1000.0, 600.0)
            .child(ElementSpec::new("div").with_class("benefit-card").at(1050.0, 200.0)),
        ElementSpec::new("section")
            .with_id("stats")
            .at(1800.0, 300.0)
            .child(
                ElementSpec::new("div")
                    .with_class("stat-item")
                    .at(1800.0, 100.0)
                    .child(
                        ElementSpec::new("div")
                            .with_class("stat-number")
                            .with_id("revenue")
                            .with_text("$1,234")
                            .at(1810.0, 40.0),
                    ),
            )
            .child(
                ElementSpec::new("div")
                    .with_class("stat-item")
                    .at(1950.0, 100.0)
                    .child(
                        ElementSpec::new("div")
                            .with_class("stat-number")
                            .with_id("clients")
                            .with_text("150+")
                            .at(1960.0, 40.0),
                    ),
            ),
        ElementSpec::new("footer").at(2100.0, 300.0),
    ]
}

fn load(body: Vec<ElementSpec>, store: MemoryStore) -> VirtualHost {
    let dom = MemoryDom::with_body(body, 800.0);
    let site = Site::new(dom, SiteConfig::default(), Box::new(store));
    let mut host = VirtualHost::new(site);
    host.load();
    host
}

fn id(host: &VirtualHost, id: &str) -> ElementId {
    host.dom()
        .element_by_id(id)
        .unwrap_or_else(|| panic!("no element #{id}"))
}

fn class(host: &VirtualHost, class: &str) -> ElementId {
    host.dom()
        .query(&Selector::class(class))
        .unwrap_or_else(|| panic!("no element .{class}"))
}

fn text(host: &VirtualHost, element_id: &str) -> String {
    host.dom().text(id(host, element_id))
}

fn menu_flags(host: &VirtualHost) -> [bool; 3] {
    let dom = host.dom();
    [
        dom.has_class(class(host, "hamburger"), "active"),
        dom.has_class(class(host, "nav-menu"), "active"),
        dom.has_class(dom.body().expect("body"), "menu-open"),
    ]
}

fn assert_menu(host: &VirtualHost, open: bool) {
    assert_eq!(menu_flags(host), [open; 3]);
}

#[test]
fn fresh_visit_shows_primary_locale() {
    let store = MemoryStore::new();
    let host = load(page(), store.clone());

    assert_eq!(text(&host, "hero"), "智能硬件");
    assert_eq!(host.dom().document_lang().as_deref(), Some("zh-CN"));
    assert_eq!(text(&host, "currentLang"), "English");
    assert_eq!(store.value("language"), None);
}

#[test]
fn toggling_twice_round_trips_text_and_preference() {
    let store = MemoryStore::new();
    let mut host = load(page(), store.clone());
    let before = host.dom().outline();

    host.click(id(&host, "langBtn"));
    assert_eq!(text(&host, "hero"), "Smart Hardware");
    assert_eq!(host.dom().document_lang().as_deref(), Some("en"));
    assert_eq!(text(&host, "currentLang"), "中文");
    assert_eq!(store.value("language").as_deref(), Some("en"));

    host.click(id(&host, "langBtn"));
    assert_eq!(text(&host, "hero"), "智能硬件");
    assert_eq!(store.value("language").as_deref(), Some("zh"));
    assert_eq!(host.dom().outline(), before);
}

#[test]
fn clicking_the_label_inside_the_button_toggles() {
    let mut host = load(page(), MemoryStore::new());
    host.click(id(&host, "currentLang"));
    assert_eq!(host.dom().document_lang().as_deref(), Some("en"));
}

#[test]
fn stored_secondary_locale_is_applied_on_load() {
    let host = load(page(), MemoryStore::with_entry("language", "en"));
    assert_eq!(text(&host, "hero"), "Smart Hardware");
    assert_eq!(text(&host, "currentLang"), "中文");
}

#[test]
fn unknown_stored_token_shows_secondary_and_toggles_to_primary() {
    let store = MemoryStore::with_entry("language", "fr");
    let mut host = load(page(), store.clone());
    assert_eq!(host.dom().document_lang().as_deref(), Some("en"));

    host.click(id(&host, "langBtn"));
    assert_eq!(host.dom().document_lang().as_deref(), Some("zh-CN"));
    assert_eq!(store.value("language").as_deref(), Some("zh"));
}

#[test]
fn menu_flags_move_together() {
    let mut host = load(page(), MemoryStore::new());
    assert_menu(&host, false);

    host.click(host.dom().query(&Selector::class("bar")).expect("bar"));
    assert_menu(&host, true);

    // Clicks inside the open menu keep it open
    host.click(class(&host, "nav-menu"));
    assert_menu(&host, true);

    host.click(class(&host, "hamburger"));
    assert_menu(&host, false);

    host.click(class(&host, "hamburger"));
    assert_menu(&host, true);
    host.click(id(&host, "hero"));
    assert_menu(&host, false);

    host.click(class(&host, "hamburger"));
    host.click(id(&host, "missingLink"));
    assert_menu(&host, false);
}

#[test]
fn outside_click_without_hamburger_is_harmless() {
    let mut host = load(
        vec![
            ElementSpec::new("ul").with_class("nav-menu"),
            ElementSpec::new("p").with_id("copy"),
        ],
        MemoryStore::new(),
    );
    host.click(id(&host, "copy"));

    let dom = host.dom();
    assert!(!dom.has_class(dom.body().expect("body"), "menu-open"));
}

#[test]
fn navbar_is_scrolled_only_past_threshold() {
    let mut host = load(page(), MemoryStore::new());
    let navbar = class(&host, "navbar");
    assert!(!host.dom().has_class(navbar, "scrolled"));

    host.scroll_to(100.0);
    assert!(host.dom().has_class(navbar, "scrolled"));

    host.scroll_to(10.0);
    assert!(!host.dom().has_class(navbar, "scrolled"));

    host.scroll_to(50.0);
    assert!(!host.dom().has_class(navbar, "scrolled"));
}

#[test]
fn anchor_scrolls_below_header_and_closes_menu() {
    let mut host = load(page(), MemoryStore::new());
    host.click(class(&host, "hamburger"));

    let outcome = host.click(id(&host, "featuresLink"));
    assert!(outcome.default_prevented);
    assert_menu(&host, false);

    let requests = host.dom().scroll_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].top, 920.0);
    assert_eq!(requests[0].behavior, ScrollBehavior::Smooth);
    assert_eq!(host.dom().scroll_y(), 920.0);
    assert!(host.dom().has_class(class(&host, "navbar"), "scrolled"));
}

#[test]
fn anchor_without_target_prevents_navigation_only() {
    let mut host = load(page(), MemoryStore::new());

    let outcome = host.click(id(&host, "missingLink"));
    assert!(outcome.default_prevented);
    let outcome = host.click(id(&host, "topLink"));
    assert!(outcome.default_prevented);

    assert!(host.dom().scroll_requests().is_empty());
    assert_eq!(host.dom().scroll_y(), 0.0);
}

#[test]
fn entrance_flags_blocks_as_they_appear() {
    let mut host = load(page(), MemoryStore::new());
    let card = class(&host, "benefit-card");
    assert!(!host.dom().has_class(card, "animate-in"));

    host.scroll_to(600.0);
    assert!(host.dom().has_class(card, "animate-in"));

    // Leaving the viewport keeps the flag
    host.scroll_to(0.0);
    assert!(host.dom().has_class(card, "animate-in"));
}

#[test]
fn entrance_waits_for_tenth_above_bottom_margin() {
    // Card top sits 40px above the viewport bottom, inside the 50px margin
    let mut host = load(
        vec![
            ElementSpec::new("div").with_class("benefit-card").at(760.0, 200.0),
            ElementSpec::new("footer").at(1000.0, 1000.0),
        ],
        MemoryStore::new(),
    );
    let card = class(&host, "benefit-card");
    assert!(!host.dom().has_class(card, "animate-in"));

    // 10px past the margin line is 5% of the card
    host.scroll_to(20.0);
    assert!(!host.dom().has_class(card, "animate-in"));

    // 30px is 15%
    host.scroll_to(40.0);
    assert!(host.dom().has_class(card, "animate-in"));
}

#[test]
fn blocks_added_after_load_are_not_observed() {
    let mut host = load(page(), MemoryStore::new());
    let body = host.dom().body().expect("body");
    let late = host
        .site_mut()
        .dom_mut()
        .append(body, ElementSpec::new("div").with_class("step").at(300.0, 50.0));

    host.scroll_to(200.0);
    assert!(!host.dom().has_class(late, "animate-in"));

    let observed: usize = host
        .site()
        .registry()
        .observers()
        .iter()
        .map(|o| o.targets.len())
        .sum();
    // benefit-card, two stat-items and two stat-numbers
    assert_eq!(observed, 5);
}

fn ramp_texts(host: &mut VirtualHost, element_id: &str) -> Vec<String> {
    let mut texts = Vec::new();
    for _ in 0..140 {
        host.advance(TICK);
        texts.push(text(host, element_id));
    }
    texts
}

#[test]
fn currency_counter_ramps_to_its_target() {
    let mut host = load(page(), MemoryStore::new());
    assert_eq!(text(&host, "revenue"), "$1,234");
    assert_eq!(host.active_timers(), 0);

    host.scroll_to(1500.0);
    assert_eq!(host.active_timers(), 2);

    let texts = ramp_texts(&mut host, "revenue");
    let values: Vec<u64> = texts
        .iter()
        .map(|t| {
            assert!(t.starts_with('$'), "prefix lost in {t}");
            t.trim_start_matches('$').replace(',', "").parse().expect("number")
        })
        .collect();

    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert!(values.iter().all(|v| *v <= 1234));
    assert_eq!(texts.last().map(String::as_str), Some("$1,234"));
}

#[test]
fn suffixed_counter_ramps_to_its_target() {
    let mut host = load(page(), MemoryStore::new());
    host.scroll_to(1500.0);

    let texts = ramp_texts(&mut host, "clients");
    assert!(texts.iter().all(|t| t.ends_with('+')));
    assert_eq!(texts.last().map(String::as_str), Some("150+"));
}

#[test]
fn counter_interval_is_cleared_exactly_once() {
    let mut host = load(page(), MemoryStore::new());
    host.scroll_to(1500.0);
    assert!(host.run_until_idle(Duration::from_secs(5)));
    assert_eq!(host.site().registry().active_timers(), 0);

    let stops = host
        .trace()
        .entries()
        .filter(|e| e.message.ends_with("stopped"))
        .count();
    assert_eq!(stops, 2);

    // Scrolling back and forth does not restart the counters
    host.scroll_to(0.0);
    host.scroll_to(1500.0);
    assert_eq!(host.active_timers(), 0);
    assert_eq!(text(&host, "revenue"), "$1,234");
}

#[test]
fn counter_without_digits_is_left_alone() {
    let mut host = load(
        vec![
            ElementSpec::new("div")
                .with_class("stat-number")
                .with_id("soon")
                .with_text("soon")
                .at(10.0, 20.0),
        ],
        MemoryStore::new(),
    );
    assert_eq!(host.active_timers(), 0);
    host.advance(TICK);
    assert_eq!(text(&host, "soon"), "soon");
}

#[test]
fn stylesheet_is_injected_once() {
    let mut dom = MemoryDom::with_body(page(), 800.0);
    let config = SiteConfig::default();
    assert!(inject_styles(&mut dom, &config));

    let site = Site::new(dom, config, Box::new(MemoryStore::new()));
    let markers: Vec<_> = site.dom().head_styles().map(|(m, _)| m).collect();
    assert_eq!(markers, vec![STYLE_MARKER]);
}
