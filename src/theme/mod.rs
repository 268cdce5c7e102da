//! Theme - Injected Stylesheet
//!
//! The behaviors rely on a handful of rules the page's own stylesheet does
//! not carry: the off-canvas mobile menu, the hamburger cross, the body
//! scroll lock, the scrolled navbar and the entrance animation. They are
//! appended to `<head>` once per page load.

pub mod colors;

use tracing::debug;

use crate::constants::{MOBILE_BREAKPOINT_PX, NAVBAR_HEIGHT_PX};
use crate::dom::Dom;
use crate::domain::config::SiteConfig;
use colors::SiteColors;

/// Marker tagging the injected `<style>` element
pub const STYLE_MARKER: &str = "site-behaviors";

/// Build the stylesheet for the configured class names
pub fn stylesheet(config: &SiteConfig) -> String {
    let nav = &config.navigation;
    let header = &config.header;
    let entrance = &config.entrance;

    format!(
        r#"@media (max-width: {breakpoint}px) {{
    .{menu} {{
        position: fixed;
        top: {navbar_height}px;
        left: -100%;
        width: 100%;
        height: calc(100vh - {navbar_height}px);
        background: {menu_bg};
        backdrop-filter: blur(10px);
        flex-direction: column;
        justify-content: flex-start;
        align-items: center;
        padding-top: 2rem;
        transition: left 0.3s ease;
        z-index: 999;
    }}

    .{menu}.{active} {{
        left: 0;
    }}

    .{link} {{
        margin: 1rem 0;
        font-size: 1.2rem;
    }}

    .language-switch {{
        margin: 2rem 0;
    }}

    .{hamburger}.{active} span:nth-child(1) {{
        transform: rotate(-45deg) translate(-5px, 6px);
    }}

    .{hamburger}.{active} span:nth-child(2) {{
        opacity: 0;
    }}

    .{hamburger}.{active} span:nth-child(3) {{
        transform: rotate(45deg) translate(-5px, -6px);
    }}

    body.{lock} {{
        overflow: hidden;
    }}
}}

.{navbar}.{scrolled} {{
    background: {navbar_bg};
    box-shadow: 0 2px 20px {navbar_shadow};
}}

.{animate} {{
    animation: fadeInUp 0.6s ease-out forwards;
}}
"#,
        breakpoint = MOBILE_BREAKPOINT_PX,
        navbar_height = NAVBAR_HEIGHT_PX,
        menu = nav.menu_class,
        link = nav.link_class,
        hamburger = nav.hamburger_class,
        active = nav.active_class,
        lock = nav.body_lock_class,
        menu_bg = SiteColors::menu_bg(),
        navbar = header.navbar_class,
        scrolled = header.scrolled_class,
        navbar_bg = SiteColors::navbar_scrolled_bg(),
        navbar_shadow = SiteColors::navbar_shadow(),
        animate = entrance.animate_class,
    )
}

/// Append the stylesheet unless this page already has it.
///
/// Returns whether a `<style>` element was added.
pub fn inject_styles(dom: &mut dyn Dom, config: &SiteConfig) -> bool {
    if dom.has_head_style(STYLE_MARKER) {
        debug!("Stylesheet already injected");
        return false;
    }
    dom.append_head_style(STYLE_MARKER, &stylesheet(config));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn stylesheet_covers_every_flag() {
        let css = stylesheet(&SiteConfig::default());
        assert!(css.contains("@media (max-width: 768px)"));
        assert!(css.contains("top: 70px;"));
        assert!(css.contains(".nav-menu.active"));
        assert!(css.contains(".hamburger.active span:nth-child(2)"));
        assert!(css.contains("body.menu-open"));
        assert!(css.contains(".navbar.scrolled"));
        assert!(css.contains(".animate-in"));
    }

    #[test]
    fn stylesheet_follows_configured_classes() {
        let mut config = SiteConfig::default();
        config.header.scrolled_class = "is-scrolled".to_string();
        assert!(stylesheet(&config).contains(".navbar.is-scrolled"));
    }

    #[test]
    fn injection_is_idempotent() {
        let mut dom = MemoryDom::default();
        let config = SiteConfig::default();

        assert!(inject_styles(&mut dom, &config));
        assert!(!inject_styles(&mut dom, &config));
        assert_eq!(dom.head_styles().count(), 1);
    }
}
