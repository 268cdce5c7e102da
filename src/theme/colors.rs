//! Colors - Injected Stylesheet Colors

/// Colors used by the injected stylesheet, as CSS values
pub struct SiteColors;

impl SiteColors {
    // Surfaces
    /// Off-canvas menu background
    pub fn menu_bg() -> &'static str { "rgba(255, 255, 255, 0.98)" }
    /// Navbar background once scrolled
    pub fn navbar_scrolled_bg() -> &'static str { "rgba(255, 255, 255, 0.98)" }

    // Shadows
    /// Navbar shadow once scrolled
    pub fn navbar_shadow() -> &'static str { "rgba(0, 0, 0, 0.1)" }
}
