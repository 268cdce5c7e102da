//! Behavior Constants
//!
//! Centralized defaults for thresholds, offsets and timings. Every value here
//! can be overridden through `SiteConfig`.

/// Storage key of the persisted locale preference
pub const LOCALE_STORAGE_KEY: &str = "language";

/// Id of the locale toggle button
pub const LOCALE_BUTTON_ID: &str = "langBtn";

/// Id of the element naming the locale a toggle switches to
pub const LOCALE_LABEL_ID: &str = "currentLang";

/// Attributes carrying the primary and secondary text of a bilingual node
pub const LOCALE_PRIMARY_ATTRIBUTE: &str = "data-zh";
pub const LOCALE_SECONDARY_ATTRIBUTE: &str = "data-en";

/// Vertical scroll offset above which the navbar is "scrolled"
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;

/// Fixed header height subtracted from anchor scroll destinations
pub const HEADER_OFFSET_PX: f64 = 80.0;

/// Counter ramp duration
pub const COUNTER_DURATION_MS: u64 = 2000;
/// Counter ramp tick interval
pub const COUNTER_TICK_MS: u64 = 16;

/// Intersection ratio at which entrance animations trigger
pub const ENTRANCE_THRESHOLD: f64 = 0.1;
/// Bottom root margin for entrance animations (negative shrinks the viewport)
pub const ENTRANCE_BOTTOM_MARGIN_PX: f64 = -50.0;

/// Width below which the navigation menu goes off-canvas
pub const MOBILE_BREAKPOINT_PX: u32 = 768;
/// Height of the fixed navbar used by the off-canvas menu
pub const NAVBAR_HEIGHT_PX: u32 = 70;

/// Viewport height used by the headless host when a fixture gives none
pub const DEFAULT_VIEWPORT_HEIGHT_PX: f64 = 800.0;

/// Recent replay trace capacity
pub const REPLAY_TRACE_CAPACITY: usize = 64;
