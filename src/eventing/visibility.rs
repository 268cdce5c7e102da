//! Visibility - Intersection Geometry
//!
//! Headless hosts compute visibility themselves. Only the vertical axis
//! matters for a single-column page, so an element is a `[top, top + height)`
//! span and the root is the viewport span adjusted by the observer's margin.

use super::{IntersectionEntry, ObserverOptions};
use crate::dom::ElementId;

/// Vertical viewport span
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

/// Observe one element against the viewport
pub fn observe_entry(
    target: ElementId,
    top: f64,
    height: f64,
    viewport: Viewport,
    options: &ObserverOptions,
) -> IntersectionEntry {
    let margin = options.root_margin;
    let root_top = viewport.scroll_y - margin.top;
    let root_bottom = viewport.scroll_y + viewport.height + margin.bottom;
    let bottom = top + height;

    let overlap = bottom.min(root_bottom) - top.max(root_top);
    let touching = overlap >= 0.0 && root_bottom >= root_top;

    let ratio = if !touching {
        0.0
    } else if height <= 0.0 {
        1.0
    } else {
        (overlap / height).clamp(0.0, 1.0)
    };

    let is_intersecting = if options.threshold > 0.0 {
        touching && ratio >= options.threshold
    } else {
        touching
    };

    IntersectionEntry {
        target,
        is_intersecting,
        ratio,
    }
}
