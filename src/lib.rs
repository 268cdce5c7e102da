//! Site Behaviors Library
//!
//! Client-side behaviors of a bilingual static marketing site: locale
//! toggle, mobile navigation, scroll-styled navbar, smooth anchor scrolling,
//! entrance animations and animated counters. Behaviors run against the
//! abstract [`dom::Dom`] and [`eventing::EventSource`], headless through
//! [`app::VirtualHost`] or in a browser with the `web` feature.

pub mod app;
pub mod constants;
pub mod dom;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod features;
pub mod helpers;
pub mod i18n;
pub mod replay;
pub mod storage;
pub mod theme;
pub mod utils;

#[cfg(feature = "web")]
pub mod web;
