//! Application Layer
//!
//! The [`Site`] owns the page and its controllers; hosts feed it platform
//! activity. [`VirtualHost`] is the headless host used by tests and the
//! replay binary.

mod host;
mod site;

pub use host::VirtualHost;
pub use site::Site;
