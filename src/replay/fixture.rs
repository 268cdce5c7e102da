//! Replay fixture format
//!
//! ```json
//! {
//!   "viewport_height": 800,
//!   "stored_locale": "en",
//!   "body": [{ "tag": "button", "id": "langBtn" }],
//!   "actions": [
//!     { "action": "click", "target": "#langBtn" },
//!     { "action": "scroll", "y": 120 },
//!     { "action": "advance", "ms": 2000 }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_VIEWPORT_HEIGHT_PX;
use crate::dom::{ElementSpec, MemoryDom, Selector};
use crate::error::{Error, Result};
use crate::storage::MemoryStore;

/// A page plus a script of user actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    /// Locale token already persisted before the page loads
    #[serde(default)]
    pub stored_locale: Option<String>,
    #[serde(default)]
    pub body: Vec<ElementSpec>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

fn default_viewport_height() -> f64 {
    DEFAULT_VIEWPORT_HEIGHT_PX
}

/// One scripted user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Click the first element matching `#id` or `.class`
    Click { target: String },
    /// Scroll the window to an offset
    Scroll { y: f64 },
    /// Let virtual time pass
    Advance { ms: u64 },
}

impl Fixture {
    pub fn from_json(value: &str) -> Result<Self> {
        let fixture: Fixture = serde_json::from_str(value)?;
        fixture.validate()?;
        Ok(fixture)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let value = std::fs::read_to_string(path)?;
        Self::from_json(&value)
    }

    /// Every click target must be a selector we understand
    fn validate(&self) -> Result<()> {
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(Error::Fixture {
                message: format!("viewport height must be positive, got {}", self.viewport_height),
            });
        }
        for action in &self.actions {
            if let Action::Click { target } = action {
                Self::selector(target)?;
            }
        }
        Ok(())
    }

    pub(crate) fn selector(target: &str) -> Result<Selector> {
        Selector::parse(target).ok_or_else(|| Error::Fixture {
            message: format!("unsupported click target `{target}`, expected `#id` or `.class`"),
        })
    }

    pub fn dom(&self) -> MemoryDom {
        MemoryDom::with_body(self.body.clone(), self.viewport_height)
    }

    /// Memory store holding the pre-persisted locale, if any
    pub fn store(&self, key: &str) -> MemoryStore {
        match &self.stored_locale {
            Some(token) => MemoryStore::with_entry(key, token),
            None => MemoryStore::new(),
        }
    }
}
