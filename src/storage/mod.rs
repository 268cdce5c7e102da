//! Storage - Persisted Preferences
//!
//! The site persists exactly one value, the locale token. Backends implement
//! [`PreferenceStore`]; [`LocalePreference`] owns a backend plus the key and
//! gives the locale controller an explicit load/save lifecycle.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use tracing::{debug, warn};

use crate::error::Result;
use crate::i18n::Locale;

/// Key-value preference backend
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// The persisted locale preference
pub struct LocalePreference {
    store: Box<dyn PreferenceStore>,
    key: String,
}

impl LocalePreference {
    pub fn new(store: Box<dyn PreferenceStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored locale. Read failures fall back to the primary locale.
    pub fn load(&self) -> Locale {
        match self.store.get(&self.key) {
            Ok(value) => {
                let locale = Locale::from_stored(value.as_deref());
                debug!(key = %self.key, stored = ?value, ?locale, "Loaded locale preference");
                locale
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read locale preference");
                Locale::PRIMARY
            }
        }
    }

    /// Persist a locale. Failures are logged; the page keeps working with
    /// the in-memory locale.
    pub fn save(&mut self, locale: Locale) {
        if let Err(e) = self.store.set(&self.key, locale.token()) {
            warn!(key = %self.key, error = %e, "Failed to persist locale preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage {
                message: "denied".to_string(),
            })
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage {
                message: "quota".to_string(),
            })
        }
    }

    #[test]
    fn load_defaults_to_primary_and_save_writes_token() {
        let store = MemoryStore::new();
        let mut preference = LocalePreference::new(Box::new(store.clone()), "language");
        assert_eq!(preference.load(), Locale::ZhCN);

        preference.save(Locale::EnUS);
        assert_eq!(store.value("language").as_deref(), Some("en"));
        assert_eq!(preference.load(), Locale::EnUS);
    }

    #[test]
    fn broken_backend_is_not_fatal() {
        let mut preference = LocalePreference::new(Box::new(BrokenStore), "language");
        assert_eq!(preference.load(), Locale::PRIMARY);
        preference.save(Locale::EnUS);
    }
}
