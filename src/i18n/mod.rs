//! i18n - Locale Model
//!
//! The site ships every translatable node with both texts inline, so the
//! locale is only a selector between two annotations plus a few
//! document-level codes. The annotation names live in `LocaleConfig`.

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// Chinese (Simplified), the primary locale
    #[default]
    ZhCN,
    /// English (US)
    EnUS,
}

impl Locale {
    /// Both locales, primary first
    pub const ALL: [Locale; 2] = [Locale::ZhCN, Locale::EnUS];

    /// The primary (default) locale
    pub const PRIMARY: Locale = Locale::ZhCN;

    /// Token persisted in preference storage
    pub fn token(&self) -> &'static str {
        match self {
            Locale::ZhCN => "zh",
            Locale::EnUS => "en",
        }
    }

    /// Value for the document's `lang` attribute
    pub fn document_lang(&self) -> &'static str {
        match self {
            Locale::ZhCN => "zh-CN",
            Locale::EnUS => "en",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::ZhCN => "中文",
            Locale::EnUS => "English",
        }
    }

    /// The locale a toggle switches to
    pub fn other(&self) -> Locale {
        match self {
            Locale::ZhCN => Locale::EnUS,
            Locale::EnUS => Locale::ZhCN,
        }
    }

    /// Interpret a stored preference value.
    ///
    /// Missing or empty values mean the primary locale. Anything else is
    /// compared against the primary token only, so unknown tokens resolve to
    /// the secondary locale.
    pub fn from_stored(value: Option<&str>) -> Locale {
        match value {
            None | Some("") => Locale::PRIMARY,
            Some(token) if token == Locale::PRIMARY.token() => Locale::PRIMARY,
            Some(_) => Locale::PRIMARY.other(),
        }
    }
}
