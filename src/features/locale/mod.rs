//! Locale Toggle
//!
//! Swaps the visible text of every bilingual node, the toggle label and the
//! document language.

mod controller;

pub use controller::LocaleController;

use crate::dom::{Dom, Selector};
use crate::domain::config::LocaleConfig;
use crate::i18n::Locale;

/// Nodes carrying both annotations
pub fn bilingual_nodes(config: &LocaleConfig) -> Selector {
    Selector::HasAttributes(
        Locale::ALL
            .iter()
            .map(|l| config.text_attribute(*l).to_string())
            .collect(),
    )
}

/// Show `locale` on the page.
///
/// Bilingual nodes get their annotation text verbatim. The label names the
/// locale a toggle would switch to. Missing nodes are skipped.
pub fn apply_locale(dom: &mut dyn Dom, locale: Locale, config: &LocaleConfig) {
    let attribute = config.text_attribute(locale);
    for element in dom.query_all(&bilingual_nodes(config)) {
        if let Some(text) = dom.attribute(element, attribute) {
            dom.set_text(element, &text);
        }
    }

    if let Some(label) = dom.element_by_id(&config.label_id) {
        dom.set_text(label, locale.other().display_name());
    }

    dom.set_document_lang(locale.document_lang());
}
