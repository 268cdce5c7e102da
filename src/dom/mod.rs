//! DOM - Page Surface Abstraction
//!
//! Controllers read and mutate the page only through the [`Dom`] trait.
//! Elements are opaque [`ElementId`] handles handed out by the
//! implementation; a handle stays valid for the lifetime of the page.
//!
//! Two implementations exist: [`memory::MemoryDom`] for headless hosts and
//! tests, and the `web-sys` backed `WebDom` behind the `web` feature.

pub mod memory;

pub use memory::{ElementSpec, MemoryDom, ScrollRequest};

/// Opaque element handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// The subset of CSS selectors the behaviors need
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `.a, .b, .c`
    AnyClass(Vec<String>),
    /// `[a][b]`: every attribute present
    HasAttributes(Vec<String>),
    /// `tag[name^="prefix"]`
    AttributePrefix {
        tag: Option<String>,
        name: String,
        prefix: String,
    },
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Selector::Class(class.into())
    }

    pub fn any_class<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selector::AnyClass(classes.into_iter().map(Into::into).collect())
    }

    /// In-page anchors: `a[href^="#"]`
    pub fn fragment_links() -> Self {
        Selector::AttributePrefix {
            tag: Some("a".to_string()),
            name: "href".to_string(),
            prefix: "#".to_string(),
        }
    }

    /// Parse the shorthand used by replay fixtures: `#id` or `.class`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(id) = value.strip_prefix('#') {
            return (!id.is_empty()).then(|| Selector::id(id));
        }
        if let Some(class) = value.strip_prefix('.') {
            return (!class.is_empty()).then(|| Selector::class(class));
        }
        None
    }

    /// Render as a CSS selector string
    pub fn to_css(&self) -> String {
        match self {
            Selector::Id(id) => format!("#{id}"),
            Selector::Class(class) => format!(".{class}"),
            Selector::AnyClass(classes) => classes
                .iter()
                .map(|c| format!(".{c}"))
                .collect::<Vec<_>>()
                .join(", "),
            Selector::HasAttributes(names) => names.iter().map(|n| format!("[{n}]")).collect(),
            Selector::AttributePrefix { tag, name, prefix } => {
                format!("{}[{name}^=\"{prefix}\"]", tag.as_deref().unwrap_or(""))
            }
        }
    }
}

/// Scroll animation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Read/write access to the page
///
/// Every method tolerates handles that do not belong to this document:
/// reads return empty values and writes do nothing.
pub trait Dom {
    /// All matching elements in document order
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

    /// First matching element in document order
    fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.query(&Selector::id(id))
    }

    fn body(&self) -> Option<ElementId>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Text content of the element and its descendants
    fn text(&self, element: ElementId) -> String;

    /// Replace the element's content with a single text
    fn set_text(&mut self, element: ElementId, text: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Whether `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// The document element's `lang` attribute
    fn document_lang(&self) -> Option<String>;

    fn set_document_lang(&mut self, lang: &str);

    /// Current vertical scroll offset of the viewport
    fn scroll_y(&self) -> f64;

    /// Top of the element relative to the document
    fn offset_top(&self, element: ElementId) -> f64;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Whether a `<style>` tagged with `marker` is already in `<head>`
    fn has_head_style(&self, marker: &str) -> bool;

    /// Append a `<style>` tagged with `marker` to `<head>`
    fn append_head_style(&mut self, marker: &str, css: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_render_as_css() {
        assert_eq!(Selector::id("langBtn").to_css(), "#langBtn");
        assert_eq!(
            Selector::any_class(["step", "stat-item"]).to_css(),
            ".step, .stat-item"
        );
        assert_eq!(
            Selector::HasAttributes(vec!["data-zh".into(), "data-en".into()]).to_css(),
            "[data-zh][data-en]"
        );
        assert_eq!(Selector::fragment_links().to_css(), "a[href^=\"#\"]");
    }

    #[test]
    fn shorthand_parsing() {
        assert_eq!(Selector::parse("#faq"), Some(Selector::id("faq")));
        assert_eq!(Selector::parse(" .hamburger "), Some(Selector::class("hamburger")));
        assert_eq!(Selector::parse("#"), None);
        assert_eq!(Selector::parse("div"), None);
    }
}
