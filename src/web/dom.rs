//! WebDom - `web-sys` backed page
//!
//! Element handles index an arena of `web_sys::Element`s. An element gets a
//! handle the first time a query or event returns it and keeps it for the
//! page's lifetime.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollToOptions, Window};

use crate::dom::{Dom, ElementId, ScrollBehavior, Selector};

/// Attribute tagging injected `<style>` elements
const STYLE_MARKER_ATTRIBUTE: &str = "data-site-behaviors";

pub struct WebDom {
    window: Window,
    document: Document,
    elements: RefCell<Vec<Element>>,
}

impl WebDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            elements: RefCell::new(Vec::new()),
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Handle of `element`, allocating one on first sight
    pub fn intern(&self, element: Element) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        if let Some(index) = elements.iter().position(|e| *e == element) {
            return ElementId::new(index);
        }
        elements.push(element);
        ElementId::new(elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(id.index()).cloned()
    }
}

impl Dom for WebDom {
    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        let Ok(list) = self.document.query_selector_all(&selector.to_css()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.document
            .get_element_by_id(id)
            .map(|element| self.intern(element))
    }

    fn body(&self) -> Option<ElementId> {
        self.document.body().map(|body| self.intern(body.into()))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn text(&self, element: ElementId) -> String {
        self.element(element)
            .and_then(|e| e.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(element) = self.element(element) {
            element.set_text_content(Some(text));
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|e| e.class_list().contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        match (self.element(ancestor), self.element(node)) {
            (Some(ancestor), Some(node)) => ancestor.contains(Some(node.as_ref())),
            _ => false,
        }
    }

    fn document_lang(&self) -> Option<String> {
        self.document.document_element()?.get_attribute("lang")
    }

    fn set_document_lang(&mut self, lang: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute("lang", lang);
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn offset_top(&self, element: ElementId) -> f64 {
        self.element(element)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .map_or(0.0, |e| f64::from(e.offset_top()))
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn has_head_style(&self, marker: &str) -> bool {
        let selector = format!("style[{STYLE_MARKER_ATTRIBUTE}=\"{marker}\"]");
        matches!(self.document.query_selector(&selector), Ok(Some(_)))
    }

    fn append_head_style(&mut self, marker: &str, css: &str) {
        let (Some(head), Ok(style)) = (self.document.head(), self.document.create_element("style"))
        else {
            return;
        };
        let _ = style.set_attribute(STYLE_MARKER_ATTRIBUTE, marker);
        style.set_text_content(Some(css));
        let _ = head.append_child(&style);
    }
}
