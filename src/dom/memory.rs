//! MemoryDom - In-Memory Page Model
//!
//! An element tree with classes, attributes, text and a one-dimensional
//! layout (document top and height). Enough of a page for the behaviors to
//! run headless: the replay binary builds one from a JSON fixture and the
//! tests build one with [`ElementSpec`].

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::{Dom, ElementId, ScrollBehavior, Selector};

/// Declarative element description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    /// Document-relative top in pixels
    pub top: f64,
    pub height: f64,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Place the element at `top` with the given height
    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// A recorded `scroll_to` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    top: f64,
    height: f64,
}

impl Node {
    fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
            top: 0.0,
            height: 0.0,
        }
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.attributes.get("id") == Some(id),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::AnyClass(classes) => self.classes.iter().any(|c| classes.contains(c)),
            Selector::HasAttributes(names) => {
                names.iter().all(|n| self.attributes.contains_key(n))
            }
            Selector::AttributePrefix { tag, name, prefix } => {
                tag.as_ref().is_none_or(|t| t.eq_ignore_ascii_case(&self.tag))
                    && self
                        .attributes
                        .get(name)
                        .is_some_and(|v| v.starts_with(prefix.as_str()))
            }
        }
    }
}

/// In-memory page
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    head: ElementId,
    body: ElementId,
    styles: Vec<(String, String)>,
    scroll_y: f64,
    viewport_height: f64,
    scroll_requests: Vec<ScrollRequest>,
}

const ROOT: ElementId = ElementId(0);

impl MemoryDom {
    /// Empty `<html><head/><body/></html>` document
    pub fn new(viewport_height: f64) -> Self {
        let head = ElementId(1);
        let body = ElementId(2);
        let mut root = Node::new("html", None);
        root.children = vec![head, body];

        Self {
            nodes: vec![
                root,
                Node::new("head", Some(ROOT)),
                Node::new("body", Some(ROOT)),
            ],
            head,
            body,
            styles: Vec::new(),
            scroll_y: 0.0,
            viewport_height: viewport_height.max(0.0),
            scroll_requests: Vec::new(),
        }
    }

    /// Document whose body holds `children`
    pub fn with_body(children: Vec<ElementSpec>, viewport_height: f64) -> Self {
        let mut dom = Self::new(viewport_height);
        for child in children {
            dom.append(dom.body, child);
        }
        dom
    }

    /// Append `spec` (recursively) as the last child of `parent`
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let id = ElementId(self.nodes.len());
        let mut node = Node::new(&spec.tag, Some(parent));
        node.classes = spec.classes;
        node.attributes = spec.attributes;
        if let Some(element_id) = spec.id {
            node.attributes.insert("id".to_string(), element_id);
        }
        node.text = spec.text;
        node.top = spec.top;
        node.height = spec.height.max(0.0);
        self.nodes.push(node);

        if let Some(parent_node) = self.nodes.get_mut(parent.0) {
            parent_node.children.push(id);
        }
        for child in spec.children {
            self.append(id, child);
        }
        id
    }

    /// Remove an element (and its subtree) from the document
    pub fn detach(&mut self, element: ElementId) {
        if element == ROOT {
            return;
        }
        let Some(parent) = self.nodes.get_mut(element.0).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent.0) {
            parent_node.children.retain(|c| *c != element);
        }
    }

    pub fn head(&self) -> ElementId {
        self.head
    }

    pub fn is_attached(&self, element: ElementId) -> bool {
        self.contains(ROOT, element)
    }

    /// Classes of an element, in insertion order
    pub fn classes(&self, element: ElementId) -> &[String] {
        self.nodes.get(element.0).map_or(&[], |n| n.classes.as_slice())
    }

    /// `(top, height)` of an element
    pub fn layout(&self, element: ElementId) -> (f64, f64) {
        self.nodes.get(element.0).map_or((0.0, 0.0), |n| (n.top, n.height))
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Lowest element bottom, at least one viewport
    pub fn document_height(&self) -> f64 {
        self.attached()
            .into_iter()
            .filter_map(|id| self.nodes.get(id.0))
            .map(|n| n.top + n.height)
            .fold(self.viewport_height, f64::max)
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    /// Move the viewport as a user scroll would, clamped to the document
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Injected stylesheets as `(marker, css)`
    pub fn head_styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(m, c)| (m.as_str(), c.as_str()))
    }

    /// Every `scroll_to` call so far, in order
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    /// Attached elements in document order
    fn attached(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(id.0) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Indented tree dump: tag, id, classes and own text
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(ROOT, 0, &mut out);
        out
    }

    fn write_outline(&self, id: ElementId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        let _ = write!(out, "{}<{}", "  ".repeat(depth), node.tag);
        if let Some(element_id) = node.attributes.get("id") {
            let _ = write!(out, "#{element_id}");
        }
        for class in &node.classes {
            let _ = write!(out, ".{class}");
        }
        if id == ROOT {
            if let Some(lang) = node.attributes.get("lang") {
                let _ = write!(out, " lang={lang}");
            }
        }
        out.push('>');
        if !node.text.is_empty() {
            let _ = write!(out, " {}", node.text);
        }
        out.push('\n');
        for child in &node.children {
            self.write_outline(*child, depth + 1, out);
        }
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_VIEWPORT_HEIGHT_PX)
    }
}

impl Dom for MemoryDom {
    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.attached()
            .into_iter()
            .filter(|id| self.nodes.get(id.0).is_some_and(|n| n.matches(selector)))
            .collect()
    }

    fn body(&self) -> Option<ElementId> {
        Some(self.body)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.nodes.get(element.0)?.attributes.get(name).cloned()
    }

    fn text(&self, element: ElementId) -> String {
        let Some(node) = self.nodes.get(element.0) else {
            return String::new();
        };
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&self.text(*child));
        }
        text
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        let Some(node) = self.nodes.get_mut(element.0) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        node.text = text.to_string();
        for child in children {
            if let Some(child_node) = self.nodes.get_mut(child.0) {
                child_node.parent = None;
            }
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(element.0)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.classes.retain(|c| c != class);
        }
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    fn document_lang(&self) -> Option<String> {
        self.attribute(ROOT, "lang")
    }

    fn set_document_lang(&mut self, lang: &str) {
        if let Some(root) = self.nodes.get_mut(ROOT.0) {
            root.attributes.insert("lang".to_string(), lang.to_string());
        }
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn offset_top(&self, element: ElementId) -> f64 {
        self.layout(element).0
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest { top, behavior });
        // Smooth scrolling settles immediately in memory
        self.set_scroll_y(top);
    }

    fn has_head_style(&self, marker: &str) -> bool {
        self.styles.iter().any(|(m, _)| m == marker)
    }

    fn append_head_style(&mut self, marker: &str, css: &str) {
        self.styles.push((marker.to_string(), css.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryDom {
        MemoryDom::with_body(
            vec![
                ElementSpec::new("nav").with_class("navbar").child(
                    ElementSpec::new("ul")
                        .with_class("nav-menu")
                        .child(
                            ElementSpec::new("a")
                                .with_class("nav-link")
                                .with_attr("href", "#about")
                                .with_text("About"),
                        )
                        .child(
                            ElementSpec::new("a")
                                .with_class("nav-link")
                                .with_attr("href", "https://example.com")
                                .with_text("Out"),
                        ),
                ),
                ElementSpec::new("section").with_id("about").at(1000.0, 600.0),
            ],
            800.0,
        )
    }

    #[test]
    fn query_in_document_order() {
        let dom = sample();
        let links = dom.query_all(&Selector::class("nav-link"));
        assert_eq!(links.len(), 2);
        assert_eq!(dom.text(links[0]), "About");
        assert_eq!(dom.query_all(&Selector::fragment_links()), vec![links[0]]);
        assert!(dom.element_by_id("about").is_some());
        assert!(dom.element_by_id("missing").is_none());
    }

    #[test]
    fn contains_walks_ancestors() {
        let dom = sample();
        let menu = dom.query(&Selector::class("nav-menu")).expect("menu");
        let link = dom.query(&Selector::class("nav-link")).expect("link");
        let about = dom.element_by_id("about").expect("about");
        assert!(dom.contains(menu, link));
        assert!(dom.contains(menu, menu));
        assert!(!dom.contains(link, menu));
        assert!(!dom.contains(menu, about));
    }

    #[test]
    fn set_text_replaces_children() {
        let mut dom = sample();
        let menu = dom.query(&Selector::class("nav-menu")).expect("menu");
        assert_eq!(dom.text(menu), "AboutOut");

        dom.set_text(menu, "gone");
        assert_eq!(dom.text(menu), "gone");
        assert!(dom.query_all(&Selector::class("nav-link")).is_empty());
    }

    #[test]
    fn detached_elements_leave_queries() {
        let mut dom = sample();
        let about = dom.element_by_id("about").expect("about");
        dom.detach(about);
        assert!(!dom.is_attached(about));
        assert!(dom.element_by_id("about").is_none());
    }

    #[test]
    fn scroll_is_clamped_but_requests_are_recorded() {
        let mut dom = sample();
        assert_eq!(dom.document_height(), 1600.0);

        dom.scroll_to(5000.0, ScrollBehavior::Smooth);
        assert_eq!(dom.scroll_y(), 800.0);
        assert_eq!(dom.scroll_requests()[0].top, 5000.0);

        dom.set_scroll_y(-20.0);
        assert_eq!(dom.scroll_y(), 0.0);
    }

    #[test]
    fn classes_are_a_set() {
        let mut dom = sample();
        let body = dom.body().expect("body");
        dom.add_class(body, "menu-open");
        dom.add_class(body, "menu-open");
        assert_eq!(dom.classes(body), ["menu-open".to_string()]);
        dom.remove_class(body, "menu-open");
        assert!(!dom.has_class(body, "menu-open"));
    }

    #[test]
    fn outline_shows_lang_and_classes() {
        let mut dom = sample();
        dom.set_document_lang("en");
        let outline = dom.outline();
        assert!(outline.starts_with("<html lang=en>"));
        assert!(outline.contains("<nav.navbar>"));
        assert!(outline.contains("<section#about>"));
    }
}
