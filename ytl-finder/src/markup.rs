//! Structural queries over fetched HTML
//!
//! A small set of lookups in document order, enough to walk from a landmark
//! element to the link or text that follows it.

use scraper::{ElementRef, Html, Selector};

/// What [`find_next`] looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher<'m> {
    /// Element with this tag name
    Tag(&'m str),
    /// Element matching this class spec (see [`has_class_spec`])
    Class(&'m str),
}

impl Matcher<'_> {
    fn matches(&self, element: &ElementRef<'_>) -> bool {
        match self {
            Matcher::Tag(tag) => element.value().name().eq_ignore_ascii_case(tag),
            Matcher::Class(spec) => has_class_spec(element, spec),
        }
    }
}

/// Class match
///
/// A single class name matches any element carrying that class. A
/// space-separated spec matches only an element whose class list is exactly
/// that sequence.
pub fn has_class_spec(element: &ElementRef<'_>, spec: &str) -> bool {
    let mut wanted = spec.split_whitespace().peekable();
    let Some(first) = wanted.next() else {
        return false;
    };

    if wanted.peek().is_none() {
        return element.value().classes().any(|c| c == first);
    }

    match element.value().attr("class") {
        Some(actual) => actual.split_whitespace().eq(spec.split_whitespace()),
        None => false,
    }
}

/// First element in the document matching the class spec
pub fn find_by_class<'a>(document: &'a Html, spec: &str) -> Option<ElementRef<'a>> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| has_class_spec(el, spec))
}

/// First element after `start` in document order that satisfies `matcher`
///
/// Descendants of `start` come after it, so they are included.
pub fn find_next<'a>(document: &'a Html, start: ElementRef<'a>, matcher: Matcher<'_>) -> Option<ElementRef<'a>> {
    let start_id = start.id();
    document
        .tree
        .root()
        .descendants()
        .skip_while(|node| node.id() != start_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| matcher.matches(el))
}

/// First descendant of `element` matching a CSS selector
pub fn select_first<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    element.select(&selector).next()
}

/// Concatenated text of `element` and all its descendants
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Attribute value of `element`
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}
