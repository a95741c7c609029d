// src/core/html.rs
// Small helpers over `scraper` element trees: visible text, and text split
// into rendered lines (block elements and <br> break lines, inline ones don't).

use scraper::ElementRef;

use super::sanitize::normalize_ws;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "dd", "div", "dl", "dt", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "li", "ol", "p", "section", "table", "tbody", "td", "th", "thead", "tr", "ul",
];

/// All text under `el` on one line. Inline runs stay glued
/// (`<a>행복</a>복권방` → "행복복권방"); line breaks become single spaces.
pub fn text_of(el: ElementRef<'_>) -> String {
    text_lines(el).join(" ")
}

/// Visible text of `el` as non-empty, whitespace-collapsed lines.
pub fn text_lines(el: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut cur = s!();
    walk(el, &mut lines, &mut cur);
    flush(&mut lines, &mut cur);
    lines
}

fn walk(el: ElementRef<'_>, lines: &mut Vec<String>, cur: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            cur.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let tag = child_el.value().name();
            if tag.eq_ignore_ascii_case("br") {
                flush(lines, cur);
            } else if is_block(tag) {
                flush(lines, cur);
                walk(child_el, lines, cur);
                flush(lines, cur);
            } else {
                walk(child_el, lines, cur);
            }
        }
    }
}

fn flush(lines: &mut Vec<String>, cur: &mut String) {
    for raw in cur.split('\n') {
        let line = normalize_ws(raw);
        if !line.is_empty() {
            lines.push(line);
        }
    }
    cur.clear();
}

fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.iter().any(|b| tag.eq_ignore_ascii_case(b))
}

/// First element sibling before `el`, skipping text and comments.
pub fn prev_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.prev_siblings().find_map(ElementRef::wrap)
}

/// Element parent of `el`, if any.
pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}
