use scraper::{ElementRef, Node};

/// Trims the text and collapses every whitespace run (including non-breaking
/// spaces and newlines) into a single space
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes every occurrence of `marker` and normalizes what is left
pub fn strip_marker(text: &str, marker: &str) -> String {
    if marker.is_empty() {
        return normalize_whitespace(text);
    }
    normalize_whitespace(&text.replace(marker, ""))
}

/// Concatenated text of an element and its descendants
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Text of an element where the first `<br>` is rendered as `separator`.
///
/// Later line breaks contribute nothing, the same as with [`element_text`].
pub fn element_text_with_break(element: ElementRef<'_>, separator: &str) -> String {
    let mut raw = String::new();
    let mut break_seen = false;

    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(el) if el.name() == "br" && !break_seen => {
                raw.push_str(separator);
                break_seen = true;
            }
            _ => {}
        }
    }

    normalize_whitespace(&raw)
}
