use scraper::node::Node;
use scraper::{ElementRef, Html};

use super::FormatError;

/// Nesting deeper than this is refused rather than recursed into.
pub const MAX_DEPTH: usize = 256;

/// Owned markup tree handed to the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Doctype(String),
    Comment(String),
    Text(String),
    Element {
        name: String,
        attrs: Vec<(String, String)>,
        children: Vec<Markup>,
    },
}

impl Markup {
    pub fn element_name(&self) -> Option<&str> {
        match self {
            Markup::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    fn contains_element(&self) -> bool {
        matches!(self, Markup::Element { .. })
    }
}

/// Whole documents keep their implicit `html/head/body`; anything else is a
/// fragment so no wrapper gets invented.
pub fn looks_like_document(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("<!doctype")
        || lower.contains("<html")
        || matches!(leading_tag(&lower), Some("head" | "body"))
}

/// Name of the tag `source` opens with, if it opens with one.
fn leading_tag(source: &str) -> Option<&str> {
    let rest = source.strip_prefix('<')?;
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Parse markup into top-level nodes.
pub fn parse_markup(source: &str) -> Result<Vec<Markup>, FormatError> {
    let mut nodes = Vec::new();

    if looks_like_document(source) {
        let document = Html::parse_document(source);
        for child in document.tree.root().children() {
            if let Some(m) = convert_node(child.value(), ElementRef::wrap(child), 0)? {
                nodes.push(m);
            }
        }
    } else {
        let fragment = Html::parse_fragment(source);
        for child in fragment.root_element().children() {
            if let Some(m) = convert_node(child.value(), ElementRef::wrap(child), 0)? {
                nodes.push(m);
            }
        }
    }

    if !nodes.iter().any(Markup::contains_element) {
        return Err(FormatError::NoMarkup);
    }
    Ok(nodes)
}

fn convert_node(
    node: &Node,
    element: Option<ElementRef<'_>>,
    depth: usize,
) -> Result<Option<Markup>, FormatError> {
    match node {
        Node::Element(_) => match element {
            Some(el) => convert_element(el, depth).map(Some),
            None => Ok(None),
        },
        Node::Text(t) => Ok(Some(Markup::Text(t.text.to_string()))),
        Node::Comment(c) => Ok(Some(Markup::Comment(c.comment.to_string()))),
        Node::Doctype(d) => Ok(Some(Markup::Doctype(d.name().to_string()))),
        _ => Ok(None),
    }
}

fn convert_element(el: ElementRef<'_>, depth: usize) -> Result<Markup, FormatError> {
    if depth > MAX_DEPTH {
        return Err(FormatError::TooDeep(MAX_DEPTH));
    }

    let name = el.value().name().to_string();
    let attrs = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let mut children = Vec::new();
    for child in el.children() {
        if let Some(m) = convert_node(child.value(), ElementRef::wrap(child), depth + 1)? {
            children.push(m);
        }
    }

    Ok(Markup::Element {
        name,
        attrs,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_has_no_implicit_wrapper() {
        let nodes = parse_markup("<p>hi</p>").unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].element_name(), Some("p"));
    }

    #[test]
    fn document_keeps_doctype_and_body() {
        let nodes = parse_markup("<!DOCTYPE html><html><body><p>x</p></body></html>").unwrap();
        assert_eq!(nodes[0], Markup::Doctype("html".into()));
        let Markup::Element { name, children, .. } = &nodes[1] else {
            panic!("expected <html>");
        };
        assert_eq!(name, "html");
        let names: Vec<_> = children.iter().filter_map(Markup::element_name).collect();
        assert_eq!(names, ["head", "body"]);
    }

    #[test]
    fn head_or_body_start_a_document() {
        assert!(looks_like_document("<body class=\"dark\"><p>a</p></body>"));
        assert!(looks_like_document("  <HEAD><title>t</title></HEAD>"));
        assert!(!looks_like_document("<header>top</header>"));
        assert!(!looks_like_document("<bodyguard>x</bodyguard>"));
        assert!(!looks_like_document("<p>body</p>"));
    }

    #[test]
    fn plain_text_is_not_markup() {
        assert_eq!(parse_markup("just words"), Err(FormatError::NoMarkup));
    }

    #[test]
    fn deep_nesting_is_refused() {
        let source = "<div>".repeat(MAX_DEPTH + 10);
        assert_eq!(parse_markup(&source), Err(FormatError::TooDeep(MAX_DEPTH)));
    }
}
