use textwrap::core::{display_width, Fragment};
use textwrap::wrap_algorithms::wrap_first_fit;

use super::tree::Markup;

const INDENT: &str = "  ";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Contents printed exactly as parsed.
const PRESERVE_WHITESPACE: &[&str] = &["pre", "textarea"];

/// Raw-text contents re-indented line by line but otherwise untouched.
const RAW_TEXT: &[&str] = &["script", "style"];

/// Children of these always go on their own lines.
const BLOCK_ELEMENTS: &[&str] = &[
    "html", "head", "body", "address", "article", "aside", "blockquote", "details", "dialog",
    "dd", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "li", "link", "main", "meta", "nav", "ol",
    "option", "p", "pre", "script", "section", "select", "style", "summary", "table", "tbody",
    "td", "template", "tfoot", "th", "thead", "title", "tr", "ul", "noscript",
];

pub struct Printer {
    width: usize,
    out: String,
}

impl Printer {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            out: String::new(),
        }
    }

    pub fn print(mut self, nodes: &[Markup]) -> String {
        self.children(nodes, 0);
        self.out
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn fits(&self, depth: usize, text: &str) -> bool {
        depth * INDENT.len() + display_width(text) <= self.width
    }

    fn node(&mut self, node: &Markup, depth: usize) {
        match node {
            Markup::Doctype(name) => self.line(depth, &format!("<!doctype {}>", name)),
            Markup::Comment(text) => {
                let rendered = format!("<!--{}-->", text);
                for l in rendered.lines() {
                    self.line(depth, l.trim_end());
                }
            }
            Markup::Text(_) => self.children(std::slice::from_ref(node), depth),
            Markup::Element {
                name,
                attrs,
                children,
            } => self.element(name, attrs, children, depth),
        }
    }

    /// Lay out a sibling list. Inline neighbours share lines and are only
    /// broken where the source had whitespace; block children get their own.
    fn children(&mut self, nodes: &[Markup], depth: usize) {
        let mut run = Vec::new();
        for node in nodes {
            match flat_inline(node) {
                Some(flat) => run.push((node, flat)),
                None => {
                    self.inline_run(std::mem::take(&mut run), depth);
                    self.node(node, depth);
                }
            }
        }
        self.inline_run(run, depth);
    }

    fn inline_run(&mut self, run: Vec<(&Markup, String)>, depth: usize) {
        let units = inline_units(run);
        if units.is_empty() {
            return;
        }
        let avail = self.width.saturating_sub(depth * INDENT.len()).max(1) as f64;

        for line in wrap_first_fit(&units, &[avail]) {
            match line {
                // A lone element too wide for the line gets broken up itself.
                [Unit {
                    element: Some(element),
                    ..
                }] if line[0].width() > avail => self.node(element, depth),
                _ => {
                    let words: Vec<&str> = line.iter().map(|u| u.text.as_str()).collect();
                    self.line(depth, &words.join(" "));
                }
            }
        }
    }

    fn element(&mut self, name: &str, attrs: &[(String, String)], children: &[Markup], depth: usize) {
        let is_void = VOID_ELEMENTS.contains(&name);

        if let Some(flat) = flat_element(name, attrs, children) {
            if self.fits(depth, &flat) {
                self.line(depth, &flat);
                return;
            }
        }

        self.open_tag(name, attrs, depth);
        if is_void {
            return;
        }

        if PRESERVE_WHITESPACE.contains(&name) {
            // Whitespace is significant: content goes straight between the tags.
            let content: String = children.iter().map(verbatim).collect();
            let close = format!("{}</{}>", content, name);
            if self.out.ends_with('\n') {
                self.out.pop();
            }
            // The parser eats one newline right after the open tag.
            if content.starts_with('\n') {
                self.out.push('\n');
            }
            self.out.push_str(&close);
            self.out.push('\n');
            return;
        }

        if RAW_TEXT.contains(&name) {
            let content: String = children.iter().map(raw_content).collect();
            for l in dedent(&content) {
                if l.is_empty() {
                    self.out.push('\n');
                } else {
                    self.line(depth + 1, &l);
                }
            }
        } else {
            self.children(children, depth + 1);
        }
        self.line(depth, &format!("</{}>", name));
    }

    fn open_tag(&mut self, name: &str, attrs: &[(String, String)], depth: usize) {
        let single = format!("<{}{}>", name, attrs_inline(attrs));
        if attrs.len() <= 1 || self.fits(depth, &single) {
            self.line(depth, &single);
            return;
        }
        self.line(depth, &format!("<{}", name));
        for (k, v) in attrs {
            self.line(depth + 1, &attr(k, v));
        }
        self.line(depth, ">");
    }
}

/// Single-line rendering of an element, when its shape allows one.
fn flat_element(name: &str, attrs: &[(String, String)], children: &[Markup]) -> Option<String> {
    let open = format!("<{}{}>", name, attrs_inline(attrs));
    if VOID_ELEMENTS.contains(&name) {
        return Some(open);
    }
    if children.is_empty() {
        return Some(format!("{}</{}>", open, name));
    }
    if matches!(name, "html" | "head" | "body") {
        return None;
    }

    let inner = if PRESERVE_WHITESPACE.contains(&name) {
        let content: String = children.iter().map(verbatim).collect();
        if content.contains('\n') {
            return None;
        }
        content
    } else if RAW_TEXT.contains(&name) {
        let content: String = children.iter().map(raw_content).collect();
        if content.contains('\n') {
            return None;
        }
        content.trim().to_string()
    } else {
        let mut inner = String::new();
        for child in children {
            inner.push_str(&flat_inline(child)?);
        }
        inner.trim().to_string()
    };
    Some(format!("{}{}</{}>", open, inner, name))
}

/// Single-line rendering of a child inside an inline parent. Block children
/// force the parent onto multiple lines.
fn flat_inline(node: &Markup) -> Option<String> {
    match node {
        Markup::Text(text) => Some(collapse_whitespace(text)),
        Markup::Comment(text) if !text.contains('\n') => Some(format!("<!--{}-->", text)),
        Markup::Comment(_) | Markup::Doctype(_) => None,
        Markup::Element {
            name,
            attrs,
            children,
        } => {
            if BLOCK_ELEMENTS.contains(&name.as_str()) {
                return None;
            }
            flat_element(name, attrs, children)
        }
    }
}

/// Inline content that may not be split across lines: words and tags with no
/// whitespace between them in the source.
#[derive(Debug)]
struct Unit<'a> {
    text: String,
    /// Set when the unit is exactly one element.
    element: Option<&'a Markup>,
}

impl Fragment for Unit<'_> {
    fn width(&self) -> f64 {
        display_width(&self.text) as f64
    }

    fn whitespace_width(&self) -> f64 {
        1.0
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

#[derive(Default)]
struct UnitBuilder<'a> {
    done: Vec<Unit<'a>>,
    open: Option<Unit<'a>>,
}

impl<'a> UnitBuilder<'a> {
    fn glue(&mut self, text: &str, element: Option<&'a Markup>) {
        match &mut self.open {
            Some(unit) => {
                unit.text.push_str(text);
                unit.element = None;
            }
            None => {
                self.open = Some(Unit {
                    text: text.to_string(),
                    element,
                })
            }
        }
    }

    fn split(&mut self) {
        if let Some(unit) = self.open.take() {
            self.done.push(unit);
        }
    }

    fn finish(mut self) -> Vec<Unit<'a>> {
        self.split();
        self.done
    }
}

fn inline_units<'a>(run: Vec<(&'a Markup, String)>) -> Vec<Unit<'a>> {
    let mut units = UnitBuilder::default();
    for (node, flat) in run {
        let Markup::Text(text) = node else {
            let element = matches!(node, Markup::Element { .. }).then_some(node);
            units.glue(&flat, element);
            continue;
        };

        if text.starts_with(char::is_whitespace) {
            units.split();
        }
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                units.split();
            }
            units.glue(&escape_text(word), None);
        }
        if text.ends_with(char::is_whitespace) {
            units.split();
        }
    }
    units.finish()
}

fn raw_content(node: &Markup) -> String {
    match node {
        Markup::Text(t) => t.clone(),
        Markup::Comment(c) => format!("<!--{}-->", c),
        _ => String::new(),
    }
}

/// Exact serialization, for whitespace-sensitive content.
fn verbatim(node: &Markup) -> String {
    match node {
        Markup::Text(t) => escape_text(t),
        Markup::Comment(c) => format!("<!--{}-->", c),
        Markup::Doctype(name) => format!("<!doctype {}>", name),
        Markup::Element {
            name,
            attrs,
            children,
        } => {
            let open = format!("<{}{}>", name, attrs_inline(attrs));
            if VOID_ELEMENTS.contains(&name.as_str()) {
                return open;
            }
            let inner: String = children.iter().map(verbatim).collect();
            format!("{}{}</{}>", open, inner, name)
        }
    }
}

/// Collapse runs of whitespace to one space, keeping one at either edge when
/// the source had one there.
fn collapse_whitespace(text: &str) -> String {
    let words: Vec<String> = text.split_whitespace().map(escape_text).collect();
    if words.is_empty() {
        return if text.is_empty() { String::new() } else { " ".to_string() };
    }
    let mut out = String::new();
    if text.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&words.join(" "));
    if text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out
}

/// Strip blank edge lines and the common leading indentation.
fn dedent(content: &str) -> Vec<String> {
    let dedented = textwrap::dedent(content);
    let lines: Vec<&str> = dedented.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return Vec::new();
    };
    lines[start..=end].iter().map(|l| l.to_string()).collect()
}

fn attrs_inline(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!(" {}", attr(k, v)))
        .collect()
}

fn attr(key: &str, value: &str) -> String {
    if value.is_empty() {
        key.to_string()
    } else {
        format!("{}=\"{}\"", key, escape_attr(value))
    }
}

fn escape_text(s: &str) -> String {
    html_escape::encode_text(s).into_owned()
}

fn escape_attr(s: &str) -> String {
    html_escape::encode_double_quoted_attribute(s).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedent_strips_common_indent() {
        let lines = dedent("\n    var a = 1;\n      if (a) {}\n\n    done();\n  ");
        assert_eq!(lines, ["var a = 1;", "  if (a) {}", "", "done();"]);
    }

    #[test]
    fn collapse_keeps_edge_spaces() {
        assert_eq!(collapse_whitespace("  a \n b  "), " a b ");
        assert_eq!(collapse_whitespace("a<b"), "a&lt;b");
        assert_eq!(collapse_whitespace("\n\n"), " ");
    }

    #[test]
    fn attributes_are_escaped() {
        assert_eq!(attr("title", "say \"hi\" & go"), "title=\"say &quot;hi&quot; &amp; go\"");
        assert_eq!(attr("hidden", ""), "hidden");
    }
}
