//! Best-effort HTML pretty-printer.
//!
//! Markup is parsed with `scraper` (html5ever) and re-serialized with
//! two-space indentation and a maximum line width. Formatting never surfaces
//! an error to the user: [`format_html`] hands the input back unchanged when
//! anything goes wrong. [`HtmlFormatter::try_format`] is the fallible form for
//! callers that need to know.

pub mod printer;
pub mod tree;

use thiserror::Error;

use printer::Printer;
use tree::parse_markup;

pub const DEFAULT_PRINT_WIDTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("nothing to format")]
    Empty,
    #[error("input contains no markup")]
    NoMarkup,
    #[error("markup nested deeper than {0} levels")]
    TooDeep(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct HtmlFormatter {
    print_width: usize,
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PRINT_WIDTH)
    }
}

impl HtmlFormatter {
    pub fn new(print_width: usize) -> Self {
        Self {
            print_width: print_width.max(1),
        }
    }

    pub fn print_width(&self) -> usize {
        self.print_width
    }

    pub fn try_format(&self, markup: &str) -> Result<String, FormatError> {
        if markup.trim().is_empty() {
            return Err(FormatError::Empty);
        }
        let nodes = parse_markup(markup)?;
        Ok(Printer::new(self.print_width).print(&nodes))
    }

    /// Pretty-print `markup`, or return it unchanged if that fails.
    pub fn format(&self, markup: &str) -> String {
        match self.try_format(markup) {
            Ok(formatted) => formatted,
            Err(e) => {
                log::debug!("formatting skipped: {}", e);
                markup.to_string()
            }
        }
    }
}

/// Format with the default print width.
pub fn format_html(markup: &str) -> String {
    HtmlFormatter::default().format(markup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_element_stays_inline() {
        assert_eq!(format_html("<p>hi</p>"), "<p>hi</p>\n");
        assert_eq!(
            format_html("<p>Hello   <b>world</b>!</p>"),
            "<p>Hello <b>world</b>!</p>\n"
        );
    }

    #[test]
    fn document_gets_implicit_sections() {
        assert_eq!(
            format_html("<html></html>"),
            "<html>\n  <head></head>\n  <body></body>\n</html>\n"
        );
    }

    #[test]
    fn doctype_and_nested_blocks() {
        let out = format_html(
            "<!DOCTYPE html><html><head><title>T</title></head><body><div><p>one</p><p>two</p></div></body></html>",
        );
        assert_eq!(
            out,
            "<!doctype html>\n\
             <html>\n\
             \x20 <head>\n\
             \x20   <title>T</title>\n\
             \x20 </head>\n\
             \x20 <body>\n\
             \x20   <div>\n\
             \x20     <p>one</p>\n\
             \x20     <p>two</p>\n\
             \x20   </div>\n\
             \x20 </body>\n\
             </html>\n"
        );
    }

    #[test]
    fn long_text_wraps_at_print_width() {
        let formatter = HtmlFormatter::new(20);
        assert_eq!(
            formatter.try_format("<p>aaaa bbbb cccc dddd eeee</p>").unwrap(),
            "<p>\n  aaaa bbbb cccc\n  dddd eeee\n</p>\n"
        );
    }

    #[test]
    fn long_open_tag_breaks_attributes() {
        let formatter = HtmlFormatter::new(30);
        let out = formatter
            .try_format(r#"<div class="some-long-class-name" id="main"><p>x</p></div>"#)
            .unwrap();
        assert!(out.starts_with("<div\n"));
        assert!(out.contains("\n  class=\"some-long-class-name\"\n"));
        assert!(out.contains("\n  id=\"main\"\n"));
        assert!(out.contains("\n>\n  <p>x</p>\n</div>\n"));
    }

    #[test]
    fn script_is_reindented_not_rewritten() {
        let out = format_html("<script>\n      var a = 1;\n        b(a < 2);\n</script>");
        assert_eq!(out, "<script>\n  var a = 1;\n    b(a < 2);\n</script>\n");
    }

    #[test]
    fn pre_is_verbatim() {
        let out = format_html("<pre>  a\n b <b>c</b></pre>");
        assert_eq!(out, "<pre>  a\n b <b>c</b></pre>\n");
    }

    #[test]
    fn wrapping_never_splits_glued_inline_content() {
        let formatter = HtmlFormatter::new(20);
        assert_eq!(
            formatter
                .try_format("<p>price:<b>42</b>USD and more words here</p>")
                .unwrap(),
            "<p>\n  price:<b>42</b>USD\n  and more words\n  here\n</p>\n"
        );
    }

    #[test]
    fn wide_inline_element_breaks_inside_itself() {
        let formatter = HtmlFormatter::new(24);
        let out = formatter
            .try_format("<p>see <span>a rather long span of text</span> now</p>")
            .unwrap();
        assert_eq!(
            out,
            "<p>\n  see\n  <span>\n    a rather long span\n    of text\n  </span>\n  now\n</p>\n"
        );
    }

    #[test]
    fn body_attributes_survive() {
        assert_eq!(
            format_html(r#"<body class="dark"><p>a</p></body>"#),
            "<html>\n  <head></head>\n  <body class=\"dark\">\n    <p>a</p>\n  </body>\n</html>\n"
        );
    }

    #[test]
    fn pre_leading_newline_is_stable() {
        let once = format_html("<pre>\n\nx</pre>");
        assert_eq!(once, "<pre>\n\nx</pre>\n");
        assert_eq!(format_html(&once), once);
    }

    #[test]
    fn void_elements_have_no_close_tag() {
        assert_eq!(format_html(r#"<img src="a.png"><br>"#), "<img src=\"a.png\"><br>\n");
    }

    #[test]
    fn text_is_reescaped() {
        assert_eq!(format_html("<p>a &lt; b &amp; c</p>"), "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn failures_return_input_unchanged() {
        let formatter = HtmlFormatter::default();
        assert_eq!(formatter.try_format("   "), Err(FormatError::Empty));
        assert_eq!(formatter.try_format("not markup"), Err(FormatError::NoMarkup));
        assert_eq!(format_html("not markup"), "not markup");
        assert_eq!(format_html(""), "");
    }
}
