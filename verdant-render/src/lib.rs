//! Verdant Render - Assistant Message Markdown
//!
//! Renders the small markdown subset the assistant emits into HTML:
//! links, bold, italic, inline code, bullet and numbered lists, line
//! breaks, and paragraphs. Input is untrusted, so the whole text is
//! HTML-escaped before any markup substitution runs; malformed markdown
//! degrades to escaped literal text rather than failing.

use once_cell::sync::Lazy;
use regex::Regex;

// Inline passes run in this order; each later pass only sees what the
// earlier ones left behind. Links go first so their label and URL are
// not chewed up by the emphasis passes, bold before italic so `**`
// pairs are consumed before single `*` pairs.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex"));
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("italic regex"));
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("code regex"));
static ORDERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\. (.*)$").expect("ordered item regex"));

/// Escape the five HTML-significant characters. Runs on the raw input
/// before any substitution, so nothing the user typed can land in the
/// output as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_inline(line: &str) -> String {
    let line = LINK_RE.replace_all(line, |caps: &regex::Captures| {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            &caps[2], &caps[1]
        )
    });
    let line = BOLD_RE.replace_all(&line, "<strong>$1</strong>");
    let line = ITALIC_RE.replace_all(&line, "<em>$1</em>");
    let line = CODE_RE.replace_all(&line, "<code>$1</code>");
    line.into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tags(self) -> (&'static str, &'static str) {
        match self {
            Self::Unordered => ("<ul>", "</ul>"),
            Self::Ordered => ("<ol>", "</ol>"),
        }
    }
}

/// Each input line is classified on its own; a list item is a list item
/// no matter what precedes it.
#[derive(Debug)]
enum Line {
    Blank,
    Item(ListKind, String),
    Text(String),
}

fn classify(line: &str) -> Line {
    if line.trim().is_empty() {
        Line::Blank
    } else if let Some(rest) = line.strip_prefix("- ") {
        Line::Item(ListKind::Unordered, render_inline(rest))
    } else if let Some(caps) = ORDERED_ITEM_RE.captures(line) {
        Line::Item(ListKind::Ordered, render_inline(&caps[1]))
    } else {
        Line::Text(render_inline(line))
    }
}

#[derive(Debug)]
enum Block {
    Paragraph(Vec<String>),
    List(ListKind, Vec<String>),
}

/// Group classified lines into blocks: contiguous items of one list
/// kind share a container, a kind switch or text line closes it, and a
/// blank line ends the current paragraph.
fn into_blocks(lines: impl Iterator<Item = Line>) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    for line in lines {
        match line {
            Line::Blank => {
                // Paragraph boundary; an open list also ends here.
                if matches!(blocks.last(), Some(Block::Paragraph(items)) if items.is_empty()) {
                    continue;
                }
                blocks.push(Block::Paragraph(Vec::new()));
            }
            Line::Item(kind, item) => match blocks.last_mut() {
                Some(Block::List(open_kind, items)) if *open_kind == kind => items.push(item),
                _ => blocks.push(Block::List(kind, vec![item])),
            },
            Line::Text(text) => match blocks.last_mut() {
                Some(Block::Paragraph(texts)) => texts.push(text),
                _ => blocks.push(Block::Paragraph(vec![text])),
            },
        }
    }
    blocks
}

/// Render untrusted assistant text to HTML.
///
/// Never panics. Empty input renders to an empty string; any other
/// input produces non-empty output containing the escaped text.
pub fn render_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let escaped = escape_html(text);
    let blocks = into_blocks(escaped.lines().map(classify));

    let mut out = String::new();
    let mut wrote_paragraph = false;
    for block in &blocks {
        match block {
            Block::Paragraph(texts) => {
                if texts.is_empty() {
                    continue;
                }
                out.push_str("<p>");
                out.push_str(&texts.join("<br>"));
                out.push_str("</p>");
                wrote_paragraph = true;
            }
            Block::List(kind, items) => {
                let (open, close) = kind.tags();
                out.push_str(open);
                for item in items {
                    out.push_str("<li>");
                    out.push_str(item);
                    out.push_str("</li>");
                }
                out.push_str(close);
            }
        }
    }

    // Whitespace-only input classifies to nothing; fall back to the
    // escaped text so non-empty input never renders to nothing.
    if out.is_empty() {
        out.push_str("<p>");
        out.push_str(&escaped);
        out.push_str("</p>");
        wrote_paragraph = true;
    }

    if wrote_paragraph {
        out
    } else {
        format!("<p>{out}</p>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_wrapped_in_a_paragraph() {
        assert_eq!(render_markdown("hello world"), "<p>hello world</p>");
    }

    #[test]
    fn bold_and_italic_render() {
        assert_eq!(
            render_markdown("a **bold** and *soft* word"),
            "<p>a <strong>bold</strong> and <em>soft</em> word</p>"
        );
    }

    #[test]
    fn links_open_in_a_new_tab() {
        let html = render_markdown("see [the guide](https://example.com/eco)");
        assert_eq!(
            html,
            "<p>see <a href=\"https://example.com/eco\" target=\"_blank\" \
             rel=\"noopener noreferrer\">the guide</a></p>"
        );
    }

    #[test]
    fn link_inside_bold_renders_nested() {
        let html = render_markdown("**[x](y)**");
        assert_eq!(
            html,
            "<p><strong><a href=\"y\" target=\"_blank\" rel=\"noopener noreferrer\">x</a>\
             </strong></p>"
        );
    }

    #[test]
    fn inline_code_renders() {
        assert_eq!(
            render_markdown("run `cargo doc` locally"),
            "<p>run <code>cargo doc</code> locally</p>"
        );
    }

    #[test]
    fn bullet_run_shares_one_container() {
        let html = render_markdown("- one\n- two\n- three");
        assert_eq!(
            html,
            "<p><ul><li>one</li><li>two</li><li>three</li></ul></p>"
        );
    }

    #[test]
    fn numbered_run_renders_ordered() {
        let html = render_markdown("1. first\n2. second");
        assert_eq!(html, "<p><ol><li>first</li><li>second</li></ol></p>");
    }

    #[test]
    fn list_kind_switch_closes_the_container() {
        let html = render_markdown("- a\n1. b");
        assert_eq!(html, "<p><ul><li>a</li></ul><ol><li>b</li></ol></p>");
    }

    #[test]
    fn numbered_item_after_text_is_still_ordered() {
        // Classification is per line, not dependent on what came before.
        let html = render_markdown("intro\n1. only item");
        assert_eq!(html, "<p>intro</p><ol><li>only item</li></ol>");
    }

    #[test]
    fn single_newline_becomes_br() {
        assert_eq!(render_markdown("one\ntwo"), "<p>one<br>two</p>");
    }

    #[test]
    fn blank_line_is_a_paragraph_boundary() {
        assert_eq!(render_markdown("one\n\ntwo"), "<p>one</p><p>two</p>");
    }

    #[test]
    fn html_is_escaped_before_substitution() {
        let html = render_markdown("<script>alert('x')</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&#39;x&#39;"));
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(render_markdown("a ** b"), "<p>a ** b</p>");
        assert_eq!(render_markdown("[label without url"), "<p>[label without url</p>");
        assert_eq!(render_markdown("`unclosed"), "<p>`unclosed</p>");
    }

    #[test]
    fn markdown_in_list_items_renders() {
        let html = render_markdown("- **bold** item\n- plain");
        assert_eq!(
            html,
            "<p><ul><li><strong>bold</strong> item</li><li>plain</li></ul></p>"
        );
    }

    #[test]
    fn whitespace_only_input_is_not_empty_output() {
        let html = render_markdown("   ");
        assert!(!html.is_empty());
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(render_markdown(""), "");
    }
}
