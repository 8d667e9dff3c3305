//! Stage-clear article rendering: markdown to styled terminal lines.
//!
//! Articles are short (a heading and a paragraph or two), so this walks the
//! mdast tree for just the node kinds they use and falls back to plain text
//! for anything else.

use markdown::{mdast, to_mdast, ParseOptions};

use crate::tui::{bold, cyan, italic, yellow};

/// Render article markdown to display lines (no trailing newlines).
#[must_use]
pub fn render_article(text: &str) -> Vec<String> {
    let children = match to_mdast(text, &ParseOptions::default()) {
        Ok(mdast::Node::Root(root)) => root.children,
        _ => return text.lines().map(ToString::to_string).collect(),
    };

    let mut lines = Vec::new();
    for node in &children {
        match node {
            mdast::Node::Heading(heading) => {
                let flat = inline_text(&heading.children);
                lines.push(bold(&cyan(&flat)));
            }
            mdast::Node::Paragraph(paragraph) => {
                for line in inline_text(&paragraph.children).split('\n') {
                    lines.push(line.to_string());
                }
            }
            mdast::Node::List(list) => {
                for item in &list.children {
                    if let mdast::Node::ListItem(item) = item {
                        let flat = item
                            .children
                            .iter()
                            .filter_map(|child| match child {
                                mdast::Node::Paragraph(paragraph) => {
                                    Some(inline_text(&paragraph.children))
                                }
                                _ => None,
                            })
                            .collect::<Vec<_>>()
                            .join(" ");
                        lines.push(format!("  - {flat}"));
                    }
                }
            }
            other => {
                if let Some(literal) = node_plain_text(other) {
                    lines.push(literal);
                }
            }
        }
        lines.push(String::new());
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

fn inline_text(nodes: &[mdast::Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            mdast::Node::Text(text) => out.push_str(&text.value),
            mdast::Node::InlineCode(code) => out.push_str(&yellow(&code.value)),
            mdast::Node::Strong(strong) => out.push_str(&bold(&inline_text(&strong.children))),
            mdast::Node::Emphasis(emphasis) => {
                out.push_str(&italic(&inline_text(&emphasis.children)));
            }
            other => {
                if let Some(literal) = node_plain_text(other) {
                    out.push_str(&literal);
                }
            }
        }
    }
    out
}

fn node_plain_text(node: &mdast::Node) -> Option<String> {
    match node {
        mdast::Node::Text(text) => Some(text.value.clone()),
        mdast::Node::Code(code) => Some(code.value.clone()),
        mdast::Node::Html(html) => Some(html.value.clone()),
        mdast::Node::Blockquote(quote) => Some(inline_text(&quote.children)),
        _ => None,
    }
}
