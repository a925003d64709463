use super::grammar::{Construct, Grammar, Match};
use super::types::{BlockCodeKind, Node};

/// Line separator the engine understands. Callers supply Unix newlines.
const LINE_SEPARATOR: char = '\n';

/// Scans `text` left to right and returns the node sequence covering it.
///
/// Everything between two construct matches is emitted as a `Text` node, each
/// match is stripped of its delimiters, and constructs that may nest further
/// markup have their stripped body parsed again recursively. Unrecognized or
/// malformed syntax is never an error; it simply stays text.
pub(super) fn parse_nodes<'a>(grammar: &Grammar, text: &'a str) -> Vec<Node<'a>> {
    let mut nodes = Vec::new();
    let mut last_start = 0;

    while let Some(found) = grammar.find_next(text, last_start) {
        if last_start < found.start {
            nodes.push(Node::Text {
                text: &text[last_start..found.start],
            });
        }
        build_nodes(grammar, &mut nodes, found, &text[found.start..found.end]);
        last_start = found.end;
    }

    if last_start < text.len() {
        nodes.push(Node::Text {
            text: &text[last_start..],
        });
    }

    nodes
}

/// Builds the node(s) for one construct match and appends them to `nodes`.
///
/// `matched` is the full matched text, delimiters included. Every construct
/// yields exactly one node except fenced code, which yields one node per
/// physical line.
fn build_nodes<'a>(grammar: &Grammar, nodes: &mut Vec<Node<'a>>, found: Match, matched: &'a str) {
    match found.construct {
        Construct::UnorderedListItem => {
            // drop the two-character "* " / "- " / "+ " marker
            let text = &matched[2..];
            nodes.push(Node::UnorderedListItem {
                text,
                children: parse_nodes(grammar, text),
            });
        }
        Construct::Header => {
            let level = matched.bytes().take_while(|&b| b == b'#').count();
            // drop the marker and its separating space
            let text = &matched[level + 1..];
            nodes.push(Node::Header {
                level: level as u8,
                text,
                children: parse_nodes(grammar, text),
            });
        }
        Construct::Quote => {
            let text = &matched[2..];
            nodes.push(Node::Quote {
                text,
                children: parse_nodes(grammar, text),
            });
        }
        Construct::Italic => {
            let text = &matched[1..matched.len() - 1];
            nodes.push(Node::Italic {
                text,
                children: parse_nodes(grammar, text),
            });
        }
        Construct::Bold => {
            let text = &matched[2..matched.len() - 2];
            nodes.push(Node::Bold {
                text,
                children: parse_nodes(grammar, text),
            });
        }
        Construct::Strike => {
            let text = &matched[2..matched.len() - 2];
            nodes.push(Node::Strike {
                text,
                children: parse_nodes(grammar, text),
            });
        }
        Construct::Rule => nodes.push(Node::Rule),
        Construct::InlineCode => nodes.push(Node::InlineCode {
            text: &matched[1..matched.len() - 1],
        }),
        Construct::Link => {
            let (text, url) = grammar.split_link(matched);
            nodes.push(Node::Link { url, text });
        }
        Construct::BlockCode => push_block_code(nodes, &matched[3..matched.len() - 3]),
        Construct::OrderedListItem => {
            let digits = matched.bytes().take_while(u8::is_ascii_digit).count();
            let order = &matched[..digits + 1];
            // the separator after the marker may be any whitespace character
            let mut rest = matched[order.len()..].chars();
            rest.next();
            let text = rest.as_str();
            nodes.push(Node::OrderedListItem {
                order,
                text,
                children: parse_nodes(grammar, text),
            });
        }
    }
}

/// Splits a fence body into per-line nodes.
///
/// The separators hugging the fences belong to the fences, not the body, so
/// one is dropped from each end first. Every line keeps its own trailing
/// separator except the last.
fn push_block_code<'a>(nodes: &mut Vec<Node<'a>>, body: &'a str) {
    let body = body.strip_prefix(LINE_SEPARATOR).unwrap_or(body);
    let body = body.strip_suffix(LINE_SEPARATOR).unwrap_or(body);

    if !body.contains(LINE_SEPARATOR) {
        nodes.push(Node::BlockCode {
            kind: BlockCodeKind::Single,
            text: body,
        });
        return;
    }

    let mut lines: Vec<&str> = body.split_inclusive(LINE_SEPARATOR).collect();
    if body.ends_with(LINE_SEPARATOR) {
        // a trailing separator still opens one final, empty line
        lines.push(&body[body.len()..]);
    }
    let last = lines.len() - 1;
    for (index, line) in lines.into_iter().enumerate() {
        let kind = match index {
            0 => BlockCodeKind::Start,
            index if index == last => BlockCodeKind::End,
            _ => BlockCodeKind::Middle,
        };
        nodes.push(Node::BlockCode { kind, text: line });
    }
}
