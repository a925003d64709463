pub mod flatten;
pub mod grammar;
pub mod parser;
pub mod types;

pub use types::{BlockCodeKind, Document, Node};

use std::sync::LazyLock;

use grammar::Grammar;

/// The grammar is compiled once per process and shared, read-only, by every
/// parse call on every thread.
static GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::new);

/// Parses a whole markdown document into a typed node tree.
///
/// One-shot and non-incremental: any edit to the source means parsing the
/// whole document again, which is fine for article-sized inputs. Empty input
/// is valid and produces an empty document.
pub fn parse(text: &str) -> Document<'_> {
    Document {
        nodes: parser::parse_nodes(&GRAMMAR, text),
    }
}

/// Strips all markdown markup from `text`, keeping only the readable content.
///
/// Shorthand for parsing and flattening in one step; the result is what
/// search indexing and previews operate on.
pub fn strip_markdown(text: &str) -> String {
    parse(text).flatten()
}
