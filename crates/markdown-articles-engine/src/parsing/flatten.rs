use super::types::{Document, Node};

impl Document<'_> {
    /// Flattens the tree back into plain text with all markup stripped.
    ///
    /// Depth-first, pre-order: a node with children contributes its flattened
    /// children, a leaf contributes its own text. Delimiters never surface,
    /// link urls are dropped in favour of the display text, fence lines keep
    /// their separators and a rule becomes a single filler space.
    ///
    /// Pure and total: there is no input tree this can fail on.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        append_nodes(&self.nodes, &mut out);
        out
    }
}

fn append_nodes(nodes: &[Node<'_>], out: &mut String) {
    for node in nodes {
        let children = node.children();
        if children.is_empty() {
            out.push_str(node.text());
        } else {
            append_nodes(children, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parsing::strip_markdown;
    use pretty_assertions::assert_eq;

    #[test]
    fn delimiters_are_stripped() {
        assert_eq!(strip_markdown("**bold** and `code`"), "bold and code");
    }

    #[test]
    fn link_urls_never_surface() {
        assert_eq!(
            strip_markdown("read [this](http://a.b) twice"),
            "read this twice"
        );
    }

    #[test]
    fn rule_flattens_to_filler_space() {
        assert_eq!(strip_markdown("above\n***\nbelow"), "above\n \nbelow");
    }

    #[test]
    fn fence_lines_keep_their_separators() {
        assert_eq!(
            strip_markdown("```\nlet a = 1;\nlet b = 2;\n```"),
            "let a = 1;\nlet b = 2;"
        );
    }

    #[test]
    fn nested_emphasis_flattens_to_leaf_text() {
        assert_eq!(strip_markdown("**a *b* c**"), "a b c");
    }

    #[test]
    fn header_and_list_markers_disappear() {
        assert_eq!(strip_markdown("# Title\n* one\n2. two"), "Title\none\ntwo");
    }

    #[test]
    fn marker_free_text_round_trips_unchanged() {
        let source = "nothing fancy here";
        assert_eq!(strip_markdown(source), source);
    }

    #[test]
    fn empty_input_flattens_to_empty_string() {
        assert_eq!(strip_markdown(""), "");
    }
}
