use regex::Regex;

/// Every markdown construct the grammar recognizes.
///
/// Variant order is alternation order: when two constructs could match at the
/// same position, the earlier variant wins. This ordering, together with the
/// delimiter-run guard in [`Grammar::find_next`], is the whole disambiguation
/// mechanism; there is no backtracking repair step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    UnorderedListItem,
    Header,
    Quote,
    Italic,
    Bold,
    Strike,
    Rule,
    InlineCode,
    Link,
    BlockCode,
    OrderedListItem,
}

impl Construct {
    /// Alternation members, index-aligned with the capture groups of the
    /// compiled pattern.
    const ALL: [Construct; 11] = [
        Construct::UnorderedListItem,
        Construct::Header,
        Construct::Quote,
        Construct::Italic,
        Construct::Bold,
        Construct::Strike,
        Construct::Rule,
        Construct::InlineCode,
        Construct::Link,
        Construct::BlockCode,
        Construct::OrderedListItem,
    ];

    /// The pattern for this construct alone, wrapped in exactly one capture
    /// group so the matched alternative can be identified by group index.
    ///
    /// Emphasis bodies require a non-delimiter first character (no empty
    /// bodies) and make the rest of the body lazily optional, so single
    /// character bodies like `*b*` match. Run isolation (`***` must not be
    /// read as italic-inside-bold) is not expressible here without look-around
    /// support; [`Grammar::find_next`] enforces it after the fact.
    fn pattern(self) -> &'static str {
        match self {
            Construct::UnorderedListItem => r"(^[*+-] .+$)",
            Construct::Header => r"(^#{1,6} .+?$)",
            Construct::Quote => r"(^> .+?$)",
            Construct::Italic => r"(\*[^*](?:.*?[^*])??\*|_[^_](?:.*?[^_])??_)",
            Construct::Bold => r"(\*{2}[^*](?:.*?[^*])??\*{2}|_{2}[^_](?:.*?[^_])??_{2})",
            Construct::Strike => r"(~{2}[^~](?:.*?[^~])??~{2})",
            Construct::Rule => r"(^[-_*]{3}$)",
            Construct::InlineCode => r"(`[^`\s].*?[^`\s]?`)",
            Construct::Link => r"(\[[^\[\]]*?\]\(.+?\)|^\[*?\]\(.*?\))",
            Construct::BlockCode => r"(^`{3}[\s\S]+?`{3}$)",
            Construct::OrderedListItem => r"(^[0-9]+?\.\s.+?$)",
        }
    }

    /// Whether this construct's delimiter must not sit inside a longer run of
    /// the same character.
    fn run_isolated(self) -> bool {
        matches!(
            self,
            Construct::Italic | Construct::Bold | Construct::Strike | Construct::InlineCode
        )
    }
}

/// A construct occurrence located by [`Grammar::find_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub construct: Construct,
    pub start: usize,
    pub end: usize,
}

/// The whole-document matcher: one multi-alternative pattern over every
/// construct, compiled once and shared immutably across all parse calls.
#[derive(Debug)]
pub struct Grammar {
    constructs: Regex,
    link_parts: Regex,
}

impl Grammar {
    pub fn new() -> Self {
        let alternation = Construct::ALL
            .iter()
            .map(|construct| construct.pattern())
            .collect::<Vec<_>>()
            .join("|");
        Grammar {
            constructs: Regex::new(&format!("(?m){alternation}"))
                .expect("construct alternation must compile"),
            link_parts: Regex::new(r"\[(.*)\]\((.*)\)").expect("link splitter must compile"),
        }
    }

    /// Returns the leftmost construct at or after `from`, or `None` when the
    /// rest of `text` is plain.
    ///
    /// Ties at the same start position go to the earlier alternation member.
    /// A candidate whose delimiter is continued by the same character just
    /// outside the match (`***a***`, ` ``x`` `) is rejected and the scan
    /// resumes one byte past the candidate's start, reproducing the
    /// look-around restrictions of the source patterns on an engine without
    /// look-around.
    pub fn find_next(&self, text: &str, mut from: usize) -> Option<Match> {
        while from <= text.len() {
            let caps = self.constructs.captures_at(text, from)?;
            let whole = caps.get(0).expect("whole-match group is always present");
            let group = caps
                .iter()
                .skip(1)
                .position(|alternative| alternative.is_some())
                .expect("exactly one alternation group matches");
            let construct = Construct::ALL[group];

            if construct.run_isolated() && !delimiter_isolated(text, whole.start(), whole.end()) {
                from = whole.start() + 1;
                continue;
            }

            return Some(Match {
                construct,
                start: whole.start(),
                end: whole.end(),
            });
        }
        None
    }

    /// Splits a matched link into `(display text, url)`.
    ///
    /// A link match the splitter cannot re-match is a defect in the grammar
    /// itself, so this aborts rather than degrading.
    pub fn split_link<'a>(&self, matched: &'a str) -> (&'a str, &'a str) {
        let caps = self
            .link_parts
            .captures(matched)
            .expect("link match must carry a bracketed title and a parenthesized url");
        let title = caps.get(1).expect("link title group").as_str();
        let url = caps.get(2).expect("link url group").as_str();
        (title, url)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the delimiter character opening `text[start..end]` is not
/// continued immediately before the match or immediately after it.
///
/// The delimiters are all ASCII, so byte comparisons cannot collide with a
/// multi-byte character.
fn delimiter_isolated(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let delimiter = bytes[start];
    let before = start.checked_sub(1).map(|i| bytes[i]);
    let after = bytes.get(end).copied();
    before != Some(delimiter) && after != Some(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_constructs() {
        let grammar = Grammar::new();
        assert!(grammar.find_next("just ordinary words", 0).is_none());
    }

    #[test]
    fn leftmost_match_wins() {
        let grammar = Grammar::new();
        let m = grammar.find_next("a `code` and **bold**", 0).unwrap();
        assert_eq!(m.construct, Construct::InlineCode);
        assert_eq!((m.start, m.end), (2, 8));
    }

    #[test]
    fn same_start_ties_break_by_alternation_order() {
        // "* item" could open an italic body; the list alternative is earlier.
        let grammar = Grammar::new();
        let m = grammar.find_next("* item", 0).unwrap();
        assert_eq!(m.construct, Construct::UnorderedListItem);
    }

    #[test]
    fn doubled_delimiter_is_bold_not_italic() {
        let grammar = Grammar::new();
        let m = grammar.find_next("**bold**", 0).unwrap();
        assert_eq!(m.construct, Construct::Bold);
        assert_eq!((m.start, m.end), (0, 8));
    }

    #[test]
    fn tripled_delimiter_run_matches_nothing() {
        let grammar = Grammar::new();
        assert!(grammar.find_next("***a***", 0).is_none());
        assert!(grammar.find_next("___x___", 0).is_none());
    }

    #[test]
    fn guard_consults_both_neighbours() {
        let grammar = Grammar::new();
        // Double backticks are not a valid span delimiter here.
        assert!(grammar.find_next("``not code``", 0).is_none());
    }

    #[test]
    fn scan_start_offset_is_honoured() {
        let grammar = Grammar::new();
        let m = grammar.find_next("`a` `b`", 3).unwrap();
        assert_eq!(m.construct, Construct::InlineCode);
        assert_eq!((m.start, m.end), (4, 7));
    }

    #[test]
    fn rule_needs_its_own_line() {
        let grammar = Grammar::new();
        let m = grammar.find_next("above\n***\nbelow", 0).unwrap();
        assert_eq!(m.construct, Construct::Rule);
        assert_eq!((m.start, m.end), (6, 9));
        assert!(grammar.find_next("not *** a rule", 0).is_none());
    }

    #[test]
    fn split_link_separates_title_and_url() {
        let grammar = Grammar::new();
        assert_eq!(
            grammar.split_link("[title](http://x)"),
            ("title", "http://x")
        );
        assert_eq!(grammar.split_link("[]()"), ("", ""));
    }
}
