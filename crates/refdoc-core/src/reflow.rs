//! Text reflow for hand-wrapped prose
//!
//! Descriptor prose is written as indented multi-line string literals. This
//! module turns it into publishable Markdown in two steps:
//!
//! - [`trim_rect`] cuts the text out of its surrounding whitespace, treating
//!   it as a rectangle whose left margin is the narrowest indentation of any
//!   non-blank line.
//! - [`make_paragraphs`] joins hard-wrapped lines into one logical line per
//!   paragraph, leaving headings, bullet lists and fenced code untouched.

/// Fence marker that opens and closes a code block
const FENCE: &str = "```";

/// Prefix of a bullet list item
const BULLET: &str = "* ";

/// Prefix of a heading line
const HEADING: char = '#';

/// Trim whitespace around the rectangular area of text.
///
/// Leading and trailing blank lines are dropped, the minimal indentation of
/// the remaining non-blank lines is removed from every line and trailing
/// whitespace is stripped. Lines indented deeper than the minimum keep their
/// extra indentation.
pub fn trim_rect(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(first);
    let lines = &lines[first..=last];

    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| strip_chars(l, indent).trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of leading whitespace characters
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Drop the first `n` characters, or everything for shorter (blank) lines
fn strip_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}

/// Layout state of the paragraph joiner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Between blocks
    Empty,
    /// Inside a paragraph
    Text,
    /// Inside a bullet list
    List,
    /// Inside a fenced code block
    Quotes,
}

impl Layout {
    /// Separator that terminates the block this state is in
    fn closing(self) -> &'static str {
        match self {
            Layout::Text => "\n\n",
            Layout::List => "\n",
            Layout::Empty | Layout::Quotes => "",
        }
    }
}

/// Join subsequent lines without an empty line between them into a single
/// paragraph.
///
/// Headings get a line of their own, bullet items are kept one per line and
/// everything between code fences is copied verbatim, blank lines included.
/// The result ends with exactly one newline unless it is empty or ends inside
/// an unterminated code block.
pub fn make_paragraphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = Layout::Empty;

    for line in text.split('\n') {
        if state == Layout::Quotes {
            out.push_str(line);
            if line.starts_with(FENCE) {
                out.push_str("\n\n");
                state = Layout::Empty;
            } else {
                out.push('\n');
            }
            continue;
        }

        if line.is_empty() {
            out.push_str(state.closing());
            state = Layout::Empty;
            continue;
        }

        if line.starts_with(HEADING) {
            out.push_str(state.closing());
            out.push_str(line);
            out.push_str("\n\n");
            state = Layout::Empty;
            continue;
        }

        if line.starts_with(BULLET) {
            if state == Layout::Text {
                out.push_str(state.closing());
            }
            out.push_str(line);
            out.push('\n');
            state = Layout::List;
            continue;
        }

        if line.starts_with(FENCE) {
            out.push_str(state.closing());
            out.push_str(line);
            out.push('\n');
            state = Layout::Quotes;
            continue;
        }

        match state {
            Layout::Text => out.push(' '),
            Layout::List => out.push('\n'),
            Layout::Empty | Layout::Quotes => {}
        }
        out.push_str(line);
        state = Layout::Text;
    }

    if state == Layout::Quotes {
        return out;
    }

    let end = out.trim_end_matches('\n').len();
    out.truncate(end);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_rect_drops_blank_edges() {
        let text = "\n\n    hello\n    world\n\n";
        assert_eq!(trim_rect(text), "hello\nworld");
    }

    #[test]
    fn test_trim_rect_keeps_relative_indent() {
        let text = "    a\n    b\n        c";
        assert_eq!(trim_rect(text), "a\nb\n    c");
    }

    #[test]
    fn test_trim_rect_ignores_blank_lines_for_indent() {
        let text = "\n        first\n\n  \n        second\n";
        assert_eq!(trim_rect(text), "first\n\n\nsecond");
    }

    #[test]
    fn test_trim_rect_strips_trailing_whitespace() {
        assert_eq!(trim_rect("  x   \n  y\t"), "x\ny");
    }

    #[test]
    fn test_trim_rect_idempotent() {
        let samples = [
            "",
            "   \n  \n",
            "\n    int x;\n      if(x) {\n        y();\n      }\n",
            "no indent\n  some indent\n",
            "\t\ttabbed\n\t\t\tdeeper\n",
        ];
        for sample in samples {
            let once = trim_rect(sample);
            assert_eq!(trim_rect(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_trim_rect_all_blank() {
        assert_eq!(trim_rect("\n   \n\t\n"), "");
    }

    #[test]
    fn test_paragraph_join() {
        assert_eq!(make_paragraphs("a\nb\nc"), "a b c\n");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let out = make_paragraphs("one\ntwo\n\nthree\nfour\n");
        assert_eq!(out, "one two\n\nthree four\n");
    }

    #[test]
    fn test_fenced_block_untouched() {
        let text = "```\nfoo\n\nbar\n```";
        let out = make_paragraphs(text);
        assert_eq!(out, "```\nfoo\n\nbar\n```\n");
    }

    #[test]
    fn test_fence_after_text_opens_new_block() {
        let out = make_paragraphs("Instead of:\n```c\ngo(bar(foo(a)));\n```\nDo this:");
        assert_eq!(out, "Instead of:\n\n```c\ngo(bar(foo(a)));\n```\n\nDo this:\n");
    }

    #[test]
    fn test_heading_on_its_own() {
        let out = make_paragraphs("# NAME\n\nmsleep - waits\n# SYNOPSIS");
        assert_eq!(out, "# NAME\n\nmsleep - waits\n\n# SYNOPSIS\n");
    }

    #[test]
    fn test_list_items_kept_verbatim() {
        let text = "Possible values are:\n\n* **A**: first\n* **B**: second\n\nAfter.";
        let out = make_paragraphs(text);
        assert_eq!(out, "Possible values are:\n\n* **A**: first\n* **B**: second\n\nAfter.\n");
    }

    #[test]
    fn test_list_directly_after_text() {
        let out = make_paragraphs("Errors:\n* **EBADF**: Invalid handle.");
        assert_eq!(out, "Errors:\n\n* **EBADF**: Invalid handle.\n");
    }

    #[test]
    fn test_unterminated_fence_passes_through() {
        let out = make_paragraphs("```\nint x;\n\n");
        assert_eq!(out, "```\nint x;\n\n\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(make_paragraphs(""), "");
        assert_eq!(make_paragraphs("\n\n\n"), "");
    }
}
