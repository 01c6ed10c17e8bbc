//! Rendering of expanded blocks to text with location markers.

use crate::config::DirectiveTable;
use crate::text_location::TextLocation;

use super::code_block::CodeBlock;

/// How a block is turned into text.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Suppress all location markers.
    pub publishable: bool,
    /// Marker syntax per language tag.
    pub directives: DirectiveTable,
}

/// Renders `block` with the built-in marker table.
pub fn render(block: &CodeBlock, publishable: bool) -> String {
    render_lines(block, publishable, DirectiveTable::builtin())
}

/// Renders `block` according to `options`.
pub fn render_with(block: &CodeBlock, options: &RenderOptions) -> String {
    render_lines(block, options.publishable, &options.directives)
}

/// Concatenates the lines of `block`, putting a marker line before every
/// line that does not directly follow its predecessor in the same document.
///
/// The first line never has a predecessor. Lines whose language has no
/// marker syntax are emitted without one.
fn render_lines(block: &CodeBlock, publishable: bool, directives: &DirectiveTable) -> String {
    let mut output = String::new();
    let mut previous: Option<&TextLocation> = None;

    for line in block {
        let continuous = previous.is_some_and(|prev| prev.is_followed_by(&line.location));
        if !publishable && !continuous {
            if let Some(directive) = directives.lookup(line.language()) {
                if !output.is_empty() && !output.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str(&directive.format(&line.location.document, line.location.line));
                output.push('\n');
            }
        }
        output.push_str(&line.text);
        previous = Some(&line.location);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineDirective;
    use crate::model::CodeLine;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn line(text: &str, document: &str, number: usize, language: &str) -> CodeLine {
        CodeLine::new(
            text,
            TextLocation::new(document, number),
            Some(Arc::from(language)),
        )
    }

    #[test]
    fn test_first_line_gets_marker() {
        let block: CodeBlock = vec![line("package main\n", "README.md", 12, "go")].into();
        assert_eq!(render(&block, false), "//line README.md:12\npackage main\n");
    }

    #[test]
    fn test_consecutive_lines_have_no_marker() {
        let block: CodeBlock = vec![
            line("a\n", "doc.md", 4, "go"),
            line("b\n", "doc.md", 5, "go"),
        ]
        .into();
        assert_eq!(render(&block, false), "//line doc.md:4\na\nb\n");
    }

    #[test]
    fn test_discontinuity_in_line_number() {
        let block: CodeBlock = vec![
            line("a\n", "doc.md", 4, "sh"),
            line("b\n", "doc.md", 9, "sh"),
        ]
        .into();
        assert_eq!(
            render(&block, false),
            "#line 4 \"doc.md\"\na\n#line 9 \"doc.md\"\nb\n"
        );
    }

    #[test]
    fn test_discontinuity_in_document() {
        let block: CodeBlock = vec![
            line("int a;\n", "one.md", 4, "c"),
            line("int b;\n", "two.md", 5, "c"),
        ]
        .into();
        assert_eq!(
            render(&block, false),
            "#line 4 \"one.md\"\nint a;\n#line 5 \"two.md\"\nint b;\n"
        );
    }

    #[test]
    fn test_unknown_language_has_no_marker() {
        let block: CodeBlock = vec![
            line("a = 1\n", "doc.md", 4, "python"),
            line("b = 2\n", "doc.md", 9, "python"),
        ]
        .into();
        assert_eq!(render(&block, false), "a = 1\nb = 2\n");
    }

    #[test]
    fn test_marker_follows_language_per_line() {
        let block: CodeBlock = vec![
            line("x\n", "doc.md", 1, "go"),
            line("y\n", "doc.md", 7, "python"),
        ]
        .into();
        assert_eq!(render(&block, false), "//line doc.md:1\nx\ny\n");
    }

    #[test]
    fn test_no_language_has_no_marker() {
        let block: CodeBlock =
            vec![CodeLine::new("x\n", TextLocation::new("doc.md", 2), None)].into();
        assert_eq!(render(&block, false), "x\n");
    }

    #[test]
    fn test_publishable_has_no_markers() {
        let block: CodeBlock = vec![
            line("a\n", "one.md", 4, "go"),
            line("b\n", "two.md", 1, "go"),
        ]
        .into();
        assert_eq!(render(&block, true), "a\nb\n");
    }

    #[test]
    fn test_marker_after_unterminated_line_starts_new_line() {
        let block: CodeBlock = vec![
            line("a", "one.md", 4, "go"),
            line("b\n", "two.md", 1, "go"),
        ]
        .into();
        assert_eq!(render(&block, false), "//line one.md:4\na\n//line two.md:1\nb\n");
    }

    #[test]
    fn test_render_with_alias() {
        let options = RenderOptions {
            publishable: false,
            directives: DirectiveTable::default().with_alias("cpp", LineDirective::C),
        };
        let block: CodeBlock = vec![line("int x;\n", "doc.md", 3, "cpp")].into();
        assert_eq!(render_with(&block, &options), "#line 3 \"doc.md\"\nint x;\n");
    }
}
