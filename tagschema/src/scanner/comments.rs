//! Comment removal for declaration source text.

use crate::errors::{ExtractError, Result};

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";
const LINE_MARKER: &str = "//";

/// Remove block and line comments, trim every line and drop blank ones.
///
/// Block comments are removed first, one span at a time from the first `/*`
/// to the first `*/` after it, until no opener is left. An opener without a
/// closer fails with [`ExtractError::MalformedComment`].
///
/// Line comments are cut at the last `//` on the line, repeatedly, so that
/// stripping stripped text is a no-op.
pub fn strip_comments(text: &str) -> Result<String> {
    let mut content = text.to_string();

    while let Some(open) = content.find(BLOCK_OPEN) {
        let body_start = open + BLOCK_OPEN.len();
        let close = content[body_start..]
            .find(BLOCK_CLOSE)
            .map(|pos| body_start + pos + BLOCK_CLOSE.len())
            .ok_or(ExtractError::MalformedComment { offset: open })?;
        content.replace_range(open..close, "");
    }

    let lines: Vec<&str> = content
        .lines()
        .map(strip_line_comment)
        .filter(|line| !line.is_empty())
        .collect();

    Ok(lines.join("\n"))
}

fn strip_line_comment(line: &str) -> &str {
    let mut trimmed = line.trim();
    while let Some(pos) = trimmed.rfind(LINE_MARKER) {
        trimmed = trimmed[..pos].trim();
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_FILE: &str = r#"package main

// StrucA is a struct
type StructA struct {
	A int
	B int /*comments*/
	C string
}

/*
comments
comments
//
*/
type StructB struct {
	A uint // comments
	B int8 // comments
	C []byte
}
"#;

    #[test]
    fn test_strip_go_file() {
        let stripped = strip_comments(GO_FILE).unwrap();
        let expected = "package main\n\
                        type StructA struct {\n\
                        A int\n\
                        B int\n\
                        C string\n\
                        }\n\
                        type StructB struct {\n\
                        A uint\n\
                        B int8\n\
                        C []byte\n\
                        }";
        assert_eq!(stripped, expected);
    }

    #[test]
    fn test_block_comment_spanning_markers() {
        assert_eq!(strip_comments("a /* x */ b /* y */ c").unwrap(), "a  b  c");
        assert_eq!(strip_comments("a /* // */ b").unwrap(), "a  b");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = strip_comments("type A struct {\n/* open\n}").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedComment { offset: 16 }));
    }

    #[test]
    fn test_closer_before_opener_is_not_a_match() {
        let err = strip_comments("a */ b /* c").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedComment { offset: 7 }));
    }

    #[test]
    fn test_multiple_line_markers() {
        assert_eq!(strip_comments("A int // one // two").unwrap(), "A int");
        assert_eq!(strip_comments("// only a comment\n\n   \nB int").unwrap(), "B int");
    }

    #[test]
    fn test_idempotent() {
        let once = strip_comments(GO_FILE).unwrap();
        assert_eq!(strip_comments(&once).unwrap(), once);
    }
}
