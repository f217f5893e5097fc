use proptest::prelude::*;
use tagschema::strip_comments;

fn trimmed_non_blank_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn text_without_markers_only_loses_blank_lines(text in "[a-zA-Z0-9 {}`:;\"\t\n*]{0,200}") {
        let stripped = strip_comments(&text).unwrap();
        prop_assert_eq!(stripped, trimmed_non_blank_lines(&text));
    }

    #[test]
    fn stripping_is_idempotent(text in "([a-zA-Z `{}\t]|/\\*[a-z \n/]*\\*/|//|\n){0,60}") {
        if let Ok(once) = strip_comments(&text) {
            let twice = strip_comments(&once).unwrap();
            prop_assert_eq!(twice, once);
        }
    }

    #[test]
    fn stripped_text_has_no_markers(text in "([a-z ]|/\\*[a-z ]*\\*/|//|\n){0,60}") {
        let stripped = strip_comments(&text).unwrap();
        prop_assert!(!stripped.contains("/*"));
        prop_assert!(!stripped.contains("//"));
        prop_assert!(!stripped.lines().any(|line| line.trim().is_empty()));
    }
}
