//! Compiled filter rules and the built-in trailer patterns.

use std::borrow::Cow;

use regex::Regex;

/// A compiled body filter rule.
///
/// Every match of the rule is replaced with the empty string.
#[derive(Debug, Clone)]
pub struct FilterRule {
    pattern: String,
    regex: Regex,
    /// The same pattern pinned to the start of the text.
    leading: Option<Regex>,
}

impl FilterRule {
    /// Compile a rule from its textual pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error if `pattern` is not a valid regex.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let leading = Regex::new(&format!(r"\A(?:{pattern})")).ok();
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            leading,
        })
    }

    /// The source pattern this rule was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Length of a non-empty match starting at the first byte of `text`.
    #[must_use]
    pub fn leading_match_len(&self, text: &str) -> Option<usize> {
        self.leading
            .as_ref()?
            .find(text)
            .map(|m| m.end())
            .filter(|&end| end > 0)
    }

    /// Remove every match from the text.
    ///
    /// Borrows the input back when nothing matched.
    #[must_use]
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.regex.replace_all(text, "")
    }
}

/// A named built-in pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinPattern {
    /// Name of the pattern for identification.
    pub name: &'static str,
    /// Description of what this pattern removes.
    pub description: &'static str,
    /// The regex source.
    pub pattern: &'static str,
}

/// Every full line starting with `Co-Authored-By:`.
pub const CO_AUTHORED_BY: &str = r"(?m)^Co-Authored-By:.*$";

/// The `---` footer announcing which tool opened the pull request.
///
/// `(?s)` lets `\s*` cross the line break after `---`; the attribution is
/// `[^\n]+` so the match ends with its line.
pub const PULL_REQUEST_FOOTER: &str =
    r"(?s)---\s*Pull Request opened by \[[^\]]+\]\([^)]+\) with guidance from [^\n]+";

const BUILTIN_PATTERNS: &[BuiltinPattern] = &[
    BuiltinPattern {
        name: "co_authored_by",
        description: "Co-Authored-By trailer lines",
        pattern: CO_AUTHORED_BY,
    },
    BuiltinPattern {
        name: "pull_request_footer",
        description: "\"Pull Request opened by [tool](url) with guidance from ...\" footers",
        pattern: PULL_REQUEST_FOOTER,
    },
];

/// Get all built-in patterns, in application order.
#[must_use]
pub fn builtin_patterns() -> &'static [BuiltinPattern] {
    BUILTIN_PATTERNS
}

/// Look up the built-in entry whose regex source is `pattern`.
#[must_use]
pub fn find_builtin(pattern: &str) -> Option<&'static BuiltinPattern> {
    BUILTIN_PATTERNS.iter().find(|p| p.pattern == pattern)
}

/// The default pattern list used when none is configured.
#[must_use]
pub fn default_filter_patterns() -> Vec<String> {
    BUILTIN_PATTERNS
        .iter()
        .map(|p| p.pattern.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin(name: &str) -> FilterRule {
        let pattern = builtin_patterns()
            .iter()
            .find(|p| p.name == name)
            .unwrap();
        FilterRule::compile(pattern.pattern).unwrap()
    }

    #[test]
    fn test_builtin_patterns_compile() {
        for pattern in builtin_patterns() {
            assert!(
                FilterRule::compile(pattern.pattern).is_ok(),
                "Invalid pattern: {}",
                pattern.name
            );
            assert!(!pattern.description.is_empty());
        }
    }

    #[test]
    fn test_default_filter_patterns_order() {
        let patterns = default_filter_patterns();
        assert_eq!(patterns, vec![CO_AUTHORED_BY, PULL_REQUEST_FOOTER]);
    }

    #[test]
    fn test_compile_invalid_pattern() {
        assert!(FilterRule::compile("[invalid").is_err());
    }

    #[test]
    fn test_rule_keeps_source_pattern() {
        let rule = FilterRule::compile(r"\bWIP\b").unwrap();
        assert_eq!(rule.pattern(), r"\bWIP\b");
    }

    #[test]
    fn test_co_authored_by_is_line_anchored() {
        let rule = builtin("co_authored_by");

        assert_eq!(rule.strip("Co-Authored-By: John Doe <john@example.com>"), "");
        assert_eq!(rule.strip("text\nCo-Authored-By:    Spaced   <s@x.io>"), "text\n");

        let mid_line = "This mentions Co-Authored-By: mid-line";
        assert_eq!(rule.strip(mid_line), mid_line);
        let lower = "co-authored-by: lower <l@x.io>";
        assert_eq!(rule.strip(lower), lower);
    }

    #[test]
    fn test_co_authored_by_strips_only_the_line() {
        let rule = builtin("co_authored_by");
        let stripped = rule.strip("a\nCo-Authored-By: X <x@x.io>\nb");
        assert_eq!(stripped, "a\n\nb");
    }

    #[test]
    fn test_footer_spans_line_break() {
        let rule = builtin("pull_request_footer");
        let text = "body\n\n---\nPull Request opened by [Bot](https://bot.example/) with guidance from the author";

        assert_eq!(rule.strip(text), "body\n\n");
    }

    #[test]
    fn test_footer_stops_at_end_of_attribution_line() {
        let rule = builtin("pull_request_footer");
        let text = "---\nPull Request opened by [X](http://x.com) with guidance from Y\n\nKeep me";

        assert_eq!(rule.strip(text), "\n\nKeep me");
    }

    #[test]
    fn test_footer_requires_link_shape() {
        let rule = builtin("pull_request_footer");
        let no_link = "---\nPull Request opened by Bot with guidance from Y";
        let empty_name = "---\nPull Request opened by [](http://x) with guidance from Y";

        assert!(matches!(rule.strip(no_link), Cow::Borrowed(_)));
        assert!(matches!(rule.strip(empty_name), Cow::Borrowed(_)));
    }

    #[test]
    fn test_leading_match_only_at_start() {
        let rule = builtin("co_authored_by");

        assert_eq!(rule.leading_match_len("Co-Authored-By: X <x@x.io>\nBody"), Some(26));
        assert_eq!(rule.leading_match_len("Body\nCo-Authored-By: X <x@x.io>"), None);
        assert_eq!(rule.leading_match_len("  Co-Authored-By: X <x@x.io>"), None);
    }

    #[test]
    fn test_leading_match_ignores_empty_matches() {
        let rule = FilterRule::compile("x*").unwrap();
        assert_eq!(rule.leading_match_len("abc"), None);
        assert_eq!(rule.leading_match_len("xxabc"), Some(2));
    }

    #[test]
    fn test_leading_match_anchors_every_alternative() {
        let rule = FilterRule::compile(r"(?i)wip|draft").unwrap();
        assert_eq!(rule.leading_match_len("WIP: later"), Some(3));
        assert_eq!(rule.leading_match_len("Draft notes"), Some(5));
        assert_eq!(rule.leading_match_len("a draft"), None);
    }

    #[test]
    fn test_find_builtin_by_source() {
        let found = find_builtin(CO_AUTHORED_BY).unwrap();
        assert_eq!(found.name, "co_authored_by");
        assert_eq!(found.description, "Co-Authored-By trailer lines");

        assert_eq!(find_builtin(PULL_REQUEST_FOOTER).unwrap().name, "pull_request_footer");
        assert!(find_builtin(r"(?m)^Signed-off-by:.*$").is_none());
    }

    #[test]
    fn test_strip_borrows_when_nothing_matches() {
        let rule = builtin("co_authored_by");
        assert!(matches!(rule.strip("nothing here"), Cow::Borrowed(_)));
    }
}
