//! Body filter for commit messages and pull request descriptions.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace, warn};

use super::patterns::{default_filter_patterns, FilterRule};

/// Three or more newlines, as left behind by removed lines and blocks.
static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("static regex"));

/// A pattern that could not be compiled during configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedPattern {
    /// Position of the pattern in the configured list.
    pub index: usize,
    /// The pattern source.
    pub pattern: String,
    /// Compiler message.
    pub reason: String,
}

impl fmt::Display for RejectedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pattern #{} {:?} rejected: {}",
            self.index, self.pattern, self.reason
        )
    }
}

/// Strips unwanted trailers and footers from free-form text.
///
/// Rules are applied in order, each to the output of the previous one. The
/// active rule set is swapped as a whole by [`BodyFilter::configure`], so a
/// concurrent [`BodyFilter::filter_body`] call sees either the old or the new
/// set.
#[derive(Debug)]
pub struct BodyFilter {
    rules: RwLock<Arc<[FilterRule]>>,
}

impl BodyFilter {
    /// Create a filter with the built-in patterns.
    #[must_use]
    pub fn new() -> Self {
        let (rules, rejected) = compile_rules(&default_filter_patterns());
        debug_assert!(rejected.is_empty());
        Self {
            rules: RwLock::new(rules.into()),
        }
    }

    /// Create a filter from a configured pattern list.
    ///
    /// An empty list selects the built-in patterns. Patterns that fail to
    /// compile are skipped and returned.
    #[must_use]
    pub fn with_patterns<I, S>(patterns: I) -> (Self, Vec<RejectedPattern>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filter = Self::new();
        let rejected = filter.configure(patterns);
        (filter, rejected)
    }

    /// Replace the active rule set.
    ///
    /// Never fails: invalid patterns are logged, dropped and reported in the
    /// returned list while the remaining ones take effect. An empty list
    /// restores the built-in patterns.
    pub fn configure<I, S>(&self, patterns: I) -> Vec<RejectedPattern>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();
        if patterns.is_empty() {
            patterns = default_filter_patterns();
        }

        let (rules, rejected) = compile_rules(&patterns);
        debug!(
            active = rules.len(),
            rejected = rejected.len(),
            "Body filter configured"
        );

        let rules: Arc<[FilterRule]> = rules.into();
        *self.rules.write().unwrap_or_else(PoisonError::into_inner) = rules;
        rejected
    }

    /// The source patterns of the active rules, in application order.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|r| r.pattern().to_string())
            .collect()
    }

    /// Number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Filter a body of text.
    ///
    /// Removes every rule match, collapses runs of three or more newlines to
    /// a single blank line and trims the ends. The result is stable under
    /// another call, so filtering is idempotent.
    #[must_use]
    pub fn filter_body(&self, body: &str) -> String {
        if body.is_empty() {
            return String::new();
        }

        filter_to_fixpoint(&self.snapshot(), body).0
    }

    fn snapshot(&self) -> Arc<[FilterRule]> {
        Arc::clone(&self.rules.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Default for BodyFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_rules(patterns: &[String]) -> (Vec<FilterRule>, Vec<RejectedPattern>) {
    let mut rules = Vec::with_capacity(patterns.len());
    let mut rejected = Vec::new();

    for (index, pattern) in patterns.iter().enumerate() {
        match FilterRule::compile(pattern) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "Failed to compile filter pattern, skipping");
                rejected.push(RejectedPattern {
                    index,
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (rules, rejected)
}

/// Run passes until the text stops changing, returning it with the pass count.
///
/// Trimming after a pass can move an indented trailer to the start of the
/// text. Those are peeled off the front of the previous result before the
/// next pass, so a stack of them costs one extra pass instead of one each.
fn filter_to_fixpoint(rules: &[FilterRule], body: &str) -> (String, usize) {
    let mut current = filter_pass(rules, body);
    let mut passes = 1;
    loop {
        let rest = strip_leading(rules, &current);
        let next = filter_pass(rules, rest);
        passes += 1;
        if next == rest {
            return (next, passes);
        }
        trace!(
            before = current.len(),
            after = next.len(),
            "Body filter needed another pass"
        );
        current = next;
    }
}

/// Drop rule matches that start at the front of `text`, trimming after each.
fn strip_leading<'a>(rules: &[FilterRule], text: &'a str) -> &'a str {
    let mut rest = text;
    while let Some(len) = rules.iter().find_map(|rule| rule.leading_match_len(rest)) {
        rest = rest[len..].trim_start();
    }
    rest
}

fn filter_pass(rules: &[FilterRule], text: &str) -> String {
    let mut filtered = text.to_string();
    for rule in rules {
        let stripped = match rule.strip(&filtered) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(stripped) => stripped,
        };
        filtered = stripped;
    }

    EXCESS_NEWLINES
        .replace_all(&filtered, "\n\n")
        .trim()
        .to_string()
}
