//! Trailer and footer filtering for commit messages and PR bodies.
//!
//! - **Ordered rules**: each configured regex is applied in turn and every
//!   match is removed.
//! - **Whitespace normalization**: gaps of more than one blank line are
//!   collapsed and the result is trimmed.
//! - **Tolerant configuration**: invalid patterns are logged and skipped,
//!   and reported back to the caller.
//!
//! # Example
//!
//! ```
//! use localgit::filter::BodyFilter;
//!
//! let filter = BodyFilter::new();
//! let body = filter.filter_body("Fix bug\n\nCo-Authored-By: John Doe <john@example.com>");
//! assert_eq!(body, "Fix bug");
//!
//! let rejected = filter.configure(["(?m)^Signed-off-by:.*$", "[invalid"]);
//! assert_eq!(rejected.len(), 1);
//! ```

mod body;
mod patterns;

pub use body::{BodyFilter, RejectedPattern};
pub use patterns::{
    builtin_patterns, default_filter_patterns, find_builtin, BuiltinPattern, FilterRule, CO_AUTHORED_BY,
    PULL_REQUEST_FOOTER,
};
