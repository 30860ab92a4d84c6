//! vue/no-deprecated-filter
//!
//! Disallow using deprecated filters syntax (in Vue.js 3.0.0+).
//!
//! A single `|` inside a binding value or a text interpolation is a filter.
//! `||` is logical or.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div(v-bind:id="msg | filter")
//! p {{ msg | filterA | filterB }}
//! ```
//!
//! ### Valid
//! ```pug
//! div(:id="a || b")
//! p {{ method(msg) }}
//! input(pattern="a|b")
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::{unquote, unquoted_offset, Directive};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/no-deprecated-filter",
    description: "Disallow using deprecated filters syntax (in Vue.js 3.0.0+)",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[("noDeprecatedFilter", "Filters are deprecated.")],
};

static INTERPOLATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").unwrap());

/// Disallow using deprecated filters syntax
pub struct NoDeprecatedFilter;

/// Whether `expression` contains a `|` that is not part of `||`.
fn has_filter(expression: &str) -> bool {
    let bytes = expression.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'|'
            && bytes.get(i + 1) != Some(&b'|')
            && (i == 0 || bytes[i - 1] != b'|')
    })
}

impl Rule for NoDeprecatedFilter {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, _cursor: &TokenCursor) {
        let Some((raw, Some(value))) = token.as_attribute() else {
            return;
        };
        // Plain attribute values are strings, not expressions.
        if Directive::parse(raw).is_none() {
            return;
        }
        let expression = unquote(value);
        if !has_filter(expression) {
            return;
        }
        let (value_start, _) = token.value_range().unwrap_or((token.start, token.end));
        let start = value_start + unquoted_offset(value) as u32;
        let end = (start + expression.len() as u32).min(token.end);
        ctx.report_message("noDeprecatedFilter", &[], start, end);
    }

    fn check_text(&self, ctx: &mut LintContext, token: &ReconciledToken, _cursor: &TokenCursor) {
        let Some(text) = token.token.text() else {
            return;
        };
        let filtered = INTERPOLATION
            .captures_iter(text)
            .any(|captures| captures.get(1).is_some_and(|m| has_filter(m.as_str())));
        if filtered {
            ctx.report_message("noDeprecatedFilter", &[], token.start, token.end);
        }
    }
}
