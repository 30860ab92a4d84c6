//! vue/no-textarea-mustache
//!
//! Disallow mustaches in `<textarea>`.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! textarea {{ text }}
//! ```
//!
//! ### Valid
//! ```pug
//! textarea(v-model="text")
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/no-textarea-mustache",
    description: "Disallow mustaches in `<textarea>`",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[("unexpected", "Unexpected mustache. Use 'v-model' instead.")],
};

static MUSTACHE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{\{.*\}\}$").unwrap());

/// Disallow mustaches in textarea
pub struct NoTextareaMustache;

impl Rule for NoTextareaMustache {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_text(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((_, element)) = cursor.owner() else {
            return;
        };
        if element.name != "textarea" {
            return;
        }
        let Some(text) = token.token.text() else {
            return;
        };
        if MUSTACHE.is_match(text.trim()) {
            ctx.report_message("unexpected", &[], token.start, token.end);
        }
    }
}
