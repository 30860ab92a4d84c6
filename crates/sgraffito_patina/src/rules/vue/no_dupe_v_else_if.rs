//! vue/no-dupe-v-else-if
//!
//! Disallow duplicate conditions in `v-if` / `v-else-if` chains.
//!
//! Conditions are compared as written, after trimming. `a === b` and
//! `a===b` are different conditions.
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div(v-if="isSomething(x)")
//! div(v-else-if="isSomething(x)")
//! ```
//!
//! ### Valid
//! ```pug
//! div(v-if="foo")
//! div(v-else-if="bar")
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::{unquote, unquoted_offset, Directive};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/no-dupe-v-else-if",
    description: "Disallow duplicate conditions in `v-if` / `v-else-if` chains",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[(
        "unexpected",
        "This branch can never execute. Its condition is a duplicate or covered by previous conditions in the `v-if` / `v-else-if` chain.",
    )],
};

/// Disallow duplicate conditions in v-if / v-else-if chains
pub struct NoDupeVElseIf;

impl Rule for NoDupeVElseIf {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, _cursor: &TokenCursor) {
        let Some((raw, Some(value))) = token.as_attribute() else {
            return;
        };
        if !Directive::parse(raw).is_some_and(|d| d.is("else-if")) {
            return;
        }
        let condition = unquote(value).trim();
        if condition.is_empty() {
            return;
        }

        let duplicate = ctx
            .trackers()
            .chain_before()
            .is_some_and(|chain| chain.conditions.iter().any(|c| c == condition));
        if !duplicate {
            return;
        }

        let (value_start, _) = token.value_range().unwrap_or((token.start, token.end));
        let start = value_start + unquoted_offset(value) as u32;
        let end = (start + unquote(value).len() as u32).min(token.end);
        ctx.report_message("unexpected", &[], start, end);
    }
}
