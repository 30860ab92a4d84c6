//! vue/valid-v-else-if
//!
//! Enforce valid `v-else-if` directives.
//!
//! `v-else-if` must:
//! - Be on an element following a `v-if` or `v-else-if` sibling
//! - Not be used with `v-if` or `v-else` on the same element
//! - Have no argument or modifier
//! - Have a non-empty value
//!
//! ## Examples
//!
//! ### Invalid
//! ```pug
//! div
//!   div(v-else-if="foo")
//!   div(v-if="foo")
//!   div(v-else-if)
//! ```
//!
//! ### Valid
//! ```pug
//! div
//!   div(v-if="foo")
//!   div(v-else-if="bar")
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::directive::{is_empty_value, Directive};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};

static META: RuleMeta = RuleMeta {
    name: "vue/valid-v-else-if",
    description: "Enforce valid `v-else-if` directives",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[
        (
            "missingVIf",
            "'v-else-if' directives require being preceded by the element which has a 'v-if' or 'v-else-if' directive.",
        ),
        (
            "withVIf",
            "'v-else-if' and 'v-if' directives can't exist on the same element.",
        ),
        (
            "withVElse",
            "'v-else-if' and 'v-else' directives can't exist on the same element.",
        ),
        ("unexpectedArgument", "'v-else-if' directives require no argument."),
        ("unexpectedModifier", "'v-else-if' directives require no modifier."),
        ("expectedValue", "'v-else-if' directives require that attribute value."),
    ],
};

/// Enforce valid v-else-if directives
pub struct ValidVElseIf;

impl Rule for ValidVElseIf {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((raw, value)) = token.as_attribute() else {
            return;
        };
        let Some(directive) = Directive::parse(raw).filter(|d| d.is("else-if")) else {
            return;
        };
        let Some((_, element)) = cursor.owner() else {
            return;
        };

        let message_id = if ctx.trackers().chain_before().is_none() {
            "missingVIf"
        } else if cursor.has_directive(element, "if") {
            "withVIf"
        } else if cursor.has_directive(element, "else") {
            "withVElse"
        } else if directive.argument.is_some() {
            "unexpectedArgument"
        } else if !directive.modifiers.is_empty() {
            "unexpectedModifier"
        } else if is_empty_value(value) {
            "expectedValue"
        } else {
            return;
        };

        let (start, end) = token.name_range().unwrap_or((token.start, token.end));
        ctx.report_message(message_id, &[], start, end);
    }
}
